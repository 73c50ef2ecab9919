mod require_database;

pub use require_database::RequireDatabase;
