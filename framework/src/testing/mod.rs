//! Test helpers
//!
//! ```rust,ignore
//! use kit::expect;
//! use kit::testing::TestDatabase;
//!
//! #[tokio::test]
//! async fn lists_nothing_when_empty() {
//!     let db = TestDatabase::fresh::<Migrator>().await.unwrap();
//!     let todos = SqlTodoStore::new(db.conn().clone()).list(1000).await.unwrap();
//!     expect!(todos).to_be_empty();
//! }
//! ```

mod expect;

pub use crate::database::TestDatabase;
pub use expect::Expect;

/// Fluent assertion recording the call site
#[macro_export]
macro_rules! expect {
    ($value:expr) => {
        $crate::testing::Expect::new($value, concat!(file!(), ":", line!()))
    };
}
