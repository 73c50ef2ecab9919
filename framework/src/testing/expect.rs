//! Fluent assertions with expected/received output

use std::fmt::Debug;

/// Value under test, tagged with the call site of `expect!`
pub struct Expect<T> {
    value: T,
    location: &'static str,
}

impl<T> Expect<T> {
    /// Use the `expect!` macro instead
    pub fn new(value: T, location: &'static str) -> Self {
        Self { value, location }
    }

    #[track_caller]
    fn fail(&self, matcher: &str, expected: impl Debug, received: impl Debug) -> ! {
        panic!(
            "\nassertion failed at {}\n  expect!(value).{}\n\n  Expected: {:?}\n  Received: {:?}\n",
            self.location, matcher, expected, received
        )
    }
}

impl<T: Debug + PartialEq> Expect<T> {
    pub fn to_equal(&self, expected: T) {
        if self.value != expected {
            self.fail("to_equal(expected)", expected, &self.value);
        }
    }

    pub fn to_not_equal(&self, unexpected: T) {
        if self.value == unexpected {
            self.fail("to_not_equal(value)", format!("not {:?}", unexpected), &self.value);
        }
    }
}

impl Expect<bool> {
    pub fn to_be_true(&self) {
        if !self.value {
            self.fail("to_be_true()", true, self.value);
        }
    }

    pub fn to_be_false(&self) {
        if self.value {
            self.fail("to_be_false()", false, self.value);
        }
    }
}

impl<T: Debug> Expect<Option<T>> {
    pub fn to_be_some(&self) {
        if self.value.is_none() {
            self.fail("to_be_some()", "Some(_)", &self.value);
        }
    }

    pub fn to_be_none(&self) {
        if self.value.is_some() {
            self.fail("to_be_none()", "None", &self.value);
        }
    }
}

impl<T: Debug, E: Debug> Expect<Result<T, E>> {
    pub fn to_be_ok(&self) {
        if self.value.is_err() {
            self.fail("to_be_ok()", "Ok(_)", &self.value);
        }
    }

    pub fn to_be_err(&self) {
        if self.value.is_ok() {
            self.fail("to_be_err()", "Err(_)", &self.value);
        }
    }
}

impl Expect<String> {
    pub fn to_contain(&self, substring: &str) {
        if !self.value.contains(substring) {
            self.fail("to_contain(substring)", substring, &self.value);
        }
    }

    pub fn to_be_empty(&self) {
        if !self.value.is_empty() {
            self.fail("to_be_empty()", "", &self.value);
        }
    }
}

impl Expect<&str> {
    pub fn to_contain(&self, substring: &str) {
        if !self.value.contains(substring) {
            self.fail("to_contain(substring)", substring, self.value);
        }
    }
}

impl<T: Debug + PartialEq> Expect<Vec<T>> {
    pub fn to_have_length(&self, expected: usize) {
        if self.value.len() != expected {
            self.fail(
                "to_have_length(n)",
                format!("length {}", expected),
                format!("length {}: {:?}", self.value.len(), self.value),
            );
        }
    }

    pub fn to_contain(&self, item: &T) {
        if !self.value.contains(item) {
            self.fail("to_contain(item)", item, &self.value);
        }
    }

    pub fn to_be_empty(&self) {
        if !self.value.is_empty() {
            self.fail("to_be_empty()", "[]", &self.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::expect;

    #[test]
    fn test_passing_matchers() {
        expect!(2 + 2).to_equal(4);
        expect!(Some(1)).to_be_some();
        expect!(Ok::<_, ()>(1)).to_be_ok();
        expect!("graphql".to_string()).to_contain("ph");
        expect!(vec![1, 2]).to_have_length(2);
    }

    #[test]
    #[should_panic(expected = "to_equal(expected)")]
    fn test_failure_names_the_matcher() {
        expect!("a").to_equal("b");
    }
}
