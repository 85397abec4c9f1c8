#[macro_use]
mod macros;

/// Returns the version string reported by the CLI and sent in the user agent
/// of outgoing HTTP requests.
pub const fn kindaccess_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub trait Apply {
    /// Applies the function `f` only if `value` is `Some(...)` and provides the
    /// contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use kindaccess_utils::Apply;
    /// fn with_phone(line: String, phone: Option<&str>) -> String {
    ///     line.apply_map(phone, |slf, phone| format!("{slf} ({phone})"))
    /// }
    /// assert_eq!(with_phone("Jo".into(), None), "Jo");
    /// assert_eq!(with_phone("Jo".into(), Some("0400")), "Jo (0400)");
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        if let Some(value) = value {
            f(self, value)
        } else {
            self
        }
    }
}

impl<T> Apply for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assert_matches_accepts_matching_pattern() {
        let value: Result<u8, ()> = Ok(7);
        assert_matches!(value, Ok(7));
        assert_matches!(&value, Ok(x) if *x > 5);
    }

    #[test]
    #[should_panic(expected = "did not match pattern")]
    fn assert_matches_panics_on_mismatch() {
        let value: Result<u8, ()> = Err(());
        assert_matches!(value, Ok(_));
    }
}
