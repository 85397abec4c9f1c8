/// Asserts that an expression matches a pattern, optionally with a guard.
///
/// Unlike `assert!(matches!(..))`, the failure message includes the debug
/// representation of the value that did not match.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            value => ::core::panic!(
                "assertion failed: {value:?} did not match pattern `{}`",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $guard:expr) => {{
        let value = $expr;
        match (&value) {
            $pat if $guard => (),
            #[allow(unused_variables, reason = "bindings are only read by the guard")]
            $pat => ::core::panic!(
                "assertion failed: {value:?} matched `{}` but not guard `{}`",
                ::core::stringify!($pat),
                ::core::stringify!($guard)
            ),
            _ => ::core::panic!(
                "assertion failed: {value:?} did not match pattern `{}`",
                ::core::stringify!($pat)
            ),
        }
    }};
}
