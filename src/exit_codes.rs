//! Exit code constants for the plinth CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, config, filesystem)
//! - 2: Template failure (front matter or placeholder syntax, undefined variables)
//! - 3: Layout failure (unknown layout, circular inheritance, content markers)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or a filesystem failure.
pub const USER_ERROR: i32 = 1;

/// Template failure: malformed front matter or a template that cannot render.
pub const TEMPLATE_FAILURE: i32 = 2;

/// Layout failure: the layout inheritance graph cannot be resolved.
pub const LAYOUT_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, TEMPLATE_FAILURE, LAYOUT_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
