//! Small text helpers used when building view models.

/// Pluralize a word based on count.
///
/// # Example
///
/// ```rust
/// use user_manager::templates::pluralize;
///
/// assert_eq!(pluralize(1, "user", "users"), "user");
/// assert_eq!(pluralize(2, "user", "users"), "users");
/// assert_eq!(pluralize(0, "user", "users"), "users");
/// ```
#[must_use]
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        singular.to_string()
    } else {
        plural.to_string()
    }
}

/// Pick a CSS class conditionally.
///
/// # Example
///
/// ```rust
/// use user_manager::templates::classes;
///
/// assert_eq!(classes(true, "invalid", ""), "invalid");
/// assert_eq!(classes(false, "invalid", "valid"), "valid");
/// ```
#[must_use]
pub fn classes<'a>(condition: bool, if_true: &'a str, if_false: &'a str) -> &'a str {
    if condition {
        if_true
    } else {
        if_false
    }
}
