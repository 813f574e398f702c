//! Distribution name normalization.

/// Normalize a project name for use in file and directory names.
///
/// Runs of `-`, `_` and `.` collapse into a single underscore; case is
/// preserved. Leading and trailing separators are dropped.
///
/// # Example
///
/// ```
/// use wheelwright_core::normalize_name;
///
/// assert_eq!(normalize_name("my-package"), "my_package");
/// assert_eq!(normalize_name("My.Cool--Pkg"), "My_Cool_Pkg");
/// ```
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars() {
        if c == '-' || c == '_' || c == '.' {
            pending_sep = true;
        } else {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        }
    }
    out
}
