pub mod attendance;
pub mod dashboard;
pub mod employee;

/// Filter convention: an empty or whitespace-only parameter means
/// "not provided", the same as omitting it.
pub(crate) fn none_if_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
