pub mod attendance;
pub mod employees;
pub mod stats;

/// Percentage of `part` over `whole`, rounded to one decimal place.
/// Defined as 0 when `whole` is 0 so an empty ledger never divides by zero.
pub(crate) fn rate_percent(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}
