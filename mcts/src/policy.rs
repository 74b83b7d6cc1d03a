/// Selection policy: scores one child against its siblings during descent.
///
/// `total` is the child's accumulated score, `visits` its visit count
/// (callers guarantee `visits >= 1`) and `parent_visits` the sibling group's
/// shared denominator. Higher is preferred.
pub type PolicyFn = fn(total: f64, visits: u64, parent_visits: u64) -> f64;

/// UCB1-style default policy.
///
/// Rounding to two decimal places flattens floating-point noise into ties so
/// move choice stays reproducible; the ties are then broken by visit count
/// during selection.
pub fn ucb1(total: f64, visits: u64, parent_visits: u64) -> f64 {
    let exploitation = total / visits as f64;
    let exploration = (2.0 * (parent_visits as f64).ln() / visits as f64).sqrt();
    ((exploitation + exploration) * 100.0).round() / 100.0
}
