//! Comparisons of costs with a tolerance.
//!
//! Fixed point computations over floating point costs may otherwise oscillate on rounding noise.
//! Any decrease of a cost smaller than the tolerance is ignored.

/// The cost of something unreachable.
///
/// The maximum finite value, rather than infinity, so that arithmetic on costs stays finite.
pub const UNREACHABLE: f64 = f64::MAX;

/// Whether `x` is less than `y` by more than `epsilon`.
#[inline]
pub fn e_less(x: f64, y: f64, epsilon: f64) -> bool {
    (y - x) > epsilon
}

/// Whether `x` and `y` are within `epsilon` of each other.
#[inline]
pub fn e_equal(x: f64, y: f64, epsilon: f64) -> bool {
    (x - y).abs() <= epsilon
}

/// Addition which saturates at [UNREACHABLE].
#[inline]
pub fn saturating_add(x: f64, y: f64) -> f64 {
    if x == UNREACHABLE || y == UNREACHABLE {
        UNREACHABLE
    } else {
        (x + y).min(UNREACHABLE)
    }
}
