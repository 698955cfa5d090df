//! Small numeric helpers shared by diff producers.

/// True if `value` has no fractional part.
///
/// Infinities and `NaN` are not integers.
pub fn is_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}
