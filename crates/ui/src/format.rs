//! Number formatting shared by the weather and departure renderers.

/// Round to the nearest integer, halves towards positive infinity.
///
/// `-2.5` becomes `-2`, not `-3` as `f64::round` would give.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
