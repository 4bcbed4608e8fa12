/// Sentinel meaning "no constraint here".
///
/// This is a NaN, so every ordinary comparison against it is false and arithmetic that
/// touches it stays undefined. Use [`is_undefined`] to test for it.
pub const UNDEFINED: f32 = f32::NAN;

/// Tolerance used when probing the layout cache.
pub(crate) const CACHE_EPSILON: f32 = 0.000_01;

/// Returns `true` if `value` is the [`UNDEFINED`] sentinel.
#[inline]
pub fn is_undefined(value: f32) -> bool {
    value.is_nan()
}

/// Exact equality where two undefined values compare equal.
///
/// Setters use this to decide whether a write is a change.
#[inline]
pub fn floats_equal(a: f32, b: f32) -> bool {
    if is_undefined(a) || is_undefined(b) {
        return is_undefined(a) && is_undefined(b);
    }
    a == b
}

/// Tolerance equality where two undefined values compare equal and an undefined value
/// never equals a defined one.
#[inline]
pub(crate) fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    if is_undefined(a) || is_undefined(b) {
        return is_undefined(a) && is_undefined(b);
    }
    (a - b).abs() < epsilon
}

/// Intrinsic size reported by a measurement callback.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in points.
    pub width: f32,
    /// Height in points.
    pub height: f32,
}

impl Size {
    /// A zero-sized extent.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Build a size from its two extents.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub(crate) fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
