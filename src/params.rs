//! Dimension validation and translation to the provider's wire format.

use crate::error::BridgeError;

/// Check that the requested dimensions are positive and fit the wire types.
///
/// The CLI parses dimensions as `i64` so that out-of-range values reach this
/// check (and the failure envelope) instead of the argument-error exit path.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidDimensions`] if either value is not a
/// positive integer within `u32` range.
pub fn validate_dimensions(width: i64, height: i64) -> Result<(u32, u32), BridgeError> {
    let in_range = |v: i64| u32::try_from(v).ok().filter(|v| *v > 0);
    match (in_range(width), in_range(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(BridgeError::InvalidDimensions(format!(
            "width and height must be positive integers, got {width}x{height}"
        ))),
    }
}

/// Reduce pixel dimensions to the `W:H` aspect-ratio form the `:predict`
/// endpoint accepts. Whether the resulting ratio is one the model supports
/// is the provider's decision, not ours.
#[must_use]
pub fn aspect_ratio(width: u32, height: u32) -> String {
    let g = gcd(width, height);
    format!("{}:{}", width / g, height / g)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
