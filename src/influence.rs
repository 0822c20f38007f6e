//! Vertical position to influence weight.
//!
//! The canvas' vertical axis doubles as a weighting control: a node at the top edge has full
//! influence (100), one at the bottom edge none (0), linear in between and clamped outside.

/// Maximum influence, reached at the top edge of the canvas.
pub const MAX_INFLUENCE: f64 = 100.0;

/// Influence weight in `[0, 100]` of a node whose top edge sits at `y` on a canvas
/// `canvas_height` tall.
///
/// Returns 0 when the height is not a positive finite number (an unmounted canvas) or `y` is
/// NaN.
pub fn influence(y: f64, canvas_height: f64) -> f64 {
  if !(canvas_height.is_finite() && canvas_height > 0.0) || y.is_nan() {
    return 0.0;
  }
  let weight = MAX_INFLUENCE - (y / canvas_height) * MAX_INFLUENCE;
  weight.clamp(0.0, MAX_INFLUENCE)
}
