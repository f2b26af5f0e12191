/// Tolerance used when deciding whether the actor rests on a surface
pub const NEARLY_EQUAL_EPSILON: f32 = 1e-5;

/// Returns true when `a` and `b` differ by less than [`NEARLY_EQUAL_EPSILON`].
///
/// Infinite operands never compare nearly-equal, so an open bound can never
/// count as a resting contact.
pub fn nearly_equal(a: f32, b: f32) -> bool {
    (a - b).abs() < NEARLY_EQUAL_EPSILON
}
