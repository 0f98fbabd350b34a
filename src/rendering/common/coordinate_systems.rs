use glam::{Mat4, Vec3};

/// RSM geometry is stored with Y pointing down, our render convention has Y up.
/// Applied exactly once, at the root of the world space traversal.
#[inline]
pub fn rsm_to_render_base() -> Mat4 {
    Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0))
}
