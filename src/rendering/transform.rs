use glam::{Mat4, Quat, Vec3};

use crate::rendering::animation::{AnimationSampler, PlaybackTime};
use crate::rendering::common::model::{BoundingBox, MeshNode, ModelDocument};

/// Static rotations at or below this angle (radians) are treated as no rotation.
pub const MIN_ROTATION_ANGLE: f32 = 0.01;

/// Computes the two per-node matrices. Neither is multiplied with the parent's matrices here,
/// composition happens in the world space bounds pass.
pub enum TransformEngine {}

impl TransformEngine {
    /// Needs up-to-date object space bounds, the root is anchored relative to them.
    pub fn update_pose_matrices(document: &mut ModelDocument, time: PlaybackTime) {
        let bbox = document.bbox;
        for id in document.walk_depth_first() {
            let node = document.node_mut(id);
            node.pose_matrix = TransformEngine::pose_matrix(node, &bbox, time);
        }
    }

    pub fn update_offset_matrices(document: &mut ModelDocument) {
        let bbox = document.bbox;
        for id in document.walk_depth_first() {
            let node = document.node_mut(id);
            node.offset_matrix = TransformEngine::offset_matrix(node, &bbox);
        }
    }

    /// translation · rotation · scale, the animatable part of a node's transform.
    pub fn pose_matrix(node: &MeshNode, model_bbox: &BoundingBox, time: PlaybackTime) -> Mat4 {
        let translation = match (node.parent(), node.has_children()) {
            // stand the whole model on the ground, centered around the origin.
            (None, true) => Vec3::new(-model_bbox.center.x, -model_bbox.max.y, -model_bbox.center.z),
            (None, false) => Vec3::new(0.0, -model_bbox.max.y + model_bbox.center.y, 0.0),
            (Some(_), _) => node.position,
        };

        let mut matrix = Mat4::from_translation(translation);
        if let Some(rotation) = TransformEngine::rotation(node, time) {
            matrix *= Mat4::from_quat(rotation);
        }
        matrix * Mat4::from_scale(node.scale)
    }

    fn rotation(node: &MeshNode, time: PlaybackTime) -> Option<Quat> {
        if node.is_animated() {
            return Some(AnimationSampler::sample(&node.frames, time));
        }

        if node.rot_angle.abs() <= MIN_ROTATION_ANGLE {
            return None;
        }

        node.rot_axis
            .try_normalize()
            .map(|axis| Quat::from_axis_angle(axis, node.rot_angle))
    }

    /// The static placement of the node's vertices: pivot translation · offset matrix.
    pub fn offset_matrix(node: &MeshNode, model_bbox: &BoundingBox) -> Mat4 {
        let translation = if node.parent().is_none() && !node.has_children() {
            -model_bbox.center
        } else {
            node.offset_pivot
        };

        Mat4::from_translation(translation) * Mat4::from_mat3(node.offset)
    }
}
