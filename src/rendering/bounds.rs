use glam::Mat4;

use crate::rendering::common::model::{BoundingBox, ModelDocument, NodeId};

pub enum BoundsAggregator {}

impl BoundsAggregator {
    /// Object space pass: vertices through the offset matrix (plus both pivots for anything
    /// that is part of a hierarchy), accumulated per node and for the whole model.
    pub fn update_object_bounds(document: &mut ModelDocument) {
        let mut model_bbox = BoundingBox::empty();

        for id in document.walk_depth_first() {
            let node = document.node(id);
            let in_hierarchy = node.parent().is_some() || node.has_children();
            let shift = node.position + node.offset_pivot;

            // Children always include their own origin.
            let mut bbox = if node.parent().is_some() {
                BoundingBox::at_origin()
            } else {
                BoundingBox::empty()
            };

            for vertex in node.face_vertices() {
                let mut v = node.offset * vertex;
                if in_hierarchy {
                    v += shift;
                }
                bbox.extend(v);
            }
            bbox.finalize();

            model_bbox.merge(&bbox);
            document.node_mut(id).local_bbox = bbox;
        }

        model_bbox.finalize();
        document.bbox = model_bbox;
    }

    /// The matrix every reachable node's vertices are transformed with in world space.
    ///
    /// `base` is applied at the root. A node's vertices use `base · pose · offset`, its
    /// children get `base · pose` as their base: the offset only places the node's own geometry.
    pub fn world_matrices(document: &ModelDocument, base: Mat4) -> Vec<(NodeId, Mat4)> {
        let mut matrices = Vec::new();
        let mut stack = vec![(document.root_id(), base)];

        while let Some((id, base)) = stack.pop() {
            let node = document.node(id);
            let posed = base * node.pose_matrix;
            matrices.push((id, posed * node.offset_matrix));

            stack.extend(node.children().iter().rev().map(|&child| (child, posed)));
        }

        matrices
    }

    /// World space pass, requires the pose and offset matrices to be up to date.
    pub fn update_world_bounds(document: &mut ModelDocument, base: Mat4) {
        let mut world_bbox = BoundingBox::empty();

        for (id, matrix) in BoundsAggregator::world_matrices(document, base) {
            let mut bbox = BoundingBox::empty();
            for vertex in document.node(id).face_vertices() {
                bbox.extend(matrix.transform_point3(vertex));
            }
            bbox.finalize();

            world_bbox.merge(&bbox);
            document.node_mut(id).world_bbox = bbox;
        }

        world_bbox.finalize();
        document.max_range = world_bbox.max_range();
        document.world_bbox = world_bbox;
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat3, Vec3};
    use rsm_files::rsm::types::ShadeType;

    use crate::rendering::bounds::BoundsAggregator;
    use crate::rendering::common::model::{
        BoundingBox, Face, HierarchyDiagnostics, MeshNode, ModelDocument, NodeId,
    };

    fn triangle(name: &str, vertices: [Vec3; 3]) -> MeshNode {
        let mut node = MeshNode::new(name);
        node.vertices = vertices.to_vec();
        node.faces = vec![Face {
            vertex_ids: [0, 1, 2],
            tex_coord_ids: [0, 0, 0],
            texture_id: 0,
            two_sided: 0,
            smooth_group: 0,
            normal: Face::compute_normal([0, 1, 2], &vertices),
        }];
        node
    }

    fn document(nodes: Vec<MeshNode>) -> ModelDocument {
        ModelDocument {
            version: 0x0104,
            anim_len: 0,
            shade_type: ShadeType::Flat,
            alpha: 0,
            textures: vec![],
            nodes,
            root: NodeId(0),
            diagnostics: HierarchyDiagnostics::default(),
            bbox: BoundingBox::empty(),
            world_bbox: BoundingBox::empty(),
            max_range: 0.0,
        }
    }

    /// A root with the default (Z up to Y up) offset and a shifted child below it.
    fn parent_and_child() -> ModelDocument {
        let mut root = triangle("Root", [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 2.0)]);
        root.offset_pivot = Vec3::new(1.0, 0.0, 0.0);
        root.children = vec![NodeId(1)];

        let mut child = triangle("Child", [Vec3::ZERO, Vec3::X, Vec3::Y]);
        child.parent_name = "Root".to_string();
        child.parent = Some(NodeId(0));
        child.offset = Mat3::IDENTITY;
        child.position = Vec3::new(0.0, 3.0, 0.0);
        child.offset_pivot = Vec3::new(0.0, 0.0, 1.0);

        document(vec![root, child])
    }

    fn assert_bbox(bbox: &BoundingBox, min: Vec3, max: Vec3) {
        assert!(bbox.min.abs_diff_eq(min, 1e-5), "min {} != {}", bbox.min, min);
        assert!(bbox.max.abs_diff_eq(max, 1e-5), "max {} != {}", bbox.max, max);
    }

    #[test]
    pub fn object_bounds_apply_offset_and_both_pivots() {
        let mut document = parent_and_child();
        BoundsAggregator::update_object_bounds(&mut document);

        // (x, y, z) -> (x, -z, y), then shifted by the pivot.
        assert_bbox(
            &document.node(NodeId(0)).local_bbox,
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        );
        // the child's box always contains its origin.
        assert_bbox(
            &document.node(NodeId(1)).local_bbox,
            Vec3::ZERO,
            Vec3::new(1.0, 4.0, 1.0),
        );
        assert_bbox(&document.bbox, Vec3::new(0.0, -2.0, 0.0), Vec3::new(3.0, 4.0, 1.0));
        assert_eq!(document.bbox.center, Vec3::new(1.5, 1.0, 0.5));
    }

    #[test]
    pub fn children_inherit_the_pose_but_not_the_offset() {
        let mut document = parent_and_child();
        document.update_matrices(None);

        assert_bbox(
            &document.node(NodeId(0)).world_bbox,
            Vec3::new(-0.5, 4.0, -0.5),
            Vec3::new(1.5, 6.0, -0.5),
        );
        assert_bbox(
            &document.node(NodeId(1)).world_bbox,
            Vec3::new(-1.5, 0.0, 0.5),
            Vec3::new(-0.5, 1.0, 0.5),
        );
        assert_bbox(&document.world_bbox, Vec3::new(-1.5, 0.0, -0.5), Vec3::new(1.5, 6.0, 0.5));
        assert_eq!(document.max_range, 6.0);
    }

    #[test]
    pub fn a_single_mesh_stands_centered_on_the_ground() {
        let mut root = triangle(
            "Box",
            [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 2.0)],
        );
        root.offset = Mat3::IDENTITY;
        let mut document = document(vec![root]);
        document.update_matrices(None);

        assert_bbox(&document.bbox, Vec3::ZERO, Vec3::new(2.0, 4.0, 2.0));
        assert_bbox(&document.world_bbox, Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 4.0, 1.0));
        assert_eq!(document.max_range, 4.0);
    }
}
