use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
use log::debug;
use rsm_files::rsm::types::{ShadeType, VERSION_ALPHA};

use crate::rendering::animation::{AnimationClock, PlaybackTime};
use crate::rendering::bounds::BoundsAggregator;
use crate::rendering::common::coordinate_systems;
use crate::rendering::transform::TransformEngine;

/// Index of a node inside its [`ModelDocument`]. Only meaningful for the document it came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
    pub center: Vec3,
}

impl BoundingBox {
    /// Start value of every accumulation, any real vertex replaces it.
    pub const SENTINEL: f32 = 999_999.0;

    pub fn empty() -> Self {
        BoundingBox {
            min: Vec3::splat(Self::SENTINEL),
            max: Vec3::splat(-Self::SENTINEL),
            center: Vec3::ZERO,
        }
    }

    pub fn at_origin() -> Self {
        BoundingBox {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
            center: Vec3::ZERO,
        }
    }

    #[inline]
    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn merge(&mut self, other: &BoundingBox) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn finalize(&mut self) {
        self.center = (self.min + self.max) / 2.0;
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Empty boxes are contained in everything.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.is_empty() || (self.min.cmple(other.min).all() && self.max.cmpge(other.max).all())
    }

    /// The largest distance from the origin along any axis.
    pub fn max_range(&self) -> f32 {
        self.max.max(-self.min).max_element()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub vertex_ids: [u16; 3],
    pub tex_coord_ids: [u16; 3],
    /// Index into the owning node's `texture_ids`.
    pub texture_id: u16,
    pub two_sided: i32,
    pub smooth_group: i32,
    pub normal: Vec3,
}

impl Face {
    pub fn is_two_sided(&self) -> bool {
        self.two_sided != 0
    }

    /// Unit normal of the triangle, zero for degenerate triangles or out of range indices.
    pub fn compute_normal(vertex_ids: [u16; 3], vertices: &[Vec3]) -> Vec3 {
        let [Some(a), Some(b), Some(c)] = vertex_ids.map(|id| vertices.get(id as usize)) else {
            return Vec3::ZERO;
        };

        (*b - *a).cross(*c - *a).normalize_or_zero()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// milliseconds
    pub time: u32,
    /// As stored, not necessarily normalized.
    pub rotation: Quat,
}

#[derive(Debug, Clone)]
pub struct MeshNode {
    pub name: String,
    /// The name as declared in the file, kept to write it back. Use [`MeshNode::parent`] for lookups.
    pub parent_name: String,
    /// Indices into [`ModelDocument::textures`].
    pub texture_ids: Vec<i32>,
    pub offset: Mat3,
    /// Translation of the static offset matrix (post-offset pivot).
    pub offset_pivot: Vec3,
    /// Translation of the pose matrix for non-root nodes (pre-offset pivot).
    pub position: Vec3,
    /// Radians, used as stored.
    pub rot_angle: f32,
    pub rot_axis: Vec3,
    pub scale: Vec3,
    pub vertices: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub faces: Vec<Face>,
    /// Sorted by increasing time, the last one defines the loop period.
    pub frames: Vec<Frame>,

    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,

    pub pose_matrix: Mat4,
    pub offset_matrix: Mat4,
    /// Object space, see [`BoundsAggregator::update_object_bounds`].
    pub local_bbox: BoundingBox,
    /// World space, see [`BoundsAggregator::update_world_bounds`].
    pub world_bbox: BoundingBox,
}

impl MeshNode {
    /// A fresh node with the defaults the editor uses for new meshes.
    pub fn new(name: &str) -> Self {
        MeshNode {
            name: name.to_string(),
            parent_name: String::new(),
            texture_ids: vec![],
            // The format is authored Z up, this maps it to Y up.
            offset: Mat3::from_cols(Vec3::X, Vec3::Z, Vec3::NEG_Y),
            offset_pivot: Vec3::ZERO,
            position: Vec3::ZERO,
            rot_angle: 0.0,
            rot_axis: Vec3::Y,
            scale: Vec3::ONE,
            vertices: vec![],
            tex_coords: vec![],
            faces: vec![],
            frames: vec![],
            children: vec![],
            parent: None,
            pose_matrix: Mat4::IDENTITY,
            offset_matrix: Mat4::IDENTITY,
            local_bbox: BoundingBox::empty(),
            world_bbox: BoundingBox::empty(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_animated(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Every corner of every face, skipping indices that point outside of `vertices`.
    pub fn face_vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.faces
            .iter()
            .flat_map(|face| face.vertex_ids)
            .filter_map(|id| self.vertices.get(id as usize).copied())
    }
}

/// What the hierarchy builder had to repair or could not resolve.
#[derive(Debug, Clone, Default)]
pub struct HierarchyDiagnostics {
    /// The declared root name, if no node carried it and the first node was used instead.
    pub missing_root: Option<String>,
    /// (declared name, name after disambiguation)
    pub renamed: Vec<(String, String)>,
    /// Nodes whose parent chain never reaches the root. They are kept, but not part of the tree.
    pub orphans: Vec<NodeId>,
}

impl HierarchyDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.missing_root.is_none() && self.renamed.is_empty() && self.orphans.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ModelDocument {
    pub version: u16,
    pub anim_len: u32,
    pub shade_type: ShadeType,
    /// Only persisted for `version >= VERSION_ALPHA`.
    pub alpha: u8,
    pub textures: Vec<String>,

    /// Every parsed node in file order, including orphans.
    pub(crate) nodes: Vec<MeshNode>,
    pub(crate) root: NodeId,
    pub diagnostics: HierarchyDiagnostics,

    /// Object space bounds of all nodes reachable from the root.
    pub bbox: BoundingBox,
    /// World space bounds (after pose, offset and the handedness flip).
    pub world_bbox: BoundingBox,
    pub max_range: f32,
}

impl ModelDocument {
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &MeshNode {
        self.node(self.root)
    }

    pub fn node(&self, id: NodeId) -> &MeshNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut MeshNode {
        &mut self.nodes[id.0]
    }

    /// All nodes in file order, orphans included.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &MeshNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(NodeId)
    }

    /// The nodes reachable from the root, parents before their children.
    pub fn walk_depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            // reversed, so that the first child is visited first.
            stack.extend(self.node(id).children.iter().rev());
        }
        order
    }

    pub fn reachable_count(&self) -> usize {
        self.walk_depth_first().len()
    }

    pub fn has_alpha(&self) -> bool {
        self.version >= VERSION_ALPHA
    }

    pub fn is_animated(&self) -> bool {
        self.walk_depth_first()
            .iter()
            .any(|&id| self.node(id).is_animated())
    }

    /// Runs the full pipeline: object space bounds, pose and offset matrices, world space bounds.
    ///
    /// The clock is sampled exactly once, so all nodes are posed for the same instant. Without
    /// a clock the model is evaluated at time 0.
    pub fn update_matrices(&mut self, clock: Option<&dyn AnimationClock>) {
        let time = PlaybackTime::snapshot(clock);

        BoundsAggregator::update_object_bounds(self);
        TransformEngine::update_pose_matrices(self, time);
        TransformEngine::update_offset_matrices(self);
        BoundsAggregator::update_world_bounds(self, coordinate_systems::rsm_to_render_base());

        debug!(
            "Updated matrices at {}ms: world bounds {} .. {}, max range {}",
            time.millis(),
            self.world_bbox.min,
            self.world_bbox.max,
            self.max_range
        );
    }
}
