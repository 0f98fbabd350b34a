use std::collections::HashMap;

use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
use itertools::Itertools;
use log::{trace, warn};
use rsm_files::ParserError;
use rsm_files::common::types::{C2Vector, C3Vector};
use rsm_files::rsm::types::{NAME_LENGTH, RsmAsset, RsmFace, RsmMesh};

use crate::rendering::bounds::BoundsAggregator;
use crate::rendering::common::coordinate_systems;
use crate::rendering::common::model::{
    BoundingBox, Face, Frame, HierarchyDiagnostics, MeshNode, ModelDocument, NodeId,
};
use crate::rendering::common::types::{Mesh, VertexBuffers};

pub const DUPLICATE_SUFFIX: &str = "(duplicate)";

pub enum RsmImporter {}

impl RsmImporter {
    /// Builds the node tree of `asset`. Matrices and bounds are left at their defaults, see
    /// [`ModelDocument::update_matrices`].
    pub fn create_document(asset: &RsmAsset) -> Result<ModelDocument, ParserError> {
        if asset.meshes.is_empty() {
            return Err(ParserError::FormatError {
                reason: "The model does not contain a single mesh",
            });
        }

        let mut diagnostics = HierarchyDiagnostics::default();
        let mut names: HashMap<String, NodeId> = HashMap::with_capacity(asset.meshes.len());
        let mut nodes = Vec::with_capacity(asset.meshes.len());

        for mesh in &asset.meshes {
            if mesh.nonzero_tex_coord_padding > 0 {
                warn!(
                    "Mesh {} has {} texture coordinates with non-zero padding, it is reset on save",
                    mesh.name, mesh.nonzero_tex_coord_padding
                );
            }

            let mut node = RsmImporter::create_node(mesh);
            if names.contains_key(&node.name) {
                node.name = RsmImporter::unique_name(&mesh.name, |name| names.contains_key(name));
                warn!("Duplicate mesh name {}, renamed to {}", mesh.name, node.name);
                diagnostics
                    .renamed
                    .push((mesh.name.clone(), node.name.clone()));
            }

            names.insert(node.name.clone(), NodeId(nodes.len()));
            nodes.push(node);
        }

        let root = match names.get(&asset.main_node) {
            Some(&id) => id,
            None => {
                warn!(
                    "Could not locate root mesh {}, using {} instead",
                    asset.main_node, nodes[0].name
                );
                diagnostics.missing_root = Some(asset.main_node.clone());
                NodeId(0)
            }
        };

        let mut attached = vec![false; nodes.len()];
        attached[root.0] = true;
        RsmImporter::attach_children(&mut nodes, root, &mut attached);

        diagnostics.orphans = attached
            .iter()
            .enumerate()
            .filter(|(_, attached)| !**attached)
            .map(|(i, _)| NodeId(i))
            .collect_vec();
        for orphan in &diagnostics.orphans {
            let node = &nodes[orphan.0];
            warn!(
                "Mesh {} is not connected to the root (parent: {:?})",
                node.name, node.parent_name
            );
        }

        trace!(
            "Built hierarchy with {} of {} meshes below {}",
            nodes.len() - diagnostics.orphans.len(),
            nodes.len(),
            nodes[root.0].name
        );

        Ok(ModelDocument {
            version: asset.header.version,
            anim_len: asset.header.anim_len,
            shade_type: asset.header.shade_type,
            alpha: asset.header.alpha,
            textures: asset.textures.clone(),
            nodes,
            root,
            diagnostics,
            bbox: BoundingBox::empty(),
            world_bbox: BoundingBox::empty(),
            max_range: 0.0,
        })
    }

    /// `name` with the duplicate suffix appended (repeatedly, if that is taken as well). The
    /// name is shortened so that the result still fits the name field of the file.
    fn unique_name(name: &str, is_taken: impl Fn(&str) -> bool) -> String {
        let mut repeat = 1;
        loop {
            let suffix = if DUPLICATE_SUFFIX.len() * repeat <= NAME_LENGTH {
                DUPLICATE_SUFFIX.repeat(repeat)
            } else {
                format!("(duplicate {})", repeat)
            };

            let candidate = name
                .chars()
                .take(NAME_LENGTH - suffix.len())
                .chain(suffix.chars())
                .collect::<String>();
            if !is_taken(&candidate) {
                return candidate;
            }
            repeat += 1;
        }
    }

    /// Every node declaring `parent` (by name) as its parent becomes its child, in file order.
    /// `attached` guards against cycles: a node is claimed at most once.
    fn attach_children(nodes: &mut [MeshNode], parent: NodeId, attached: &mut [bool]) {
        let children = (0..nodes.len())
            .filter(|&i| !attached[i] && nodes[i].parent_name == nodes[parent.0].name)
            .map(NodeId)
            .collect_vec();

        for child in &children {
            attached[child.0] = true;
            nodes[child.0].parent = Some(parent);
        }
        nodes[parent.0].children = children.clone();

        for child in children {
            RsmImporter::attach_children(nodes, child, attached);
        }
    }

    fn create_node(mesh: &RsmMesh) -> MeshNode {
        let vertices = mesh.vertices.iter().map(vec3).collect_vec();
        let faces = mesh
            .faces
            .iter()
            .map(|face| RsmImporter::create_face(face, &vertices))
            .collect_vec();
        let transform = &mesh.transform;

        let mut node = MeshNode::new(&mesh.name);
        node.parent_name = mesh.parent_name.clone();
        node.texture_ids = mesh.texture_ids.clone();
        node.offset = Mat3::from_cols_array(&transform.offset.to_cols_array());
        node.offset_pivot = vec3(&transform.offset_pivot);
        node.position = vec3(&transform.position);
        node.rot_angle = transform.rot_angle;
        node.rot_axis = vec3(&transform.rot_axis);
        node.scale = vec3(&transform.scale);
        node.tex_coords = mesh.tex_coords.iter().map(vec2).collect_vec();
        node.frames = mesh
            .frames
            .iter()
            .map(|frame| Frame {
                time: frame.time,
                rotation: Quat::from_xyzw(
                    frame.rotation.x,
                    frame.rotation.y,
                    frame.rotation.z,
                    frame.rotation.w,
                ),
            })
            .collect_vec();
        node.vertices = vertices;
        node.faces = faces;
        node
    }

    fn create_face(face: &RsmFace, vertices: &[Vec3]) -> Face {
        Face {
            vertex_ids: face.vertex_ids,
            tex_coord_ids: face.tex_coord_ids,
            texture_id: face.texture_id,
            two_sided: face.two_sided,
            smooth_group: face.smooth_group,
            normal: Face::compute_normal(face.vertex_ids, vertices),
        }
    }

    /// Bakes every node reachable from the root into a flat-shaded mesh in render space,
    /// using the current matrices (see [`BoundsAggregator::world_matrices`]).
    pub fn create_meshes(document: &ModelDocument) -> Vec<Mesh> {
        BoundsAggregator::world_matrices(document, coordinate_systems::rsm_to_render_base())
            .into_iter()
            .map(|(id, matrix)| RsmImporter::create_mesh(document, id, matrix))
            .collect_vec()
    }

    fn create_mesh(document: &ModelDocument, id: NodeId, matrix: Mat4) -> Mesh {
        let node = document.node(id);
        let normal_matrix = Mat3::from_mat4(matrix).inverse().transpose();
        // The handedness flip mirrors the geometry, so the winding has to be mirrored as well.
        let mirrored = matrix.determinant() < 0.0;

        let mut buffers = VertexBuffers::default();
        let mut indices = Vec::<u32>::with_capacity(node.faces.len() * 3);
        let mut textures = Vec::with_capacity(node.faces.len());

        for face in &node.faces {
            let Some(positions) = face
                .vertex_ids
                .iter()
                .map(|&i| node.vertices.get(i as usize).copied())
                .collect::<Option<Vec<Vec3>>>()
            else {
                warn!("Skipping face with out of range vertex ids in {}", node.name);
                continue;
            };

            let normal = (normal_matrix * face.normal).normalize_or_zero();
            let base = buffers.position_buffer.len() as u32;
            for (corner, position) in positions.into_iter().enumerate() {
                let uv = node
                    .tex_coords
                    .get(face.tex_coord_ids[corner] as usize)
                    .copied()
                    .unwrap_or(Vec2::ZERO);
                buffers
                    .position_buffer
                    .push(matrix.transform_point3(position));
                buffers.normals_buffer.push(normal);
                buffers.texcoord_buffer_0.push(uv);
            }

            if mirrored {
                indices.extend([base, base + 2, base + 1]);
            } else {
                indices.extend([base, base + 1, base + 2]);
            }
            textures.push(RsmImporter::resolve_texture(document, node, face));
        }

        Mesh {
            name: node.name.clone(),
            vertex_buffers: buffers,
            index_buffer: indices,
            triangle_textures: textures,
        }
    }

    fn resolve_texture(document: &ModelDocument, node: &MeshNode, face: &Face) -> Option<String> {
        let texture = *node.texture_ids.get(face.texture_id as usize)?;
        let texture = usize::try_from(texture).ok()?;
        document.textures.get(texture).cloned()
    }
}

#[inline]
fn vec3(v: &C3Vector) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
fn vec2(v: &C2Vector) -> Vec2 {
    Vec2::new(v.x, v.y)
}
