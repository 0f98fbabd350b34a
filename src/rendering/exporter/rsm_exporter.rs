use itertools::Itertools;
use rsm_files::common::types::{C2Vector, C33Matrix, C3Vector, C4Quaternion};
use rsm_files::rsm::types::{FOURCC_RSM, RsmAsset, RsmFace, RsmFrame, RsmHeader, RsmMesh, RsmMeshTransform};

use crate::rendering::common::model::{MeshNode, ModelDocument};

pub enum RsmExporter {}

impl RsmExporter {
    /// The inverse of [`crate::rendering::importer::rsm_importer::RsmImporter::create_document`].
    ///
    /// Only nodes reachable from the root are exported (parents before children) and the
    /// root's current name becomes the main node name. Computed matrices are not involved.
    pub fn create_asset(document: &ModelDocument) -> RsmAsset {
        let meshes = document
            .walk_depth_first()
            .into_iter()
            .map(|id| RsmExporter::create_mesh(document.node(id)))
            .collect_vec();

        RsmAsset {
            header: RsmHeader {
                magic: FOURCC_RSM,
                version: document.version,
                anim_len: document.anim_len,
                shade_type: document.shade_type,
                alpha: if document.has_alpha() { document.alpha } else { 0 },
                reserved: [0; 16],
            },
            textures: document.textures.clone(),
            main_node: document.root().name.clone(),
            meshes,
            position_keyframe_count: 0,
            volume_box_count: 0,
        }
    }

    fn create_mesh(node: &MeshNode) -> RsmMesh {
        RsmMesh {
            name: node.name.clone(),
            parent_name: node.parent_name.clone(),
            texture_ids: node.texture_ids.clone(),
            transform: RsmMeshTransform {
                offset: C33Matrix::from_cols_array(&node.offset.to_cols_array()),
                offset_pivot: c3(node.offset_pivot),
                position: c3(node.position),
                rot_angle: node.rot_angle,
                rot_axis: c3(node.rot_axis),
                scale: c3(node.scale),
            },
            vertices: node.vertices.iter().map(|&v| c3(v)).collect_vec(),
            tex_coords: node
                .tex_coords
                .iter()
                .map(|uv| C2Vector { x: uv.x, y: uv.y })
                .collect_vec(),
            nonzero_tex_coord_padding: 0,
            faces: node
                .faces
                .iter()
                .map(|face| RsmFace {
                    vertex_ids: face.vertex_ids,
                    tex_coord_ids: face.tex_coord_ids,
                    texture_id: face.texture_id,
                    padding: 0,
                    two_sided: face.two_sided,
                    smooth_group: face.smooth_group,
                })
                .collect_vec(),
            frames: node
                .frames
                .iter()
                .map(|frame| RsmFrame {
                    time: frame.time,
                    rotation: C4Quaternion {
                        x: frame.rotation.x,
                        y: frame.rotation.y,
                        z: frame.rotation.z,
                        w: frame.rotation.w,
                    },
                })
                .collect_vec(),
        }
    }
}

#[inline]
fn c3(v: glam::Vec3) -> C3Vector {
    C3Vector { x: v.x, y: v.y, z: v.z }
}
