use std::io::Read;

use num_enum::{FromPrimitive, IntoPrimitive};
use rsm_files_derive_parseable::{Emit, Parse};

use crate::ParserError;
use crate::common::reader::Parseable;
use crate::common::types::{C2Vector, C33Matrix, C3Vector, C4Quaternion};

pub const FOURCC_RSM: u32 = u32::from_le_bytes(*b"GRSM");
/// Written by broken exporters instead of `GRSM`, such files are rejected.
pub const FOURCC_RSM_ERROR: u32 = u32::from_le_bytes(*b"GRGM");

/// Files starting at this version carry the alpha byte in the header.
pub const VERSION_ALPHA: u16 = 0x0104;
/// Files starting at this version carry an (always zero) third texture coordinate.
pub const VERSION_TEXCOORD_PADDING: u16 = 0x0102;

pub const NAME_LENGTH: usize = 40;
pub const MAX_TEXTURE_COUNT: u32 = 100;

#[derive(FromPrimitive, IntoPrimitive, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum ShadeType {
    NoShading = 0,
    Flat = 1,
    Smooth = 2,
    #[num_enum(catch_all)]
    Unknown(u32),
}

#[derive(Debug, Clone)]
pub struct RsmHeader {
    pub magic: u32,
    pub version: u16,
    pub anim_len: u32,
    pub shade_type: ShadeType,
    /// Only stored for `version >= VERSION_ALPHA`, 0 otherwise.
    pub alpha: u8,
    pub reserved: [u8; 16],
}

impl RsmHeader {
    pub fn has_alpha(&self) -> bool {
        self.version >= VERSION_ALPHA
    }

    pub fn has_texcoord_padding(&self) -> bool {
        self.version >= VERSION_TEXCOORD_PADDING
    }
}

#[derive(Debug, Clone)]
pub struct RsmAsset {
    pub header: RsmHeader,
    pub textures: Vec<String>,
    pub main_node: String,
    /// Flat, in file order. Parent relations are only expressed by name.
    pub meshes: Vec<RsmMesh>,
    /// Both counts are read for validation only, the content behind them is never kept.
    pub position_keyframe_count: u32,
    pub volume_box_count: u32,
}

impl RsmAsset {
    /// Checks for content that would silently get lost when saving this asset again.
    pub fn check_integrity(&self) -> Result<(), ParserError> {
        if self.position_keyframe_count != 0 {
            return Err(ParserError::IntegrityViolation {
                reason: "translation keyframes are not supported",
                count: self.position_keyframe_count,
            });
        }

        if self.volume_box_count != 0 {
            return Err(ParserError::IntegrityViolation {
                reason: "volume boxes are not supported",
                count: self.volume_box_count,
            });
        }

        Ok(())
    }
}

/// The static placement of a mesh, as it is laid out in the file.
#[derive(Debug, Copy, Clone, Parse, Emit)]
pub struct RsmMeshTransform {
    pub offset: C33Matrix,
    /// Applied after the offset matrix, part of the static offset transform.
    pub offset_pivot: C3Vector,
    /// Applied before the rotation, part of the (animated) pose transform.
    pub position: C3Vector,
    /// In radians, applied as stored.
    pub rot_angle: f32,
    pub rot_axis: C3Vector,
    pub scale: C3Vector,
}

#[derive(Debug, Clone)]
pub struct RsmMesh {
    pub name: String,
    pub parent_name: String,
    pub texture_ids: Vec<i32>,
    pub transform: RsmMeshTransform,
    pub vertices: Vec<C3Vector>,
    pub tex_coords: Vec<C2Vector>,
    /// How many texture coordinates had a non-zero (unused) third component. It is
    /// always written as 0.
    pub nonzero_tex_coord_padding: u32,
    pub faces: Vec<RsmFace>,
    pub frames: Vec<RsmFrame>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RsmFace {
    pub vertex_ids: [u16; 3],
    pub tex_coord_ids: [u16; 3],
    pub texture_id: u16,
    /// Junk in a lot of files (0, -1 and others), never written back.
    pub padding: u16,
    pub two_sided: i32,
    pub smooth_group: i32,
}

impl Parseable<RsmFace> for RsmFace {
    fn parse<R: Read>(rdr: &mut R) -> Result<RsmFace, ParserError> {
        Ok(RsmFace {
            vertex_ids: [u16::parse(rdr)?, u16::parse(rdr)?, u16::parse(rdr)?],
            tex_coord_ids: [u16::parse(rdr)?, u16::parse(rdr)?, u16::parse(rdr)?],
            texture_id: u16::parse(rdr)?,
            padding: u16::parse(rdr)?,
            two_sided: i32::parse(rdr)?,
            smooth_group: i32::parse(rdr)?,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Parse, Emit)]
pub struct RsmFrame {
    /// milliseconds
    pub time: u32,
    pub rotation: C4Quaternion,
}
