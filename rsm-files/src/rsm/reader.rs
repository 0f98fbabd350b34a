use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::ParserError;
use crate::common::reader::{Parseable, read_counted, read_optional_u32, read_padded_string};
use crate::common::types::{C2Vector, C3Vector};
use crate::rsm::types::{
    FOURCC_RSM_ERROR, MAX_TEXTURE_COUNT, NAME_LENGTH, RsmAsset, RsmFace, RsmFrame, RsmHeader, RsmMesh,
    RsmMeshTransform, ShadeType,
};

pub struct RsmReader {}

impl RsmReader {
    pub fn parse_asset<R: Read>(rdr: &mut R) -> Result<RsmAsset, ParserError> {
        let header = RsmReader::parse_header(rdr)?;

        let texture_count = rdr.read_u32::<LittleEndian>()?;
        if texture_count > MAX_TEXTURE_COUNT {
            return Err(ParserError::TextureCountExceeded {
                count: texture_count,
                max: MAX_TEXTURE_COUNT,
            });
        }

        let mut textures = Vec::with_capacity(texture_count as usize);
        for _ in 0..texture_count {
            textures.push(read_padded_string(rdr, NAME_LENGTH)?);
        }

        let main_node = read_padded_string(rdr, NAME_LENGTH)?;
        let mesh_count = rdr.read_u32::<LittleEndian>()?;
        let mut meshes = Vec::with_capacity((mesh_count as usize).min(256));
        for _ in 0..mesh_count {
            meshes.push(RsmReader::parse_mesh(rdr, &header)?);
        }

        // Older exporters sometimes stop right after the meshes.
        let position_keyframe_count = read_optional_u32(rdr)?.unwrap_or(0);
        let volume_box_count = read_optional_u32(rdr)?.unwrap_or(0);

        Ok(RsmAsset {
            header,
            textures,
            main_node,
            meshes,
            position_keyframe_count,
            volume_box_count,
        })
    }

    fn parse_header<R: Read>(rdr: &mut R) -> Result<RsmHeader, ParserError> {
        let magic = rdr.read_u32::<LittleEndian>()?;
        // Only the sentinel is rejected, anything else is tried to be read as GRSM.
        if magic == FOURCC_RSM_ERROR {
            return Err(ParserError::InvalidMagicValue { magic });
        }

        let version = rdr.read_u16::<LittleEndian>()?;
        let anim_len = rdr.read_u32::<LittleEndian>()?;
        let shade_type = ShadeType::from(rdr.read_u32::<LittleEndian>()?);

        let mut header = RsmHeader {
            magic,
            version,
            anim_len,
            shade_type,
            alpha: 0,
            reserved: [0; 16],
        };

        if header.has_alpha() {
            header.alpha = rdr.read_u8()?;
        }

        rdr.read_exact(&mut header.reserved)?;
        if header.reserved.iter().any(|&b| b != 0) {
            return Err(ParserError::ReservedBytesViolation {
                bytes: header.reserved,
            });
        }

        Ok(header)
    }

    fn parse_mesh<R: Read>(rdr: &mut R, header: &RsmHeader) -> Result<RsmMesh, ParserError> {
        let name = read_padded_string(rdr, NAME_LENGTH)?;
        let parent_name = read_padded_string(rdr, NAME_LENGTH)?;
        let texture_ids = read_counted::<i32, _>(rdr)?;
        let transform = RsmMeshTransform::parse(rdr)?;
        let vertices = read_counted::<C3Vector, _>(rdr)?;

        let tex_coord_count = rdr.read_u32::<LittleEndian>()?;
        let mut tex_coords = Vec::with_capacity((tex_coord_count as usize).min(4096));
        let mut nonzero_tex_coord_padding = 0;
        for _ in 0..tex_coord_count {
            if header.has_texcoord_padding() && rdr.read_f32::<LittleEndian>()? != 0.0 {
                nonzero_tex_coord_padding += 1;
            }
            tex_coords.push(C2Vector::parse(rdr)?);
        }

        let faces = read_counted::<RsmFace, _>(rdr)?;
        let frames = read_counted::<RsmFrame, _>(rdr)?;

        Ok(RsmMesh {
            name,
            parent_name,
            texture_ids,
            transform,
            vertices,
            tex_coords,
            nonzero_tex_coord_padding,
            faces,
            frames,
        })
    }
}
