use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::ParserError;
use crate::common::writer::{Writable, write_count, write_counted, write_padded_string};
use crate::rsm::types::{FOURCC_RSM, NAME_LENGTH, RsmAsset, RsmFace, RsmHeader, RsmMesh};

pub struct RsmWriter {}

impl RsmWriter {
    /// Writes `asset` in the layout [`crate::rsm::reader::RsmReader`] reads.
    ///
    /// The mesh count is taken from `asset.meshes`. Translation keyframes and volume boxes
    /// can't be represented and are always written as empty sections, regardless of the
    /// counts the asset has been read with.
    pub fn write_asset<W: Write>(wtr: &mut W, asset: &RsmAsset) -> Result<(), ParserError> {
        RsmWriter::write_header(wtr, &asset.header)?;

        write_count(wtr, asset.textures.len())?;
        for texture in &asset.textures {
            write_padded_string(wtr, texture, NAME_LENGTH)?;
        }

        write_padded_string(wtr, &asset.main_node, NAME_LENGTH)?;
        write_count(wtr, asset.meshes.len())?;
        for mesh in &asset.meshes {
            RsmWriter::write_mesh(wtr, mesh, &asset.header)?;
        }

        wtr.write_u32::<LittleEndian>(0)?; // translation keyframes
        wtr.write_u32::<LittleEndian>(0)?; // volume boxes
        Ok(())
    }

    fn write_header<W: Write>(wtr: &mut W, header: &RsmHeader) -> Result<(), ParserError> {
        wtr.write_u32::<LittleEndian>(FOURCC_RSM)?;
        wtr.write_u16::<LittleEndian>(header.version)?;
        wtr.write_u32::<LittleEndian>(header.anim_len)?;
        wtr.write_u32::<LittleEndian>(header.shade_type.into())?;
        if header.has_alpha() {
            wtr.write_u8(header.alpha)?;
        }
        wtr.write_all(&header.reserved)?;
        Ok(())
    }

    fn write_mesh<W: Write>(wtr: &mut W, mesh: &RsmMesh, header: &RsmHeader) -> Result<(), ParserError> {
        write_padded_string(wtr, &mesh.name, NAME_LENGTH)?;
        write_padded_string(wtr, &mesh.parent_name, NAME_LENGTH)?;
        write_counted(wtr, &mesh.texture_ids)?;
        mesh.transform.write(wtr)?;
        write_counted(wtr, &mesh.vertices)?;

        write_count(wtr, mesh.tex_coords.len())?;
        for tex_coord in &mesh.tex_coords {
            if header.has_texcoord_padding() {
                wtr.write_f32::<LittleEndian>(0.0)?;
            }
            tex_coord.write(wtr)?;
        }

        write_counted(wtr, &mesh.faces)?;
        write_counted(wtr, &mesh.frames)?;
        Ok(())
    }
}

impl Writable for RsmFace {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), ParserError> {
        for id in self.vertex_ids.iter().chain(&self.tex_coord_ids) {
            wtr.write_u16::<LittleEndian>(*id)?;
        }
        wtr.write_u16::<LittleEndian>(self.texture_id)?;
        wtr.write_u16::<LittleEndian>(0)?; // padding
        wtr.write_i32::<LittleEndian>(self.two_sided)?;
        wtr.write_i32::<LittleEndian>(self.smooth_group)?;
        Ok(())
    }
}
