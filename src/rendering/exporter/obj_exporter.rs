use std::io::Write;

use crate::rendering::common::types::Mesh;

pub enum ObjExporter {}

impl ObjExporter {
    /// Writes all meshes as objects of one Wavefront OBJ file. Texture changes are emitted as
    /// `usemtl` statements named after the texture file, no .mtl library is written.
    pub fn dump_to_wavefront_obj<W: Write>(w: &mut W, meshes: &[Mesh]) -> std::io::Result<()> {
        // indexes are 1-based and global over the whole file.
        let mut index_base = 1u32;

        for mesh in meshes {
            writeln!(w, "o {}", mesh.name)?;

            let buffers = &mesh.vertex_buffers;
            for v in &buffers.position_buffer {
                writeln!(w, "v {} {} {}", v.x, v.y, v.z)?;
            }
            for n in &buffers.normals_buffer {
                writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
            }
            for uv in &buffers.texcoord_buffer_0 {
                writeln!(w, "vt {} {}", uv.x, uv.y)?;
            }

            let mut current_texture: Option<&str> = None;
            for (triangle, i) in mesh.index_buffer.chunks_exact(3).enumerate() {
                let texture = mesh
                    .triangle_textures
                    .get(triangle)
                    .and_then(|texture| texture.as_deref());
                if let Some(name) = texture
                    && texture != current_texture
                {
                    writeln!(w, "usemtl {}", name)?;
                    current_texture = texture;
                }

                // the same index is used for vert, normal and texcoord.
                let [a, b, c] = [i[0], i[1], i[2]].map(|i| i + index_base);
                writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
            }

            index_base += buffers.position_buffer.len() as u32;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use crate::rendering::common::types::{Mesh, VertexBuffers};
    use crate::rendering::exporter::obj_exporter::ObjExporter;

    fn triangle(name: &str, texture: Option<&str>) -> Mesh {
        Mesh {
            name: name.to_string(),
            vertex_buffers: VertexBuffers {
                position_buffer: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
                normals_buffer: vec![Vec3::Z; 3],
                texcoord_buffer_0: vec![Vec2::ZERO, Vec2::X, Vec2::Y],
            },
            index_buffer: vec![0, 1, 2],
            triangle_textures: vec![texture.map(str::to_string)],
        }
    }

    #[test]
    pub fn indices_continue_across_objects() -> Result<(), anyhow::Error> {
        let mut out = Vec::new();
        ObjExporter::dump_to_wavefront_obj(
            &mut out,
            &[triangle("first", Some("wall.bmp")), triangle("second", None)],
        )?;
        let obj = String::from_utf8(out)?;

        assert!(obj.starts_with("o first\n"));
        assert!(obj.contains("usemtl wall.bmp\nf 1/1/1 2/2/2 3/3/3\n"));
        assert!(obj.contains("o second\n"));
        assert!(obj.ends_with("f 4/4/4 5/5/5 6/6/6\n"));
        assert_eq!(obj.matches("usemtl").count(), 1);
        Ok(())
    }
}
