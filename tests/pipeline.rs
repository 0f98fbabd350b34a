use std::f32::consts::FRAC_PI_2;
use std::io::Cursor;

use glam::{Quat, Vec3};
use rsm_files::common::types::{C2Vector, C33Matrix, C3Vector, C4Quaternion};
use rsm_files::rsm::reader::RsmReader;
use rsm_files::rsm::types::{
    FOURCC_RSM, RsmAsset, RsmFace, RsmFrame, RsmHeader, RsmMesh, RsmMeshTransform, ShadeType,
};
use rsm_files::rsm::writer::RsmWriter;
use rsmview::rendering::animation::{AnimationSampler, FixedClock, PlaybackTime};
use rsmview::rendering::loader::rsm_loader::{IntegrityPolicy, RsmLoader};

fn c3(x: f32, y: f32, z: f32) -> C3Vector {
    C3Vector { x, y, z }
}

fn quat(q: Quat) -> C4Quaternion {
    C4Quaternion {
        x: q.x,
        y: q.y,
        z: q.z,
        w: q.w,
    }
}

fn mesh(name: &str, parent: &str, position: C3Vector, frames: Vec<RsmFrame>) -> RsmMesh {
    RsmMesh {
        name: name.to_string(),
        parent_name: parent.to_string(),
        texture_ids: vec![0, 1],
        transform: RsmMeshTransform {
            offset: C33Matrix::from_cols_array(&[1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 1.0, 0.0]),
            offset_pivot: c3(0.5, 0.0, 0.0),
            position,
            rot_angle: 0.3,
            rot_axis: c3(0.0, 0.0, 2.0),
            scale: c3(1.0, 2.0, 1.0),
        },
        vertices: vec![
            c3(-1.0, -1.0, 0.0),
            c3(1.0, -1.0, 0.0),
            c3(1.0, 1.0, 3.0),
            c3(-1.0, 1.0, 3.0),
        ],
        nonzero_tex_coord_padding: 0,
        tex_coords: vec![
            C2Vector { x: 0.0, y: 0.0 },
            C2Vector { x: 1.0, y: 0.0 },
            C2Vector { x: 1.0, y: 1.0 },
        ],
        faces: vec![
            RsmFace {
                vertex_ids: [0, 1, 2],
                tex_coord_ids: [0, 1, 2],
                texture_id: 0,
                padding: 0,
                two_sided: 0,
                smooth_group: 1,
            },
            RsmFace {
                vertex_ids: [0, 2, 3],
                tex_coord_ids: [0, 2, 1],
                texture_id: 1,
                padding: 0,
                two_sided: 1,
                smooth_group: 1,
            },
        ],
        frames,
    }
}

fn windmill() -> Vec<u8> {
    let spin = vec![
        RsmFrame {
            time: 0,
            rotation: quat(Quat::IDENTITY),
        },
        RsmFrame {
            time: 500,
            rotation: quat(Quat::from_rotation_z(FRAC_PI_2)),
        },
        RsmFrame {
            time: 1000,
            rotation: quat(Quat::from_rotation_z(-FRAC_PI_2)),
        },
    ];

    let asset = RsmAsset {
        header: RsmHeader {
            magic: FOURCC_RSM,
            version: 0x0104,
            anim_len: 1000,
            shade_type: ShadeType::Smooth,
            alpha: 0x80,
            reserved: [0; 16],
        },
        textures: vec!["windmill\\wood.bmp".to_string(), "windmill\\sail.bmp".to_string()],
        main_node: "Tower".to_string(),
        meshes: vec![
            mesh("Tower", "", c3(0.0, 0.0, 0.0), vec![]),
            mesh("Sail", "Tower", c3(0.0, 5.0, 1.0), spin),
            mesh("Sail", "Tower", c3(0.0, 5.0, -1.0), vec![]),
            mesh("Door", "Tower", c3(1.0, 0.0, 1.0), vec![]),
        ],
        position_keyframe_count: 0,
        volume_box_count: 0,
    };

    let mut data = Vec::new();
    RsmWriter::write_asset(&mut data, &asset).unwrap();
    data
}

#[test]
pub fn resaving_is_stable() -> Result<(), anyhow::Error> {
    let data = windmill();
    let document = RsmLoader::load_from_bytes(&data, IntegrityPolicy::Abort)?;

    let mut first = Vec::new();
    RsmLoader::write(&mut first, &document)?;

    let reloaded = RsmLoader::load_from_bytes(&first, IntegrityPolicy::Abort)?;
    let mut second = Vec::new();
    RsmLoader::write(&mut second, &reloaded)?;

    assert_eq!(first, second);
    // the duplicate is written back under its new name.
    let asset = RsmReader::parse_asset(&mut Cursor::new(&first))?;
    assert_eq!(asset.meshes[2].name, "Sail(duplicate)");
    assert_eq!(asset.header.alpha, 0x80);
    Ok(())
}

#[test]
pub fn long_duplicate_names_can_be_saved() -> Result<(), anyhow::Error> {
    let long = "a".repeat(35);
    let asset = RsmAsset {
        header: RsmHeader {
            magic: FOURCC_RSM,
            version: 0x0103,
            anim_len: 0,
            shade_type: ShadeType::Flat,
            alpha: 0,
            reserved: [0; 16],
        },
        textures: vec!["wood.bmp".to_string(), "sail.bmp".to_string()],
        main_node: "Root".to_string(),
        meshes: vec![
            mesh("Root", "", c3(0.0, 0.0, 0.0), vec![]),
            mesh(&long, "Root", c3(1.0, 0.0, 0.0), vec![]),
            mesh(&long, "Root", c3(-1.0, 0.0, 0.0), vec![]),
        ],
        position_keyframe_count: 0,
        volume_box_count: 0,
    };
    let mut data = Vec::new();
    RsmWriter::write_asset(&mut data, &asset)?;

    let document = RsmLoader::load_from_bytes(&data, IntegrityPolicy::Abort)?;
    let mut first = Vec::new();
    RsmLoader::write(&mut first, &document)?;

    let reloaded = RsmLoader::load_from_bytes(&first, IntegrityPolicy::Abort)?;
    let mut second = Vec::new();
    RsmLoader::write(&mut second, &reloaded)?;
    assert_eq!(first, second);

    let names = RsmReader::parse_asset(&mut Cursor::new(&second))?
        .meshes
        .into_iter()
        .map(|mesh| mesh.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Root".to_string(), long, format!("{}(duplicate)", "a".repeat(29))]);
    Ok(())
}

#[test]
pub fn world_bounds_contain_every_node() -> Result<(), anyhow::Error> {
    let mut document = RsmLoader::load_from_bytes(&windmill(), IntegrityPolicy::Abort)?;

    for time in [0, 250, 500, 750, 1000, 1337] {
        document.update_matrices(Some(&FixedClock(time)));
        for id in document.walk_depth_first() {
            assert!(document.world_bbox.contains(&document.node(id).world_bbox));
        }

        let extent = document.world_bbox.max.abs().max(document.world_bbox.min.abs());
        assert_eq!(document.max_range, extent.max_element());
    }
    Ok(())
}

#[test]
pub fn children_point_at_their_parent() -> Result<(), anyhow::Error> {
    let document = RsmLoader::load_from_bytes(&windmill(), IntegrityPolicy::Abort)?;

    assert_eq!(document.reachable_count(), 4);
    for id in document.walk_depth_first() {
        let node = document.node(id);
        if let Some(parent) = node.parent() {
            assert_eq!(node.parent_name, document.node(parent).name);
            assert!(document.node(parent).children().contains(&id));
        }
    }
    Ok(())
}

#[test]
pub fn animation_loops() -> Result<(), anyhow::Error> {
    let document = RsmLoader::load_from_bytes(&windmill(), IntegrityPolicy::Abort)?;
    let sail = document.node(document.find("Sail").unwrap());

    for t in [0, 120, 500, 730, 999] {
        let now = AnimationSampler::sample(&sail.frames, PlaybackTime::from_millis(t));
        let later = AnimationSampler::sample(&sail.frames, PlaybackTime::from_millis(t + 1000));
        assert!(now.abs_diff_eq(later, 1e-6));
    }

    let halfway = AnimationSampler::sample(&sail.frames, PlaybackTime::from_millis(500));
    assert!(halfway.abs_diff_eq(Quat::from_rotation_z(FRAC_PI_2), 1e-6));
    Ok(())
}

#[test]
pub fn the_same_instant_gives_the_same_pose() -> Result<(), anyhow::Error> {
    let mut document = RsmLoader::load_from_bytes(&windmill(), IntegrityPolicy::Abort)?;

    document.update_matrices(Some(&FixedClock(1250)));
    let first = document.world_bbox;
    document.update_matrices(Some(&FixedClock(250)));
    let second = document.world_bbox;

    assert!(first.min.abs_diff_eq(second.min, 1e-4));
    assert!(first.max.abs_diff_eq(second.max, 1e-4));
    assert_ne!(document.world_bbox.size(), Vec3::ZERO);
    Ok(())
}
