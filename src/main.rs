use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use rsmview::io::fs::loader::FsLoader;
use rsmview::rendering::animation::FixedClock;
use rsmview::rendering::common::model::{BoundingBox, ModelDocument, NodeId};
use rsmview::rendering::exporter::obj_exporter::ObjExporter;
use rsmview::rendering::importer::rsm_importer::RsmImporter;
use rsmview::rendering::loader::rsm_loader::{IntegrityPolicy, RsmLoader};

use crate::settings::{CliArgs, Command};

mod settings;

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let args = CliArgs::parse();
    log::trace!("Starting with args: {:?}", args);

    let loader = FsLoader::new(&args.data_dir);

    match &args.command {
        Command::Info { model } => {
            let document = load_model(&loader, model, IntegrityPolicy::Warn)?;
            print_info(&document);
        }
        Command::Bounds { model, time_ms } => {
            let mut document = load_model(&loader, model, IntegrityPolicy::Warn)?;
            document.update_matrices(Some(&FixedClock(*time_ms)));
            print_bounds(&document);
        }
        Command::Resave { input, output, strict } => {
            let policy = if *strict {
                IntegrityPolicy::Abort
            } else {
                IntegrityPolicy::Warn
            };
            let document = load_model(&loader, input, policy)?;
            RsmLoader::save(output, &document)
                .with_context(|| format!("Failed to save {}", output.display()))?;
        }
        Command::ExportObj {
            model,
            output,
            time_ms,
        } => {
            let mut document = load_model(&loader, model, IntegrityPolicy::Warn)?;
            document.update_matrices(Some(&FixedClock(*time_ms)));
            let meshes = RsmImporter::create_meshes(&document);

            let mut wtr = BufWriter::new(
                File::create(output).with_context(|| format!("Failed to create {}", output.display()))?,
            );
            ObjExporter::dump_to_wavefront_obj(&mut wtr, &meshes)?;
            wtr.flush()?;
        }
        Command::List { filter } => {
            let models = loader
                .list_models("rsm", filter)
                .with_context(|| format!("Failed to list {}", loader.data_folder().display()))?;
            for model in models {
                println!("{}", model);
            }
        }
    }

    Ok(())
}

/// Existing files are loaded directly, everything else through the data folder.
fn load_model(loader: &FsLoader, model: &str, policy: IntegrityPolicy) -> Result<ModelDocument, anyhow::Error> {
    let path = Path::new(model);
    let document = if path.is_file() {
        RsmLoader::load_from_path(path, policy)
    } else {
        RsmLoader::load(loader, model, policy)
    };
    document.with_context(|| format!("Failed to load {}", model))
}

fn print_info(document: &ModelDocument) {
    println!(
        "version {}.{}, shade type {:?}, animation length {}ms, alpha {}",
        document.version >> 8,
        document.version & 0xFF,
        document.shade_type,
        document.anim_len,
        document.alpha
    );

    println!("textures:");
    for (i, texture) in document.textures.iter().enumerate() {
        println!("  {:>3} {}", i, texture);
    }

    println!("hierarchy:");
    print_node(document, document.root_id(), 1);

    let diagnostics = &document.diagnostics;
    if let Some(missing) = &diagnostics.missing_root {
        println!("root {} not found, using {}", missing, document.root().name);
    }
    for (declared, renamed) in &diagnostics.renamed {
        println!("duplicate {} renamed to {}", declared, renamed);
    }
    for &orphan in &diagnostics.orphans {
        let node = document.node(orphan);
        println!("orphan {} (parent {})", node.name, node.parent_name);
    }

    print_bounds(document);
}

fn print_node(document: &ModelDocument, id: NodeId, depth: usize) {
    let node = document.node(id);
    println!(
        "{}{} ({} vertices, {} faces, {} frames)",
        "  ".repeat(depth),
        node.name,
        node.vertices.len(),
        node.faces.len(),
        node.frames.len()
    );
    for &child in node.children() {
        print_node(document, child, depth + 1);
    }
}

fn print_bounds(document: &ModelDocument) {
    print_bbox("object", &document.bbox);
    print_bbox("world", &document.world_bbox);
    println!("max range {}", document.max_range);
}

fn print_bbox(label: &str, bbox: &BoundingBox) {
    println!(
        "{} bounds {} .. {} (center {})",
        label, bbox.min, bbox.max, bbox.center
    );
}
