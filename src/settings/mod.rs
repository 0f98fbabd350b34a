use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rsmview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspects, converts and resaves RSM models")]
pub struct CliArgs {
    /// Models that aren't existing files are looked up relative to this folder.
    #[arg(long, env = "RSMVIEW_DATA_DIR", default_value_os_t = default_data_dir())]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

pub fn default_data_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_default()
        .join("data")
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Header, hierarchy, diagnostics and bounds of a model.
    Info { model: String },
    /// The object and world space bounds, optionally at a point of the animation.
    Bounds {
        model: String,
        #[arg(long, default_value_t = 0)]
        time_ms: u64,
    },
    /// Loads and saves a model again, normalizing padding and dropping unsupported content.
    Resave {
        input: String,
        output: PathBuf,
        #[arg(
            long,
            help = "Refuse models with translation keyframes or volume boxes instead of dropping them"
        )]
        strict: bool,
    },
    /// Bakes the posed model into a Wavefront OBJ file.
    ExportObj {
        model: String,
        output: PathBuf,
        #[arg(long, default_value_t = 0)]
        time_ms: u64,
    },
    /// All models below the data folder.
    List {
        #[arg(long, default_value = "")]
        filter: String,
    },
}
