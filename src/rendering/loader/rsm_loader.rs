use std::fs;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use log::{trace, warn};
use rsm_files::ParserError;
use rsm_files::rsm::reader::RsmReader;
use rsm_files::rsm::types::FOURCC_RSM;
use rsm_files::rsm::writer::RsmWriter;

use crate::io::common::loader::RawAssetLoader;
use crate::rendering::common::model::ModelDocument;
use crate::rendering::exporter::rsm_exporter::RsmExporter;
use crate::rendering::importer::rsm_importer::RsmImporter;

/// What to do with files containing translation keyframes or volume boxes, both of which
/// are not kept and therefore missing after saving.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum IntegrityPolicy {
    #[default]
    Abort,
    Warn,
}

pub enum RsmLoader {}

impl RsmLoader {
    /// Parses, builds the hierarchy and evaluates all matrices at time 0.
    pub fn load_from_bytes(data: &[u8], policy: IntegrityPolicy) -> Result<ModelDocument, ParserError> {
        let asset = RsmReader::parse_asset(&mut Cursor::new(data))?;

        if asset.header.magic != FOURCC_RSM {
            warn!(
                "Unexpected magic {:#010x}, loading anyway",
                asset.header.magic
            );
        }

        if let Err(error) = asset.check_integrity() {
            match policy {
                IntegrityPolicy::Abort => return Err(error),
                IntegrityPolicy::Warn => warn!("{}, it will be lost when saving", error),
            }
        }

        let mut document = RsmImporter::create_document(&asset)?;
        document.update_matrices(None);
        Ok(document)
    }

    pub fn load<L: RawAssetLoader>(
        loader: &L,
        name: &str,
        policy: IntegrityPolicy,
    ) -> Result<ModelDocument, ParserError> {
        trace!("Loading model {}", name);
        let data = loader.load_raw_owned(name)?;
        RsmLoader::load_from_bytes(&data, policy)
    }

    pub fn load_from_path(path: &Path, policy: IntegrityPolicy) -> Result<ModelDocument, ParserError> {
        trace!("Loading model {}", path.display());
        RsmLoader::load_from_bytes(&fs::read(path)?, policy)
    }

    pub fn write<W: Write>(wtr: &mut W, document: &ModelDocument) -> Result<(), ParserError> {
        RsmWriter::write_asset(wtr, &RsmExporter::create_asset(document))
    }

    /// Writes next to `path` first and then renames, so a failing save never leaves a
    /// truncated model behind.
    pub fn save(path: &Path, document: &ModelDocument) -> Result<(), ParserError> {
        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = Path::new(&temp_name);

        let result = fs::File::create(temp_path)
            .map_err(ParserError::from)
            .and_then(|file| {
                let mut wtr = BufWriter::new(file);
                RsmLoader::write(&mut wtr, document)?;
                wtr.flush()?;
                Ok(())
            });

        if let Err(error) = result {
            let _ = fs::remove_file(temp_path);
            return Err(error);
        }

        fs::rename(temp_path, path)?;
        trace!("Saved model {} to {}", document.root().name, path.display());
        Ok(())
    }
}
