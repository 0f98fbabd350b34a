use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::trace;

use crate::io::common::loader::RawAssetLoader;

/// Loads assets from a plain data directory, like an extracted client's `data/`.
pub struct FsLoader {
    data_folder: PathBuf,
}

impl FsLoader {
    pub fn new(data_folder: impl Into<PathBuf>) -> Self {
        FsLoader {
            data_folder: data_folder.into(),
        }
    }

    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    /// Asset paths use backslashes, also on platforms that don't.
    pub fn resolve(&self, path: &str) -> PathBuf {
        path.split(['\\', '/'])
            .filter(|segment| !segment.is_empty())
            .fold(self.data_folder.clone(), |full, segment| full.join(segment))
    }

    /// Every file below the data folder with the given extension, as lowercase path relative
    /// to the data folder without the extension, sorted. Only names containing `filter`
    /// (case insensitive) are returned.
    pub fn list_models(&self, extension: &str, filter: &str) -> Result<Vec<String>, std::io::Error> {
        let suffix = format!(".{}", extension.to_ascii_lowercase());
        let filter = filter.to_ascii_lowercase();

        let mut files = Vec::new();
        FsLoader::collect_files(&self.data_folder, &mut files)?;

        Ok(files
            .iter()
            .filter_map(|file| file.strip_prefix(&self.data_folder).ok())
            .map(|relative| {
                relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().to_ascii_lowercase())
                    .join("/")
            })
            .filter_map(|name| name.strip_suffix(&suffix).map(str::to_string))
            .filter(|name| name.contains(&filter))
            .sorted()
            .collect_vec())
    }

    fn collect_files(folder: &Path, files: &mut Vec<PathBuf>) -> Result<(), std::io::Error> {
        for entry in fs::read_dir(folder)? {
            let path = entry?.path();
            if path.is_dir() {
                FsLoader::collect_files(&path, files)?;
            } else {
                files.push(path);
            }
        }
        Ok(())
    }
}

impl RawAssetLoader for FsLoader {
    fn load_raw_owned(&self, path: &str) -> Result<Vec<u8>, std::io::Error> {
        let full_path = self.resolve(path);
        trace!("Loading {} from {}", path, full_path.display());
        fs::read(full_path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::io::common::loader::RawAssetLoader;
    use crate::io::fs::loader::FsLoader;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("rsmview-fs-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    pub fn lists_models_sorted_and_filtered() -> Result<(), anyhow::Error> {
        let dir = scratch_dir("list");
        fs::create_dir_all(dir.join("model").join("Prontera"))?;
        fs::write(dir.join("model").join("Prontera").join("Fountain.RSM"), b"")?;
        fs::write(dir.join("model").join("Prontera").join("bench.rsm"), b"")?;
        fs::write(dir.join("model").join("tree.rsm"), b"")?;
        fs::write(dir.join("model").join("tree.bmp"), b"")?;

        let loader = FsLoader::new(&dir);
        assert_eq!(
            loader.list_models("rsm", "")?,
            vec!["model/prontera/bench", "model/prontera/fountain", "model/tree"]
        );
        assert_eq!(loader.list_models("rsm", "PRONTERA/F")?, vec!["model/prontera/fountain"]);

        fs::remove_dir_all(dir)?;
        Ok(())
    }

    #[test]
    pub fn resolves_backslash_paths() -> Result<(), anyhow::Error> {
        let dir = scratch_dir("resolve");
        fs::create_dir_all(dir.join("model"))?;
        fs::write(dir.join("model").join("tree.rsm"), b"GRSM")?;

        let loader = FsLoader::new(&dir);
        assert_eq!(loader.load_raw_owned("model\\tree.rsm")?, b"GRSM");
        assert!(loader.load_raw_owned("model\\missing.rsm").is_err());

        fs::remove_dir_all(dir)?;
        Ok(())
    }
}
