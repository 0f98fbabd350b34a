/// Access to the raw bytes of an asset, addressed by the path the editor uses for it.
pub trait RawAssetLoader {
    fn load_raw_owned(&self, path: &str) -> Result<Vec<u8>, std::io::Error>;
}
