pub mod animation;
pub mod bounds;
pub mod common;
pub mod exporter;
pub mod importer;
pub mod loader;
pub mod transform;
