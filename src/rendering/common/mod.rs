/// The model format and our render convention disagree on handedness, this module maps between them.
pub mod coordinate_systems;
/// The in-memory scene graph of one model: nodes, faces, frames and the computed matrices.
pub mod model;
/// basic types (e.g. mesh) to abstract away from both the asset format and the export target.
pub mod types;
