/// Exporters are the inverse of the importers: they turn our types back into files.
pub mod obj_exporter;
pub mod rsm_exporter;
