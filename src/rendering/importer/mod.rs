pub mod rsm_importer;
