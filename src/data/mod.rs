mod loader;

pub use loader::{LoadError, load_catalog_from_json, parse_catalog};
