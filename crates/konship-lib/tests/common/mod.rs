//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use std::sync::Arc;

use konship_lib::{ContainerFactory, ProductCatalog, SerialSequence};

/// Path to fixtures directory used by tests (product catalog, loading plans).
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Factory backed by the fixture product catalog, which adds "Vaccines".
///
/// Numbering starts at 1 so serials in fixture plans are predictable.
#[allow(dead_code)]
pub fn fixture_factory() -> ContainerFactory {
    let catalog = ProductCatalog::from_path(&fixtures_dir().join("products.csv"))
        .expect("load fixture products.csv");
    ContainerFactory::with_catalog(catalog)
        .with_sequence(Arc::new(SerialSequence::new()))
}
