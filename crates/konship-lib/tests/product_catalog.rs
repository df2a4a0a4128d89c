mod common;

use konship_lib::{Error, ProductCatalog};

#[test]
fn loads_fixture_catalog_and_lists_products() {
    let path = common::fixtures_dir().join("products.csv");
    let catalog = ProductCatalog::from_path(&path).expect("fixture should load");

    let names: Vec<_> = catalog
        .products_sorted()
        .into_iter()
        .map(|p| p.name.clone())
        .collect();
    assert_eq!(names, vec!["Bananas", "Fish", "Ice cream", "Vaccines"]);
    assert_eq!(catalog.source_path(), Some(path.as_path()));
}

#[test]
fn rejects_duplicate_names_case_insensitive() {
    let csv = "product,min_temperature\nFish,0\nfish,1\n";
    let err = ProductCatalog::from_reader(csv.as_bytes()).expect_err("should reject duplicates");
    match err {
        Error::DuplicateProduct { name } => assert_eq!(name, "fish"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn rejects_invalid_temperatures() {
    let csv = "product,min_temperature\nFish,cold\n";
    let err = ProductCatalog::from_reader(csv.as_bytes()).expect_err("should reject text");
    match err {
        Error::ProductCatalog { message } => assert!(message.contains("min_temperature")),
        other => panic!("unexpected error: {:?}", other),
    }

    let csv = "product,min_temperature\nFish,NaN\n";
    assert!(matches!(
        ProductCatalog::from_reader(csv.as_bytes()),
        Err(Error::ProductCatalog { .. })
    ));
}

#[test]
fn rejects_missing_columns() {
    let csv = "product,colour\nFish,silver\n";
    let err = ProductCatalog::from_reader(csv.as_bytes()).expect_err("missing column");
    match err {
        Error::ProductCatalog { message } => {
            assert!(message.contains("missing required columns: min_temperature"))
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = ProductCatalog::from_path(&dir.path().join("absent.csv")).expect_err("no file");
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn fuzzy_matches_respects_limit_and_filters_noise() {
    let catalog = ProductCatalog::builtin();
    assert!(catalog.fuzzy_matches("Sausage", 1).len() <= 1);
    assert!(catalog.fuzzy_matches("xyzzy", 3).is_empty());
}
