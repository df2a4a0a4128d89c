//! Refrigerated product catalog.
//!
//! Maps product names to the minimum temperature (°C) they may be carried at.
//! A built-in table covers the standard product range; alternative catalogs can
//! be loaded from CSV with the same lookup behaviour.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Maximum number of suggestions attached to an unknown product error.
const MAX_SUGGESTIONS: usize = 3;

const BUILTIN_PRODUCTS: &[(&str, f64)] = &[
    ("Bananas", 13.3),
    ("Chocolate", 18.0),
    ("Fish", 0.0),
    ("Meat", -15.0),
    ("Ice cream", -18.0),
    ("Frozen Pizza", -30.0),
    ("Cheese", -7.2),
    ("Sausages", 5.0),
    ("Butter", -20.5),
    ("Eggs", 19.0),
];

static BUILTIN: Lazy<ProductCatalog> = Lazy::new(|| {
    let products = BUILTIN_PRODUCTS
        .iter()
        .map(|(name, min_temperature)| {
            (
                normalize_name(name),
                ProductRequirement {
                    name: (*name).to_string(),
                    min_temperature: *min_temperature,
                },
            )
        })
        .collect();
    ProductCatalog {
        products,
        source: None,
    }
});

/// A product and the coldest temperature it may be carried at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRequirement {
    pub name: String,
    pub min_temperature: f64,
}

impl ProductRequirement {
    /// Validate the requirement for correctness.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::ProductCatalog {
                message: "product name must not be empty".to_string(),
            });
        }
        if !self.min_temperature.is_finite() {
            return Err(Error::ProductCatalog {
                message: format!("min_temperature for '{}' must be finite", self.name),
            });
        }
        Ok(())
    }
}

/// Collection of product requirements keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: HashMap<String, ProductRequirement>,
    source: Option<PathBuf>,
}

impl ProductCatalog {
    /// The built-in product table.
    pub fn builtin() -> &'static ProductCatalog {
        &BUILTIN
    }

    /// Load a product catalog from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a product catalog from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| Error::ProductCatalog {
                message: format!("failed to read product catalog headers: {err}"),
            })?
            .clone();

        let normalize = |s: &str| {
            s.to_ascii_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
        };
        let normalized_headers: Vec<String> = headers.iter().map(&normalize).collect();

        // Canonical field name -> accepted header spellings
        let synonyms: &[(&str, &[&str])] = &[
            ("name", &["name", "product", "product_name"]),
            (
                "min_temperature",
                &[
                    "min_temperature",
                    "min_temp",
                    "temperature",
                    "min_temperature_c",
                ],
            ),
        ];

        let mut index_map: BTreeMap<&str, usize> = BTreeMap::new();
        for (canon, alts) in synonyms {
            if let Some(index) = alts.iter().find_map(|alt| {
                let alt_n = normalize(alt);
                normalized_headers.iter().position(|h| *h == alt_n)
            }) {
                index_map.insert(*canon, index);
            }
        }

        let missing: Vec<&str> = ["name", "min_temperature"]
            .into_iter()
            .filter(|c| !index_map.contains_key(c))
            .collect();
        if !missing.is_empty() {
            return Err(Error::ProductCatalog {
                message: format!(
                    "product catalog missing required columns: {}. Available: {}",
                    missing.join(", "),
                    headers.iter().collect::<Vec<_>>().join(", ")
                ),
            });
        }

        let mut products = HashMap::new();
        let mut row_num: usize = 1; // header is line 1
        for result in csv_reader.records() {
            row_num += 1;
            let record = result.map_err(|e| Error::ProductCatalog {
                message: e.to_string(),
            })?;

            let get = |field: &str| -> Option<&str> {
                index_map
                    .get(field)
                    .and_then(|&i| record.get(i))
                    .map(str::trim)
            };

            let name = get("name").unwrap_or_default().to_string();
            let min_temperature = get("min_temperature")
                .ok_or_else(|| Error::ProductCatalog {
                    message: format!("missing min_temperature for '{}' at row {}", name, row_num),
                })?
                .parse::<f64>()
                .map_err(|e| Error::ProductCatalog {
                    message: format!(
                        "invalid min_temperature for '{}' at row {}: {}",
                        name, row_num, e
                    ),
                })?;

            let product = ProductRequirement {
                name,
                min_temperature,
            };
            product.validate()?;

            let key = normalize_name(&product.name);
            if products.contains_key(&key) {
                return Err(Error::DuplicateProduct { name: key });
            }
            products.insert(key, product);
        }

        Ok(Self {
            products,
            source: None,
        })
    }

    /// Get a product by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&ProductRequirement> {
        self.products.get(&normalize_name(name))
    }

    /// Look up a product, failing with suggestions when it is unknown.
    pub fn require(&self, name: &str) -> Result<&ProductRequirement> {
        self.get(name).ok_or_else(|| Error::UnknownProduct {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name, MAX_SUGGESTIONS),
        })
    }

    /// Product names similar to `name`, best match first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = normalize_name(name);
        let mut scored: Vec<(f64, &str)> = self
            .products
            .iter()
            .map(|(key, product)| (strsim::jaro_winkler(&needle, key), product.name.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Get all products sorted by name.
    pub fn products_sorted(&self) -> Vec<&ProductRequirement> {
        let mut products: Vec<&ProductRequirement> = self.products.values().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Normalize a product name for case-insensitive lookup.
fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
