use thiserror::Error;

/// Convenient result alias for the konship library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A load would push own weight plus cargo past the container's maximum load.
    #[error("loading {requested} kg into {serial} would exceed its max load of {max_load} kg ({available} kg available)")]
    OverCapacity {
        serial: String,
        requested: f64,
        available: f64,
        max_load: f64,
    },

    /// A refrigerated container was configured colder than its product allows.
    #[error("temperature {temperature} is below the minimum of {minimum} required for {product}")]
    TemperatureTooHigh {
        product: String,
        temperature: f64,
        minimum: f64,
    },

    /// Boarding would exceed the ship's container-count ceiling.
    #[error("ship {ship} is full ({max_containers} containers)")]
    FleetFull { ship: String, max_containers: usize },

    /// Boarding or loading would exceed the ship's aggregate weight ceiling.
    #[error("ship {ship} would carry {attempted} kg, above its limit of {max_weight} kg")]
    OverweightFleet {
        ship: String,
        attempted: f64,
        max_weight: f64,
    },

    /// No container with the given serial is aboard the ship.
    #[error("container {serial} is not aboard {ship}")]
    NotAboard { ship: String, serial: String },

    /// Load weights must be finite and non-negative.
    #[error("invalid load weight {weight}: must be finite and non-negative")]
    InvalidWeight { weight: f64 },

    /// Raised when container dimensions fail validation at construction.
    #[error("invalid container: {message}")]
    InvalidContainer { message: String },

    /// Raised when ship parameters fail validation at construction.
    #[error("invalid ship: {message}")]
    InvalidShip { message: String },

    /// Raised when a refrigerated product is not present in the catalog.
    #[error("unknown product: {name}{}", format_suggestions(.suggestions))]
    UnknownProduct {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when product catalog data fails validation.
    #[error("invalid product catalog: {message}")]
    ProductCatalog { message: String },

    /// Raised when duplicate product names are encountered during catalog load.
    #[error("duplicate product name encountered: {name}")]
    DuplicateProduct { name: String },

    /// Raised when a string cannot be parsed as a `KON-<tag>-<sequence>` serial.
    #[error("invalid serial number: {value}")]
    InvalidSerial { value: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable snake_case identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Error::OverCapacity { .. } => "over_capacity",
            Error::TemperatureTooHigh { .. } => "temperature_too_high",
            Error::FleetFull { .. } => "fleet_full",
            Error::OverweightFleet { .. } => "overweight_fleet",
            Error::NotAboard { .. } => "not_aboard",
            Error::InvalidWeight { .. } => "invalid_weight",
            Error::InvalidContainer { .. } => "invalid_container",
            Error::InvalidShip { .. } => "invalid_ship",
            Error::UnknownProduct { .. } => "unknown_product",
            Error::ProductCatalog { .. } => "product_catalog",
            Error::DuplicateProduct { .. } => "duplicate_product",
            Error::InvalidSerial { .. } => "invalid_serial",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
