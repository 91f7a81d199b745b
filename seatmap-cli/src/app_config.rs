use seatmap_core::{ReferencePolicy, SeatInventory, SeatResult, ZoneLayout};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub layout: ZoneLayout,
    pub references: ReferencePolicy,
    pub display: DisplayConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print booking references on the seat chart instead of `R`.
    pub show_references: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct BookingConfig {
    pub customer: CustomerPrompt,
}

/// Which customer details the booking prompt asks for.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerPrompt {
    None,
    Name,
    #[default]
    Passenger,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SEATMAP__LAYOUT__ROWS=40`
            .add_source(
                config::Environment::with_prefix("SEATMAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn build_inventory(&self) -> SeatResult<SeatInventory> {
        SeatInventory::new(self.layout.clone(), self.references.clone())
    }
}
