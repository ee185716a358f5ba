pub mod config;
pub mod filter;
pub mod grid;
pub mod models;
pub mod occupancy_client;
pub mod selection;
pub mod submission;
pub mod sync;
pub mod ui;

use std::sync::Arc;
use tracing::info;

use models::Catalog;

// Shared state для всего приложения
pub struct AppState {
    pub config: config::Config,
    pub catalog: Catalog,
    pub sync: sync::AvailabilitySync,
    pub booking: submission::BookingSubmitter,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Arc<Self>, Box<dyn std::error::Error>> {
        let catalog = match &config.catalog.path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let catalog = Catalog::from_json(&raw)?;
                info!("Catalog loaded from {}", path);
                catalog
            }
            None => {
                info!("CATALOG_PATH not set, using built-in demo catalog");
                Catalog::demo()
            }
        };

        let occupancy = occupancy_client::OccupancyClient::from_config(&config.occupancy);
        let booking = submission::BookingSubmitter::from_config(&config.booking);

        Ok(Arc::new(Self {
            catalog,
            sync: sync::AvailabilitySync::new(occupancy),
            booking,
            config,
        }))
    }
}
