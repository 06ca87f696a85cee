pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::*;

use api::ApiClient;
use services::{ExceptionManager, ReservationBooking};

/// Client state shared between the scheduling flows.
pub struct ExamClient {
    pub config: ClientConfig,
    pub api: ApiClient,
}

impl ExamClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        Ok(Self { config, api })
    }

    /// Build a client from the user config file and environment overrides.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::load())
    }

    pub fn bookings(&self) -> ReservationBooking<'_> {
        ReservationBooking::new(&self.api)
    }

    pub fn exceptions(&self) -> ExceptionManager<'_> {
        ExceptionManager::new(&self.api)
    }
}
