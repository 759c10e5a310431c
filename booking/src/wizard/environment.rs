//! Dependencies injected into the wizard reducer.

use coachline_core::environment::{Clock, EntropySeeds, SeedSource, SystemClock};
use std::sync::Arc;

use crate::catalog::{BusCatalog, StaticCatalog};
use crate::config::BookingConfig;
use crate::notification::{Notifier, TracingNotifier};

/// Environment for the booking wizard
#[derive(Clone)]
pub struct WizardEnvironment {
    /// Source of today's date for search validation
    pub clock: Arc<dyn Clock>,
    /// Seeds for seat map generation
    pub seeds: Arc<dyn SeedSource>,
    /// Offers for a search
    pub catalog: Arc<dyn BusCatalog>,
    /// Where notifications go
    pub notifier: Arc<dyn Notifier>,
    /// Layout, tax and timing settings
    pub config: BookingConfig,
}

impl WizardEnvironment {
    /// Creates a new wizard environment
    pub fn new(
        clock: Arc<dyn Clock>,
        seeds: Arc<dyn SeedSource>,
        catalog: Arc<dyn BusCatalog>,
        notifier: Arc<dyn Notifier>,
        config: BookingConfig,
    ) -> Self {
        Self {
            clock,
            seeds,
            catalog,
            notifier,
            config,
        }
    }

    /// System clock, OS entropy, the static catalog and log notifications
    #[must_use]
    pub fn production(config: BookingConfig) -> Self {
        Self::new(
            Arc::new(SystemClock),
            Arc::new(EntropySeeds),
            Arc::new(StaticCatalog::new()),
            Arc::new(TracingNotifier),
            config,
        )
    }

    /// Seed for the next seat map; a configured seed wins over the source
    #[must_use]
    pub fn seat_seed(&self) -> u64 {
        self.config.seed.unwrap_or_else(|| self.seeds.next_seed())
    }
}
