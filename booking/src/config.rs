//! Configuration for the booking wizard.
//!
//! Loads settings from environment variables with sensible defaults. Values
//! that fail to parse fall back to their default; [`BookingConfig::validate`]
//! catches values that parse but make no sense.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::pricing::TaxRate;
use crate::seats::SeatLayout;

/// Wizard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Seat map shape and fares
    pub layout: SeatLayout,
    /// Tax charged at checkout
    pub tax_rate: TaxRate,
    /// Milliseconds between a successful booking and the wizard reset
    pub reset_delay_ms: u64,
    /// Fixed seed for seat maps; fresh entropy per map when unset
    pub seed: Option<u64>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            layout: SeatLayout::default(),
            tax_rate: TaxRate::STANDARD,
            reset_delay_ms: 2_000,
            seed: None,
        }
    }
}

/// Configuration values that cannot be used
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Seat maps need at least one row
    #[error("seat map must have at least one row")]
    NoRows,

    /// Occupancy must be a probability
    #[error("occupancy probability {0} is outside [0, 1]")]
    InvalidOccupancy(f64),
}

impl BookingConfig {
    /// Load configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `COACHLINE_SEAT_ROWS` | 12 |
    /// | `COACHLINE_OCCUPANCY_PROBABILITY` | 0.3 |
    /// | `COACHLINE_WINDOW_SURCHARGE` | 50 |
    /// | `COACHLINE_TAX_BASIS_POINTS` | 500 |
    /// | `COACHLINE_RESET_DELAY_MS` | 2000 |
    /// | `COACHLINE_SEED` | unset |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            layout: SeatLayout {
                rows: parse_var(&lookup, "COACHLINE_SEAT_ROWS").unwrap_or(defaults.layout.rows),
                occupancy_probability: parse_var(&lookup, "COACHLINE_OCCUPANCY_PROBABILITY")
                    .unwrap_or(defaults.layout.occupancy_probability),
                window_surcharge: parse_var(&lookup, "COACHLINE_WINDOW_SURCHARGE")
                    .unwrap_or(defaults.layout.window_surcharge),
            },
            tax_rate: parse_var(&lookup, "COACHLINE_TAX_BASIS_POINTS")
                .map_or(defaults.tax_rate, TaxRate::from_basis_points),
            reset_delay_ms: parse_var(&lookup, "COACHLINE_RESET_DELAY_MS")
                .unwrap_or(defaults.reset_delay_ms),
            seed: parse_var(&lookup, "COACHLINE_SEED"),
        }
    }

    /// Check values that parse but cannot be used
    ///
    /// # Errors
    ///
    /// [`ConfigError`] for zero rows or an occupancy outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.rows == 0 {
            return Err(ConfigError::NoRows);
        }

        let p = self.layout.occupancy_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::InvalidOccupancy(p));
        }

        Ok(())
    }

    /// Delay before the wizard resets after a booking
    #[must_use]
    pub const fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key).and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = BookingConfig::from_lookup(lookup(&[]));
        assert_eq!(config, BookingConfig::default());
        assert_eq!(config.layout.rows, 12);
        assert_eq!(config.tax_rate.basis_points(), 500);
        assert_eq!(config.reset_delay(), Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn variables_override_defaults() {
        let config = BookingConfig::from_lookup(lookup(&[
            ("COACHLINE_SEAT_ROWS", "8"),
            ("COACHLINE_OCCUPANCY_PROBABILITY", "0.5"),
            ("COACHLINE_WINDOW_SURCHARGE", "75"),
            ("COACHLINE_TAX_BASIS_POINTS", "1200"),
            ("COACHLINE_RESET_DELAY_MS", "10"),
            ("COACHLINE_SEED", " 42 "),
        ]));

        assert_eq!(config.layout.rows, 8);
        assert!((config.layout.occupancy_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.layout.window_surcharge, 75);
        assert_eq!(config.tax_rate, TaxRate::from_basis_points(1200));
        assert_eq!(config.reset_delay(), Duration::from_millis(10));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = BookingConfig::from_lookup(lookup(&[
            ("COACHLINE_SEAT_ROWS", "lots"),
            ("COACHLINE_SEED", "-1"),
        ]));
        assert_eq!(config.layout.rows, 12);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn validation_rejects_nonsense() {
        let config = BookingConfig::from_lookup(lookup(&[("COACHLINE_SEAT_ROWS", "0")]));
        assert_eq!(config.validate(), Err(ConfigError::NoRows));

        let config =
            BookingConfig::from_lookup(lookup(&[("COACHLINE_OCCUPANCY_PROBABILITY", "1.5")]));
        assert_eq!(config.validate(), Err(ConfigError::InvalidOccupancy(1.5)));
    }
}
