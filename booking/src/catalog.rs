//! Bus offers and the catalog that lists them.
//!
//! The catalog does not run a real query: every search lists the same fixed
//! offers. It sits behind the [`BusCatalog`] trait so the wizard receives it
//! through its environment like any other dependency.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::search::SearchRequest;

/// Identifier of a bus offer
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OfferId(String);

impl OfferId {
    /// Wrap an identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// On-board amenity
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    /// Wireless internet
    Wifi,
    /// Hot drinks
    Coffee,
    /// Air conditioning
    AirConditioning,
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Wifi => "wifi",
            Self::Coffee => "coffee",
            Self::AirConditioning => "ac",
        };
        f.write_str(label)
    }
}

/// A selectable bus trip with a fixed schedule and base fare
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusOffer {
    /// Offer identifier
    pub id: OfferId,
    /// Bus operator name
    pub operator: String,
    /// Departure clock time
    pub departure: NaiveTime,
    /// Arrival clock time (may fall on the next day)
    pub arrival: NaiveTime,
    /// Trip duration as shown to travellers, e.g. `"7h 45m"`
    pub duration: String,
    /// Base fare per seat in whole currency units
    pub base_price: u32,
    /// Seating class label, e.g. `"AC Sleeper"`
    pub seating_class: String,
    /// Amenities on board
    pub amenities: BTreeSet<Amenity>,
    /// Seats advertised as free
    pub seats_available: u32,
    /// Average rating between 0 and 5
    pub rating: f32,
}

impl BusOffer {
    /// Whether the offer lists the amenity
    #[must_use]
    pub fn has(&self, amenity: Amenity) -> bool {
        self.amenities.contains(&amenity)
    }
}

/// Source of bus offers for a search
pub trait BusCatalog: Send + Sync {
    /// Offers to show for a search
    fn offers(&self, request: &SearchRequest) -> Vec<BusOffer>;
}

/// The fixed demo catalog
///
/// Ignores the request entirely and always returns the same four offers in
/// the same order.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog;

impl StaticCatalog {
    /// Create the catalog
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Every offer in the catalog
    #[must_use]
    #[rustfmt::skip]
    pub fn all() -> Vec<BusOffer> {
        use Amenity::{AirConditioning, Coffee, Wifi};

        vec![
            offer("1", "Express Travels", (6, 30), (14, 30), "8h 0m", 850, "AC Sleeper", &[Wifi, Coffee, AirConditioning], 12, 4.5),
            offer("2", "Royal Coach", (9, 0), (16, 45), "7h 45m", 920, "Luxury AC", &[Wifi, Coffee, AirConditioning], 8, 4.8),
            offer("3", "City Connect", (14, 15), (22, 0), "7h 45m", 780, "AC Seater", &[Wifi, AirConditioning], 15, 4.2),
            offer("4", "Night Rider", (22, 30), (6, 15), "7h 45m", 950, "AC Sleeper", &[Wifi, Coffee, AirConditioning], 6, 4.6),
        ]
    }

    /// Look up a single offer
    #[must_use]
    pub fn find(id: &OfferId) -> Option<BusOffer> {
        Self::all().into_iter().find(|offer| &offer.id == id)
    }
}

impl BusCatalog for StaticCatalog {
    fn offers(&self, request: &SearchRequest) -> Vec<BusOffer> {
        tracing::debug!(
            origin = %request.origin,
            destination = %request.destination,
            date = %request.date,
            "Listing static catalog"
        );
        Self::all()
    }
}

#[allow(clippy::too_many_arguments)] // one row of the fixed table
fn offer(
    id: &str,
    operator: &str,
    departure: (u32, u32),
    arrival: (u32, u32),
    duration: &str,
    base_price: u32,
    seating_class: &str,
    amenities: &[Amenity],
    seats_available: u32,
    rating: f32,
) -> BusOffer {
    BusOffer {
        id: OfferId::new(id),
        operator: operator.to_string(),
        departure: NaiveTime::from_hms_opt(departure.0, departure.1, 0).unwrap_or_default(),
        arrival: NaiveTime::from_hms_opt(arrival.0, arrival.1, 0).unwrap_or_default(),
        duration: duration.to_string(),
        base_price,
        seating_class: seating_class.to_string(),
        amenities: amenities.iter().copied().collect(),
        seats_available,
        rating,
    }
}
