//! Wizard state.
//!
//! Each step carries exactly the data it owns, so a seat map can only exist
//! once an offer is chosen and a passenger form only once seats are picked.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::BusOffer;
use crate::checkout::{BookingConfirmation, CheckoutForm};
use crate::notification::Notification;
use crate::pricing::{PriceBreakdown, TaxRate};
use crate::search::{SearchDraft, SearchRequest};
use crate::seats::SeatMap;

/// The step the wizard is on, with that step's data
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum WizardStep {
    /// Filling in the search form
    Search {
        /// Form contents
        draft: SearchDraft,
    },
    /// Browsing offers for a submitted search
    Results {
        /// The submitted search
        request: SearchRequest,
        /// Offers listed for it
        offers: Vec<BusOffer>,
    },
    /// Picking seats on a chosen bus
    Seats {
        /// The submitted search
        request: SearchRequest,
        /// The chosen offer
        offer: BusOffer,
        /// Seats of that bus
        seat_map: SeatMap,
    },
    /// Entering passenger details
    Checkout {
        /// The submitted search
        request: SearchRequest,
        /// The chosen offer
        offer: BusOffer,
        /// Seats of that bus, with the selection being booked
        seat_map: SeatMap,
        /// Passenger form, one record per selected seat
        form: CheckoutForm,
        /// Set once the booking succeeds
        confirmation: Option<BookingConfirmation>,
    },
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Search {
            draft: SearchDraft::new(),
        }
    }
}

impl WizardStep {
    /// Which step this is
    #[must_use]
    pub const fn kind(&self) -> StepKind {
        match self {
            Self::Search { .. } => StepKind::Search,
            Self::Results { .. } => StepKind::Results,
            Self::Seats { .. } => StepKind::Seats,
            Self::Checkout { .. } => StepKind::Checkout,
        }
    }
}

/// Step names without their data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Search form
    Search,
    /// Offer list
    Results,
    /// Seat map
    Seats,
    /// Passenger form
    Checkout,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Search => "search",
            Self::Results => "results",
            Self::Seats => "seats",
            Self::Checkout => "checkout",
        };
        f.write_str(name)
    }
}

/// Everything the wizard shows
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    /// Current step
    pub step: WizardStep,
    /// Most recent notification, until dismissed
    pub notification: Option<Notification>,
}

impl WizardState {
    /// Fresh wizard on an empty search form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Which step the wizard is on
    #[must_use]
    pub const fn step_kind(&self) -> StepKind {
        self.step.kind()
    }

    /// Search form, on the search step
    #[must_use]
    pub const fn search_draft(&self) -> Option<&SearchDraft> {
        match &self.step {
            WizardStep::Search { draft } => Some(draft),
            _ => None,
        }
    }

    /// The submitted search, on any later step
    #[must_use]
    pub const fn request(&self) -> Option<&SearchRequest> {
        match &self.step {
            WizardStep::Search { .. } => None,
            WizardStep::Results { request, .. }
            | WizardStep::Seats { request, .. }
            | WizardStep::Checkout { request, .. } => Some(request),
        }
    }

    /// Listed offers, on the results step
    #[must_use]
    pub fn offers(&self) -> &[BusOffer] {
        match &self.step {
            WizardStep::Results { offers, .. } => offers,
            _ => &[],
        }
    }

    /// The chosen offer, on the seats and checkout steps
    #[must_use]
    pub const fn offer(&self) -> Option<&BusOffer> {
        match &self.step {
            WizardStep::Seats { offer, .. } | WizardStep::Checkout { offer, .. } => Some(offer),
            _ => None,
        }
    }

    /// The seat map, on the seats and checkout steps
    #[must_use]
    pub const fn seat_map(&self) -> Option<&SeatMap> {
        match &self.step {
            WizardStep::Seats { seat_map, .. } | WizardStep::Checkout { seat_map, .. } => {
                Some(seat_map)
            },
            _ => None,
        }
    }

    /// Passenger form, on the checkout step
    #[must_use]
    pub const fn checkout_form(&self) -> Option<&CheckoutForm> {
        match &self.step {
            WizardStep::Checkout { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Confirmation of a successful booking
    #[must_use]
    pub const fn confirmation(&self) -> Option<&BookingConfirmation> {
        match &self.step {
            WizardStep::Checkout {
                confirmation: Some(confirmation),
                ..
            } => Some(confirmation),
            _ => None,
        }
    }

    /// Prices for the seats being booked, on the checkout step
    #[must_use]
    pub fn price_breakdown(&self, rate: TaxRate) -> Option<PriceBreakdown> {
        self.checkout_form().map(|form| form.breakdown(rate))
    }
}
