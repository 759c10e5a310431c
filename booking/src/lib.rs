//! Headless bus-ticket booking wizard.
//!
//! A traveller moves through four steps: search for a trip, pick one of the
//! listed buses, choose seats on a generated seat map, and enter passenger
//! details to book. The whole flow is one reducer, [`WizardReducer`], driven
//! by a `coachline_runtime::Store`.
//!
//! # Architecture
//!
//! 1. **Actions** ([`WizardAction`]) are form edits and clicks
//! 2. **State** ([`WizardState`]) holds the current step and only that step's data
//! 3. **Environment** ([`WizardEnvironment`]) supplies the clock, seeds, catalog and notifier
//! 4. **Effects** deliver notifications and schedule the reset after a booking
//!
//! # Example Usage
//!
//! ```no_run
//! use coachline::search::SearchUpdate;
//! use coachline::{BookingConfig, WizardAction, WizardEnvironment, WizardReducer, WizardState};
//! use coachline_runtime::Store;
//!
//! # async fn example() -> Result<(), coachline::BookingError> {
//! let env = WizardEnvironment::production(BookingConfig::from_env());
//! let store = Store::new(WizardState::new(), WizardReducer::new(), env);
//!
//! store
//!     .send(WizardAction::UpdateSearch(SearchUpdate::Origin("Pune".to_string())))
//!     .await?;
//!
//! let step = store.state(WizardState::step_kind).await;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod notification;
pub mod pricing;
pub mod search;
pub mod seats;
pub mod wizard;

// Re-export commonly used types
pub use catalog::{BusCatalog, BusOffer, OfferId, StaticCatalog};
pub use checkout::{BookingConfirmation, BookingReference, CheckoutForm, PassengerUpdate};
pub use config::{BookingConfig, ConfigError};
pub use error::BookingError;
pub use notification::{Notification, Notifier, Severity, TracingNotifier};
pub use pricing::{PriceBreakdown, TaxRate};
pub use search::{SearchDraft, SearchRequest, SearchUpdate};
pub use seats::{Seat, SeatId, SeatLayout, SeatMap};
pub use wizard::{StepKind, WizardAction, WizardEnvironment, WizardReducer, WizardState, WizardStep};
