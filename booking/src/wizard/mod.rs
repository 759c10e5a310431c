//! The four-step booking wizard: search, results, seats, checkout.
//!
//! ```text
//! Search ──submit──▶ Results ──select──▶ Seats ──continue──▶ Checkout
//!    ▲                  │                  │                    │
//!    └──────back────────┘◀──────back───────┘◀───────back────────┘
//!    ▲                                                          │
//!    └──────────────── reset, after a successful booking ───────┘
//! ```

mod actions;
mod environment;
mod reducer;
mod types;

pub use actions::WizardAction;
pub use environment::WizardEnvironment;
pub use reducer::WizardReducer;
pub use types::{StepKind, WizardState, WizardStep};
