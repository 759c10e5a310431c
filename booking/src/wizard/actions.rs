//! Inputs to the wizard.

use serde::{Deserialize, Serialize};

use crate::catalog::OfferId;
use crate::checkout::{BookingReference, PassengerUpdate};
use crate::search::SearchUpdate;
use crate::seats::SeatId;

/// Everything the traveller (or a timer) can do to the wizard
///
/// Actions that make no sense on the current step are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardAction {
    // ========== Search ==========
    /// Edit one search field
    UpdateSearch(SearchUpdate),

    /// Exchange origin and destination
    SwapCities,

    /// Submit the search; ignored until the form is complete
    SubmitSearch,

    // ========== Results ==========
    /// Choose a listed offer
    SelectOffer {
        /// The chosen offer
        offer_id: OfferId,
    },

    // ========== Seats ==========
    /// Select or deselect a seat
    ToggleSeat {
        /// Seat to flip
        seat_id: SeatId,
    },

    /// Move on with the selected seats; ignored with none selected
    ContinueToCheckout,

    // ========== Checkout ==========
    /// Edit one passenger field
    UpdatePassenger {
        /// Zero-based passenger index
        index: usize,
        /// Field and value
        update: PassengerUpdate,
    },

    /// Pay and book
    SubmitBooking,

    /// Timer fired after a successful booking
    ResetAfterSuccess {
        /// Booking the timer belongs to
        reference: BookingReference,
    },

    // ========== Any step ==========
    /// Go back one step
    Back,

    /// Hide the current notification
    DismissNotification,
}
