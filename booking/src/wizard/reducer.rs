//! Wizard reducer: the step-by-step booking flow.
//!
//! Forward moves only happen when the current step's data is complete;
//! `Back` discards only what the step being left owns. Anything else that
//! does not fit the current step is logged and ignored.

use coachline_core::effect::Effect;
use coachline_core::reducer::Reducer;
use coachline_core::{async_effect, delay, smallvec, SmallVec};
use std::sync::Arc;

use super::actions::WizardAction;
use super::environment::WizardEnvironment;
use super::types::{WizardState, WizardStep};
use crate::catalog::OfferId;
use crate::checkout::{BookingReference, CheckoutForm, PassengerUpdate};
use crate::notification::Notification;
use crate::search::SearchDraft;
use crate::seats::{SeatId, SeatMap};

type Effects = SmallVec<[Effect<WizardAction>; 4]>;

/// Reducer for the booking wizard
#[derive(Clone, Debug, Default)]
pub struct WizardReducer;

impl WizardReducer {
    /// Creates a new wizard reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn ignored(state: &WizardState, action: &'static str) -> Effects {
        tracing::debug!(action, step = %state.step_kind(), "Action ignored on this step");
        smallvec![Effect::None]
    }

    fn notify(
        state: &mut WizardState,
        env: &WizardEnvironment,
        notification: Notification,
    ) -> Effect<WizardAction> {
        state.notification = Some(notification.clone());
        let notifier = Arc::clone(&env.notifier);
        async_effect! {
            notifier.notify(&notification);
            None
        }
    }

    fn submit_search(state: &mut WizardState, env: &WizardEnvironment) -> Effects {
        let WizardStep::Search { draft } = &state.step else {
            return Self::ignored(state, "SubmitSearch");
        };

        match draft.submit(env.clock.today()) {
            Ok(request) => {
                let offers = env.catalog.offers(&request);
                tracing::info!(
                    origin = %request.origin,
                    destination = %request.destination,
                    date = %request.date,
                    passengers = request.passengers,
                    offers = offers.len(),
                    "Search submitted"
                );
                state.step = WizardStep::Results { request, offers };
            },
            Err(error) => tracing::debug!(%error, "Search not submitted"),
        }
        smallvec![Effect::None]
    }

    fn select_offer(
        state: &mut WizardState,
        offer_id: &OfferId,
        env: &WizardEnvironment,
    ) -> Effects {
        let WizardStep::Results { request, offers } = &state.step else {
            return Self::ignored(state, "SelectOffer");
        };

        let Some(offer) = offers.iter().find(|offer| &offer.id == offer_id).cloned() else {
            tracing::warn!(%offer_id, "Offer not in the listed results");
            return smallvec![Effect::None];
        };
        let request = request.clone();

        let seed = env.seat_seed();
        let seat_map = SeatMap::generate_seeded(&env.config.layout, offer.base_price, seed);
        tracing::info!(
            offer = %offer.id,
            operator = %offer.operator,
            seed,
            available = seat_map.available_count(),
            "Offer selected"
        );

        state.step = WizardStep::Seats {
            request,
            offer,
            seat_map,
        };
        smallvec![Effect::None]
    }

    fn toggle_seat(state: &mut WizardState, seat_id: SeatId) -> Effects {
        let WizardStep::Seats { seat_map, .. } = &mut state.step else {
            return Self::ignored(state, "ToggleSeat");
        };

        if seat_map.toggle(seat_id) {
            tracing::debug!(
                seat = %seat_id,
                selected = seat_map.selected_seats().len(),
                total = seat_map.total_price(),
                "Seat toggled"
            );
        } else {
            tracing::debug!(seat = %seat_id, "Seat is occupied or unknown");
        }
        smallvec![Effect::None]
    }

    fn continue_to_checkout(state: &mut WizardState) -> Effects {
        match std::mem::take(&mut state.step) {
            WizardStep::Seats {
                request,
                offer,
                seat_map,
            } if seat_map.has_selection() => {
                let form = CheckoutForm::new(seat_map.selected_seats());
                tracing::info!(seats = form.seats().len(), "Continuing to checkout");
                state.step = WizardStep::Checkout {
                    request,
                    offer,
                    seat_map,
                    form,
                    confirmation: None,
                };
                smallvec![Effect::None]
            },
            step => {
                state.step = step;
                Self::ignored(state, "ContinueToCheckout")
            },
        }
    }

    fn update_passenger(state: &mut WizardState, index: usize, update: PassengerUpdate) -> Effects {
        let WizardStep::Checkout {
            form,
            confirmation: None,
            ..
        } = &mut state.step
        else {
            return Self::ignored(state, "UpdatePassenger");
        };

        let field = update.field();
        match form.update(index, update) {
            Ok(()) => tracing::trace!(index, %field, "Passenger updated"),
            Err(error) => tracing::warn!(%error, "Passenger update rejected"),
        }
        smallvec![Effect::None]
    }

    fn submit_booking(state: &mut WizardState, env: &WizardEnvironment) -> Effects {
        let WizardStep::Checkout {
            form,
            confirmation,
            ..
        } = &mut state.step
        else {
            return Self::ignored(state, "SubmitBooking");
        };

        if let Some(existing) = confirmation.as_ref() {
            tracing::debug!(reference = %existing.reference, "Booking already confirmed");
            return smallvec![Effect::None];
        }

        match form.confirm(env.config.tax_rate, BookingReference::new()) {
            Ok(booking) => {
                let reference = booking.reference;
                tracing::info!(
                    %reference,
                    seats = booking.seats.len(),
                    subtotal = booking.breakdown.subtotal,
                    tax = booking.breakdown.tax,
                    total = booking.breakdown.total,
                    "Booking confirmed"
                );
                *confirmation = Some(booking);

                let notify = Self::notify(state, env, Notification::booking_successful());
                smallvec![
                    notify,
                    delay! {
                        duration: env.config.reset_delay(),
                        action: WizardAction::ResetAfterSuccess { reference }
                    }
                ]
            },
            Err(error) => {
                tracing::debug!(%error, "Booking incomplete");
                smallvec![Self::notify(state, env, Notification::incomplete_details())]
            },
        }
    }

    fn reset_after_success(state: &mut WizardState, reference: BookingReference) -> Effects {
        let pending = state
            .confirmation()
            .is_some_and(|confirmation| confirmation.reference == reference);

        if pending {
            tracing::info!(%reference, "Resetting wizard after booking");
            *state = WizardState::new();
        } else {
            tracing::debug!(%reference, "Reset no longer applies");
        }
        smallvec![Effect::None]
    }

    fn back(state: &mut WizardState, env: &WizardEnvironment) -> Effects {
        let previous = match std::mem::take(&mut state.step) {
            WizardStep::Results { request, .. } => WizardStep::Search {
                draft: SearchDraft::from(&request),
            },
            WizardStep::Seats { request, .. } => {
                let offers = env.catalog.offers(&request);
                WizardStep::Results { request, offers }
            },
            WizardStep::Checkout {
                request,
                offer,
                mut seat_map,
                confirmation: None,
                ..
            } => {
                seat_map.clear_selection();
                WizardStep::Seats {
                    request,
                    offer,
                    seat_map,
                }
            },
            step @ (WizardStep::Search { .. } | WizardStep::Checkout { .. }) => {
                state.step = step;
                return Self::ignored(state, "Back");
            },
        };
        state.step = previous;
        tracing::debug!(step = %state.step_kind(), "Went back");
        smallvec![Effect::None]
    }
}

impl Reducer for WizardReducer {
    type State = WizardState;
    type Action = WizardAction;
    type Environment = WizardEnvironment;

    #[tracing::instrument(skip_all, name = "wizard_reduce", fields(step = %state.step_kind()))]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Search ==========
            WizardAction::UpdateSearch(update) => {
                let WizardStep::Search { draft } = &mut state.step else {
                    return Self::ignored(state, "UpdateSearch");
                };
                draft.apply(update);
                smallvec![Effect::None]
            },
            WizardAction::SwapCities => {
                let WizardStep::Search { draft } = &mut state.step else {
                    return Self::ignored(state, "SwapCities");
                };
                draft.swap();
                smallvec![Effect::None]
            },
            WizardAction::SubmitSearch => Self::submit_search(state, env),

            // ========== Results ==========
            WizardAction::SelectOffer { offer_id } => Self::select_offer(state, &offer_id, env),

            // ========== Seats ==========
            WizardAction::ToggleSeat { seat_id } => Self::toggle_seat(state, seat_id),
            WizardAction::ContinueToCheckout => Self::continue_to_checkout(state),

            // ========== Checkout ==========
            WizardAction::UpdatePassenger { index, update } => {
                Self::update_passenger(state, index, update)
            },
            WizardAction::SubmitBooking => Self::submit_booking(state, env),
            WizardAction::ResetAfterSuccess { reference } => {
                Self::reset_after_success(state, reference)
            },

            // ========== Any step ==========
            WizardAction::Back => Self::back(state, env),
            WizardAction::DismissNotification => {
                state.notification = None;
                smallvec![Effect::None]
            },
        }
    }
}
