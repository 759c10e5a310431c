//! Store-driven tests of the whole booking flow
//!
//! These run the wizard reducer inside the real runtime, so the notification
//! future and the delayed reset are actually executed.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can panic

use chrono::NaiveDate;
use coachline::checkout::Gender;
use coachline::notification::RecordingNotifier;
use coachline::seats::SeatLayout;
use coachline::{
    BookingConfig, OfferId, PassengerUpdate, SearchUpdate, SeatId, Severity, StaticCatalog,
    StepKind, WizardAction, WizardEnvironment, WizardReducer, WizardState,
};
use coachline_runtime::{Store, StoreError};
use coachline_testing::{FixedSeed, init_test_tracing, test_clock};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

type WizardStore = Store<WizardState, WizardAction, WizardEnvironment, WizardReducer>;

// ============================================================================
// Test Fixtures
// ============================================================================

const RESET_DELAY_MS: u64 = 50;

fn setup() -> (WizardStore, Arc<RecordingNotifier>) {
    init_test_tracing();

    let notifier = Arc::new(RecordingNotifier::new());
    let config = BookingConfig {
        layout: SeatLayout {
            occupancy_probability: 0.0,
            ..SeatLayout::default()
        },
        reset_delay_ms: RESET_DELAY_MS,
        ..BookingConfig::default()
    };
    let env = WizardEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(FixedSeed(2024)),
        Arc::new(StaticCatalog::new()),
        Arc::clone(&notifier) as Arc<dyn coachline::notification::Notifier>,
        config,
    );

    (Store::new(WizardState::new(), WizardReducer::new(), env), notifier)
}

async fn send_all(store: &WizardStore, actions: impl IntoIterator<Item = WizardAction>) {
    for action in actions {
        assert_ok!(store.send(action).await);
    }
}

/// Pune to Mumbai tomorrow, Royal Coach, seats 1A and 1B
async fn reach_checkout(store: &WizardStore) {
    let tomorrow = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    send_all(
        store,
        [
            WizardAction::UpdateSearch(SearchUpdate::Origin("Pune".to_string())),
            WizardAction::UpdateSearch(SearchUpdate::Destination("Mumbai".to_string())),
            WizardAction::UpdateSearch(SearchUpdate::Date(tomorrow)),
            WizardAction::UpdateSearch(SearchUpdate::Passengers(2)),
            WizardAction::SubmitSearch,
        ],
    )
    .await;
    assert_eq!(store.state(WizardState::step_kind).await, StepKind::Results);

    send_all(
        store,
        [WizardAction::SelectOffer {
            offer_id: OfferId::new("2"),
        }],
    )
    .await;
    assert_eq!(store.state(|s| s.offer().map(|o| o.base_price)).await, Some(920));

    send_all(
        store,
        [
            WizardAction::ToggleSeat {
                seat_id: SeatId::new(1, 1),
            },
            WizardAction::ToggleSeat {
                seat_id: SeatId::new(1, 2),
            },
        ],
    )
    .await;
    let total = store.state(|s| s.seat_map().map(coachline::SeatMap::total_price)).await;
    assert_eq!(total, Some(1890));

    send_all(store, [WizardAction::ContinueToCheckout]).await;
    assert_eq!(store.state(WizardState::step_kind).await, StepKind::Checkout);
}

async fn fill_passengers(store: &WizardStore) {
    for (index, name) in ["Asha Rao", "Vikram Rao"].into_iter().enumerate() {
        send_all(
            store,
            [
                PassengerUpdate::Name(name.to_string()),
                PassengerUpdate::Age(Some(35)),
                PassengerUpdate::Gender(Some(Gender::Female)),
                PassengerUpdate::Phone("9800000000".to_string()),
            ]
            .map(|update| WizardAction::UpdatePassenger { index, update }),
        )
        .await;
    }
    send_all(
        store,
        [WizardAction::UpdatePassenger {
            index: 0,
            update: PassengerUpdate::Email("asha@example.com".to_string()),
        }],
    )
    .await;
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn booking_succeeds_then_wizard_resets() {
    let (store, notifier) = setup();
    reach_checkout(&store).await;
    fill_passengers(&store).await;

    let mut handle = store.send(WizardAction::SubmitBooking).await.unwrap();

    let confirmation = store.state(|s| s.confirmation().cloned()).await.unwrap();
    assert_eq!(confirmation.breakdown.subtotal, 1890);
    assert_eq!(confirmation.breakdown.tax, 95);
    assert_eq!(confirmation.breakdown.total, 1985);
    let numbers: Vec<_> = confirmation.seats.iter().map(|s| s.number.clone()).collect();
    assert_eq!(numbers, ["1A", "1B"]);

    handle.wait_with_timeout(Duration::from_secs(2)).await.unwrap();

    let state = store.state(|s| s.clone()).await;
    assert_eq!(state, WizardState::new());

    let received = notifier.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].title, "Booking Successful!");
    assert_eq!(received[0].severity, Severity::Success);
}

#[tokio::test]
async fn state_is_kept_until_the_delay_expires() {
    let (store, _notifier) = setup();
    reach_checkout(&store).await;
    fill_passengers(&store).await;

    let _handle = store.send(WizardAction::SubmitBooking).await.unwrap();
    tokio::time::sleep(Duration::from_millis(RESET_DELAY_MS / 5)).await;

    assert_eq!(store.state(WizardState::step_kind).await, StepKind::Checkout);
    assert!(store.state(|s| s.confirmation().is_some()).await);
}

#[tokio::test]
async fn reset_action_is_observable() {
    let (store, _notifier) = setup();
    reach_checkout(&store).await;
    fill_passengers(&store).await;

    let reset = store
        .send_and_wait_for(
            WizardAction::SubmitBooking,
            |action| matches!(action, WizardAction::ResetAfterSuccess { .. }),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    assert!(
        matches!(reset, WizardAction::ResetAfterSuccess { .. }),
        "expected a reset, got {reset:?}"
    );
}

#[tokio::test]
async fn incomplete_booking_notifies_once_and_schedules_nothing() {
    let (store, notifier) = setup();
    reach_checkout(&store).await;

    let mut handle = store.send(WizardAction::SubmitBooking).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    assert_eq!(store.state(WizardState::step_kind).await, StepKind::Checkout);
    assert!(store.state(|s| s.confirmation().is_none()).await);

    let received = notifier.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].title, "Incomplete Details");
    assert_eq!(received[0].description, "Please fill in all passenger details");
    assert_eq!(received[0].severity, Severity::Error);

    let waited = store
        .send_and_wait_for(
            WizardAction::SubmitBooking,
            |action| matches!(action, WizardAction::ResetAfterSuccess { .. }),
            Duration::from_millis(RESET_DELAY_MS * 3),
        )
        .await;
    assert_eq!(waited, Err(StoreError::Timeout));
}

#[tokio::test]
async fn back_from_checkout_keeps_the_seat_map() {
    let (store, _notifier) = setup();
    reach_checkout(&store).await;

    send_all(&store, [WizardAction::Back]).await;

    assert_eq!(store.state(WizardState::step_kind).await, StepKind::Seats);
    let map = store.state(|s| s.seat_map().cloned()).await.unwrap();
    assert_eq!(map.seed(), Some(2024));
    assert!(map.selected_seats().is_empty());
    assert_eq!(store.state(|s| s.request().map(|r| r.passengers)).await, Some(2));
}

#[tokio::test]
async fn shutdown_waits_for_the_pending_reset() {
    let (store, _notifier) = setup();
    reach_checkout(&store).await;
    fill_passengers(&store).await;

    let _handle = store.send(WizardAction::SubmitBooking).await.unwrap();
    assert!(store.pending_effects() > 0);

    store.shutdown(Duration::from_secs(2)).await.unwrap();
    assert_eq!(store.pending_effects(), 0);

    assert_err!(store.send(WizardAction::SwapCities).await);
}
