//! Walks one booking through the wizard from the command line.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin coachline-demo
//! ```
//!
//! Settings come from the environment (or a `.env` file), e.g.
//!
//! ```bash
//! COACHLINE_SEED=42 COACHLINE_RESET_DELAY_MS=500 RUST_LOG=coachline=trace \
//!   cargo run --bin coachline-demo
//! ```

use coachline::checkout::Gender;
use coachline::{
    BookingConfig, BookingError, CheckoutForm, OfferId, PassengerUpdate, SearchUpdate, SeatId,
    StepKind, WizardAction, WizardEnvironment, WizardReducer, WizardState,
};
use coachline_runtime::Store;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

type WizardStore = Store<WizardState, WizardAction, WizardEnvironment, WizardReducer>;

const TRAVELLERS: [(&str, u8, Gender, &str); 2] = [
    ("Asha Rao", 34, Gender::Female, "9800000001"),
    ("Vikram Rao", 36, Gender::Male, "9800000002"),
];

#[tokio::main]
async fn main() -> Result<(), BookingError> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coachline=debug,coachline_runtime=info".into()),
        )
        .init();

    let config = BookingConfig::from_env();
    config.validate()?;
    info!(?config, "=== Coachline booking demo ===");

    let reset_delay = config.reset_delay();
    let env = WizardEnvironment::production(config);
    let today = env.clock.today();
    let travel_date = today.succ_opt().unwrap_or(today);
    let store: WizardStore = Store::new(WizardState::new(), WizardReducer::new(), env);

    // Search
    for update in [
        SearchUpdate::Origin("Pune".to_string()),
        SearchUpdate::Destination("Mumbai".to_string()),
        SearchUpdate::Date(travel_date),
        SearchUpdate::Passengers(2),
    ] {
        store.send(WizardAction::UpdateSearch(update)).await?;
    }
    store.send(WizardAction::SubmitSearch).await?;
    expect_step(&store, StepKind::Results).await?;

    let offers = store.state(|s| s.offers().to_vec()).await;
    println!("\nBuses from Pune to Mumbai on {travel_date}:");
    for offer in &offers {
        println!(
            "  [{}] {:<16} {} -> {}  {:>7}  {:<11} {:>4}  {} seats  ★{}",
            offer.id,
            offer.operator,
            offer.departure.format("%H:%M"),
            offer.arrival.format("%H:%M"),
            offer.duration,
            offer.seating_class,
            offer.base_price,
            offer.seats_available,
            offer.rating,
        );
    }

    // Seats
    store
        .send(WizardAction::SelectOffer {
            offer_id: OfferId::new("2"),
        })
        .await?;
    expect_step(&store, StepKind::Seats).await?;

    let free: Vec<SeatId> = store
        .state(|s| {
            s.seat_map()
                .map(|map| {
                    map.seats()
                        .iter()
                        .filter(|seat| !seat.is_occupied())
                        .take(TRAVELLERS.len())
                        .map(|seat| seat.id)
                        .collect()
                })
                .unwrap_or_default()
        })
        .await;
    for seat_id in free {
        store.send(WizardAction::ToggleSeat { seat_id }).await?;
    }

    if let Some(map) = store.state(|s| s.seat_map().cloned()).await {
        println!("\nSeat map ([x] taken, [*] yours):\n{map}");
        println!("Seat total: {}", map.total_price());
    }

    // Checkout
    store.send(WizardAction::ContinueToCheckout).await?;
    expect_step(&store, StepKind::Checkout).await?;

    let seats = store
        .state(|s| s.checkout_form().map(|form| form.passengers().len()).unwrap_or(0))
        .await;
    for (index, (name, age, gender, phone)) in TRAVELLERS.into_iter().enumerate().take(seats) {
        for update in [
            PassengerUpdate::Name(name.to_string()),
            PassengerUpdate::Age(Some(age)),
            PassengerUpdate::Gender(Some(gender)),
            PassengerUpdate::Phone(phone.to_string()),
        ] {
            store.send(WizardAction::UpdatePassenger { index, update }).await?;
        }
    }
    store
        .send(WizardAction::UpdatePassenger {
            index: 0,
            update: PassengerUpdate::Email("asha@example.com".to_string()),
        })
        .await?;

    let mut booking = store.send(WizardAction::SubmitBooking).await?;
    let confirmation = store.state(|s| s.confirmation().cloned()).await;
    let Some(confirmation) = confirmation else {
        let problem = store.state(|s| s.checkout_form().map(CheckoutForm::validate)).await;
        return Err(match problem {
            Some(Err(error)) => error.into(),
            _ => BookingError::UnexpectedStep {
                expected: StepKind::Checkout,
                actual: store.state(WizardState::step_kind).await,
            },
        });
    };
    println!("\nBooking confirmed:\n{}", serde_json::to_string_pretty(&confirmation)?);
    println!("Total: {}", confirmation.breakdown);

    // The handle stays pending until the scheduled reset has run.
    booking
        .wait_with_timeout(reset_delay + Duration::from_secs(5))
        .await?;
    expect_step(&store, StepKind::Search).await?;
    info!("Wizard reset, ready for the next booking");

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}

async fn expect_step(store: &WizardStore, expected: StepKind) -> Result<(), BookingError> {
    let actual = store.state(WizardState::step_kind).await;
    if actual == expected {
        Ok(())
    } else {
        Err(BookingError::UnexpectedStep { expected, actual })
    }
}
