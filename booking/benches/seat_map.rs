//! Seat map and wizard reducer benchmarks
//!
//! Run with: `cargo bench -p coachline`

#![allow(missing_docs)] // Benchmarks don't need extensive docs
#![allow(clippy::expect_used, clippy::unwrap_used)] // Benchmarks can use expect for setup

use chrono::NaiveDate;
use coachline::catalog::StaticCatalog;
use coachline::notification::RecordingNotifier;
use coachline::{
    BookingConfig, OfferId, SearchUpdate, SeatId, SeatLayout, SeatMap, WizardAction,
    WizardEnvironment, WizardReducer, WizardState,
};
use coachline_core::environment::{Clock, SeedSource};
use coachline_core::reducer::Reducer;
use coachline_core::{DateTime, Utc};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;

struct BenchClock;

impl Clock for BenchClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap()
    }
}

struct BenchSeed;

impl SeedSource for BenchSeed {
    fn next_seed(&self) -> u64 {
        17
    }
}

fn bench_env() -> WizardEnvironment {
    WizardEnvironment::new(
        Arc::new(BenchClock),
        Arc::new(BenchSeed),
        Arc::new(StaticCatalog::new()),
        Arc::new(RecordingNotifier::new()),
        BookingConfig::default(),
    )
}

fn benchmark_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("seat_map_generation");

    for rows in [12u8, 48] {
        let layout = SeatLayout {
            rows,
            ..SeatLayout::default()
        };
        group.bench_function(format!("{rows}_rows"), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(SeatMap::generate_seeded(&layout, black_box(920), seed))
            });
        });
    }

    group.finish();
}

fn benchmark_selection(c: &mut Criterion) {
    let map = SeatMap::generate_seeded(&SeatLayout::default(), 920, 3);

    c.bench_function("toggle_and_total", |b| {
        b.iter_batched(
            || map.clone(),
            |mut map| {
                for row in 1..=12 {
                    map.toggle(SeatId::new(row, 1));
                }
                black_box(map.total_price())
            },
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_reducer(c: &mut Criterion) {
    let env = bench_env();
    let reducer = WizardReducer::new();

    let travel_date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    let mut results = WizardState::new();
    for action in [
        WizardAction::UpdateSearch(SearchUpdate::Origin("Pune".to_string())),
        WizardAction::UpdateSearch(SearchUpdate::Destination("Mumbai".to_string())),
        WizardAction::UpdateSearch(SearchUpdate::Date(travel_date)),
        WizardAction::SubmitSearch,
    ] {
        reducer.reduce(&mut results, action, &env);
    }

    c.bench_function("reducer_select_offer", |b| {
        b.iter_batched(
            || results.clone(),
            |mut state| {
                reducer.reduce(
                    &mut state,
                    WizardAction::SelectOffer {
                        offer_id: OfferId::new("2"),
                    },
                    &env,
                );
                state
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("reducer_swap_cities", |b| {
        let mut state = WizardState::new();
        b.iter(|| black_box(reducer.reduce(&mut state, WizardAction::SwapCities, &env)));
    });
}

criterion_group!(benches, benchmark_generation, benchmark_selection, benchmark_reducer);
criterion_main!(benches);
