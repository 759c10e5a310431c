//! Seat map generation and seat selection.
//!
//! A seat map is generated once per chosen offer from a seeded generator, so
//! the same seed always yields the same occupancy. After generation only
//! [`SeatMap::toggle`] and [`SeatMap::clear_selection`] change it.
//!
//! ```text
//!  1A 1B  1  1C 1D
//!  2A 2B  2  2C 2D
//!  ..
//! ```
//!
//! Columns 1 and 4 are window seats, 2 and 3 aisle seats. [`SeatPosition`]
//! also has a `Middle` class for any other column, which a four-column row
//! never reaches.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Seats in every row
pub const SEATS_PER_ROW: u8 = 4;

/// Identifier of a seat: its row and column, both counted from 1
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatId {
    row: u8,
    column: u8,
}

impl SeatId {
    /// Seat at `row`, `column`
    #[must_use]
    pub const fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// Row number, from 1
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Column number, from 1
    #[must_use]
    pub const fn column(self) -> u8 {
        self.column
    }

    /// Label printed on the seat, e.g. `"3C"`
    #[must_use]
    pub fn number(self) -> String {
        let letter = char::from(b'A'.saturating_add(self.column.saturating_sub(1)));
        format!("{}{letter}", self.row)
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.column)
    }
}

/// A seat identifier that could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid seat id {0:?}, expected \"<row>-<column>\"")]
pub struct ParseSeatIdError(String);

impl FromStr for SeatId {
    type Err = ParseSeatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSeatIdError(s.to_string());
        let (row, column) = s.split_once('-').ok_or_else(invalid)?;
        let row = row.parse().map_err(|_| invalid())?;
        let column = column.parse().map_err(|_| invalid())?;
        Ok(Self::new(row, column))
    }
}

/// Where a seat sits in its row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatPosition {
    /// Next to a window
    Window,
    /// Next to the aisle
    Aisle,
    /// Between two seats
    Middle,
}

impl SeatPosition {
    /// Position class for a column
    #[must_use]
    pub const fn for_column(column: u8) -> Self {
        match column {
            1 | 4 => Self::Window,
            2 | 3 => Self::Aisle,
            _ => Self::Middle,
        }
    }
}

/// Booking state of a seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Free to pick
    Available,
    /// Taken by someone else; never changes
    Occupied,
    /// Picked by the traveller
    Selected,
}

/// One seat of a generated map
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Row and column
    pub id: SeatId,
    /// Printed label, e.g. `"1A"`
    pub number: String,
    /// Window, aisle or middle
    pub position: SeatPosition,
    /// Current status
    pub status: SeatStatus,
    /// Fare for this seat
    pub price: u32,
}

impl Seat {
    /// Whether the traveller picked this seat
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.status == SeatStatus::Selected
    }

    /// Whether the seat is taken
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.status == SeatStatus::Occupied
    }
}

/// Shape and pricing rules for generated seat maps
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeatLayout {
    /// Number of rows
    pub rows: u8,
    /// Chance that any one seat is already occupied, between 0 and 1
    pub occupancy_probability: f64,
    /// Extra charge for window seats
    pub window_surcharge: u32,
}

impl Default for SeatLayout {
    fn default() -> Self {
        Self {
            rows: 12,
            occupancy_probability: 0.3,
            window_surcharge: 50,
        }
    }
}

impl SeatLayout {
    /// Fare of a seat in the given position
    #[must_use]
    pub const fn price_for(&self, position: SeatPosition, base_price: u32) -> u32 {
        match position {
            SeatPosition::Window => base_price.saturating_add(self.window_surcharge),
            SeatPosition::Aisle | SeatPosition::Middle => base_price,
        }
    }

    /// Occupancy probability clamped into `[0, 1]` (NaN counts as 0)
    fn occupancy(&self) -> f64 {
        if self.occupancy_probability.is_nan() {
            0.0
        } else {
            self.occupancy_probability.clamp(0.0, 1.0)
        }
    }
}

/// The seats of one bus
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMap {
    seed: Option<u64>,
    seats: Vec<Seat>,
}

impl SeatMap {
    /// Generate a map, drawing occupancy from `rng`
    ///
    /// Seats are laid out row by row, left to right. Each seat is occupied
    /// independently with the layout's occupancy probability.
    pub fn generate<G: Rng + ?Sized>(layout: &SeatLayout, base_price: u32, rng: &mut G) -> Self {
        let occupancy = layout.occupancy();
        let mut seats = Vec::with_capacity(usize::from(layout.rows) * usize::from(SEATS_PER_ROW));

        for row in 1..=layout.rows {
            for column in 1..=SEATS_PER_ROW {
                let id = SeatId::new(row, column);
                let position = SeatPosition::for_column(column);
                let status = if rng.gen_bool(occupancy) {
                    SeatStatus::Occupied
                } else {
                    SeatStatus::Available
                };

                seats.push(Seat {
                    id,
                    number: id.number(),
                    position,
                    status,
                    price: layout.price_for(position, base_price),
                });
            }
        }

        Self { seed: None, seats }
    }

    /// Generate a map from a seed; the same seed always gives the same map
    #[must_use]
    pub fn generate_seeded(layout: &SeatLayout, base_price: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut map = Self::generate(layout, base_price, &mut rng);
        map.seed = Some(seed);
        map
    }

    /// Seed the map was generated from, if it was generated with
    /// [`SeatMap::generate_seeded`]
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// All seats, row by row
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Seats grouped into rows
    pub fn rows(&self) -> impl Iterator<Item = &[Seat]> {
        self.seats.chunks(usize::from(SEATS_PER_ROW))
    }

    /// Look up one seat
    #[must_use]
    pub fn get(&self, id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.id == id)
    }

    /// Flip a seat between available and selected
    ///
    /// Occupied and unknown seats are left alone. Returns whether anything
    /// changed.
    pub fn toggle(&mut self, id: SeatId) -> bool {
        let Some(seat) = self.seats.iter_mut().find(|seat| seat.id == id) else {
            return false;
        };

        seat.status = match seat.status {
            SeatStatus::Occupied => return false,
            SeatStatus::Available => SeatStatus::Selected,
            SeatStatus::Selected => SeatStatus::Available,
        };
        true
    }

    /// Return every selected seat to available
    pub fn clear_selection(&mut self) {
        for seat in &mut self.seats {
            if seat.is_selected() {
                seat.status = SeatStatus::Available;
            }
        }
    }

    /// Selected seats in map order
    #[must_use]
    pub fn selected_seats(&self) -> Vec<Seat> {
        self.seats.iter().filter(|seat| seat.is_selected()).cloned().collect()
    }

    /// Whether any seat is selected
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.seats.iter().any(Seat::is_selected)
    }

    /// Sum of the selected seats' fares
    ///
    /// Summed as `u64`, so even fares saturated at `u32::MAX` cannot overflow.
    #[must_use]
    pub fn total_price(&self) -> u64 {
        self.seats
            .iter()
            .filter(|seat| seat.is_selected())
            .map(|seat| u64::from(seat.price))
            .sum()
    }

    /// Seats that are not occupied
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.seats.iter().filter(|seat| !seat.is_occupied()).count()
    }
}

impl fmt::Display for SeatMap {
    /// One line per row: `[ ]` available, `[x]` occupied, `[*]` selected,
    /// with the row number in the aisle
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = usize::from(SEATS_PER_ROW / 2);
        for (index, row) in self.rows().enumerate() {
            for (column, seat) in row.iter().enumerate() {
                if column == half {
                    write!(f, " {:>2} ", index + 1)?;
                }
                let mark = match seat.status {
                    SeatStatus::Available => ' ',
                    SeatStatus::Occupied => 'x',
                    SeatStatus::Selected => '*',
                };
                write!(f, "{:>3}[{mark}]", seat.number)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_layout() -> SeatLayout {
        SeatLayout {
            occupancy_probability: 0.0,
            ..SeatLayout::default()
        }
    }

    #[test]
    fn default_map_has_twelve_rows_of_four() {
        let map = SeatMap::generate_seeded(&SeatLayout::default(), 920, 1);
        assert_eq!(map.seats().len(), 48);
        assert_eq!(map.rows().count(), 12);
        assert!(map.rows().all(|row| row.len() == 4));
        assert_eq!(map.seed(), Some(1));
    }

    #[test]
    fn ids_numbers_and_positions_follow_the_grid() {
        let map = SeatMap::generate_seeded(&open_layout(), 920, 0);
        let seat = map.get(SeatId::new(1, 1)).unwrap();
        assert_eq!(seat.number, "1A");
        assert_eq!(seat.position, SeatPosition::Window);
        assert_eq!(seat.price, 970);

        let seat = map.get(SeatId::new(1, 2)).unwrap();
        assert_eq!(seat.number, "1B");
        assert_eq!(seat.position, SeatPosition::Aisle);
        assert_eq!(seat.price, 920);

        let seat = map.get(SeatId::new(12, 4)).unwrap();
        assert_eq!(seat.number, "12D");
        assert_eq!(seat.position, SeatPosition::Window);
    }

    #[test]
    fn four_columns_never_produce_middle_seats() {
        let map = SeatMap::generate_seeded(&SeatLayout::default(), 780, 99);
        assert!(map.seats().iter().all(|s| s.position != SeatPosition::Middle));
        assert_eq!(SeatPosition::for_column(5), SeatPosition::Middle);
    }

    #[test]
    fn same_seed_same_map() {
        let layout = SeatLayout::default();
        assert_eq!(
            SeatMap::generate_seeded(&layout, 850, 1234),
            SeatMap::generate_seeded(&layout, 850, 1234)
        );
    }

    #[test]
    fn occupancy_extremes() {
        let full = SeatLayout {
            occupancy_probability: 1.0,
            ..SeatLayout::default()
        };
        let map = SeatMap::generate_seeded(&full, 850, 5);
        assert!(map.seats().iter().all(Seat::is_occupied));
        assert_eq!(map.available_count(), 0);

        let map = SeatMap::generate_seeded(&open_layout(), 850, 5);
        assert_eq!(map.available_count(), 48);
    }

    #[test]
    fn out_of_range_probability_is_clamped() {
        let weird = SeatLayout {
            occupancy_probability: f64::NAN,
            ..SeatLayout::default()
        };
        let map = SeatMap::generate_seeded(&weird, 850, 5);
        assert_eq!(map.available_count(), 48);

        let weird = SeatLayout {
            occupancy_probability: 7.5,
            ..SeatLayout::default()
        };
        let map = SeatMap::generate_seeded(&weird, 850, 5);
        assert_eq!(map.available_count(), 0);
    }

    #[test]
    fn toggle_flips_and_restores() {
        let mut map = SeatMap::generate_seeded(&open_layout(), 920, 0);
        let id = SeatId::new(3, 2);

        assert!(map.toggle(id));
        assert!(map.get(id).unwrap().is_selected());
        assert_eq!(map.total_price(), 920);

        assert!(map.toggle(id));
        assert_eq!(map.get(id).unwrap().status, SeatStatus::Available);
        assert_eq!(map.total_price(), 0);
    }

    #[test]
    fn occupied_and_unknown_seats_do_not_toggle() {
        let full = SeatLayout {
            occupancy_probability: 1.0,
            ..SeatLayout::default()
        };
        let mut map = SeatMap::generate_seeded(&full, 920, 0);
        let before = map.clone();

        assert!(!map.toggle(SeatId::new(1, 1)));
        assert!(!map.toggle(SeatId::new(40, 1)));
        assert_eq!(map, before);
    }

    #[test]
    fn selection_totals_and_clearing() {
        let mut map = SeatMap::generate_seeded(&open_layout(), 920, 0);
        map.toggle(SeatId::new(1, 1));
        map.toggle(SeatId::new(1, 2));

        let selected = map.selected_seats();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].number, "1A");
        assert_eq!(map.total_price(), 1890);
        assert!(map.has_selection());

        map.clear_selection();
        assert!(!map.has_selection());
        assert_eq!(map.total_price(), 0);
    }

    #[test]
    fn saturated_window_fares_total_without_overflow() {
        let layout = SeatLayout {
            occupancy_probability: 0.0,
            window_surcharge: u32::MAX,
            ..SeatLayout::default()
        };
        let mut map = SeatMap::generate_seeded(&layout, 920, 0);
        map.toggle(SeatId::new(1, 1));
        map.toggle(SeatId::new(1, 4));
        map.toggle(SeatId::new(1, 2));

        assert_eq!(map.get(SeatId::new(1, 1)).unwrap().price, u32::MAX);
        assert_eq!(map.total_price(), 2 * u64::from(u32::MAX) + 920);
    }

    #[test]
    fn seat_id_parses_and_displays() {
        let id: SeatId = "1-2".parse().unwrap();
        assert_eq!(id, SeatId::new(1, 2));
        assert_eq!(id.to_string(), "1-2");
        assert!("12".parse::<SeatId>().is_err());
        assert!("a-b".parse::<SeatId>().is_err());
    }

    #[test]
    fn display_marks_statuses() {
        let mut map = SeatMap::generate_seeded(&open_layout(), 920, 0);
        map.toggle(SeatId::new(1, 1));
        let rendered = map.to_string();
        let first = rendered.lines().next().unwrap();
        assert!(first.contains("1A[*]"));
        assert!(first.contains("1D[ ]"));
        assert_eq!(rendered.lines().count(), 12);
    }
}
