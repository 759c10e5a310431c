//! Tax and totals for a set of seats.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::seats::Seat;

/// Tax rate in basis points (1/100 of a percent)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Five percent
    pub const STANDARD: Self = Self(500);

    /// Rate from basis points, e.g. `500` for 5%
    #[must_use]
    pub const fn from_basis_points(basis_points: u32) -> Self {
        Self(basis_points)
    }

    /// Rate in basis points
    #[must_use]
    pub const fn basis_points(self) -> u32 {
        self.0
    }

    /// Tax on `subtotal`, rounded half up to a whole unit
    #[must_use]
    pub const fn tax_on(self, subtotal: u64) -> u64 {
        (subtotal.saturating_mul(self.0 as u64).saturating_add(5_000)) / 10_000
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

/// What a booking costs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Sum of seat fares
    pub subtotal: u64,
    /// Tax on the subtotal
    pub tax: u64,
    /// `subtotal + tax`
    pub total: u64,
}

impl PriceBreakdown {
    /// Breakdown for a subtotal
    #[must_use]
    pub const fn from_subtotal(subtotal: u64, rate: TaxRate) -> Self {
        let tax = rate.tax_on(subtotal);
        Self {
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }

    /// Breakdown for the given seats
    #[must_use]
    pub fn for_seats(seats: &[Seat], rate: TaxRate) -> Self {
        let subtotal = seats.iter().map(|seat| u64::from(seat.price)).sum();
        Self::from_subtotal(subtotal, rate)
    }
}

impl fmt::Display for PriceBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "subtotal {} + tax {} = {}",
            self.subtotal, self.tax, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seats::{SeatId, SeatPosition, SeatStatus};

    fn seat(column: u8, price: u32) -> Seat {
        let id = SeatId::new(1, column);
        Seat {
            id,
            number: id.number(),
            position: SeatPosition::for_column(column),
            status: SeatStatus::Selected,
            price,
        }
    }

    #[test]
    fn standard_tax_rounds_half_up() {
        let rate = TaxRate::STANDARD;
        assert_eq!(rate.tax_on(0), 0);
        assert_eq!(rate.tax_on(850), 43);
        assert_eq!(rate.tax_on(1700), 85);
        assert_eq!(rate.tax_on(2345), 117);
        assert_eq!(rate.tax_on(10), 1);
        assert_eq!(rate.tax_on(9), 0);
    }

    #[test]
    fn breakdown_for_two_seats() {
        let seats = [seat(1, 970), seat(2, 920)];
        let breakdown = PriceBreakdown::for_seats(&seats, TaxRate::default());
        assert_eq!(breakdown.subtotal, 1890);
        assert_eq!(breakdown.tax, 95);
        assert_eq!(breakdown.total, 1985);
        assert_eq!(breakdown.to_string(), "subtotal 1890 + tax 95 = 1985");
    }

    #[test]
    fn empty_selection_costs_nothing() {
        assert_eq!(PriceBreakdown::for_seats(&[], TaxRate::STANDARD), PriceBreakdown::default());
    }

    #[test]
    fn custom_rate() {
        let rate = TaxRate::from_basis_points(1250);
        assert_eq!(rate.to_string(), "12.50%");
        assert_eq!(PriceBreakdown::from_subtotal(1000, rate).total, 1125);
    }
}
