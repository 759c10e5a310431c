//! Passenger details and the booking confirmation.
//!
//! The form holds one [`PassengerRecord`] per selected seat, in seat order.
//! Records are edited one field at a time through [`PassengerUpdate`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::pricing::{PriceBreakdown, TaxRate};
use crate::seats::Seat;

/// Passenger gender as offered on the form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other
    Other,
}

/// A field of [`PassengerRecord`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassengerField {
    /// Full name
    Name,
    /// Age in years
    Age,
    /// Gender
    Gender,
    /// Phone number
    Phone,
    /// Email address
    Email,
}

impl fmt::Display for PassengerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Phone => "phone",
            Self::Email => "email",
        };
        f.write_str(label)
    }
}

/// One edit to a passenger record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassengerUpdate {
    /// Set the full name
    Name(String),
    /// Set or clear the age
    Age(Option<u8>),
    /// Set or clear the gender
    Gender(Option<Gender>),
    /// Set the phone number
    Phone(String),
    /// Set the email address
    Email(String),
}

impl PassengerUpdate {
    /// Field this update writes
    #[must_use]
    pub const fn field(&self) -> PassengerField {
        match self {
            Self::Name(_) => PassengerField::Name,
            Self::Age(_) => PassengerField::Age,
            Self::Gender(_) => PassengerField::Gender,
            Self::Phone(_) => PassengerField::Phone,
            Self::Email(_) => PassengerField::Email,
        }
    }
}

/// Details of one traveller
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerRecord {
    /// Full name
    pub name: String,
    /// Age in years
    pub age: Option<u8>,
    /// Gender
    pub gender: Option<Gender>,
    /// Phone number
    pub phone: String,
    /// Email address; only the lead passenger must give one
    pub email: String,
}

impl PassengerRecord {
    /// Apply one edit
    pub fn apply(&mut self, update: PassengerUpdate) {
        match update {
            PassengerUpdate::Name(name) => self.name = name,
            PassengerUpdate::Age(age) => self.age = age,
            PassengerUpdate::Gender(gender) => self.gender = gender,
            PassengerUpdate::Phone(phone) => self.phone = phone,
            PassengerUpdate::Email(email) => self.email = email,
        }
    }

    /// First required field left blank, in form order
    ///
    /// Text counts as blank when it is empty after trimming.
    #[must_use]
    pub fn missing_field(&self, require_email: bool) -> Option<PassengerField> {
        if self.name.trim().is_empty() {
            Some(PassengerField::Name)
        } else if self.age.is_none() {
            Some(PassengerField::Age)
        } else if self.gender.is_none() {
            Some(PassengerField::Gender)
        } else if self.phone.trim().is_empty() {
            Some(PassengerField::Phone)
        } else if require_email && self.email.trim().is_empty() {
            Some(PassengerField::Email)
        } else {
            None
        }
    }
}

/// Problems with the passenger form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// A required field is blank
    #[error("passenger {} is missing their {field}", .index + 1)]
    IncompletePassenger {
        /// Zero-based passenger index
        index: usize,
        /// The first blank field
        field: PassengerField,
    },

    /// An edit addressed a passenger that does not exist
    #[error("no passenger at index {index} (form has {count})")]
    UnknownPassenger {
        /// Requested index
        index: usize,
        /// Number of passengers on the form
        count: usize,
    },

    /// The form was opened without any seats
    #[error("no seats selected")]
    NoSeats,
}

/// Reference handed to the traveller after a successful booking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingReference(Uuid);

impl BookingReference {
    /// Fresh random reference
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing identifier
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Underlying identifier
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BookingReference {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Record of a successful booking
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// Booking reference
    pub reference: BookingReference,
    /// Booked seats
    pub seats: Vec<Seat>,
    /// Travellers, one per seat
    pub passengers: Vec<PassengerRecord>,
    /// What the booking cost
    pub breakdown: PriceBreakdown,
}

/// Passenger form for the checkout step
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    seats: Vec<Seat>,
    passengers: Vec<PassengerRecord>,
}

impl CheckoutForm {
    /// Blank form with one record per seat
    #[must_use]
    pub fn new(seats: Vec<Seat>) -> Self {
        let passengers = vec![PassengerRecord::default(); seats.len()];
        Self { seats, passengers }
    }

    /// Seats being booked
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Passenger records, index-aligned with [`CheckoutForm::seats`]
    #[must_use]
    pub fn passengers(&self) -> &[PassengerRecord] {
        &self.passengers
    }

    /// Edit the record at `index`
    ///
    /// # Errors
    ///
    /// [`CheckoutError::UnknownPassenger`] if `index` is out of range; the
    /// form is unchanged.
    pub fn update(&mut self, index: usize, update: PassengerUpdate) -> Result<(), CheckoutError> {
        let count = self.passengers.len();
        let record = self
            .passengers
            .get_mut(index)
            .ok_or(CheckoutError::UnknownPassenger { index, count })?;
        record.apply(update);
        Ok(())
    }

    /// Check every record
    ///
    /// # Errors
    ///
    /// The first incomplete passenger, or [`CheckoutError::NoSeats`] for an
    /// empty form.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.seats.is_empty() {
            return Err(CheckoutError::NoSeats);
        }

        for (index, record) in self.passengers.iter().enumerate() {
            if let Some(field) = record.missing_field(index == 0) {
                return Err(CheckoutError::IncompletePassenger { index, field });
            }
        }
        Ok(())
    }

    /// Prices for the seats on this form
    #[must_use]
    pub fn breakdown(&self, rate: TaxRate) -> PriceBreakdown {
        PriceBreakdown::for_seats(&self.seats, rate)
    }

    /// Validate and produce the confirmation
    ///
    /// # Errors
    ///
    /// Whatever [`CheckoutForm::validate`] reports.
    pub fn confirm(
        &self,
        rate: TaxRate,
        reference: BookingReference,
    ) -> Result<BookingConfirmation, CheckoutError> {
        self.validate()?;
        Ok(BookingConfirmation {
            reference,
            seats: self.seats.clone(),
            passengers: self.passengers.clone(),
            breakdown: self.breakdown(rate),
        })
    }
}
