//! Search collector: the first wizard step.
//!
//! Holds the draft of a trip search while the traveller fills it in and turns
//! it into a [`SearchRequest`] once every field is present.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A completed search, read-only for the rest of the wizard
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Departure city
    pub origin: String,
    /// Arrival city
    pub destination: String,
    /// Day of travel (never before the day the search was submitted)
    pub date: NaiveDate,
    /// Number of travellers, at least one
    pub passengers: u32,
}

/// Why a draft cannot be submitted yet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Origin city is blank
    #[error("origin city is required")]
    MissingOrigin,

    /// Destination city is blank
    #[error("destination city is required")]
    MissingDestination,

    /// No travel date picked
    #[error("travel date is required")]
    MissingDate,

    /// Travel date lies before today
    #[error("travel date {date} is before today ({today})")]
    DateInPast {
        /// Requested date
        date: NaiveDate,
        /// Current date
        today: NaiveDate,
    },

    /// Passenger count of zero
    #[error("at least one passenger is required")]
    NoPassengers,
}

/// A single edit to the search form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchUpdate {
    /// Set the departure city
    Origin(String),
    /// Set the arrival city
    Destination(String),
    /// Pick a travel date
    Date(NaiveDate),
    /// Clear the picked date
    ClearDate,
    /// Set the passenger count
    Passengers(u32),
}

/// Search form contents while it is being filled in
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDraft {
    /// Departure city as typed
    pub origin: String,
    /// Arrival city as typed
    pub destination: String,
    /// Picked travel date, if any
    pub date: Option<NaiveDate>,
    /// Passenger count
    pub passengers: u32,
}

impl Default for SearchDraft {
    fn default() -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            date: None,
            passengers: 1,
        }
    }
}

impl SearchDraft {
    /// Empty draft for one passenger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one form edit
    pub fn apply(&mut self, update: SearchUpdate) {
        match update {
            SearchUpdate::Origin(origin) => self.origin = origin,
            SearchUpdate::Destination(destination) => self.destination = destination,
            SearchUpdate::Date(date) => self.date = Some(date),
            SearchUpdate::ClearDate => self.date = None,
            SearchUpdate::Passengers(passengers) => self.passengers = passengers,
        }
    }

    /// Exchange origin and destination
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.origin, &mut self.destination);
    }

    /// Whether [`SearchDraft::submit`] would succeed
    #[must_use]
    pub fn is_complete(&self, today: NaiveDate) -> bool {
        self.submit(today).is_ok()
    }

    /// Build the request, or report the first missing field
    ///
    /// City names are trimmed; a name made only of whitespace counts as blank.
    /// Travelling on `today` itself is accepted; only earlier dates are
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`] naming the first field that is missing or
    /// out of range.
    pub fn submit(&self, today: NaiveDate) -> Result<SearchRequest, SearchError> {
        let origin = self.origin.trim();
        if origin.is_empty() {
            return Err(SearchError::MissingOrigin);
        }

        let destination = self.destination.trim();
        if destination.is_empty() {
            return Err(SearchError::MissingDestination);
        }

        let date = self.date.ok_or(SearchError::MissingDate)?;
        if date < today {
            return Err(SearchError::DateInPast { date, today });
        }

        if self.passengers == 0 {
            return Err(SearchError::NoPassengers);
        }

        Ok(SearchRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
            date,
            passengers: self.passengers,
        })
    }
}

impl From<&SearchRequest> for SearchDraft {
    fn from(request: &SearchRequest) -> Self {
        Self {
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            date: Some(request.date),
            passengers: request.passengers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn filled() -> SearchDraft {
        let mut draft = SearchDraft::new();
        draft.apply(SearchUpdate::Origin("Pune".to_string()));
        draft.apply(SearchUpdate::Destination("Mumbai".to_string()));
        draft.apply(SearchUpdate::Date(today().succ_opt().unwrap()));
        draft
    }

    #[test]
    fn new_draft_defaults_to_one_passenger() {
        let draft = SearchDraft::new();
        assert_eq!(draft.passengers, 1);
        assert!(draft.date.is_none());
        assert!(!draft.is_complete(today()));
    }

    #[test]
    fn complete_draft_submits() {
        let request = filled().submit(today()).unwrap();
        assert_eq!(request.origin, "Pune");
        assert_eq!(request.destination, "Mumbai");
        assert_eq!(request.passengers, 1);
    }

    #[test]
    fn each_missing_field_blocks_submit() {
        let mut draft = filled();
        draft.apply(SearchUpdate::Origin("   ".to_string()));
        assert_eq!(draft.submit(today()), Err(SearchError::MissingOrigin));

        let mut draft = filled();
        draft.apply(SearchUpdate::Destination(String::new()));
        assert_eq!(draft.submit(today()), Err(SearchError::MissingDestination));

        let mut draft = filled();
        draft.apply(SearchUpdate::ClearDate);
        assert_eq!(draft.submit(today()), Err(SearchError::MissingDate));

        let mut draft = filled();
        draft.apply(SearchUpdate::Passengers(0));
        assert_eq!(draft.submit(today()), Err(SearchError::NoPassengers));
    }

    #[test]
    fn past_dates_are_rejected_but_today_is_allowed() {
        let mut draft = filled();
        let yesterday = today().pred_opt().unwrap();
        draft.apply(SearchUpdate::Date(yesterday));
        assert_eq!(
            draft.submit(today()),
            Err(SearchError::DateInPast {
                date: yesterday,
                today: today()
            })
        );

        draft.apply(SearchUpdate::Date(today()));
        assert!(draft.is_complete(today()));
    }

    #[test]
    fn swap_exchanges_cities_only() {
        let mut draft = filled();
        draft.apply(SearchUpdate::Passengers(3));
        draft.swap();
        assert_eq!(draft.origin, "Mumbai");
        assert_eq!(draft.destination, "Pune");
        assert_eq!(draft.passengers, 3);
        assert!(draft.date.is_some());
    }

    #[test]
    fn submit_trims_city_names() {
        let mut draft = filled();
        draft.apply(SearchUpdate::Origin("  Pune ".to_string()));
        assert_eq!(draft.submit(today()).unwrap().origin, "Pune");
    }

    #[test]
    fn draft_round_trips_from_request() {
        let request = filled().submit(today()).unwrap();
        let draft = SearchDraft::from(&request);
        assert_eq!(draft.submit(today()).unwrap(), request);
    }
}
