//! Row identity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The `(date, location_lat, location_lon)` tuple identifying one aggregated
/// observation.
///
/// Coordinates are compared bitwise through `f64::total_cmp`, which makes the
/// key totally ordered and usable in `BTreeSet`/`HashSet`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RowKey {
    pub date: NaiveDate,
    pub location_lat: f64,
    pub location_lon: f64,
}

impl RowKey {
    pub fn new(date: NaiveDate, location_lat: f64, location_lon: f64) -> Self {
        Self {
            date,
            location_lat,
            location_lon,
        }
    }
}

impl PartialEq for RowKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RowKey {}

impl PartialOrd for RowKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RowKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.location_lat.total_cmp(&other.location_lat))
            .then_with(|| self.location_lon.total_cmp(&other.location_lon))
    }
}

impl Hash for RowKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.date.hash(state);
        self.location_lat.to_bits().hash(state);
        self.location_lon.to_bits().hash(state);
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.date, self.location_lat, self.location_lon
        )
    }
}
