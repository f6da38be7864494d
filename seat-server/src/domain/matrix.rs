//! The seat-availability matrix for one train on one journey date.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::seat::{SeatTable, SeatType};
use super::time::StationDates;

/// Availability on one origin/destination pair of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegResult {
    pub from: String,
    pub to: String,
    pub seats: SeatTable,
}

impl LegResult {
    /// A leg with nothing known about it.
    pub fn empty(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            seats: SeatTable::new(),
        }
    }
}

/// "Seats available now" on one leg for one seat class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatAlert {
    pub from: String,
    pub to: String,
    pub seat_type: SeatType,
    pub online: u32,
    pub offline: u32,
    pub fare: f64,
}

impl fmt::Display for SeatAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Seats available from {} to {}:\n{} - Online: {}, Offline: {}, Fare: {}",
            self.from, self.to, self.seat_type, self.online, self.offline, self.fare
        )
    }
}

/// Extract an alert for every leg and class that has seats left.
///
/// A pure projection over the leg list; order follows the legs, then the
/// seat class display order.
pub fn extract_alerts(legs: &[LegResult]) -> Vec<SeatAlert> {
    legs.iter()
        .flat_map(|leg| {
            leg.seats
                .iter()
                .filter(|(_, seats)| seats.has_capacity())
                .map(move |(seat_type, seats)| SeatAlert {
                    from: leg.from.clone(),
                    to: leg.to.clone(),
                    seat_type,
                    online: seats.online,
                    offline: seats.offline,
                    fare: seats.fare,
                })
        })
        .collect()
}

/// Per-class flag: does any leg have seats of this class?
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityFlags {
    flags: [bool; SeatType::COUNT],
}

impl CapacityFlags {
    /// Fold one leg into the flags.
    pub fn record(&mut self, seats: &SeatTable) {
        for (i, (_, availability)) in seats.iter().enumerate() {
            self.flags[i] |= availability.has_capacity();
        }
    }

    /// Flags for a set of legs, in any order.
    pub fn from_legs(legs: &[LegResult]) -> Self {
        let mut flags = Self::default();
        for leg in legs {
            flags.record(&leg.seats);
        }
        flags
    }

    pub fn get(&self, seat_type: SeatType) -> bool {
        self.flags[seat_type as usize]
    }

    /// Whether any class has seats anywhere.
    pub fn any(&self) -> bool {
        self.flags.iter().any(|f| *f)
    }
}

impl Serialize for CapacityFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SeatType::COUNT))?;
        for seat_type in SeatType::ALL {
            map.serialize_entry(seat_type.as_str(), &self.get(seat_type))?;
        }
        map.end()
    }
}

/// Complete availability picture for a train.
///
/// `legs` is in completion order of the underlying queries. Treat it as a set
/// keyed by `(from, to)`; use [`AvailabilityMatrix::leg`] for lookups.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityMatrix {
    pub train_name: String,
    /// Journey date label, e.g. `04-Jun-2025`.
    pub date: String,
    /// Stations in route order.
    pub stations: Vec<String>,
    pub station_dates: StationDates,
    pub legs: Vec<LegResult>,
    pub has_capacity: CapacityFlags,
    pub alerts: Vec<SeatAlert>,
}

impl AvailabilityMatrix {
    /// Assemble the matrix, deriving capacity flags and alerts from `legs`.
    pub fn new(
        train_name: impl Into<String>,
        date: impl Into<String>,
        stations: Vec<String>,
        station_dates: StationDates,
        legs: Vec<LegResult>,
    ) -> Self {
        let has_capacity = CapacityFlags::from_legs(&legs);
        let alerts = extract_alerts(&legs);

        Self {
            train_name: train_name.into(),
            date: date.into(),
            stations,
            station_dates,
            legs,
            has_capacity,
            alerts,
        }
    }

    /// Look up a leg by its endpoints.
    pub fn leg(&self, from: &str, to: &str) -> Option<&LegResult> {
        self.legs.iter().find(|l| l.from == from && l.to == to)
    }
}
