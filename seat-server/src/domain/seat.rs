//! Seat classes and per-class availability.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Taka added to the reported fare of the berth classes, `F_BERTH` and `AC_B`.
pub const BERTH_FARE_SURCHARGE: f64 = 50.0;

/// Error returned when parsing an unknown seat class code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown seat type: {0}")]
pub struct UnknownSeatType(pub String);

/// A seat class sold by the booking service.
///
/// The declaration order is the display order used everywhere: iteration over
/// [`SeatType::ALL`], the key order of a serialized [`SeatTable`], and the
/// ordering derived by `Ord`.
///
/// # Examples
///
/// ```
/// use seat_server::domain::SeatType;
///
/// assert_eq!(SeatType::parse("AC_B").unwrap(), SeatType::AcB);
/// assert_eq!(SeatType::AcB.as_str(), "AC_B");
/// assert!(SeatType::parse("FIRST").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SeatType {
    #[serde(rename = "S_CHAIR")]
    SChair,
    #[serde(rename = "SHOVAN")]
    Shovan,
    #[serde(rename = "SNIGDHA")]
    Snigdha,
    #[serde(rename = "F_SEAT")]
    FSeat,
    #[serde(rename = "F_CHAIR")]
    FChair,
    #[serde(rename = "AC_S")]
    AcS,
    #[serde(rename = "F_BERTH")]
    FBerth,
    #[serde(rename = "AC_B")]
    AcB,
    #[serde(rename = "SHULOV")]
    Shulov,
    #[serde(rename = "AC_CHAIR")]
    AcChair,
}

impl SeatType {
    /// Number of seat classes.
    pub const COUNT: usize = 10;

    /// Every seat class, in display order.
    pub const ALL: [SeatType; Self::COUNT] = [
        SeatType::SChair,
        SeatType::Shovan,
        SeatType::Snigdha,
        SeatType::FSeat,
        SeatType::FChair,
        SeatType::AcS,
        SeatType::FBerth,
        SeatType::AcB,
        SeatType::Shulov,
        SeatType::AcChair,
    ];

    /// Parse the booking service's seat class code.
    pub fn parse(s: &str) -> Result<Self, UnknownSeatType> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownSeatType(s.to_string()))
    }

    /// The booking service's code for this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatType::SChair => "S_CHAIR",
            SeatType::Shovan => "SHOVAN",
            SeatType::Snigdha => "SNIGDHA",
            SeatType::FSeat => "F_SEAT",
            SeatType::FChair => "F_CHAIR",
            SeatType::AcS => "AC_S",
            SeatType::FBerth => "F_BERTH",
            SeatType::AcB => "AC_B",
            SeatType::Shulov => "SHULOV",
            SeatType::AcChair => "AC_CHAIR",
        }
    }

    /// Whether [`BERTH_FARE_SURCHARGE`] applies to this class.
    pub fn has_berth_surcharge(&self) -> bool {
        matches!(self, SeatType::FBerth | SeatType::AcB)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seat counts and fare for one class on one leg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeatAvailability {
    /// Seats bookable online.
    pub online: u32,
    /// Seats held for the station counter.
    pub offline: u32,
    /// Base fare.
    pub fare: f64,
    /// VAT charged on top of the fare.
    pub vat_amount: f64,
}

impl SeatAvailability {
    /// Total seats across both channels.
    pub fn total(&self) -> u32 {
        self.online.saturating_add(self.offline)
    }

    /// Whether any seat is left in either channel.
    pub fn has_capacity(&self) -> bool {
        self.total() > 0
    }

    /// Apply [`BERTH_FARE_SURCHARGE`] if `seat_type` is a berth class.
    pub fn corrected_for(mut self, seat_type: SeatType) -> Self {
        if seat_type.has_berth_surcharge() {
            self.fare += BERTH_FARE_SURCHARGE;
        }
        self
    }
}

/// Availability for every seat class on a leg.
///
/// Always holds the full key set: classes the provider did not report read as
/// [`SeatAvailability::default`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatTable {
    entries: [SeatAvailability; SeatType::COUNT],
}

impl SeatTable {
    /// An all-zero table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Availability for a class.
    pub fn get(&self, seat_type: SeatType) -> &SeatAvailability {
        &self.entries[seat_type.index()]
    }

    /// Replace the availability for a class.
    pub fn set(&mut self, seat_type: SeatType, availability: SeatAvailability) {
        self.entries[seat_type.index()] = availability;
    }

    /// Iterate classes in display order.
    pub fn iter(&self) -> impl Iterator<Item = (SeatType, &SeatAvailability)> {
        SeatType::ALL.iter().copied().zip(self.entries.iter())
    }

    /// Whether any class has seats left.
    pub fn has_any_capacity(&self) -> bool {
        self.entries.iter().any(SeatAvailability::has_capacity)
    }

    /// Build a table from the classes a provider reported.
    ///
    /// Reported berth fares are corrected with [`BERTH_FARE_SURCHARGE`];
    /// classes missing from the report stay all-zero.
    pub fn from_reported<I>(reported: I) -> Self
    where
        I: IntoIterator<Item = (SeatType, SeatAvailability)>,
    {
        reported
            .into_iter()
            .map(|(seat_type, availability)| (seat_type, availability.corrected_for(seat_type)))
            .collect()
    }
}

impl FromIterator<(SeatType, SeatAvailability)> for SeatTable {
    fn from_iter<I: IntoIterator<Item = (SeatType, SeatAvailability)>>(iter: I) -> Self {
        let mut table = SeatTable::new();
        for (seat_type, availability) in iter {
            table.set(seat_type, availability);
        }
        table
    }
}

impl Serialize for SeatTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SeatType::COUNT))?;
        for (seat_type, availability) in self.iter() {
            map.serialize_entry(seat_type.as_str(), availability)?;
        }
        map.end()
    }
}
