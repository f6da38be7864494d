//! Train routes as published by the schedule provider.

use std::collections::HashSet;

use super::error::DomainError;

/// One calling point on a route.
///
/// `raw_time` is the local clock string exactly as the schedule published it
/// (e.g. `"10:30 pm BST"`). Terminal stops may only publish one direction, and
/// some stops publish nothing at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub station: String,
    pub raw_time: Option<String>,
}

impl Stop {
    /// Create a stop, picking the departure time over the arrival time.
    ///
    /// Blank strings count as absent.
    pub fn new(
        station: impl Into<String>,
        departure_time: Option<&str>,
        arrival_time: Option<&str>,
    ) -> Self {
        let raw_time = departure_time
            .filter(|t| !t.trim().is_empty())
            .or(arrival_time.filter(|t| !t.trim().is_empty()))
            .map(str::to_string);

        Self {
            station: station.into(),
            raw_time,
        }
    }
}

/// A train's published schedule, as returned by the schedule provider.
///
/// Not yet validated: the stop list may be empty or repeat a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainSchedule {
    pub train_name: String,
    pub stops: Vec<Stop>,
}

/// An ordered, non-empty sequence of stops with unique station names.
///
/// # Examples
///
/// ```
/// use seat_server::domain::{Route, Stop};
///
/// let route = Route::new(vec![
///     Stop::new("Dhaka", Some("10:30 pm BST"), None),
///     Stop::new("Rajshahi", None, Some("05:10 am BST")),
/// ])
/// .unwrap();
/// assert_eq!(route.stations(), vec!["Dhaka", "Rajshahi"]);
///
/// // Station names double as keys, so repeats are rejected
/// assert!(Route::new(vec![
///     Stop::new("Dhaka", None, None),
///     Stop::new("Dhaka", None, None),
/// ])
/// .is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    stops: Vec<Stop>,
}

impl Route {
    /// Validate and wrap a list of stops.
    pub fn new(stops: Vec<Stop>) -> Result<Self, DomainError> {
        if stops.is_empty() {
            return Err(DomainError::EmptyRoute);
        }

        let mut seen = HashSet::with_capacity(stops.len());
        for stop in &stops {
            if stop.station.trim().is_empty() {
                return Err(DomainError::BlankStation);
            }
            if !seen.insert(stop.station.as_str()) {
                return Err(DomainError::DuplicateStation(stop.station.clone()));
            }
        }

        Ok(Self { stops })
    }

    /// Stops in route order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Station names in route order.
    pub fn stations(&self) -> Vec<&str> {
        self.stops.iter().map(|s| s.station.as_str()).collect()
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false: a route has at least one stop.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Every forward station pair `(from, to)` with `from` earlier in the route.
    pub fn forward_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stops.iter().enumerate().flat_map(move |(i, from)| {
            self.stops[i + 1..]
                .iter()
                .map(move |to| (from.station.as_str(), to.station.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(name: &str) -> Stop {
        Stop::new(name, None, None)
    }

    #[test]
    fn departure_preferred_over_arrival() {
        let s = Stop::new("A", Some("10:00 am BST"), Some("09:55 am BST"));
        assert_eq!(s.raw_time.as_deref(), Some("10:00 am BST"));

        let s = Stop::new("A", None, Some("09:55 am BST"));
        assert_eq!(s.raw_time.as_deref(), Some("09:55 am BST"));

        // Blank departure falls through to the arrival
        let s = Stop::new("A", Some("  "), Some("09:55 am BST"));
        assert_eq!(s.raw_time.as_deref(), Some("09:55 am BST"));

        let s = Stop::new("A", Some(""), None);
        assert_eq!(s.raw_time, None);
    }

    #[test]
    fn empty_route_rejected() {
        assert_eq!(Route::new(vec![]), Err(DomainError::EmptyRoute));
    }

    #[test]
    fn duplicate_station_rejected() {
        let err = Route::new(vec![stop("A"), stop("B"), stop("A")]).unwrap_err();
        assert_eq!(err, DomainError::DuplicateStation("A".into()));
    }

    #[test]
    fn blank_station_rejected() {
        let err = Route::new(vec![stop("A"), stop(" ")]).unwrap_err();
        assert_eq!(err, DomainError::BlankStation);
    }

    #[test]
    fn forward_pairs_in_route_order() {
        let route = Route::new(vec![stop("A"), stop("B"), stop("C"), stop("D")]).unwrap();
        let pairs: Vec<_> = route.forward_pairs().collect();
        assert_eq!(
            pairs,
            vec![
                ("A", "B"),
                ("A", "C"),
                ("A", "D"),
                ("B", "C"),
                ("B", "D"),
                ("C", "D"),
            ]
        );
    }

    #[test]
    fn single_stop_has_no_pairs() {
        let route = Route::new(vec![stop("A")]).unwrap();
        assert_eq!(route.forward_pairs().count(), 0);
        assert_eq!(route.len(), 1);
        assert!(!route.is_empty());
    }
}
