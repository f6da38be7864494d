//! Calendar dates for every stop on a route.
//!
//! The schedule provider only publishes local clock times such as
//! `"11:50 pm BST"`, with no date. Journeys that run overnight have to be
//! reconstructed by spotting where the clock jumps backwards.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

use super::route::Route;

/// Error returned when parsing an invalid clock string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Errors from date inference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    /// Strict inference was requested but no stop carried a parseable time
    #[error("no stop on the route carries a usable {marker} time")]
    NoUsableTimes { marker: String },

    /// Rolling over would leave the supported calendar range
    #[error("date overflow after {0}")]
    DateOverflow(NaiveDate),
}

/// Default marker a clock string must carry to be trusted.
pub const DEFAULT_TIMEZONE_MARKER: &str = "BST";

/// Default plausibility threshold for a backwards clock jump.
///
/// A backwards jump whose wrapped gap is shorter than this is a midnight
/// crossing; anything longer is treated as bad data.
pub const DEFAULT_ROLLOVER_THRESHOLD_HOURS: i64 = 12;

/// Parameters for date inference.
#[derive(Debug, Clone)]
pub struct DateInferenceConfig {
    /// Clock strings without this marker are ignored.
    pub timezone_marker: String,

    /// Wrapped gaps at or above this are not treated as rollovers.
    pub rollover_threshold: Duration,

    /// Fail when no stop has a parseable time instead of dating every
    /// station with the start date.
    pub require_clock_times: bool,
}

impl Default for DateInferenceConfig {
    fn default() -> Self {
        Self {
            timezone_marker: DEFAULT_TIMEZONE_MARKER.to_string(),
            rollover_threshold: Duration::hours(DEFAULT_ROLLOVER_THRESHOLD_HOURS),
            require_clock_times: false,
        }
    }
}

/// Parse a 12-hour clock string such as `"11:50 pm"` into a time of day.
///
/// `12 am` is midnight and `12 pm` is noon.
///
/// # Examples
///
/// ```
/// use seat_server::domain::parse_meridiem_time;
///
/// let t = parse_meridiem_time("11:50 pm").unwrap();
/// assert_eq!(t.format("%H:%M").to_string(), "23:50");
///
/// let t = parse_meridiem_time("12:10 AM").unwrap();
/// assert_eq!(t.format("%H:%M").to_string(), "00:10");
///
/// assert!(parse_meridiem_time("23:50").is_err());
/// assert!(parse_meridiem_time("11:75 pm").is_err());
/// ```
pub fn parse_meridiem_time(s: &str) -> Result<NaiveTime, TimeError> {
    let (clock, meridiem) = s
        .split_once(' ')
        .ok_or_else(|| TimeError::new("expected \"h:mm am|pm\""))?;

    if meridiem.contains(' ') {
        return Err(TimeError::new("unexpected trailing text"));
    }

    let (hour, minute) = clock
        .split_once(':')
        .ok_or_else(|| TimeError::new("expected colon between hour and minute"))?;
    let hour: u32 = hour
        .parse()
        .map_err(|_| TimeError::new("invalid hour digits"))?;
    let minute: u32 = minute
        .parse()
        .map_err(|_| TimeError::new("invalid minute digits"))?;

    if hour > 12 {
        return Err(TimeError::new("hour must be 0-12"));
    }
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    let hour = match meridiem.to_ascii_lowercase().as_str() {
        "am" if hour == 12 => 0,
        "am" => hour,
        "pm" if hour != 12 => hour + 12,
        "pm" => hour,
        _ => return Err(TimeError::new("expected am or pm")),
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
}

/// What a stop's raw clock string amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClockReading {
    /// No time published, or published without the expected marker.
    Unusable,
    /// Tagged but unparseable.
    Malformed(TimeError),
    Time(NaiveTime),
}

fn read_clock(raw: Option<&str>, marker: &str) -> ClockReading {
    let Some(raw) = raw else {
        return ClockReading::Unusable;
    };
    if !raw.contains(marker) {
        return ClockReading::Unusable;
    }

    let cleaned = raw.replace(&format!(" {marker}"), "");
    match parse_meridiem_time(cleaned.trim()) {
        Ok(time) => ClockReading::Time(time),
        Err(e) => ClockReading::Malformed(e),
    }
}

fn minutes_of_day(t: NaiveTime) -> i64 {
    t.hour() as i64 * 60 + t.minute() as i64
}

/// The calendar date at which a station is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationDate {
    pub station: String,
    pub date: NaiveDate,
    /// True for the two stops either side of a midnight crossing.
    pub crosses_midnight: bool,
}

/// Inferred dates for every station of a route, in route order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StationDates {
    entries: Vec<StationDate>,
}

impl StationDates {
    /// Date at which `station` is reached.
    pub fn get(&self, station: &str) -> Option<NaiveDate> {
        self.entries
            .iter()
            .find(|e| e.station == station)
            .map(|e| e.date)
    }

    /// Entries in route order.
    pub fn iter(&self) -> impl Iterator<Item = &StationDate> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Infer the calendar date of every stop on a route.
///
/// Walks the stops in order, keeping the date reached so far. Whenever a
/// tagged clock time goes backwards and the wrapped-forward gap is below the
/// configured threshold, the date advances by one day starting with that
/// stop. Untagged, missing or malformed times do not take part in rollover
/// detection; their stations get whatever date is current.
///
/// # Examples
///
/// ```
/// use seat_server::domain::{DateInferenceConfig, Route, Stop, infer_station_dates};
/// use chrono::NaiveDate;
///
/// let route = Route::new(vec![
///     Stop::new("A", Some("11:50 pm BST"), None),
///     Stop::new("B", None, Some("12:10 am BST")),
///     Stop::new("C", None, None),
/// ])
/// .unwrap();
/// let start = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
///
/// let dates = infer_station_dates(&route, start, &DateInferenceConfig::default()).unwrap();
/// let next_day = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
/// assert_eq!(dates.get("A"), Some(start));
/// assert_eq!(dates.get("B"), Some(next_day));
/// assert_eq!(dates.get("C"), Some(next_day));
/// ```
pub fn infer_station_dates(
    route: &Route,
    start_date: NaiveDate,
    config: &DateInferenceConfig,
) -> Result<StationDates, InferenceError> {
    let threshold_mins = config.rollover_threshold.num_minutes();
    let mut entries: Vec<StationDate> = Vec::with_capacity(route.len());
    let mut current_date = start_date;
    let mut prev_time: Option<NaiveTime> = None;
    let mut parsed_any = false;

    for stop in route.stops() {
        let mut crosses_midnight = false;

        match read_clock(stop.raw_time.as_deref(), &config.timezone_marker) {
            ClockReading::Unusable => {}
            ClockReading::Malformed(e) => {
                tracing::trace!(
                    station = %stop.station,
                    raw = ?stop.raw_time,
                    error = %e,
                    "Skipping malformed clock time"
                );
            }
            ClockReading::Time(time) => {
                parsed_any = true;

                if let Some(prev) = prev_time {
                    let diff_mins = minutes_of_day(time) - minutes_of_day(prev);
                    if diff_mins < 0 {
                        let wrapped_mins = diff_mins + 24 * 60;
                        if wrapped_mins < threshold_mins {
                            current_date = current_date
                                .succ_opt()
                                .ok_or(InferenceError::DateOverflow(current_date))?;
                            crosses_midnight = true;
                            if let Some(previous) = entries.last_mut() {
                                previous.crosses_midnight = true;
                            }
                        } else {
                            tracing::debug!(
                                station = %stop.station,
                                gap_mins = wrapped_mins,
                                "Ignoring implausible backwards clock jump"
                            );
                        }
                    }
                }

                prev_time = Some(time);
            }
        }

        entries.push(StationDate {
            station: stop.station.clone(),
            date: current_date,
            crosses_midnight,
        });
    }

    if config.require_clock_times && !parsed_any {
        return Err(InferenceError::NoUsableTimes {
            marker: config.timezone_marker.clone(),
        });
    }

    Ok(StationDates { entries })
}
