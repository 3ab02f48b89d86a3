// libs/shared/utils/src/time.rs
//
// Pure calendar/time arithmetic used by slot generation and availability
// queries. Nothing here reads the wall clock.

use chrono::{Duration, NaiveDate, NaiveTime, Weekday};

/// Monday=1 .. Sunday=7, the ordinal used on the wire.
pub fn weekday_ordinal(day: Weekday) -> u8 {
    day.number_from_monday() as u8
}

pub fn weekday_from_ordinal(ordinal: u8) -> Option<Weekday> {
    match ordinal {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Serde adapter so `Weekday` fields cross the wire as the 1..7 ordinal.
pub mod weekday_ord {
    use chrono::Weekday;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(super::weekday_ordinal(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let ordinal = u8::deserialize(deserializer)?;
        super::weekday_from_ordinal(ordinal)
            .ok_or_else(|| D::Error::custom("day of week must be between 1 (Monday) and 7 (Sunday)"))
    }
}

/// Walk from `start` towards `end` in `interval_minutes` steps, emitting every
/// time strictly before `end`. `end` itself is never emitted; an interval that
/// does not evenly divide the span stops at the last step that still fits.
///
/// A step that wraps past midnight terminates the walk so a window ending near
/// 24:00 cannot loop forever.
pub fn slot_times(start: NaiveTime, end: NaiveTime, interval_minutes: u32) -> Vec<NaiveTime> {
    let mut times = Vec::new();
    if interval_minutes == 0 || start >= end {
        return times;
    }

    let step = Duration::minutes(interval_minutes as i64);
    let mut current = start;
    while current < end {
        times.push(current);
        let (next, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        current = next;
    }

    times
}

/// The inclusive calendar window `[start, start + window_days]`.
pub fn window_dates(start: NaiveDate, window_days: u32) -> Vec<NaiveDate> {
    start.iter_days().take(window_days as usize + 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn slot_times_end_is_exclusive() {
        let times = slot_times(t(9, 0), t(10, 0), 30);
        assert_eq!(times, vec![t(9, 0), t(9, 30)]);
    }

    #[test]
    fn slot_times_uneven_interval_stops_before_end() {
        let times = slot_times(t(9, 0), t(10, 0), 45);
        assert_eq!(times, vec![t(9, 0), t(9, 45)]);
    }

    #[test]
    fn slot_times_empty_for_inverted_window() {
        assert!(slot_times(t(10, 0), t(9, 0), 30).is_empty());
        assert!(slot_times(t(9, 0), t(9, 0), 30).is_empty());
    }

    #[test]
    fn slot_times_terminates_at_midnight_wrap() {
        let times = slot_times(t(23, 0), t(23, 59), 30);
        assert_eq!(times, vec![t(23, 0), t(23, 30)]);
    }

    #[test]
    fn window_dates_is_inclusive_of_both_ends() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let dates = window_dates(start, 28);
        assert_eq!(dates.len(), 29);
        assert_eq!(dates[0], start);
        assert_eq!(dates[28], NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    }

    #[test]
    fn weekday_ordinals_round_trip() {
        for ordinal in 1..=7 {
            let day = weekday_from_ordinal(ordinal).unwrap();
            assert_eq!(weekday_ordinal(day), ordinal);
        }
        assert!(weekday_from_ordinal(0).is_none());
        assert!(weekday_from_ordinal(8).is_none());
    }

    #[test]
    fn window_covers_four_of_each_weekday_over_four_weeks() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let wednesdays = window_dates(monday, 28)
            .into_iter()
            .filter(|d| d.weekday() == chrono::Weekday::Wed)
            .count();
        assert_eq!(wednesdays, 4);
    }
}
