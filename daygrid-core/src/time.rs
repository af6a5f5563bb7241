//! Clock-time helpers.
//!
//! Events carry their times as "HH:MM" strings (the persisted shape), so
//! comparisons happen on minute offsets since midnight. Overlap is the
//! half-open interval test: an event without an end time is a zero-duration
//! point at its start, which means two identical points never overlap but a
//! point strictly inside another event's interval does.

use crate::error::{DaygridError, DaygridResult};
use crate::event::Event;

/// Parse "HH:MM" into minutes since midnight.
///
/// Fails unless the string splits on `:` into exactly two numeric parts.
pub fn to_minutes(label: &str) -> DaygridResult<u32> {
    let (hours, minutes) = label
        .split_once(':')
        .ok_or_else(|| DaygridError::InvalidTimeFormat(label.to_string()))?;

    let hours: u32 = hours
        .parse()
        .map_err(|_| DaygridError::InvalidTimeFormat(label.to_string()))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| DaygridError::InvalidTimeFormat(label.to_string()))?;

    Ok(hours * 60 + minutes)
}

/// Format minutes since midnight back into "HH:MM".
pub fn minutes_to_label(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Whether two events on the same day overlap.
///
/// Each event's interval is `[start, end)` where `start` is `startTime`
/// falling back to `time`, and `end` is `endTime` falling back to the start.
/// Events whose times fail to parse overlap nothing.
pub fn overlaps(a: &Event, b: &Event) -> bool {
    let (Some((a_start, a_end)), Some((b_start, b_end))) = (interval_of(a), interval_of(b)) else {
        return false;
    };

    a_start < b_end && b_start < a_end
}

fn interval_of(event: &Event) -> Option<(u32, u32)> {
    let start = to_minutes(event.start_label()?).ok()?;
    let end = match event.end_time.as_deref() {
        Some(label) => to_minutes(label).ok()?,
        None => start,
    };
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(start: &str, end: Option<&str>) -> Event {
        Event::timed("Test", start, end.map(str::to_string), None)
    }

    fn point(label: &str) -> Event {
        Event {
            title: "Point".to_string(),
            start_time: None,
            time: Some(label.to_string()),
            end_time: None,
            color: None,
        }
    }

    #[test]
    fn to_minutes_parses_basic_times() {
        assert_eq!(to_minutes("00:00").unwrap(), 0);
        assert_eq!(to_minutes("09:05").unwrap(), 545);
        assert_eq!(to_minutes("23:59").unwrap(), 1439);
    }

    #[test]
    fn to_minutes_is_monotonic_over_the_day() {
        let labels = ["00:00", "06:30", "09:00", "12:45", "18:00", "23:59"];
        let minutes: Vec<u32> = labels.iter().map(|l| to_minutes(l).unwrap()).collect();
        assert!(minutes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn to_minutes_rejects_garbage() {
        assert!(matches!(
            to_minutes("oops"),
            Err(DaygridError::InvalidTimeFormat(_))
        ));
        assert!(to_minutes("12").is_err());
        assert!(to_minutes("12:").is_err());
        assert!(to_minutes(":30").is_err());
        assert!(to_minutes("12:30:00").is_err());
    }

    #[test]
    fn minutes_round_trip_for_display() {
        for label in ["00:00", "09:05", "14:30", "23:59"] {
            assert_eq!(minutes_to_label(to_minutes(label).unwrap()), label);
        }
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = timed("10:00", Some("11:00"));
        let b = timed("10:30", Some("12:00"));
        assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        assert!(overlaps(&a, &b));

        let c = timed("13:00", Some("14:00"));
        assert_eq!(overlaps(&a, &c), overlaps(&c, &a));
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn identical_point_events_do_not_overlap() {
        let c = point("10:00");
        let d = point("10:00");
        assert!(!overlaps(&c, &d));
    }

    #[test]
    fn point_inside_interval_overlaps() {
        let interval = timed("10:00", Some("11:00"));
        let inside = point("10:30");
        assert!(overlaps(&interval, &inside));
        assert!(overlaps(&inside, &interval));
    }

    #[test]
    fn point_on_interval_boundary_does_not_overlap() {
        let interval = timed("10:00", Some("11:00"));
        // Half-open: the start boundary point falls on `a_start < b_end` with
        // equal values, the end boundary is excluded outright.
        assert!(!overlaps(&interval, &point("10:00")));
        assert!(!overlaps(&interval, &point("11:00")));
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let morning = timed("09:00", Some("10:00"));
        let next = timed("10:00", Some("11:00"));
        assert!(!overlaps(&morning, &next));
    }

    #[test]
    fn legacy_time_field_is_used_as_start() {
        let legacy = point("14:30");
        let interval = timed("14:00", Some("15:00"));
        assert!(overlaps(&legacy, &interval));
    }

    #[test]
    fn unparseable_times_never_overlap() {
        let broken = timed("not-a-time", None);
        let interval = timed("00:00", Some("23:59"));
        assert!(!overlaps(&broken, &interval));
        assert!(!overlaps(&interval, &broken));
    }
}
