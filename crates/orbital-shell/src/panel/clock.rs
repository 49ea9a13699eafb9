//! Panel clock faces

use serde::Serialize;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use crate::error::{ShellError, ShellResult};

const PANEL_FACE: [&[BorrowedFormatItem<'static>]; 2] = [
    format_description!("[hour]:[minute]:[second]"),
    format_description!("[year]/[month]/[day]"),
];

const TOOLTIP_FACE: [&[BorrowedFormatItem<'static>]; 3] = [
    format_description!("[weekday]"),
    format_description!("UTC[offset_hour sign:mandatory]:[offset_minute] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]"),
];

/// Text lines the clock renders
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClockFaces {
    pub panel: Vec<String>,
    /// Only present while the tooltip is shown
    pub tooltip: Option<Vec<String>>,
}

/// Panel clock
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    tooltip_visible: bool,
}

impl Clock {
    #[inline]
    pub fn tooltip_visible(&self) -> bool {
        self.tooltip_visible
    }

    pub fn set_tooltip_visible(&mut self, visible: bool) {
        self.tooltip_visible = visible;
    }

    /// Local time from a unix timestamp in milliseconds and a UTC offset in minutes
    pub fn local_time(unix_ms: f64, offset_minutes: i32) -> ShellResult<OffsetDateTime> {
        let offset = UtcOffset::from_whole_seconds(offset_minutes * 60).map_err(clock_err)?;
        let utc = OffsetDateTime::from_unix_timestamp_nanos((unix_ms * 1_000_000.0) as i128)
            .map_err(clock_err)?;
        Ok(utc.to_offset(offset))
    }

    /// Format both faces for a point in time
    pub fn faces(&self, now: OffsetDateTime) -> ShellResult<ClockFaces> {
        let tooltip = if self.tooltip_visible {
            Some(format_lines(now, &TOOLTIP_FACE)?)
        } else {
            None
        };
        Ok(ClockFaces {
            panel: format_lines(now, &PANEL_FACE)?,
            tooltip,
        })
    }
}

fn format_lines(now: OffsetDateTime, lines: &[&[BorrowedFormatItem<'static>]]) -> ShellResult<Vec<String>> {
    lines
        .iter()
        .map(|line| now.format(*line).map_err(clock_err))
        .collect()
}

fn clock_err(e: impl std::fmt::Display) -> ShellError {
    ShellError::Clock(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_panel_face() {
        let faces = Clock::default().faces(datetime!(2024-03-09 07:05:03 +8)).unwrap();
        assert_eq!(faces.panel, vec!["07:05:03", "2024/03/09"]);
        assert_eq!(faces.tooltip, None);
    }

    #[test]
    fn test_tooltip_face() {
        let mut clock = Clock::default();
        clock.set_tooltip_visible(true);
        let faces = clock.faces(datetime!(2024-03-09 07:05:03 -5:30)).unwrap();
        assert_eq!(
            faces.tooltip.unwrap(),
            vec!["Saturday", "UTC-05:30 07:05:03", "2024-03-09"]
        );
    }

    #[test]
    fn test_local_time_from_unix_ms() {
        // 2024-01-01T00:00:00Z viewed from UTC+1
        let now = Clock::local_time(1_704_067_200_000.0, 60).unwrap();
        let faces = Clock::default().faces(now).unwrap();
        assert_eq!(faces.panel, vec!["01:00:00", "2024/01/01"]);
    }

    #[test]
    fn test_local_time_rejects_bad_offset() {
        assert!(matches!(Clock::local_time(0.0, 60 * 30), Err(ShellError::Clock(_))));
    }
}
