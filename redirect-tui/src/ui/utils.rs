use chrono::{Local, TimeZone};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use redirect_client::domain::UNSET_TIMESTAMP;

/// Full local date with short time, e.g. "Saturday, April 21, 1990 at 12:00 AM".
/// Unset timestamps render as "-".
pub fn format_timestamp(timestamp: i64) -> String {
    format_timestamp_in(&Local, timestamp)
}

pub fn format_timestamp_in<Tz: TimeZone>(tz: &Tz, timestamp: i64) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if timestamp == UNSET_TIMESTAMP {
        return "-".to_string();
    }
    match tz.timestamp_millis_opt(timestamp).single() {
        Some(dt) => dt.format("%A, %B %-d, %Y at %-I:%M %p").to_string(),
        None => "-".to_string(),
    }
}

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn unset_timestamp_is_dash() {
        assert_eq!(format_timestamp(0), "-");
    }

    #[test]
    fn formats_full_date_with_short_time() {
        assert_eq!(
            format_timestamp_in(&Utc, 640_656_000_000),
            "Saturday, April 21, 1990 at 12:00 AM"
        );
        assert_eq!(
            format_timestamp_in(&FixedOffset::east_opt(2 * 3600).unwrap(), 1_700_000_000_000),
            "Wednesday, November 15, 2023 at 12:13 AM"
        );
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 10, area);
        assert_eq!((popup.x, popup.y, popup.width, popup.height), (20, 15, 60, 10));
    }
}
