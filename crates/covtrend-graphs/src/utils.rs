//! Shared helpers for graph generation.

use crate::XAxis;
use chrono::NaiveDate;
use covtrend_data::month_end_ticks;
use plotters::prelude::*;
use std::ops::Range;

/// Ten-color categorical palette used for multi-country charts.
pub const PALETTE: [&str; 10] = [
    "#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD", "#8C564B", "#E377C2", "#7F7F7F",
    "#BCBD22", "#17BECF",
];

/// `#RRGGBB` for an RGB triple.
pub fn to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// X positions of the month-end ticks (the 28th) of every month `range` touches.
///
/// Ticks may fall outside `range`; the renderers widen the x axis to include
/// them so every month gets exactly one label.
pub fn month_ticks(axis: XAxis, range: &Range<f64>) -> Vec<f64> {
    let XAxis::Dates { origin } = axis else {
        return Vec::new();
    };

    let first = range.start.ceil() as i64;
    let last = range.end.floor() as i64;
    let dates: Vec<NaiveDate> = (first..=last)
        .filter_map(|day| origin.checked_add_signed(chrono::Duration::days(day)))
        .collect();

    month_end_ticks(&dates)
        .into_iter()
        .filter_map(|tick| axis.position(tick))
        .collect()
}

/// Whether a default system font can be loaded for text rendering.
pub fn fonts_available() -> bool {
    ("sans-serif", 12).into_font().box_size("A").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(31, 119, 180), "#1F77B4");
        assert_eq!(to_hex(0, 0, 0), "#000000");
    }

    #[test]
    fn test_month_ticks() {
        let origin = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
        let axis = XAxis::Dates { origin };

        // 2020-01-28 is day 6, 2020-02-28 is day 37, 2020-03-28 is day 66
        assert_eq!(month_ticks(axis, &(0.0..40.0)), vec![6.0, 37.0, 66.0]);
        assert_eq!(month_ticks(axis, &(0.0..30.0)), vec![6.0, 37.0]);
        assert!(month_ticks(XAxis::Index, &(0.0..40.0)).is_empty());

        // Every tick lands on the 28th
        for x in month_ticks(axis, &(-10.0..400.0)) {
            assert_eq!(axis.date_at(x).map(|d| d.day()), Some(28));
        }
    }

    #[test]
    fn test_palette_entries_parse() {
        for color in PALETTE {
            assert_eq!(color.len(), 7);
            assert!(u32::from_str_radix(&color[1..], 16).is_ok());
        }
    }
}
