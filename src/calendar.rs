use std::fmt;

use chrono::{Datelike, Days, NaiveDate, NaiveTime};

use crate::error::Error;
use crate::patterns::GlyphPattern;

/// A single commit timestamp: midnight on one calendar day.
///
/// `Display` renders the fixed format handed to git for both the author and
/// the committer date, e.g. `Mon, 08 Jan 2024 00:00:00`. Ordering of stamps
/// equals chronological ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stamp(chrono::NaiveDateTime);

impl Stamp {
    fn new(day: NaiveDate) -> Self {
        Stamp(day.and_time(NaiveTime::MIN))
    }

    /// The calendar day this stamp falls on.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%a, %d %b %Y %H:%M:%S"))
    }
}

/// Returns the first Sunday on or after the 1st of `month`/`year`.
///
/// This is the anchor from which a glyph's grid is laid out: week-columns of
/// a contribution graph start on Sunday, so the offset from the 1st is
/// `6 - weekday_from_monday(1st)` days, zero when the 1st already is a
/// Sunday.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if `month`/`year` do not name a
/// representable calendar date.
pub fn first_sunday(month: u32, year: i32) -> Result<NaiveDate, Error> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        Error::Configuration(format!("invalid month/year: {}/{}", month, year))
    })?;

    let offset = 6 - first.weekday().num_days_from_monday();
    first
        .checked_add_days(Days::new(u64::from(offset)))
        .ok_or_else(|| Error::Configuration(format!("date out of range: {}/{}", month, year)))
}

/// Expands a glyph pattern into commit stamps, one per "on" cell.
///
/// Cell `(w, d)` maps to `anchor + (w*7 + d)` days, visited in row-major
/// order, so the returned sequence is strictly increasing. An all-false
/// pattern yields an empty sequence.
pub fn expand(anchor: NaiveDate, pattern: &GlyphPattern) -> Vec<Stamp> {
    let mut stamps = Vec::new();
    for (w, row) in pattern.rows().iter().enumerate() {
        for (d, on) in row.iter().enumerate() {
            if *on {
                let day = anchor + Days::new((w * 7 + d) as u64);
                stamps.push(Stamp::new(day));
            }
        }
    }
    stamps
}

/// Returns the anchor for the glyph following `pattern`.
///
/// Advances by `7 × (weeks + 1)` days: past the glyph itself plus one blank
/// week-column of horizontal spacing, regardless of the glyph's height.
pub fn advance_past(anchor: NaiveDate, pattern: &GlyphPattern) -> NaiveDate {
    anchor + Days::new(7 * (pattern.weeks() as u64 + 1))
}

#[cfg(test)]
mod tests {
    use super::{advance_past, expand, first_sunday};
    use crate::patterns::GlyphPattern;
    use chrono::{Datelike, NaiveDate, Weekday};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn sample_a() -> GlyphPattern {
        GlyphPattern::from(vec![
            [false, true, true, true, false, false, false],
            [true, false, false, false, true, false, false],
        ])
    }

    #[test]
    fn first_sunday_of_february_2024() {
        // Feb 1 2024 is a Thursday; the first Sunday on/after is Feb 4.
        let sunday = first_sunday(2, 2024).expect("valid month");
        assert_eq!(sunday, ymd(2024, 2, 4));
    }

    #[test]
    fn first_sunday_is_identity_when_first_is_sunday() {
        // Sep 1 2024 is a Sunday.
        let sunday = first_sunday(9, 2024).expect("valid month");
        assert_eq!(sunday, ymd(2024, 9, 1));
    }

    #[test]
    fn first_sunday_is_always_a_sunday_within_six_days() {
        for year in [1999, 2023, 2024, 2025, 2100] {
            for month in 1..=12 {
                let first = ymd(year, month, 1);
                let sunday = first_sunday(month, year).expect("valid month");
                assert_eq!(sunday.weekday(), Weekday::Sun, "{}/{}", month, year);
                let gap = (sunday - first).num_days();
                assert!((0..=6).contains(&gap), "{}/{} gap {}", month, year, gap);
            }
        }
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(first_sunday(13, 2024).is_err());
        assert!(first_sunday(0, 2024).is_err());
    }

    #[test]
    fn expand_matches_concrete_scenario() {
        // Anchor 2024-01-07 is a Sunday; "A" lights week 0 days 1-3 and
        // week 1 days 0 and 4.
        let stamps = expand(ymd(2024, 1, 7), &sample_a());
        let days: Vec<_> = stamps.iter().map(|s| s.date()).collect();
        assert_eq!(
            days,
            vec![
                ymd(2024, 1, 8),
                ymd(2024, 1, 9),
                ymd(2024, 1, 10),
                ymd(2024, 1, 14),
                ymd(2024, 1, 18),
            ]
        );
    }

    #[test]
    fn expand_is_strictly_increasing_and_bounded() {
        let anchor = ymd(2024, 1, 7);
        let stamps = expand(anchor, &sample_a());
        assert!(stamps.len() <= 7 * 2);
        for pair in stamps.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for stamp in &stamps {
            assert!(stamp.date() >= anchor);
        }
    }

    #[test]
    fn expand_all_false_is_empty() {
        let blank = GlyphPattern::from(vec![[false; 7], [false; 7], [false; 7]]);
        assert!(expand(ymd(2024, 1, 7), &blank).is_empty());
    }

    #[test]
    fn stamp_renders_fixed_format() {
        let stamps = expand(ymd(2024, 1, 7), &sample_a());
        assert_eq!(stamps[0].to_string(), "Mon, 08 Jan 2024 00:00:00");
    }

    #[test]
    fn advance_skips_glyph_plus_one_blank_week() {
        let anchor = ymd(2024, 1, 7);
        let next = advance_past(anchor, &sample_a());
        assert_eq!((next - anchor).num_days(), 7 * 3);
        assert_eq!(next.weekday(), Weekday::Sun);
    }
}
