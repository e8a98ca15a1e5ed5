use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const NOT_APPLICABLE_SENTINEL: &str = "NA";

/// Reasons a raw spreadsheet cell did not yield a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("no date provided")]
    Empty,
    #[error("date is marked as not applicable")]
    NotApplicable,
    #[error("unrecognised date '{raw}'")]
    Malformed { raw: String },
}

/// Parses a date cell.
///
/// Accepted forms, first match wins:
/// 1. `D/M/YYYY` or `D-M-YYYY` (day and month one or two digits)
/// 2. `YYYY/M/D` or `YYYY-M-D`
/// 3. an ISO-like timestamp (`2025-05-22T10:00:00Z`, `2025-05-22T10:00`),
///    keeping only the date
///
/// Month-first tokens such as `05/22/2025` are rejected, never reinterpreted.
pub fn parse_date(raw: Option<&str>) -> Result<NaiveDate, DateError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(DateError::Empty);
    }
    if trimmed.eq_ignore_ascii_case(NOT_APPLICABLE_SENTINEL) {
        return Err(DateError::NotApplicable);
    }

    day_first(trimmed)
        .or_else(|| year_first(trimmed))
        .or_else(|| iso_fallback(trimmed))
        .ok_or_else(|| DateError::Malformed {
            raw: trimmed.to_string(),
        })
}

/// Renders a date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// Whole calendar days from `today` until `date`; zero on the day itself and
/// negative once the date has passed.
pub fn days_remaining(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

fn day_first(token: &str) -> Option<NaiveDate> {
    let [day, month, year] = split_token(token)?;
    calendar_date(
        numeric(year, 4, 4)?,
        numeric(month, 1, 2)?,
        numeric(day, 1, 2)?,
    )
}

fn year_first(token: &str) -> Option<NaiveDate> {
    let [year, month, day] = split_token(token)?;
    calendar_date(
        numeric(year, 4, 4)?,
        numeric(month, 1, 2)?,
        numeric(day, 1, 2)?,
    )
}

fn iso_fallback(token: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Some(dt.date_naive());
    }

    [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ]
    .iter()
    .find_map(|format| NaiveDateTime::parse_from_str(token, format).ok())
    .map(|dt| dt.date())
}

// The first separator found decides the token's separator; mixing `/` and `-`
// leaves fewer than three fields and fails the match.
fn split_token(token: &str) -> Option<[&str; 3]> {
    let separator = token.chars().find(|c| matches!(c, '/' | '-'))?;
    let mut fields = token.split(separator);
    let parts = [fields.next()?, fields.next()?, fields.next()?];
    if fields.next().is_some() {
        return None;
    }
    Some(parts)
}

fn numeric(field: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if field.len() < min_len || field.len() > max_len {
        return None;
    }
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn calendar_date(year: u32, month: u32, day: u32) -> Option<NaiveDate> {
    let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;
    let round_trips = u32::try_from(date.year()).ok() == Some(year)
        && date.month() == month
        && date.day() == day;
    round_trips.then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn parses_day_first_with_either_separator() {
        assert_eq!(parse_date(Some("22/05/2025")), Ok(ymd(2025, 5, 22)));
        assert_eq!(parse_date(Some("22-05-2025")), Ok(ymd(2025, 5, 22)));
        assert_eq!(parse_date(Some("2/5/2025")), Ok(ymd(2025, 5, 2)));
        assert_eq!(
            parse_date(Some("22-05-2025")),
            parse_date(Some("22/05/2025"))
        );
    }

    #[test]
    fn parses_year_first_and_iso_timestamps() {
        assert_eq!(parse_date(Some("2025/05/22")), Ok(ymd(2025, 5, 22)));
        assert_eq!(parse_date(Some("2025-5-2")), Ok(ymd(2025, 5, 2)));
        assert_eq!(
            parse_date(Some("2025-05-22T10:00:00Z")),
            Ok(ymd(2025, 5, 22))
        );
        assert_eq!(
            parse_date(Some("2025-05-22T23:30:00+08:00")),
            Ok(ymd(2025, 5, 22))
        );
        assert_eq!(
            parse_date(Some("2025-05-22 08:15:00")),
            Ok(ymd(2025, 5, 22))
        );
        assert_eq!(parse_date(Some("2025-05-22T10:00")), Ok(ymd(2025, 5, 22)));
        assert_eq!(parse_date(Some("2025-05-22 10:00")), Ok(ymd(2025, 5, 22)));
    }

    #[test]
    fn empty_and_sentinel_inputs_are_not_malformed() {
        assert_eq!(parse_date(None), Err(DateError::Empty));
        assert_eq!(parse_date(Some("")), Err(DateError::Empty));
        assert_eq!(parse_date(Some("   ")), Err(DateError::Empty));
        assert_eq!(parse_date(Some("NA")), Err(DateError::NotApplicable));
        assert_eq!(parse_date(Some("na")), Err(DateError::NotApplicable));
        assert_eq!(parse_date(Some("  NA  ")), Err(DateError::NotApplicable));
    }

    #[test]
    fn rejects_impossible_and_ambiguous_dates() {
        for raw in [
            "31/02/2025",
            "29/02/2025",
            "31/04/2025",
            "05/22/2025",
            "00/05/2025",
            "22/05/25",
            "22/05-2025",
            "22/05/2025/01",
            "2025/13/01",
            "tomorrow",
            "+1/05/2025",
        ] {
            assert_eq!(
                parse_date(Some(raw)),
                Err(DateError::Malformed {
                    raw: raw.to_string()
                }),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn accepts_leap_day_in_leap_year() {
        assert_eq!(parse_date(Some("29/02/2024")), Ok(ymd(2024, 2, 29)));
    }

    #[test]
    fn malformed_error_keeps_trimmed_raw_text() {
        assert_eq!(
            parse_date(Some("  soon ")),
            Err(DateError::Malformed {
                raw: "soon".to_string()
            })
        );
    }

    #[test]
    fn format_round_trips_normalised_day_first_strings() {
        for (raw, normalised) in [
            ("22/05/2025", "22/05/2025"),
            ("2/5/2025", "02/05/2025"),
            ("01/12/1999", "01/12/1999"),
            ("7-3-2030", "07/03/2030"),
        ] {
            let parsed = parse_date(Some(raw)).expect("valid date");
            assert_eq!(format_date(parsed), normalised);
        }
    }

    #[test]
    fn every_day_round_trips_padded_and_unpadded() {
        let mut day = ymd(2023, 1, 1);
        while day <= ymd(2025, 12, 31) {
            let padded = format_date(day);
            let unpadded = format!("{}/{}/{}", day.day(), day.month(), day.year());
            for raw in [padded.as_str(), unpadded.as_str()] {
                let parsed = parse_date(Some(raw)).expect("valid day-first date");
                assert_eq!(parsed, day, "{raw}");
                assert_eq!(format_date(parsed), padded, "{raw}");
            }
            day = day.succ_opt().expect("next day");
        }
    }

    #[test]
    fn days_remaining_counts_calendar_days() {
        let expiry = ymd(2025, 5, 22);
        assert_eq!(days_remaining(expiry, ymd(2025, 5, 22)), 0);
        assert_eq!(days_remaining(expiry, ymd(2025, 5, 21)), 1);
        assert_eq!(days_remaining(expiry, ymd(2025, 5, 23)), -1);
    }

    #[test]
    fn days_remaining_decreases_by_one_across_leap_february() {
        let expiry = ymd(2024, 3, 10);
        let mut today = ymd(2024, 2, 25);
        let mut previous = days_remaining(expiry, today);
        while today < ymd(2024, 3, 5) {
            today = today.succ_opt().expect("next day");
            let current = days_remaining(expiry, today);
            assert_eq!(current, previous - 1, "drift at {today}");
            previous = current;
        }
        assert_eq!(days_remaining(ymd(2024, 3, 1), ymd(2024, 2, 28)), 2);
    }

    #[test]
    fn days_remaining_decreases_by_one_across_year_end() {
        let expiry = ymd(2025, 1, 3);
        let mut today = ymd(2024, 12, 28);
        let mut previous = days_remaining(expiry, today);
        while today < ymd(2025, 1, 5) {
            today = today.succ_opt().expect("next day");
            let current = days_remaining(expiry, today);
            assert_eq!(current, previous - 1, "drift at {today}");
            previous = current;
        }
    }
}
