//! The store's fixed-width timestamp codec.
//!
//! Every date value crossing the provider boundary is the 25-byte ASCII
//! string `yyyymmddHHMMSS.ffffff±UUU`: 4-digit year, 2-digit month, day,
//! hour, minute and second, a literal `.`, 6-digit microseconds, then the
//! UTC offset in minutes with an explicit sign in exactly 3 digits. The
//! digits before the offset are wall-clock time *in* that offset.
//!
//! `to_store_timestamp` / `from_store_timestamp` round-trip losslessly
//! for any instant the grammar can carry (year 0–9999, offset within
//! ±999 minutes, microsecond precision).

use std::ops::Range;

use chrono::{DateTime, Datelike, FixedOffset, LocalResult, NaiveDate, TimeZone, Timelike};

use sw_domain::error::{Error, Result};

/// Total width of the encoded form.
const WIDTH: usize = 25;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Encoding
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Encode a native instant as a store timestamp.
///
/// Fails with [`Error::Format`] when the instant has no representation
/// in the grammar: year outside 0–9999, an offset that is not a whole
/// number of minutes or exceeds ±999 minutes, or a leap-second reading.
/// Sub-microsecond precision is truncated.
pub fn to_store_timestamp(t: DateTime<FixedOffset>) -> Result<String> {
    let year = t.year();
    if !(0..=9999).contains(&year) {
        return Err(Error::Format(format!(
            "year {year} does not fit the 4-digit timestamp field"
        )));
    }

    let offset_seconds = t.offset().local_minus_utc();
    if offset_seconds % 60 != 0 {
        return Err(Error::Format(format!(
            "UTC offset of {offset_seconds}s is not a whole number of minutes"
        )));
    }
    let offset_minutes = offset_seconds / 60;
    if offset_minutes.unsigned_abs() > 999 {
        return Err(Error::Format(format!(
            "UTC offset of {offset_minutes}min does not fit the 3-digit offset field"
        )));
    }

    // chrono represents a leap second as nanosecond >= 1e9, which would
    // need a 7-digit microsecond field.
    let micros = t.nanosecond() / 1_000;
    if micros > 999_999 {
        return Err(Error::Format(
            "leap-second instants are not representable".into(),
        ));
    }

    Ok(format!(
        "{year:04}{:02}{:02}{:02}{:02}{:02}.{micros:06}{}{:03}",
        t.month(),
        t.day(),
        t.hour(),
        t.minute(),
        t.second(),
        if offset_minutes < 0 { '-' } else { '+' },
        offset_minutes.unsigned_abs(),
    ))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Decoding
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Decode a store timestamp back into a native instant.
///
/// Fails with [`Error::Parse`] on any deviation from the grammar: wrong
/// length, a non-digit where a digit belongs, a missing `.` or sign, or
/// digit groups that do not name a real calendar instant (month 13,
/// February 30, hour 24, ...).
pub fn from_store_timestamp(text: &str) -> Result<DateTime<FixedOffset>> {
    let bytes = text.as_bytes();
    if bytes.len() != WIDTH {
        return Err(parse_err(
            text,
            &format!("expected {WIDTH} characters, got {}", bytes.len()),
        ));
    }
    if bytes[14] != b'.' {
        return Err(parse_err(text, "expected '.' after the seconds field"));
    }
    let sign: i32 = match bytes[21] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(parse_err(text, "expected '+' or '-' before the offset field")),
    };

    let year = digits(text, bytes, 0..4, "year")?;
    let month = digits(text, bytes, 4..6, "month")?;
    let day = digits(text, bytes, 6..8, "day")?;
    let hour = digits(text, bytes, 8..10, "hour")?;
    let minute = digits(text, bytes, 10..12, "minute")?;
    let second = digits(text, bytes, 12..14, "second")?;
    let micros = digits(text, bytes, 15..21, "microseconds")?;
    let offset_minutes = digits(text, bytes, 22..25, "offset")? as i32 * sign;

    let offset = FixedOffset::east_opt(offset_minutes * 60)
        .ok_or_else(|| parse_err(text, "offset out of range"))?;
    let naive = NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| parse_err(text, "no such calendar date"))?
        .and_hms_micro_opt(hour, minute, second, micros)
        .ok_or_else(|| parse_err(text, "no such time of day"))?;

    match offset.from_local_datetime(&naive) {
        LocalResult::Single(t) => Ok(t),
        _ => Err(parse_err(text, "not a representable instant")),
    }
}

/// Read one fixed-width decimal field out of `bytes[range]`.
fn digits(text: &str, bytes: &[u8], range: Range<usize>, field: &'static str) -> Result<u32> {
    let mut value: u32 = 0;
    for &b in &bytes[range] {
        if !b.is_ascii_digit() {
            return Err(parse_err(text, &format!("{field} field contains a non-digit")));
        }
        value = value * 10 + u32::from(b - b'0');
    }
    Ok(value)
}

fn parse_err(text: &str, msg: &str) -> Error {
    Error::Parse(format!("timestamp {text:?}: {msg}"))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn at(offset_minutes: i32, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_minutes * 60)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
    }

    #[test]
    fn encodes_the_reference_instant() {
        let t = at(0, 2024, 3, 1, 9, 30);
        assert_eq!(to_store_timestamp(t).unwrap(), "20240301093000.000000+000");
    }

    #[test]
    fn encodes_negative_offsets_with_a_minus_sign() {
        let t = at(-300, 2024, 3, 1, 9, 30);
        assert_eq!(to_store_timestamp(t).unwrap(), "20240301093000.000000-300");
    }

    #[test]
    fn round_trips_representative_instants() {
        let cases = [
            at(0, 2024, 1, 1, 0, 0),
            at(0, 2024, 6, 15, 13, 45),
            at(0, 1999, 12, 31, 23, 59),
            at(330, 2024, 6, 15, 13, 45),
            at(-300, 1987, 11, 2, 6, 5),
        ];
        for t in cases {
            let text = to_store_timestamp(t).unwrap();
            let back = from_store_timestamp(&text).unwrap();
            assert_eq!(back, t, "round trip failed for {text}");
            assert_eq!(back.offset(), t.offset(), "offset lost for {text}");
        }
    }

    #[test]
    fn round_trips_microseconds() {
        let t = at(60, 2024, 6, 15, 13, 45).with_nanosecond(123_456_000).unwrap();
        let text = to_store_timestamp(t).unwrap();
        assert_eq!(text, "20240615134500.123456+060");
        assert_eq!(from_store_timestamp(&text).unwrap(), t);
    }

    #[test]
    fn truncates_sub_microsecond_precision() {
        let t = at(0, 2024, 6, 15, 13, 45).with_nanosecond(123_456_789).unwrap();
        assert_eq!(to_store_timestamp(t).unwrap(), "20240615134500.123456+000");
    }

    #[test]
    fn rejects_years_outside_four_digits() {
        for t in [at(0, 10_000, 1, 1, 0, 0), at(0, -1, 1, 1, 0, 0)] {
            assert!(matches!(
                to_store_timestamp(t).unwrap_err(),
                Error::Format(_)
            ));
        }
    }

    #[test]
    fn rejects_offsets_wider_than_three_digits() {
        let t = at(1_000, 2024, 1, 1, 0, 0);
        assert!(matches!(to_store_timestamp(t).unwrap_err(), Error::Format(_)));
    }

    #[test]
    fn rejects_non_whole_minute_offsets() {
        // Amsterdam ran UTC+00:19:32 until 1937; the grammar cannot say that.
        let t = FixedOffset::east_opt(19 * 60 + 32)
            .unwrap()
            .with_ymd_and_hms(1920, 1, 1, 12, 0, 0)
            .unwrap();
        assert!(matches!(to_store_timestamp(t).unwrap_err(), Error::Format(_)));
    }

    #[test]
    fn parses_the_reference_instant() {
        let t = from_store_timestamp("20240301093000.000000+000").unwrap();
        assert_eq!(t, at(0, 2024, 3, 1, 9, 30));
    }

    #[test]
    fn rejects_wrong_lengths() {
        for text in ["", "20240301093000", "20240301093000.000000+0000"] {
            assert!(matches!(
                from_store_timestamp(text).unwrap_err(),
                Error::Parse(_)
            ));
        }
    }

    #[test]
    fn rejects_grammar_deviations() {
        let cases = [
            "20240301093000x000000+000", // '.' missing
            "20240301093000.000000*000", // bad sign
            "2024030109300o.000000+000", // letter in a digit field
            "20240301093000.0000ö+000",  // multi-byte char in a digit field (25 bytes)
        ];
        for text in cases {
            assert!(
                matches!(from_store_timestamp(text).unwrap_err(), Error::Parse(_)),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn rejects_impossible_calendar_components() {
        let cases = [
            "20241301093000.000000+000", // month 13
            "20240230093000.000000+000", // February 30
            "20240301240000.000000+000", // hour 24
            "20240301093060.000000+000", // second 60
        ];
        for text in cases {
            assert!(
                matches!(from_store_timestamp(text).unwrap_err(), Error::Parse(_)),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn minute_granular_values_round_trip_exactly() {
        let text = "19991231235900.000000+000";
        let t = from_store_timestamp(text).unwrap();
        assert_eq!(to_store_timestamp(t).unwrap(), text);
    }
}
