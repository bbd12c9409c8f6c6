use poise::serenity_prelude as serenity;

/// Parse a compact duration token like `30s`, `10m`, `2h`, `1d`, `1h30m`, or plain seconds.
pub fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let compact: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let bytes = compact.as_bytes();
    let mut cursor = 0;
    let mut total_seconds = 0_u64;
    let mut saw_unit_segment = false;

    while cursor < bytes.len() {
        let number_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }

        if number_start == cursor {
            return None;
        }

        let number = compact[number_start..cursor].parse::<u64>().ok()?;
        if number == 0 {
            return None;
        }

        let saw_unit = cursor < bytes.len();
        let multiplier = if saw_unit {
            let unit = bytes[cursor] as char;
            cursor += 1;

            match unit {
                's' | 'S' => 1_u64,
                'm' | 'M' => 60_u64,
                'h' | 'H' => 60_u64 * 60,
                'd' | 'D' => 60_u64 * 60 * 24,
                _ => return None,
            }
        } else {
            1_u64
        };

        if !saw_unit && saw_unit_segment {
            return None;
        }

        saw_unit_segment = saw_unit_segment || saw_unit;

        let part_seconds = number.checked_mul(multiplier)?;
        total_seconds = total_seconds.checked_add(part_seconds)?;
    }

    if total_seconds == 0 {
        None
    } else {
        Some(total_seconds)
    }
}

/// Rewrite `YYYY-MM-DD HH:MM[:SS]` (no offset) into an RFC 3339 UTC timestamp.
fn naive_datetime_as_utc(raw: &str) -> Option<String> {
    let (date, time) = raw.split_once(char::is_whitespace)?;
    let time = time.trim();

    let is_date = date.len() == 10
        && date
            .char_indices()
            .all(|(idx, ch)| if idx == 4 || idx == 7 { ch == '-' } else { ch.is_ascii_digit() });
    let is_time = matches!(time.len(), 5 | 8)
        && time
            .char_indices()
            .all(|(idx, ch)| if idx == 2 || idx == 5 { ch == ':' } else { ch.is_ascii_digit() });
    if !is_date || !is_time {
        return None;
    }

    let seconds = if time.len() == 5 { ":00" } else { "" };
    Some(format!("{date}T{time}{seconds}Z"))
}

/// Resolve a timeout `until` value against the invocation time.
///
/// Accepts a compact duration relative to `now`, an absolute RFC 3339
/// timestamp, or `YYYY-MM-DD HH:MM[:SS]` read as UTC. Returns `None` for
/// unparseable input and for instants that are not strictly after `now`.
pub fn parse_until(raw: &str, now: serenity::Timestamp) -> Option<serenity::Timestamp> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let until = match parse_duration_seconds(value) {
        Some(seconds) => {
            let seconds = i64::try_from(seconds).ok()?;
            let unix = now.unix_timestamp().checked_add(seconds)?;
            serenity::Timestamp::from_unix_timestamp(unix).ok()?
        }
        None => match naive_datetime_as_utc(value) {
            Some(rfc3339) => serenity::Timestamp::parse(&rfc3339).ok()?,
            None => serenity::Timestamp::parse(value).ok()?,
        },
    };

    (until.unix_timestamp() > now.unix_timestamp()).then_some(until)
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use super::{parse_duration_seconds, parse_until};

    fn now() -> serenity::Timestamp {
        serenity::Timestamp::from_unix_timestamp(1_700_000_000).unwrap()
    }

    #[test]
    fn parses_compact_durations() {
        assert_eq!(parse_duration_seconds("30s"), Some(30));
        assert_eq!(parse_duration_seconds("10m"), Some(600));
        assert_eq!(parse_duration_seconds("2h"), Some(7_200));
        assert_eq!(parse_duration_seconds("1d"), Some(86_400));
        assert_eq!(parse_duration_seconds("1h30m"), Some(5_400));
        assert_eq!(parse_duration_seconds("1h 30m"), Some(5_400));
        assert_eq!(parse_duration_seconds("45"), Some(45));
    }

    #[test]
    fn rejects_malformed_durations() {
        assert_eq!(parse_duration_seconds(""), None);
        assert_eq!(parse_duration_seconds("0m"), None);
        assert_eq!(parse_duration_seconds("5w"), None);
        assert_eq!(parse_duration_seconds("1h30"), None);
        assert_eq!(parse_duration_seconds("soon"), None);
    }

    #[test]
    fn until_accepts_relative_durations() {
        let until = parse_until("1h", now()).unwrap();
        assert_eq!(until.unix_timestamp(), 1_700_000_000 + 3_600);
    }

    #[test]
    fn until_accepts_absolute_timestamps() {
        let until = parse_until("2023-11-15T00:00:00Z", now()).unwrap();
        assert_eq!(until.unix_timestamp(), 1_700_006_400);
    }

    #[test]
    fn until_reads_dates_without_offset_as_utc() {
        let until = parse_until("2023-11-15 00:00", now()).unwrap();
        assert_eq!(until.unix_timestamp(), 1_700_006_400);

        let until = parse_until("2023-11-15 00:00:30", now()).unwrap();
        assert_eq!(until.unix_timestamp(), 1_700_006_430);

        assert!(parse_until("2023-11-15 24:61", now()).is_none());
        assert!(parse_until("15/11/2023 00:00", now()).is_none());
    }

    #[test]
    fn until_rejects_past_and_garbage() {
        assert!(parse_until("2020-01-01T00:00:00Z", now()).is_none());
        assert!(parse_until("next tuesday", now()).is_none());
        assert!(parse_until("   ", now()).is_none());
    }
}
