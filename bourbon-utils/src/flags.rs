//! `name: value` flag parsing for text moderation commands.
//!
//! A flag starts with a recognised name followed by a colon, at the start of
//! input or after whitespace. Its value runs up to the next recognised flag or
//! the end of input, so free text like `note: x` inside a reason is kept as is.

use std::fmt;

use poise::serenity_prelude as serenity;

use crate::parse::parse_until;

pub const REASON_FLAG: &str = "reason";
pub const DELETE_MESSAGE_DAYS_FLAG: &str = "delete_message_days";
pub const UNTIL_FLAG: &str = "until";

pub const DEFAULT_DELETE_MESSAGE_DAYS: u8 = 3;
/// Discord only accepts message purges of up to a week on ban.
pub const MAX_DELETE_MESSAGE_DAYS: u8 = 7;
pub const DEFAULT_TIMEOUT_SECS: i64 = 60 * 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlagError {
    LeadingText(String),
    Duplicate(&'static str),
    InvalidValue { flag: &'static str, value: String },
}

impl fmt::Display for FlagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeadingText(text) => write!(f, "expected a flag but found `{text}`"),
            Self::Duplicate(flag) => write!(f, "flag `{flag}` was given more than once"),
            Self::InvalidValue { flag, value } => {
                write!(f, "invalid value `{value}` for flag `{flag}`")
            }
        }
    }
}

impl std::error::Error for FlagError {}

/// Raw flag values keyed by their canonical name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagValues {
    values: Vec<(&'static str, String)>,
}

impl FlagValues {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(flag, _)| *flag == name)
            .map(|(_, value)| value.as_str())
    }
}

fn flag_at(input: &str, at: usize, known: &[&'static str]) -> Option<(&'static str, usize)> {
    let rest = &input[at..];
    known.iter().find_map(|name| {
        let head = rest.get(..name.len())?;
        let matches = head.eq_ignore_ascii_case(name) && rest[name.len()..].starts_with(':');
        matches.then_some((*name, at + name.len() + 1))
    })
}

/// Split `input` into values for the `known` flag names.
///
/// Empty values are treated as absent.
pub fn parse_flags(input: &str, known: &[&'static str]) -> Result<FlagValues, FlagError> {
    // (name, start of `name:`, start of value)
    let mut markers: Vec<(&'static str, usize, usize)> = Vec::new();
    let mut after_whitespace = true;
    for (idx, ch) in input.char_indices() {
        if after_whitespace && let Some((name, value_start)) = flag_at(input, idx, known) {
            markers.push((name, idx, value_start));
        }
        after_whitespace = ch.is_whitespace();
    }

    let first_flag = markers.first().map_or(input.len(), |(_, start, _)| *start);
    let leading = input[..first_flag].trim();
    if !leading.is_empty() {
        return Err(FlagError::LeadingText(leading.to_owned()));
    }

    let mut values = FlagValues::default();
    for (idx, &(name, _, value_start)) in markers.iter().enumerate() {
        if markers[..idx].iter().any(|(seen, _, _)| *seen == name) {
            return Err(FlagError::Duplicate(name));
        }

        let value_end = markers.get(idx + 1).map_or(input.len(), |(_, start, _)| *start);
        let value = input[value_start..value_end].trim();
        if !value.is_empty() {
            values.values.push((name, value.to_owned()));
        }
    }

    Ok(values)
}

/// Flags shared by every moderation command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModerationFlags {
    pub reason: Option<String>,
}

impl ModerationFlags {
    pub fn parse(input: Option<&str>) -> Result<Self, FlagError> {
        let values = parse_flags(input.unwrap_or_default(), &[REASON_FLAG])?;
        Ok(Self::from_values(&values))
    }

    fn from_values(values: &FlagValues) -> Self {
        Self {
            reason: values.get(REASON_FLAG).map(str::to_owned),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BanFlags {
    pub reason: Option<String>,
    pub delete_message_days: u8,
}

impl BanFlags {
    pub fn parse(input: Option<&str>) -> Result<Self, FlagError> {
        let values = parse_flags(
            input.unwrap_or_default(),
            &[REASON_FLAG, DELETE_MESSAGE_DAYS_FLAG],
        )?;

        let delete_message_days = match values.get(DELETE_MESSAGE_DAYS_FLAG) {
            Some(raw) => {
                let days = raw.parse::<i64>().map_err(|_| FlagError::InvalidValue {
                    flag: DELETE_MESSAGE_DAYS_FLAG,
                    value: raw.to_owned(),
                })?;
                Self::clamp_delete_message_days(days)
            }
            None => Self::default_delete_message_days(),
        };

        Ok(Self {
            reason: ModerationFlags::from_values(&values).reason,
            delete_message_days,
        })
    }

    pub fn default_delete_message_days() -> u8 {
        DEFAULT_DELETE_MESSAGE_DAYS
    }

    pub fn clamp_delete_message_days(days: i64) -> u8 {
        days.clamp(0, i64::from(MAX_DELETE_MESSAGE_DAYS)) as u8
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeoutFlags {
    pub reason: Option<String>,
    pub until: serenity::Timestamp,
}

impl TimeoutFlags {
    /// Parse timeout flags, resolving `until` against the time the command was invoked.
    pub fn parse(input: Option<&str>, invoked_at: serenity::Timestamp) -> Result<Self, FlagError> {
        let values = parse_flags(input.unwrap_or_default(), &[REASON_FLAG, UNTIL_FLAG])?;

        let until = match values.get(UNTIL_FLAG) {
            Some(raw) => parse_until(raw, invoked_at).ok_or_else(|| FlagError::InvalidValue {
                flag: UNTIL_FLAG,
                value: raw.to_owned(),
            })?,
            None => Self::default_until(invoked_at).ok_or_else(|| FlagError::InvalidValue {
                flag: UNTIL_FLAG,
                value: invoked_at.to_string(),
            })?,
        };

        Ok(Self {
            reason: ModerationFlags::from_values(&values).reason,
            until,
        })
    }

    pub fn default_until(invoked_at: serenity::Timestamp) -> Option<serenity::Timestamp> {
        let unix = invoked_at.unix_timestamp().checked_add(DEFAULT_TIMEOUT_SECS)?;
        serenity::Timestamp::from_unix_timestamp(unix).ok()
    }
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use super::{
        BanFlags, DELETE_MESSAGE_DAYS_FLAG, FlagError, ModerationFlags, REASON_FLAG,
        TimeoutFlags, UNTIL_FLAG, parse_flags,
    };

    fn invoked_at() -> serenity::Timestamp {
        serenity::Timestamp::from_unix_timestamp(1_700_000_000).unwrap()
    }

    #[test]
    fn empty_input_yields_defaults() {
        assert_eq!(ModerationFlags::parse(None).unwrap().reason, None);

        let ban = BanFlags::parse(Some("   ")).unwrap();
        assert_eq!(ban.reason, None);
        assert_eq!(ban.delete_message_days, 3);

        let timeout = TimeoutFlags::parse(None, invoked_at()).unwrap();
        assert_eq!(timeout.until.unix_timestamp(), 1_700_000_000 + 3_600);
    }

    #[test]
    fn values_run_until_the_next_flag() {
        let ban = BanFlags::parse(Some("reason: posting scam links delete_message_days: 1"))
            .unwrap();
        assert_eq!(ban.reason.as_deref(), Some("posting scam links"));
        assert_eq!(ban.delete_message_days, 1);

        let ban = BanFlags::parse(Some("delete_message_days:0 reason:spam")).unwrap();
        assert_eq!(ban.reason.as_deref(), Some("spam"));
        assert_eq!(ban.delete_message_days, 0);
    }

    #[test]
    fn names_are_case_insensitive() {
        let flags = ModerationFlags::parse(Some("Reason: shouting")).unwrap();
        assert_eq!(flags.reason.as_deref(), Some("shouting"));
    }

    #[test]
    fn unrecognised_names_stay_inside_values() {
        let flags = ModerationFlags::parse(Some("reason: see note: appeal denied")).unwrap();
        assert_eq!(flags.reason.as_deref(), Some("see note: appeal denied"));

        // `until` is only a flag for timeouts.
        let flags = ModerationFlags::parse(Some("reason: until: tomorrow")).unwrap();
        assert_eq!(flags.reason.as_deref(), Some("until: tomorrow"));
    }

    #[test]
    fn flag_names_must_start_a_word() {
        let values = parse_flags("reason: treason:ous", &[REASON_FLAG]).unwrap();
        assert_eq!(values.get(REASON_FLAG), Some("treason:ous"));
    }

    #[test]
    fn leading_text_is_rejected() {
        assert_eq!(
            ModerationFlags::parse(Some("spam reason: x")),
            Err(FlagError::LeadingText("spam".to_owned()))
        );
        assert_eq!(
            ModerationFlags::parse(Some("just spam")),
            Err(FlagError::LeadingText("just spam".to_owned()))
        );
    }

    #[test]
    fn duplicate_flags_are_rejected() {
        assert_eq!(
            ModerationFlags::parse(Some("reason: a reason: b")),
            Err(FlagError::Duplicate(REASON_FLAG))
        );
    }

    #[test]
    fn delete_message_days_is_validated_and_clamped() {
        assert_eq!(
            BanFlags::parse(Some("delete_message_days: lots")),
            Err(FlagError::InvalidValue {
                flag: DELETE_MESSAGE_DAYS_FLAG,
                value: "lots".to_owned(),
            })
        );
        assert_eq!(
            BanFlags::parse(Some("delete_message_days: 30"))
                .unwrap()
                .delete_message_days,
            7
        );
        assert_eq!(
            BanFlags::parse(Some("delete_message_days: -2"))
                .unwrap()
                .delete_message_days,
            0
        );
    }

    #[test]
    fn timeout_until_is_resolved_at_parse_time() {
        let flags = TimeoutFlags::parse(Some("until: 2h reason: cool off"), invoked_at()).unwrap();
        assert_eq!(flags.until.unix_timestamp(), 1_700_000_000 + 7_200);
        assert_eq!(flags.reason.as_deref(), Some("cool off"));

        assert_eq!(
            TimeoutFlags::parse(Some("until: yesterday"), invoked_at()),
            Err(FlagError::InvalidValue {
                flag: UNTIL_FLAG,
                value: "yesterday".to_owned(),
            })
        );
    }
}
