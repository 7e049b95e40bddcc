use std::fmt::Write;
use chrono::NaiveDateTime;
use tracing::warn;

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// month and day, e.g. "Oct 19"
pub const DUE_DATE_FMT: &str = "%b %-d";

// format_due renders a due date with a configured chrono pattern. A pattern chrono
// cannot render falls back to DUE_DATE_FMT.
pub fn format_due(due_at: NaiveDateTime, fmt: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", due_at.format(fmt)).is_ok() {
        return out;
    }
    warn!(fmt, "invalid due date format, using {}", DUE_DATE_FMT);
    due_at.format(DUE_DATE_FMT).to_string()
}

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time_to_json(*time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        let time = NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map_err(D::Error::custom)?;
        Ok(time)
    }

    pub(crate) fn time_to_json(t: NaiveDateTime) -> String {
        t.format(DATE_FMT).to_string()
    }
}

pub mod opt_serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;
    use crate::utils::date::serializer::time_to_json;

    pub fn serialize<S: Serializer>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_some(&time_to_json(*t)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_time {
            // ddb stores a missing date as an empty string
            Some(s) if !s.is_empty() => {
                NaiveDateTime::parse_from_str(&s, DATE_FMT).map(Some).map_err(D::Error::custom)
            }
            _ => Ok(None),
        }
    }
}
