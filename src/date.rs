//! Calendar-date helpers shared by the ingredient and meal-plan modules.
//!
//! The backend sends dates either as `YYYY-MM-DD` or as an ISO timestamp.
//! Only the calendar date is kept; the time of day is dropped on parse.

use time::{format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime};

const YMD: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn parse_calendar_date(raw: &str) -> Result<Date, time::error::Parse> {
    let raw = raw.trim();
    let head = raw.get(..10).unwrap_or(raw);
    Date::parse(head, YMD)
}

pub fn format_ymd(date: Date) -> String {
    // YMD only contains components every Date has.
    date.format(YMD).unwrap_or_default()
}

/// Today's date in the local offset, or UTC when the local offset is unknown.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// Serde adapter for `Date` fields carried as `YYYY-MM-DD` strings.
pub mod calendar_date {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_ymd(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_calendar_date(&raw).map_err(D::Error::custom)
    }

    pub mod option {
        use serde::{de::Error, Deserialize, Deserializer, Serializer};
        use time::Date;

        pub fn serialize<S: Serializer>(date: &Option<Date>, s: S) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => s.serialize_some(&super::super::format_ymd(*d)),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Date>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(raw) if !raw.trim().is_empty() => super::super::parse_calendar_date(&raw)
                    .map(Some)
                    .map_err(D::Error::custom),
                _ => Ok(None),
            }
        }
    }
}
