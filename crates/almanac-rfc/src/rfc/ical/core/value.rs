//! Typed readings of property values (RFC 5545 §3.3).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::parameter::{Parameter, names};
use super::{Component, ComponentKind, Property};

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";
const DATE_FORMAT_LEN: usize = 8;

/// A DATE or DATE-TIME value in one of its RFC 5545 forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeValue {
    /// `VALUE=DATE`, e.g. `20240101`.
    Date(NaiveDate),
    /// Local time without a zone, e.g. `20240101T090000`.
    Floating(NaiveDateTime),
    /// UTC time, e.g. `20240101T090000Z`.
    Utc(DateTime<Utc>),
    /// Local time with a resolvable `TZID`.
    Zoned(DateTime<Tz>),
}

impl DateTimeValue {
    /// Returns the UTC instant, if this value pins one down.
    #[must_use]
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Utc(dt) => Some(*dt),
            Self::Zoned(dt) => Some(dt.with_timezone(&Utc)),
            Self::Date(_) | Self::Floating(_) => None,
        }
    }

    /// Interprets a floating value in `tz`; other forms are returned unchanged.
    #[must_use]
    pub fn in_zone(self, tz: Tz) -> Self {
        match self {
            Self::Floating(naive) => localize(tz, naive).map_or(self, Self::Zoned),
            other => other,
        }
    }
}

/// Resolves a local time, taking the earlier instant when it is ambiguous.
fn localize(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest()
}

/// Looks up an IANA zone identifier, accepting the `/`-prefixed global form.
#[must_use]
pub fn lookup_tz(tzid: &str) -> Option<Tz> {
    let tzid = tzid.trim();
    tzid.strip_prefix('/').unwrap_or(tzid).parse().ok()
}

impl Property {
    /// Creates a DATE or DATE-TIME property, adding `VALUE=DATE` or `TZID` as needed.
    #[must_use]
    pub fn date_time(name: impl Into<String>, value: &DateTimeValue) -> Self {
        match value {
            DateTimeValue::Date(date) => Self::new(name, date.format(DATE_FORMAT).to_string())
                .with_param(Parameter::value_type("DATE")),
            DateTimeValue::Floating(naive) => {
                Self::new(name, naive.format(DATE_TIME_FORMAT).to_string())
            }
            DateTimeValue::Utc(dt) => {
                Self::new(name, format!("{}Z", dt.format(DATE_TIME_FORMAT)))
            }
            DateTimeValue::Zoned(dt) => {
                Self::new(name, dt.naive_local().format(DATE_TIME_FORMAT).to_string())
                    .with_param(Parameter::tzid(dt.timezone().name()))
            }
        }
    }

    /// Reads the value as DATE or DATE-TIME.
    ///
    /// A `TZID` that names a known zone yields [`DateTimeValue::Zoned`]; an unknown one
    /// leaves the value floating. Returns `None` if the value is not a date.
    #[must_use]
    pub fn as_date_time(&self) -> Option<DateTimeValue> {
        let raw = self.value().trim();
        let is_date = self
            .value_type()
            .is_some_and(|v| v.eq_ignore_ascii_case("DATE"));

        if is_date || raw.len() == DATE_FORMAT_LEN {
            return NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .map(DateTimeValue::Date);
        }

        if let Some(utc) = raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
            let naive = NaiveDateTime::parse_from_str(utc, DATE_TIME_FORMAT).ok()?;
            return Some(DateTimeValue::Utc(Utc.from_utc_datetime(&naive)));
        }

        let naive = NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT).ok()?;
        let floating = DateTimeValue::Floating(naive);
        match self.tzid() {
            Some(tzid) => match lookup_tz(tzid) {
                Some(tz) => Some(floating.in_zone(tz)),
                None => {
                    tracing::debug!(tzid, "Unknown TZID, keeping floating time");
                    Some(floating)
                }
            },
            None => Some(floating),
        }
    }

    /// Reads a `GEO` value as `(latitude, longitude)`.
    #[must_use]
    pub fn geo(&self) -> Option<(f64, f64)> {
        let (lat, lon) = self.value().split_once(';')?;
        Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
    }

    /// Decodes an `ENCODING=BASE64` value (e.g. an inline `ATTACH`).
    ///
    /// Returns `None` for other encodings or malformed data.
    #[must_use]
    pub fn binary(&self) -> Option<Vec<u8>> {
        let encoding = self.param_value(names::ENCODING)?;
        if !encoding.eq_ignore_ascii_case("BASE64") {
            return None;
        }
        match STANDARD.decode(self.value().trim()) {
            Ok(bytes) => Some(bytes),
            Err(error) => {
                tracing::debug!(%error, property = self.name(), "Invalid BASE64 value");
                None
            }
        }
    }

    /// Creates a property carrying binary data as `ENCODING=BASE64;VALUE=BINARY`.
    #[must_use]
    pub fn binary_data(name: impl Into<String>, data: &[u8]) -> Self {
        Self::new(name, STANDARD.encode(data))
            .with_param(Parameter::new(names::ENCODING, "BASE64"))
            .with_param(Parameter::value_type("BINARY"))
    }
}

impl Component {
    /// Returns the zone named by a VTIMEZONE's `TZID`, if it is a known identifier.
    #[must_use]
    pub fn tz(&self) -> Option<Tz> {
        if self.kind() != ComponentKind::Timezone {
            return None;
        }
        lookup_tz(self.property("TZID")?.value())
    }

    /// Reads `property` as a date, falling back to this calendar's first VTIMEZONE for
    /// floating times without a `TZID`.
    #[must_use]
    pub fn resolve_date_time(&self, property: &Property) -> Option<DateTimeValue> {
        let value = property.as_date_time()?;
        if !matches!(value, DateTimeValue::Floating(_)) || property.tzid().is_some() {
            return Some(value);
        }
        let tz = self.timezones().first().and_then(|tz| tz.tz());
        Some(tz.map_or(value, |tz| value.in_zone(tz)))
    }
}
