//! Date and time utilities.

use std::{cmp::Ordering, fmt, marker::PhantomData};

use derive_more::{Debug, Display, Error};
use time::{
    format_description::well_known::{Iso8601, Rfc3339},
    UtcOffset,
};

use crate::Locale;

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Creates a new [`DateTime`] representing the current date and time.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn now() -> Self {
        let inner = time::OffsetDateTime::now_utc();
        Self {
            _of: PhantomData,
            inner: inner
                .replace_microsecond(inner.microsecond())
                .expect("infallible"),
        }
    }

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        use ParseError as E;

        time::OffsetDateTime::parse(input, &Rfc3339)
            .map_err(E::Parse)?
            .try_into()
            .map_err(E::ComponentRange)
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }

    /// Returns the UTC calendar [`Date`] of this [`DateTime`].
    #[must_use]
    pub fn date(&self) -> Date {
        Date {
            inner: self.inner.date(),
            _of: PhantomData,
        }
    }

    /// Returns the number of whole milliseconds elapsed from the `earlier`
    /// [`DateTime`] to this one.
    ///
    /// The result is negative if `earlier` is actually later.
    #[must_use]
    pub fn millis_since<Other: ?Sized>(
        &self,
        earlier: &DateTimeOf<Other>,
    ) -> i128 {
        (self.inner - earlier.inner).whole_milliseconds()
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing [`DateTime`] or [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string.
    Parse(time::error::Parse),

    /// Parsed value has an out of range component.
    ComponentRange(time::error::ComponentRange),
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> TryFrom<time::OffsetDateTime> for DateTimeOf<Of> {
    type Error = time::error::ComponentRange;

    fn try_from(dt: time::OffsetDateTime) -> Result<Self, Self::Error> {
        dt.to_offset(UtcOffset::UTC)
            .replace_microsecond(dt.microsecond())
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
    }
}

/// Untyped calendar date.
pub type Date = DateOf;

/// Calendar date without a time zone.
#[derive(Debug)]
pub struct DateOf<Of: ?Sized = ()> {
    /// Inner representation of the date.
    inner: time::Date,

    /// Type parameter describing the kind of date.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateOf<Of> {
    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_calendar_date(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = time::Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day)
            .ok()
            .map(Self::wrap)
    }

    /// Creates a new [`Date`] from the provided `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [ISO 8601] calendar date.
    ///
    /// [ISO 8601]: https://wikipedia.org/wiki/ISO_8601
    pub fn from_iso8601(input: &str) -> Result<Self, ParseError> {
        time::Date::parse(input, &Iso8601::DATE)
            .map(Self::wrap)
            .map_err(ParseError::Parse)
    }

    /// Returns this [`Date`] as a `YYYY-MM-DD` string.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.year(),
            self.month(),
            self.day(),
        )
    }

    /// Returns the year of this [`Date`].
    #[must_use]
    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    /// Returns the month of this [`Date`] in `1..=12` range.
    #[must_use]
    pub fn month(&self) -> u8 {
        self.inner.month().into()
    }

    /// Returns the day of month of this [`Date`] in `1..=31` range.
    #[must_use]
    pub fn day(&self) -> u8 {
        self.inner.day()
    }

    /// Adds the provided number of calendar `months` to this [`Date`].
    ///
    /// The day of month is preserved. If it doesn't exist in the target month,
    /// the excess days overflow into the following month, so `2026-11-30`
    /// plus `3` months is `2027-03-02`.
    ///
    /// [`None`] is returned if the result is out of the supported range.
    #[must_use]
    pub fn checked_add_months(self, months: u8) -> Option<Self> {
        let index = i64::from(self.year()) * 12
            + i64::from(self.month() - 1)
            + i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u8::try_from(index.rem_euclid(12)).ok()? + 1;

        let first = time::Date::from_calendar_date(
            year,
            time::Month::try_from(month).ok()?,
            1,
        )
        .ok()?;
        first
            .checked_add(time::Duration::days(i64::from(self.day()) - 1))
            .map(Self::wrap)
    }

    /// Returns the [`DateTime`] of the midnight (UTC) starting this [`Date`].
    #[must_use]
    pub fn midnight(&self) -> DateTimeOf<Of> {
        DateTimeOf {
            inner: self.inner.midnight().assume_utc(),
            _of: PhantomData,
        }
    }

    /// Renders this [`Date`] in a long human-readable form of the provided
    /// [`Locale`] (like `31. März 2026`).
    #[must_use]
    pub fn to_long_string(&self, locale: Locale) -> String {
        let (day, year) = (self.day(), self.year());
        let month = locale.month_name(self.month());
        match locale {
            Locale::De => format!("{day}. {month} {year}"),
            Locale::Fr | Locale::It | Locale::En => {
                format!("{day} {month} {year}")
            }
        }
    }

    /// Coerces one kind of [`Date`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateOf<NewOf> {
        DateOf::wrap(self.inner)
    }

    /// Wraps the provided [`time::Date`].
    fn wrap(inner: time::Date) -> Self {
        Self {
            inner,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> fmt::Display for DateOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl<Of: ?Sized> Copy for DateOf<Of> {}
impl<Of: ?Sized> Clone for DateOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateOf<Of> {}
impl<Of: ?Sized> PartialEq for DateOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Date and time in a [RFC 3339] format with a microsecond precision.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[graphql_scalar(with = Self, parse_token(String))]
    type DateTime = crate::DateTime;

    impl DateTime {
        fn to_output<S: ScalarValue>(dt: &DateTime) -> Value<S> {
            Value::scalar(dt.to_rfc3339())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `DateTime` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_rfc3339(s).map_err(|e| {
                        format!("Cannot parse `DateTime` input scalar: {e}")
                    })
                })
        }
    }

    /// Calendar date in a `YYYY-MM-DD` format.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Date = crate::Date;

    impl Date {
        fn to_output<S: ScalarValue>(d: &Date) -> Value<S> {
            Value::scalar(d.to_iso8601())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Date` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_iso8601(s).map_err(|e| {
                        format!("Cannot parse `Date` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::Locale;

    use super::{Date, DateTime};

    fn date(s: &str) -> Date {
        Date::from_iso8601(s).unwrap()
    }

    #[test]
    fn parses_and_formats_iso8601() {
        let d = date("2023-06-02");
        assert_eq!((d.year(), d.month(), d.day()), (2023, 6, 2));
        assert_eq!(d.to_iso8601(), "2023-06-02");
        assert_eq!(d.to_string(), "2023-06-02");

        assert!(Date::from_iso8601("2023-02-30").is_err());
        assert!(Date::from_iso8601("02.06.2023").is_err());
        assert!(Date::from_calendar_date(2023, 13, 1).is_none());
    }

    #[test]
    fn adds_months_within_year() {
        assert_eq!(
            date("2026-01-15").checked_add_months(3).unwrap(),
            date("2026-04-15"),
        );
        assert_eq!(
            date("2026-03-31").checked_add_months(3).unwrap(),
            date("2026-07-01"),
        );
    }

    #[test]
    fn adds_months_across_year() {
        assert_eq!(
            date("2026-10-01").checked_add_months(3).unwrap(),
            date("2027-01-01"),
        );
        assert_eq!(
            date("2026-12-31").checked_add_months(3).unwrap(),
            date("2027-03-31"),
        );
    }

    #[test]
    fn overflows_missing_day_into_next_month() {
        assert_eq!(
            date("2026-11-30").checked_add_months(3).unwrap(),
            date("2027-03-02"),
        );
        assert_eq!(
            date("2027-11-30").checked_add_months(3).unwrap(),
            date("2028-03-01"),
        );
        assert_eq!(
            date("2026-11-29").checked_add_months(3).unwrap(),
            date("2027-03-01"),
        );
    }

    #[test]
    fn renders_long_form() {
        let d = date("2026-03-31");
        assert_eq!(d.to_long_string(Locale::De), "31. März 2026");
        assert_eq!(d.to_long_string(Locale::Fr), "31 mars 2026");
        assert_eq!(d.to_long_string(Locale::It), "31 marzo 2026");
        assert_eq!(d.to_long_string(Locale::En), "31 March 2026");

        assert_eq!(
            date("2026-12-01").to_long_string(Locale::De),
            "1. Dezember 2026",
        );
    }

    #[test]
    fn measures_elapsed_millis() {
        let now = DateTime::from_rfc3339("2026-06-02T12:00:00Z").unwrap();
        let midnight = date("2026-06-02").midnight();

        assert_eq!(now.millis_since(&midnight), 12 * 60 * 60 * 1000);
        assert_eq!(midnight.millis_since(&now), -12 * 60 * 60 * 1000);
        assert_eq!(now.date(), date("2026-06-02"));
    }
}
