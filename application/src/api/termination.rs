//! [`TerminationDate`]-related definitions.

use common::Date;
use juniper::{graphql_object, GraphQLEnum};
use service::domain;

use crate::Context;

/// Language to render a date in.
#[derive(Clone, Copy, Debug, Default, Eq, GraphQLEnum, PartialEq)]
pub enum Locale {
    /// German.
    #[default]
    De,

    /// French.
    Fr,

    /// Italian.
    It,

    /// English.
    En,
}

impl From<Locale> for common::Locale {
    fn from(locale: Locale) -> Self {
        match locale {
            Locale::De => Self::De,
            Locale::Fr => Self::Fr,
            Locale::It => Self::It,
            Locale::En => Self::En,
        }
    }
}

/// Earliest date the current rent terms may be changed at.
#[derive(Clone, Copy, Debug)]
pub struct TerminationDate(domain::TerminationDate);

impl From<domain::TerminationDate> for TerminationDate {
    fn from(date: domain::TerminationDate) -> Self {
        Self(date)
    }
}

/// Earliest quarter end the current rent terms may be changed at, respecting
/// the statutory notice period.
#[graphql_object(context = Context)]
impl TerminationDate {
    /// Calendar date of this `TerminationDate`.
    pub fn date(&self) -> Date {
        self.0.coerce()
    }

    /// This `TerminationDate` in a long human-readable form (like
    /// `30. Juni 2026`).
    pub fn formatted(
        &self,
        #[graphql(default = Locale::De)] locale: Locale,
    ) -> String {
        self.0.to_long_string(locale.into())
    }
}
