//! [`TerminationDate`] resolving.
//!
//! A rent change may only take effect on a quarter end, and must be announced
//! with a statutory notice period before it.

use common::{Date, DateOf};
use smart_default::SmartDefault;

/// Marker type describing a termination of the current rent terms.
#[derive(Clone, Copy, Debug)]
pub struct Termination;

/// Date when the current rent terms may be changed at the earliest.
pub type TerminationDate = DateOf<Termination>;

/// Quarter ends (month and day) a rent change may take effect on.
const QUARTER_ENDS: [(u8, u8); 4] = [(3, 31), (6, 30), (9, 30), (12, 31)];

/// Rules of resolving a [`TerminationDate`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Rules {
    /// Statutory notice period, in calendar months.
    #[default(3)]
    pub notice_months: u8,
}

/// Resolves the next [`TerminationDate`] for a notice given on the provided
/// `today` date.
///
/// The notice deadline is `today` plus [`Rules::notice_months`] (overflowing
/// into the next month if the day doesn't exist). The first quarter end of the
/// `today`'s year strictly after that deadline is returned, falling back to
/// the March 31 of the next year otherwise.
///
/// [`None`] is returned if the dates leave the supported range.
#[must_use]
pub fn next_termination_date(
    rules: &Rules,
    today: Date,
) -> Option<TerminationDate> {
    let deadline = today.checked_add_months(rules.notice_months)?;
    let year = today.year();

    QUARTER_ENDS
        .iter()
        .filter_map(|&(month, day)| {
            Date::from_calendar_date(year, month, day)
        })
        .find(|end| *end > deadline)
        .or_else(|| {
            let (month, day) = QUARTER_ENDS[0];
            Date::from_calendar_date(year.checked_add(1)?, month, day)
        })
        .map(Date::coerce)
}
