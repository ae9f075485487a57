//! [`Query`] for resolving a [`NextTerminationDate`].

use common::{Date, DateTime};
use derive_more::{Display, Error};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{termination, TerminationDate},
    Service,
};

use super::Query;

/// [`Query`] resolving the earliest [`TerminationDate`] for a notice given
/// at some moment.
#[derive(Clone, Copy, Debug, Default)]
pub struct NextTerminationDate {
    /// Moment the notice is given at.
    ///
    /// [`DateTime::now()`] is used if [`None`].
    pub at: Option<DateTime>,
}

impl Query<NextTerminationDate> for Service {
    type Ok = TerminationDate;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: NextTerminationDate,
    ) -> Result<Self::Ok, Self::Err> {
        let today = query.at.unwrap_or_else(DateTime::now).date();

        let date = termination::next_termination_date(
            &self.config().termination,
            today,
        )
        .ok_or(ExecutionError::OutOfRange(today))
        .map_err(tracerr::wrap!())?;

        log::debug!(%today, termination_date = %date, "resolved termination date");

        Ok(date)
    }
}

/// Error of [`NextTerminationDate`] [`Query`] execution.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ExecutionError {
    /// [`TerminationDate`] lies outside the supported calendar range.
    #[display("No `TerminationDate` is representable for a notice on {_0}")]
    OutOfRange(#[error(not(source))] Date),
}
