//! [`Query`] for calculating a [`RentReduction`].

use common::{DateTime, Money};
use derive_more::{Display, Error};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{reduction, Calculation, ContractDate},
    Service,
};

use super::Query;

/// [`Query`] calculating the rent reduction a tenant is entitled to.
#[derive(Clone, Copy, Debug)]
pub struct RentReduction {
    /// [`reduction::Input`] describing the rent.
    pub input: reduction::Input,

    /// Moment to calculate the reduction as of.
    ///
    /// [`DateTime::now()`] is used if [`None`].
    pub at: Option<DateTime>,
}

impl Query<RentReduction> for Service {
    type Ok = Calculation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: RentReduction,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RentReduction { input, at } = query;
        let now = at.unwrap_or_else(DateTime::now);

        if !input.current_rent.is_positive() {
            return Err(tracerr::new!(E::NonPositiveRent(input.current_rent)));
        }
        if input.current_rent.amount > reduction::MAX_RENT {
            return Err(tracerr::new!(E::RentOutOfRange(input.current_rent)));
        }
        if input.contract_date > now.date().coerce() {
            return Err(tracerr::new!(E::ContractDateInFuture(
                input.contract_date
            )));
        }

        let calculation =
            reduction::calculate(&self.config().reduction, &input, now);

        log::debug!(
            rate_change = %calculation.rate_change,
            reduction_percentage = %calculation.reduction_percentage,
            net_reduction = %calculation.net_reduction,
            "calculated rent reduction",
        );

        Ok(calculation)
    }
}

/// Error of [`RentReduction`] [`Query`] execution.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ExecutionError {
    /// Rent is zero or negative.
    #[display("Rent `{_0}` is not positive")]
    NonPositiveRent(#[error(not(source))] Money),

    /// Rent exceeds [`reduction::MAX_RENT`].
    #[display("Rent `{_0}` exceeds the supported maximum")]
    RentOutOfRange(#[error(not(source))] Money),

    /// [`ContractDate`] lies in the future.
    #[display("`ContractDate({_0})` is in the future")]
    ContractDateInFuture(#[error(not(source))] ContractDate),
}
