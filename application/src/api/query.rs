//! GraphQL [`Query`]s definitions.

use common::DateTime;
use juniper::graphql_object;
use service::{
    query::{self, next_termination_date, rent_reduction},
    Query as _,
};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Calculates the rent reduction a tenant is entitled to after a drop of
    /// the reference interest rate.
    ///
    /// The current moment is used if `at` is not provided.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NON_POSITIVE_RENT` - the provided rent is zero or negative;
    /// - `RENT_OUT_OF_RANGE` - the provided rent exceeds the supported
    ///                         maximum;
    /// - `CONTRACT_DATE_IN_FUTURE` - the provided contract date is after
    ///                               the `at` date.
    #[tracing::instrument(
        skip_all,
        fields(
            at = ?at.map(|at| at.to_rfc3339()),
            contract_date = %input.contract_date,
            current_rent = %input.current_rent,
            gql.name = "rentReduction",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn rent_reduction(
        input: api::RentReductionInput,
        at: Option<DateTime>,
        ctx: &Context,
    ) -> Result<api::RentReduction, Error> {
        ctx.service()
            .execute(query::RentReduction {
                input: input.into(),
                at,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Resolves the earliest date the current rent terms may be changed at,
    /// if a notice is given at the provided moment.
    ///
    /// The current moment is used if `at` is not provided.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `DATE_OUT_OF_RANGE` - the termination date is not representable.
    #[tracing::instrument(
        skip_all,
        fields(
            at = ?at.map(|at| at.to_rfc3339()),
            gql.name = "terminationDate",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn termination_date(
        at: Option<DateTime>,
        ctx: &Context,
    ) -> Result<api::TerminationDate, Error> {
        ctx.service()
            .execute(query::NextTerminationDate { at })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for rent_reduction::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NON_POSITIVE_RENT"]
                #[status = BAD_REQUEST]
                #[message = "Rent must be positive"]
                NonPositiveRent,

                #[code = "RENT_OUT_OF_RANGE"]
                #[status = BAD_REQUEST]
                #[message = "Rent exceeds the supported maximum"]
                RentOutOfRange,

                #[code = "CONTRACT_DATE_IN_FUTURE"]
                #[status = BAD_REQUEST]
                #[message = "Contract date must not be in the future"]
                ContractDateInFuture,
            }
        }

        Some(
            match self {
                Self::NonPositiveRent(_) => Error::NonPositiveRent,
                Self::RentOutOfRange(_) => Error::RentOutOfRange,
                Self::ContractDateInFuture(_) => Error::ContractDateInFuture,
            }
            .into(),
        )
    }
}

impl AsError for next_termination_date::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "DATE_OUT_OF_RANGE"]
                #[status = BAD_REQUEST]
                #[message = "Termination date is out of the supported range"]
                OutOfRange,
            }
        }

        match self {
            Self::OutOfRange(_) => Some(Error::OutOfRange.into()),
        }
    }
}
