//! GraphQL API definitions.

mod query;
pub mod reduction;
pub mod termination;

use juniper::{EmptyMutation, EmptySubscription};

use crate::Context;

pub use self::{
    query::Query,
    reduction::{RentReduction, RentReductionInput},
    termination::{Locale, TerminationDate},
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<
    'static,
    Query,
    EmptyMutation<Context>,
    EmptySubscription<Context>,
>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, EmptyMutation::new(), EmptySubscription::new())
}
