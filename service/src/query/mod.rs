//! [`Query`] definition.

pub mod next_termination_date;
pub mod rent_reduction;

/// [`Query`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Query;

pub use self::{
    next_termination_date::NextTerminationDate, rent_reduction::RentReduction,
};
