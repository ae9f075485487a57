//! Domain definitions.

pub mod reduction;
pub mod termination;

pub use self::{
    reduction::{Calculation, ContractDate},
    termination::TerminationDate,
};
