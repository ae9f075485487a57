//! [`RentReduction`]-related definitions.

use common::{Date, Money, Percent};
use juniper::{graphql_object, GraphQLInputObject};
use service::domain::{self, reduction};

use crate::Context;

/// Rent to calculate a `RentReduction` for.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
pub struct RentReductionInput {
    /// Current monthly net rent (like `1500CHF`).
    pub current_rent: Money,

    /// Reference interest rate the current rent is based on.
    pub current_reference_rate: Percent,

    /// Currently published reference interest rate.
    pub new_reference_rate: Percent,

    /// Date the current rent is set since.
    pub contract_date: Date,
}

impl From<RentReductionInput> for reduction::Input {
    fn from(input: RentReductionInput) -> Self {
        Self {
            current_rent: input.current_rent,
            current_reference_rate: input.current_reference_rate,
            new_reference_rate: input.new_reference_rate,
            contract_date: input.contract_date.coerce(),
        }
    }
}

/// Rent reduction a tenant is entitled to.
#[derive(Clone, Debug)]
pub struct RentReduction(domain::Calculation);

impl From<domain::Calculation> for RentReduction {
    fn from(calculation: domain::Calculation) -> Self {
        Self(calculation)
    }
}

/// Rent reduction a tenant is entitled to after a reference interest rate
/// drop, along with the landlord's offsets.
#[graphql_object(context = Context)]
impl RentReduction {
    /// Drop of the reference interest rate, in percentage points.
    ///
    /// Negative if the rate has risen.
    pub fn rate_change(&self) -> String {
        self.0.rate_change.normalize().to_string()
    }

    /// Entitled reduction before any offsets, in percents of the rent.
    pub fn reduction_percentage(&self) -> Percent {
        self.0.reduction_percentage
    }

    /// Years elapsed since the contract date.
    pub fn years_since_contract(&self) -> String {
        self.0.years_since_contract.normalize().to_string()
    }

    /// Reduction before any offsets.
    pub fn gross_reduction(&self) -> Money {
        self.0.gross_reduction
    }

    /// Inflation share passed through by the landlord.
    pub fn inflation_offset(&self) -> Money {
        self.0.inflation_offset
    }

    /// General cost increase claimed by the landlord.
    pub fn cost_increase_offset(&self) -> Money {
        self.0.cost_increase_offset
    }

    /// Reduction after the offsets. Never negative.
    pub fn net_reduction(&self) -> Money {
        self.0.net_reduction
    }

    /// Monthly rent after the reduction.
    pub fn new_rent(&self) -> Money {
        self.0.new_rent
    }

    /// Savings over a year.
    pub fn yearly_savings(&self) -> Money {
        self.0.yearly_savings
    }

    /// Explanation of every calculation step, in German.
    pub fn details(&self) -> Vec<String> {
        self.0.details.clone()
    }
}
