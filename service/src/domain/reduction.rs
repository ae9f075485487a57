//! Rent reduction [`Calculation`] after a reference interest rate drop.
//!
//! A drop of the published mortgage reference interest rate entitles a tenant
//! to a rent reduction, which the landlord may partially offset by a general
//! cost increase and by passing a share of the inflation through.

use std::cmp::Ordering;

use common::{DateOf, DateTime, Locale, Money, Percent};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use smart_default::SmartDefault;

/// Marker type describing a rent contract.
#[derive(Clone, Copy, Debug)]
pub struct Contract;

/// Date when a rent contract (or its last rent-setting reference rate) took
/// effect.
pub type ContractDate = DateOf<Contract>;

/// Reference rate drops (in percentage points) entitling a reduction, along
/// with the entitled share of the rent (in percents).
///
/// Every `0.25` points correspond to `2.91%` of the rent while the reference
/// rate stays below `2%`. Only the listed drops are recognized.
const STEPS: [(Decimal, Decimal); 3] = [
    (dec!(0.25), dec!(2.91)),
    (dec!(0.50), dec!(5.82)),
    (dec!(0.75), dec!(8.73)),
];

/// Milliseconds in a `365.25` days year.
const MILLIS_PER_YEAR: Decimal = dec!(31_557_600_000);

/// Number of months in a year.
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Largest monthly rent amount [`calculate()`] accepts.
///
/// Keeps every intermediate product within [`Decimal`] range for any pair of
/// supported dates.
pub const MAX_RENT: Decimal = dec!(1_000_000_000);

/// Rules of offsetting a reduction by the landlord.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Rules {
    /// Assumed inflation, in percentage points per year.
    #[default(dec!(2))]
    pub inflation_per_year: Decimal,

    /// Ceiling of the cumulative assumed inflation, in percents.
    #[default(dec!(5))]
    pub inflation_cap: Decimal,

    /// Share of the inflation the landlord may pass through onto the rent.
    #[default(dec!(0.4))]
    pub inflation_pass_through: Decimal,

    /// General cost increase, in percentage points per year (uncapped).
    #[default(dec!(0.5))]
    pub cost_increase_per_year: Decimal,
}

/// Input of a reduction [`Calculation`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Input {
    /// Current monthly net rent.
    pub current_rent: Money,

    /// Reference rate the current rent is based on.
    pub current_reference_rate: Percent,

    /// Currently published reference rate.
    pub new_reference_rate: Percent,

    /// [`ContractDate`] the current rent is set since.
    pub contract_date: ContractDate,
}

/// Breakdown of an entitled rent reduction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Calculation {
    /// Drop of the reference rate, in percentage points.
    ///
    /// Negative if the reference rate has risen.
    pub rate_change: Decimal,

    /// Entitled reduction before any offsets.
    pub reduction_percentage: Percent,

    /// Years elapsed since the [`ContractDate`].
    pub years_since_contract: Decimal,

    /// Reduction before any offsets.
    pub gross_reduction: Money,

    /// Inflation share passed through by the landlord.
    pub inflation_offset: Money,

    /// General cost increase claimed by the landlord.
    pub cost_increase_offset: Money,

    /// Reduction after the offsets, never negative.
    pub net_reduction: Money,

    /// Monthly rent after the reduction.
    pub new_rent: Money,

    /// Savings over a year.
    pub yearly_savings: Money,

    /// Human-readable explanation of every calculation step, in order.
    pub details: Vec<String>,
}

/// Returns the reduction a tenant is entitled to for the provided
/// `rate_change` (in percentage points).
///
/// A rise (or no change) of the reference rate entitles nothing, same as any
/// drop not listed in the steps table (`0.1` or `1.0`, for example).
#[must_use]
pub fn reduction_percentage(rate_change: Decimal) -> Percent {
    if rate_change <= Decimal::ZERO {
        return Percent::ZERO;
    }

    STEPS
        .iter()
        .find(|(drop, _)| *drop == rate_change)
        .and_then(|&(_, pct)| Percent::new(pct))
        .unwrap_or(Percent::ZERO)
}

/// Returns years elapsed from the [`ContractDate`] till the `now` moment.
///
/// Negative if the [`ContractDate`] is in the future.
#[expect(clippy::missing_panics_doc, reason = "infallible")]
#[must_use]
pub fn years_since(contract_date: ContractDate, now: DateTime) -> Decimal {
    let millis = i64::try_from(now.millis_since(&contract_date.midnight()))
        .expect("fits `i64` within supported dates range");
    Decimal::from(millis) / MILLIS_PER_YEAR
}

/// Calculates the reduction of the rent described by the provided [`Input`]
/// as of the `now` moment.
///
/// Monetary values are rounded to cents, while [`Calculation::new_rent`] and
/// [`Calculation::yearly_savings`] are derived from the already rounded
/// [`Calculation::net_reduction`].
///
/// The [`Input::current_rent`] is expected to be at most [`MAX_RENT`], which
/// callers validate beforehand.
#[must_use]
pub fn calculate(rules: &Rules, input: &Input, now: DateTime) -> Calculation {
    let Input {
        current_rent,
        current_reference_rate,
        new_reference_rate,
        contract_date,
    } = *input;
    let rent = current_rent.amount;

    let rate_change =
        current_reference_rate.value() - new_reference_rate.value();
    let reduction_percentage = reduction_percentage(rate_change);
    let gross = reduction_percentage.of(rent);

    let years = years_since(contract_date, now);

    let inflation = (years * rules.inflation_per_year).min(rules.inflation_cap);
    let inflation_offset = rent * inflation / Decimal::ONE_HUNDRED
        * rules.inflation_pass_through;

    let cost_increase_offset =
        rent * (years * rules.cost_increase_per_year) / Decimal::ONE_HUNDRED;

    let net = (gross - inflation_offset - cost_increase_offset)
        .max(Decimal::ZERO);

    let gross_reduction = current_rent.with_amount(gross).round_to_cents();
    let inflation_offset =
        current_rent.with_amount(inflation_offset).round_to_cents();
    let cost_increase_offset =
        current_rent.with_amount(cost_increase_offset).round_to_cents();
    let net_reduction = current_rent.with_amount(net).round_to_cents();
    let new_rent = current_rent
        .with_amount(rent - net_reduction.amount)
        .round_to_cents();
    let yearly_savings = net_reduction
        .with_amount(net_reduction.amount * MONTHS_PER_YEAR)
        .round_to_cents();

    let change = match rate_change.cmp(&Decimal::ZERO) {
        Ordering::Greater => {
            format!("Senkung um {} Prozentpunkte", fixed(rate_change, 2))
        }
        Ordering::Less => {
            format!("Erhöhung um {} Prozentpunkte", fixed(-rate_change, 2))
        }
        Ordering::Equal => "unverändert".to_owned(),
    };
    let details = vec![
        format!(
            "Referenzzinssatz: {current_reference_rate}% → \
             {new_reference_rate}% ({change})",
        ),
        format!(
            "Anspruch auf Mietzinssenkung: {}%",
            fixed(reduction_percentage.value(), 2),
        ),
        format!(
            "Brutto-Senkung: {} ({}% von {})",
            amount(gross_reduction),
            fixed(reduction_percentage.value(), 2),
            amount(current_rent.round_to_cents()),
        ),
        format!(
            "Seit dem {} vergangen: {} Jahre",
            contract_date.to_long_string(Locale::De),
            fixed(years, 2),
        ),
        format!(
            "Teuerungsausgleich ({}% von {}% Teuerung): {}",
            fixed(rules.inflation_pass_through * Decimal::ONE_HUNDRED, 0),
            fixed(inflation, 2),
            amount(inflation_offset),
        ),
        format!(
            "Allgemeine Kostensteigerung ({}% pro Jahr): {}",
            fixed(rules.cost_increase_per_year, 2),
            amount(cost_increase_offset),
        ),
        format!("Netto-Senkung: {}", amount(net_reduction)),
        format!(
            "Neuer Mietzins: {} (Ersparnis pro Jahr: {})",
            amount(new_rent),
            amount(yearly_savings),
        ),
    ];

    Calculation {
        rate_change,
        reduction_percentage,
        years_since_contract: years,
        gross_reduction,
        inflation_offset,
        cost_increase_offset,
        net_reduction,
        new_rent,
        yearly_savings,
        details,
    }
}

/// Rounds the provided `value` to exactly `dp` fraction digits.
fn fixed(value: Decimal, dp: u32) -> Decimal {
    let mut value =
        value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(dp);
    value
}

/// Renders the provided [`Money`] for the calculation details.
fn amount(money: Money) -> String {
    format!("{} {}", money.currency, fixed(money.amount, 2))
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, DateTime, Money, Percent};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{
        calculate, reduction_percentage, ContractDate, Input, Rules, MAX_RENT,
    };

    fn chf(amount: Decimal) -> Money {
        Money {
            amount,
            currency: Currency::Chf,
        }
    }

    fn pct(value: Decimal) -> Percent {
        Percent::new(value).unwrap()
    }

    fn input(
        rent: Decimal,
        current: Decimal,
        new: Decimal,
        contract_date: &str,
    ) -> Input {
        Input {
            current_rent: chf(rent),
            current_reference_rate: pct(current),
            new_reference_rate: pct(new),
            contract_date: ContractDate::from_iso8601(contract_date).unwrap(),
        }
    }

    fn at(s: &str) -> DateTime {
        DateTime::from_rfc3339(s).unwrap()
    }

    #[test]
    fn looks_up_recognized_drops() {
        assert_eq!(reduction_percentage(dec!(0.25)), pct(dec!(2.91)));
        assert_eq!(reduction_percentage(dec!(0.5)), pct(dec!(5.82)));
        assert_eq!(reduction_percentage(dec!(0.750)), pct(dec!(8.73)));
    }

    #[test]
    fn entitles_nothing_for_other_changes() {
        for change in [
            dec!(0),
            dec!(0.1),
            dec!(0.3),
            dec!(1.0),
            dec!(-0.25),
            dec!(-1),
        ] {
            assert_eq!(reduction_percentage(change), Percent::ZERO, "{change}");
        }
    }

    #[test]
    fn percentage_does_not_depend_on_rent() {
        let now = at("2026-06-02T00:00:00Z");
        for rent in [dec!(800), dec!(1500), dec!(4250.50)] {
            let res = calculate(
                &Rules::default(),
                &input(rent, dec!(1.75), dec!(1.25), "2025-06-02"),
                now,
            );
            assert_eq!(res.reduction_percentage, pct(dec!(5.82)));
        }
    }

    #[test]
    fn reduces_rent_after_two_years() {
        let res = calculate(
            &Rules::default(),
            &input(dec!(1500), dec!(1.50), dec!(1.25), "2023-06-02"),
            at("2025-06-02T00:00:00Z"),
        );

        assert_eq!(res.rate_change, dec!(0.25));
        assert_eq!(res.reduction_percentage, pct(dec!(2.91)));
        assert_eq!(res.gross_reduction, chf(dec!(43.65)));
        assert_eq!(res.years_since_contract.round_dp(4), dec!(2.0014));
        assert_eq!(res.inflation_offset, chf(dec!(24.02)));
        assert_eq!(res.cost_increase_offset, chf(dec!(15.01)));
        assert_eq!(res.net_reduction, chf(dec!(4.62)));
        assert_eq!(res.new_rent, chf(dec!(1495.38)));
        assert_eq!(res.yearly_savings, chf(dec!(55.44)));
    }

    #[test]
    fn reduces_rent_after_one_year() {
        let res = calculate(
            &Rules::default(),
            &input(dec!(2000), dec!(1.75), dec!(1.25), "2025-06-02"),
            at("2026-06-02T00:00:00Z"),
        );

        assert_eq!(res.gross_reduction, chf(dec!(116.40)));
        assert_eq!(res.inflation_offset, chf(dec!(15.99)));
        assert_eq!(res.cost_increase_offset, chf(dec!(9.99)));
        assert_eq!(res.net_reduction, chf(dec!(90.42)));
        assert_eq!(res.new_rent, chf(dec!(1909.58)));
        assert_eq!(res.yearly_savings, chf(dec!(1085.04)));
    }

    #[test]
    fn keeps_gross_reduction_on_contract_day() {
        let res = calculate(
            &Rules::default(),
            &input(dec!(1800), dec!(2.00), dec!(1.25), "2026-06-02"),
            at("2026-06-02T00:00:00Z"),
        );

        assert_eq!(res.years_since_contract, Decimal::ZERO);
        assert_eq!(res.net_reduction, chf(dec!(157.14)));
        assert_eq!(res.net_reduction, res.gross_reduction);
    }

    #[test]
    fn caps_inflation() {
        let res = calculate(
            &Rules::default(),
            &input(dec!(1500), dec!(1.50), dec!(1.25), "2016-01-01"),
            at("2026-01-01T00:00:00Z"),
        );

        // 5% cap, 40% of it passed through.
        assert_eq!(res.inflation_offset, chf(dec!(30.00)));
    }

    #[test]
    fn never_reduces_below_zero() {
        let res = calculate(
            &Rules::default(),
            &input(dec!(1500), dec!(1.50), dec!(1.25), "2023-06-02"),
            at("2026-06-02T00:00:00Z"),
        );

        assert_eq!(res.gross_reduction, chf(dec!(43.65)));
        assert_eq!(res.net_reduction, chf(dec!(0)));
        assert_eq!(res.new_rent, chf(dec!(1500)));
        assert_eq!(res.yearly_savings, chf(dec!(0)));
    }

    #[test]
    fn unrecognized_drop_keeps_rent() {
        let res = calculate(
            &Rules::default(),
            &input(dec!(1500), dec!(2.25), dec!(1.25), "2025-06-02"),
            at("2026-06-02T00:00:00Z"),
        );

        assert_eq!(res.rate_change, dec!(1.00));
        assert_eq!(res.reduction_percentage, Percent::ZERO);
        assert_eq!(res.net_reduction, chf(dec!(0)));
        assert_eq!(res.new_rent, chf(dec!(1500)));
    }

    #[test]
    fn derives_outputs_from_rounded_net() {
        let now = at("2026-10-18T09:30:00Z");
        for (rent, date) in [
            (dec!(1234.55), "2025-01-01"),
            (dec!(987.65), "2024-12-31"),
            (dec!(3100), "2026-02-28"),
        ] {
            let res = calculate(
                &Rules::default(),
                &input(rent, dec!(1.75), dec!(1.00), date),
                now,
            );

            assert!(res.net_reduction.amount >= Decimal::ZERO);
            assert_eq!(
                res.new_rent.amount,
                rent - res.net_reduction.amount,
            );
            assert_eq!(
                res.yearly_savings.amount,
                res.net_reduction.amount * dec!(12),
            );
        }
    }

    #[test]
    fn is_idempotent() {
        let input = input(dec!(1500), dec!(1.50), dec!(1.25), "2023-06-02");
        let now = at("2025-10-18T12:34:56Z");

        assert_eq!(
            calculate(&Rules::default(), &input, now),
            calculate(&Rules::default(), &input, now),
        );
    }

    #[test]
    fn applies_custom_rules() {
        let rules = Rules {
            inflation_per_year: dec!(0),
            cost_increase_per_year: dec!(0),
            ..Rules::default()
        };
        let res = calculate(
            &rules,
            &input(dec!(1500), dec!(1.50), dec!(1.25), "2016-01-01"),
            at("2026-01-01T00:00:00Z"),
        );

        assert_eq!(res.net_reduction, res.gross_reduction);
    }

    #[test]
    fn explains_every_step() {
        let res = calculate(
            &Rules::default(),
            &input(dec!(1500), dec!(1.50), dec!(1.25), "2023-06-02"),
            at("2025-06-02T00:00:00Z"),
        );

        assert_eq!(
            res.details,
            [
                "Referenzzinssatz: 1.50% → 1.25% (Senkung um 0.25 \
                 Prozentpunkte)",
                "Anspruch auf Mietzinssenkung: 2.91%",
                "Brutto-Senkung: CHF 43.65 (2.91% von CHF 1500.00)",
                "Seit dem 2. Juni 2023 vergangen: 2.00 Jahre",
                "Teuerungsausgleich (40% von 4.00% Teuerung): CHF 24.02",
                "Allgemeine Kostensteigerung (0.50% pro Jahr): CHF 15.01",
                "Netto-Senkung: CHF 4.62",
                "Neuer Mietzins: CHF 1495.38 (Ersparnis pro Jahr: CHF 55.44)",
            ],
        );
    }

    #[test]
    fn names_rate_rise_in_details() {
        let res = calculate(
            &Rules::default(),
            &input(dec!(1500), dec!(1.25), dec!(1.50), "2025-06-02"),
            at("2026-06-02T00:00:00Z"),
        );

        assert_eq!(
            res.details[0],
            "Referenzzinssatz: 1.25% → 1.50% (Erhöhung um 0.25 Prozentpunkte)",
        );
        assert_eq!(res.net_reduction, chf(dec!(0)));
    }

    #[test]
    fn names_unchanged_rate_in_details() {
        let res = calculate(
            &Rules::default(),
            &input(dec!(1500), dec!(1.25), dec!(1.25), "2025-06-02"),
            at("2026-06-02T00:00:00Z"),
        );

        assert_eq!(
            res.details[0],
            "Referenzzinssatz: 1.25% → 1.25% (unverändert)",
        );
    }

    #[test]
    fn stays_in_range_for_max_rent() {
        for (contract_date, now) in [
            ("2025-06-02", "2025-06-02T00:00:00Z"),
            ("0001-01-01", "9999-12-31T23:59:59Z"),
        ] {
            let res = calculate(
                &Rules::default(),
                &input(MAX_RENT, dec!(1.50), dec!(0.75), contract_date),
                at(now),
            );

            assert_eq!(
                res.new_rent.amount,
                MAX_RENT - res.net_reduction.amount,
            );
        }
    }
}
