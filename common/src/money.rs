//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] of the same [`Currency`] with the provided
    /// `amount`.
    #[must_use]
    pub fn with_amount(self, amount: Decimal) -> Self {
        Self {
            amount,
            currency: self.currency,
        }
    }

    /// Rounds the amount of this [`Money`] to whole cents.
    ///
    /// Half a cent is rounded away from zero, and the result always carries
    /// exactly two fraction digits.
    #[must_use]
    pub fn round_to_cents(self) -> Self {
        let mut amount = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        self.with_amount(amount)
    }

    /// Indicates whether the amount of this [`Money`] is greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{}{currency}", amount.normalize())
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Swiss Franc."]
        Chf = 1,

        #[doc = "Euro."]
        Eur = 2,
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal_macros::dec;

    use super::{Currency, Money};

    fn chf(amount: rust_decimal::Decimal) -> Money {
        Money {
            amount,
            currency: Currency::Chf,
        }
    }

    #[test]
    fn from_str() {
        assert_eq!(Money::from_str("1500.50CHF").unwrap(), chf(dec!(1500.50)));
        assert_eq!(
            Money::from_str("99.90EUR").unwrap(),
            Money {
                amount: dec!(99.90),
                currency: Currency::Eur,
            },
        );

        assert!(Money::from_str("1500").is_err());
        assert!(Money::from_str("1500Ch").is_err());
        assert!(Money::from_str("1500Franken").is_err());
        assert!(Money::from_str("1500USD").is_err());

        assert!(Money::from_str("1500.00CHF").is_ok());
        assert!(Money::from_str("1500.0CHF").is_ok());
        assert!(Money::from_str("1500CHF").is_ok());
    }

    #[test]
    fn to_string() {
        assert_eq!(chf(dec!(43.65)).to_string(), "43.65CHF");
        assert_eq!(chf(dec!(43.50)).to_string(), "43.5CHF");
        assert_eq!(chf(dec!(1500.00)).to_string(), "1500CHF");
        assert_eq!(chf(dec!(1500)).to_string(), "1500CHF");
    }

    #[test]
    fn rounds_half_cent_away_from_zero() {
        assert_eq!(chf(dec!(10.005)).round_to_cents(), chf(dec!(10.01)));
        assert_eq!(chf(dec!(10.004999)).round_to_cents(), chf(dec!(10.00)));
        assert_eq!(chf(dec!(0.125)).round_to_cents(), chf(dec!(0.13)));
        assert_eq!(chf(dec!(-0.125)).round_to_cents(), chf(dec!(-0.13)));

        assert_eq!(chf(dec!(7)).round_to_cents().amount.scale(), 2);
    }
}
