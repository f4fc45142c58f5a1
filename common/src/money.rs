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
    /// Creates a zero [`Money`] amount in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns [`Money`] of the provided `amount` in the [`Currency`] of this
    /// one.
    #[must_use]
    pub const fn with_amount(self, amount: Decimal) -> Self {
        Self {
            amount,
            currency: self.currency,
        }
    }

    /// Rounds this [`Money`] to whole cents (see [`round_cents()`]).
    #[must_use]
    pub fn round_cents(self) -> Self {
        self.with_amount(round_cents(self.amount))
    }

    /// Returns this [`Money`] in minor units (cents), rounded half-up.
    ///
    /// [`None`] is returned if the amount doesn't fit into an [`i64`].
    #[must_use]
    pub fn cents(self) -> Option<i64> {
        (round_cents(self.amount) * Decimal::ONE_HUNDRED).to_i64()
    }
}

/// Rounds the provided `amount` to 2 decimal places, with midpoints rounded
/// away from zero (half-up for non-negative amounts).
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        write!(f, "{}{currency}", amount.normalize())
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
    #[case = "SCREAMING_SNAKE_CASE"]
    enum Currency {
        #[doc = "Euro."]
        Eur = 1,

        #[doc = "US Dollar."]
        Usd = 2,

        #[doc = "Pound Sterling."]
        Gbp = 3,

        #[doc = "Swiss Franc."]
        Chf = 4,
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{round_cents, Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn eur(s: &str) -> Money {
        Money {
            amount: decimal(s),
            currency: Currency::Eur,
        }
    }

    #[test]
    fn from_str() {
        assert_eq!(Money::from_str("123.45EUR").unwrap(), eur("123.45"));
        assert_eq!(
            Money::from_str("10CHF").unwrap(),
            Money {
                amount: decimal("10"),
                currency: Currency::Chf,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Eu").is_err());
        assert!(Money::from_str("123.45Euro").is_err());
        assert!(Money::from_str("abcEUR").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(eur("123.45").to_string(), "123.45EUR");
        assert_eq!(eur("123.40").to_string(), "123.4EUR");
        assert_eq!(eur("123.00").to_string(), "123EUR");
        assert_eq!(eur("123").to_string(), "123EUR");
    }

    #[test]
    fn rounds_half_up_to_cents() {
        assert_eq!(round_cents(decimal("2.345")), decimal("2.35"));
        assert_eq!(round_cents(decimal("2.344")), decimal("2.34"));
        assert_eq!(round_cents(decimal("0.005")), decimal("0.01"));
        assert_eq!(round_cents(decimal("7")), decimal("7"));
        assert_eq!(eur("1.125").round_cents(), eur("1.13"));
    }

    #[test]
    fn converts_to_cents() {
        assert_eq!(eur("7.50").cents(), Some(750));
        assert_eq!(eur("0.015").cents(), Some(2));
        assert_eq!(Money::zero(Currency::Usd).cents(), Some(0));
    }
}
