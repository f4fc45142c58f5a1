//! Pricing of bookings.

use common::{money::round_cents, Currency, Money, Percent};
use derive_more::{Display, Error};
use rust_decimal::Decimal;

/// Duration (in hours) starting from which the flat daily rate is charged
/// instead of the hourly one.
pub const DAY_RATE_THRESHOLD_HOURS: Decimal =
    Decimal::from_parts(8, 0, 0, false, 0);

/// Prices a [`Space`] is rented for.
///
/// [`Space`]: super::Space
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rates {
    /// Price of a single hour.
    per_hour: Money,

    /// Price of a whole day.
    per_day: Money,
}

impl Rates {
    /// Creates new [`Rates`].
    ///
    /// # Errors
    ///
    /// - If any price is negative.
    /// - If prices are in different [`Currency`]s.
    pub fn new(per_hour: Money, per_day: Money) -> Result<Self, InvalidRates> {
        if per_hour.amount < Decimal::ZERO || per_day.amount < Decimal::ZERO {
            return Err(InvalidRates::Negative);
        }
        if per_hour.currency != per_day.currency {
            return Err(InvalidRates::CurrencyMismatch);
        }
        Ok(Self { per_hour, per_day })
    }

    /// Returns the price of a single hour.
    #[must_use]
    pub const fn per_hour(&self) -> Money {
        self.per_hour
    }

    /// Returns the price of a whole day.
    #[must_use]
    pub const fn per_day(&self) -> Money {
        self.per_day
    }

    /// Returns the [`Currency`] of these [`Rates`].
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.per_hour.currency
    }
}

/// Error of creating invalid [`Rates`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum InvalidRates {
    /// Some price is negative.
    #[display("prices must not be negative")]
    Negative,

    /// Prices are in different currencies.
    #[display("hourly and daily prices must be in the same currency")]
    CurrencyMismatch,
}

/// Base price of a booking, before any fees.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BaseRate {
    /// Price itself.
    pub price: Money,

    /// Indicator whether the daily rate has been applied.
    pub is_day_rate: bool,

    /// Human-readable description of how the price was calculated.
    pub breakdown_label: String,
}

/// Calculates the [`BaseRate`] of a booking lasting the provided number of
/// `hours`.
///
/// Bookings of [`DAY_RATE_THRESHOLD_HOURS`] or longer are charged with the
/// daily rate. Non-positive durations cost nothing.
#[must_use]
pub fn base_rate(hours: Decimal, rates: &Rates) -> BaseRate {
    let hours = hours.max(Decimal::ZERO).normalize();

    if hours >= DAY_RATE_THRESHOLD_HOURS {
        return BaseRate {
            price: rates.per_day.round_cents(),
            is_day_rate: true,
            breakdown_label: format!("Daily rate ({hours}h)"),
        };
    }

    BaseRate {
        price: rates
            .per_hour
            .with_amount(hours * rates.per_hour.amount)
            .round_cents(),
        is_day_rate: false,
        breakdown_label: format!("{hours}h × {}/h", rates.per_hour),
    }
}

/// Fees applied on top of a [`BaseRate`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fees {
    /// Service fee paid by a guest.
    pub service_fee: Percent,

    /// VAT applied to the base price together with the service fee.
    pub vat: Percent,

    /// Fee withheld from a host payout.
    pub host_fee: Percent,

    /// Indicator whether VAT is calculated by the payment processor at
    /// checkout, rather than locally.
    pub stripe_tax_enabled: bool,
}

/// Full price of a booking.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceQuote {
    /// Base price of the booking.
    pub base: Money,

    /// Service fee.
    pub service_fee: Money,

    /// VAT, if calculated locally.
    ///
    /// [`None`] means it's calculated at payment.
    pub vat: Option<Money>,

    /// Total price.
    ///
    /// Only an estimate, if the [`PriceQuote::vat`] is [`None`].
    pub total: Money,

    /// Human-readable description of how the base price was calculated.
    pub breakdown_label: String,

    /// Indicator whether the daily rate has been applied.
    pub is_day_rate: bool,
}

impl PriceQuote {
    /// Indicates whether the [`PriceQuote::total`] is only an estimate, as the
    /// VAT is calculated at payment.
    #[must_use]
    pub const fn is_estimate(&self) -> bool {
        self.vat.is_none()
    }
}

/// Composes a [`PriceQuote`] for a booking lasting the provided number of
/// `hours`.
///
/// Every part is rounded to cents, and the total is the exact sum of them.
#[must_use]
pub fn compose(hours: Decimal, rates: &Rates, fees: &Fees) -> PriceQuote {
    let BaseRate {
        price: base,
        is_day_rate,
        breakdown_label,
    } = base_rate(hours, rates);

    let service_fee =
        base.with_amount(round_cents(fees.service_fee.of(base.amount)));
    let subtotal = base.amount + service_fee.amount;
    let vat = (!fees.stripe_tax_enabled)
        .then(|| base.with_amount(round_cents(fees.vat.of(subtotal))));
    let total =
        base.with_amount(subtotal + vat.map_or(Decimal::ZERO, |v| v.amount));

    PriceQuote {
        base,
        service_fee,
        vat,
        total,
        breakdown_label,
        is_day_rate,
    }
}

/// Split of a booking payment between a host and the platform.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HostPayout {
    /// Fee withheld from the host.
    pub host_fee: Money,

    /// Amount transferred to the host.
    pub payout: Money,

    /// Total amount kept by the platform (service fee and host fee).
    pub platform_fee: Money,
}

impl HostPayout {
    /// Returns the application fee to be requested from the payment processor
    /// in minor units (cents).
    #[must_use]
    pub fn application_fee_cents(&self) -> Option<i64> {
        self.host_fee.cents()
    }
}

/// Calculates the [`HostPayout`] of the provided [`PriceQuote`].
#[must_use]
pub fn host_payout(quote: &PriceQuote, fees: &Fees) -> HostPayout {
    let host_fee = quote
        .base
        .with_amount(round_cents(fees.host_fee.of(quote.base.amount)));

    HostPayout {
        host_fee,
        payout: quote.base.with_amount(quote.base.amount - host_fee.amount),
        platform_fee: host_fee
            .with_amount(quote.service_fee.amount + host_fee.amount),
    }
}

#[cfg(test)]
mod spec {
    use common::{money::round_cents, Currency, Money, Percent};
    use rust_decimal::Decimal;

    use super::{base_rate, compose, host_payout, Fees, InvalidRates, Rates};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn eur(s: &str) -> Money {
        Money {
            amount: decimal(s),
            currency: Currency::Eur,
        }
    }

    fn rates(per_hour: &str, per_day: &str) -> Rates {
        Rates::new(eur(per_hour), eur(per_day)).unwrap()
    }

    fn percent(s: &str) -> Percent {
        s.parse().unwrap()
    }

    fn fees(service_fee: &str, vat: &str, stripe_tax_enabled: bool) -> Fees {
        Fees {
            service_fee: percent(service_fee),
            vat: percent(vat),
            host_fee: percent("5"),
            stripe_tax_enabled,
        }
    }

    #[test]
    fn validates_rates() {
        assert_eq!(
            Rates::new(eur("-1"), eur("60")),
            Err(InvalidRates::Negative),
        );
        assert_eq!(
            Rates::new(
                eur("10"),
                Money {
                    amount: decimal("60"),
                    currency: Currency::Usd,
                },
            ),
            Err(InvalidRates::CurrencyMismatch),
        );
        assert_eq!(rates("0", "0").currency(), Currency::Eur);
    }

    #[test]
    fn charges_hourly_below_threshold() {
        let rate = base_rate(decimal("4"), &rates("10", "60"));
        assert_eq!(rate.price, eur("40"));
        assert!(!rate.is_day_rate);
        assert_eq!(rate.breakdown_label, "4h × 10EUR/h");

        let rate = base_rate(decimal("7.5"), &rates("12.5", "60"));
        assert_eq!(rate.price, eur("93.75"));
        assert!(!rate.is_day_rate);
    }

    #[test]
    fn charges_daily_from_threshold() {
        let rate = base_rate(decimal("9"), &rates("10", "60"));
        assert_eq!(rate.price, eur("60"));
        assert!(rate.is_day_rate);
        assert_eq!(rate.breakdown_label, "Daily rate (9h)");

        for hours in ["8", "8.0", "12", "24"] {
            let rate = base_rate(decimal(hours), &rates("1000", "60"));
            assert_eq!(rate.price, eur("60"));
            assert!(rate.is_day_rate);
        }
    }

    #[test]
    fn day_rate_threshold_holds() {
        let rates = rates("9.99", "55");
        for quarters in 1..64_u32 {
            let hours = Decimal::from(quarters) / Decimal::from(4);
            let rate = base_rate(hours, &rates);
            if quarters < 32 {
                assert_eq!(
                    rate.price.amount,
                    round_cents(hours * decimal("9.99")),
                );
                assert!(!rate.is_day_rate);
            } else {
                assert_eq!(rate.price, eur("55"));
                assert!(rate.is_day_rate);
            }
        }
    }

    #[test]
    fn non_positive_duration_costs_nothing() {
        for hours in ["0", "-3"] {
            let rate = base_rate(decimal(hours), &rates("10", "60"));
            assert_eq!(rate.price.amount, Decimal::ZERO);
            assert!(!rate.is_day_rate);
        }
    }

    #[test]
    fn composes_quote_with_vat() {
        let quote =
            compose(decimal("4"), &rates("10", "60"), &fees("5", "22", false));

        assert_eq!(quote.base, eur("40"));
        assert_eq!(quote.service_fee, eur("2"));
        assert_eq!(quote.vat, Some(eur("9.24")));
        assert_eq!(quote.total, eur("51.24"));
        assert!(!quote.is_estimate());
    }

    #[test]
    fn defers_vat_to_payment() {
        let quote =
            compose(decimal("4"), &rates("10", "60"), &fees("5", "22", true));

        assert_eq!(quote.vat, None);
        assert_eq!(quote.total, eur("42"));
        assert!(quote.is_estimate());
    }

    #[test]
    fn total_is_sum_of_rounded_parts() {
        let fees = fees("7.3", "21.7", false);
        for (hours, per_hour) in
            [("1.5", "13.33"), ("2.5", "7.77"), ("3", "0.01")]
        {
            let quote = compose(decimal(hours), &rates(per_hour, "100"), &fees);
            let vat = quote.vat.unwrap();

            assert_eq!(
                quote.total.amount,
                quote.base.amount + quote.service_fee.amount + vat.amount,
            );
            for part in [quote.base, quote.service_fee, vat, quote.total] {
                assert_eq!(part.amount, part.amount.round_dp(2));
            }
        }
    }

    #[test]
    fn splits_host_payout() {
        let fees = fees("5", "22", true);
        for (base, payout, fee, cents) in [
            ("20", "19", "2", 100),
            ("150", "142.5", "15", 750),
            ("75", "71.25", "7.5", 375),
            ("500", "475", "50", 2500),
        ] {
            let quote = compose(decimal("10"), &rates("1", base), &fees);
            let split = host_payout(&quote, &fees);

            assert_eq!(split.payout, eur(payout));
            assert_eq!(split.platform_fee, eur(fee));
            assert_eq!(split.application_fee_cents(), Some(cents));
        }
    }
}
