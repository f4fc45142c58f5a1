//! [`Config`]-related definitions.

use std::time;

use common::{Currency, Percent};
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::{
    domain::{
        booking::{self, CheckInWindow},
        cancellation::{Breakpoints, Schedule},
        pricing::Fees,
    },
    ConfigurationMissing,
};
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pricing configuration.
    pub pricing: Pricing,

    /// Cancellation policies configuration.
    pub cancellation: Cancellation,

    /// Check-in configuration.
    pub check_in: CheckIn,

    /// Expiry configuration of bookings awaiting approval or payment.
    pub expiry: Expiry,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing non-critical fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

impl TryFrom<Config> for service::Config {
    type Error = ConfigurationMissing;

    fn try_from(value: Config) -> Result<Self, Self::Error> {
        let Config {
            pricing,
            cancellation,
            check_in,
            expiry,
            log: _,
        } = value;

        Ok(Self {
            fees: pricing.try_into()?,
            cancellation: cancellation.try_into()?,
            check_in: check_in.into(),
            expiry: expiry.into(),
        })
    }
}

/// Pricing configuration.
///
/// Fee percentages have no defaults and must be configured explicitly.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Pricing {
    /// Service fee paid by guests on top of the base price.
    pub service_fee: Option<Percent>,

    /// VAT applied to the base price with the service fee.
    pub vat: Option<Percent>,

    /// Fee withheld from host payouts.
    pub host_fee: Option<Percent>,

    /// Indicator whether VAT is calculated by the payment processor.
    #[default(false)]
    pub stripe_tax_enabled: bool,

    /// [`Currency`] of the prices.
    #[default(Currency::Eur)]
    pub currency: Currency,
}

impl TryFrom<Pricing> for Fees {
    type Error = ConfigurationMissing;

    fn try_from(value: Pricing) -> Result<Self, Self::Error> {
        let Pricing {
            service_fee,
            vat,
            host_fee,
            stripe_tax_enabled,
            currency: _,
        } = value;

        Ok(Self {
            service_fee: service_fee
                .ok_or(ConfigurationMissing("pricing.service_fee"))?,
            vat: vat.ok_or(ConfigurationMissing("pricing.vat"))?,
            host_fee: host_fee.ok_or(ConfigurationMissing("pricing.host_fee"))?,
            stripe_tax_enabled,
        })
    }
}

/// Cancellation policies configuration.
///
/// Every tier must be configured explicitly.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Cancellation {
    /// [`Breakpoints`] of the flexible policy.
    pub flexible: Option<Breakpoints>,

    /// [`Breakpoints`] of the moderate policy.
    pub moderate: Option<Breakpoints>,

    /// [`Breakpoints`] of the strict policy.
    pub strict: Option<Breakpoints>,
}

impl TryFrom<Cancellation> for Schedule {
    type Error = ConfigurationMissing;

    fn try_from(value: Cancellation) -> Result<Self, Self::Error> {
        let Cancellation {
            flexible,
            moderate,
            strict,
        } = value;

        Ok(Self {
            flexible: flexible
                .ok_or(ConfigurationMissing("cancellation.flexible"))?,
            moderate: moderate
                .ok_or(ConfigurationMissing("cancellation.moderate"))?,
            strict: strict.ok_or(ConfigurationMissing("cancellation.strict"))?,
        })
    }
}

/// Check-in configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct CheckIn {
    /// Time before a booking start the check-in opens at.
    #[default(time::Duration::from_secs(2 * 60 * 60))]
    #[serde(with = "humantime_serde")]
    pub opens_before: time::Duration,
}

impl From<CheckIn> for CheckInWindow {
    fn from(value: CheckIn) -> Self {
        let CheckIn { opens_before } = value;
        Self { opens_before }
    }
}

/// Expiry configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Expiry {
    /// Time a host has to approve a new booking.
    #[default(time::Duration::from_secs(24 * 60 * 60))]
    #[serde(with = "humantime_serde")]
    pub approval_timeout: time::Duration,

    /// Time a guest has to pay for a booking.
    #[default(time::Duration::from_secs(2 * 60 * 60))]
    #[serde(with = "humantime_serde")]
    pub payment_timeout: time::Duration,
}

impl From<Expiry> for booking::Expiry {
    fn from(value: Expiry) -> Self {
        let Expiry {
            approval_timeout,
            payment_timeout,
        } = value;
        Self {
            approval_timeout,
            payment_timeout,
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
