//! Service contains the booking pricing, availability and cancellation logic.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
#[cfg(all(test, feature = "memory"))]
mod fixture;
pub mod infra;
pub mod query;
pub mod task;

use derive_more::{Display, Error};

use crate::domain::{
    booking::{CheckInWindow, Expiry},
    cancellation::Schedule,
    pricing::Fees,
};
#[cfg(doc)]
use crate::infra::Database;

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [`Fees`] applied to every booking.
    pub fees: Fees,

    /// Cancellation [`Schedule`] of every policy tier.
    pub cancellation: Schedule,

    /// [`CheckInWindow`] of bookings.
    pub check_in: CheckInWindow,

    /// [`Expiry`] of bookings awaiting approval or payment.
    pub expiry: Expiry,
}

/// Error of a required configuration value being absent.
///
/// Never substituted with a default, as that would misstate fees or refunds.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("required configuration `{_0}` is missing")]
pub struct ConfigurationMissing(#[error(not(source))] pub &'static str);

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub const fn new(config: Config, database: Db) -> Self {
        Self { config, database }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub const fn database(&self) -> &Db {
        &self.database
    }
}
