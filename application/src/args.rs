//! [`Args`] definitions.

use std::{num::NonZeroU32, str::FromStr};

use clap::{Parser, Subcommand};
use common::DateTime;
use derive_more::{Display, Error};
use rust_decimal::Decimal;
use service::domain::{
    availability::{self, TimeRange},
    booking::Status,
    cancellation::Policy,
};
use time::macros::format_description;

/// Pricing, availability and cancellation engine of coworking bookings.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    /// [`Command`] to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to run.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prices a booking lasting the provided number of hours.
    Quote {
        /// Duration of the booking in hours.
        #[arg(long)]
        hours: Decimal,

        /// Price of a single hour.
        #[arg(long)]
        per_hour: Decimal,

        /// Price of a whole day.
        #[arg(long)]
        per_day: Decimal,
    },

    /// Shows the per-slot availability of a day.
    Availability {
        /// Maximum number of guests at once.
        #[arg(long)]
        capacity: u32,

        /// Existing booking, as `HH:MM-HH:MM` with an optional `xN` guests
        /// suffix.
        #[arg(long = "booking")]
        bookings: Vec<Occupancy>,

        /// Requested booking to check for conflicts, in the same format.
        #[arg(long)]
        request: Option<Occupancy>,
    },

    /// Calculates the refund of a cancelled booking.
    Refund {
        /// Price paid for the booking.
        #[arg(long)]
        base: Decimal,

        /// Cancellation policy of the booked space.
        #[arg(long)]
        policy: Policy,

        /// RFC 3339 date and time the booking starts at.
        #[arg(long)]
        start: DateTime,

        /// RFC 3339 date and time of the cancellation, the current one if
        /// omitted.
        #[arg(long)]
        now: Option<DateTime>,

        /// Whether the host cancels the booking.
        #[arg(long)]
        host: bool,
    },

    /// Books a space through the booking service, with the existing
    /// bookings confirmed beforehand.
    Book(Book),

    /// Checks whether a booking may move between the provided statuses.
    Transition {
        /// Current status of the booking.
        #[arg(long)]
        from: Status,

        /// Requested status of the booking.
        #[arg(long)]
        to: Status,
    },
}

/// Arguments of the [`Command::Book`].
#[derive(Clone, Debug, clap::Args)]
pub struct Book {
    /// Maximum number of guests the space accommodates at once.
    #[arg(long)]
    pub capacity: u32,

    /// Price of a single hour.
    #[arg(long)]
    pub per_hour: Decimal,

    /// Price of a whole day.
    #[arg(long)]
    pub per_day: Decimal,

    /// Cancellation policy of the space.
    #[arg(long, default_value = "moderate")]
    pub policy: Policy,

    /// Whether bookings are confirmed right after the payment, without the
    /// host approval.
    #[arg(long)]
    pub instant: bool,

    /// Date of the bookings, as `YYYY-MM-DD` in UTC.
    #[arg(long, value_parser = parse_date)]
    pub date: time::Date,

    /// Existing confirmed booking, as `HH:MM-HH:MM` with an optional `xN`
    /// guests suffix.
    #[arg(long = "booking")]
    pub bookings: Vec<Occupancy>,

    /// Requested booking, in the same format.
    #[arg(long)]
    pub request: Occupancy,

    /// RFC 3339 date and time of the booking, the current one if omitted.
    #[arg(long)]
    pub at: Option<DateTime>,

    /// RFC 3339 date and time to expire the bookings left awaiting approval
    /// or payment at, if any.
    #[arg(long)]
    pub expire_at: Option<DateTime>,
}

/// Parses a `YYYY-MM-DD` date.
fn parse_date(s: &str) -> Result<time::Date, time::error::Parse> {
    time::Date::parse(s, format_description!("[year]-[month]-[day]"))
}

/// [`TimeRange`] occupied by some number of guests.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Occupancy {
    /// Occupied [`TimeRange`].
    pub range: TimeRange,

    /// Number of guests, if specified.
    pub guests: Option<NonZeroU32>,
}

impl FromStr for Occupancy {
    type Err = OccupancyParseError;

    /// Parses `HH:MM-HH:MM` strings with an optional `xN` suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (range, guests) = match s.split_once('x') {
            Some((range, guests)) => (
                range,
                Some(
                    guests
                        .parse()
                        .map_err(|_| OccupancyParseError::Guests)?,
                ),
            ),
            None => (s, None),
        };

        Ok(Self {
            range: range.parse().map_err(OccupancyParseError::Range)?,
            guests,
        })
    }
}

/// Error of parsing an [`Occupancy`].
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum OccupancyParseError {
    /// Invalid [`TimeRange`].
    #[display("{_0}")]
    Range(availability::ParseError),

    /// Invalid number of guests.
    #[display("number of guests must be a positive integer")]
    Guests,
}
