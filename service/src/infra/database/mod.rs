//! [`Database`]-related definitions.

#[cfg(feature = "memory")]
pub mod memory;

use derive_more::{Display, Error as StdError};

use crate::domain::{
    availability::Conflict,
    booking::{self, InvalidStatusTransition, Status},
    space,
};

#[cfg(feature = "memory")]
pub use self::memory::Memory;

/// Database operation.
///
/// Implementations are the system of record for bookings, so they must
/// serialize the capacity and status checks with the writes they guard.
pub use common::Handler as Database;

/// Compare-and-swap change of a [`Booking`] [`Status`].
///
/// Applied only if the [`Booking`] is still in the `from` [`Status`] and the
/// transition to the `to` one is legal.
///
/// [`Booking`]: crate::domain::Booking
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusChange {
    /// ID of the [`Booking`] to change.
    ///
    /// [`Booking`]: crate::domain::Booking
    pub id: booking::Id,

    /// [`Status`] the [`Booking`] is expected to be in.
    ///
    /// [`Booking`]: crate::domain::Booking
    pub from: Status,

    /// [`Status`] to move the [`Booking`] to.
    ///
    /// [`Booking`]: crate::domain::Booking
    pub to: Status,
}

/// [`Database`] error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Booking doesn't fit into the seats left.
    #[display(
        "booking exceeds capacity: only {} spots available",
        _0.available_spots,
    )]
    CapacityExceeded(#[error(not(source))] Conflict),

    /// Booking [`Status`] change is illegal.
    #[display("{_0}")]
    InvalidStatusTransition(InvalidStatusTransition),

    /// Space with the provided ID does not exist.
    #[display("`Space(id: {_0})` does not exist")]
    SpaceNotExists(#[error(not(source))] space::Id),

    /// Booking with the provided ID does not exist.
    #[display("`Booking(id: {_0})` does not exist")]
    BookingNotExists(#[error(not(source))] booking::Id),
}
