//! [`Command`] definition.

pub mod cancel_booking;
pub mod change_booking_status;
pub mod check_in_booking;
pub mod create_booking;

use common::operations::{By, Select, Update};
use derive_more::{Display, Error};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        availability::{Conflict, TimeRange},
        booking::{self, InvalidStatusTransition, Status},
        space, Booking,
    },
    infra::{
        database::{self, StatusChange},
        Database,
    },
    Service,
};

/// [`Command`] of the [`Service`].
pub use common::Handler as Command;

pub use self::{
    cancel_booking::CancelBooking,
    change_booking_status::ChangeBookingStatus,
    check_in_booking::CheckInBooking, create_booking::CreateBooking,
};

impl<Db> Service<Db>
where
    Db: Database<
        Select<By<Option<Booking>, booking::Id>>,
        Ok = Option<Booking>,
        Err = Traced<database::Error>,
    >,
{
    /// Selects the existing [`Booking`] with the provided [`booking::Id`].
    async fn existing_booking(
        &self,
        id: booking::Id,
    ) -> Result<Booking, Traced<ExecutionError>> {
        use ExecutionError as E;

        self.database()
            .execute(Select(By::<Option<Booking>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(id))
            .map_err(tracerr::wrap!())
    }
}

impl<Db> Service<Db>
where
    Db: Database<
        Update<StatusChange>,
        Ok = Booking,
        Err = Traced<database::Error>,
    >,
{
    /// Moves the provided [`Booking`] to the `to` [`Status`], guarding the
    /// transition both here and in the [`Database`].
    pub(crate) async fn change_status(
        &self,
        booking: &Booking,
        to: Status,
    ) -> Result<Booking, Traced<ExecutionError>> {
        use ExecutionError as E;

        let from = booking.status;
        booking::assert_transition(from, to)
            .map_err(E::InvalidStatusTransition)
            .map_err(tracerr::wrap!())?;

        let booking = self
            .database()
            .execute(Update(StatusChange {
                id: booking.id,
                from,
                to,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        log::info!(
            booking_id = %booking.id,
            %from,
            %to,
            "booking status changed",
        );

        Ok(booking)
    }
}

/// Error of a [`Booking`]-related [`Command`] execution.
#[derive(Debug, Display, Error)]
pub enum ExecutionError {
    /// Space with the provided ID does not exist.
    #[display("`Space(id: {_0})` does not exist")]
    SpaceNotExists(#[error(not(source))] space::Id),

    /// [`Booking`] with the provided ID does not exist.
    #[display("`Booking(id: {_0})` does not exist")]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// Requested seats are not available anymore.
    #[display(
        "time slot is no longer available: only {} spots left",
        _0.available_spots,
    )]
    SlotUnavailable(#[error(not(source))] Conflict),

    /// [`Booking`] [`Status`] change is illegal.
    #[display("{_0}")]
    InvalidStatusTransition(InvalidStatusTransition),

    /// Start and end of a [`Booking`] don't span its [`TimeRange`].
    #[display("booking start and end don't span its `{_0}` time range")]
    InvalidPeriod(#[error(not(source))] TimeRange),

    /// [`Booking`] cannot be checked in at the requested moment.
    #[display("check-in for `Booking(id: {_0})` is closed")]
    CheckInClosed(#[error(not(source))] booking::Id),
}

impl From<database::Error> for ExecutionError {
    fn from(e: database::Error) -> Self {
        use database::Error as DbError;

        match e {
            DbError::CapacityExceeded(c) => Self::SlotUnavailable(c),
            DbError::InvalidStatusTransition(e) => {
                Self::InvalidStatusTransition(e)
            }
            DbError::SpaceNotExists(id) => Self::SpaceNotExists(id),
            DbError::BookingNotExists(id) => Self::BookingNotExists(id),
        }
    }
}
