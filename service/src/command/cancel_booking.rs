//! [`Command`] for cancelling a [`Booking`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        booking::{self, Status},
        cancellation::{self, Initiator, Refund},
        space, Booking, Space,
    },
    infra::{
        database::{self, StatusChange},
        Database,
    },
    Service,
};

use super::{Command, ExecutionError};

/// [`Command`] for cancelling a [`Booking`] and calculating its [`Refund`].
///
/// The [`Refund`] is calculated from the amount paid for the [`Booking`]
/// (nothing, if it's still awaiting approval or payment), according to the
/// cancellation policy tier of the booked [`Space`].
#[derive(Clone, Copy, Debug)]
pub struct CancelBooking {
    /// ID of the [`Booking`] to be cancelled.
    pub booking_id: booking::Id,

    /// Party cancelling the [`Booking`].
    pub initiator: Initiator,

    /// [`DateTime`] of the cancellation.
    pub at: DateTime,
}

impl<Db> Command<CancelBooking> for Service<Db>
where
    Db: Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Space>, space::Id>>,
            Ok = Option<Space>,
            Err = Traced<database::Error>,
        > + Database<
            Update<StatusChange>,
            Ok = Booking,
            Err = Traced<database::Error>,
        >,
{
    type Ok = (Booking, Refund);
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CancelBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CancelBooking {
            booking_id,
            initiator,
            at,
        } = cmd;

        let booking = self
            .existing_booking(booking_id)
            .await
            .map_err(tracerr::wrap!())?;
        booking::assert_transition(booking.status, Status::Cancelled)
            .map_err(E::InvalidStatusTransition)
            .map_err(tracerr::wrap!())?;

        let space = self
            .database()
            .execute(Select(By::<Option<Space>, _>::new(booking.space_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SpaceNotExists(booking.space_id))
            .map_err(tracerr::wrap!())?;

        let refund = cancellation::refund_for(
            initiator,
            booking.paid_amount(),
            self.config()
                .cancellation
                .breakpoints(space.cancellation_policy),
            booking.starts_at.coerce(),
            at,
        );

        let booking = self
            .change_status(&booking, Status::Cancelled)
            .await
            .map_err(tracerr::wrap!())?;
        log::info!(
            %booking_id,
            %initiator,
            policy = %space.cancellation_policy,
            penalty = %refund.penalty,
            penalty_amount = %refund.penalty_amount,
            refund_amount = %refund.refund_amount,
            "booking cancelled",
        );

        Ok((booking, refund))
    }
}
