//! [`Command`] for checking in a [`Booking`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        booking::{self, Status},
        Booking,
    },
    infra::{
        database::{self, StatusChange},
        Database,
    },
    Service,
};

use super::{Command, ExecutionError};

/// [`Command`] for checking in a guest of a confirmed [`Booking`].
///
/// Allowed only within the configured [`CheckInWindow`].
///
/// [`CheckInWindow`]: booking::CheckInWindow
#[derive(Clone, Copy, Debug)]
pub struct CheckInBooking {
    /// ID of the [`Booking`] to be checked in.
    pub booking_id: booking::Id,

    /// [`DateTime`] of the check-in.
    pub at: DateTime,
}

impl<Db> Command<CheckInBooking> for Service<Db>
where
    Db: Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<
            Update<StatusChange>,
            Ok = Booking,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CheckInBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CheckInBooking { booking_id, at } = cmd;

        let booking = self
            .existing_booking(booking_id)
            .await
            .map_err(tracerr::wrap!())?;

        if !self
            .config()
            .check_in
            .contains(booking.starts_at, booking.ends_at, at)
        {
            log::debug!(
                %booking_id,
                %at,
                starts_at = %booking.starts_at,
                "check-in is closed",
            );
            return Err(tracerr::new!(E::CheckInClosed(booking_id)));
        }

        self.change_status(&booking, Status::CheckedIn)
            .await
            .map_err(tracerr::wrap!())
    }
}
