//! [`ExpireBookings`] [`Task`].

use common::{
    operations::{By, Perform, Select, Update},
    DateTime,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    command,
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

use super::Task;

/// [`Task`] cancelling the [`Booking`]s left without the host approval or the
/// guest payment past their deadline.
///
/// Meant to be performed periodically. Expired [`Booking`]s keep their seats
/// until then.
#[derive(Clone, Copy, Debug)]
pub struct ExpireBookings {
    /// [`DateTime`] to expire the [`Booking`]s at.
    pub at: DateTime,
}

impl<Db> Task<Perform<ExpireBookings>> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Booking>, booking::ExpiryDateTime>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        > + Database<
            Update<StatusChange>,
            Ok = Booking,
            Err = Traced<database::Error>,
        >,
{
    /// Cancelled [`Booking`]s.
    type Ok = Vec<Booking>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        Perform(task): Perform<ExpireBookings>,
    ) -> Result<Self::Ok, Self::Err> {
        let ExpireBookings { at } = task;

        let overdue = self
            .database()
            .execute(Select(By::<Vec<Booking>, _>::new(at.coerce())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        let mut expired = Vec::with_capacity(overdue.len());
        for booking in overdue {
            match self.change_status(&booking, Status::Cancelled).await {
                Ok(cancelled) => {
                    log::info!(
                        booking_id = %booking.id,
                        from = %booking.status,
                        %at,
                        "booking expired",
                    );
                    expired.push(cancelled);
                }
                // Approved, paid or cancelled since selected.
                Err(e)
                    if matches!(
                        e.as_ref(),
                        ExecutionError::InvalidStatusTransition(_),
                    ) =>
                {
                    log::debug!(
                        booking_id = %booking.id,
                        "booking left awaiting before expiring: {e}",
                    );
                }
                Err(e) => return Err(e).map_err(tracerr::wrap!()),
            }
        }

        Ok(expired)
    }
}

/// Error of [`ExpireBookings`] execution.
pub type ExecutionError = command::ExecutionError;
