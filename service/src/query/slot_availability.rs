//! [`SlotAvailability`] definition.

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        availability::{self, Availability, ExistingBooking},
        space, Space,
    },
    infra::{database, Database},
    Service,
};

use super::{ExecutionError, Query};

/// [`Query`] of a per-slot [`Availability`] of a [`Space`] on some date.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotAvailability {
    /// ID of the [`Space`].
    pub space_id: space::Id,

    /// Date to check.
    pub date: time::Date,
}

impl<Db> Query<SlotAvailability> for Service<Db>
where
    Db: Database<
            Select<By<Option<Space>, space::Id>>,
            Ok = Option<Space>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<ExistingBooking>, (space::Id, time::Date)>>,
            Ok = Vec<ExistingBooking>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Availability;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        SlotAvailability { space_id, date }: SlotAvailability,
    ) -> Result<Self::Ok, Self::Err> {
        let space = self
            .existing_space(space_id)
            .await
            .map_err(tracerr::wrap!())?;

        let bookings = self
            .database()
            .execute(Select(By::<Vec<ExistingBooking>, _>::new((
                space_id, date,
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;
        log::debug!(%space_id, %date, bookings = bookings.len(), "slots built");

        Ok(availability::hourly_slots(space.capacity.get(), &bookings))
    }
}
