//! [`DayStatus`] definition.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{
        availability::{self, ExistingBooking},
        space, Space,
    },
    infra::{database, Database},
    Service,
};

use super::{ExecutionError, Query, SlotAvailability};

/// [`Query`] summarizing the availability of a [`Space`] on some date into
/// an [`availability::DayStatus`], considering its opening hours.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DayStatus {
    /// ID of the [`Space`].
    pub space_id: space::Id,

    /// Date to check.
    pub date: time::Date,
}

impl<Db> Query<DayStatus> for Service<Db>
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
    type Ok = availability::DayStatus;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DayStatus { space_id, date }: DayStatus,
    ) -> Result<Self::Ok, Self::Err> {
        let space = self
            .existing_space(space_id)
            .await
            .map_err(tracerr::wrap!())?;
        let Some(hours) = space.schedule.hours(date.weekday()) else {
            return Ok(availability::DayStatus::Disabled);
        };

        let slots = self
            .execute(SlotAvailability { space_id, date })
            .await
            .map_err(tracerr::wrap!())?;

        Ok(availability::day_status(&slots, Some(hours)))
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::availability,
        fixture,
        query::DayStatus,
        Query as _,
    };

    #[tokio::test]
    async fn reflects_bookings_within_opening_hours() {
        let (service, space) = fixture::service_with_space(2).await;
        let status = |date| DayStatus {
            space_id: space.id,
            date,
        };

        assert_eq!(
            service.execute(status(fixture::DATE)).await.unwrap(),
            availability::DayStatus::Available,
        );

        drop(fixture::book(&service, &space, "10:00-11:00", 1).await);
        assert_eq!(
            service.execute(status(fixture::DATE)).await.unwrap(),
            availability::DayStatus::Partial,
        );

        drop(fixture::book(&service, &space, "09:00-18:00", 1).await);
        assert_eq!(
            service.execute(status(fixture::DATE)).await.unwrap(),
            availability::DayStatus::Partial,
        );

        drop(fixture::book(&service, &space, "09:00-10:00", 1).await);
        drop(fixture::book(&service, &space, "11:00-18:00", 1).await);
        assert_eq!(
            service.execute(status(fixture::DATE)).await.unwrap(),
            availability::DayStatus::Unavailable,
        );
    }

    #[tokio::test]
    async fn closed_day_is_disabled() {
        let (service, space) = fixture::service_with_space(2).await;
        let saturday = time::macros::date!(2026 - 10 - 24);

        let status = service
            .execute(DayStatus {
                space_id: space.id,
                date: saturday,
            })
            .await
            .unwrap();
        assert_eq!(status, availability::DayStatus::Disabled);
    }
}
