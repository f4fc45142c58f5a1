//! [`CheckAvailability`] definition.

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        availability::{self, BookingRequest, Conflict, ExistingBooking},
        space, Space,
    },
    infra::{database, Database},
    Service,
};

use super::{ExecutionError, Query};

/// [`Query`] checking whether a [`BookingRequest`] fits into the seats left
/// by the existing bookings.
///
/// Reserves nothing, so a positive answer may be outdated by the time the
/// booking is created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CheckAvailability(pub BookingRequest);

impl<Db> Query<CheckAvailability> for Service<Db>
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
    type Ok = Conflict;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        CheckAvailability(request): CheckAvailability,
    ) -> Result<Self::Ok, Self::Err> {
        let space = self
            .existing_space(request.space_id)
            .await
            .map_err(tracerr::wrap!())?;

        let bookings = self
            .database()
            .execute(Select(By::<Vec<ExistingBooking>, _>::new((
                request.space_id,
                request.date,
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;

        let conflict =
            availability::check_conflict(&request, &bookings, space.capacity);
        log::debug!(
            space_id = %request.space_id,
            date = %request.date,
            range = %request.range,
            guests = request.guests_count.get(),
            available_spots = conflict.available_spots,
            has_conflict = conflict.has_conflict,
            "availability checked",
        );

        Ok(conflict)
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        fixture,
        query::{CheckAvailability, ExecutionError},
        Query as _,
    };

    #[tokio::test]
    async fn reports_free_spots() {
        let (service, space) = fixture::service_with_space(5).await;
        drop(fixture::book(&service, &space, "10:00-12:00", 3).await);

        let conflict = service
            .execute(CheckAvailability(fixture::request(
                &space,
                "11:00-13:00",
                2,
            )))
            .await
            .unwrap();
        assert!(!conflict.has_conflict);
        assert_eq!(conflict.available_spots, 2);

        let conflict = service
            .execute(CheckAvailability(fixture::request(
                &space,
                "11:00-13:00",
                3,
            )))
            .await
            .unwrap();
        assert!(conflict.has_conflict);
        assert_eq!(conflict.available_spots, 2);
    }

    #[tokio::test]
    async fn excludes_replaced_booking() {
        let (service, space) = fixture::service_with_space(2).await;
        let booking = fixture::book(&service, &space, "10:00-12:00", 2).await;

        let mut request = fixture::request(&space, "10:00-13:00", 2);
        let conflict = service
            .execute(CheckAvailability(request))
            .await
            .unwrap();
        assert!(conflict.has_conflict);
        assert_eq!(conflict.available_spots, 0);

        request.replaces = Some(booking.id);
        let conflict = service
            .execute(CheckAvailability(request))
            .await
            .unwrap();
        assert!(!conflict.has_conflict);
        assert_eq!(conflict.available_spots, 2);
    }

    #[tokio::test]
    async fn fails_on_unknown_space() {
        let (service, _) = fixture::service_with_space(2).await;
        let other = fixture::space(2);

        let err = service
            .execute(CheckAvailability(fixture::request(
                &other,
                "10:00-12:00",
                1,
            )))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::SpaceNotExists(id) if *id == other.id,
        ));
    }
}
