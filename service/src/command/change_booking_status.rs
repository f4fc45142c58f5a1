//! [`Command`] for changing a [`Status`] of a [`Booking`].

use common::operations::{By, Select, Update};
use tracerr::Traced;

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

/// [`Command`] for moving a [`Booking`] to another [`Status`].
#[derive(Clone, Copy, Debug)]
pub struct ChangeBookingStatus {
    /// ID of the [`Booking`] to be changed.
    pub booking_id: booking::Id,

    /// [`Status`] to move the [`Booking`] to.
    pub status: Status,
}

impl<Db> Command<ChangeBookingStatus> for Service<Db>
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
        cmd: ChangeBookingStatus,
    ) -> Result<Self::Ok, Self::Err> {
        let ChangeBookingStatus { booking_id, status } = cmd;

        let booking = self
            .existing_booking(booking_id)
            .await
            .map_err(tracerr::wrap!())?;
        self.change_status(&booking, status)
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{ChangeBookingStatus, ExecutionError},
        domain::{
            booking::{self, InvalidStatusTransition, Status},
            space::ConfirmationType,
            Space,
        },
        fixture,
        query::CheckAvailability,
        Command as _, Query as _,
    };

    #[tokio::test]
    async fn walks_booking_lifecycle() {
        let (service, space) = fixture::service_with_space(2).await;
        let booking = fixture::book(&service, &space, "10:00-12:00", 1).await;

        for status in [Status::Confirmed, Status::CheckedIn, Status::Completed]
        {
            let changed = service
                .execute(ChangeBookingStatus {
                    booking_id: booking.id,
                    status,
                })
                .await
                .unwrap();
            assert_eq!(changed.id, booking.id);
            assert_eq!(changed.status, status);
        }
    }

    #[tokio::test]
    async fn rejects_illegal_transition() {
        let (service, space) = fixture::service_with_space(2).await;
        let booking = fixture::book(&service, &space, "10:00-12:00", 1).await;
        let booking = fixture::advance(&service, &booking, Status::Completed)
            .await;

        let err = service
            .execute(ChangeBookingStatus {
                booking_id: booking.id,
                status: Status::Pending,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::InvalidStatusTransition(InvalidStatusTransition {
                current: Status::Completed,
                requested: Status::Pending,
            }),
        ));
    }

    #[tokio::test]
    async fn rejected_booking_frees_seats() {
        let (service, space) = fixture::service_with_space(1).await;
        let booking = fixture::book(&service, &space, "10:00-12:00", 1).await;
        let request = fixture::request(&space, "10:00-12:00", 1);

        let conflict =
            service.execute(CheckAvailability(request)).await.unwrap();
        assert!(conflict.has_conflict);

        drop(
            service
                .execute(ChangeBookingStatus {
                    booking_id: booking.id,
                    status: Status::Rejected,
                })
                .await
                .unwrap(),
        );

        let conflict =
            service.execute(CheckAvailability(request)).await.unwrap();
        assert!(!conflict.has_conflict);
    }

    #[tokio::test]
    async fn rechecks_capacity_on_payment() {
        let (service, space) = fixture::service_with(Space {
            confirmation: ConfirmationType::Instant,
            ..fixture::space(1)
        })
        .await;
        let first = fixture::book(&service, &space, "10:00-12:00", 1).await;
        let second = fixture::book(&service, &space, "11:00-13:00", 1).await;
        assert_eq!(first.status, Status::PendingPayment);
        assert_eq!(second.status, Status::PendingPayment);

        let confirm = |booking_id| ChangeBookingStatus {
            booking_id,
            status: Status::Confirmed,
        };
        drop(service.execute(confirm(first.id)).await.unwrap());

        let err = service.execute(confirm(second.id)).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::SlotUnavailable(c) if c.available_spots == 0,
        ));
    }

    #[tokio::test]
    async fn fails_on_unknown_booking() {
        let (service, _) = fixture::service_with_space(1).await;
        let id = booking::Id::new();

        let err = service
            .execute(ChangeBookingStatus {
                booking_id: id,
                status: Status::Confirmed,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::BookingNotExists(i) if *i == id,
        ));
    }
}
