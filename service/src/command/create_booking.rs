//! [`Command`] for creating a new [`Booking`].

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        availability::{self, BookingRequest, ExistingBooking},
        booking::{self, Status},
        pricing, space, Booking, Space,
    },
    infra::{database, Database},
    Service,
};

use super::{Command, ExecutionError};

/// [`Command`] for creating a new [`Booking`] of a [`Space`].
///
/// The `starts_at` and `ends_at` instants must span exactly the requested
/// [`TimeRange`].
///
/// The [`BookingRequest::replaces`] is not considered: the replaced
/// [`Booking`] keeps its seats until it's cancelled.
///
/// [`TimeRange`]: availability::TimeRange
#[derive(Clone, Copy, Debug)]
pub struct CreateBooking {
    /// [`BookingRequest`] to be persisted.
    pub request: BookingRequest,

    /// [`DateTime`] the new [`Booking`] starts at, in UTC.
    pub starts_at: booking::StartDateTime,

    /// [`DateTime`] the new [`Booking`] ends at, in UTC.
    pub ends_at: booking::EndDateTime,

    /// [`DateTime`] of the [`Booking`] creation.
    pub at: DateTime,
}

impl<Db> Command<CreateBooking> for Service<Db>
where
    Db: Database<
            Select<By<Option<Space>, space::Id>>,
            Ok = Option<Space>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<ExistingBooking>, (space::Id, time::Date)>>,
            Ok = Vec<ExistingBooking>,
            Err = Traced<database::Error>,
        > + Database<Insert<Booking>, Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateBooking {
            request,
            starts_at,
            ends_at,
            at,
        } = cmd;
        let request = BookingRequest {
            replaces: None,
            ..request
        };

        let expected = i64::from(request.range.duration_minutes());
        if ends_at.signed_since(&starts_at) != time::Duration::minutes(expected)
        {
            log::debug!(
                range = %request.range,
                %starts_at,
                %ends_at,
                "booking period doesn't match its time range",
            );
            return Err(tracerr::new!(E::InvalidPeriod(request.range)));
        }

        let space = self
            .database()
            .execute(Select(By::<Option<Space>, _>::new(request.space_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SpaceNotExists(request.space_id))
            .map_err(tracerr::wrap!())?;

        let existing = self
            .database()
            .execute(Select(By::<Vec<ExistingBooking>, _>::new((
                request.space_id,
                request.date,
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Optimistic check only, the `Database` repeats it on insertion.
        let conflict =
            availability::check_conflict(&request, &existing, space.capacity);
        if conflict.has_conflict {
            log::debug!(
                space_id = %request.space_id,
                range = %request.range,
                available_spots = conflict.available_spots,
                "booking request conflicts",
            );
            return Err(tracerr::new!(E::SlotUnavailable(conflict)));
        }

        let status = Status::initial(space.confirmation);
        let created_at = at.coerce();
        let booking = Booking {
            id: booking::Id::new(),
            space_id: request.space_id,
            date: request.date,
            range: request.range,
            guests_count: request.guests_count,
            status,
            quote: pricing::compose(
                request.range.duration_hours(),
                &space.rates,
                &self.config().fees,
            ),
            starts_at,
            ends_at,
            created_at,
            expires_at: self.config().expiry.deadline(status, created_at),
        };

        self.database()
            .execute(Insert(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        log::info!(
            booking_id = %booking.id,
            space_id = %booking.space_id,
            status = %booking.status,
            total = %booking.quote.total,
            expires_at = ?booking.expires_at.map(|e| e.to_string()),
            "booking created",
        );

        Ok(booking)
    }
}
