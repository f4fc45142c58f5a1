//! In-memory [`Database`] implementation.

use std::{collections::HashMap, sync::Arc};

use common::operations::{By, Insert, Select, Update};
use tokio::sync::RwLock;
use tracerr::Traced;

use crate::{
    domain::{
        availability::{self, BookingRequest, ExistingBooking},
        booking, space, Booking, Space,
    },
    infra::{
        database::{self, StatusChange},
        Database,
    },
};

/// In-memory [`Database`] keeping [`Space`]s and [`Booking`]s.
///
/// All the checks guarding a write run under the same write lock as the
/// write itself.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<RwLock<State>>);

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// State of a [`Memory`] database.
#[derive(Debug, Default)]
struct State {
    /// Stored [`Space`]s.
    spaces: HashMap<space::Id, Space>,

    /// Stored [`Booking`]s.
    bookings: HashMap<booking::Id, Booking>,
}

impl State {
    /// Returns the capacity-consuming [`ExistingBooking`]s of the provided
    /// [`Space`] on the provided date.
    fn existing_bookings(
        &self,
        space_id: space::Id,
        date: time::Date,
    ) -> Vec<ExistingBooking> {
        self.bookings
            .values()
            .filter(|b| {
                b.space_id == space_id
                    && b.date == date
                    && b.status.consumes_capacity()
            })
            .map(ExistingBooking::from)
            .collect()
    }

    /// Checks that the provided [`Booking`] fits into the seats left by the
    /// other ones.
    fn ensure_capacity(
        &self,
        booking: &Booking,
    ) -> Result<(), Traced<database::Error>> {
        use database::Error as E;

        let space = self
            .spaces
            .get(&booking.space_id)
            .ok_or(E::SpaceNotExists(booking.space_id))
            .map_err(tracerr::wrap!())?;

        let request = BookingRequest {
            space_id: booking.space_id,
            date: booking.date,
            range: booking.range,
            guests_count: booking.guests_count,
            replaces: Some(booking.id),
        };
        let conflict = availability::check_conflict(
            &request,
            &self.existing_bookings(booking.space_id, booking.date),
            space.capacity,
        );
        if conflict.has_conflict {
            return Err(tracerr::new!(E::CapacityExceeded(conflict)));
        }
        Ok(())
    }
}

impl Database<Select<By<Option<Space>, space::Id>>> for Memory {
    type Ok = Option<Space>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Space>, space::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.0.read().await.spaces.get(by.by()).cloned())
    }
}

impl Database<Select<By<Option<Booking>, booking::Id>>> for Memory {
    type Ok = Option<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.0.read().await.bookings.get(by.by()).cloned())
    }
}

impl Database<Select<By<Vec<ExistingBooking>, (space::Id, time::Date)>>>
    for Memory
{
    type Ok = Vec<ExistingBooking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<ExistingBooking>, (space::Id, time::Date)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (space_id, date) = by.into_inner();
        Ok(self.0.read().await.existing_bookings(space_id, date))
    }
}

impl Database<Select<By<Vec<Booking>, booking::ExpiryDateTime>>> for Memory {
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    /// Selects the [`Booking`]s still awaiting approval or payment, which
    /// have expired by the provided [`booking::ExpiryDateTime`], oldest
    /// first.
    async fn execute(
        &self,
        Select(by): Select<By<Vec<Booking>, booking::ExpiryDateTime>>,
    ) -> Result<Self::Ok, Self::Err> {
        let deadline = by.into_inner();
        let mut expired = self
            .0
            .read()
            .await
            .bookings
            .values()
            .filter(|b| {
                b.status.is_awaiting()
                    && b.expires_at.is_some_and(|at| at <= deadline)
            })
            .cloned()
            .collect::<Vec<_>>();
        expired.sort_by_key(|b| b.created_at);
        Ok(expired)
    }
}

impl Database<Insert<Space>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(space): Insert<Space>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.0.write().await.spaces.insert(space.id, space));
        Ok(())
    }
}

impl Database<Insert<Booking>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    /// Inserts the provided [`Booking`], unless it exceeds the capacity left
    /// at the moment of insertion.
    async fn execute(
        &self,
        Insert(booking): Insert<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.0.write().await;
        state.ensure_capacity(&booking).map_err(tracerr::wrap!())?;
        drop(state.bookings.insert(booking.id, booking));
        Ok(())
    }
}

impl Database<Update<StatusChange>> for Memory {
    type Ok = Booking;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(change): Update<StatusChange>,
    ) -> Result<Self::Ok, Self::Err> {
        use database::Error as E;

        let StatusChange { id, from, to } = change;
        let mut state = self.0.write().await;

        let mut booking = state
            .bookings
            .get(&id)
            .cloned()
            .ok_or(E::BookingNotExists(id))
            .map_err(tracerr::wrap!())?;

        // Changed concurrently since it was read.
        if booking.status != from {
            return Err(tracerr::new!(E::InvalidStatusTransition(
                booking::InvalidStatusTransition {
                    current: booking.status,
                    requested: to,
                }
            )));
        }
        booking::assert_transition(from, to)
            .map_err(E::InvalidStatusTransition)
            .map_err(tracerr::wrap!())?;

        booking.status = to;
        if to.consumes_capacity() && !from.consumes_capacity() {
            state.ensure_capacity(&booking).map_err(tracerr::wrap!())?;
        }

        drop(state.bookings.insert(id, booking.clone()));
        Ok(booking)
    }
}
