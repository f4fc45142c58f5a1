//! [`Query`] definition.

pub mod check_availability;
pub mod day_status;
pub mod quote_booking;
pub mod slot_availability;

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{space, Space},
    infra::{database, Database},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

pub use self::{
    check_availability::CheckAvailability, day_status::DayStatus,
    quote_booking::QuoteBooking, slot_availability::SlotAvailability,
};

/// [`Query`] [`Select`]ing a `T`ype from a [`Database`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DatabaseQuery<T>(T);

impl<W, B> DatabaseQuery<By<W, B>> {
    /// Creates a new [`DatabaseQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, W, B> Query<DatabaseQuery<By<W, B>>> for Service<Db>
where
    Db: Database<Select<By<W, B>>, Ok = W, Err = Traced<database::Error>>,
{
    type Ok = W;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        DatabaseQuery(by): DatabaseQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Queries a [`Space`] by its [`space::Id`].
pub type SpaceById = DatabaseQuery<By<Option<Space>, space::Id>>;

impl<Db> Service<Db>
where
    Db: Database<
        Select<By<Option<Space>, space::Id>>,
        Ok = Option<Space>,
        Err = Traced<database::Error>,
    >,
{
    /// Selects the existing [`Space`] with the provided [`space::Id`].
    async fn existing_space(
        &self,
        id: space::Id,
    ) -> Result<Space, Traced<ExecutionError>> {
        use ExecutionError as E;

        self.execute(SpaceById::by(id))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SpaceNotExists(id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of a [`Space`]-related [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Space`] with the provided ID does not exist.
    #[display("`Space(id: {_0})` does not exist")]
    SpaceNotExists(#[error(not(source))] space::Id),
}
