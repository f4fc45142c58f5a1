//! [`QuoteBooking`] definition.

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        availability::TimeRange,
        pricing::{self, PriceQuote},
        space, Space,
    },
    infra::{database, Database},
    Service,
};

use super::{ExecutionError, Query};

/// [`Query`] to price a booking of a [`Space`] for the provided
/// [`TimeRange`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QuoteBooking {
    /// ID of the [`Space`] to be booked.
    pub space_id: space::Id,

    /// [`TimeRange`] to be booked.
    pub range: TimeRange,
}

impl<Db> Query<QuoteBooking> for Service<Db>
where
    Db: Database<
        Select<By<Option<Space>, space::Id>>,
        Ok = Option<Space>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = PriceQuote;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        QuoteBooking { space_id, range }: QuoteBooking,
    ) -> Result<Self::Ok, Self::Err> {
        let space = self
            .existing_space(space_id)
            .await
            .map_err(tracerr::wrap!())?;

        let quote = pricing::compose(
            range.duration_hours(),
            &space.rates,
            &self.config().fees,
        );
        log::debug!(
            %space_id,
            %range,
            total = %quote.total,
            is_day_rate = quote.is_day_rate,
            "booking quoted",
        );

        Ok(quote)
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        fixture,
        query::{ExecutionError, QuoteBooking},
        Query as _,
    };

    #[tokio::test]
    async fn quotes_hourly_and_daily() {
        let (service, space) = fixture::service_with_space(5).await;

        let hourly = service
            .execute(QuoteBooking {
                space_id: space.id,
                range: "10:00-14:00".parse().unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(hourly.base, fixture::eur("40"));
        assert_eq!(hourly.service_fee, fixture::eur("2"));
        assert_eq!(hourly.vat, Some(fixture::eur("9.24")));
        assert_eq!(hourly.total, fixture::eur("51.24"));
        assert!(!hourly.is_day_rate);

        let daily = service
            .execute(QuoteBooking {
                space_id: space.id,
                range: "09:00-18:00".parse().unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(daily.base, fixture::eur("60"));
        assert!(daily.is_day_rate);
    }

    #[tokio::test]
    async fn fails_for_unknown_space() {
        let (service, _) = fixture::service_with_space(5).await;
        let unknown = crate::domain::space::Id::new();

        let err = service
            .execute(QuoteBooking {
                space_id: unknown,
                range: "10:00-14:00".parse().unwrap(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::SpaceNotExists(id) if *id == unknown,
        ));
    }
}
