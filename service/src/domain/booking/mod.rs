//! [`Booking`] definitions.

pub mod status;

use std::{num::NonZeroU32, time::Duration};

use common::{DateTime, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use uuid::Uuid;

use super::{availability::TimeRange, pricing::PriceQuote, space};

pub use self::status::{
    assert_transition, is_transition_allowed, InvalidStatusTransition, Status,
};

/// Reservation of a [`Space`] for a time range of some date.
///
/// [`Space`]: super::Space
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// ID of the booked [`Space`].
    ///
    /// [`Space`]: super::Space
    pub space_id: space::Id,

    /// Booked date.
    pub date: time::Date,

    /// Booked [`TimeRange`] of the `date`.
    pub range: TimeRange,

    /// Number of guests.
    pub guests_count: NonZeroU32,

    /// Current [`Status`] of this [`Booking`].
    pub status: Status,

    /// [`PriceQuote`] this [`Booking`] was made with.
    pub quote: PriceQuote,

    /// [`DateTime`] this [`Booking`] starts at.
    pub starts_at: StartDateTime,

    /// [`DateTime`] this [`Booking`] ends at.
    pub ends_at: EndDateTime,

    /// [`DateTime`] when this [`Booking`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] this [`Booking`] expires at, unless approved or paid
    /// before.
    pub expires_at: Option<ExpiryDateTime>,
}

impl Booking {
    /// Returns the amount the guest has paid for this [`Booking`].
    ///
    /// Zero until the [`Booking`] gets confirmed.
    #[must_use]
    pub fn paid_amount(&self) -> Money {
        if self.status.is_paid() {
            self.quote.total
        } else {
            Money {
                amount: Decimal::ZERO,
                currency: self.quote.total.currency,
            }
        }
    }
}

/// ID of a [`Booking`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Marker type describing a [`Booking`] start.
#[derive(Clone, Copy, Debug)]
pub struct Start;

/// Marker type describing a [`Booking`] end.
#[derive(Clone, Copy, Debug)]
pub struct End;

/// Marker type describing a [`Booking`] creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing a [`Booking`] expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// [`DateTime`] when a [`Booking`] starts.
pub type StartDateTime = DateTimeOf<(Booking, Start)>;

/// [`DateTime`] when a [`Booking`] ends.
pub type EndDateTime = DateTimeOf<(Booking, End)>;

/// [`DateTime`] when a [`Booking`] was created.
pub type CreationDateTime = DateTimeOf<(Booking, Creation)>;

/// [`DateTime`] when a [`Booking`] expires.
pub type ExpiryDateTime = DateTimeOf<(Booking, Expiration)>;

/// Time a [`Booking`] may wait for the host approval or the guest payment
/// before expiring.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Expiry {
    /// Time a [`Status::Pending`] [`Booking`] waits for the host approval.
    #[default(Duration::from_secs(24 * 60 * 60))]
    pub approval_timeout: Duration,

    /// Time a [`Status::PendingPayment`] [`Booking`] waits for the guest
    /// payment.
    #[default(Duration::from_secs(2 * 60 * 60))]
    pub payment_timeout: Duration,
}

impl Expiry {
    /// Returns the [`DateTime`] a [`Booking`] created in the provided
    /// [`Status`] expires at, if it may expire at all.
    #[must_use]
    pub fn deadline(
        &self,
        status: Status,
        created_at: CreationDateTime,
    ) -> Option<ExpiryDateTime> {
        use Status as S;

        let timeout = match status {
            S::Pending => self.approval_timeout,
            S::PendingPayment => self.payment_timeout,
            S::Confirmed
            | S::CheckedIn
            | S::Completed
            | S::Cancelled
            | S::Rejected
            | S::Disputed => return None,
        };
        Some((created_at + timeout).coerce())
    }
}

/// Period a guest may check in for a [`Booking`].
///
/// Opens some time before the [`Booking`] starts and closes once it ends.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct CheckInWindow {
    /// Time before a [`Booking`] start the check-in opens at.
    #[default(Duration::from_secs(2 * 60 * 60))]
    pub opens_before: Duration,
}

impl CheckInWindow {
    /// Indicates whether a [`Booking`] lasting from `start` till `end` may be
    /// checked in `at` the provided moment.
    #[must_use]
    pub fn contains(
        &self,
        start: StartDateTime,
        end: EndDateTime,
        at: DateTime,
    ) -> bool {
        let opens_at = (start - self.opens_before).coerce::<()>();
        opens_at <= at && at <= end.coerce()
    }
}
