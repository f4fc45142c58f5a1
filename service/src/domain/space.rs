//! [`Space`] definitions.

use std::num::NonZeroU32;

use common::define_kind;
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    availability::WeeklySchedule, cancellation::Policy, pricing::Rates,
};

/// Bookable coworking space.
///
/// Only the parts required for pricing, availability and cancellation are
/// represented here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Space {
    /// ID of this [`Space`].
    pub id: Id,

    /// Maximum number of guests this [`Space`] accommodates at once.
    pub capacity: Capacity,

    /// [`Rates`] this [`Space`] is rented for.
    pub rates: Rates,

    /// [`Timezone`] this [`Space`] is located in.
    pub timezone: Timezone,

    /// Cancellation [`Policy`] of this [`Space`].
    pub cancellation_policy: Policy,

    /// [`ConfirmationType`] of bookings of this [`Space`].
    pub confirmation: ConfirmationType,

    /// Opening hours of this [`Space`].
    pub schedule: WeeklySchedule,
}

/// ID of a [`Space`].
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

/// Maximum number of guests a [`Space`] accommodates at once.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Capacity(NonZeroU32);

impl Capacity {
    /// Creates a new [`Capacity`] if the provided value is positive.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Returns the number of guests.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// IANA timezone name of a [`Space`] (`Europe/Rome`, for example).
///
/// The name is carried verbatim: durations are computed by callers in the
/// declared timezone.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[as_ref(forward)]
pub struct Timezone(String);

impl Timezone {
    /// Creates a new [`Timezone`] if the provided name looks like an IANA one.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let valid = !name.is_empty()
            && !name.starts_with('/')
            && !name.ends_with('/')
            && name.chars().all(|c| {
                c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-' | '+')
            });
        valid.then_some(Self(name))
    }
}

define_kind! {
    #[doc = "How bookings of a [`Space`] are confirmed."]
    enum ConfirmationType {
        #[doc = "Booking is confirmed right after the payment."]
        Instant = 1,

        #[doc = "Booking waits for the host approval."]
        HostApproval = 2,
    }
}
