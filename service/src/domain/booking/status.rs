//! [`Status`] of a [`Booking`] and its transitions.
//!
//! [`Booking`]: super::Booking

use common::define_kind;
use derive_more::{Display, Error};

use crate::domain::space::ConfirmationType;

define_kind! {
    #[doc = "Lifecycle status of a [`Booking`].\n\n\
             [`Booking`]: super::Booking"]
    enum Status {
        #[doc = "Waiting for the host approval."]
        Pending = 1,

        #[doc = "Waiting for the guest payment."]
        PendingPayment = 2,

        #[doc = "Confirmed and paid."]
        Confirmed = 3,

        #[doc = "Guest has checked in."]
        CheckedIn = 4,

        #[doc = "Successfully finished."]
        Completed = 5,

        #[doc = "Cancelled by a guest, a host or a payment timeout."]
        Cancelled = 6,

        #[doc = "Rejected by the host."]
        Rejected = 7,

        #[doc = "Under a dispute between a guest and a host."]
        Disputed = 8,
    }
}

impl Status {
    /// Returns the [`Status`] a new booking starts with, depending on the
    /// [`ConfirmationType`] of the booked space.
    #[must_use]
    pub const fn initial(confirmation: ConfirmationType) -> Self {
        match confirmation {
            ConfirmationType::HostApproval => Self::Pending,
            ConfirmationType::Instant => Self::PendingPayment,
        }
    }

    /// Indicates whether no further transitions are possible from this
    /// [`Status`].
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Rejected)
    }

    /// Indicates whether a booking in this [`Status`] occupies seats.
    #[must_use]
    pub const fn consumes_capacity(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Indicates whether a booking in this [`Status`] still waits for the
    /// host approval or the guest payment, and so may expire.
    #[must_use]
    pub const fn is_awaiting(self) -> bool {
        matches!(self, Self::Pending | Self::PendingPayment)
    }

    /// Indicates whether a booking in this [`Status`] has been paid for.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        matches!(
            self,
            Self::Confirmed
                | Self::CheckedIn
                | Self::Completed
                | Self::Disputed,
        )
    }

    /// Indicates whether a booking may move from this [`Status`] to the
    /// `requested` one.
    #[must_use]
    pub const fn can_transition_to(self, requested: Self) -> bool {
        use Status as S;

        match self {
            S::Pending => {
                matches!(requested, S::Confirmed | S::Rejected | S::Cancelled)
            }
            S::PendingPayment => {
                matches!(requested, S::Confirmed | S::Cancelled)
            }
            S::Confirmed => {
                matches!(requested, S::CheckedIn | S::Cancelled | S::Disputed)
            }
            S::CheckedIn => matches!(requested, S::Completed | S::Disputed),
            S::Disputed => matches!(requested, S::Cancelled | S::Confirmed),
            S::Completed | S::Cancelled | S::Rejected => false,
        }
    }
}

/// Indicates whether moving a booking from the `current` [`Status`] to the
/// `requested` one is legal.
#[must_use]
pub const fn is_transition_allowed(current: Status, requested: Status) -> bool {
    current.can_transition_to(requested)
}

/// Checks that moving a booking from the `current` [`Status`] to the
/// `requested` one is legal.
///
/// # Errors
///
/// With an [`InvalidStatusTransition`] if it's not.
pub const fn assert_transition(
    current: Status,
    requested: Status,
) -> Result<(), InvalidStatusTransition> {
    if current.can_transition_to(requested) {
        Ok(())
    } else {
        Err(InvalidStatusTransition { current, requested })
    }
}

/// Error of an illegal [`Status`] change.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("cannot change booking status from `{current}` to `{requested}`")]
pub struct InvalidStatusTransition {
    /// [`Status`] the booking is in.
    pub current: Status,

    /// [`Status`] requested for the booking.
    pub requested: Status,
}
