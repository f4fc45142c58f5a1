//! Cancellation policies and refunds.

use common::{define_kind, money::round_cents, DateTime, DateTimeOf, Money};
use derive_more::{Display, Error};
use rust_decimal::Decimal;
use serde::Deserialize;

define_kind! {
    #[doc = "Cancellation policy tier of a [`Space`].\n\n\
             [`Space`]: super::Space"]
    enum Policy {
        #[doc = "Low penalties and long grace period."]
        Flexible = 1,

        #[doc = "Middle ground between [`Policy::Flexible`] and \
                 [`Policy::Strict`]."]
        Moderate = 2,

        #[doc = "High penalties and short grace period."]
        Strict = 3,
    }
}

define_kind! {
    #[doc = "Party cancelling a booking."]
    enum Initiator {
        #[doc = "Guest who made the booking."]
        Guest = 1,

        #[doc = "Host of the booked [`Space`].\n\n\
                 [`Space`]: super::Space"]
        Host = 2,
    }
}

/// Percentage of a booking price withheld on cancellation.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[display("{_0}%")]
#[serde(try_from = "u8")]
pub struct Penalty(u8);

impl Penalty {
    /// No penalty at all.
    pub const NONE: Self = Self(0);

    /// The whole price is withheld.
    pub const FULL: Self = Self(100);

    /// Creates a new [`Penalty`] if the provided percentage is not greater
    /// than `100`.
    #[must_use]
    pub const fn new(percentage: u8) -> Option<Self> {
        if percentage > 100 {
            return None;
        }
        Some(Self(percentage))
    }

    /// Returns the percentage of this [`Penalty`].
    #[must_use]
    pub const fn percentage(self) -> u8 {
        self.0
    }

    /// Returns this [`Penalty`] of the provided `amount`, without rounding.
    #[must_use]
    pub fn of(self, amount: Decimal) -> Decimal {
        amount * Decimal::from(self.0) / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<u8> for Penalty {
    type Error = &'static str;

    fn try_from(percentage: u8) -> Result<Self, Self::Error> {
        Self::new(percentage).ok_or("penalty must be in `0..=100` range")
    }
}

/// Step of a [`Breakpoints`] table.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub struct Breakpoint {
    /// Minimum lead time (in hours before the booking start) this step
    /// applies from.
    pub min_hours_before_start: u32,

    /// [`Penalty`] of this step.
    pub penalty: Penalty,
}

impl Breakpoint {
    /// Returns the minimum lead time of this [`Breakpoint`].
    #[must_use]
    pub fn min_lead_time(&self) -> time::Duration {
        time::Duration::hours(i64::from(self.min_hours_before_start))
    }
}

/// Table of [`Breakpoint`]s of a [`Policy`], mapping a lead time to a
/// [`Penalty`].
///
/// Steps are sorted from the longest lead time to the shortest one, the
/// [`Penalty`] never decreases along them, and the last one starts at `0`
/// hours, so any lead time is covered.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "Vec<Breakpoint>")]
pub struct Breakpoints(Vec<Breakpoint>);

impl Breakpoints {
    /// Creates new [`Breakpoints`] out of the provided steps (in any order).
    ///
    /// # Errors
    ///
    /// If the steps don't form a valid table.
    pub fn new(mut steps: Vec<Breakpoint>) -> Result<Self, InvalidBreakpoints> {
        use InvalidBreakpoints as E;

        steps.sort_unstable_by(|a, b| {
            b.min_hours_before_start.cmp(&a.min_hours_before_start)
        });

        for pair in steps.windows(2) {
            let [longer, shorter] = pair else { continue };
            if longer.min_hours_before_start == shorter.min_hours_before_start
            {
                return Err(E::DuplicateThreshold(
                    longer.min_hours_before_start,
                ));
            }
            if longer.penalty > shorter.penalty {
                return Err(E::NotMonotonic(longer.min_hours_before_start));
            }
        }

        match steps.last() {
            None => Err(E::Empty),
            Some(last) if last.min_hours_before_start != 0 => {
                Err(E::MissingFloor)
            }
            Some(_) => Ok(Self(steps)),
        }
    }

    /// Returns the steps of these [`Breakpoints`], from the longest lead time
    /// to the shortest one.
    #[must_use]
    pub fn steps(&self) -> &[Breakpoint] {
        &self.0
    }

    /// Returns the [`Penalty`] of the longest step satisfied by the provided
    /// `lead_time`.
    #[must_use]
    pub fn penalty(&self, lead_time: time::Duration) -> Penalty {
        self.0
            .iter()
            .find(|step| lead_time >= step.min_lead_time())
            .map_or(Penalty::FULL, |step| step.penalty)
    }
}

impl TryFrom<Vec<Breakpoint>> for Breakpoints {
    type Error = InvalidBreakpoints;

    fn try_from(steps: Vec<Breakpoint>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

/// Error of creating invalid [`Breakpoints`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum InvalidBreakpoints {
    /// No steps provided.
    #[display("at least one breakpoint is required")]
    Empty,

    /// Several steps start at the same lead time.
    #[display("several breakpoints start at {_0}h before start")]
    DuplicateThreshold(#[error(not(source))] u32),

    /// [`Penalty`] decreases for a shorter lead time.
    #[display("penalty decreases after {_0}h before start")]
    NotMonotonic(#[error(not(source))] u32),

    /// No step covers the `0` hours lead time.
    #[display("breakpoint starting at 0h before start is required")]
    MissingFloor,
}

/// [`Breakpoints`] of every [`Policy`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schedule {
    /// [`Breakpoints`] of the [`Policy::Flexible`].
    pub flexible: Breakpoints,

    /// [`Breakpoints`] of the [`Policy::Moderate`].
    pub moderate: Breakpoints,

    /// [`Breakpoints`] of the [`Policy::Strict`].
    pub strict: Breakpoints,
}

impl Schedule {
    /// Returns the [`Breakpoints`] of the provided [`Policy`].
    #[must_use]
    pub const fn breakpoints(&self, policy: Policy) -> &Breakpoints {
        match policy {
            Policy::Flexible => &self.flexible,
            Policy::Moderate => &self.moderate,
            Policy::Strict => &self.strict,
        }
    }
}

/// Outcome of a booking cancellation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Refund {
    /// Applied [`Penalty`].
    pub penalty: Penalty,

    /// Withheld amount.
    pub penalty_amount: Money,

    /// Returned amount.
    pub refund_amount: Money,
}

impl Refund {
    /// Creates a [`Refund`] returning the whole `base` price.
    #[must_use]
    pub const fn full(base: Money) -> Self {
        Self {
            penalty: Penalty::NONE,
            penalty_amount: Money::zero(base.currency),
            refund_amount: base,
        }
    }
}

/// Returns the lead time between `now` and the booking `start`.
///
/// Zero, if the booking has already started.
#[must_use]
pub fn hours_until_start<S: ?Sized, N: ?Sized>(
    start: &DateTimeOf<S>,
    now: &DateTimeOf<N>,
) -> time::Duration {
    start.signed_since(now).max(time::Duration::ZERO)
}

/// Calculates the [`Refund`] of the `base` price of a booking starting at the
/// `start`, cancelled at `now` by a guest.
///
/// The penalty is rounded half-up to cents, and the refund absorbs the
/// rounding remainder, so both always sum up to the `base`.
#[must_use]
pub fn refund(
    base: Money,
    breakpoints: &Breakpoints,
    start: DateTime,
    now: DateTime,
) -> Refund {
    let penalty = breakpoints.penalty(hours_until_start(&start, &now));
    let penalty_amount = round_cents(penalty.of(base.amount)).min(base.amount);

    Refund {
        penalty,
        penalty_amount: base.with_amount(penalty_amount),
        refund_amount: base.with_amount(base.amount - penalty_amount),
    }
}

/// Calculates the [`Refund`] of a booking cancelled by the provided
/// [`Initiator`].
///
/// Cancellations by a host are always refunded in full.
#[must_use]
pub fn refund_for(
    initiator: Initiator,
    base: Money,
    breakpoints: &Breakpoints,
    start: DateTime,
    now: DateTime,
) -> Refund {
    match initiator {
        Initiator::Host => Refund::full(base),
        Initiator::Guest => refund(base, breakpoints, start, now),
    }
}
