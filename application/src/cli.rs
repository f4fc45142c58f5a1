//! Implementations of the command line [`Command`]s.
//!
//! [`Command`]: crate::args::Command

use std::{num::NonZeroU32, time::Duration};

use common::{
    operations::{Insert, Perform},
    Currency, DateTime, Money,
};
use itertools::Itertools as _;
use rust_decimal::Decimal;
use service::{
    command::{ChangeBookingStatus, CreateBooking},
    domain::{
        availability::{
            self, BookingRequest, Conflict, ExistingBooking, TimeOfDay,
            WeeklySchedule,
        },
        booking::{self, Status},
        cancellation::{self, Initiator, Policy, Schedule},
        pricing::{self, Fees, Rates},
        space::{self, ConfirmationType},
        Booking, Space,
    },
    infra::{Database as _, Memory},
    task::ExpireBookings,
    Command as _, Service, Task as _,
};
use strum::VariantArray as _;
use tracing as log;

use crate::{
    args::{Book, Occupancy},
    AsError as _, Error,
};

/// Prices a booking lasting the provided number of `hours`.
///
/// # Errors
///
/// If the provided prices don't form valid [`Rates`].
pub fn quote(
    fees: &Fees,
    currency: Currency,
    hours: Decimal,
    per_hour: Decimal,
    per_day: Decimal,
) -> Result<String, Error> {
    let rates = Rates::new(
        Money {
            amount: per_hour,
            currency,
        },
        Money {
            amount: per_day,
            currency,
        },
    )
    .map_err(|e| tracerr::new!(e).into_error())?;

    let quote = pricing::compose(hours, &rates, fees);
    let payout = pricing::host_payout(&quote, fees);
    log::debug!(%hours, total = %quote.total, "booking quoted");

    Ok([
        format!("base:        {} ({})", quote.base, quote.breakdown_label),
        format!("service fee: {}", quote.service_fee),
        quote.vat.map_or_else(
            || "vat:         calculated at payment".to_owned(),
            |vat| format!("vat:         {vat}"),
        ),
        format!(
            "total:       {}{}",
            quote.total,
            if quote.is_estimate() { " (estimate)" } else { "" },
        ),
        format!(
            "host payout: {} (host fee {}, platform fee {})",
            payout.payout, payout.host_fee, payout.platform_fee,
        ),
    ]
    .join("\n"))
}

/// Renders the per-slot availability of a day with the provided `capacity`
/// and existing `bookings`, checking the `request` against them, if any.
#[must_use]
pub fn availability(
    capacity: u32,
    bookings: &[Occupancy],
    request: Option<Occupancy>,
) -> String {
    let existing = bookings
        .iter()
        .map(|o| ExistingBooking {
            id: booking::Id::new(),
            range: o.range,
            guests_count: o.guests.map(NonZeroU32::get),
            status: Status::Confirmed,
        })
        .collect::<Vec<_>>();

    let slots = availability::hourly_slots(capacity, &existing);
    let mut out = slots
        .slots
        .iter()
        .map(|s| format!("{}  {}/{}", s.time, s.available, s.total))
        .join("\n");

    if let Some(Occupancy { range, guests }) = request {
        let guests = guests.unwrap_or(NonZeroU32::MIN);
        let conflict = space::Capacity::new(capacity).map_or(
            Conflict {
                has_conflict: true,
                available_spots: 0,
            },
            |capacity| {
                availability::check_conflict(
                    &BookingRequest {
                        space_id: space::Id::new(),
                        date: time::OffsetDateTime::from(DateTime::now())
                            .date(),
                        range,
                        guests_count: guests,
                        replaces: None,
                    },
                    &existing,
                    capacity,
                )
            },
        );
        log::debug!(
            %range,
            available_spots = conflict.available_spots,
            has_conflict = conflict.has_conflict,
            "request checked",
        );

        out.push_str(&format!(
            "\n\nrequest {range} for {guests} guest(s): {}, {} spot(s) \
             available",
            if conflict.has_conflict {
                "conflicts"
            } else {
                "fits"
            },
            conflict.available_spots,
        ));
    }

    out
}

/// Calculates the refund of a booking paid `base` and starting at `start`,
/// cancelled `now` by the provided [`Initiator`].
///
/// # Errors
///
/// If the `base` price is negative.
pub fn refund(
    schedule: &Schedule,
    currency: Currency,
    base: Decimal,
    policy: Policy,
    start: DateTime,
    now: DateTime,
    initiator: Initiator,
) -> Result<String, Error> {
    if base < Decimal::ZERO {
        return Err(Error::invalid_input(&"base price must not be negative"));
    }

    let lead_time = cancellation::hours_until_start(&start, &now);
    let refund = cancellation::refund_for(
        initiator,
        Money {
            amount: base,
            currency,
        },
        schedule.breakpoints(policy),
        start,
        now,
    );
    log::debug!(
        %policy,
        %initiator,
        penalty = %refund.penalty,
        "refund calculated",
    );

    Ok([
        format!(
            "lead time: {}h{:02}m",
            lead_time.whole_hours(),
            lead_time.whole_minutes() % 60,
        ),
        format!("penalty:   {} ({})", refund.penalty, refund.penalty_amount),
        format!("refund:    {}", refund.refund_amount),
    ]
    .join("\n"))
}

/// Books a space in the UTC timezone, open all the time, through a
/// [`Service`] backed by the [`Memory`] database.
///
/// Existing bookings are created and confirmed before the requested one.
/// Bookings left awaiting are expired afterwards, if requested.
///
/// # Errors
///
/// If the space is invalid, or any of the bookings cannot be made.
pub async fn book(
    config: service::Config,
    currency: Currency,
    args: Book,
) -> Result<String, Error> {
    let Book {
        capacity,
        per_hour,
        per_day,
        policy,
        instant,
        date,
        bookings,
        request,
        at,
        expire_at,
    } = args;
    let at = at.unwrap_or_else(DateTime::now);

    let space = Space {
        id: space::Id::new(),
        capacity: space::Capacity::new(capacity).ok_or_else(|| {
            Error::invalid_input(&"capacity must be positive")
        })?,
        rates: Rates::new(
            Money {
                amount: per_hour,
                currency,
            },
            Money {
                amount: per_day,
                currency,
            },
        )
        .map_err(|e| tracerr::new!(e).into_error())?,
        timezone: space::Timezone::new("UTC")
            .ok_or_else(|| Error::internal(&"`UTC` timezone is rejected"))?,
        cancellation_policy: policy,
        confirmation: if instant {
            ConfirmationType::Instant
        } else {
            ConfirmationType::HostApproval
        },
        schedule: WeeklySchedule::always_open(),
    };
    let opens_before = config.check_in.opens_before;

    let service = Service::new(config, Memory::new());
    service
        .database()
        .execute(Insert(space.clone()))
        .await
        .map_err(|e| e.into_error())?;

    for occupancy in bookings {
        let existing = create(&service, &space, date, occupancy, at).await?;
        drop(
            service
                .execute(ChangeBookingStatus {
                    booking_id: existing.id,
                    status: Status::Confirmed,
                })
                .await
                .map_err(|e| e.into_error())?,
        );
    }

    let mut booking = create(&service, &space, date, request, at).await?;
    if let Some(at) = expire_at {
        let expired = service
            .execute(Perform(ExpireBookings { at }))
            .await
            .map_err(|e| e.into_error())?;
        log::debug!(count = expired.len(), %at, "bookings expired");
        if let Some(b) = expired.into_iter().find(|b| b.id == booking.id) {
            booking = b;
        }
    }

    Ok([
        format!("booking:  {}", booking.id),
        format!("status:   {}", booking.status),
        format!(
            "total:    {}{}",
            booking.quote.total,
            if booking.quote.is_estimate() {
                " (estimate)"
            } else {
                ""
            },
        ),
        booking.expires_at.map_or_else(
            || "expires:  never".to_owned(),
            |at| format!("expires:  {at}"),
        ),
        format!(
            "check-in: {} - {}",
            booking.starts_at - opens_before,
            booking.ends_at,
        ),
    ]
    .join("\n"))
}

/// Creates a booking of the `occupancy` on the `date` of the UTC `space`.
async fn create(
    service: &Service<Memory>,
    space: &Space,
    date: time::Date,
    occupancy: Occupancy,
    at: DateTime,
) -> Result<Booking, Error> {
    let Occupancy { range, guests } = occupancy;
    let midnight = DateTime::try_from(date.midnight().assume_utc())
        .map_err(|e| Error::invalid_input(&e))?;
    let since_midnight =
        |t: TimeOfDay| Duration::from_secs(u64::from(t.minutes()) * 60);

    service
        .execute(CreateBooking {
            request: BookingRequest {
                space_id: space.id,
                date,
                range,
                guests_count: guests.unwrap_or(NonZeroU32::MIN),
                replaces: None,
            },
            starts_at: (midnight + since_midnight(range.start())).coerce(),
            ends_at: (midnight + since_midnight(range.end())).coerce(),
            at,
        })
        .await
        .map_err(|e| e.into_error())
}

/// Checks whether a booking may move `from` one [`Status`] `to` another one.
///
/// # Errors
///
/// If the transition is illegal.
pub fn transition(from: Status, to: Status) -> Result<String, Error> {
    booking::assert_transition(from, to).map_err(|e| {
        let mut err = e.into_error();
        err.message = format!("{}: {}", err.message, next_statuses(from));
        err
    })?;

    Ok(format!("`{from}` -> `{to}` is allowed"))
}

/// Describes the [`Status`]es the `from` one may move to.
fn next_statuses(from: Status) -> String {
    let next = Status::VARIANTS
        .iter()
        .filter(|s| from.can_transition_to(**s))
        .map(|s| format!("`{s}`"))
        .join(", ");
    if next.is_empty() {
        format!("`{from}` is terminal")
    } else {
        format!("`{from}` may only become {next}")
    }
}
