//! Fixtures shared by tests.

use std::time::Duration;

use common::{
    operations::{Insert, Update},
    Currency, DateTime, Money,
};
use time::Weekday;

use crate::{
    command::CreateBooking,
    domain::{
        availability::{BookingRequest, TimeOfDay, TimeRange, WeeklySchedule},
        booking::{
            CheckInWindow, EndDateTime, Expiry, StartDateTime, Status,
        },
        cancellation::{Breakpoint, Breakpoints, Penalty, Policy, Schedule},
        pricing::{Fees, Rates},
        space::{self, Capacity, ConfirmationType, Timezone},
        Booking, Space,
    },
    infra::{database::StatusChange, Database as _, Memory},
    Command as _, Config, Service,
};

/// Date every fixture booking is made for (a Tuesday).
pub(crate) const DATE: time::Date = time::macros::date!(2026 - 10 - 20);

pub(crate) fn eur(amount: &str) -> Money {
    Money {
        amount: amount.parse().unwrap(),
        currency: Currency::Eur,
    }
}

pub(crate) fn at(s: &str) -> DateTime {
    DateTime::from_rfc3339(s).unwrap()
}

fn breakpoints(table: &[(u32, u8)]) -> Breakpoints {
    Breakpoints::new(
        table
            .iter()
            .map(|&(hours, penalty)| Breakpoint {
                min_hours_before_start: hours,
                penalty: Penalty::new(penalty).unwrap(),
            })
            .collect(),
    )
    .unwrap()
}

pub(crate) fn config() -> Config {
    Config {
        fees: Fees {
            service_fee: "5".parse().unwrap(),
            vat: "22".parse().unwrap(),
            host_fee: "5".parse().unwrap(),
            stripe_tax_enabled: false,
        },
        cancellation: Schedule {
            flexible: breakpoints(&[(24, 0), (0, 100)]),
            moderate: breakpoints(&[(48, 0), (0, 50)]),
            strict: breakpoints(&[(168, 50), (0, 100)]),
        },
        check_in: CheckInWindow::default(),
        expiry: Expiry::default(),
    }
}

/// Space with `10EUR/h`, `60EUR/day` rates, open `09:00-18:00` on weekdays
/// and closed on weekends.
pub(crate) fn space(capacity: u32) -> Space {
    let weekdays = Some("09:00-18:00".parse::<TimeRange>().unwrap());
    let mut schedule = WeeklySchedule::closed();
    for day in [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ] {
        schedule = schedule.with_day(day, weekdays);
    }

    Space {
        id: space::Id::new(),
        capacity: Capacity::new(capacity).unwrap(),
        rates: Rates::new(eur("10"), eur("60")).unwrap(),
        timezone: Timezone::new("Europe/Rome").unwrap(),
        cancellation_policy: Policy::Moderate,
        confirmation: ConfirmationType::HostApproval,
        schedule,
    }
}

pub(crate) async fn service_with(space: Space) -> (Service<Memory>, Space) {
    let service = Service::new(config(), Memory::new());
    service
        .database()
        .execute(Insert(space.clone()))
        .await
        .unwrap();
    (service, space)
}

pub(crate) async fn service_with_space(
    capacity: u32,
) -> (Service<Memory>, Space) {
    service_with(space(capacity)).await
}

pub(crate) fn request(
    space: &Space,
    range: &str,
    guests: u32,
) -> BookingRequest {
    BookingRequest {
        space_id: space.id,
        date: DATE,
        range: range.parse().unwrap(),
        guests_count: guests.try_into().unwrap(),
        replaces: None,
    }
}

/// Returns the instants the provided `range` of the [`DATE`] spans, as if the
/// space was in UTC.
pub(crate) fn period(range: &TimeRange) -> (StartDateTime, EndDateTime) {
    let midnight = DateTime::try_from(DATE.midnight().assume_utc()).unwrap();
    let since_midnight =
        |t: TimeOfDay| Duration::from_secs(u64::from(t.minutes()) * 60);
    (
        (midnight + since_midnight(range.start())).coerce(),
        (midnight + since_midnight(range.end())).coerce(),
    )
}

/// Creates a booking of the provided `range` of the [`DATE`].
pub(crate) async fn book(
    service: &Service<Memory>,
    space: &Space,
    range: &str,
    guests: u32,
) -> Booking {
    let request = request(space, range, guests);
    let (starts_at, ends_at) = period(&request.range);
    service
        .execute(CreateBooking {
            request,
            starts_at,
            ends_at,
            at: at("2026-10-01T00:00:00Z"),
        })
        .await
        .unwrap()
}

/// Forces the provided [`Booking`] into the `to` [`Status`] through the legal
/// path from [`Status::Pending`].
pub(crate) async fn advance(
    service: &Service<Memory>,
    booking: &Booking,
    to: Status,
) -> Booking {
    use Status as S;

    let path: &[Status] = match to {
        S::Confirmed => &[S::Confirmed],
        S::CheckedIn => &[S::Confirmed, S::CheckedIn],
        S::Completed => &[S::Confirmed, S::CheckedIn, S::Completed],
        S::Disputed => &[S::Confirmed, S::Disputed],
        S::Rejected => &[S::Rejected],
        S::Cancelled => &[S::Cancelled],
        S::Pending | S::PendingPayment => &[],
    };

    let mut current = booking.clone();
    for &next in path {
        current = service
            .database()
            .execute(Update(StatusChange {
                id: current.id,
                from: current.status,
                to: next,
            }))
            .await
            .unwrap();
    }
    current
}
