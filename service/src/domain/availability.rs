//! Availability of a [`Space`] within a day.
//!
//! A day is split into 48 half-hour [`TimeSlot`]s. A slot is occupied by every
//! capacity-consuming booking whose half-open `[start, end)` [`TimeRange`]
//! contains the slot's start, so a booking ending exactly at a slot boundary
//! doesn't occupy that slot.
//!
//! [`Space`]: super::Space

use std::{fmt, num::NonZeroU32, str::FromStr};

use common::define_kind;
use derive_more::{Display, Error};
use rust_decimal::Decimal;
use time::Weekday;

use super::{booking, space};

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Length of a [`TimeSlot`] in minutes.
pub const SLOT_MINUTES: u16 = 30;

/// Number of [`TimeSlot`]s in a day.
pub const SLOTS_PER_DAY: u8 = 48;

/// Time of a day with a minute precision, in the `00:00..=24:00` range.
///
/// `24:00` is allowed only as the exclusive end of a [`TimeRange`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Start of a day (`00:00`).
    pub const MIDNIGHT: Self = Self(0);

    /// End of a day (`24:00`).
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    /// Creates a new [`TimeOfDay`] from the provided number of minutes since
    /// midnight.
    #[must_use]
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes > MINUTES_PER_DAY {
            return None;
        }
        Some(Self(minutes))
    }

    /// Creates a new [`TimeOfDay`] from the provided hours and minutes.
    #[must_use]
    pub fn from_hm(hours: u8, minutes: u8) -> Option<Self> {
        if minutes >= 60 {
            return None;
        }
        Self::from_minutes(u16::from(hours) * 60 + u16::from(minutes))
    }

    /// Returns the number of minutes since midnight.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseError;

    /// Parses `HH:MM` or `HH:MM:SS` (with zero seconds) strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ParseError as E;

        let mut parts = s.trim().split(':');
        let mut next = || -> Result<Option<u8>, ParseError> {
            parts
                .next()
                .map(|p| {
                    if p.len() != 2 || !p.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(E::Format);
                    }
                    p.parse().map_err(|_| E::Format)
                })
                .transpose()
        };

        let (Some(hours), Some(minutes)) = (next()?, next()?) else {
            return Err(E::Format);
        };
        if let Some(seconds) = next()? {
            if seconds != 0 {
                return Err(E::NotAligned);
            }
        }
        if next()?.is_some() {
            return Err(E::Format);
        }

        Self::from_hm(hours, minutes).ok_or(E::OutOfRange)
    }
}

/// Error of parsing a [`TimeOfDay`] or a [`TimeRange`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ParseError {
    /// String is not in the `HH:MM` format.
    #[display("time must be in `HH:MM` format")]
    Format,

    /// Time is beyond `24:00`.
    #[display("time must be in `00:00..=24:00` range")]
    OutOfRange,

    /// Time has non-zero seconds.
    #[display("time must be aligned to whole minutes")]
    NotAligned,

    /// [`TimeRange`] doesn't end after it starts.
    #[display("time range must end after it starts")]
    Empty,
}

/// Half-hour slot of a day.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimeSlot(u8);

impl TimeSlot {
    /// Returns all the [`TimeSlot`]s of a day in order (`00:00`..`23:30`).
    pub fn all() -> impl Iterator<Item = Self> {
        (0..SLOTS_PER_DAY).map(Self)
    }

    /// Returns the [`TimeSlot`] starting at the provided [`TimeOfDay`], if it
    /// is half-hour aligned and not the end of a day.
    #[must_use]
    pub fn new(start: TimeOfDay) -> Option<Self> {
        let minutes = start.minutes();
        (minutes % SLOT_MINUTES == 0 && minutes < MINUTES_PER_DAY)
            .then(|| u8::try_from(minutes / SLOT_MINUTES).ok())
            .flatten()
            .map(Self)
    }

    /// Returns the index of this [`TimeSlot`] within a day.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the [`TimeOfDay`] this [`TimeSlot`] starts at.
    #[must_use]
    pub fn start(self) -> TimeOfDay {
        TimeOfDay(u16::from(self.0) * SLOT_MINUTES)
    }

    /// Returns the [`TimeOfDay`] this [`TimeSlot`] ends at.
    #[must_use]
    pub fn end(self) -> TimeOfDay {
        TimeOfDay((u16::from(self.0) + 1) * SLOT_MINUTES)
    }

    /// Returns the [`TimeRange`] covered by this [`TimeSlot`].
    #[must_use]
    pub fn range(self) -> TimeRange {
        TimeRange {
            start: self.start(),
            end: self.end(),
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.start().fmt(f)
    }
}

/// Half-open `[start, end)` range of a day.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TimeRange {
    /// Inclusive start of this [`TimeRange`].
    start: TimeOfDay,

    /// Exclusive end of this [`TimeRange`].
    end: TimeOfDay,
}

impl TimeRange {
    /// The whole day (`00:00-24:00`).
    pub const FULL_DAY: Self = Self {
        start: TimeOfDay::MIDNIGHT,
        end: TimeOfDay::END_OF_DAY,
    };

    /// Creates a new [`TimeRange`].
    ///
    /// # Errors
    ///
    /// If the `end` is not after the `start`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, EmptyRange> {
        if start >= end {
            return Err(EmptyRange);
        }
        Ok(Self { start, end })
    }

    /// Returns the inclusive start of this [`TimeRange`].
    #[must_use]
    pub const fn start(&self) -> TimeOfDay {
        self.start
    }

    /// Returns the exclusive end of this [`TimeRange`].
    #[must_use]
    pub const fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Returns the length of this [`TimeRange`] in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u16 {
        self.end.0 - self.start.0
    }

    /// Returns the length of this [`TimeRange`] in (possibly fractional)
    /// hours.
    #[must_use]
    pub fn duration_hours(&self) -> Decimal {
        Decimal::from(self.duration_minutes()) / Decimal::from(60)
    }

    /// Checks whether the provided [`TimeOfDay`] is within this
    /// [`TimeRange`].
    #[must_use]
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time < self.end
    }

    /// Checks whether the `other` [`TimeRange`] lies completely within this
    /// one.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Checks whether this [`TimeRange`] shares any moment with the `other`
    /// one.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for TimeRange {
    type Err = ParseError;

    /// Parses `HH:MM-HH:MM` strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once('-').ok_or(ParseError::Format)?;
        Self::new(start.parse()?, end.parse()?).map_err(|_| ParseError::Empty)
    }
}

/// Error of creating an empty [`TimeRange`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("time range must end after it starts")]
pub struct EmptyRange;

/// Opening hours of a [`Space`] on some day.
///
/// [`Space`]: super::Space
pub type OpeningHours = TimeRange;

/// Booking already existing on a date, as seen by the availability checks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExistingBooking {
    /// ID of the booking.
    pub id: booking::Id,

    /// [`TimeRange`] occupied by the booking.
    pub range: TimeRange,

    /// Number of guests of the booking, `1` if unknown.
    pub guests_count: Option<u32>,

    /// Current [`booking::Status`] of the booking.
    pub status: booking::Status,
}

impl ExistingBooking {
    /// Returns the number of guests occupying a [`TimeSlot`] with this
    /// [`ExistingBooking`].
    ///
    /// Zero, if the booking doesn't consume capacity.
    #[must_use]
    pub fn occupied_seats(&self) -> u32 {
        if self.status.consumes_capacity() {
            self.guests_count.unwrap_or(1)
        } else {
            0
        }
    }
}

impl From<&booking::Booking> for ExistingBooking {
    fn from(booking: &booking::Booking) -> Self {
        Self {
            id: booking.id,
            range: booking.range,
            guests_count: Some(booking.guests_count.get()),
            status: booking.status,
        }
    }
}

/// Prospective booking of a [`Space`], prior to its persistence.
///
/// [`Space`]: super::Space
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BookingRequest {
    /// ID of the requested [`Space`].
    ///
    /// [`Space`]: super::Space
    pub space_id: space::Id,

    /// Requested date.
    pub date: time::Date,

    /// Requested [`TimeRange`] of the `date`.
    pub range: TimeRange,

    /// Number of guests.
    pub guests_count: NonZeroU32,

    /// ID of the existing booking being rescheduled by this request, if any.
    ///
    /// This booking is not considered as conflicting.
    pub replaces: Option<booking::Id>,
}

/// Availability of a single [`TimeSlot`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotAvailability {
    /// [`TimeSlot`] this availability is for.
    pub time: TimeSlot,

    /// Number of still available seats.
    pub available: u32,

    /// Total number of seats.
    pub total: u32,
}

/// Availability of a [`Space`] within a day, per [`TimeSlot`].
///
/// [`Space`]: super::Space
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Availability {
    /// [`SlotAvailability`] of every [`TimeSlot`] of a day, in order.
    pub slots: Vec<SlotAvailability>,

    /// Maximum capacity of the [`Space`].
    ///
    /// [`Space`]: super::Space
    pub max_capacity: u32,
}

impl Availability {
    /// Returns the [`SlotAvailability`] of the provided [`TimeSlot`].
    #[must_use]
    pub fn slot(&self, slot: TimeSlot) -> Option<&SlotAvailability> {
        self.slots.get(usize::from(slot.index()))
    }

    /// Returns the minimum number of available seats across all the
    /// [`TimeSlot`]s intersecting the provided [`TimeRange`].
    #[must_use]
    pub fn min_available(&self, range: &TimeRange) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.time.range().overlaps(range))
            .map(|s| s.available)
            .min()
            .unwrap_or(self.max_capacity)
    }
}

/// Builds the [`Availability`] of a day with the provided `max_capacity` and
/// the [`ExistingBooking`]s of that day.
///
/// Bookings not consuming capacity are ignored.
#[must_use]
pub fn hourly_slots(
    max_capacity: u32,
    bookings: &[ExistingBooking],
) -> Availability {
    let slots = TimeSlot::all()
        .map(|time| {
            let booked = bookings
                .iter()
                .filter(|b| b.range.contains(time.start()))
                .map(ExistingBooking::occupied_seats)
                .fold(0_u32, u32::saturating_add);
            SlotAvailability {
                time,
                available: max_capacity.saturating_sub(booked),
                total: max_capacity,
            }
        })
        .collect();

    Availability {
        slots,
        max_capacity,
    }
}

/// Result of checking a [`BookingRequest`] against [`ExistingBooking`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Conflict {
    /// Indicator whether the request doesn't fit into the available seats.
    pub has_conflict: bool,

    /// Minimum number of available seats during the requested [`TimeRange`].
    pub available_spots: u32,
}

/// Checks whether the provided [`BookingRequest`] fits into the seats left by
/// the [`ExistingBooking`]s of its date.
///
/// The booking replaced by the request (if any) is not counted. Nothing is
/// reserved: the result only describes the provided snapshot.
#[must_use]
pub fn check_conflict(
    request: &BookingRequest,
    bookings: &[ExistingBooking],
    capacity: space::Capacity,
) -> Conflict {
    let others = bookings
        .iter()
        .filter(|b| Some(b.id) != request.replaces)
        .copied()
        .collect::<Vec<_>>();

    let available_spots =
        hourly_slots(capacity.get(), &others).min_available(&request.range);

    Conflict {
        has_conflict: available_spots < request.guests_count.get(),
        available_spots,
    }
}

/// Weekly opening hours of a [`Space`].
///
/// [`Space`]: super::Space
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WeeklySchedule([Option<OpeningHours>; 7]);

impl WeeklySchedule {
    /// Creates a [`WeeklySchedule`] open all day long every day.
    #[must_use]
    pub const fn always_open() -> Self {
        Self([Some(TimeRange::FULL_DAY); 7])
    }

    /// Creates a [`WeeklySchedule`] closed every day.
    #[must_use]
    pub const fn closed() -> Self {
        Self([None; 7])
    }

    /// Returns this [`WeeklySchedule`] with the provided [`OpeningHours`] of
    /// the `day` (or the `day` closed, if [`None`]).
    #[must_use]
    pub fn with_day(
        mut self,
        day: Weekday,
        hours: Option<OpeningHours>,
    ) -> Self {
        self.0[usize::from(day.number_days_from_monday())] = hours;
        self
    }

    /// Returns the [`OpeningHours`] of the `day`, if it's open.
    #[must_use]
    pub fn hours(&self, day: Weekday) -> Option<OpeningHours> {
        self.0[usize::from(day.number_days_from_monday())]
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::always_open()
    }
}

define_kind! {
    #[doc = "Summary status of a day in a booking calendar."]
    enum DayStatus {
        #[doc = "Every slot within the opening hours is completely free."]
        Available = 1,

        #[doc = "Some seats are taken within the opening hours."]
        Partial = 2,

        #[doc = "No seats are left within the opening hours."]
        Unavailable = 3,

        #[doc = "Day is closed for bookings."]
        Disabled = 4,
    }
}

/// Summarizes the [`Availability`] of a day into a [`DayStatus`], considering
/// only the [`TimeSlot`]s lying completely within its [`OpeningHours`].
///
/// A closed day (or one without any whole slot open) is
/// [`DayStatus::Disabled`].
#[must_use]
pub fn day_status(
    availability: &Availability,
    hours: Option<OpeningHours>,
) -> DayStatus {
    let Some(hours) = hours else {
        return DayStatus::Disabled;
    };

    let (mut open, mut free, mut full) = (0_usize, 0_usize, 0_usize);
    for slot in availability
        .slots
        .iter()
        .filter(|s| hours.covers(&s.time.range()))
    {
        open += 1;
        if slot.available == 0 {
            full += 1;
        } else if slot.available == slot.total {
            free += 1;
        }
    }

    match open {
        0 => DayStatus::Disabled,
        n if n == full => DayStatus::Unavailable,
        n if n == free => DayStatus::Available,
        _ => DayStatus::Partial,
    }
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroU32;

    use time::{macros::date, Weekday};

    use crate::domain::{booking, space};

    use super::{
        check_conflict, day_status, hourly_slots, BookingRequest, DayStatus,
        ExistingBooking, ParseError, TimeOfDay, TimeRange, TimeSlot,
        WeeklySchedule,
    };

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn range(s: &str) -> TimeRange {
        s.parse().unwrap()
    }

    fn slot(s: &str) -> TimeSlot {
        TimeSlot::new(time(s)).unwrap()
    }

    fn existing(r: &str, guests: Option<u32>) -> ExistingBooking {
        ExistingBooking {
            id: booking::Id::new(),
            range: range(r),
            guests_count: guests,
            status: booking::Status::Confirmed,
        }
    }

    fn request(r: &str, guests: u32) -> BookingRequest {
        BookingRequest {
            space_id: space::Id::new(),
            date: date!(2026 - 10 - 20),
            range: range(r),
            guests_count: NonZeroU32::new(guests).unwrap(),
            replaces: None,
        }
    }

    fn capacity(n: u32) -> space::Capacity {
        space::Capacity::new(n).unwrap()
    }

    #[test]
    fn parses_time_of_day() {
        assert_eq!(time("09:30").minutes(), 570);
        assert_eq!(time("09:30:00").minutes(), 570);
        assert_eq!(time("24:00"), TimeOfDay::END_OF_DAY);
        assert_eq!(time("00:00").to_string(), "00:00");
        assert_eq!(time("17:05").to_string(), "17:05");

        assert_eq!("9:30".parse::<TimeOfDay>(), Err(ParseError::Format));
        assert_eq!("09-30".parse::<TimeOfDay>(), Err(ParseError::Format));
        assert_eq!(
            "09:30:15".parse::<TimeOfDay>(),
            Err(ParseError::NotAligned),
        );
        assert_eq!("24:30".parse::<TimeOfDay>(), Err(ParseError::OutOfRange));
        assert_eq!("12:60".parse::<TimeOfDay>(), Err(ParseError::OutOfRange));
        assert_eq!("12:00:00:00".parse::<TimeOfDay>(), Err(ParseError::Format));
    }

    #[test]
    fn parses_time_range() {
        let r = range("10:00-12:30");
        assert_eq!(r.duration_minutes(), 150);
        assert_eq!(r.duration_hours(), "2.5".parse().unwrap());
        assert_eq!(r.to_string(), "10:00-12:30");

        assert_eq!("12:00-10:00".parse::<TimeRange>(), Err(ParseError::Empty));
        assert_eq!("10:00-10:00".parse::<TimeRange>(), Err(ParseError::Empty));
        assert_eq!("10:00".parse::<TimeRange>(), Err(ParseError::Format));
    }

    #[test]
    fn range_is_half_open() {
        let r = range("10:00-12:00");
        assert!(r.contains(time("10:00")));
        assert!(r.contains(time("11:59")));
        assert!(!r.contains(time("12:00")));
        assert!(!r.overlaps(&range("12:00-13:00")));
        assert!(r.overlaps(&range("11:30-13:00")));
        assert!(r.covers(&range("10:30-11:00")));
    }

    #[test]
    fn generates_48_slots() {
        let slots = TimeSlot::all().collect::<Vec<_>>();
        assert_eq!(slots.len(), 48);
        assert_eq!(slots[0].to_string(), "00:00");
        assert_eq!(slots[47].to_string(), "23:30");
        assert_eq!(slots[47].end(), TimeOfDay::END_OF_DAY);
        assert!(TimeSlot::new(time("10:15")).is_none());
        assert!(TimeSlot::new(TimeOfDay::END_OF_DAY).is_none());
    }

    #[test]
    fn occupies_slots_by_half_open_containment() {
        let availability = hourly_slots(5, &[existing("10:00-12:00", Some(3))]);

        assert_eq!(availability.slot(slot("09:30")).unwrap().available, 5);
        assert_eq!(availability.slot(slot("10:00")).unwrap().available, 2);
        assert_eq!(availability.slot(slot("10:30")).unwrap().available, 2);
        assert_eq!(availability.slot(slot("11:30")).unwrap().available, 2);
        assert_eq!(availability.slot(slot("12:00")).unwrap().available, 5);
    }

    #[test]
    fn defaults_guests_to_one() {
        let availability = hourly_slots(5, &[existing("10:00-11:00", None)]);
        assert_eq!(availability.slot(slot("10:00")).unwrap().available, 4);
    }

    #[test]
    fn ignores_bookings_not_consuming_capacity() {
        let mut cancelled = existing("10:00-11:00", Some(4));
        cancelled.status = booking::Status::Cancelled;
        let mut rejected = existing("10:00-11:00", Some(4));
        rejected.status = booking::Status::Rejected;

        let availability = hourly_slots(5, &[cancelled, rejected]);
        assert!(availability.slots.iter().all(|s| s.available == 5));
    }

    #[test]
    fn keeps_slots_within_bounds() {
        let bookings = [
            existing("08:00-18:00", Some(4)),
            existing("09:00-10:00", Some(4)),
            existing("09:30-10:30", Some(u32::MAX)),
        ];
        for max in [0, 1, 5] {
            let availability = hourly_slots(max, &bookings);
            assert_eq!(availability.max_capacity, max);
            assert_eq!(availability.slots.len(), 48);
            for s in &availability.slots {
                assert_eq!(s.total, max);
                assert!(s.available <= s.total);
            }
        }
    }

    #[test]
    fn empty_day_is_fully_available() {
        let availability = hourly_slots(7, &[]);
        assert!(availability.slots.iter().all(|s| s.available == 7));
    }

    #[test]
    fn detects_conflicts() {
        let bookings = [existing("10:00-12:00", Some(3))];

        let conflict =

            check_conflict(&request("11:00-13:00", 2), &bookings, capacity(5));
        assert!(!conflict.has_conflict);
        assert_eq!(conflict.available_spots, 2);

        let conflict =

            check_conflict(&request("11:00-13:00", 3), &bookings, capacity(5));
        assert!(conflict.has_conflict);
        assert_eq!(conflict.available_spots, 2);

        let conflict =

            check_conflict(&request("12:00-13:00", 5), &bookings, capacity(5));
        assert!(!conflict.has_conflict);
        assert_eq!(conflict.available_spots, 5);
    }

    #[test]
    fn unaligned_request_checks_every_intersected_slot() {
        let bookings = [existing("10:30-11:00", Some(5))];
        let conflict =
            check_conflict(&request("10:15-10:45", 1), &bookings, capacity(5));
        assert!(conflict.has_conflict);
        assert_eq!(conflict.available_spots, 0);
    }

    #[test]
    fn excludes_replaced_booking() {
        let own = existing("10:00-12:00", Some(5));
        let mut req = request("10:30-12:30", 5);
        assert!(check_conflict(&req, &[own], capacity(5)).has_conflict);

        req.replaces = Some(own.id);
        let conflict = check_conflict(&req, &[own], capacity(5));
        assert!(!conflict.has_conflict);
        assert_eq!(conflict.available_spots, 5);
    }

    #[test]
    fn adding_bookings_never_increases_available_spots() {
        let candidates = [
            existing("09:00-10:00", Some(1)),
            existing("10:30-11:30", Some(2)),
            existing("11:00-15:00", None),
            existing("14:00-16:00", Some(3)),
        ];
        let req = request("10:00-14:30", 1);

        let mut bookings = Vec::new();
        let spots = |bookings: &[ExistingBooking]| {
            check_conflict(&req, bookings, capacity(6)).available_spots
        };
        let mut previous = spots(&bookings);
        for b in candidates {
            bookings.push(b);
            let current = spots(&bookings);
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn summarizes_day_status() {
        let hours = Some(range("09:00-18:00"));

        let empty = hourly_slots(2, &[]);
        assert_eq!(day_status(&empty, hours), DayStatus::Available);
        assert_eq!(day_status(&empty, None), DayStatus::Disabled);

        let evening = hourly_slots(2, &[existing("18:00-22:00", Some(2))]);
        assert_eq!(day_status(&evening, hours), DayStatus::Available);

        let partial = hourly_slots(2, &[existing("10:00-11:00", Some(1))]);
        assert_eq!(day_status(&partial, hours), DayStatus::Partial);

        let full = hourly_slots(2, &[existing("08:00-19:00", Some(2))]);
        assert_eq!(day_status(&full, hours), DayStatus::Unavailable);

        let too_short = Some(range("09:10-09:40"));
        assert_eq!(day_status(&empty, too_short), DayStatus::Disabled);
    }

    #[test]
    fn weekly_schedule_per_day() {
        let schedule = WeeklySchedule::closed()
            .with_day(Weekday::Monday, Some(range("09:00-18:00")));
        assert_eq!(schedule.hours(Weekday::Monday), Some(range("09:00-18:00")));
        assert_eq!(schedule.hours(Weekday::Sunday), None);
        assert_eq!(
            WeeklySchedule::default().hours(Weekday::Sunday),
            Some(TimeRange::FULL_DAY),
        );
    }
}
