//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{
    command,
    domain::{booking::InvalidStatusTransition, pricing::InvalidRates},
    infra::database,
    query, ConfigurationMissing,
};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

define_error! {
    enum BookingError {
        #[code = "SLOT_UNAVAILABLE"]
        #[message = "This time slot is no longer available"]
        SlotUnavailable,

        #[code = "INVALID_STATUS_TRANSITION"]
        #[message = "This action is not allowed for the current booking \
                     state"]
        InvalidStatusTransition,

        #[code = "BOOKING_NOT_FOUND"]
        #[message = "Booking does not exist"]
        BookingNotFound,

        #[code = "SPACE_NOT_FOUND"]
        #[message = "Space does not exist"]
        SpaceNotFound,

        #[code = "CHECK_IN_CLOSED"]
        #[message = "Check-in is available from shortly before the booking \
                     start until its end"]
        CheckInClosed,
    }
}

/// User-facing [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an unexpected internal error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Create a new [`Error`] representing an invalid user input.
    #[must_use]
    pub fn invalid_input(msg: &impl ToString) -> Self {
        Self {
            code: "INVALID_INPUT",
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for command::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(
            match self {
                Self::SpaceNotExists(_) => BookingError::SpaceNotFound,
                Self::BookingNotExists(_) => BookingError::BookingNotFound,
                Self::SlotUnavailable(_) => BookingError::SlotUnavailable,
                Self::InvalidStatusTransition(_) => {
                    BookingError::InvalidStatusTransition
                }
                Self::CheckInClosed(_) => BookingError::CheckInClosed,
                Self::InvalidPeriod(_) => {
                    return Some(Error::invalid_input(self));
                }
            }
            .into(),
        )
    }
}

impl AsError for query::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::SpaceNotExists(_) => Some(BookingError::SpaceNotFound.into()),
        }
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        Some(
            match self {
                Self::CapacityExceeded(_) => BookingError::SlotUnavailable,
                Self::InvalidStatusTransition(_) => {
                    BookingError::InvalidStatusTransition
                }
                Self::SpaceNotExists(_) => BookingError::SpaceNotFound,
                Self::BookingNotExists(_) => BookingError::BookingNotFound,
            }
            .into(),
        )
    }
}

impl AsError for InvalidStatusTransition {
    fn try_as_error(&self) -> Option<Error> {
        Some(BookingError::InvalidStatusTransition.into())
    }
}

impl AsError for ConfigurationMissing {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "CONFIGURATION_MISSING",
            message: format!(
                "Required configuration `{}` is missing, no default is \
                 assumed for it",
                self.0,
            ),
            backtrace: None,
        })
    }
}

impl AsError for InvalidRates {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::invalid_input(self))
    }
}
