//! Macros for defining kind enums.

/// Macro for defining a closed kind enum.
///
/// Variants are displayed and parsed in `snake_case`, unless another case is
/// specified with a `#[case = "..."]` attribute (any case name supported by
/// both [`strum`] and [`serde`] is accepted).
///
/// # Example
///
/// ```rust
/// common::define_kind! {
///     #[doc = "Seating kind."]
///     enum Seating {
///         #[doc = "A hot desk."]
///         HotDesk = 1,
///
///         #[doc = "A meeting room."]
///         MeetingRoom = 2,
///     }
/// }
///
/// assert_eq!(Seating::MeetingRoom.to_string(), "meeting_room");
/// assert_eq!("hot_desk".parse::<Seating>(), Ok(Seating::HotDesk));
/// ```
///
/// [`serde`]: https://docs.rs/serde
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        #[case = $case:tt]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            $crate::private::strum::VariantArray,
            Eq,
            Hash,
            PartialEq,
        )]
        #[cfg_attr(
            feature = "serde",
            derive(
                $crate::private::serde::Deserialize,
                $crate::private::serde::Serialize,
            ),
            serde(rename_all = $case),
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = $case)]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }
    };

    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        $crate::define_kind! {
            #[doc = $doc]
            #[case = "snake_case"]
            enum $name {
                $(
                    #[doc = $variant_doc]
                    $variant = $value,
                )*
            }
        }
    };
}
