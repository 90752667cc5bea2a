//! Advertising Data: Flags
//!
//! The flags structure is only one byte of data for LE. Every bit that is not defined within the
//! Core Specification Supplement is reserved, and any bytes after the first are ignored.

use super::*;

/// The list of Flags defined in the Core Specification Supplement
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum FlagLabel {
    /// LE limited discoverable mode
    LeLimitedDiscoverableMode,
    /// LE general discoverable mode
    LeGeneralDiscoverableMode,
    /// BR/EDR not supported
    BrEdrNotSupported,
    /// The controller supports simultaneous BR/EDR and LE to the same device
    ControllerSupportsSimultaneousLeAndBrEdr,
}

impl FlagLabel {
    const ALL: [FlagLabel; 4] = [
        FlagLabel::LeLimitedDiscoverableMode,
        FlagLabel::LeGeneralDiscoverableMode,
        FlagLabel::BrEdrNotSupported,
        FlagLabel::ControllerSupportsSimultaneousLeAndBrEdr,
    ];

    fn get_position(&self) -> u8 {
        match *self {
            FlagLabel::LeLimitedDiscoverableMode => 0,
            FlagLabel::LeGeneralDiscoverableMode => 1,
            FlagLabel::BrEdrNotSupported => 2,
            FlagLabel::ControllerSupportsSimultaneousLeAndBrEdr => 3,
        }
    }
}

impl core::fmt::Display for FlagLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            FlagLabel::LeLimitedDiscoverableMode => f.write_str("le limited discoverable mode"),
            FlagLabel::LeGeneralDiscoverableMode => f.write_str("le general discoverable mode"),
            FlagLabel::BrEdrNotSupported => f.write_str("BR/EDR not supported"),
            FlagLabel::ControllerSupportsSimultaneousLeAndBrEdr => {
                f.write_str("this controller is capable of simultaneous LE and BR/EDR to the same device")
            }
        }
    }
}

/// Advertised Flags
///
/// This is the received flags byte of an advertiser.
///
/// ```
/// # use bo_tie_gap::assigned::{EirOrAdStruct, flags::{Flags, FlagLabel}};
/// let st = EirOrAdStruct::try_new(&[2, 0x01, 0x06]).unwrap().unwrap().0;
///
/// let flags: Flags = st.try_into().unwrap();
///
/// assert!(flags.is_set(FlagLabel::LeGeneralDiscoverableMode));
/// assert!(flags.is_set(FlagLabel::BrEdrNotSupported));
/// assert!(!flags.is_set(FlagLabel::LeLimitedDiscoverableMode));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
    const ASSIGNED_TYPE: AssignedTypes = AssignedTypes::Flags;

    /// Get the raw flags byte
    pub fn raw(&self) -> u8 {
        self.0
    }

    /// Check if the flag is set
    pub fn is_set(&self, label: FlagLabel) -> bool {
        self.0 & (1 << label.get_position()) != 0
    }

    /// Iterate over the labels of the flags that are set
    pub fn iter(&self) -> impl Iterator<Item = FlagLabel> + '_ {
        FlagLabel::ALL.into_iter().filter(move |label| self.is_set(*label))
    }
}

impl TryFromStruct<'_> for Flags {
    fn try_from_struct(st: EirOrAdStruct<'_>) -> Result<Self, Error>
    where
        Self: Sized,
    {
        if st.get_type() != Self::ASSIGNED_TYPE.val() {
            return Err(Error::IncorrectAssignedType);
        }

        st.get_data().first().map(|flags| Flags(*flags)).ok_or(Error::IncorrectLength)
    }
}
