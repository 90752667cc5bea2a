//! Local name data type
use super::*;
use alloc::borrow::Cow;

/// An advertised Local Name
///
/// Local names are either complete or shortened within the advertising packet. The assigned type
/// of the structure tells which one it is.
///
/// The name is the raw bytes of the structure. The Core Specification Supplement requires it to be
/// UTF-8, but that is up to the advertiser, so the conversion to a `str` is left to the user. Use
/// [`as_str`] for a strict conversion or [`to_str_lossy`] for a conversion that can never fail.
///
/// [`as_str`]: LocalName::as_str
/// [`to_str_lossy`]: LocalName::to_str_lossy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalName<'a> {
    name: &'a [u8],
    is_complete: bool,
}

impl<'a> LocalName<'a> {
    /// Get the raw bytes of the name
    pub fn as_bytes(&self) -> &'a [u8] {
        self.name
    }

    /// Try to get the name as a `str`
    pub fn as_str(&self) -> Result<&'a str, Error> {
        core::str::from_utf8(self.name).map_err(Error::UTF8Error)
    }

    /// Get the name as a `str`, replacing invalid UTF-8 with the replacement character
    pub fn to_str_lossy(&self) -> Cow<'a, str> {
        alloc::string::String::from_utf8_lossy(self.name)
    }

    /// Check if the name is complete
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }
}

impl<'a> TryFromStruct<'a> for LocalName<'a> {
    fn try_from_struct(r#struct: EirOrAdStruct<'a>) -> Result<Self, Error> {
        const SHORT: u8 = AssignedTypes::ShortenedLocalName.val();

        const COMPLETE: u8 = AssignedTypes::CompleteLocalName.val();

        let is_complete = match r#struct.get_type() {
            COMPLETE => true,
            SHORT => false,
            _ => return Err(Error::IncorrectAssignedType),
        };

        Ok(LocalName {
            name: r#struct.get_data(),
            is_complete,
        })
    }
}
