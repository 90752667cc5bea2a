//! Assigned numbers and the associated data formats
//!
//! The assigned numbers for GAP come from the Bluetooth SIG and can be found on the official
//! [Bluetooth](https://www.bluetooth.com/specifications/assigned-numbers/) webpage. These numbers
//! are used to identify the meaning and corresponding data format for whoever is the receiver. GAP
//! assigned numbers are used within Extended Inquiry Response (EIR) and Advertising Data (AD).
//!
//! While data assigned a number is used in different places, the general format for the container
//! of the data is the same. One byte for length, one byte for the assigned number, and multiple
//! bytes for the data. There are two names for these containers, they are *EIR struct* and *AD
//! struct*.
//!
//! # Receiving Data
//! Data within a structure is sent by a remote device that is not under the control of this
//! device. Every type within this module that can be created from a structure implements
//! [`TryFromStruct`], and that conversion returns an [`Error`] when the structure is not correctly
//! formatted. Iterating over the structures with [`EirOrAdIterator::silent`] will end the iteration
//! at the first incorrectly sized structure instead of returning an error.

pub mod flags;
pub mod local_name;
pub mod manufacturer_data;
pub mod service_data;
pub mod service_uuids;
pub mod tx_power_level;

/// The size of the header for either an EIR or AD structure
///
/// The full size of either an EIR or AD structure is this plus the size of the data.
pub const HEADER_SIZE: usize = 2;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AssignedTypes {
    Flags,
    IncompleteListOf16bitServiceClassUUIDs,
    CompleteListOf16bitServiceClassUUIDs,
    IncompleteListOf32bitServiceClassUUIDs,
    CompleteListOf32bitServiceClassUUIDs,
    IncompleteListOf128bitServiceClassUUIDs,
    CompleteListOf128bitServiceClassUUIDs,
    ShortenedLocalName,
    CompleteLocalName,
    TxPowerLevel,
    ClassOfDevice,
    SlaveConnectionIntervalRange,
    ListOf16bitServiceSolicitationUUIDs,
    ListOf128bitServiceSolicitationUUIDs,
    ServiceData16BitUUID,
    PublicTargetAddress,
    RandomTargetAddress,
    Appearance,
    AdvertisingInterval,
    LEBluetoothDeviceAddress,
    LERole,
    ListOf32bitServiceSolicitationUUIDs,
    ServiceData32BitUUID,
    ServiceData128BitUUID,
    URI,
    LESupportedFeatures,
    ManufacturerSpecificData,
}

impl AssignedTypes {
    pub const fn val(&self) -> u8 {
        match *self {
            AssignedTypes::Flags => 0x01,
            AssignedTypes::IncompleteListOf16bitServiceClassUUIDs => 0x02,
            AssignedTypes::CompleteListOf16bitServiceClassUUIDs => 0x03,
            AssignedTypes::IncompleteListOf32bitServiceClassUUIDs => 0x04,
            AssignedTypes::CompleteListOf32bitServiceClassUUIDs => 0x05,
            AssignedTypes::IncompleteListOf128bitServiceClassUUIDs => 0x06,
            AssignedTypes::CompleteListOf128bitServiceClassUUIDs => 0x07,
            AssignedTypes::ShortenedLocalName => 0x08,
            AssignedTypes::CompleteLocalName => 0x09,
            AssignedTypes::TxPowerLevel => 0x0A,
            AssignedTypes::ClassOfDevice => 0x0D,
            AssignedTypes::SlaveConnectionIntervalRange => 0x12,
            AssignedTypes::ListOf16bitServiceSolicitationUUIDs => 0x14,
            AssignedTypes::ListOf128bitServiceSolicitationUUIDs => 0x15,
            AssignedTypes::ServiceData16BitUUID => 0x16,
            AssignedTypes::PublicTargetAddress => 0x17,
            AssignedTypes::RandomTargetAddress => 0x18,
            AssignedTypes::Appearance => 0x19,
            AssignedTypes::AdvertisingInterval => 0x1A,
            AssignedTypes::LEBluetoothDeviceAddress => 0x1B,
            AssignedTypes::LERole => 0x1C,
            AssignedTypes::ListOf32bitServiceSolicitationUUIDs => 0x1F,
            AssignedTypes::ServiceData32BitUUID => 0x20,
            AssignedTypes::ServiceData128BitUUID => 0x21,
            AssignedTypes::URI => 0x24,
            AssignedTypes::LESupportedFeatures => 0x27,
            AssignedTypes::ManufacturerSpecificData => 0xFF,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The assigned type within the structure is different from the expected type
    IncorrectAssignedType,
    /// The length byte contains an invalid value
    IncorrectLength,
    /// The buffer is too small for the structure
    RawTooSmall,
    /// Failed converting from an assumed UTF8 formatted bytes
    UTF8Error(core::str::Utf8Error),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Error::IncorrectAssignedType => write!(f, "Incorrect Assigned Type Field"),
            Error::IncorrectLength => write!(
                f,
                "The length of this type is larger than the remaining bytes in the packet"
            ),
            Error::RawTooSmall => write!(f, "Raw data length is too small"),
            Error::UTF8Error(ref utf8_err) => write!(
                f,
                "UTF-8 conversion error, valid up to {}: '{}'",
                utf8_err.valid_up_to(),
                utf8_err
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A trait for attempting to convert an Extended Inquiry Response (EIR) or Advertising Data (AD)
/// Structure to a local type
pub trait TryFromStruct<'a> {
    /// Attempt to convert an EIR or AD struct into this type
    fn try_from_struct(st: EirOrAdStruct<'a>) -> Result<Self, Error>
    where
        Self: Sized;
}

/// A wrapper around an EIR or AD structure
///
/// There is no functional difference between an EIR struct and an AD struct, but they are used
/// in different places within the Bluetooth specification. When used, these places have provided
/// an alias to this as either an EIR struct or an AD struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EirOrAdStruct<'a>(&'a [u8]);

impl<'a> EirOrAdStruct<'a> {
    /// Try to create a new `EirOrAdStruct`
    ///
    /// This will return a new `EirOrAdStruct` if the bytes starts with and contains a complete
    /// EIR or AD struct. A slice to the rest of `bytes` is returned with the new `EirOrAdStruct`.
    ///
    /// `None` is returned if the length in the structure is zero. This is used to indicate an
    /// early termination of the entire data sequence, so any bytes that come after it are to be
    /// ignored.
    ///
    /// # Errors
    /// The length field of the first structure extended past the end of `bytes`. An error also
    /// occurs if `bytes` is empty.
    pub fn try_new(bytes: &'a [u8]) -> Result<Option<(Self, &'a [u8])>, Error> {
        let len = *bytes.first().ok_or(Error::RawTooSmall)? as usize;

        match len {
            0 => Ok(None),
            len if len < bytes.len() => Ok(Some((Self(&bytes[..1 + len]), &bytes[1 + len..]))),
            _ => Err(Error::IncorrectLength),
        }
    }

    /// Return the type
    ///
    /// This returns the EIR or AD type.
    pub fn get_type(&self) -> u8 {
        self.0[1]
    }

    /// Get the data bytes
    pub fn get_data(&self) -> &'a [u8] {
        &self.0[HEADER_SIZE..]
    }

    /// Get the size of the structure
    ///
    /// This is the full size of the structure.
    ///
    /// ```
    /// # use bo_tie_gap::assigned::EirOrAdStruct;
    /// let eir = EirOrAdStruct::try_new(&[5,4,3,2,1,0]).unwrap().unwrap().0;
    ///
    /// assert_eq!(eir.size(), 2 + eir.get_data().len())
    /// ```
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Try to convert this struct into the type `T`
    pub fn try_into<T>(self) -> Result<T, Error>
    where
        T: TryFromStruct<'a>,
    {
        T::try_from_struct(self)
    }

    /// Convert into the inner struct data
    pub fn into_inner(self) -> &'a [u8] {
        self.0
    }
}

/// An iterator over EIR or AD structs
///
/// This is used to iterate over a contiguous series of either EIR or AD structures.
///
/// The iterator will stop if there is no more data or a length field is zero (which is used to
/// indicate an early termination).
#[derive(Clone, Copy, Debug)]
pub struct EirOrAdIterator<'a>(&'a [u8]);

impl<'a> EirOrAdIterator<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        EirOrAdIterator(data)
    }

    /// Create a iterator that doesn't report an error
    ///
    /// In general it is not the fault of the recipient when they receive incorrectly formatted EIR
    /// or AD structures, so instead of reporting an error this will just end the iteration.
    pub fn silent(self) -> Silent<'a> {
        Silent(self.0)
    }
}

impl<'a> From<&'a [u8]> for EirOrAdIterator<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl<'a> Iterator for EirOrAdIterator<'a> {
    type Item = Result<EirOrAdStruct<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .len()
            .ne(&0)
            .then(|| match EirOrAdStruct::try_new(self.0) {
                Ok(None) => {
                    self.0 = &[];
                    None
                }
                Ok(Some((ad, rest))) => {
                    self.0 = rest;
                    Some(Ok(ad))
                }
                Err(e) => {
                    self.0 = &[];
                    Some(Err(e))
                }
            })
            .flatten()
    }
}

/// The silent form of an [`EirOrAdIterator`]
///
/// This is returned by [`EirOrAdIterator::silent`].
#[derive(Clone, Copy, Debug)]
pub struct Silent<'a>(&'a [u8]);

impl<'a> Iterator for Silent<'a> {
    type Item = EirOrAdStruct<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match EirOrAdStruct::try_new(self.0) {
            Ok(Some((ad, rest))) => {
                self.0 = rest;
                Some(ad)
            }
            _ => {
                self.0 = &[];
                None
            }
        }
    }
}

impl core::iter::FusedIterator for Silent<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_struct() {
        let (st, rest) = EirOrAdStruct::try_new(&[3, 0x19, 0x41, 0x03, 0xFF]).unwrap().unwrap();

        assert_eq!(AssignedTypes::Appearance.val(), st.get_type());

        assert_eq!(&[0x41, 0x03], st.get_data());

        assert_eq!(4, st.size());

        assert_eq!(&[0xFF], rest);
    }

    #[test]
    fn type_only_struct_has_no_data() {
        let (st, rest) = EirOrAdStruct::try_new(&[1, 0x09]).unwrap().unwrap();

        assert_eq!(0x09, st.get_type());

        assert!(st.get_data().is_empty());

        assert!(rest.is_empty());
    }

    #[test]
    fn early_termination() {
        assert_eq!(Ok(None), EirOrAdStruct::try_new(&[0, 2, 1, 6]));

        let data = [2, 0x01, 0x06, 0, 2, 0x0A, 0x04];

        assert_eq!(1, EirOrAdIterator::new(&data).count());

        assert_eq!(1, EirOrAdIterator::new(&data).silent().count());
    }

    #[test]
    fn truncated_struct() {
        assert_eq!(Err(Error::RawTooSmall), EirOrAdStruct::try_new(&[]));

        assert_eq!(Err(Error::IncorrectLength), EirOrAdStruct::try_new(&[5, 0x09, b'a']));

        // a length byte alone cannot hold the type
        assert_eq!(Err(Error::IncorrectLength), EirOrAdStruct::try_new(&[1]));
    }

    #[test]
    fn iterator_reports_then_ends() {
        let data = [2, 0x01, 0x06, 9, 0x09, b'a'];

        let mut iter = EirOrAdIterator::new(&data);

        assert_eq!(0x01, iter.next().unwrap().unwrap().get_type());

        assert_eq!(Some(Err(Error::IncorrectLength)), iter.next());

        assert_eq!(None, iter.next());

        let types = EirOrAdIterator::new(&data)
            .silent()
            .map(|st| st.get_type())
            .collect::<Vec<_>>();

        assert_eq!(vec![0x01], types);
    }
}
