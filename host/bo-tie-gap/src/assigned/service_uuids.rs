//! Advertising Data: Service Class UUID and Service Solicitation UUID Data Types
//!
//! The struct [`Services`] is the data type for the list of service class UUIDs and
//! [`SolicitedServices`] is the data type for the list of service solicitation UUIDs. Both are
//! implemented for the three sizes of UUIDs (16, 32, and 128 bit).
//!
//! The UUIDs are kept in the order they were within the structure.

use super::*;
use alloc::vec::Vec;
pub use bo_tie_host_util::Uuid;

/// Internal trait for the size of a UUID within a structure
pub trait UuidSize: Copy + Into<Uuid> {
    /// The number of bytes of this UUID within a structure
    const SIZE: usize;

    #[doc(hidden)]
    fn from_le(raw: &[u8]) -> Self;
}

/// Internal trait for specifying the Data Type Value
///
/// For service class UUIDs there is a complete and an incomplete list version for each UUID type
/// (16, 32, 128 bit). There is only one version for service solicitation.
trait DataType {
    const INCOMPLETE: AssignedTypes;
    const COMPLETE: AssignedTypes;
    const SOLICITATION: AssignedTypes;
}

macro_rules! impl_uuid_size {
    ( $ty:ty, $incomplete:ident, $complete:ident, $solicitation:ident ) => {
        impl UuidSize for $ty {
            const SIZE: usize = core::mem::size_of::<$ty>();

            fn from_le(raw: &[u8]) -> Self {
                let mut buffer = [0u8; core::mem::size_of::<$ty>()];

                buffer.copy_from_slice(raw);

                <$ty>::from_le_bytes(buffer)
            }
        }

        impl DataType for $ty {
            const INCOMPLETE: AssignedTypes = AssignedTypes::$incomplete;
            const COMPLETE: AssignedTypes = AssignedTypes::$complete;
            const SOLICITATION: AssignedTypes = AssignedTypes::$solicitation;
        }
    };
}

impl_uuid_size!(
    u16,
    IncompleteListOf16bitServiceClassUUIDs,
    CompleteListOf16bitServiceClassUUIDs,
    ListOf16bitServiceSolicitationUUIDs
);

impl_uuid_size!(
    u32,
    IncompleteListOf32bitServiceClassUUIDs,
    CompleteListOf32bitServiceClassUUIDs,
    ListOf32bitServiceSolicitationUUIDs
);

impl_uuid_size!(
    u128,
    IncompleteListOf128bitServiceClassUUIDs,
    CompleteListOf128bitServiceClassUUIDs,
    ListOf128bitServiceSolicitationUUIDs
);

/// Iterate over every complete UUID within `data`
///
/// Bytes at the end of `data` that are not enough for a UUID are ignored.
fn uuids_of<'a, T: UuidSize + 'a>(data: &'a [u8]) -> impl Iterator<Item = T> + 'a {
    data.chunks_exact(T::SIZE).map(T::from_le)
}

/// Check that `data` is made up of only whole UUIDs and collect them
fn strict_uuids_of<T: UuidSize>(data: &[u8]) -> Result<Vec<T>, Error> {
    if data.len() % T::SIZE == 0 {
        Ok(uuids_of(data).collect())
    } else {
        Err(Error::IncorrectLength)
    }
}

/// Service UUIDs
///
/// This is a list of service class UUIDs with sizes of u16, u32, or u128. `Services` can either be
/// a complete or incomplete list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Services<T> {
    uuids: Vec<T>,
    complete: bool,
}

impl<T> Services<T> {
    /// True if the list is a complete list of service UUIDs
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Iterate over the UUIDs as [`Uuid`]s
    pub fn iter_uuid(&self) -> impl Iterator<Item = Uuid> + '_
    where
        T: UuidSize,
    {
        self.uuids.iter().map(|v| (*v).into())
    }
}

impl<T> core::ops::Deref for Services<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.uuids
    }
}

impl<T> IntoIterator for Services<T> {
    type Item = T;
    type IntoIter = alloc::vec::IntoIter<T>;

    /// Useful for iterating over the contained UUIDs, but after this is done you obviously
    /// cannot tell if the list is complete or not.
    fn into_iter(self) -> Self::IntoIter {
        self.uuids.into_iter()
    }
}

/// Service Solicitation UUIDs
///
/// A list of the services an advertiser would like a central to provide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolicitedServices<T> {
    uuids: Vec<T>,
}

impl<T> SolicitedServices<T> {
    /// Iterate over the UUIDs as [`Uuid`]s
    pub fn iter_uuid(&self) -> impl Iterator<Item = Uuid> + '_
    where
        T: UuidSize,
    {
        self.uuids.iter().map(|v| (*v).into())
    }
}

impl<T> core::ops::Deref for SolicitedServices<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.uuids
    }
}

impl<T> IntoIterator for SolicitedServices<T> {
    type Item = T;
    type IntoIter = alloc::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.uuids.into_iter()
    }
}

macro_rules! impl_try_from_struct {
    ( $ty:ty ) => {
        impl TryFromStruct<'_> for Services<$ty> {
            fn try_from_struct(st: EirOrAdStruct<'_>) -> Result<Self, Error>
            where
                Self: Sized,
            {
                let complete = if st.get_type() == <$ty as DataType>::COMPLETE.val() {
                    true
                } else if st.get_type() == <$ty as DataType>::INCOMPLETE.val() {
                    false
                } else {
                    return Err(Error::IncorrectAssignedType);
                };

                let uuids = strict_uuids_of::<$ty>(st.get_data())?;

                Ok(Services { uuids, complete })
            }
        }

        impl TryFromStruct<'_> for SolicitedServices<$ty> {
            fn try_from_struct(st: EirOrAdStruct<'_>) -> Result<Self, Error>
            where
                Self: Sized,
            {
                if st.get_type() != <$ty as DataType>::SOLICITATION.val() {
                    return Err(Error::IncorrectAssignedType);
                }

                let uuids = strict_uuids_of::<$ty>(st.get_data())?;

                Ok(SolicitedServices { uuids })
            }
        }
    };
}

impl_try_from_struct!(u16);
impl_try_from_struct!(u32);
impl_try_from_struct!(u128);

/// Extend `out` by the UUIDs of a service class UUID list structure
///
/// Nothing is added if `st` is not one of the six service class UUID list structures. Any
/// trailing bytes too few for a UUID are ignored.
pub(crate) fn extend_by_services(st: EirOrAdStruct<'_>, out: &mut Vec<Uuid>) {
    const C16: u8 = <u16 as DataType>::COMPLETE.val();
    const I16: u8 = <u16 as DataType>::INCOMPLETE.val();
    const C32: u8 = <u32 as DataType>::COMPLETE.val();
    const I32: u8 = <u32 as DataType>::INCOMPLETE.val();
    const C128: u8 = <u128 as DataType>::COMPLETE.val();
    const I128: u8 = <u128 as DataType>::INCOMPLETE.val();

    let data = st.get_data();

    match st.get_type() {
        C16 | I16 => out.extend(uuids_of::<u16>(data).map(Uuid::from)),
        C32 | I32 => out.extend(uuids_of::<u32>(data).map(Uuid::from)),
        C128 | I128 => out.extend(uuids_of::<u128>(data).map(Uuid::from)),
        _ => (),
    }
}

/// Extend `out` by the UUIDs of a service solicitation structure
///
/// Nothing is added if `st` is not one of the three service solicitation structures. Any trailing
/// bytes too few for a UUID are ignored.
pub(crate) fn extend_by_solicited(st: EirOrAdStruct<'_>, out: &mut Vec<Uuid>) {
    const S16: u8 = <u16 as DataType>::SOLICITATION.val();
    const S32: u8 = <u32 as DataType>::SOLICITATION.val();
    const S128: u8 = <u128 as DataType>::SOLICITATION.val();

    let data = st.get_data();

    match st.get_type() {
        S16 => out.extend(uuids_of::<u16>(data).map(Uuid::from)),
        S32 => out.extend(uuids_of::<u32>(data).map(Uuid::from)),
        S128 => out.extend(uuids_of::<u128>(data).map(Uuid::from)),
        _ => (),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adv_service_uuid_test() {
        let test_16 = 12357u16;
        let test_32 = 123456789u32;
        let test_128 = 1372186947123894612389889949u128;

        let mut raw_u16 = vec![5, AssignedTypes::CompleteListOf16bitServiceClassUUIDs.val()];
        raw_u16.extend_from_slice(&test_16.to_le_bytes());
        raw_u16.extend_from_slice(&0x180Fu16.to_le_bytes());

        let mut raw_u32 = vec![5, AssignedTypes::IncompleteListOf32bitServiceClassUUIDs.val()];
        raw_u32.extend_from_slice(&test_32.to_le_bytes());

        let mut raw_u128 = vec![17, AssignedTypes::CompleteListOf128bitServiceClassUUIDs.val()];
        raw_u128.extend_from_slice(&test_128.to_le_bytes());

        let st_16 = EirOrAdStruct::try_new(&raw_u16).unwrap().unwrap().0;
        let st_32 = EirOrAdStruct::try_new(&raw_u32).unwrap().unwrap().0;
        let st_128 = EirOrAdStruct::try_new(&raw_u128).unwrap().unwrap().0;

        let rslt_16 = Services::<u16>::try_from_struct(st_16).unwrap();
        let rslt_32 = Services::<u32>::try_from_struct(st_32).unwrap();
        let rslt_128 = Services::<u128>::try_from_struct(st_128).unwrap();

        assert!(rslt_16.is_complete());
        assert_eq!(&[test_16, 0x180F], &*rslt_16);

        assert!(!rslt_32.is_complete());
        assert_eq!(&[test_32], &*rslt_32);

        assert_eq!(vec![Uuid::from_u128(test_128)], rslt_128.iter_uuid().collect::<Vec<_>>());

        assert_eq!(
            Err(Error::IncorrectAssignedType),
            Services::<u32>::try_from_struct(st_16)
        );
    }

    #[test]
    fn order_is_kept() {
        let raw = [7, 0x03, 0x0F, 0x18, 0x0A, 0x18, 0x0D, 0x18];

        let st = EirOrAdStruct::try_new(&raw).unwrap().unwrap().0;

        let services = Services::<u16>::try_from_struct(st).unwrap();

        assert_eq!(&[0x180F, 0x180A, 0x180D], &*services);
    }

    #[test]
    fn partial_uuid() {
        let raw = [4, 0x03, 0x0F, 0x18, 0x0A];

        let st = EirOrAdStruct::try_new(&raw).unwrap().unwrap().0;

        assert_eq!(Err(Error::IncorrectLength), Services::<u16>::try_from_struct(st));

        let mut lenient = Vec::new();

        extend_by_services(st, &mut lenient);

        assert_eq!(vec![Uuid::from_u16(0x180F)], lenient);
    }

    #[test]
    fn whole_uuids_of_each_size() {
        let raw = [0x0F, 0x18, 0x0A, 0x18, 0x0D];

        assert_eq!(vec![0x180Fu16, 0x180A], uuids_of::<u16>(&raw).collect::<Vec<_>>());

        assert_eq!(vec![0x180A_180Fu32], uuids_of::<u32>(&raw).collect::<Vec<_>>());

        assert_eq!(0, uuids_of::<u128>(&raw).count());

        assert_eq!(Err(Error::IncorrectLength), strict_uuids_of::<u16>(&raw));

        assert_eq!(Ok(vec![0x180Fu16, 0x180A]), strict_uuids_of::<u16>(&raw[..4]));
    }

    #[test]
    fn solicitation() {
        let raw = [3, 0x14, 0x12, 0x18];

        let st = EirOrAdStruct::try_new(&raw).unwrap().unwrap().0;

        let solicited = SolicitedServices::<u16>::try_from_struct(st).unwrap();

        assert_eq!(&[0x1812], &*solicited);

        let mut services = Vec::new();

        extend_by_services(st, &mut services);

        assert!(services.is_empty());

        let mut solicited = Vec::new();

        extend_by_solicited(st, &mut solicited);

        assert_eq!(vec![Uuid::from_u16(0x1812)], solicited);
    }
}
