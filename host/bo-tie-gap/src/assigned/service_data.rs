//! Advertising Data: Service Data
//!
//! Service data is a UUID paired with data for the service identified by that UUID. There is a
//! separate assigned type for each size of UUID (16, 32, and 128 bit), but all three are converted
//! into a [`ServiceData`] with a full sized [`Uuid`].

use super::*;
use bo_tie_host_util::Uuid;

/// Service Data
///
/// Contains a UUID along with the corresponding data for that UUID. When created from a structure
/// `Data` is a slice of the structure's data, use [`to_owned`](ServiceData::to_owned) to get a
/// `ServiceData` that does not borrow from the advertising data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceData<Data> {
    uuid: Uuid,
    data: Data,
}

impl<Data> ServiceData<Data> {
    pub fn new(uuid: Uuid, data: Data) -> Self {
        ServiceData { uuid, data }
    }

    pub fn get_uuid(&self) -> Uuid {
        self.uuid
    }

    /// Get the service data
    pub fn get_data(&self) -> &Data {
        &self.data
    }
}

impl ServiceData<&[u8]> {
    /// Copy the data into a `ServiceData` with an owned buffer
    pub fn to_owned(&self) -> ServiceData<alloc::vec::Vec<u8>> {
        ServiceData {
            uuid: self.uuid,
            data: self.data.to_vec(),
        }
    }
}

/// Get the number of bytes of the UUID for a service data assigned type
fn uuid_len(assigned_type: u8) -> Option<usize> {
    const S16: u8 = AssignedTypes::ServiceData16BitUUID.val();
    const S32: u8 = AssignedTypes::ServiceData32BitUUID.val();
    const S128: u8 = AssignedTypes::ServiceData128BitUUID.val();

    match assigned_type {
        S16 => Some(2),
        S32 => Some(4),
        S128 => Some(16),
        _ => None,
    }
}

impl<'a> TryFromStruct<'a> for ServiceData<&'a [u8]> {
    fn try_from_struct(st: EirOrAdStruct<'a>) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let uuid_len = uuid_len(st.get_type()).ok_or(Error::IncorrectAssignedType)?;

        let data = st.get_data();

        if data.len() < uuid_len {
            return Err(Error::IncorrectLength);
        }

        let (uuid_raw, service_data) = data.split_at(uuid_len);

        let uuid = Uuid::from_le_slice(uuid_raw).ok_or(Error::IncorrectLength)?;

        Ok(ServiceData {
            uuid,
            data: service_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_uuid_sizes() {
        let raw_16 = [5, 0x16, 0x0F, 0x18, 0x64, 0x01];
        let raw_32 = [6, 0x20, 0x04, 0x03, 0x02, 0x01, 0xAA];
        let mut raw_128 = vec![17, 0x21];
        raw_128.extend_from_slice(&0x1234u128.to_le_bytes());

        let sd_16 = ServiceData::try_from_struct(EirOrAdStruct::try_new(&raw_16).unwrap().unwrap().0).unwrap();
        let sd_32 = ServiceData::try_from_struct(EirOrAdStruct::try_new(&raw_32).unwrap().unwrap().0).unwrap();
        let sd_128 = ServiceData::try_from_struct(EirOrAdStruct::try_new(&raw_128).unwrap().unwrap().0).unwrap();

        assert_eq!(Uuid::from_u16(0x180F), sd_16.get_uuid());
        assert_eq!(&[0x64, 0x01], *sd_16.get_data());

        assert_eq!(Uuid::from_u32(0x01020304), sd_32.get_uuid());
        assert_eq!(&[0xAA], *sd_32.get_data());

        assert_eq!(Uuid::from_u128(0x1234), sd_128.get_uuid());
        assert!(sd_128.get_data().is_empty());

        assert_eq!(ServiceData::new(Uuid::from_u16(0x180F), vec![0x64, 0x01]), sd_16.to_owned());
    }

    #[test]
    fn shorter_than_uuid() {
        let raw = [2, 0x20, 0x04];

        let st = EirOrAdStruct::try_new(&raw).unwrap().unwrap().0;

        assert_eq!(Err(Error::IncorrectLength), ServiceData::try_from_struct(st));
    }
}
