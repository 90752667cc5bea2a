//! Advertising Data: Manufacturer Specific Data
use super::*;

/// Manufacturer Specific Data
///
/// The first two bytes of the data are the company identifier (little endian) assigned by the
/// Bluetooth SIG. The rest is defined by the manufacturer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManufacturerData<'a>(&'a [u8]);

impl<'a> ManufacturerData<'a> {
    const ASSIGNED_TYPE: AssignedTypes = AssignedTypes::ManufacturerSpecificData;

    /// Get all the data bytes, including the company identifier
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Get the company identifier
    ///
    /// `None` is returned if the data is too short to contain a company identifier.
    pub fn company_id(&self) -> Option<u16> {
        match self.0 {
            [lo, hi, ..] => Some(u16::from_le_bytes([*lo, *hi])),
            _ => None,
        }
    }

    /// Get the bytes after the company identifier
    pub fn payload(&self) -> &'a [u8] {
        self.0.get(2..).unwrap_or_default()
    }
}

impl<'a> TryFromStruct<'a> for ManufacturerData<'a> {
    fn try_from_struct(st: EirOrAdStruct<'a>) -> Result<Self, Error>
    where
        Self: Sized,
    {
        if st.get_type() == Self::ASSIGNED_TYPE.val() {
            Ok(ManufacturerData(st.get_data()))
        } else {
            Err(Error::IncorrectAssignedType)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_and_payload() {
        let st = EirOrAdStruct::try_new(&[5, 0xFF, 0x4C, 0x00, 0x02, 0x15]).unwrap().unwrap().0;

        let data = ManufacturerData::try_from_struct(st).unwrap();

        assert_eq!(Some(0x004C), data.company_id());

        assert_eq!(&[0x02, 0x15], data.payload());

        assert_eq!(&[0x4C, 0x00, 0x02, 0x15], data.as_bytes());
    }

    #[test]
    fn too_short_for_company() {
        let st = EirOrAdStruct::try_new(&[2, 0xFF, 0x4C]).unwrap().unwrap().0;

        let data = ManufacturerData::try_from_struct(st).unwrap();

        assert_eq!(None, data.company_id());

        assert!(data.payload().is_empty());
    }
}
