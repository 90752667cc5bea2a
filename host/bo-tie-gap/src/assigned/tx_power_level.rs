//! Advertising Data: Tx Power Level
use super::*;

/// The transmit power level of the advertiser
///
/// This is the power level in dBm that the advertiser used to send the packet. The Core
/// Specification Supplement gives the range of -127 to +127 dBm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TxPowerLevel(i8);

impl TxPowerLevel {
    const ASSIGNED_TYPE: AssignedTypes = AssignedTypes::TxPowerLevel;

    /// Get the power level in dBm
    pub fn get(&self) -> i8 {
        self.0
    }
}

impl From<TxPowerLevel> for i8 {
    fn from(level: TxPowerLevel) -> i8 {
        level.0
    }
}

impl TryFromStruct<'_> for TxPowerLevel {
    fn try_from_struct(st: EirOrAdStruct<'_>) -> Result<Self, Error>
    where
        Self: Sized,
    {
        if st.get_type() != Self::ASSIGNED_TYPE.val() {
            return Err(Error::IncorrectAssignedType);
        }

        match st.get_data() {
            [level] => Ok(TxPowerLevel(*level as i8)),
            _ => Err(Error::IncorrectLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_level() {
        let positive = EirOrAdStruct::try_new(&[2, 0x0A, 0x04]).unwrap().unwrap().0;

        let negative = EirOrAdStruct::try_new(&[2, 0x0A, 0xEC]).unwrap().unwrap().0;

        assert_eq!(4, TxPowerLevel::try_from_struct(positive).unwrap().get());

        assert_eq!(-20, TxPowerLevel::try_from_struct(negative).unwrap().get());
    }

    #[test]
    fn incorrect_length() {
        let empty = EirOrAdStruct::try_new(&[1, 0x0A]).unwrap().unwrap().0;

        let long = EirOrAdStruct::try_new(&[3, 0x0A, 0x04, 0x00]).unwrap().unwrap().0;

        assert_eq!(Err(Error::IncorrectLength), TxPowerLevel::try_from_struct(empty));

        assert_eq!(Err(Error::IncorrectLength), TxPowerLevel::try_from_struct(long));
    }
}
