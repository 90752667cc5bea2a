//! The address of an advertiser

use bo_tie_core::BluetoothDeviceAddress;
use core::fmt;

/// The address of a scanned device
///
/// The bytes are in the conventional order for displaying a Bluetooth address, the most
/// significant byte is first. This is the reverse of the order the address is sent over the air.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RemoteAddress {
    /// A public device address
    ///
    /// This is also used for the public identity address type.
    Public([u8; 6]),
    /// A random device address
    Random([u8; 6]),
}

impl RemoteAddress {
    /// The raw address type of a random device address
    const RANDOM_ADDRESS_TYPE: u8 = 0x01;

    /// Create a `RemoteAddress` from an address as it was within an advertising report
    ///
    /// The address is random if `address_type` is the random device address type, otherwise it
    /// is public.
    pub fn from_report(address: BluetoothDeviceAddress, address_type: u8) -> Self {
        let bytes = address.reversed();

        if address_type == Self::RANDOM_ADDRESS_TYPE {
            RemoteAddress::Random(bytes)
        } else {
            RemoteAddress::Public(bytes)
        }
    }

    /// Get the address bytes, most significant byte first
    pub fn bytes(&self) -> [u8; 6] {
        match self {
            RemoteAddress::Public(bytes) | RemoteAddress::Random(bytes) => *bytes,
        }
    }

    pub fn is_random(&self) -> bool {
        matches!(self, RemoteAddress::Random(_))
    }

    /// Convert into a `BluetoothDeviceAddress`
    ///
    /// The returned address is in the order used by the HCI (least significant byte first).
    pub fn to_device_address(&self) -> BluetoothDeviceAddress {
        let mut wire = self.bytes();

        wire.reverse();

        BluetoothDeviceAddress::from_wire(wire)
    }
}

impl fmt::Display for RemoteAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [b0, b1, b2, b3, b4, b5] = self.bytes();

        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b0, b1, b2, b3, b4, b5
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn random_address_from_report() {
        let wire = BluetoothDeviceAddress::from_wire([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);

        let address = RemoteAddress::from_report(wire, 1);

        assert_eq!(RemoteAddress::Random([0x06, 0x05, 0x04, 0x03, 0x02, 0x01]), address);

        assert!(address.is_random());

        assert_eq!("06:05:04:03:02:01", address.to_string());
    }

    #[test]
    fn public_address_types() {
        let wire = BluetoothDeviceAddress::from_wire([0xAB, 0xCD, 0xEF, 0x01, 0x23, 0x45]);

        for address_type in [0, 2, 3] {
            let address = RemoteAddress::from_report(wire, address_type);

            assert!(!address.is_random());

            assert_eq!([0x45, 0x23, 0x01, 0xEF, 0xCD, 0xAB], address.bytes());
        }
    }

    #[quickcheck]
    fn report_address_is_reversed(wire: Vec<u8>, address_type: u8) -> bool {
        let Some(wire) = BluetoothDeviceAddress::try_from_wire_slice(wire.get(..6).unwrap_or_default()) else {
            return true;
        };

        let address = RemoteAddress::from_report(wire, address_type);

        let mut expected = wire.wire();
        expected.reverse();

        address.bytes() == expected
            && address.is_random() == (address_type == 1)
            && address.to_device_address() == wire
    }
}
