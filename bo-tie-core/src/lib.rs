//! Core items shared by the `bo-tie` crates
//!
//! Things that are used by both the HCI crates and the host crates live here so that neither has
//! to depend on the other for them.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

use core::fmt;

/// A Bluetooth Device Address
///
/// This is the 48 bit address of a Bluetooth device *as it is transferred over the wire*. Within
/// HCI packets (and over the air) the address is sent least significant byte first, so the first
/// byte of a `BluetoothDeviceAddress` is the last byte of the address as it is usually written by
/// people.
///
/// The `Display` implementation (and [`reversed`]) produce the conventional most significant byte
/// first order.
///
/// ```
/// # use bo_tie_core::BluetoothDeviceAddress;
/// let address = BluetoothDeviceAddress::from([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
///
/// assert_eq!("06:05:04:03:02:01", address.to_string());
/// ```
///
/// [`reversed`]: BluetoothDeviceAddress::reversed
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BluetoothDeviceAddress([u8; 6]);

impl BluetoothDeviceAddress {
    /// The number of bytes of an address
    pub const LEN: usize = 6;

    /// Create an address of all zeros
    pub const fn zeroed() -> Self {
        BluetoothDeviceAddress([0; 6])
    }

    /// Create an address from bytes in the order they appear on the wire
    pub const fn from_wire(bytes: [u8; 6]) -> Self {
        BluetoothDeviceAddress(bytes)
    }

    /// Try to create an address from a slice in the wire order
    ///
    /// `None` is returned if `bytes` does not have a length of six.
    pub fn try_from_wire_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; 6]>::try_from(bytes).ok().map(BluetoothDeviceAddress)
    }

    /// Get the address bytes in wire (least significant byte first) order
    pub fn wire(&self) -> [u8; 6] {
        self.0
    }

    /// Get the address bytes in the conventional (most significant byte first) order
    pub fn reversed(&self) -> [u8; 6] {
        let [b0, b1, b2, b3, b4, b5] = self.0;

        [b5, b4, b3, b2, b1, b0]
    }
}

impl From<[u8; 6]> for BluetoothDeviceAddress {
    fn from(wire: [u8; 6]) -> Self {
        BluetoothDeviceAddress(wire)
    }
}

impl From<BluetoothDeviceAddress> for [u8; 6] {
    fn from(address: BluetoothDeviceAddress) -> Self {
        address.0
    }
}

impl core::ops::Deref for BluetoothDeviceAddress {
    type Target = [u8; 6];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl core::ops::DerefMut for BluetoothDeviceAddress {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for BluetoothDeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [b0, b1, b2, b3, b4, b5] = self.reversed();

        write!(f, "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}", b0, b1, b2, b3, b4, b5)
    }
}

impl fmt::Debug for BluetoothDeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BluetoothDeviceAddress({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn display_is_most_significant_first() {
        let address = BluetoothDeviceAddress::from([0xab, 0x02, 0x03, 0x04, 0x05, 0xf6]);

        assert_eq!("F6:05:04:03:02:AB", address.to_string());
    }

    #[test]
    fn wire_slice_length() {
        assert!(BluetoothDeviceAddress::try_from_wire_slice(&[1, 2, 3, 4, 5]).is_none());

        assert!(BluetoothDeviceAddress::try_from_wire_slice(&[1, 2, 3, 4, 5, 6, 7]).is_none());

        assert_eq!(
            Some(BluetoothDeviceAddress::from_wire([1, 2, 3, 4, 5, 6])),
            BluetoothDeviceAddress::try_from_wire_slice(&[1, 2, 3, 4, 5, 6])
        );
    }

    #[quickcheck]
    fn reversed_is_wire_backwards(wire: (u8, u8, u8, u8, u8, u8)) -> bool {
        let (b0, b1, b2, b3, b4, b5) = wire;

        let address = BluetoothDeviceAddress::from_wire([b0, b1, b2, b3, b4, b5]);

        address.reversed() == [b5, b4, b3, b2, b1, b0] && address.wire() == [b0, b1, b2, b3, b4, b5]
    }
}
