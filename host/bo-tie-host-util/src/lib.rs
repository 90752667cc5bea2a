//! Host items common between the host protocols
//!
//! Things that do not fit for a single protocol are put here. `host-util` is a base crate for the
//! other host crates within `host`. Generally things within this lib are re-exported by the crate
//! using them.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

/// Universally Unique Identifier
///
/// A UUID in Bluetooth has some differences from the UUID of
/// [RFC 4122](https://datatracker.ietf.org/doc/html/rfc4122). They are still unique identifiers,
/// but to reduce the load of having to transfer 128-bits for commonly used identifiers, the
/// specification has mapped two ranges for shortened UUIDs. These shortened UUIDs are sized at 16
/// and 32 bit. A shortened UUID can always be converted into a full sized UUID.
///
/// ```
/// # use bo_tie_host_util::Uuid;
/// let uuid_16 = Uuid::from(0x180Du16);
///
/// assert!(uuid_16.can_be_16_bit());
///
/// // The mapped region for shortened values does
/// // not begin a zero, so `123u128` cannot be a
/// // 16 bit sized UUID.
/// let uuid_128 = Uuid::from(123u128);
///
/// assert!(!uuid_128.can_be_16_bit());
/// ```
///
/// ## Over the air
/// Within advertising data every UUID is transferred in little endian order, so the wire form of
/// a 16 bit UUID is two bytes, a 32 bit UUID is four bytes, and a full UUID is sixteen bytes. Use
/// [`from_le_slice`](Uuid::from_le_slice) to create a `Uuid` from any of these three forms.
///
/// ## Conversion
/// A UUID can be converted to a [uuid::Uuid](https://github.com/uuid-rs/uuid) if the feature
/// `uuid-crate` is enabled.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uuid {
    base_uuid: u128,
}

impl Uuid {
    /// See Vol 3 part B sec 2.5.1 for where this value comes from.
    /// This can also be found as the Bluetooth Base UUID in the assigned numbers document.
    const BLUETOOTH_BASE_UUID: u128 = 0x0000000000001000800000805F9B34FB;

    pub const fn from_u32(v: u32) -> Self {
        Uuid {
            // See Vol 3 part B sec 2.5.1 for this equation
            base_uuid: ((v as u128) << 96) | Self::BLUETOOTH_BASE_UUID,
        }
    }

    pub const fn from_u16(v: u16) -> Self {
        Uuid::from_u32(v as u32)
    }

    pub const fn from_u128(v: u128) -> Self {
        Uuid { base_uuid: v }
    }

    /// Create a UUID from its little endian wire form
    ///
    /// The length of `bytes` determines the kind of UUID, it must be 2, 4, or 16 bytes long.
    /// `None` is returned for any other length.
    ///
    /// ```
    /// # use bo_tie_host_util::Uuid;
    /// assert_eq!(Some(Uuid::from_u16(0x180F)), Uuid::from_le_slice(&[0x0F, 0x18]));
    ///
    /// assert_eq!(None, Uuid::from_le_slice(&[0x0F, 0x18, 0x00]));
    /// ```
    pub fn from_le_slice(bytes: &[u8]) -> Option<Self> {
        match bytes.len() {
            2 => <[u8; 2]>::try_from(bytes).ok().map(|b| Uuid::from_u16(u16::from_le_bytes(b))),
            4 => <[u8; 4]>::try_from(bytes).ok().map(|b| Uuid::from_u32(u32::from_le_bytes(b))),
            16 => <[u8; 16]>::try_from(bytes).ok().map(Uuid::from),
            _ => None,
        }
    }

    /// Returns true if the UUID can be a 16 bit shortened UUID
    pub fn can_be_16_bit(&self) -> bool {
        !((!0u16 as u128) << 96) & self.base_uuid == Uuid::BLUETOOTH_BASE_UUID
    }

    /// Returns true if the UUID can be a 32 bit shortened UUID
    pub fn can_be_32_bit(&self) -> bool {
        !(((!0u32) as u128) << 96) & self.base_uuid == Uuid::BLUETOOTH_BASE_UUID
    }

    /// Display format for UUID
    ///
    /// The display format for a UUID changes based on whether or not it is a 16 bit or 32 bit
    /// shortened UUID.
    fn display_type<F1, F2, F3>(
        &self,
        f: &mut core::fmt::Formatter,
        fn_16: F1,
        fn_32: F2,
        fn_128: F3,
    ) -> core::fmt::Result
    where
        F1: FnOnce(&u16, &mut core::fmt::Formatter) -> core::fmt::Result,
        F2: FnOnce(&u32, &mut core::fmt::Formatter) -> core::fmt::Result,
        F3: FnOnce(&u128, &mut core::fmt::Formatter) -> core::fmt::Result,
    {
        if let Ok(val) = <u16>::try_from(*self) {
            fn_16(&val, f)?;

            write!(f, " (16b)")
        } else if let Ok(val) = <u32>::try_from(*self) {
            fn_32(&val, f)?;

            write!(f, " (32b)")
        } else {
            fn_128(&self.base_uuid, f)?;

            write!(f, " (128b)")
        }
    }
}

/// Display a UUID in its canonical 8-4-4-4-12 hyphenated form
impl core::fmt::Display for Uuid {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let v = self.base_uuid;

        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (v >> 96) as u32,
            (v >> 80) as u16,
            (v >> 64) as u16,
            (v >> 48) as u16,
            v & 0xFFFF_FFFF_FFFF
        )
    }
}

impl core::fmt::Debug for Uuid {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::LowerHex::fmt(self, f)
    }
}

impl core::fmt::LowerHex for Uuid {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.display_type(
            f,
            |v, f| core::fmt::LowerHex::fmt(v, f),
            |v, f| core::fmt::LowerHex::fmt(v, f),
            |v, f| core::fmt::LowerHex::fmt(v, f),
        )
    }
}

impl core::fmt::UpperHex for Uuid {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.display_type(
            f,
            |v, f| core::fmt::UpperHex::fmt(v, f),
            |v, f| core::fmt::UpperHex::fmt(v, f),
            |v, f| core::fmt::UpperHex::fmt(v, f),
        )
    }
}

impl From<u128> for Uuid {
    fn from(v: u128) -> Uuid {
        Self::from_u128(v)
    }
}

impl From<u32> for Uuid {
    fn from(v: u32) -> Uuid {
        Self::from_u32(v)
    }
}

impl From<u16> for Uuid {
    fn from(v: u16) -> Uuid {
        Self::from_u16(v)
    }
}

/// Create a UUID from a *little endian* ordered array
impl From<[u8; 16]> for Uuid {
    fn from(v: [u8; 16]) -> Uuid {
        Self::from_u128(<u128>::from_le_bytes(v))
    }
}

#[cfg(feature = "uuid-crate")]
impl From<uuid::Uuid> for Uuid {
    fn from(uuid: uuid::Uuid) -> Uuid {
        <u128>::from_be_bytes(*uuid.as_bytes()).into()
    }
}

#[cfg(feature = "uuid-crate")]
impl From<Uuid> for uuid::Uuid {
    fn from(uuid: Uuid) -> uuid::Uuid {
        uuid::Uuid::from_bytes(uuid.base_uuid.to_be_bytes())
    }
}

impl From<Uuid> for u128 {
    fn from(uuid: Uuid) -> u128 {
        uuid.base_uuid
    }
}

impl TryFrom<Uuid> for u32 {
    type Error = ();

    /// Try to convert a UUID into its 32 bit shortened form. This doesn't check that the value is
    /// pre-allocated (a.k.a. assigned number) from the Bluetooth SIG.
    fn try_from(uuid: Uuid) -> Result<u32, ()> {
        if uuid.can_be_32_bit() {
            Ok((uuid.base_uuid >> 96) as u32)
        } else {
            Err(())
        }
    }
}

impl TryFrom<Uuid> for u16 {
    type Error = ();

    /// Try to convert a UUID into its 16 bit shortened form. This doesn't check that the value is
    /// pre-allocated (a.k.a. assigned number) from the Bluetooth SIG.
    fn try_from(uuid: Uuid) -> Result<u16, ()> {
        if uuid.can_be_16_bit() {
            Ok((uuid.base_uuid >> 96) as u16)
        } else {
            Err(())
        }
    }
}
