//! Items for the LE portion of the Host Controller Interface

/// Connectable and scannable undirected advertising (`ADV_IND`)
pub const ADV_IND: u8 = 0x00;

/// Connectable directed advertising (`ADV_DIRECT_IND`)
pub const ADV_DIRECT_IND: u8 = 0x01;

/// Scannable undirected advertising (`ADV_SCAN_IND`)
pub const ADV_SCAN_IND: u8 = 0x02;

/// Non connectable undirected advertising (`ADV_NONCONN_IND`)
pub const ADV_NONCONN_IND: u8 = 0x03;

/// Scan response (`SCAN_RSP`)
pub const SCAN_RSP: u8 = 0x04;

/// The raw value was not one of the values defined for the type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRawValue {
    kind: &'static str,
    raw: u8,
}

impl InvalidRawValue {
    /// Get the invalid raw value
    pub fn raw(&self) -> u8 {
        self.raw
    }
}

impl core::fmt::Display for InvalidRawValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown {} value: {:#04x}", self.kind, self.raw)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidRawValue {}

/// The address type of a remote device
///
/// The identity address types are only reported by the Controller when address resolution is
/// enabled and the Controller resolved a resolvable private address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressType {
    PublicDeviceAddress,
    RandomDeviceAddress,
    PublicIdentityAddress,
    RandomIdentityAddress,
}

impl AddressType {
    /// Try to create an `AddressType` from a raw u8 value
    ///
    /// # Error
    /// Input `raw` is not a valid identifier for an address type
    pub fn try_from_raw(raw: u8) -> Result<Self, InvalidRawValue> {
        match raw {
            0x00 => Ok(AddressType::PublicDeviceAddress),
            0x01 => Ok(AddressType::RandomDeviceAddress),
            0x02 => Ok(AddressType::PublicIdentityAddress),
            0x03 => Ok(AddressType::RandomIdentityAddress),
            _ => Err(InvalidRawValue {
                kind: "address type",
                raw,
            }),
        }
    }

    /// Get the raw value
    ///
    /// This is the value that is used to represent a `AddressType` within a HCI packet.
    pub fn get_raw_val(&self) -> u8 {
        match *self {
            AddressType::PublicDeviceAddress => 0x0,
            AddressType::RandomDeviceAddress => 0x1,
            AddressType::PublicIdentityAddress => 0x2,
            AddressType::RandomIdentityAddress => 0x3,
        }
    }
}

/// The kind of advertising event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LeAdvEventType {
    ConnectableAndScannableUndirectedAdvertising,
    ConnectableDirectedAdvertising,
    ScannableUndirectedAdvertising,
    NonConnectableUndirectedAdvertising,
    ScanResponse,
}

impl LeAdvEventType {
    /// Try to create a `LeAdvEventType` from the raw event type of an advertising report
    pub fn try_from_raw(raw: u8) -> Result<Self, InvalidRawValue> {
        match raw {
            ADV_IND => Ok(LeAdvEventType::ConnectableAndScannableUndirectedAdvertising),
            ADV_DIRECT_IND => Ok(LeAdvEventType::ConnectableDirectedAdvertising),
            ADV_SCAN_IND => Ok(LeAdvEventType::ScannableUndirectedAdvertising),
            ADV_NONCONN_IND => Ok(LeAdvEventType::NonConnectableUndirectedAdvertising),
            SCAN_RSP => Ok(LeAdvEventType::ScanResponse),
            _ => Err(InvalidRawValue {
                kind: "advertising event type",
                raw,
            }),
        }
    }

    pub fn raw(&self) -> u8 {
        match *self {
            LeAdvEventType::ConnectableAndScannableUndirectedAdvertising => ADV_IND,
            LeAdvEventType::ConnectableDirectedAdvertising => ADV_DIRECT_IND,
            LeAdvEventType::ScannableUndirectedAdvertising => ADV_SCAN_IND,
            LeAdvEventType::NonConnectableUndirectedAdvertising => ADV_NONCONN_IND,
            LeAdvEventType::ScanResponse => SCAN_RSP,
        }
    }

    /// Check if the advertiser accepts connections
    pub fn is_connectable(&self) -> bool {
        matches!(
            self,
            LeAdvEventType::ConnectableAndScannableUndirectedAdvertising
                | LeAdvEventType::ConnectableDirectedAdvertising
        )
    }

    /// Check if the advertiser accepts scan requests
    pub fn is_scannable(&self) -> bool {
        matches!(
            self,
            LeAdvEventType::ConnectableAndScannableUndirectedAdvertising
                | LeAdvEventType::ScannableUndirectedAdvertising
        )
    }

    pub fn is_scan_response(&self) -> bool {
        *self == LeAdvEventType::ScanResponse
    }
}

impl TryFrom<u8> for LeAdvEventType {
    type Error = InvalidRawValue;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::try_from_raw(raw)
    }
}

impl From<LeAdvEventType> for u8 {
    fn from(event_type: LeAdvEventType) -> Self {
        event_type.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_raw_values() {
        for raw in 0..=SCAN_RSP {
            assert_eq!(raw, LeAdvEventType::try_from_raw(raw).unwrap().raw());
        }

        let err = LeAdvEventType::try_from_raw(0x05).unwrap_err();

        assert_eq!(0x05, err.raw());

        assert_eq!("unknown advertising event type value: 0x05", err.to_string());
    }

    #[test]
    fn connectable_event_types() {
        let connectable = (0..=SCAN_RSP)
            .filter(|raw| LeAdvEventType::try_from_raw(*raw).unwrap().is_connectable())
            .collect::<Vec<_>>();

        assert_eq!(vec![ADV_IND, ADV_DIRECT_IND], connectable);

        assert!(LeAdvEventType::ScanResponse.is_scan_response());

        assert!(LeAdvEventType::ScannableUndirectedAdvertising.is_scannable());

        assert!(!LeAdvEventType::ConnectableDirectedAdvertising.is_scannable());
    }

    #[test]
    fn address_types() {
        assert_eq!(Ok(AddressType::RandomDeviceAddress), AddressType::try_from_raw(1));

        assert_eq!(3, AddressType::try_from_raw(3).unwrap().get_raw_val());

        assert!(AddressType::try_from_raw(4).is_err());
    }
}
