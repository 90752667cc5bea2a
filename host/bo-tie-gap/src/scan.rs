//! Bluetooth LE scanning
//!
//! The advertising data received while scanning is a sequence of AD structures. When scanning is
//! active a scannable advertiser can also send a scan response, which is another sequence of AD
//! structures. [`AdvPacket`] treats the two as one stream and looks up the data types a scanner
//! is generally interested in.

use crate::assigned::{
    flags::Flags, local_name::LocalName, manufacturer_data::ManufacturerData, service_data::ServiceData,
    service_uuids, tx_power_level::TxPowerLevel, AssignedTypes, EirOrAdIterator, EirOrAdStruct, TryFromStruct,
};
use alloc::string::String;
use alloc::vec::Vec;
use bo_tie_host_util::Uuid;

/// An iterator over a scanned advertiser's data
///
/// This iterator can be used to iterate over the Advertising Data structures within a received
/// advertiser's data.
///
/// # Note
/// This is an alias of [`EirOrAdIterator`](crate::assigned::EirOrAdIterator).
pub type ScanIterator<'a> = crate::assigned::EirOrAdIterator<'a>;

/// Scanned AD Structure
///
/// # Note
/// This is an alias of [`EirOrAdStruct`](crate::assigned::EirOrAdStruct). It can be used in
/// place of the item type for [`ScanIterator`].
pub type ScannedAdStruct<'a> = crate::assigned::EirOrAdStruct<'a>;

/// A received advertising packet
///
/// This is the advertising data of an advertiser combined with the data of its scan response (if
/// there was one). The two are concatenated, so the AD structures of the scan response come after
/// the structures of the advertising data.
///
/// Nothing is decoded when an `AdvPacket` is created. Every lookup walks the structures until it
/// has what it needs. Walking stops at the first structure whose length is zero or runs past the
/// end of the data, so a malformed packet never causes an error; the data types after the
/// malformed structure are treated as absent.
///
/// ```
/// # use bo_tie_gap::scan::AdvPacket;
/// let advertising_data = [0x02, 0x01, 0x06, 0x05, 0x09, b'H', b'i', b'!', b'?'];
///
/// let packet = AdvPacket::new(&advertising_data, &[]);
///
/// assert_eq!(Some("Hi!?".to_string()), packet.local_name());
/// assert_eq!(None, packet.tx_power_level());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvPacket {
    raw: Vec<u8>,
}

impl AdvPacket {
    /// Create a new `AdvPacket`
    ///
    /// Either input may be empty.
    pub fn new(advertising_data: &[u8], scan_response_data: &[u8]) -> Self {
        let mut raw = Vec::with_capacity(advertising_data.len() + scan_response_data.len());

        raw.extend_from_slice(advertising_data);
        raw.extend_from_slice(scan_response_data);

        AdvPacket { raw }
    }

    /// Get the concatenated advertising data and scan response data
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Iterate over the AD structures
    ///
    /// Unlike the lookup methods this iterator reports a malformed structure. Use the `silent`
    /// method of the returned iterator to get the same behavior as the lookup methods.
    pub fn iter(&self) -> ScanIterator<'_> {
        EirOrAdIterator::new(&self.raw)
    }

    fn structs(&self) -> impl Iterator<Item = EirOrAdStruct<'_>> + '_ {
        self.iter().silent()
    }

    /// Find the first structure with the assigned type
    fn find(&self, assigned_type: AssignedTypes) -> Option<EirOrAdStruct<'_>> {
        let val = assigned_type.val();

        self.structs().find(|st| st.get_type() == val)
    }

    /// Get the local name
    ///
    /// The complete local name is returned if it is within the packet, otherwise the shortened
    /// local name is returned. `None` is returned if neither are in the packet.
    ///
    /// Invalid UTF-8 is replaced with `U+FFFD`, use [`local_name_struct`] for the raw bytes.
    ///
    /// [`local_name_struct`]: AdvPacket::local_name_struct
    pub fn local_name(&self) -> Option<String> {
        self.local_name_struct().map(|name| name.to_str_lossy().into_owned())
    }

    /// Get the local name structure
    ///
    /// This is the complete local name if it is within the packet, otherwise it is the shortened
    /// local name.
    pub fn local_name_struct(&self) -> Option<LocalName<'_>> {
        self.find(AssignedTypes::CompleteLocalName)
            .or_else(|| self.find(AssignedTypes::ShortenedLocalName))
            .and_then(|st| LocalName::try_from_struct(st).ok())
    }

    /// Get the manufacturer specific data
    ///
    /// The returned bytes start with the company identifier.
    pub fn manufacturer_data(&self) -> Option<&[u8]> {
        self.manufacturer_data_struct().map(|data| data.as_bytes())
    }

    /// Get the manufacturer specific data structure
    pub fn manufacturer_data_struct(&self) -> Option<ManufacturerData<'_>> {
        self.find(AssignedTypes::ManufacturerSpecificData)
            .and_then(|st| ManufacturerData::try_from_struct(st).ok())
    }

    /// Get the service class UUIDs
    ///
    /// This is every UUID within every list of service class UUIDs (16, 32, and 128 bit, complete
    /// or incomplete) in the order they are within the packet.
    pub fn services(&self) -> Vec<Uuid> {
        let mut uuids = Vec::new();

        self.structs()
            .for_each(|st| service_uuids::extend_by_services(st, &mut uuids));

        uuids
    }

    /// Get the service data
    ///
    /// Every service data structure (16, 32, and 128 bit UUIDs) in the order they are within the
    /// packet. A service data structure too short to contain its UUID is skipped.
    pub fn service_data(&self) -> Vec<ServiceData<&[u8]>> {
        self.structs()
            .filter_map(|st| ServiceData::try_from_struct(st).ok())
            .collect()
    }

    /// Get the Tx power level
    ///
    /// `None` is returned if the packet does not contain a correctly sized Tx power level.
    pub fn tx_power_level(&self) -> Option<i8> {
        self.find(AssignedTypes::TxPowerLevel)
            .and_then(|st| TxPowerLevel::try_from_struct(st).ok())
            .map(i8::from)
    }

    /// Get the service solicitation UUIDs
    ///
    /// This is every UUID within the service solicitation lists (16, 32, and 128 bit) in the order
    /// they are within the packet.
    pub fn solicited_services(&self) -> Vec<Uuid> {
        let mut uuids = Vec::new();

        self.structs()
            .for_each(|st| service_uuids::extend_by_solicited(st, &mut uuids));

        uuids
    }

    /// Get the flags
    pub fn flags(&self) -> Option<Flags> {
        self.find(AssignedTypes::Flags)
            .and_then(|st| Flags::try_from_struct(st).ok())
    }
}
