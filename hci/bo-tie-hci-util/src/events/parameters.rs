//! Event parameters
//!
//! The parameters of the LE Advertising Report event.

use super::Error;
use crate::le::{AddressType, InvalidRawValue, LeAdvEventType};
use alloc::vec::Vec;
use bo_tie_core::BluetoothDeviceAddress;

/// The maximum size of the advertising data of a legacy advertising report
pub const MAX_DATA_LEN: usize = 31;

/// The RSSI value that means the RSSI is unavailable
pub const RSSI_UNAVAILABLE: i8 = 127;

/// Event type, address type, and address
const REPORT_HEADER_SIZE: usize = 2 + BluetoothDeviceAddress::LEN;

/// Location of a report within the parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReportLocation {
    /// index of the event type
    start: usize,
    data_len: usize,
}

impl ReportLocation {
    fn event_type(&self) -> usize {
        self.start
    }

    fn address_type(&self) -> usize {
        self.start + 1
    }

    fn address(&self) -> core::ops::Range<usize> {
        self.start + 2..self.start + REPORT_HEADER_SIZE
    }

    fn data(&self) -> core::ops::Range<usize> {
        let data_start = self.start + REPORT_HEADER_SIZE + 1;

        data_start..data_start + self.data_len
    }

    fn rssi(&self) -> usize {
        self.data().end
    }
}

/// The reports of a LE Advertising Report event
///
/// One LE Advertising Report event can contain multiple reports. This keeps the parameters of the
/// event as they were received and the reports are accessed by their index within the event. The
/// parameters are validated when a `LeAdvertisingReports` is created, so once created every
/// report within it is complete.
///
/// # Panics
/// The accessor methods taking an index (`event_type`, `address_type`, `address`, `data`, and
/// `rssi`) panic if the index is not less than [`len`](LeAdvertisingReports::len). Use method
/// [`get`](LeAdvertisingReports::get) for a checked access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeAdvertisingReports {
    parameters: Vec<u8>,
    reports: Vec<ReportLocation>,
}

impl LeAdvertisingReports {
    /// Create a `LeAdvertisingReports` from the parameters of a LE Advertising Report event
    ///
    /// `parameters` must start with the *Num_Reports* parameter (the sub event code is not
    /// included). Each report is laid out as the event type, the address type, the address, the
    /// length of the data, the data, and then the RSSI.
    ///
    /// Any bytes after the last report are ignored.
    ///
    /// # Error
    /// An error is returned if the number of reports is zero or the parameters are too short for
    /// the reports.
    pub fn try_from_parameters(parameters: Vec<u8>) -> Result<Self, Error> {
        let mut packet = parameters.as_slice();

        let num_reports = match packet {
            [0, ..] | [] => return Err(Error::NoReports),
            [num, rest @ ..] => {
                packet = rest;
                *num as usize
            }
        };

        let mut reports = Vec::with_capacity(num_reports);

        for index in 0..num_reports {
            let start = parameters.len() - packet.len();

            chew!(packet, REPORT_HEADER_SIZE, report index);

            let data_len = chew!(packet, report index) as usize;

            chew!(packet, data_len, report index);

            let rssi = chew!(packet, report index) as i8;

            if data_len > MAX_DATA_LEN {
                log::debug!(
                    "advertising report {} contains {} bytes of data, more than the legacy maximum of {}",
                    index,
                    data_len,
                    MAX_DATA_LEN
                );
            }

            if rssi == RSSI_UNAVAILABLE {
                log::debug!("RSSI is unavailable for advertising report {}", index);
            }

            reports.push(ReportLocation { start, data_len });
        }

        if !packet.is_empty() {
            log::debug!("ignoring {} bytes after the last advertising report", packet.len());
        }

        Ok(LeAdvertisingReports { parameters, reports })
    }

    /// Create a `LeAdvertisingReports` from a complete LE Advertising Report event
    ///
    /// `event` is an HCI event packet starting with the event code. The event code must be for a LE
    /// Meta event, the sub event code must be for a LE Advertising Report, and the parameter
    /// length must be equal to the number of bytes after it.
    ///
    /// ```
    /// # use bo_tie_hci_util::events::parameters::LeAdvertisingReports;
    /// let event = [
    ///     0x3E, 0x0E, 0x02, 0x01, // header, sub event code, number of reports
    ///     0x00, 0x01, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, // event type, address type, address
    ///     0x02, 0x0A, 0x04, // data
    ///     0xC4, // RSSI
    /// ];
    ///
    /// let reports = LeAdvertisingReports::try_from_event(&event).unwrap();
    ///
    /// assert_eq!(1, reports.len());
    /// assert_eq!(&[0x0A, 0x04], reports.data(0));
    /// assert_eq!(-60, reports.rssi(0));
    /// ```
    pub fn try_from_event(event: &[u8]) -> Result<Self, Error> {
        let parameters = super::advertising_report_parameters(event)?;

        Self::try_from_parameters(parameters.to_vec())
    }

    /// Get the number of reports
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Check if there are no reports
    ///
    /// This is always false for a `LeAdvertisingReports` created from an event.
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Get the raw event type of report `index`
    pub fn event_type(&self, index: usize) -> u8 {
        self.parameters[self.reports[index].event_type()]
    }

    /// Get the raw address type of report `index`
    pub fn address_type(&self, index: usize) -> u8 {
        self.parameters[self.reports[index].address_type()]
    }

    /// Get the address of report `index`
    ///
    /// The address is in the order it was received (least significant byte first).
    pub fn address(&self, index: usize) -> BluetoothDeviceAddress {
        let mut address = [0u8; BluetoothDeviceAddress::LEN];

        address.copy_from_slice(&self.parameters[self.reports[index].address()]);

        BluetoothDeviceAddress::from_wire(address)
    }

    /// Get the advertising data of report `index`
    pub fn data(&self, index: usize) -> &[u8] {
        &self.parameters[self.reports[index].data()]
    }

    /// Get the RSSI of report `index`
    ///
    /// The value [`RSSI_UNAVAILABLE`] is returned as is.
    pub fn rssi(&self, index: usize) -> i8 {
        self.parameters[self.reports[index].rssi()] as i8
    }

    /// Get report `index`
    pub fn get(&self, index: usize) -> Option<LeAdvertisingReport<'_>> {
        (index < self.len()).then(|| self.report(index))
    }

    /// Iterate over the reports
    pub fn iter(&self) -> impl ExactSizeIterator<Item = LeAdvertisingReport<'_>> + '_ {
        (0..self.len()).map(move |index| self.report(index))
    }

    fn report(&self, index: usize) -> LeAdvertisingReport<'_> {
        LeAdvertisingReport {
            event_type: self.event_type(index),
            address_type: self.address_type(index),
            address: self.address(index),
            data: self.data(index),
            rssi: self.rssi(index),
        }
    }
}

/// A single advertising report
///
/// This is returned by the methods [`get`] and [`iter`] of `LeAdvertisingReports`.
///
/// [`get`]: LeAdvertisingReports::get
/// [`iter`]: LeAdvertisingReports::iter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeAdvertisingReport<'a> {
    pub event_type: u8,
    pub address_type: u8,
    pub address: BluetoothDeviceAddress,
    pub data: &'a [u8],
    /// A value of [`RSSI_UNAVAILABLE`] means the RSSI is not available
    pub rssi: i8,
}

impl<'a> LeAdvertisingReport<'a> {
    pub fn adv_event_type(&self) -> Result<LeAdvEventType, InvalidRawValue> {
        LeAdvEventType::try_from_raw(self.event_type)
    }

    pub fn le_address_type(&self) -> Result<AddressType, InvalidRawValue> {
        AddressType::try_from_raw(self.address_type)
    }

    /// Get the RSSI
    ///
    /// `None` is returned if the Controller could not measure the RSSI.
    pub fn rssi(&self) -> Option<i8> {
        (self.rssi != RSSI_UNAVAILABLE).then_some(self.rssi)
    }

    /// Get an iterator over the AD structures
    ///
    /// This returns an iterator that will return the AD structures within field `data`.
    #[cfg(feature = "gap")]
    pub fn iter(&self) -> bo_tie_gap::assigned::EirOrAdIterator<'a> {
        bo_tie_gap::assigned::EirOrAdIterator::new(self.data)
    }
}
