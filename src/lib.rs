//! Bluetooth LE advertising report aggregation
//!
//! This library turns the LE Advertising Report events sent by a Controller into advertisements
//! that can be queried for the data advertised by a peripheral.
//!
//! The parts of this library are split among the crates of the workspace.
//! * `bo-tie-core`: the Bluetooth device address
//! * `bo-tie-hci-util`: parsing of the LE Advertising Report event
//! * `bo-tie-gap`: decoding of the AD structures within advertising data
//! * `bo-tie-host-util`: Bluetooth UUIDs
//!
//! This crate ties them together with an [`Advertisement`], a single report combined with the scan
//! response from the same advertiser, and an [`AdvertisingHistory`] to match scan responses with
//! the advertisement they were sent for.
//!
//! ```
//! use bo_tie_scan::{hci::events::parameters::LeAdvertisingReports, AdvertisingHistory};
//! use std::sync::Arc;
//!
//! let mut history = AdvertisingHistory::new();
//!
//! let advertising = [
//!     0x3E, 0x10, 0x02, 0x01, // LE advertising report with one report
//!     0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, // ADV_IND from a public address
//!     0x04, 0x03, 0x03, 0x0F, 0x18, // complete list of 16 bit service UUIDs
//!     0xBA, // RSSI
//! ];
//!
//! let scan_response = [
//!     0x3E, 0x0F, 0x02, 0x01,
//!     0x04, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, // SCAN_RSP from the same address
//!     0x03, 0x02, 0x0A, 0x04, // Tx power level
//!     0xBA,
//! ];
//!
//! for event in [&advertising[..], &scan_response[..]] {
//!     let reports = LeAdvertisingReports::try_from_event(event).unwrap();
//!
//!     for advertisement in history.process(Arc::new(reports)) {
//!         println!("{} services: {:?}", advertisement.address(), advertisement.services());
//!     }
//! }
//!
//! let advertisement = &history.process(Arc::new(LeAdvertisingReports::try_from_event(&scan_response).unwrap()))[0];
//!
//! assert_eq!("06:05:04:03:02:01", advertisement.address().to_string());
//! assert_eq!(Some(4), advertisement.tx_power_level());
//! assert_eq!(-70, advertisement.rssi());
//! ```
//!
//! # Features
//! * `std`: implements `std::error::Error` for the error types of the workspace crates (default)
//! * `serde`: `Serialize` and `Deserialize` for addresses and UUIDs
//! * `uuid-crate`: conversions between [`Uuid`] and the `Uuid` of the crate `uuid`
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod address;
mod advertisement;
pub mod history;

pub use address::RemoteAddress;
pub use advertisement::Advertisement;
pub use history::AdvertisingHistory;

pub use bo_tie_core::BluetoothDeviceAddress;
pub use bo_tie_gap as gap;
pub use bo_tie_gap::Uuid;
pub use bo_tie_hci_util as hci;
