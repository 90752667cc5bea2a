//! Common items for the host controller interface
//!
//! This crate carries the parts of the HCI that are needed by a host to process the events of an
//! LE scan. Events are received from the Controller as raw HCI event packets and the
//! [`events`] module turns the LE Advertising Report event into an indexable set of reports.
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod events;
pub mod le;

pub use bo_tie_core::BluetoothDeviceAddress;
