//! Generic Access Profile data formats
//!
//! This is the decoding of the data types that are sent by a device in its advertising data or
//! extended inquiry response. The [`assigned`] module contains the data types and [`scan`]
//! contains a packet type for reading the data of a scanned advertiser.
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub use bo_tie_host_util::Uuid;

pub mod assigned;
pub mod scan;
