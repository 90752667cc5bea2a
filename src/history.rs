//! Pairing scan responses with advertisements
//!
//! A scan response is reported by the Controller as its own advertising report. It is sent by an
//! advertiser after it received a scan request, so the scan response is reported after the
//! advertisement it responds to. [`AdvertisingHistory`] keeps the recently received scannable
//! advertisements so that a scan response can be attached to the advertisement from the same
//! advertiser.

use crate::Advertisement;
use bo_tie_hci_util::events::parameters::LeAdvertisingReports;
use bo_tie_hci_util::le::{ADV_IND, ADV_SCAN_IND, SCAN_RSP};
use std::collections::VecDeque;
use std::sync::Arc;

/// The history of scannable advertisements
///
/// This is a fixed size history of the most recent advertisements that can be responded to with a
/// scan response. When the history is full the oldest advertisement is forgotten.
#[derive(Debug)]
pub struct AdvertisingHistory {
    capacity: usize,
    history: VecDeque<Arc<Advertisement>>,
}

impl AdvertisingHistory {
    /// The default number of advertisements remembered
    pub const DEFAULT_CAPACITY: usize = 128;

    /// Create a new `AdvertisingHistory` with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a new `AdvertisingHistory` that remembers up to `capacity` advertisements
    ///
    /// A capacity of zero means no scan response is ever paired.
    pub fn with_capacity(capacity: usize) -> Self {
        AdvertisingHistory {
            capacity,
            history: VecDeque::with_capacity(capacity),
        }
    }

    /// Process the reports of a LE Advertising Report event
    ///
    /// The returned advertisements are in the order of the reports.
    ///
    /// * Connectable and scannable undirected advertisements are remembered and returned.
    /// * A scan response is attached to the most recent remembered advertisement from the same
    ///   address (and address type). That advertisement is returned again with the scan response
    ///   attached. A scan response without a matching advertisement is dropped.
    /// * All other advertisements are returned as is.
    pub fn process(&mut self, reports: Arc<LeAdvertisingReports>) -> Vec<Arc<Advertisement>> {
        let mut processed = Vec::with_capacity(reports.len());

        for advertisement in Advertisement::from_reports(reports).into_iter().map(Arc::new) {
            match advertisement.event_type() {
                ADV_IND | ADV_SCAN_IND => {
                    self.remember(advertisement.clone());

                    processed.push(advertisement);
                }
                SCAN_RSP => match self.find(&advertisement) {
                    Some(scanned) => {
                        scanned.attach_scan_response(advertisement);

                        processed.push(scanned);
                    }
                    None => log::debug!(
                        "dropping scan response from {}, there is no advertisement for it",
                        advertisement.address()
                    ),
                },
                _ => processed.push(advertisement),
            }
        }

        processed
    }

    fn remember(&mut self, advertisement: Arc<Advertisement>) {
        if self.capacity == 0 {
            return;
        }

        if self.history.len() == self.capacity {
            self.history.pop_front();
        }

        self.history.push_back(advertisement);
    }

    /// Find the newest advertisement from the same advertiser as `scan_response`
    fn find(&self, scan_response: &Advertisement) -> Option<Arc<Advertisement>> {
        let address = scan_response.address();
        let address_type = scan_response.address_type();

        self.history
            .iter()
            .rev()
            .find(|scanned| scanned.address() == address && scanned.address_type() == address_type)
            .cloned()
    }

    /// Forget every remembered advertisement
    pub fn clear(&mut self) {
        self.history.clear()
    }

    /// Get the number of remembered advertisements
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for AdvertisingHistory {
    fn default() -> Self {
        Self::new()
    }
}
