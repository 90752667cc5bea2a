//! A scanned advertisement
//!
//! An [`Advertisement`] is one report within a LE Advertising Report event. The event is shared
//! by every `Advertisement` created from it and each `Advertisement` refers to its report by the
//! index of the report within the event.

use crate::RemoteAddress;
use bo_tie_gap::assigned::flags::Flags;
use bo_tie_gap::assigned::service_data::ServiceData;
use bo_tie_gap::scan::AdvPacket;
use bo_tie_gap::Uuid;
use bo_tie_hci_util::events::parameters::LeAdvertisingReports;
use bo_tie_hci_util::le::{ADV_DIRECT_IND, ADV_IND};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The part of an `Advertisement` that changes when a scan response is attached
#[derive(Default)]
struct Pairing {
    scan_response: Option<Arc<Advertisement>>,
    packet: Option<AdvPacket>,
}

/// A scanned advertisement
///
/// This is the advertising data of a single advertising report along with the scan response sent
/// by the same advertiser (if it was attached). The data types within the advertising data are
/// looked up from the advertising data followed by the scan response data.
///
/// The decoded data is cached on first lookup. Attaching a scan response clears the cache in the
/// same critical section as the attachment, so a lookup returns data from either the pairing
/// before or after the attachment and never a combination of the two.
///
/// An `Advertisement` never fails a lookup. Advertising data that is incorrectly formatted is
/// decoded up to the malformed AD structure and everything afterwards is treated as absent.
///
/// ```
/// # use std::sync::Arc;
/// # use bo_tie_hci_util::events::parameters::LeAdvertisingReports;
/// use bo_tie_scan::Advertisement;
///
/// let parameters = vec![
///     0x01, // number of reports
///     0x00, 0x01, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, // event type, address type, address
///     0x09, 0x02, 0x01, 0x06, 0x05, 0x09, b'H', b'i', b'!', b'?', // data
///     0xC4, // RSSI
/// ];
///
/// let reports = Arc::new(LeAdvertisingReports::try_from_parameters(parameters).unwrap());
///
/// let advertisement = Advertisement::new(reports, 0).unwrap();
///
/// assert_eq!("06:05:04:03:02:01", advertisement.address().to_string());
/// assert_eq!(Some("Hi!?".to_string()), advertisement.local_name());
/// assert!(advertisement.connectable());
/// ```
pub struct Advertisement {
    reports: Arc<LeAdvertisingReports>,
    index: usize,
    pairing: Mutex<Pairing>,
}

impl Advertisement {
    /// Create a new `Advertisement`
    ///
    /// `None` is returned if `index` is not the index of a report within `reports`.
    pub fn new(reports: Arc<LeAdvertisingReports>, index: usize) -> Option<Self> {
        (index < reports.len()).then(|| Advertisement {
            reports,
            index,
            pairing: Mutex::default(),
        })
    }

    /// Create an `Advertisement` for every report
    pub fn from_reports(reports: Arc<LeAdvertisingReports>) -> Vec<Self> {
        (0..reports.len())
            .map(|index| Advertisement {
                reports: reports.clone(),
                index,
                pairing: Mutex::default(),
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Pairing> {
        // Pairing is only ever changed by plain assignments, so it is valid even if poisoned
        self.pairing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the reports this `Advertisement` was created from
    pub fn reports(&self) -> &Arc<LeAdvertisingReports> {
        &self.reports
    }

    /// Get the index of the report
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the address of the advertiser
    ///
    /// This is read under the same lock as [`connectable`](Advertisement::connectable).
    pub fn address(&self) -> RemoteAddress {
        let _pairing = self.lock();

        self.remote_address()
    }

    /// The address without taking the lock
    fn remote_address(&self) -> RemoteAddress {
        RemoteAddress::from_report(self.reports.address(self.index), self.address_type())
    }

    /// Get the raw event type
    pub fn event_type(&self) -> u8 {
        self.reports.event_type(self.index)
    }

    /// Get the raw address type
    pub fn address_type(&self) -> u8 {
        self.reports.address_type(self.index)
    }

    /// Check if the advertiser accepts connections
    ///
    /// This is true for connectable undirected and connectable directed advertising.
    pub fn connectable(&self) -> bool {
        let _pairing = self.lock();

        matches!(self.event_type(), ADV_IND | ADV_DIRECT_IND)
    }

    /// Get the RSSI
    ///
    /// A value of 127 means the RSSI is not available.
    pub fn rssi(&self) -> i8 {
        self.reports.rssi(self.index)
    }

    /// Get the advertising data
    ///
    /// This does not include the data of the scan response.
    pub fn data(&self) -> &[u8] {
        self.reports.data(self.index)
    }

    /// Get the data of the attached scan response
    ///
    /// This is empty if there is no scan response attached.
    pub fn scan_response_data(&self) -> Vec<u8> {
        self.scan_response()
            .map(|scan_response| scan_response.data().to_vec())
            .unwrap_or_default()
    }

    /// Get the attached scan response
    pub fn scan_response(&self) -> Option<Arc<Advertisement>> {
        self.lock().scan_response.clone()
    }

    /// Attach a scan response
    ///
    /// Any previously attached scan response is replaced.
    ///
    /// # Note
    /// Two advertisements attached as the scan response of each other form a reference cycle and
    /// are never dropped.
    pub fn attach_scan_response(&self, scan_response: Arc<Advertisement>) {
        log::debug!(
            "attaching scan response from {} to advertisement from {}",
            scan_response.address(),
            self.address()
        );

        let mut pairing = self.lock();

        pairing.scan_response = Some(scan_response);

        pairing.packet = None;
    }

    /// Run `f` with the decoded advertising data
    ///
    /// The lock is held for the duration of `f`.
    fn with_packet<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AdvPacket) -> R,
    {
        let mut pairing = self.lock();

        let Pairing { scan_response, packet } = &mut *pairing;

        let packet = packet.get_or_insert_with(|| {
            // the scan response is never locked here, its data is immutable
            let scan_response_data = scan_response.as_ref().map(|sr| sr.data()).unwrap_or_default();

            log::trace!(
                "decoding {} bytes of advertising data and {} bytes of scan response data from {}",
                self.data().len(),
                scan_response_data.len(),
                self.remote_address()
            );

            AdvPacket::new(self.data(), scan_response_data)
        });

        f(packet)
    }

    /// Get a copy of the decoded advertising data
    pub fn packet(&self) -> AdvPacket {
        self.with_packet(AdvPacket::clone)
    }

    /// Get the local name
    ///
    /// The complete local name is preferred over the shortened local name.
    pub fn local_name(&self) -> Option<String> {
        self.with_packet(|packet| packet.local_name())
    }

    /// Get the manufacturer specific data
    pub fn manufacturer_data(&self) -> Option<Vec<u8>> {
        self.with_packet(|packet| packet.manufacturer_data().map(<[u8]>::to_vec))
    }

    /// Get the service data
    pub fn service_data(&self) -> Vec<ServiceData<Vec<u8>>> {
        self.with_packet(|packet| packet.service_data().iter().map(|data| data.to_owned()).collect())
    }

    /// Get the service class UUIDs
    pub fn services(&self) -> Vec<Uuid> {
        self.with_packet(|packet| packet.services())
    }

    /// Get the overflow service UUIDs
    ///
    /// # Note
    /// Overflow services are not distinguished from other services, this returns the same UUIDs as
    /// method [`services`](Advertisement::services).
    pub fn overflow_service(&self) -> Vec<Uuid> {
        self.services()
    }

    /// Get the Tx power level
    pub fn tx_power_level(&self) -> Option<i8> {
        self.with_packet(|packet| packet.tx_power_level())
    }

    /// Get the service solicitation UUIDs
    pub fn solicited_service(&self) -> Vec<Uuid> {
        self.with_packet(|packet| packet.solicited_services())
    }

    /// Get the flags
    pub fn flags(&self) -> Option<Flags> {
        self.with_packet(|packet| packet.flags())
    }

    #[cfg(test)]
    fn is_cached(&self) -> bool {
        self.lock().packet.is_some()
    }
}

impl core::fmt::Debug for Advertisement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Advertisement")
            .field("address", &self.address())
            .field("event_type", &self.event_type())
            .field("rssi", &self.rssi())
            .field("data", &self.data())
            .field("scan_response", &self.scan_response().map(|sr| sr.address()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bo_tie_hci_util::le::{ADV_NONCONN_IND, ADV_SCAN_IND, SCAN_RSP};

    fn reports(entries: &[(u8, u8, [u8; 6], &[u8], i8)]) -> Arc<LeAdvertisingReports> {
        let mut parameters = vec![entries.len() as u8];

        for (event_type, address_type, address, data, rssi) in entries {
            parameters.extend_from_slice(&[*event_type, *address_type]);
            parameters.extend_from_slice(address);
            parameters.push(data.len() as u8);
            parameters.extend_from_slice(data);
            parameters.push(*rssi as u8);
        }

        Arc::new(LeAdvertisingReports::try_from_parameters(parameters).unwrap())
    }

    const ADDRESS: [u8; 6] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];

    #[test]
    fn index_out_of_range() {
        let reports = reports(&[(ADV_IND, 0, ADDRESS, &[], -50)]);

        assert!(Advertisement::new(reports.clone(), 1).is_none());

        assert!(Advertisement::new(reports, 0).is_some());
    }

    #[test]
    fn report_accessors() {
        let reports = reports(&[
            (ADV_IND, 0, [0; 6], &[], -10),
            (ADV_NONCONN_IND, 1, ADDRESS, &[0x02, 0x0A, 0xF6], -80),
        ]);

        let advertisement = Advertisement::new(reports, 1).unwrap();

        assert_eq!(1, advertisement.index());

        assert_eq!(ADV_NONCONN_IND, advertisement.event_type());

        assert_eq!(1, advertisement.address_type());

        assert_eq!(RemoteAddress::Random([0x06, 0x05, 0x04, 0x03, 0x02, 0x01]), advertisement.address());

        assert_eq!(-80, advertisement.rssi());

        assert_eq!(&[0x02, 0x0A, 0xF6], advertisement.data());

        assert_eq!(Some(-10), advertisement.tx_power_level());

        assert!(!advertisement.connectable());

        assert!(advertisement.scan_response_data().is_empty());
    }

    #[test]
    fn connectable_event_types() {
        let reports = reports(&[
            (ADV_IND, 0, ADDRESS, &[], 0),
            (ADV_DIRECT_IND, 0, ADDRESS, &[], 0),
            (ADV_SCAN_IND, 0, ADDRESS, &[], 0),
            (ADV_NONCONN_IND, 0, ADDRESS, &[], 0),
            (SCAN_RSP, 0, ADDRESS, &[], 0),
        ]);

        let connectable = Advertisement::from_reports(reports)
            .iter()
            .map(|advertisement| advertisement.connectable())
            .collect::<Vec<_>>();

        assert_eq!(vec![true, true, false, false, false], connectable);
    }

    #[test]
    fn scan_response_only_data() {
        let reports = reports(&[(ADV_IND, 0, ADDRESS, &[], -40), (SCAN_RSP, 0, ADDRESS, &[0x02, 0x0A, 0x04], -40)]);

        let mut advertisements = Advertisement::from_reports(reports).into_iter();

        let advertisement = advertisements.next().unwrap();

        let scan_response = Arc::new(advertisements.next().unwrap());

        assert_eq!(None, advertisement.tx_power_level());

        advertisement.attach_scan_response(scan_response.clone());

        assert_eq!(Some(4), advertisement.tx_power_level());

        assert_eq!(None, advertisement.local_name());

        assert_eq!(vec![0x02, 0x0A, 0x04], advertisement.scan_response_data());

        assert!(Arc::ptr_eq(&scan_response, &advertisement.scan_response().unwrap()));
    }

    #[test]
    fn attaching_clears_the_cache() {
        let reports = reports(&[
            (ADV_SCAN_IND, 0, ADDRESS, &[0x03, 0x08, b'a', b'b'], 0),
            (SCAN_RSP, 0, ADDRESS, &[0x04, 0x09, b'a', b'b', b'c'], 0),
            (SCAN_RSP, 0, ADDRESS, &[0x02, 0x0A, 0x00], 0),
        ]);

        let mut advertisements = Advertisement::from_reports(reports).into_iter();

        let advertisement = advertisements.next().unwrap();
        let first_response = Arc::new(advertisements.next().unwrap());
        let second_response = Arc::new(advertisements.next().unwrap());

        assert!(!advertisement.is_cached());

        assert_eq!(Some("ab".to_string()), advertisement.local_name());

        assert!(advertisement.is_cached());

        advertisement.attach_scan_response(first_response);

        assert!(!advertisement.is_cached());

        assert_eq!(Some("abc".to_string()), advertisement.local_name());

        advertisement.attach_scan_response(second_response);

        assert_eq!(Some("ab".to_string()), advertisement.local_name());

        assert_eq!(Some(0), advertisement.tx_power_level());
    }

    #[test]
    fn decoded_fields() {
        let data = [
            0x02, 0x01, 0x06, // flags
            0x03, 0x03, 0x0F, 0x18, // battery service
            0x04, 0x16, 0x0F, 0x18, 0x50, // battery level service data
            0x05, 0xFF, 0x59, 0x00, 0xAA, 0xBB, // manufacturer data
            0x03, 0x14, 0x12, 0x18, // solicit HID
        ];

        let advertisement = Advertisement::new(reports(&[(ADV_IND, 0, ADDRESS, &data, 0)]), 0).unwrap();

        assert_eq!(Some(0x06), advertisement.flags().map(|flags| flags.raw()));

        assert_eq!(vec![Uuid::from_u16(0x180F)], advertisement.services());

        assert_eq!(advertisement.services(), advertisement.overflow_service());

        assert_eq!(
            vec![ServiceData::new(Uuid::from_u16(0x180F), vec![0x50])],
            advertisement.service_data()
        );

        assert_eq!(Some(vec![0x59, 0x00, 0xAA, 0xBB]), advertisement.manufacturer_data());

        assert_eq!(vec![Uuid::from_u16(0x1812)], advertisement.solicited_service());

        assert_eq!(&data[..], advertisement.packet().raw());
    }

    #[test]
    fn recovers_from_poisoned_lock() {
        let advertisement = Arc::new(
            Advertisement::new(reports(&[(ADV_IND, 0, ADDRESS, &[0x02, 0x0A, 0x01], 0)]), 0).unwrap(),
        );

        let poisoner = advertisement.clone();

        let result = std::thread::spawn(move || {
            let _guard = poisoner.pairing.lock();

            panic!("poisoning the lock");
        })
        .join();

        assert!(result.is_err());

        assert!(advertisement.pairing.is_poisoned());

        assert_eq!(Some(1), advertisement.tx_power_level());

        assert_eq!(RemoteAddress::Public([0x06, 0x05, 0x04, 0x03, 0x02, 0x01]), advertisement.address());
    }

    #[test]
    fn address_waits_for_attach() {
        let reports = reports(&[(ADV_SCAN_IND, 1, ADDRESS, &[], 0), (SCAN_RSP, 1, ADDRESS, &[0x02, 0x0A, 0x07], 0)]);

        let mut advertisements = Advertisement::from_reports(reports).into_iter();

        let advertisement = advertisements.next().unwrap();
        let scan_response = Arc::new(advertisements.next().unwrap());

        let pairing = advertisement.lock();

        std::thread::scope(|scope| {
            let reader = scope.spawn(|| advertisement.address());

            std::thread::sleep(std::time::Duration::from_millis(20));

            // the reader cannot finish while the lock is held
            assert!(!reader.is_finished());

            drop(pairing);

            assert_eq!(RemoteAddress::Random([0x06, 0x05, 0x04, 0x03, 0x02, 0x01]), reader.join().unwrap());
        });

        // decoding logs the address while the lock is held
        advertisement.attach_scan_response(scan_response);

        assert_eq!(Some(7), advertisement.tx_power_level());

        assert_eq!(RemoteAddress::Random([0x06, 0x05, 0x04, 0x03, 0x02, 0x01]), advertisement.address());
    }
}
