//! Host Controller Interface Events
//!
//! This is the parsing of the events sent from the Controller that are needed for scanning. The
//! only LE meta event parsed here is the LE Advertising Report event, see
//! [`LeAdvertisingReports`](parameters::LeAdvertisingReports).

/// "chews-off" and returns a slice of size $size from the beginning of $packet.
///
/// Invoking this without a size returns an u8, otherwise a reference to a slice is returned. The
/// enclosing function returns `Error::Truncated` for report `$report` if `$packet` is too short.
macro_rules! chew {
    ( $packet:ident, report $report:expr ) => {{
        let chewed = chew!($packet, 1, report $report);

        chewed[0]
    }};
    ( $packet:ident, $size:expr, report $report:expr ) => {{
        let size = $size as usize;

        if $packet.len() < size {
            return Err($crate::events::Error::Truncated {
                report: $report,
                needed: size,
                remaining: $packet.len(),
            });
        }

        let (chewed, rest) = $packet.split_at(size);

        $packet = rest;

        chewed
    }};
}

pub mod parameters;

/// The event code of the LE Meta event
pub const LE_META_EVENT_CODE: u8 = 0x3E;

/// The sub event code of the LE Advertising Report event
pub const LE_ADVERTISING_REPORT_SUB_EVENT_CODE: u8 = 0x02;

/// The size of the header of an HCI event packet (event code and parameter length)
pub const EVENT_HEADER_SIZE: usize = 2;

/// An error from parsing an event
///
/// These errors are caused by the Controller (or the interface to it) and not by the remote
/// devices whose advertising data is within an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The event code was not the code for a LE Meta event
    NotLeMetaEvent(u8),
    /// The sub event code was not the code for a LE Advertising Report event
    NotAdvertisingReport(u8),
    /// The parameter length field does not match the number of parameter bytes
    ParameterLength { expected: usize, actual: usize },
    /// The parameters ended before the end of a report
    Truncated {
        report: usize,
        needed: usize,
        remaining: usize,
    },
    /// The event did not contain any reports
    NoReports,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::NotLeMetaEvent(code) => write!(f, "event code {:#04x} is not a LE Meta event", code),
            Error::NotAdvertisingReport(code) => {
                write!(f, "sub event code {:#04x} is not a LE Advertising Report", code)
            }
            Error::ParameterLength { expected, actual } => write!(
                f,
                "parameter length is {} but there are {} parameter bytes",
                expected, actual
            ),
            Error::Truncated {
                report,
                needed,
                remaining,
            } => write!(
                f,
                "report {} is truncated, {} more bytes were needed but only {} remained",
                report, needed, remaining
            ),
            Error::NoReports => f.write_str("the event contains no advertising reports"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Get the parameters of a LE Advertising Report event
///
/// The returned parameters start with the number of reports.
pub(crate) fn advertising_report_parameters(event: &[u8]) -> Result<&[u8], Error> {
    let (code, len, parameters) = match event {
        [code, len, parameters @ ..] => (*code, *len as usize, parameters),
        _ => {
            return Err(Error::ParameterLength {
                expected: EVENT_HEADER_SIZE,
                actual: event.len(),
            })
        }
    };

    if code != LE_META_EVENT_CODE {
        return Err(Error::NotLeMetaEvent(code));
    }

    if len != parameters.len() {
        return Err(Error::ParameterLength {
            expected: len,
            actual: parameters.len(),
        });
    }

    match parameters {
        [LE_ADVERTISING_REPORT_SUB_EVENT_CODE, reports @ ..] => Ok(reports),
        [sub_event, ..] => Err(Error::NotAdvertisingReport(*sub_event)),
        [] => Err(Error::NoReports),
    }
}
