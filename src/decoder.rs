//! Line decoding for the radiation sensor CSV stream
//!
//! The firmware emits one record per line, comma-separated:
//!
//! ```text
//! time(ms),count,cpm,uSv/h,uSv/hError
//! 12345,3,6.0,0.072,0.015
//! ```
//!
//! The first line is a header row the firmware may reprint at any point
//! (for example after a reset), so decoding is stateless: every line is
//! classified on its own as a [`Sample`], the recurring header, or noise.
//!
//! Decoding is deliberately a dumb pipe. Field values are parsed but not
//! range-checked; negative or NaN dose values pass through unchanged,
//! mirroring the trust boundary of the sensor itself. Anything that does
//! not parse is [`Decoded::Malformed`] and the caller drops it.

use crate::types::Sample;

/// First field of the recurring header row
pub const HEADER_TOKEN: &str = "time(ms)";

/// Number of comma-separated fields in a record
pub const FIELDS_PER_RECORD: usize = 5;

/// Outcome of decoding one raw line
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A fully parsed measurement
    Sample(Sample),
    /// The recurring header row; legitimate and skipped
    Header,
    /// Unparseable noise; dropped by the caller
    Malformed,
}

/// Decode one raw line (terminator already stripped) into a tagged outcome.
///
/// Pure function of its input: no state, no side effects. Fields are not
/// trimmed; the firmware emits tight CSV and padded fields fail to parse.
pub fn decode(line: &str) -> Decoded {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != FIELDS_PER_RECORD {
        return Decoded::Malformed;
    }

    if fields[0] == HEADER_TOKEN {
        return Decoded::Header;
    }

    let time_ms = match fields[0].parse::<u64>() {
        Ok(v) => v,
        Err(_) => return Decoded::Malformed,
    };
    let count = match fields[1].parse::<i64>() {
        Ok(v) => v,
        Err(_) => return Decoded::Malformed,
    };
    let cpm = match fields[2].parse::<f64>() {
        Ok(v) => v,
        Err(_) => return Decoded::Malformed,
    };
    let dose = match fields[3].parse::<f64>() {
        Ok(v) => v,
        Err(_) => return Decoded::Malformed,
    };
    let dose_error = match fields[4].parse::<f64>() {
        Ok(v) => v,
        Err(_) => return Decoded::Malformed,
    };

    Decoded::Sample(Sample {
        time_ms,
        count,
        cpm,
        dose,
        dose_error,
    })
}
