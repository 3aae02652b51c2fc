// Telemetry record parsing
//
// A tolerant streaming CSV parser over the raw socket byte stream. The
// server sends an endless sequence of 6-field records separated either by
// newlines or by bare commas continuing the stream; there is no length
// framing and no checksum. Malformed candidates are dropped whole, never
// partially applied.

use std::fmt;

/// Fields per record; fixed by the server's CSV layout
pub const FIELD_COUNT: usize = 6;

/// One complete telemetry sample, fields in wire order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub sled_current_ma: f64,
    pub photo_current_ua: f64,
    pub sled_temp_c: f64,
    pub target_sag_power_v: f64,
    pub sag_power_v: f64,
    pub tec_current_ma: f64,
}

impl Record {
    fn from_fields(fields: [f64; FIELD_COUNT]) -> Self {
        Self {
            sled_current_ma: fields[0],
            photo_current_ua: fields[1],
            sled_temp_c: fields[2],
            target_sag_power_v: fields[3],
            sag_power_v: fields[4],
            tec_current_ma: fields[5],
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2},{:.2},{:.2},{:.4},{:.4},{:.2}",
            self.sled_current_ma,
            self.photo_current_ua,
            self.sled_temp_c,
            self.target_sag_power_v,
            self.sag_power_v,
            self.tec_current_ma,
        )
    }
}

/// Parse one candidate record line
///
/// Accepts only a trimmed, non-empty line containing a comma whose 6
/// comma-separated tokens all parse as finite floats. Anything else yields
/// `None`; the caller decides whether to drop the line or wait for more
/// input.
pub fn parse_record(line: &str) -> Option<Record> {
    let line = line.trim();
    if line.is_empty() || !line.contains(',') {
        return None;
    }

    let mut fields = [0.0f64; FIELD_COUNT];
    let mut count = 0;
    for token in line.split(',') {
        if count == FIELD_COUNT {
            return None;
        }
        let value: f64 = token.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        fields[count] = value;
        count += 1;
    }

    if count == FIELD_COUNT {
        Some(Record::from_fields(fields))
    } else {
        None
    }
}

/// Accumulating receive buffer with record extraction
///
/// Bytes are appended as they arrive off the socket; [`next_record`]
/// consumes complete candidates from the front and leaves any remainder
/// (including incomplete trailing tokens) intact for the next attempt.
///
/// Framing is deliberately tolerant: a newline ends a record when one is
/// present, otherwise six comma-separated tokens are taken as one record
/// and the remainder becomes the new buffer head.
///
/// [`next_record`]: RecordBuffer::next_record
#[derive(Debug, Default)]
pub struct RecordBuffer {
    buf: String,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append freshly received bytes (lossy UTF-8; the wire is ASCII)
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.push_str(&String::from_utf8_lossy(bytes));
    }

    /// Extract the next complete record, if any
    ///
    /// Malformed candidates are silently discarded and extraction continues;
    /// `None` means the buffer holds no complete candidate yet.
    pub fn next_record(&mut self) -> Option<Record> {
        loop {
            if let Some(newline) = self.buf.find('\n') {
                let line: String = self.buf.drain(..=newline).collect();
                match parse_record(&line) {
                    Some(record) => return Some(record),
                    None => continue,
                }
            }

            let parts: Vec<&str> = self.buf.split(',').collect();
            if parts.len() < FIELD_COUNT {
                return None;
            }
            let line = parts[..FIELD_COUNT].join(",");
            self.buf = parts[FIELD_COUNT..].join(",");
            match parse_record(&line) {
                Some(record) => return Some(record),
                None => continue,
            }
        }
    }

    /// Bytes currently awaiting a record boundary
    #[cfg(test)]
    pub fn pending(&self) -> &str {
        &self.buf
    }
}
