use log::debug;
use netgrade_core::{PacketRecord, Ssrc};
use serde::Deserialize;
use thiserror::Error;

/// One session's collected packet telemetry, ready to be evaluated.
///
/// A report is built either directly from [`PacketRecord`]s or parsed
/// from the JSON dump a receiver writes: one browser-style statistics
/// entry per received packet, either as a JSON array
/// ([`from_json_str`](SessionReport::from_json_str)) or one entry per
/// line ([`from_json_lines`](SessionReport::from_json_lines)).
///
/// ```
/// use netgrade::SessionReport;
///
/// let json = r#"[
///   {"packetInfo": {"header": {"ssrc": 2, "sequenceNumber": 0, "sendTimestamp": 0},
///                   "arrivalTimeMs": 50, "payloadSize": 1200}},
///   {"packetInfo": {"header": {"ssrc": 2, "sequenceNumber": 1, "sendTimestamp": 20},
///                   "arrivalTimeMs": 72, "payloadSize": 1200}}
/// ]"#;
///
/// let report = SessionReport::from_json_str(json).unwrap();
/// assert_eq!(report.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    records: Vec<PacketRecord>,
}

impl SessionReport {
    pub fn from_records(records: Vec<PacketRecord>) -> Self {
        Self { records }
    }

    /// Parse a report from a JSON array of packet-statistics entries.
    ///
    /// Unknown sibling fields are ignored; receivers dump more than
    /// the scorer needs.
    pub fn from_json_str(json: &str) -> Result<Self, ReportError> {
        let entries: Vec<ReportEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// Parse a report from line-delimited JSON, one packet-statistics
    /// entry per line. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// A malformed line fails the whole parse, carrying the offending
    /// line number.
    pub fn from_json_lines(input: &str) -> Result<Self, ReportError> {
        let mut entries = Vec::new();
        for (index, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry: ReportEntry = serde_json::from_str(line)
                .map_err(|source| ReportError::Line {
                    line: index + 1,
                    source,
                })?;
            entries.push(entry);
        }
        Ok(Self::from_entries(entries))
    }

    fn from_entries(entries: Vec<ReportEntry>) -> Self {
        let records: Vec<PacketRecord> = entries.into_iter().map(ReportEntry::into_record).collect();
        debug!("parsed session report: {} packet record(s)", records.len());
        Self { records }
    }

    pub fn records(&self) -> &[PacketRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Error returned when parsing a [`SessionReport`] from JSON.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The JSON array could not be parsed.
    #[error("malformed session report: {0}")]
    Json(#[from] serde_json::Error),
    /// A line of a line-delimited dump could not be parsed.
    #[error("malformed session report at line {line}: {source}")]
    Line {
        line: usize,
        source: serde_json::Error,
    },
}

/// One receiver-side statistics entry, as dumped per received packet.
#[derive(Debug, Clone, Deserialize)]
struct ReportEntry {
    #[serde(rename = "packetInfo")]
    packet_info: PacketInfo,
}

#[derive(Debug, Clone, Deserialize)]
struct PacketInfo {
    header: PacketHeader,
    #[serde(rename = "arrivalTimeMs")]
    arrival_time_ms: i64,
    #[serde(rename = "payloadSize")]
    payload_size: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct PacketHeader {
    ssrc: u32,
    #[serde(rename = "sequenceNumber")]
    sequence_number: u64,
    #[serde(rename = "sendTimestamp")]
    send_timestamp: i64,
}

impl ReportEntry {
    fn into_record(self) -> PacketRecord {
        PacketRecord::new(
            Ssrc::new(self.packet_info.header.ssrc),
            self.packet_info.header.sequence_number,
            self.packet_info.header.send_timestamp,
            self.packet_info.arrival_time_ms,
            self.packet_info.payload_size,
        )
    }
}
