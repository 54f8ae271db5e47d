use anyhow::anyhow;
use std::{fmt, str};

/// The synchronization source identifier of a media stream.
///
/// A session may multiplex several independent streams (audio, video,
/// simulcast layers); each carries its own `Ssrc`. The ordering on
/// `Ssrc` is what fixes the iteration order of every cross-stream
/// reduction, which is how [`NetworkScorer`] guarantees bit-identical
/// results when the same telemetry is scored twice.
///
/// [`NetworkScorer`]: crate::NetworkScorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ssrc(u32);

impl Ssrc {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl str::FromStr for Ssrc {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self).map_err(|error| anyhow!("{error}"))
    }
}

impl From<u32> for Ssrc {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Ssrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl fmt::LowerHex for Ssrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl fmt::UpperHex for Ssrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Receiver-side telemetry for one received packet.
///
/// One record is produced per packet that reached the receiver. The
/// scorer folds each record into the state of the stream named by
/// [`ssrc`](PacketRecord::ssrc) exactly once; records are never
/// revisited.
///
/// Timestamps come from two different clocks:
/// [`send_timestamp_ms`](PacketRecord::send_timestamp_ms) is the
/// sender's clock, [`arrival_time_ms`](PacketRecord::arrival_time_ms)
/// the receiver's. Their difference is only meaningful relative to a
/// per-stream baseline, never as an absolute one-way delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketRecord {
    /// The stream this packet belongs to.
    pub ssrc: Ssrc,
    /// Monotonically increasing per-stream counter. Wraparound is not
    /// modeled; a session is assumed short enough never to wrap.
    pub sequence_number: u64,
    /// When the sender put the packet on the wire (sender clock, ms).
    pub send_timestamp_ms: i64,
    /// When the packet arrived (receiver clock, ms).
    pub arrival_time_ms: i64,
    /// Payload size in bytes.
    pub payload_size: u64,
}

impl PacketRecord {
    pub const fn new(
        ssrc: Ssrc,
        sequence_number: u64,
        send_timestamp_ms: i64,
        arrival_time_ms: i64,
        payload_size: u64,
    ) -> Self {
        Self {
            ssrc,
            sequence_number,
            send_timestamp_ms,
            arrival_time_ms,
            payload_size,
        }
    }

    /// Raw receiver-minus-sender clock difference for this packet.
    pub(crate) fn clock_delta_ms(&self) -> f64 {
        (self.arrival_time_ms - self.send_timestamp_ms) as f64
    }
}
