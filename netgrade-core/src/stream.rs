use crate::{
    measure::{LossTracker, instant_ratio_sample},
    record::PacketRecord,
};

/// Accumulated state for one stream within a single scoring call.
///
/// Created lazily on the first sighting of a stream's SSRC and folded
/// over that stream's records in arrival order. Accumulators are
/// append-only: a record, once folded, is never revisited. The state
/// lives only for the duration of one [`NetworkScorer::score`] call.
///
/// [`NetworkScorer::score`]: crate::NetworkScorer::score
#[derive(Debug, Clone)]
pub(crate) struct StreamState {
    /// Clock-offset baseline: the negated receiver-minus-sender clock
    /// difference of the stream's first record, so that the first
    /// record's relative delay computes to exactly zero.
    offset_ms: f64,
    /// Relative delay of every record, in fold order.
    pub(crate) delays: Vec<f64>,
    /// Pace-tracking ratio per consecutive record pair.
    pub(crate) ratio_samples: Vec<f64>,
    /// Cumulative bytes-per-millisecond, sampled whenever the arrival
    /// clock has advanced past the first record.
    pub(crate) rate_samples: Vec<f64>,
    /// Total payload bytes received on this stream.
    received_bytes: u64,
    /// Records folded so far.
    pub(crate) records: u64,
    last_sequence: u64,
    first_arrival_ms: i64,
    last_send_ms: i64,
    last_arrival_ms: i64,
}

impl StreamState {
    /// State after folding a stream's first record.
    pub(crate) fn first(record: &PacketRecord) -> Self {
        let offset_ms = -record.clock_delta_ms();
        Self {
            offset_ms,
            // the first record's delay is zero by construction
            delays: vec![0.0],
            ratio_samples: Vec::new(),
            rate_samples: Vec::new(),
            received_bytes: record.payload_size,
            records: 1,
            last_sequence: record.sequence_number,
            first_arrival_ms: record.arrival_time_ms,
            last_send_ms: record.send_timestamp_ms,
            last_arrival_ms: record.arrival_time_ms,
        }
    }

    /// Fold one more record of this stream.
    ///
    /// Sequence gaps are charged to the session-wide `loss` tracker;
    /// everything else accumulates locally.
    pub(crate) fn observe(&mut self, record: &PacketRecord, loss: &mut LossTracker) {
        loss.observe_gap(self.last_sequence, record.sequence_number);
        self.last_sequence = record.sequence_number;

        self.delays.push(self.offset_ms + record.clock_delta_ms());

        let send_delta = record.send_timestamp_ms - self.last_send_ms;
        let recv_delta = record.arrival_time_ms - self.last_arrival_ms;
        self.ratio_samples
            .push(instant_ratio_sample(send_delta, recv_delta));
        self.last_send_ms = record.send_timestamp_ms;
        self.last_arrival_ms = record.arrival_time_ms;

        self.received_bytes += record.payload_size;
        let elapsed_ms = record.arrival_time_ms - self.first_arrival_ms;
        if elapsed_ms > 0 {
            self.rate_samples
                .push(self.received_bytes as f64 / elapsed_ms as f64);
        }

        self.records += 1;
    }
}
