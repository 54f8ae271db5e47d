//! End-to-end scenarios over the public evaluation surface: parse a
//! telemetry dump, evaluate it, check the score and its breakdown.

use netgrade::{
    Evaluator as _, NetworkEvaluator, NetworkScorer, PacketRecord, SessionReport, Ssrc,
    ThroughputFormulation,
};

fn entry(ssrc: u32, seq: u64, send_ms: i64, arrival_ms: i64, bytes: u64) -> String {
    format!(
        r#"{{"packetInfo": {{"header": {{"ssrc": {ssrc}, "sequenceNumber": {seq}, "sendTimestamp": {send_ms}}}, "arrivalTimeMs": {arrival_ms}, "payloadSize": {bytes}}}}}"#
    )
}

/// One stream, 5 packets, constant 50ms in flight, no gaps.
fn clean_dump() -> String {
    let entries: Vec<String> = (0..5)
        .map(|i| entry(1, i, i as i64 * 100, i as i64 * 100 + 50, 100))
        .collect();
    format!("[{}]", entries.join(","))
}

#[test]
fn clean_session_from_json_scores_100() {
    let report = SessionReport::from_json_str(&clean_dump()).unwrap();
    let detailed = NetworkEvaluator::new().evaluate_detailed(&report).unwrap();

    assert_eq!(detailed.delay_score, 1.0);
    assert_eq!(detailed.loss_count, 0);
    assert_eq!(detailed.loss_rate, 0.0);
    assert_eq!(detailed.score, 100.0);
}

#[test]
fn clean_session_bounded_under_both_formulations() {
    let report = SessionReport::from_json_str(&clean_dump()).unwrap();
    for formulation in [
        ThroughputFormulation::InstantRatio,
        ThroughputFormulation::CumulativeRate,
    ] {
        let evaluator =
            NetworkEvaluator::with_scorer(NetworkScorer::new().with_formulation(formulation));
        let score = evaluator.evaluate(&report).unwrap();
        assert!(
            (0.0..=100.0).contains(&score),
            "{formulation}: score {score} out of bounds"
        );
    }
}

#[test]
fn line_delimited_dump_scores_the_same_as_the_array() {
    let entries: Vec<String> = (0..5)
        .map(|i| entry(1, i, i as i64 * 100, i as i64 * 100 + 50, 100))
        .collect();
    let lines = entries.join("\n");
    let from_lines = SessionReport::from_json_lines(&lines).unwrap();
    let from_array = SessionReport::from_json_str(&clean_dump()).unwrap();
    assert_eq!(from_lines, from_array);
}

#[test]
fn repeated_evaluation_is_bit_identical() {
    // two interleaved streams with jitter and gaps
    let mut entries = Vec::new();
    for i in 0..20u64 {
        let seq = if i == 13 { i + 3 } else { i };
        let jitter = ((i * 11) % 17) as i64;
        entries.push(entry(10, seq, i as i64 * 20, i as i64 * 20 + 40 + jitter, 1_200));
        entries.push(entry(11, i, i as i64 * 20, i as i64 * 20 + 35 + jitter / 2, 800));
    }
    let report = SessionReport::from_json_str(&format!("[{}]", entries.join(","))).unwrap();

    let evaluator = NetworkEvaluator::new();
    let first = evaluator.evaluate_detailed(&report).unwrap();
    let second = evaluator.evaluate_detailed(&report).unwrap();
    assert_eq!(first, second);
}

#[test]
fn degraded_session_scores_lower_than_a_clean_one() {
    let clean = SessionReport::from_json_str(&clean_dump()).unwrap();

    // growing delay drift and a 5-packet gap
    let mut entries = Vec::new();
    for i in 0..10u64 {
        let seq = if i >= 5 { i + 5 } else { i };
        entries.push(entry(1, seq, i as i64 * 100, i as i64 * 100 + 50 + i as i64 * 30, 100));
    }
    let degraded = SessionReport::from_json_str(&format!("[{}]", entries.join(","))).unwrap();

    let evaluator = NetworkEvaluator::new();
    let clean_score = evaluator.evaluate(&clean).unwrap();
    let degraded_score = evaluator.evaluate(&degraded).unwrap();
    assert!(
        degraded_score < clean_score,
        "degraded {degraded_score} should score below clean {clean_score}"
    );
}

#[test]
fn empty_dump_fails_instead_of_scoring_zero() {
    let report = SessionReport::from_json_str("[]").unwrap();
    assert!(NetworkEvaluator::new().evaluate(&report).is_err());
}

#[test]
fn direct_records_and_parsed_records_agree() {
    let report_parsed = SessionReport::from_json_str(&clean_dump()).unwrap();
    let records: Vec<PacketRecord> = (0..5)
        .map(|i| PacketRecord::new(Ssrc::new(1), i, i as i64 * 100, i as i64 * 100 + 50, 100))
        .collect();
    let report_direct = SessionReport::from_records(records);
    assert_eq!(report_parsed, report_direct);
}
