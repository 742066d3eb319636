//! Property-Based Tests — Sample and Exposition Invariants
//!
//! Uses `proptest` to verify that arbitrary container sets map to the
//! right number of samples with the right values, and that any label
//! content renders as exactly one well-formed line per sample.

use proptest::prelude::*;

use docker_health_exporter::adapters::metrics::encode_samples;
use docker_health_exporter::domain::{
    ContainerRecord, HealthStatus, METRIC_NAME, MetricSample, samples_from_records,
};

fn status_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("healthy".to_string()),
        Just("unhealthy".to_string()),
        Just("starting".to_string()),
        "[a-z]{1,12}",
    ]
}

fn record(id: String, name: String, status: &str) -> ContainerRecord {
    ContainerRecord {
        id,
        name,
        status: HealthStatus::parse(status),
        observed_at_ms: 1_700_000_000_000,
    }
}

// ── Sample Mapping Properties ───────────────────────────────

proptest! {
    /// One sample per record, value 1 iff the status is exactly "healthy".
    #[test]
    fn one_sample_per_record_with_binary_value(
        statuses in prop::collection::vec(status_strategy(), 0..40),
    ) {
        let records: Vec<_> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| record(format!("id{i}"), format!("c{i}"), s))
            .collect();

        let samples = samples_from_records(&records, true);
        prop_assert_eq!(samples.len(), records.len());

        for (sample, status) in samples.iter().zip(&statuses) {
            let expected = if status == "healthy" { 1.0 } else { 0.0 };
            prop_assert_eq!(sample.value, expected);
            prop_assert_eq!(&sample.status, status);
        }
    }
}

// ── Exposition Properties ───────────────────────────────────

proptest! {
    /// Arbitrary label text never breaks the one-line-per-sample shape.
    #[test]
    fn every_sample_renders_as_one_line(
        names in prop::collection::vec("[ -~\n\\\\\"]{0,16}", 1..20),
    ) {
        let samples: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, n)| MetricSample {
                id: format!("id{i}"),
                name: n.clone(),
                status: "healthy".to_string(),
                value: 1.0,
                timestamp_ms: None,
            })
            .collect();

        let body = encode_samples(&samples).unwrap();
        let prefix = format!("{METRIC_NAME}{{");
        let lines: Vec<_> = body.lines().filter(|l| !l.starts_with('#')).collect();

        prop_assert_eq!(lines.len(), samples.len());
        for line in lines {
            prop_assert!(line.starts_with(&prefix), "bad line: {line}");
            prop_assert!(line.ends_with("} 1"), "bad line: {line}");
        }
    }
}
