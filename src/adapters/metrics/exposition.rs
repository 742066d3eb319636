//! Prometheus Text Exposition - Container Health Gauge
//!
//! Renders `MetricSample`s as a single gauge family in the Prometheus
//! text format. Families are built as raw protos rather than through a
//! `Registry` because every sample carries its own timestamp and the
//! label set changes on every scrape.

use anyhow::{Context, Result};
use prometheus::proto::{Gauge, LabelPair, Metric, MetricFamily, MetricType};
use prometheus::{Encoder, TextEncoder};

use crate::domain::sample::{METRIC_HELP, METRIC_NAME, MetricSample};

/// Content type of the rendered body.
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

/// Build the `container_inspect_state_health_status` family.
pub fn health_family(samples: &[MetricSample]) -> MetricFamily {
    let mut family = MetricFamily::default();
    family.set_name(METRIC_NAME.to_string());
    family.set_help(METRIC_HELP.to_string());
    family.set_field_type(MetricType::GAUGE);

    for sample in samples {
        let mut metric = Metric::default();
        metric.mut_label().push(label("id", &sample.id));
        metric.mut_label().push(label("name", &sample.name));
        metric.mut_label().push(label("value", &sample.status));

        let mut gauge = Gauge::default();
        gauge.set_value(sample.value);
        metric.set_gauge(gauge);

        if let Some(ts) = sample.timestamp_ms {
            metric.set_timestamp_ms(ts);
        }

        family.mut_metric().push(metric);
    }

    family
}

/// Render samples as a Prometheus text body.
///
/// Label values are escaped by the encoder. No samples renders an
/// empty body (the encoder rejects empty families).
pub fn encode_samples(samples: &[MetricSample]) -> Result<String> {
    if samples.is_empty() {
        return Ok(String::new());
    }

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&[health_family(samples)], &mut buffer)
        .context("Failed to encode health samples")?;

    String::from_utf8(buffer).context("Encoded metrics are not UTF-8")
}

fn label(name: &str, value: &str) -> LabelPair {
    let mut pair = LabelPair::default();
    pair.set_name(name.to_string());
    pair.set_value(value.to_string());
    pair
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str, name: &str, status: &str, ts: Option<i64>) -> MetricSample {
        MetricSample {
            id: id.to_string(),
            name: name.to_string(),
            status: status.to_string(),
            value: if status == "healthy" { 1.0 } else { 0.0 },
            timestamp_ms: ts,
        }
    }

    fn sample_lines(body: &str) -> Vec<&str> {
        body.lines().filter(|l| !l.starts_with('#')).collect()
    }

    #[test]
    fn renders_healthy_sample_line() {
        let body =
            encode_samples(&[sample("abc123", "web", "healthy", Some(1_700_000_000_000))]).unwrap();
        assert_eq!(
            sample_lines(&body),
            [
                "container_inspect_state_health_status{id=\"abc123\",name=\"web\",value=\"healthy\"} 1 1700000000000"
            ]
        );
        assert!(body.contains("# TYPE container_inspect_state_health_status gauge"));
    }

    #[test]
    fn renders_unhealthy_without_timestamp() {
        let body = encode_samples(&[sample("def", "db", "unhealthy", None)]).unwrap();
        assert_eq!(
            sample_lines(&body),
            ["container_inspect_state_health_status{id=\"def\",name=\"db\",value=\"unhealthy\"} 0"]
        );
    }

    #[test]
    fn escapes_reserved_characters() {
        let body = encode_samples(&[sample("x", "we\"b\\n\nx", "healthy", None)]).unwrap();
        let lines = sample_lines(&body);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(r#"name="we\"b\\n\nx""#), "got {}", lines[0]);
    }

    #[test]
    fn empty_input_renders_empty_body() {
        assert_eq!(encode_samples(&[]).unwrap(), "");
    }

    #[test]
    fn one_line_per_sample_in_order() {
        let samples = vec![
            sample("a", "one", "healthy", None),
            sample("b", "two", "starting", None),
            sample("c", "three", "unhealthy", None),
        ];
        let body = encode_samples(&samples).unwrap();
        let lines = sample_lines(&body);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("id=\"a\""));
        assert!(lines[1].contains("id=\"b\""));
        assert!(lines[2].contains("id=\"c\""));
    }
}
