//! End-to-end enrichment tests: reference file on disk through to enriched spans.

use crate::common::{
    attrs, generate_reference_csv, multi_group_batch, write_reference_csv, SCENARIO_CSV,
};
use te_enrichment::{EnricherConfig, TraceEnricher};
use te_error::ReferenceErrorKind;
use te_traits::SpanProcessor;
use te_types::{Span, TraceBatch};

async fn scenario_enricher() -> (TraceEnricher, tempfile::NamedTempFile) {
    let file = write_reference_csv(SCENARIO_CSV);
    let config = EnricherConfig::new(file.path().to_str().unwrap());
    let enricher = TraceEnricher::load(&config).await.unwrap();
    (enricher, file)
}

#[tokio::test]
async fn test_trace_code_gains_slug() {
    let (enricher, _file) = scenario_enricher().await;
    let mut a = attrs(&[("traceCode", "T1")]);

    enricher.enrich_one(&mut a);

    assert_eq!(a, attrs(&[("traceCode", "T1"), ("slug", "S1")]));
}

#[tokio::test]
async fn test_slug_gains_trace_code() {
    let (enricher, _file) = scenario_enricher().await;
    let mut a = attrs(&[("slug", "S2")]);

    enricher.enrich_one(&mut a);

    assert_eq!(a, attrs(&[("slug", "S2"), ("traceCode", "T2")]));
}

#[tokio::test]
async fn test_unknown_trace_code_unchanged() {
    let (enricher, _file) = scenario_enricher().await;
    let mut a = attrs(&[("traceCode", "T9")]);

    enricher.enrich_one(&mut a);

    assert_eq!(a, attrs(&[("traceCode", "T9")]));
}

#[tokio::test]
async fn test_missing_slug_header_fails_construction() {
    let file = write_reference_csv("traceCode,name\nT1,S1\nT2,S2\n");
    let config = EnricherConfig::new(file.path().to_str().unwrap());

    let err = TraceEnricher::load(&config).await.unwrap_err();

    assert_eq!(err.reference_kind(), Some(ReferenceErrorKind::Schema));
}

#[tokio::test]
async fn test_default_config_fails_construction() {
    let err = TraceEnricher::load(&EnricherConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.reference_kind(), Some(ReferenceErrorKind::Io));
}

#[tokio::test]
async fn test_malformed_row_fails_construction() {
    let file = write_reference_csv("traceCode,slug\nT1,S1\nT2\n");

    let err = TraceEnricher::from_path(file.path().to_str().unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.reference_kind(), Some(ReferenceErrorKind::Parse));
}

#[tokio::test]
async fn test_pre_existing_slug_preserved() {
    let file = write_reference_csv("traceCode,slug\nX,OTHER\n");
    let enricher = TraceEnricher::from_path(file.path().to_str().unwrap())
        .await
        .unwrap();
    let mut a = attrs(&[("traceCode", "X"), ("slug", "PRE-EXISTING")]);

    enricher.enrich_one(&mut a);

    assert_eq!(a.get_str("slug"), Some("PRE-EXISTING"));
}

#[tokio::test]
async fn test_every_loaded_row_maps_both_ways() {
    let file = write_reference_csv(&generate_reference_csv(500));
    let enricher = TraceEnricher::from_path(file.path().to_str().unwrap())
        .await
        .unwrap();

    assert_eq!(enricher.table().forward_len(), 500);
    for i in 0..500 {
        let trace_code = format!("T{i}");
        let slug = format!("S{i}");
        assert_eq!(enricher.lookup_slug(&trace_code), Some(slug.as_str()));
        assert_eq!(enricher.lookup_trace_code(&slug), Some(trace_code.as_str()));
    }
}

#[tokio::test]
async fn test_batch_structure_preserved() {
    let (enricher, _file) = scenario_enricher().await;
    let input = multi_group_batch(vec![
        attrs(&[("traceCode", "T1")]),
        attrs(&[("slug", "S2")]),
        attrs(&[("traceCode", "T9")]),
        attrs(&[]),
        attrs(&[("traceCode", "T2"), ("slug", "mismatch")]),
        attrs(&[("slug", "S1"), ("http.route", "/pay")]),
    ]);

    let output = enricher.process(input.clone()).unwrap();

    assert_eq!(output.span_count(), input.span_count());
    assert_eq!(output.resource_spans.len(), input.resource_spans.len());
    for (before, after) in input.resource_spans.iter().zip(&output.resource_spans) {
        assert_eq!(before.resource, after.resource);
        assert_eq!(before.scope_spans.len(), after.scope_spans.len());
        for (bs, as_) in before.scope_spans.iter().zip(&after.scope_spans) {
            assert_eq!(bs.scope, as_.scope);
            for (b, a) in bs.spans.iter().zip(&as_.spans) {
                assert_eq!(b.trace_id, a.trace_id);
                assert_eq!(b.span_id, a.span_id);
                assert_eq!(b.name, a.name);
                assert_eq!(b.start_time_unix_nano, a.start_time_unix_nano);
                assert_eq!(b.end_time_unix_nano, a.end_time_unix_nano);
            }
        }
    }

    let enriched: Vec<_> = output.spans().map(|s| s.attributes.clone()).collect();
    assert_eq!(enriched[0], attrs(&[("traceCode", "T1"), ("slug", "S1")]));
    assert_eq!(enriched[1], attrs(&[("slug", "S2"), ("traceCode", "T2")]));
    assert_eq!(enriched[2], attrs(&[("traceCode", "T9")]));
    assert_eq!(enriched[3], attrs(&[]));
    assert_eq!(enriched[4], attrs(&[("traceCode", "T2"), ("slug", "mismatch")]));
    assert_eq!(
        enriched[5],
        attrs(&[("slug", "S1"), ("http.route", "/pay"), ("traceCode", "T1")])
    );
}

#[tokio::test]
async fn test_process_batch_twice_is_idempotent() {
    let (enricher, _file) = scenario_enricher().await;
    let batch = TraceBatch::from(vec![
        Span::new("a").with_attributes(attrs(&[("traceCode", "T2")])),
        Span::new("b").with_attributes(attrs(&[("slug", "S1")])),
    ]);

    let once = enricher.process_batch(batch);
    let twice = enricher.process_batch(once.clone());

    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_empty_batch() {
    let (enricher, _file) = scenario_enricher().await;

    let output = enricher.process_batch(TraceBatch::new());

    assert_eq!(output, TraceBatch::new());
}
