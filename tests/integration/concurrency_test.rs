//! Concurrent enrichment against one shared table snapshot.

use crate::common::{attrs, generate_reference_csv, write_reference_csv};
use std::sync::Arc;
use te_enrichment::TraceEnricher;
use te_traits::SpanProcessor;
use te_types::{Span, TraceBatch};

const ROWS: usize = 1_000;

async fn load_enricher() -> TraceEnricher {
    let file = write_reference_csv(&generate_reference_csv(ROWS));
    TraceEnricher::from_path(file.path().to_str().unwrap())
        .await
        .unwrap()
}

fn worker_batch(worker: usize) -> TraceBatch {
    let spans: Vec<Span> = (0..ROWS)
        .map(|i| {
            let trace_code = format!("T{i}");
            let slug = format!("S{i}");
            let a = if (i + worker) % 2 == 0 {
                attrs(&[("traceCode", trace_code.as_str())])
            } else {
                attrs(&[("slug", slug.as_str())])
            };
            Span::new(format!("w{worker}-{i}")).with_attributes(a)
        })
        .collect();
    TraceBatch::from(spans)
}

fn assert_fully_enriched(batch: &TraceBatch) {
    for (i, span) in batch.spans().enumerate() {
        assert_eq!(span.attributes.get_str("traceCode"), Some(format!("T{i}").as_str()));
        assert_eq!(span.attributes.get_str("slug"), Some(format!("S{i}").as_str()));
    }
}

#[tokio::test]
async fn test_threads_share_one_enricher() {
    let enricher = load_enricher().await;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let enricher = &enricher;
                scope.spawn(move || enricher.process_batch(worker_batch(worker)))
            })
            .collect();

        for handle in handles {
            assert_fully_enriched(&handle.join().unwrap());
        }
    });
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_tasks_share_processor_trait_object() {
    let processor: Arc<dyn SpanProcessor> = Arc::new(load_enricher().await);

    let tasks: Vec<_> = (0..16)
        .map(|worker| {
            let processor = Arc::clone(&processor);
            tokio::spawn(async move { processor.process(worker_batch(worker)).unwrap() })
        })
        .collect();

    for task in tasks {
        assert_fully_enriched(&task.await.unwrap());
    }
}

#[tokio::test]
async fn test_clones_outlive_original() {
    let clone = {
        let enricher = load_enricher().await;
        enricher.clone()
    };

    let handle = std::thread::spawn(move || clone.process_batch(worker_batch(1)));

    assert_fully_enriched(&handle.join().unwrap());
}
