//! Asynchronous bridge over the synchronous render pipeline.
//!
//! Rendering is CPU-bound string assembly, so the async surface delegates to
//! a small thread pool instead of reimplementing the pipeline: the job runs
//! [`crate::render`] with owned inputs and resolves a one-shot future. The
//! two paths share every byte of rendering code, which is what guarantees
//! identical output for identical inputs.
//!
//! # Architecture
//!
//! - `pool`: fixed thread pool draining a shared job queue
//! - `future`: the one-shot [`RenderFuture`] completion primitive

pub mod future;
pub mod pool;

use serde_json::{Map, Value};
use std::collections::HashMap;

pub use future::RenderFuture;
pub use pool::WorkerPool;

use crate::domain::model::ModelSchema;
use crate::RenderOptions;

/// Renders a form on the worker pool, resolving a [`RenderFuture`].
///
/// Inputs are owned so the calling task borrows nothing across the await
/// point. The future resolves with exactly the markup the synchronous
/// [`crate::render`] call would produce, or with the same error.
///
/// A pool submission failure resolves the future immediately with
/// [`FormweaverError::Worker`](crate::FormweaverError::Worker).
pub fn render_async(
    model: ModelSchema,
    values: Map<String, Value>,
    errors: HashMap<String, Vec<String>>,
    options: RenderOptions,
) -> RenderFuture {
    let shared = future::Shared::new();
    let completion = std::sync::Arc::clone(&shared);

    let submitted = pool::global_pool().submit(Box::new(move || {
        let result = crate::render(&model, &values, &errors, &options);
        completion.complete(result);
    }));

    match submitted {
        Ok(()) => RenderFuture::new(shared),
        Err(e) => RenderFuture::ready(Err(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FieldSpec, FieldType};
    use serde_json::json;

    fn sample_model() -> ModelSchema {
        ModelSchema::new("worker_sample")
            .with_field(FieldSpec::new("username", FieldType::Text).required())
            .with_field(FieldSpec::new("email", FieldType::Text))
    }

    fn sample_values() -> Map<String, Value> {
        json!({"username": "ada"}).as_object().cloned().unwrap()
    }

    #[test]
    fn async_output_matches_sync_byte_for_byte() {
        let model = sample_model();
        let values = sample_values();
        let mut errors = HashMap::new();
        errors.insert("email".to_string(), vec!["required".to_string()]);
        let options = RenderOptions::default();

        let sync = crate::render(&model, &values, &errors, &options).unwrap();
        let future = render_async(model, values, errors, options);
        let from_pool = futures_executor::block_on(future).unwrap();
        assert_eq!(sync, from_pool);
    }

    #[test]
    fn concurrent_renders_resolve_independently() {
        let futures: Vec<RenderFuture> = (0..8)
            .map(|i| {
                let model = ModelSchema::new(format!("worker_concurrent_{i}"))
                    .with_field(FieldSpec::new("note", FieldType::Text));
                render_async(model, Map::new(), HashMap::new(), RenderOptions::default())
            })
            .collect();

        for (i, future) in futures.into_iter().enumerate() {
            let html = futures_executor::block_on(future).unwrap();
            assert!(html.contains(r#"name="note""#), "render {i} missing field");
        }
    }

    #[test]
    fn pipeline_errors_surface_through_the_future() {
        let item = ModelSchema::new("worker_item").with_field(FieldSpec::new("x", FieldType::Text));
        let model = ModelSchema::new("worker_overflow").with_field(FieldSpec::new(
            "items",
            FieldType::ModelList {
                item,
                min_items: 0,
                max_items: 1,
            },
        ));
        let values = json!({"items": [{"x": 1}, {"x": 2}]})
            .as_object()
            .cloned()
            .unwrap();

        let future = render_async(model, values, HashMap::new(), RenderOptions::default());
        let err = futures_executor::block_on(future).unwrap_err();
        assert!(matches!(err, crate::FormweaverError::Cardinality(_)));
    }
}
