use opentelemetry::{Context, global, propagation::Injector};
use tonic::{
    Request,
    metadata::{MetadataKey, MetadataMap, MetadataValue},
};

pub struct MetadataInjector<'a>(pub &'a mut MetadataMap);

impl Injector for MetadataInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        let Ok(metadata_key) = key.parse::<MetadataKey<_>>() else {
            return;
        };
        if let Ok(metadata_value) = value.parse::<MetadataValue<_>>() {
            self.0.insert(metadata_key, metadata_value);
        }
    }
}

/// Writes the span context of `cx` into the outgoing request's metadata.
pub fn inject_trace_context<T>(cx: &Context, request: &mut Request<T>) {
    global::get_text_map_propagator(|propagator| {
        propagator.inject_context(cx, &mut MetadataInjector(request.metadata_mut()))
    });
}
