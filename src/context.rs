use opentelemetry::trace::TraceContextExt;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::record::TraceContext;

/// Snapshot the identity of the span active at the call site, if any.
///
/// Reads the OpenTelemetry context attached to the current `tracing` span
/// (populated by the `tracing-opentelemetry` layer). Safe to call from
/// anywhere, including inside async continuations; absence of a span is a
/// normal state, not an error.
pub fn current_trace_context() -> Option<TraceContext> {
    let cx = tracing::Span::current().context();
    let span = cx.span();
    let span_context = span.span_context();
    if !span_context.is_valid() {
        return None;
    }

    Some(TraceContext {
        trace_id: span_context.trace_id().to_string(),
        span_id: span_context.span_id().to_string(),
        trace_flags: span_context.trace_flags().to_u8(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_active_span_yields_none() {
        assert_eq!(current_trace_context(), None);
    }
}
