use tracing::{Span, field};

use super::TraceId;

/// Create a root span for one comparison run (load, rank, export).
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "root",
        name = %name,
        trace_id = %trace_id.as_str(),
        corridor_ids = field::Empty
    )
}

/// Create a child span (inherits trace_id from the parent)
pub fn child_span(name: &'static str) -> Span {
    tracing::info_span!("child", name = %name, corridor_ids = field::Empty)
}

/// Record the resolved corridor selection on the current span.
pub fn annotate_selection(ids: &[String]) {
    Span::current().record("corridor_ids", field::display(ids.join(",")));
}
