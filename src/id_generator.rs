use std::sync::atomic::{AtomicUsize, Ordering};

use crate::line::LineId;

// Single static counter for all lines
static NEXT_LINE_ID: AtomicUsize = AtomicUsize::new(1);

pub fn generate_line_id() -> LineId {
    LineId(NEXT_LINE_ID.fetch_add(1, Ordering::SeqCst))
}
