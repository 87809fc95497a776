pub mod drag;

pub use drag::{project_span, DragController, DragError, DragMode, DragOutcome, DragSession};
