pub mod dates;
pub mod project;
pub mod schedule;
pub mod task;
pub mod timeline;

pub use dates::{DateError, DateRange, DAY_WIDTH};
pub use project::{Project, Subcontractor};
pub use schedule::Schedule;
pub use task::{SiteTask, Task, TaskStatus};
pub use timeline::TimelineViewport;
