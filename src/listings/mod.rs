pub mod criteria;
pub mod pipeline;
pub mod seed;
pub mod urgency;

pub use criteria::{Criteria, SortKey, PAGE_SIZE};
pub use pipeline::{search, SearchResults};
pub use urgency::{classify_deadline, deadline_days, DeadlineUrgency};
