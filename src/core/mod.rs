// Core query engine exports
pub mod aggregate;
pub mod clock;
pub mod engine;
pub mod ordering;
pub mod predicate;
pub mod record;

pub use aggregate::{AggregationSpec, Histogram};
pub use clock::{add_minutes, duration_hours, ClockError, ClockSpan, ClockTime};
pub use engine::{query, QueryResult, QuerySpec};
pub use ordering::{sort_stable, Direction, SortSpec};
pub use predicate::{Criterion, Predicate};
pub use record::{FieldValue, Record};
