//! Domain types: entities, raw and validated tables, tri-state metric cells.

pub mod entity;
pub mod record;
pub mod table;
pub mod value;

pub use entity::EntityId;
pub use record::{Dataset, Record};
pub use table::RawTable;
pub use value::MetricValue;
