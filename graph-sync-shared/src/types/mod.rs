//! Shared data types for the graph search synchronizer.

mod action_table;
mod document;
mod handle;
mod index_action;
mod index_spec;
mod property_value;

pub use action_table::ActionTable;
pub use document::Document;
pub use handle::EntityHandle;
pub use index_action::{ActionKey, IndexAction};
pub use index_spec::{IndexSpec, IndexSpecParseError, IndexTarget};
pub use property_value::PropertyValue;
