//! Value-table persistence: lossless JSON export/import of the state→value
//! mapping, keyed by full board contents.

mod store;

pub use store::{export_values, import_values};
