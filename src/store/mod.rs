pub mod dataset;
pub mod loader;
pub mod slots;

pub use dataset::{Dataset, LENGTH_COLUMN, PROTOCOL_COLUMN, SOURCE_COLUMN, TIME_COLUMN};
pub use loader::{decode_upload_contents, parse_csv, DecodeError};
pub use slots::{RecordStore, SlotId};
