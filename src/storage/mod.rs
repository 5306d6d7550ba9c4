//! Persistence bridge: local board records, PNG export, and REST payload types.

pub mod export;
pub mod records;
pub mod remote;

pub use export::{export_file_name, export_png};
pub use records::{BoardRecord, RecordStore, RecordSummary};
pub use remote::{BoardEndpoint, BoardResponse, CreateBoardRequest, RemoteError};
