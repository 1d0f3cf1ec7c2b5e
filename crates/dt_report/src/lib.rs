mod atomic;
pub mod console;
pub mod csv_export;
pub mod json_export;

pub use csv_export::{export_csv, write_csv, CSV_HEADER};
pub use json_export::{export_json, JsonExport};
