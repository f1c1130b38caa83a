pub mod csv_file;
pub mod error;
pub mod factory;
pub mod json_file;
pub mod remote;
pub mod traits;
pub mod writer;

pub use csv_file::{parse_csv, CsvFileSource};
pub use error::SourceError;
pub use factory::SourceFactory;
pub use json_file::{parse_json_rows, JsonFileSource};
pub use remote::CsvUrlSource;
pub use traits::RowSource;
pub use writer::{skip_report_path, CatalogWriter, ExportSummary, SkipReportWriter};
