mod line_extractor;
mod report;

pub use line_extractor::{extract, ExtractionSpec};
pub use report::{RunReport, SpecSnapshot};
