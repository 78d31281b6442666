mod analyze;

pub use analyze::{AnalyzeArgs, process_organization};
