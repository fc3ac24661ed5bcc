pub mod analysis;
pub mod scanner;
pub mod vision;

pub use analysis::{AnalysisReport, ColorAnalysisService, DetailedAnalysis};
pub use scanner::{BatchRecord, ScanOptions, ScannerService};
pub use vision::{VisionClassifier, VisionError, parse_vision_response};
