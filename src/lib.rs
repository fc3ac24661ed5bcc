pub mod core;
pub mod services;

pub use crate::core::{AnalysisConfig, Classification, ClassificationMethod, ColorType};
pub use crate::services::{AnalysisReport, ColorAnalysisService};
