pub mod catalog;
pub mod classifier;
pub mod config;
pub mod decode;
pub mod features;
pub mod histogram;
pub mod region;
pub mod rules;

pub use catalog::{Archetype, ColorType, FaceAnalysis};
pub use classifier::{Classification, ClassificationMethod, ScoreVector};
pub use config::AnalysisConfig;
pub use features::{RegionFeatures, RegionKind};
pub use region::{FaceRegions, Region};
