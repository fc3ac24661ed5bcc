use crate::core::catalog::{self, Archetype, ColorType, FaceAnalysis};
use crate::core::classifier::{self, Classification, ClassificationMethod, ScoreVector};
use crate::core::config::AnalysisConfig;
use crate::core::decode::{self, DecodeError};
use crate::core::features::{self, Contrast, RegionFeatures, RegionKind, Undertone};
use crate::core::region::{self, FaceRegions};
use image::RgbImage;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct SkinSummary {
    #[serde(flatten)]
    pub features: RegionFeatures,
    pub contrast: Contrast,
    pub undertone: Undertone,
}

impl From<RegionFeatures> for SkinSummary {
    fn from(features: RegionFeatures) -> Self {
        Self {
            contrast: features.contrast(),
            undertone: features.undertone(),
            features,
        }
    }
}

/// Per-region summaries, shown to the user as the detailed analysis.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedAnalysis {
    /// Pixel rectangles that were sampled.
    pub regions: FaceRegions,
    pub skin: SkinSummary,
    pub hair: RegionFeatures,
    pub eyes: RegionFeatures,
}

#[derive(Debug, Clone)]
pub struct ImageAnalysis {
    pub details: DetailedAnalysis,
    pub classification: Classification,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub color_type_id: ColorType,
    pub color_type: &'static Archetype,
    pub face_analysis: &'static FaceAnalysis,
    pub method: ClassificationMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreVector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_analysis: Option<DetailedAnalysis>,
    pub timestamp: String,
}

impl AnalysisReport {
    pub fn new(color_type: ColorType, method: ClassificationMethod) -> Self {
        Self {
            color_type_id: color_type,
            color_type: catalog::archetype(color_type),
            face_analysis: catalog::face_analysis(color_type),
            method,
            scores: None,
            detailed_analysis: None,
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Drop the per-region summaries and scores.
    pub fn without_details(mut self) -> Self {
        self.scores = None;
        self.detailed_analysis = None;
        self
    }
}

impl From<ImageAnalysis> for AnalysisReport {
    fn from(analysis: ImageAnalysis) -> Self {
        let classification = analysis.classification;
        let mut report = AnalysisReport::new(classification.color_type, classification.method);
        report.scores = Some(classification.scores);
        report.detailed_analysis = Some(analysis.details);
        report
    }
}

/// Turns a photo into a color type report.
pub struct ColorAnalysisService {
    config: AnalysisConfig,
}

impl ColorAnalysisService {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Sample the face, hair and eye regions of a decoded image and classify.
    pub fn analyze_image(&self, image: &RgbImage) -> ImageAnalysis {
        let (width, height) = image.dimensions();
        let regions = region::extract(width, height);

        let skin = features::summarize(image, regions.face, RegionKind::Face, &self.config.face);
        let hair = features::summarize(image, regions.hair, RegionKind::Hair, &self.config.hair);
        let eyes = features::summarize(image, regions.eyes, RegionKind::Eyes, &self.config.eyes);

        let classification = classifier::classify(&skin, &hair, &eyes, &self.config);
        log::info!(
            "Classified {}x{} image as {} ({:?})",
            width,
            height,
            classification.color_type,
            classification.method
        );

        ImageAnalysis {
            details: DetailedAnalysis {
                regions,
                skin: skin.into(),
                hair,
                eyes,
            },
            classification,
        }
    }

    /// Analyze encoded image bytes. Undecodable input never fails: it gets a
    /// uniformly random color type.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> AnalysisReport {
        self.report_or_random(decode::decode_bytes(bytes))
    }

    /// Analyze a data URL (or bare base64) payload as sent by a browser.
    pub fn analyze_payload(&self, payload: &str) -> AnalysisReport {
        self.report_or_random(decode::decode_payload(payload))
    }

    /// Read and analyze an image file. Only read failures are errors.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<AnalysisReport> {
        let bytes = std::fs::read(path.as_ref())?;
        Ok(self.analyze_bytes(&bytes))
    }

    fn report_or_random(&self, decoded: Result<RgbImage, DecodeError>) -> AnalysisReport {
        match decoded {
            Ok(image) => self.analyze_image(&image).into(),
            Err(e) => random_report(&e),
        }
    }
}

impl Default for ColorAnalysisService {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

pub(crate) fn random_report(error: &DecodeError) -> AnalysisReport {
    let classification = Classification::random();
    log::warn!(
        "Could not decode image ({}), picked {} at random",
        error,
        classification.color_type
    );
    AnalysisReport::new(classification.color_type, classification.method)
}
