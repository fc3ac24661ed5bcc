use crate::core::catalog::ColorType;
use crate::core::classifier::ClassificationMethod;
use crate::core::decode::{self, DecodeError};
use crate::services::analysis::{AnalysisReport, ColorAnalysisService, random_report};
use image::RgbImage;
use std::future::Future;
use thiserror::Error;

pub const VISION_PROMPT: &str = "\
Analyze this person's color characteristics for personal color analysis.
Look at their skin tone, hair color, and eye color.

Based on traditional color analysis principles:
- Light skin + Light hair + Warm undertones = Spring (Bright Spring or Warm Spring)
- Light skin + Light hair + Cool undertones = Summer (Cool Summer or Neutral Summer)
- Medium skin + Medium hair + Warm undertones = Autumn (Warm Autumn or Deep Autumn)
- Dark skin + Dark hair + Cool undertones = Winter (Cool Winter or Neutral Winter)
- High contrast features = Winter
- Low contrast features = Summer

Respond with ONLY one of these exact color types:
- cool_winter
- neutral_winter
- bright_spring
- warm_spring
- cool_summer
- neutral_summer
- warm_autumn
- deep_autumn
";

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Vision service unavailable: {0}")]
    Unavailable(String),

    #[error("Vision service rejected the request: {0}")]
    Rejected(String),
}

/// An external model that looks at a photo and answers in free text.
pub trait VisionClassifier {
    fn describe(
        &self,
        image: &RgbImage,
        prompt: &str,
    ) -> impl Future<Output = Result<String, VisionError>> + Send;
}

/// First catalog id mentioned in the answer, checked in catalog order.
pub fn parse_vision_response(text: &str) -> Option<ColorType> {
    let text = text.to_lowercase();
    ColorType::ALL
        .into_iter()
        .find(|color_type| text.contains(color_type.as_str()))
}

impl ColorAnalysisService {
    /// Ask the vision classifier first and use the local analysis when it
    /// errors, times out or answers with no known color type.
    pub async fn analyze_with_vision<V>(&self, bytes: &[u8], vision: &V) -> AnalysisReport
    where
        V: VisionClassifier + Sync,
    {
        self.vision_or_local(decode::decode_bytes(bytes), vision).await
    }

    /// Same as [`Self::analyze_with_vision`] for a data URL (or bare base64) payload.
    pub async fn analyze_payload_with_vision<V>(
        &self,
        payload: &str,
        vision: &V,
    ) -> AnalysisReport
    where
        V: VisionClassifier + Sync,
    {
        self.vision_or_local(decode::decode_payload(payload), vision).await
    }

    async fn vision_or_local<V>(
        &self,
        decoded: Result<RgbImage, DecodeError>,
        vision: &V,
    ) -> AnalysisReport
    where
        V: VisionClassifier + Sync,
    {
        let image = match decoded {
            Ok(image) => image,
            Err(e) => return random_report(&e),
        };

        match self.ask_vision(&image, vision).await {
            Some(color_type) => {
                log::info!("Vision classifier picked {}", color_type);
                AnalysisReport::new(color_type, ClassificationMethod::Vision)
            }
            None => self.analyze_image(&image).into(),
        }
    }

    async fn ask_vision<V>(&self, image: &RgbImage, vision: &V) -> Option<ColorType>
    where
        V: VisionClassifier + Sync,
    {
        let timeout = self.config().vision.timeout();
        match tokio::time::timeout(timeout, vision.describe(image, VISION_PROMPT)).await {
            Ok(Ok(text)) => {
                let parsed = parse_vision_response(&text);
                if parsed.is_none() {
                    log::warn!("Vision answer names no color type: {:?}", text.trim());
                }
                parsed
            }
            Ok(Err(e)) => {
                log::warn!("Vision classifier failed: {}", e);
                None
            }
            Err(_) => {
                log::warn!("Vision classifier timed out after {:?}", timeout);
                None
            }
        }
    }
}
