use crate::core::catalog::ColorType;
use crate::core::config::{AnalysisConfig, FallbackConfig};
use crate::core::features::RegionFeatures;
use crate::core::rules::{Observation, RULES};
use rand::Rng;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Accumulated points per color type, indexed in catalog order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreVector {
    scores: [u32; 8],
}

impl ScoreVector {
    pub fn add(&mut self, color_type: ColorType, points: u32) {
        self.scores[color_type.index()] += points;
    }

    pub fn get(&self, color_type: ColorType) -> u32 {
        self.scores[color_type.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColorType, u32)> + '_ {
        ColorType::ALL.into_iter().map(|color_type| (color_type, self.get(color_type)))
    }

    /// Highest score; on ties the type earliest in catalog order wins.
    pub fn best(&self) -> (ColorType, u32) {
        let mut best = (ColorType::ALL[0], self.scores[0]);
        for (color_type, score) in self.iter().skip(1) {
            if score > best.1 {
                best = (color_type, score);
            }
        }
        best
    }
}

impl Serialize for ScoreVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.scores.len()))?;
        for (color_type, score) in self.iter() {
            map.serialize_entry(color_type.as_str(), &score)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMethod {
    /// Highest rule score cleared the confidence threshold.
    Scoring,
    /// Brightness/warmth table after a low-confidence score.
    Fallback,
    /// Uniform pick for input that could not be analyzed.
    Random,
    /// Answer taken from an external vision classifier.
    Vision,
}

#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub color_type: ColorType,
    pub method: ClassificationMethod,
    pub scores: ScoreVector,
    /// Names of the rules that fired, in evaluation order.
    pub matched_rules: Vec<&'static str>,
}

/// Run every scoring rule against the three region summaries.
pub fn score(
    skin: &RegionFeatures,
    hair: &RegionFeatures,
    eyes: &RegionFeatures,
) -> (ScoreVector, Vec<&'static str>) {
    let observation = Observation { skin, hair, eyes };
    let mut scores = ScoreVector::default();
    let mut matched = Vec::new();

    for rule in RULES {
        if rule.apply(&observation, &mut scores) {
            matched.push(rule.name);
        }
    }

    (scores, matched)
}

/// Classify from the skin, hair and eye summaries. Pure and deterministic.
pub fn classify(
    skin: &RegionFeatures,
    hair: &RegionFeatures,
    eyes: &RegionFeatures,
    config: &AnalysisConfig,
) -> Classification {
    let (scores, matched_rules) = score(skin, hair, eyes);
    let (best, best_score) = scores.best();

    let (color_type, method) = if best_score >= config.scoring.min_confidence {
        (best, ClassificationMethod::Scoring)
    } else {
        let color_type = fallback(skin.brightness, skin.warmth, &config.fallback);
        log::debug!(
            "Best score {} for {} is below {}, fallback picked {}",
            best_score,
            best,
            config.scoring.min_confidence,
            color_type
        );
        (color_type, ClassificationMethod::Fallback)
    };

    Classification {
        color_type,
        method,
        scores,
        matched_rules,
    }
}

/// Deterministic table on skin brightness band and warmth.
pub fn fallback(brightness: f64, warmth: f64, bands: &FallbackConfig) -> ColorType {
    let warm = warmth > bands.warm_above;

    if brightness > bands.bright_above {
        if warm { ColorType::BrightSpring } else { ColorType::CoolSummer }
    } else if brightness > bands.light_above {
        if warm { ColorType::WarmSpring } else { ColorType::NeutralSummer }
    } else if brightness > bands.medium_above {
        if warm { ColorType::WarmAutumn } else { ColorType::NeutralWinter }
    } else if warm {
        ColorType::DeepAutumn
    } else {
        ColorType::CoolWinter
    }
}

/// Uniform pick over all eight types, for input that could not be analyzed at all.
pub fn random_color_type() -> ColorType {
    let index = rand::rng().random_range(0..ColorType::ALL.len());
    ColorType::ALL[index]
}

impl Classification {
    pub fn random() -> Self {
        Self {
            color_type: random_color_type(),
            method: ClassificationMethod::Random,
            scores: ScoreVector::default(),
            matched_rules: Vec::new(),
        }
    }
}
