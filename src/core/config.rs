use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which band a brightness sitting exactly on a cut point belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutPoint {
    /// `dark_below` and `light_from` each open the brighter band.
    #[default]
    StartsBrighter,
    /// A value on a cut point stays in the darker band.
    StaysDarker,
}

/// Sampling and discretization settings for one region type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionThresholds {
    /// Maximum number of distinct colors tracked in the histogram.
    pub max_colors: usize,
    /// A color is dominant when it occurs more than this many times.
    pub min_count: u32,
    /// Number of most frequent colors used when nothing clears `min_count`.
    pub top_k: usize,
    /// Brightness below this is "dark".
    pub dark_below: f64,
    /// Brightness at or above this is "light".
    pub light_from: f64,
    /// Brightness reported for an empty region.
    pub default_brightness: f64,
    #[serde(default)]
    pub cut: CutPoint,
}

impl RegionThresholds {
    pub fn face() -> Self {
        Self {
            max_colors: 2000,
            min_count: 100,
            top_k: 10,
            dark_below: 100.0,
            light_from: 150.0,
            default_brightness: 120.0,
            cut: CutPoint::StaysDarker,
        }
    }

    pub fn hair() -> Self {
        Self {
            max_colors: 1000,
            min_count: 50,
            top_k: 10,
            dark_below: 90.0,
            light_from: 130.0,
            default_brightness: 80.0,
            cut: CutPoint::StartsBrighter,
        }
    }

    pub fn eyes() -> Self {
        Self {
            max_colors: 500,
            min_count: 20,
            top_k: 8,
            dark_below: 100.0,
            light_from: 140.0,
            default_brightness: 80.0,
            cut: CutPoint::StartsBrighter,
        }
    }
}

/// Partial region section as it may appear in a config file.
#[derive(Debug, Default, Deserialize)]
struct RegionOverrides {
    max_colors: Option<usize>,
    min_count: Option<u32>,
    top_k: Option<usize>,
    dark_below: Option<f64>,
    light_from: Option<f64>,
    default_brightness: Option<f64>,
    cut: Option<CutPoint>,
}

impl RegionOverrides {
    fn apply(self, base: RegionThresholds) -> RegionThresholds {
        RegionThresholds {
            max_colors: self.max_colors.unwrap_or(base.max_colors),
            min_count: self.min_count.unwrap_or(base.min_count),
            top_k: self.top_k.unwrap_or(base.top_k),
            dark_below: self.dark_below.unwrap_or(base.dark_below),
            light_from: self.light_from.unwrap_or(base.light_from),
            default_brightness: self.default_brightness.unwrap_or(base.default_brightness),
            cut: self.cut.unwrap_or(base.cut),
        }
    }
}

fn face_thresholds<'de, D: Deserializer<'de>>(d: D) -> Result<RegionThresholds, D::Error> {
    Ok(RegionOverrides::deserialize(d)?.apply(RegionThresholds::face()))
}

fn hair_thresholds<'de, D: Deserializer<'de>>(d: D) -> Result<RegionThresholds, D::Error> {
    Ok(RegionOverrides::deserialize(d)?.apply(RegionThresholds::hair()))
}

fn eyes_thresholds<'de, D: Deserializer<'de>>(d: D) -> Result<RegionThresholds, D::Error> {
    Ok(RegionOverrides::deserialize(d)?.apply(RegionThresholds::eyes()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Winning scores below this fall through to the fallback table.
    pub min_confidence: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { min_confidence: 3 }
    }
}

/// Brightness bands of the fallback table, brightest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub bright_above: f64,
    pub light_above: f64,
    pub medium_above: f64,
    /// Skin warmth above this picks the warm side of a band.
    pub warm_above: f64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            bright_above: 140.0,
            light_above: 110.0,
            medium_above: 80.0,
            warm_above: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Upper bound on one external vision call.
    pub timeout_ms: u64,
}

impl VisionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self { timeout_ms: 30_000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    #[serde(deserialize_with = "face_thresholds")]
    pub face: RegionThresholds,
    #[serde(deserialize_with = "hair_thresholds")]
    pub hair: RegionThresholds,
    #[serde(deserialize_with = "eyes_thresholds")]
    pub eyes: RegionThresholds,
    pub scoring: ScoringConfig,
    pub fallback: FallbackConfig,
    pub vision: VisionConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            face: RegionThresholds::face(),
            hair: RegionThresholds::hair(),
            eyes: RegionThresholds::eyes(),
            scoring: ScoringConfig::default(),
            fallback: FallbackConfig::default(),
            vision: VisionConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();

        assert_eq!(config.face.min_count, 100);
        assert_eq!(config.hair.min_count, 50);
        assert_eq!(config.eyes.min_count, 20);
        assert_eq!(config.face.top_k, 10);
        assert_eq!(config.eyes.top_k, 8);
        assert_eq!(config.scoring.min_confidence, 3);
        assert_eq!(config.vision.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AnalysisConfig::from_json(
            r#"{ "scoring": { "min_confidence": 5 }, "vision": { "timeout_ms": 2000 } }"#,
        )
        .unwrap();

        assert_eq!(config.scoring.min_confidence, 5);
        assert_eq!(config.vision.timeout(), Duration::from_secs(2));
        assert_eq!(config.face, RegionThresholds::face());
        assert_eq!(config.fallback, FallbackConfig::default());
    }

    #[test]
    fn test_partial_region_section_keeps_region_defaults() {
        let config = AnalysisConfig::from_json(
            r#"{ "hair": { "dark_below": 75 }, "face": { "min_count": 40 } }"#,
        )
        .unwrap();

        assert_eq!(config.hair.dark_below, 75.0);
        assert_eq!(config.hair.light_from, 130.0);
        assert_eq!(config.hair.max_colors, 1000);
        assert_eq!(config.hair.cut, CutPoint::StartsBrighter);

        assert_eq!(config.face.min_count, 40);
        assert_eq!(config.face.dark_below, 100.0);
        assert_eq!(config.face.cut, CutPoint::StaysDarker);

        assert_eq!(config.eyes, RegionThresholds::eyes());
    }

    #[test]
    fn test_cut_point_from_json() {
        let config =
            AnalysisConfig::from_json(r#"{ "face": { "cut": "starts_brighter" } }"#).unwrap();
        assert_eq!(config.face.cut, CutPoint::StartsBrighter);

        let result = AnalysisConfig::from_json(r#"{ "face": { "cut": "sideways" } }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        let mut config = AnalysisConfig::default();
        config.hair.dark_below = 75.0;
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = AnalysisConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_json() {
        let result = AnalysisConfig::from_json("{ \"scoring\": 3 }");
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let result = AnalysisConfig::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
