use crate::core::config::{CutPoint, RegionThresholds};
use crate::core::histogram::{ColorHistogram, Rgb};
use crate::core::region::Region;
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Tag reported for a region with no pixels to sample.
pub const UNKNOWN_COLOR: &str = "unknown";

/// Warmth beyond which skin reads as warm (or, negated, cool).
pub const UNDERTONE_WARMTH: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    Face,
    Hair,
    Eyes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneCategory {
    Dark,
    Medium,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contrast {
    Low,
    Medium,
    High,
}

impl From<ToneCategory> for Contrast {
    fn from(category: ToneCategory) -> Self {
        match category {
            ToneCategory::Dark => Contrast::Low,
            ToneCategory::Medium => Contrast::Medium,
            ToneCategory::Light => Contrast::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Undertone {
    Warm,
    Neutral,
    Cool,
}

impl Undertone {
    pub fn from_warmth(warmth: f64) -> Self {
        if warmth > UNDERTONE_WARMTH {
            Undertone::Warm
        } else if warmth < -UNDERTONE_WARMTH {
            Undertone::Cool
        } else {
            Undertone::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionFeatures {
    pub brightness: f64,
    /// Red minus blue; positive is warm.
    pub warmth: f64,
    pub saturation: f64,
    pub category: ToneCategory,
    pub specific_color: String,
}

impl RegionFeatures {
    /// Neutral stand-in for a region that had nothing to sample.
    pub fn neutral(thresholds: &RegionThresholds) -> Self {
        Self {
            brightness: thresholds.default_brightness,
            warmth: 0.0,
            saturation: 0.0,
            category: ToneCategory::Medium,
            specific_color: UNKNOWN_COLOR.to_string(),
        }
    }

    pub fn contrast(&self) -> Contrast {
        self.category.into()
    }

    pub fn undertone(&self) -> Undertone {
        Undertone::from_warmth(self.warmth)
    }

    pub fn is_unknown(&self) -> bool {
        self.specific_color == UNKNOWN_COLOR
    }
}

/// Summarize the colors of `region` into brightness, warmth, saturation and tags.
pub fn summarize(
    image: &RgbImage,
    region: Region,
    kind: RegionKind,
    thresholds: &RegionThresholds,
) -> RegionFeatures {
    let histogram = ColorHistogram::from_region(image, region, thresholds.max_colors);
    let dominant = histogram.dominant_colors(thresholds.min_count, thresholds.top_k);

    if dominant.is_empty() {
        log::debug!("{:?} region {:?} is empty, using neutral features", kind, region);
        return RegionFeatures::neutral(thresholds);
    }

    let (brightness, warmth, saturation) = color_stats(&dominant);
    let category = categorize(brightness, thresholds);
    let specific_color = specific_color(kind, category, brightness, warmth).to_string();

    log::debug!(
        "{:?}: {} dominant of {} colors, brightness {:.1}, warmth {:.1}, {}",
        kind,
        dominant.len(),
        histogram.distinct_colors(),
        brightness,
        warmth,
        specific_color
    );

    RegionFeatures {
        brightness,
        warmth,
        saturation,
        category,
        specific_color,
    }
}

/// Mean brightness, warmth and saturation over `colors` (unweighted).
fn color_stats(colors: &[Rgb]) -> (f64, f64, f64) {
    let n = colors.len() as f64;
    let (mut brightness, mut warmth, mut saturation) = (0.0, 0.0, 0.0);

    for &[r, g, b] in colors {
        let (r, g, b) = (r as f64, g as f64, b as f64);
        brightness += (r + g + b) / 3.0;
        warmth += r - b;
        saturation += r.max(g).max(b) - r.min(g).min(b);
    }

    (brightness / n, warmth / n, saturation / n)
}

pub fn categorize(brightness: f64, thresholds: &RegionThresholds) -> ToneCategory {
    let (dark, light) = match thresholds.cut {
        CutPoint::StartsBrighter => (
            brightness < thresholds.dark_below,
            brightness >= thresholds.light_from,
        ),
        CutPoint::StaysDarker => (
            brightness <= thresholds.dark_below,
            brightness > thresholds.light_from,
        ),
    };

    if dark {
        ToneCategory::Dark
    } else if light {
        ToneCategory::Light
    } else {
        ToneCategory::Medium
    }
}

/// Finer color tag used by the keyword rules of the classifier.
pub fn specific_color(
    kind: RegionKind,
    category: ToneCategory,
    brightness: f64,
    warmth: f64,
) -> &'static str {
    match kind {
        RegionKind::Face => skin_tag(category, Undertone::from_warmth(warmth)),
        RegionKind::Hair => hair_tag(category, brightness, warmth),
        RegionKind::Eyes => eye_tag(category, brightness, warmth),
    }
}

fn skin_tag(category: ToneCategory, undertone: Undertone) -> &'static str {
    match (category, undertone) {
        (ToneCategory::Light, Undertone::Warm) => "fair_warm",
        (ToneCategory::Light, Undertone::Neutral) => "fair_neutral",
        (ToneCategory::Light, Undertone::Cool) => "fair_cool",
        (ToneCategory::Medium, Undertone::Warm) => "medium_warm",
        (ToneCategory::Medium, Undertone::Neutral) => "medium_neutral",
        (ToneCategory::Medium, Undertone::Cool) => "medium_cool",
        (ToneCategory::Dark, Undertone::Warm) => "deep_warm",
        (ToneCategory::Dark, Undertone::Neutral) => "deep_neutral",
        (ToneCategory::Dark, Undertone::Cool) => "deep_cool",
    }
}

fn hair_tag(category: ToneCategory, brightness: f64, warmth: f64) -> &'static str {
    match category {
        ToneCategory::Dark if brightness < 60.0 => {
            if warmth > 10.0 {
                "dark_brown"
            } else {
                "black"
            }
        }
        ToneCategory::Dark => {
            if warmth > 10.0 {
                "chestnut_brown"
            } else if warmth < -5.0 {
                "ash_brown"
            } else {
                "neutral_brown"
            }
        }
        ToneCategory::Medium => {
            if warmth > 15.0 {
                "auburn"
            } else if warmth > 5.0 {
                "golden_brown"
            } else if warmth < -5.0 {
                "ash_brown"
            } else {
                "light_brown"
            }
        }
        ToneCategory::Light => {
            if brightness >= 190.0 && warmth <= 5.0 {
                "platinum_blonde"
            } else if warmth > 10.0 {
                "golden_blonde"
            } else if warmth < -5.0 {
                "ash_blonde"
            } else {
                "neutral_blonde"
            }
        }
    }
}

fn eye_tag(category: ToneCategory, brightness: f64, warmth: f64) -> &'static str {
    match category {
        ToneCategory::Dark if brightness < 70.0 => {
            if warmth > 10.0 {
                "dark_brown"
            } else {
                "black_brown"
            }
        }
        ToneCategory::Dark => {
            if warmth > 10.0 {
                "brown"
            } else {
                "cool_brown"
            }
        }
        ToneCategory::Medium => {
            if warmth > 15.0 {
                "amber"
            } else if warmth > 0.0 {
                "hazel"
            } else if warmth < -8.0 {
                "blue_gray"
            } else {
                "green"
            }
        }
        ToneCategory::Light => {
            if warmth > 5.0 {
                "golden_green"
            } else if warmth < -5.0 {
                "light_blue"
            } else {
                "gray"
            }
        }
    }
}
