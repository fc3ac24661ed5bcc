use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown color type: {id}")]
pub struct UnknownColorType {
    pub id: String,
}

/// The eight seasonal color types. Declaration order is the catalog order and
/// doubles as the tie-break priority when two types score the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorType {
    CoolWinter,
    NeutralWinter,
    BrightSpring,
    WarmSpring,
    CoolSummer,
    NeutralSummer,
    WarmAutumn,
    DeepAutumn,
}

impl ColorType {
    pub const ALL: [ColorType; 8] = [
        ColorType::CoolWinter,
        ColorType::NeutralWinter,
        ColorType::BrightSpring,
        ColorType::WarmSpring,
        ColorType::CoolSummer,
        ColorType::NeutralSummer,
        ColorType::WarmAutumn,
        ColorType::DeepAutumn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorType::CoolWinter => "cool_winter",
            ColorType::NeutralWinter => "neutral_winter",
            ColorType::BrightSpring => "bright_spring",
            ColorType::WarmSpring => "warm_spring",
            ColorType::CoolSummer => "cool_summer",
            ColorType::NeutralSummer => "neutral_summer",
            ColorType::WarmAutumn => "warm_autumn",
            ColorType::DeepAutumn => "deep_autumn",
        }
    }

    /// Position in the catalog (and in every score vector).
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_warm(&self) -> bool {
        matches!(
            self,
            ColorType::BrightSpring
                | ColorType::WarmSpring
                | ColorType::WarmAutumn
                | ColorType::DeepAutumn
        )
    }
}

impl fmt::Display for ColorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ColorType {
    type Err = UnknownColorType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ColorType::ALL
            .into_iter()
            .find(|color_type| color_type.as_str() == needle)
            .ok_or_else(|| UnknownColorType { id: s.to_string() })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Archetype {
    pub id: ColorType,
    pub name: &'static str,
    pub description: &'static str,
    pub characteristics: &'static str,
    pub clothing: &'static [&'static str],
    pub makeup: &'static [&'static str],
    pub avoid: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct FaceAnalysis {
    pub complexion: &'static str,
    pub eyes: &'static str,
    pub hair: &'static str,
    pub features: &'static str,
}

static ARCHETYPES: [Archetype; 8] = [
    Archetype {
        id: ColorType::CoolWinter,
        name: "Cool Winter",
        description: "You have a cool, bright complexion with blue undertones. Your features are striking and high contrast.",
        characteristics: "High contrast, cool undertones, bright eyes",
        clothing: &["Deep jewel tones", "Pure white", "Navy blue", "Hot pink", "Emerald green"],
        makeup: &["Cool-toned lipsticks", "Silver eyeshadow", "Cool pink blushes", "Navy eyeliner"],
        avoid: &["Warm oranges", "Yellow-greens", "Golden browns"],
    },
    Archetype {
        id: ColorType::NeutralWinter,
        name: "Neutral Winter",
        description: "You have a balanced cool-warm complexion with medium contrast. Your features are versatile and adaptable.",
        characteristics: "Medium contrast, neutral undertones, balanced features",
        clothing: &["Charcoal gray", "Burgundy", "Teal", "Rose pink", "Navy"],
        makeup: &["Neutral lipsticks", "Rose gold eyeshadow", "Neutral blushes", "Brown eyeliner"],
        avoid: &["Very warm colors", "Very cool colors"],
    },
    Archetype {
        id: ColorType::BrightSpring,
        name: "Bright Spring",
        description: "You have a warm, bright complexion with golden undertones. Your features are vibrant and energetic.",
        characteristics: "High brightness, warm undertones, clear features",
        clothing: &["Coral", "Bright yellow", "Turquoise", "Hot pink", "Lime green"],
        makeup: &["Coral lipsticks", "Gold eyeshadow", "Peach blushes", "Bronze eyeliner"],
        avoid: &["Muted colors", "Very dark colors"],
    },
    Archetype {
        id: ColorType::WarmSpring,
        name: "Warm Spring",
        description: "You have a warm, golden complexion with clear features. Your coloring is fresh and natural.",
        characteristics: "Warm undertones, medium brightness, natural features",
        clothing: &["Coral", "Golden yellow", "Warm green", "Peach", "Camel"],
        makeup: &["Peach lipsticks", "Warm brown eyeshadow", "Coral blushes", "Bronze eyeliner"],
        avoid: &["Cool blues", "Gray", "Black"],
    },
    Archetype {
        id: ColorType::CoolSummer,
        name: "Cool Summer",
        description: "You have a cool, soft complexion with blue undertones. Your features are gentle and refined.",
        characteristics: "Low contrast, cool undertones, soft features",
        clothing: &["Soft blue", "Lavender", "Rose pink", "Gray", "Mint green"],
        makeup: &["Soft pink lipsticks", "Cool taupe eyeshadow", "Cool pink blushes", "Gray eyeliner"],
        avoid: &["Bright colors", "Warm oranges", "Black"],
    },
    Archetype {
        id: ColorType::NeutralSummer,
        name: "Neutral Summer",
        description: "You have a balanced soft complexion with neutral undertones. Your features are harmonious and elegant.",
        characteristics: "Medium contrast, neutral undertones, balanced features",
        clothing: &["Soft gray", "Rose brown", "Sage green", "Dusty pink", "Taupe"],
        makeup: &["Neutral lipsticks", "Taupe eyeshadow", "Neutral blushes", "Brown eyeliner"],
        avoid: &["Very bright colors", "Very dark colors"],
    },
    Archetype {
        id: ColorType::WarmAutumn,
        name: "Warm Autumn",
        description: "You have a warm, rich complexion with golden undertones. Your features are deep and earthy.",
        characteristics: "Medium contrast, warm undertones, rich features",
        clothing: &["Rust", "Olive green", "Camel", "Terracotta", "Warm brown"],
        makeup: &["Terracotta lipsticks", "Warm brown eyeshadow", "Coral blushes", "Bronze eyeliner"],
        avoid: &["Cool blues", "Bright pinks", "Pure white"],
    },
    Archetype {
        id: ColorType::DeepAutumn,
        name: "Deep Autumn",
        description: "You have a deep, rich complexion with warm undertones. Your features are dramatic and intense.",
        characteristics: "High contrast, warm undertones, deep features",
        clothing: &["Deep burgundy", "Forest green", "Rich brown", "Deep orange", "Navy"],
        makeup: &["Deep burgundy lipsticks", "Rich brown eyeshadow", "Terracotta blushes", "Black eyeliner"],
        avoid: &["Light pastels", "Cool grays", "Bright yellows"],
    },
];

static FACE_ANALYSES: [FaceAnalysis; 8] = [
    FaceAnalysis {
        complexion: "bright and cool with blue undertones, high contrast",
        eyes: "striking and high contrast, often blue, gray, or dark brown",
        hair: "likely dark brown, black, or cool-toned with natural shine",
        features: "sharp and defined with clear facial structure",
    },
    FaceAnalysis {
        complexion: "balanced with neutral undertones, medium contrast",
        eyes: "versatile and adaptable, often hazel or medium brown",
        hair: "medium contrast with neutral tones, natural depth",
        features: "harmonious and balanced with elegant proportions",
    },
    FaceAnalysis {
        complexion: "warm and bright with golden undertones, clear glow",
        eyes: "vibrant and energetic, often bright blue, green, or amber",
        hair: "likely warm-toned with brightness, natural highlights",
        features: "clear and lively with animated expressions",
    },
    FaceAnalysis {
        complexion: "warm and golden with natural glow, fresh appearance",
        eyes: "warm and inviting, often golden brown, hazel, or warm green",
        hair: "warm-toned with natural highlights, golden or strawberry tones",
        features: "fresh and natural with approachable warmth",
    },
    FaceAnalysis {
        complexion: "soft and cool with blue undertones, gentle appearance",
        eyes: "gentle and refined, often soft blue, gray, or cool brown",
        hair: "likely cool-toned with softness, ash brown or cool blonde",
        features: "delicate and elegant with refined beauty",
    },
    FaceAnalysis {
        complexion: "balanced soft with neutral undertones, sophisticated glow",
        eyes: "harmonious and elegant, often medium brown or hazel",
        hair: "medium contrast with neutral tones, natural sophistication",
        features: "balanced and sophisticated with timeless beauty",
    },
    FaceAnalysis {
        complexion: "warm and rich with golden undertones, natural warmth",
        eyes: "deep and earthy, often warm brown, amber, or hazel",
        hair: "warm-toned with rich depth, auburn or golden brown",
        features: "rich and natural with earthy beauty",
    },
    FaceAnalysis {
        complexion: "deep and rich with warm undertones, dramatic contrast",
        eyes: "dramatic and intense, often dark brown or deep hazel",
        hair: "likely dark with warm undertones, rich chocolate or black",
        features: "dramatic and striking with powerful presence",
    },
];

/// Catalog record for a color type.
pub fn archetype(color_type: ColorType) -> &'static Archetype {
    let record = &ARCHETYPES[color_type.index()];
    debug_assert_eq!(record.id, color_type, "catalog out of order");
    record
}

pub fn face_analysis(color_type: ColorType) -> &'static FaceAnalysis {
    &FACE_ANALYSES[color_type.index()]
}

/// All archetypes in catalog order.
pub fn archetypes() -> &'static [Archetype] {
    &ARCHETYPES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_eight_entries_in_order() {
        assert_eq!(archetypes().len(), 8);
        for (record, color_type) in archetypes().iter().zip(ColorType::ALL) {
            assert_eq!(record.id, color_type);
        }
    }

    #[test]
    fn test_lookup_returns_matching_record() {
        for color_type in ColorType::ALL {
            let record = archetype(color_type);
            assert_eq!(record.id, color_type);
            assert!(!record.name.is_empty());
            assert!(!record.clothing.is_empty());
            assert!(!record.makeup.is_empty());
            assert!(!record.avoid.is_empty());
        }
        assert_eq!(archetype(ColorType::DeepAutumn).name, "Deep Autumn");
    }

    #[test]
    fn test_face_analysis_is_keyed_by_color_type() {
        assert!(face_analysis(ColorType::CoolSummer).hair.contains("ash brown"));
        assert!(face_analysis(ColorType::DeepAutumn).complexion.starts_with("deep and rich"));
    }

    #[test]
    fn test_parse_known_and_unknown_ids() {
        assert_eq!("cool_winter".parse::<ColorType>(), Ok(ColorType::CoolWinter));
        assert_eq!(" Warm_Autumn ".parse::<ColorType>(), Ok(ColorType::WarmAutumn));

        let err = "autumn_leaves".parse::<ColorType>().unwrap_err();
        assert_eq!(err.id, "autumn_leaves");
    }

    #[test]
    fn test_serializes_as_snake_case_id() {
        let json = serde_json::to_string(&ColorType::NeutralSummer).unwrap();
        assert_eq!(json, "\"neutral_summer\"");

        let record = serde_json::to_value(archetype(ColorType::BrightSpring)).unwrap();
        assert_eq!(record["id"], "bright_spring");
        assert_eq!(record["clothing"][0], "Coral");
    }

    #[test]
    fn test_warm_types() {
        let warm: Vec<_> = ColorType::ALL.into_iter().filter(|c| c.is_warm()).collect();
        assert_eq!(
            warm,
            vec![
                ColorType::BrightSpring,
                ColorType::WarmSpring,
                ColorType::WarmAutumn,
                ColorType::DeepAutumn
            ]
        );
    }
}
