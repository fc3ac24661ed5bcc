use crate::core::catalog::ColorType;
use crate::core::classifier::ScoreVector;
use crate::core::features::{Contrast, RegionFeatures, ToneCategory, Undertone};

/// Skin brightness below this is the deep tier.
pub const DEEP_SKIN_BELOW: f64 = 110.0;
/// Skin brightness at or above this is the fair tier.
pub const FAIR_SKIN_FROM: f64 = 130.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinTier {
    Deep,
    Medium,
    Fair,
}

impl SkinTier {
    pub fn from_brightness(brightness: f64) -> Self {
        if brightness < DEEP_SKIN_BELOW {
            SkinTier::Deep
        } else if brightness < FAIR_SKIN_FROM {
            SkinTier::Medium
        } else {
            SkinTier::Fair
        }
    }
}

/// The three region summaries a rule looks at.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    pub skin: &'a RegionFeatures,
    pub hair: &'a RegionFeatures,
    pub eyes: &'a RegionFeatures,
}

impl Observation<'_> {
    pub fn skin_tier(&self) -> SkinTier {
        SkinTier::from_brightness(self.skin.brightness)
    }

    pub fn skin_undertone(&self) -> Undertone {
        self.skin.undertone()
    }

    fn skin_is(&self, tier: SkinTier, undertone: Undertone) -> bool {
        self.skin_tier() == tier && self.skin_undertone() == undertone
    }

    fn hair_has(&self, keyword: &str) -> bool {
        self.hair.specific_color.contains(keyword)
    }

    fn eyes_are(&self, category: ToneCategory, tags: &[&str]) -> bool {
        self.eyes.category == category && tags.contains(&self.eyes.specific_color.as_str())
    }
}

/// One additive scoring rule: when `applies` holds, every `(type, points)`
/// pair in `awards` is added to the score vector.
pub struct ScoringRule {
    pub name: &'static str,
    pub applies: fn(&Observation<'_>) -> bool,
    pub awards: &'static [(ColorType, u32)],
}

impl ScoringRule {
    /// Apply the rule, returning whether it fired.
    pub fn apply(&self, observation: &Observation<'_>, scores: &mut ScoreVector) -> bool {
        if !(self.applies)(observation) {
            return false;
        }
        for &(color_type, points) in self.awards {
            scores.add(color_type, points);
        }
        true
    }
}

impl std::fmt::Debug for ScoringRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringRule")
            .field("name", &self.name)
            .field("awards", &self.awards)
            .finish()
    }
}

pub static RULES: &[ScoringRule] = &[
    // Skin: brightness tier crossed with undertone
    ScoringRule {
        name: "fair_warm_skin",
        applies: |o| o.skin_is(SkinTier::Fair, Undertone::Warm),
        awards: &[(ColorType::BrightSpring, 3), (ColorType::WarmSpring, 2)],
    },
    ScoringRule {
        name: "fair_cool_skin",
        applies: |o| o.skin_is(SkinTier::Fair, Undertone::Cool),
        awards: &[(ColorType::CoolSummer, 3), (ColorType::CoolWinter, 2)],
    },
    ScoringRule {
        name: "fair_neutral_skin",
        applies: |o| o.skin_is(SkinTier::Fair, Undertone::Neutral),
        awards: &[(ColorType::NeutralSummer, 2)],
    },
    ScoringRule {
        name: "medium_warm_skin",
        applies: |o| o.skin_is(SkinTier::Medium, Undertone::Warm),
        awards: &[(ColorType::WarmSpring, 3), (ColorType::WarmAutumn, 2)],
    },
    ScoringRule {
        name: "medium_cool_skin",
        applies: |o| o.skin_is(SkinTier::Medium, Undertone::Cool),
        awards: &[(ColorType::CoolSummer, 2), (ColorType::CoolWinter, 2)],
    },
    ScoringRule {
        name: "medium_neutral_skin",
        applies: |o| o.skin_is(SkinTier::Medium, Undertone::Neutral),
        awards: &[(ColorType::NeutralSummer, 2), (ColorType::NeutralWinter, 2)],
    },
    ScoringRule {
        name: "deep_warm_skin",
        applies: |o| o.skin_is(SkinTier::Deep, Undertone::Warm),
        awards: &[(ColorType::DeepAutumn, 3), (ColorType::WarmAutumn, 2)],
    },
    ScoringRule {
        name: "deep_cool_skin",
        applies: |o| o.skin_is(SkinTier::Deep, Undertone::Cool),
        awards: &[(ColorType::CoolWinter, 3), (ColorType::NeutralWinter, 2)],
    },
    ScoringRule {
        name: "deep_neutral_skin",
        applies: |o| o.skin_is(SkinTier::Deep, Undertone::Neutral),
        awards: &[(ColorType::NeutralWinter, 2)],
    },
    // Hair: keyword matches on the color tag
    ScoringRule {
        name: "ash_hair",
        applies: |o| o.hair_has("ash"),
        awards: &[(ColorType::CoolSummer, 3), (ColorType::NeutralSummer, 2)],
    },
    ScoringRule {
        name: "platinum_hair",
        applies: |o| o.hair_has("platinum"),
        awards: &[(ColorType::CoolWinter, 2), (ColorType::CoolSummer, 2)],
    },
    ScoringRule {
        name: "golden_hair",
        applies: |o| o.hair_has("golden"),
        awards: &[(ColorType::WarmSpring, 3), (ColorType::BrightSpring, 2)],
    },
    ScoringRule {
        name: "red_brown_hair",
        applies: |o| o.hair_has("auburn") || o.hair_has("chestnut"),
        awards: &[(ColorType::WarmAutumn, 3)],
    },
    ScoringRule {
        name: "black_hair",
        applies: |o| o.hair.specific_color == "black",
        awards: &[(ColorType::CoolWinter, 3), (ColorType::NeutralWinter, 2)],
    },
    ScoringRule {
        name: "dark_warm_brown_hair",
        applies: |o| {
            o.hair.category == ToneCategory::Dark && o.hair_has("brown") && o.hair.warmth > 10.0
        },
        awards: &[(ColorType::DeepAutumn, 3)],
    },
    ScoringRule {
        name: "dark_neutral_hair",
        applies: |o| o.hair.category == ToneCategory::Dark && o.hair_has("neutral"),
        awards: &[(ColorType::NeutralWinter, 2)],
    },
    ScoringRule {
        name: "light_blonde_hair",
        applies: |o| o.hair.category == ToneCategory::Light && o.hair_has("blonde"),
        awards: &[(ColorType::BrightSpring, 2)],
    },
    // Eyes
    ScoringRule {
        name: "dark_warm_eyes",
        applies: |o| o.eyes_are(ToneCategory::Dark, &["dark_brown", "brown"]),
        awards: &[(ColorType::DeepAutumn, 2)],
    },
    ScoringRule {
        name: "dark_cool_eyes",
        applies: |o| o.eyes_are(ToneCategory::Dark, &["black_brown", "cool_brown"]),
        awards: &[(ColorType::CoolWinter, 2)],
    },
    ScoringRule {
        name: "warm_medium_eyes",
        applies: |o| o.eyes_are(ToneCategory::Medium, &["amber", "hazel"]),
        awards: &[(ColorType::WarmAutumn, 2)],
    },
    ScoringRule {
        name: "blue_gray_eyes",
        applies: |o| o.eyes_are(ToneCategory::Medium, &["blue_gray"]),
        awards: &[(ColorType::CoolSummer, 2)],
    },
    ScoringRule {
        name: "light_cool_eyes",
        applies: |o| o.eyes_are(ToneCategory::Light, &["light_blue", "gray"]),
        awards: &[(ColorType::CoolWinter, 2)],
    },
    ScoringRule {
        name: "light_warm_eyes",
        applies: |o| o.eyes_are(ToneCategory::Light, &["golden_green"]),
        awards: &[(ColorType::BrightSpring, 2)],
    },
    // Skin contrast
    ScoringRule {
        name: "high_contrast",
        applies: |o| o.skin.contrast() == Contrast::High,
        awards: &[(ColorType::CoolWinter, 2), (ColorType::BrightSpring, 2)],
    },
    ScoringRule {
        name: "low_contrast",
        applies: |o| o.skin.contrast() == Contrast::Low,
        awards: &[(ColorType::CoolSummer, 2)],
    },
];

/// Look up a rule by name.
pub fn rule(name: &str) -> Option<&'static ScoringRule> {
    RULES.iter().find(|rule| rule.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(brightness: f64, warmth: f64, category: ToneCategory, tag: &str) -> RegionFeatures {
        RegionFeatures {
            brightness,
            warmth,
            saturation: 0.0,
            category,
            specific_color: tag.to_string(),
        }
    }

    fn neutral() -> RegionFeatures {
        features(120.0, 0.0, ToneCategory::Medium, "unknown")
    }

    fn fires(name: &str, skin: &RegionFeatures, hair: &RegionFeatures, eyes: &RegionFeatures) -> bool {
        let observation = Observation { skin, hair, eyes };
        let rule = rule(name).unwrap();
        (rule.applies)(&observation)
    }

    #[test]
    fn test_rule_names_are_unique() {
        for (i, a) in RULES.iter().enumerate() {
            for b in &RULES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_rule_weights_are_small() {
        for rule in RULES {
            assert!(!rule.awards.is_empty() && rule.awards.len() <= 2, "{}", rule.name);
            for &(_, points) in rule.awards {
                assert!(points == 2 || points == 3, "{}", rule.name);
            }
        }
    }

    #[test]
    fn test_skin_tiers() {
        assert_eq!(SkinTier::from_brightness(109.9), SkinTier::Deep);
        assert_eq!(SkinTier::from_brightness(110.0), SkinTier::Medium);
        assert_eq!(SkinTier::from_brightness(129.9), SkinTier::Medium);
        assert_eq!(SkinTier::from_brightness(130.0), SkinTier::Fair);
    }

    #[test]
    fn test_skin_rules() {
        let n = neutral();
        let fair_cool = features(150.0, -36.0, ToneCategory::Light, "fair_cool");
        let deep_warm = features(76.0, 100.0, ToneCategory::Dark, "deep_warm");

        assert!(fires("fair_cool_skin", &fair_cool, &n, &n));
        assert!(!fires("fair_warm_skin", &fair_cool, &n, &n));
        assert!(fires("deep_warm_skin", &deep_warm, &n, &n));
        assert!(!fires("medium_warm_skin", &deep_warm, &n, &n));
        assert!(fires("medium_neutral_skin", &n, &n, &n));
    }

    #[test]
    fn test_ash_hair_matches_any_ash_tag() {
        let n = neutral();
        let ash_brown = features(100.0, -30.0, ToneCategory::Medium, "ash_brown");
        let ash_blonde = features(160.0, -10.0, ToneCategory::Light, "ash_blonde");
        let golden = features(100.0, 8.0, ToneCategory::Medium, "golden_brown");

        assert!(fires("ash_hair", &n, &ash_brown, &n));
        assert!(fires("ash_hair", &n, &ash_blonde, &n));
        assert!(!fires("ash_hair", &n, &golden, &n));
        assert!(fires("golden_hair", &n, &golden, &n));
    }

    #[test]
    fn test_dark_warm_brown_hair_needs_warmth() {
        let n = neutral();
        let warm = features(45.0, 30.0, ToneCategory::Dark, "dark_brown");
        let cool = features(75.0, 5.0, ToneCategory::Dark, "neutral_brown");

        assert!(fires("dark_warm_brown_hair", &n, &warm, &n));
        assert!(!fires("dark_warm_brown_hair", &n, &cool, &n));
        assert!(fires("dark_neutral_hair", &n, &cool, &n));
    }

    #[test]
    fn test_eye_rules_check_category_and_tag() {
        let n = neutral();
        let hazel = features(125.0, 5.0, ToneCategory::Medium, "hazel");
        let dark_brown = features(50.0, 40.0, ToneCategory::Dark, "dark_brown");

        assert!(fires("warm_medium_eyes", &n, &n, &hazel));
        assert!(fires("dark_warm_eyes", &n, &n, &dark_brown));
        assert!(!fires("dark_cool_eyes", &n, &n, &dark_brown));
    }

    #[test]
    fn test_contrast_rules() {
        let n = neutral();
        let bright = features(160.0, 0.0, ToneCategory::Light, "fair_neutral");
        let deep = features(80.0, 0.0, ToneCategory::Dark, "deep_neutral");

        assert!(fires("high_contrast", &bright, &n, &n));
        assert!(fires("low_contrast", &deep, &n, &n));
        assert!(!fires("high_contrast", &n, &n, &n));
        assert!(!fires("low_contrast", &n, &n, &n));
    }

    #[test]
    fn test_apply_adds_awards() {
        let n = neutral();
        let observation = Observation { skin: &n, hair: &n, eyes: &n };
        let mut scores = ScoreVector::default();

        assert!(rule("medium_neutral_skin").unwrap().apply(&observation, &mut scores));
        assert!(!rule("black_hair").unwrap().apply(&observation, &mut scores));

        assert_eq!(scores.get(ColorType::NeutralSummer), 2);
        assert_eq!(scores.get(ColorType::NeutralWinter), 2);
        assert_eq!(scores.get(ColorType::CoolWinter), 0);
    }
}
