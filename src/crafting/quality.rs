//! Item quality tiers.
//!
//! Each tier has a minimum score, stat and durability multipliers (in
//! percent) and the range of special effects a crafted item of that tier
//! carries. The table is an ascending threshold table over these tiers.

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;
use crate::outcome::ThresholdTable;

/// Crafted item quality, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemQuality {
    Poor,
    Common,
    Good,
    Superior,
    Exceptional,
    Masterwork,
}

impl ItemQuality {
    /// Only masterwork items may be given a custom name.
    #[must_use]
    pub fn allows_custom_name(self) -> bool {
        self == ItemQuality::Masterwork
    }
}

/// One quality tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityTierDef {
    pub quality: ItemQuality,
    pub min_score: i64,
    pub stat_multiplier_percent: u32,
    pub durability_multiplier_percent: u32,
    pub min_effects: u32,
    pub max_effects: u32,
}

impl QualityTierDef {
    #[must_use]
    pub const fn new(
        quality: ItemQuality,
        min_score: i64,
        stat_multiplier_percent: u32,
        durability_multiplier_percent: u32,
        min_effects: u32,
        max_effects: u32,
    ) -> Self {
        Self {
            quality,
            min_score,
            stat_multiplier_percent,
            durability_multiplier_percent,
            min_effects,
            max_effects,
        }
    }
}

/// Ascending table of quality tiers.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<QualityTierDef>")]
pub struct QualityTable {
    tiers: ThresholdTable<QualityTierDef>,
}

impl QualityTable {
    /// Build a table from tier definitions, ascending by `min_score`.
    ///
    /// Qualities must ascend strictly along the table so a higher score
    /// never yields a lower tier.
    pub fn new(tiers: Vec<QualityTierDef>) -> Result<Self, ConfigError> {
        for tier in &tiers {
            if tier.min_effects > tier.max_effects {
                return Err(ConfigError::invalid(
                    "quality_tiers",
                    format!("{:?} has min_effects above max_effects", tier.quality),
                ));
            }
        }
        if let Some(pair) = tiers.windows(2).find(|w| w[1].quality <= w[0].quality) {
            return Err(ConfigError::invalid(
                "quality_tiers",
                format!("{:?} follows {:?}; qualities must ascend", pair[1].quality, pair[0].quality),
            ));
        }
        let tiers = ThresholdTable::new(tiers.into_iter().map(|t| (t.min_score, t)))?;
        Ok(Self { tiers })
    }

    /// Tier for a total crafting score.
    #[must_use]
    pub fn classify(&self, total_score: i64) -> &QualityTierDef {
        self.tiers.classify(total_score)
    }

    /// Definition of a quality level, if the table has it.
    #[must_use]
    pub fn tier(&self, quality: ItemQuality) -> Option<&QualityTierDef> {
        self.tiers
            .entries()
            .iter()
            .map(|e| &e.value)
            .find(|t| t.quality == quality)
    }

    /// Tiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &QualityTierDef> {
        self.tiers.entries().iter().map(|e| &e.value)
    }
}

impl TryFrom<Vec<QualityTierDef>> for QualityTable {
    type Error = ConfigError;

    fn try_from(tiers: Vec<QualityTierDef>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl Default for QualityTable {
    fn default() -> Self {
        let tiers = ThresholdTable::new(
            [
                QualityTierDef::new(ItemQuality::Poor, 0, 75, 75, 0, 0),
                QualityTierDef::new(ItemQuality::Common, 30, 100, 100, 0, 0),
                QualityTierDef::new(ItemQuality::Good, 45, 110, 110, 0, 0),
                QualityTierDef::new(ItemQuality::Superior, 60, 125, 125, 0, 1),
                QualityTierDef::new(ItemQuality::Exceptional, 85, 150, 150, 1, 2),
                QualityTierDef::new(ItemQuality::Masterwork, 100, 200, 200, 2, 3),
            ]
            .into_iter()
            .map(|t| (t.min_score, t)),
        );
        match tiers {
            Ok(tiers) => Self { tiers },
            Err(_) => unreachable!("default quality tiers are ascending"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = QualityTable::default();
        assert_eq!(table.classify(-5).quality, ItemQuality::Poor);
        assert_eq!(table.classify(44).quality, ItemQuality::Common);
        assert_eq!(table.classify(60).quality, ItemQuality::Superior);
        assert_eq!(table.classify(99).quality, ItemQuality::Exceptional);
        assert_eq!(table.classify(150).quality, ItemQuality::Masterwork);
        assert_eq!(table.iter().count(), 6);
    }

    #[test]
    fn test_two_tier_table() {
        let table = QualityTable::new(vec![
            QualityTierDef::new(ItemQuality::Superior, 60, 125, 125, 0, 1),
            QualityTierDef::new(ItemQuality::Exceptional, 85, 150, 150, 1, 2),
        ])
        .unwrap();
        assert_eq!(table.classify(70).quality, ItemQuality::Superior);
        assert_eq!(table.classify(85).quality, ItemQuality::Exceptional);
        // Below the lowest bound falls to the lowest tier
        assert_eq!(table.classify(10).quality, ItemQuality::Superior);
        assert!(table.tier(ItemQuality::Masterwork).is_none());
    }

    #[test]
    fn test_rejects_bad_effect_range() {
        let err = QualityTable::new(vec![QualityTierDef::new(ItemQuality::Good, 0, 100, 100, 3, 1)]);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_descending_quality() {
        let err = QualityTable::new(vec![
            QualityTierDef::new(ItemQuality::Masterwork, 0, 200, 200, 2, 3),
            QualityTierDef::new(ItemQuality::Poor, 50, 75, 75, 0, 0),
        ]);
        assert!(err.is_err());

        let repeated = QualityTable::new(vec![
            QualityTierDef::new(ItemQuality::Good, 0, 110, 110, 0, 0),
            QualityTierDef::new(ItemQuality::Good, 40, 110, 110, 0, 0),
        ]);
        assert!(repeated.is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"[
            { "quality": "common", "min_score": 0, "stat_multiplier_percent": 100,
              "durability_multiplier_percent": 100, "min_effects": 0, "max_effects": 0 },
            { "quality": "masterwork", "min_score": 90, "stat_multiplier_percent": 200,
              "durability_multiplier_percent": 200, "min_effects": 2, "max_effects": 3 }
        ]"#;
        let table: QualityTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.classify(95).quality, ItemQuality::Masterwork);

        let unsorted = r#"[
            { "quality": "masterwork", "min_score": 90, "stat_multiplier_percent": 200,
              "durability_multiplier_percent": 200, "min_effects": 2, "max_effects": 3 },
            { "quality": "common", "min_score": 0, "stat_multiplier_percent": 100,
              "durability_multiplier_percent": 100, "min_effects": 0, "max_effects": 0 }
        ]"#;
        assert!(serde_json::from_str::<QualityTable>(unsorted).is_err());
    }

    #[test]
    fn test_custom_name_only_for_masterwork() {
        assert!(ItemQuality::Masterwork.allows_custom_name());
        assert!(!ItemQuality::Exceptional.allows_custom_name());
    }
}
