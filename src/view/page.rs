use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use utoipa::ToSchema;

use crate::view::chart::Plot;

/// Named UI regions. Identifiers match the element ids of the station's
/// HTML pages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum Region {
    #[serde(rename = "tempValue")]
    TempValue,
    #[serde(rename = "humValue")]
    HumValue,
    #[serde(rename = "pressValue")]
    PressValue,
    #[serde(rename = "windValue")]
    WindValue,
    #[serde(rename = "riskBadge")]
    RiskBadge,
    #[serde(rename = "riskExplanation")]
    RiskExplanation,
    #[serde(rename = "rainValue")]
    RainValue,
    #[serde(rename = "rainInterval")]
    RainInterval,
    #[serde(rename = "tempGraph")]
    TempGraph,
    #[serde(rename = "humGraph")]
    HumGraph,
    #[serde(rename = "pressGraph")]
    PressGraph,
    #[serde(rename = "grafico_rischio")]
    RiskTrendGraph,
    #[serde(rename = "meteoUpdateTime")]
    MeteoUpdateTime,
}

impl Region {
    pub const ALL: [Self; 13] = [
        Self::TempValue,
        Self::HumValue,
        Self::PressValue,
        Self::WindValue,
        Self::RiskBadge,
        Self::RiskExplanation,
        Self::RainValue,
        Self::RainInterval,
        Self::TempGraph,
        Self::HumGraph,
        Self::PressGraph,
        Self::RiskTrendGraph,
        Self::MeteoUpdateTime,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::TempValue => "tempValue",
            Self::HumValue => "humValue",
            Self::PressValue => "pressValue",
            Self::WindValue => "windValue",
            Self::RiskBadge => "riskBadge",
            Self::RiskExplanation => "riskExplanation",
            Self::RainValue => "rainValue",
            Self::RainInterval => "rainInterval",
            Self::TempGraph => "tempGraph",
            Self::HumGraph => "humGraph",
            Self::PressGraph => "pressGraph",
            Self::RiskTrendGraph => "grafico_rischio",
            Self::MeteoUpdateTime => "meteoUpdateTime",
        }
    }

    /// Exact, case-sensitive lookup by element id.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.id() == id)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// What a region currently shows.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionContent {
    /// Present on the page but never written yet
    Empty,
    Text {
        text: String,
    },
    Badge {
        text: String,
        class: String,
    },
    Chart {
        plot: Plot,
    },
    Selector {
        value: u32,
        options: Vec<u32>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RegionState {
    pub content: RegionContent,
    /// Time of the last write (null until first render)
    pub updated_at: Option<DateTime<Utc>>,
}

/// The page's region store.
///
/// Only regions given at construction exist; writes to any other region are
/// dropped. Cloning shares the same store.
#[derive(Debug, Clone)]
pub struct Page {
    regions: Arc<RwLock<BTreeMap<Region, RegionState>>>,
}

impl Page {
    #[must_use]
    pub fn new(regions: &[Region]) -> Self {
        let regions = regions
            .iter()
            .map(|r| {
                (
                    *r,
                    RegionState {
                        content: RegionContent::Empty,
                        updated_at: None,
                    },
                )
            })
            .collect();

        Self {
            regions: Arc::new(RwLock::new(regions)),
        }
    }

    #[must_use]
    pub fn contains(&self, region: Region) -> bool {
        self.regions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&region)
    }

    #[must_use]
    pub fn get(&self, region: Region) -> Option<RegionState> {
        self.regions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&region)
            .cloned()
    }

    /// Copy of every present region, keyed by element id.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<Region, RegionState> {
        self.regions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the content of `region`. Returns false if the region is absent.
    pub fn set(&self, region: Region, content: RegionContent) -> bool {
        let mut regions = self
            .regions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        match regions.get_mut(&region) {
            Some(state) => {
                state.content = content;
                state.updated_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_ids_round_trip_and_match_serde() {
        for region in Region::ALL {
            assert_eq!(Region::from_id(region.id()), Some(region));
            assert_eq!(
                serde_json::to_value(region).unwrap(),
                serde_json::Value::String(region.id().to_string())
            );
        }
        assert_eq!(Region::from_id("TEMPVALUE"), None);
    }

    #[test]
    fn writes_to_absent_regions_are_dropped() {
        let page = Page::new(&[Region::RainValue]);

        assert!(!page.set(
            Region::TempValue,
            RegionContent::Text {
                text: "18 °C".to_string()
            }
        ));
        assert!(!page.contains(Region::TempValue));
        assert_eq!(page.snapshot().len(), 1);
    }

    #[test]
    fn set_stamps_update_time() {
        let page = Page::new(&[Region::RainValue]);
        assert_eq!(page.get(Region::RainValue).unwrap().updated_at, None);

        assert!(page.set(
            Region::RainValue,
            RegionContent::Text {
                text: "1.0 mm".to_string()
            }
        ));
        let state = page.get(Region::RainValue).unwrap();
        assert!(state.updated_at.is_some());
        assert_eq!(
            state.content,
            RegionContent::Text {
                text: "1.0 mm".to_string()
            }
        );
    }

    #[test]
    fn clones_share_the_store() {
        let page = Page::new(&[Region::MeteoUpdateTime]);
        let other = page.clone();
        other.set(
            Region::MeteoUpdateTime,
            RegionContent::Text {
                text: "x".to_string(),
            },
        );
        assert!(page.get(Region::MeteoUpdateTime).unwrap().updated_at.is_some());
    }
}
