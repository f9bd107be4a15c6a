use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Whether the target layer is folded into a label or aggregated away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LayerHandling {
    WithoutLayers,
    WithLayers,
}

impl LayerHandling {
    pub const COUNT: usize = 2;

    pub fn to_str(&self) -> &'static str {
        match self {
            LayerHandling::WithoutLayers => "Without layers",
            LayerHandling::WithLayers => "With layers",
        }
    }

    pub fn order() -> [LayerHandling; Self::COUNT] {
        [LayerHandling::WithoutLayers, LayerHandling::WithLayers]
    }
}

impl FromStr for LayerHandling {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Without layers" => Ok(LayerHandling::WithoutLayers),
            "With layers" => Ok(LayerHandling::WithLayers),
            other => Err(Error::UnknownGroupingSpec(format!("layer handling '{other}'"))),
        }
    }
}

/// Record attribute a grouping level partitions by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroupingKind {
    AllTogether,        // Single group
    ByRegion,           // Source region
    ByProjectionClass,  // Projection class
    ByHemisphere,       // Target hemisphere
    NoGrouping,         // Full composite key
}

impl GroupingKind {
    pub const COUNT: usize = 5;

    pub fn to_str(&self) -> &'static str {
        match self {
            GroupingKind::AllTogether => "All together",
            GroupingKind::ByRegion => "By region",
            GroupingKind::ByProjectionClass => "By projection class",
            GroupingKind::ByHemisphere => "By hemisphere",
            GroupingKind::NoGrouping => "No grouping",
        }
    }

    pub fn order() -> [GroupingKind; Self::COUNT] {
        [
            GroupingKind::AllTogether,
            GroupingKind::ByRegion,
            GroupingKind::ByProjectionClass,
            GroupingKind::ByHemisphere,
            GroupingKind::NoGrouping,
        ]
    }
}

impl FromStr for GroupingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "All together" => Ok(GroupingKind::AllTogether),
            "By region" | "Region" => Ok(GroupingKind::ByRegion),
            "By projection class" | "Projection class" => Ok(GroupingKind::ByProjectionClass),
            "By hemisphere" | "Hemisphere" => Ok(GroupingKind::ByHemisphere),
            "No grouping" | "No groups" => Ok(GroupingKind::NoGrouping),
            other => Err(Error::UnknownGroupingSpec(format!("grouping kind '{other}'"))),
        }
    }
}

/// One level selection: a (layer handling, grouping kind) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupingSpec {
    pub layers: LayerHandling,
    pub kind: GroupingKind,
}

impl GroupingSpec {
    /// Number of precomputable groupings.
    pub const COUNT: usize = LayerHandling::COUNT * GroupingKind::COUNT;

    pub const fn new(layers: LayerHandling, kind: GroupingKind) -> Self { Self { layers, kind } }

    /// Every (layer handling, grouping kind) pair, in cache order.
    pub fn all() -> impl Iterator<Item = GroupingSpec> {
        LayerHandling::order().into_iter()
            .flat_map(|layers| GroupingKind::order().into_iter().map(move |kind| Self { layers, kind }))
    }

    /// Flat cache slot for this spec.
    #[inline]
    pub fn index(&self) -> usize { self.layers as usize * GroupingKind::COUNT + self.kind as usize }

    /// Parse a pair of selection strings, e.g. ("With layers", "By projection class").
    pub fn parse(layers: &str, kind: &str) -> Result<Self> {
        Ok(Self { layers: layers.parse()?, kind: kind.parse()? })
    }

    /// Parse a selection list, skipping levels whose grouping is "None".
    pub fn parse_selection<S: AsRef<str>>(pairs: &[(S, S)]) -> Result<Vec<Self>> {
        pairs.iter()
            .filter(|(_, kind)| kind.as_ref().trim() != "None")
            .map(|(layers, kind)| Self::parse(layers.as_ref(), kind.as_ref()))
            .collect()
    }
}

impl FromStr for GroupingSpec {
    type Err = Error;

    /// Accepts "LAYERS/GROUPING" or "LAYERS:GROUPING".
    fn from_str(s: &str) -> Result<Self> {
        let (layers, kind) = s.split_once(['/', ':'])
            .ok_or_else(|| Error::UnknownGroupingSpec(s.to_string()))?;
        Self::parse(layers, kind)
    }
}

impl fmt::Display for GroupingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.layers.to_str(), self.kind.to_str())
    }
}
