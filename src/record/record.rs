use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Target hemisphere relative to the source population.
/// Recipes use "ipsi" and "contra"; any other value is carried through as is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Hemisphere {
    Ipsi,
    Contra,
    Other(Arc<str>),
}

impl Hemisphere {
    pub fn to_str(&self) -> &str {
        match self {
            Hemisphere::Ipsi => "ipsi",
            Hemisphere::Contra => "contra",
            Hemisphere::Other(name) => name,
        }
    }
}

impl From<&str> for Hemisphere {
    fn from(s: &str) -> Self {
        match s {
            "ipsi" => Hemisphere::Ipsi,
            "contra" => Hemisphere::Contra,
            other => Hemisphere::Other(Arc::from(other)),
        }
    }
}

impl From<String> for Hemisphere {
    fn from(s: String) -> Self { Hemisphere::from(s.as_str()) }
}

impl From<Hemisphere> for String {
    fn from(hemi: Hemisphere) -> Self { hemi.to_str().to_string() }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.to_str()) }
}

/// One (source, hemisphere, target layer) observation with a scalar density.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub region: Arc<str>,       // Source region, e.g. "MOp"
    pub class: Arc<str>,        // Projection class, e.g. "5it"
    pub hemisphere: Hemisphere,
    pub layer: Arc<str>,        // Target layer label, e.g. "l2,l3"
    pub density: f64,
}

impl RawRecord {
    pub fn new(
        region: impl Into<Arc<str>>,
        class: impl Into<Arc<str>>,
        hemisphere: impl Into<Hemisphere>,
        layer: impl Into<Arc<str>>,
        density: f64,
    ) -> Self {
        Self { region: region.into(), class: class.into(), hemisphere: hemisphere.into(), layer: layer.into(), density }
    }
}
