use serde::{Deserialize, Serialize};

/// One weighted reference to a named layer profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileFraction {
    pub name: String,
    pub fraction: f64,
}

/// Ordered list of (profile, fraction) pairs. Fractions need not sum to 1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MixingRecipe(Vec<ProfileFraction>);

impl MixingRecipe {
    pub fn new(entries: Vec<ProfileFraction>) -> Self { Self(entries) }

    /// Convenience constructor from `(name, fraction)` pairs.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Self {
        Self(pairs.into_iter().map(|(name, fraction)| ProfileFraction { name: name.into(), fraction }).collect())
    }

    #[inline] pub fn len(&self) -> usize { self.0.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }

    #[inline] pub fn iter(&self) -> impl Iterator<Item = &ProfileFraction> + '_ { self.0.iter() }
}
