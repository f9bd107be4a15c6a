mod profiles;
mod recipe;

pub use profiles::{LayerProfile, LayerProfiles};
pub use recipe::{MixingRecipe, ProfileFraction};
