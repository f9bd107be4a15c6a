mod recipe;
mod source;

pub use recipe::{DensityEntry, ProfileEntry, ProjectionEntry, RecipeDocument, TargetEntry};
pub use source::{ProjectionSource, RecipeArchive, RecipeFile, RecipeText, open_recipe, recipe_from_archive_bytes};

#[cfg(feature = "download")]
pub use source::{RecipeUrl, download_recipe};
