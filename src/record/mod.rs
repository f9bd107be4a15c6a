mod extract;
mod record;

pub use extract::{ProjectionDescriptor, extract_projections, split_source_population, target_region_name};
pub use record::{Hemisphere, RawRecord};
