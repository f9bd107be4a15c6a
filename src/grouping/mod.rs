mod cache;
mod grouping;
mod label;
mod partition;
mod spec;

pub use cache::GroupingCache;
pub use grouping::{Grouping, group};
pub use label::{Attribute, Label, LabelTag, LabelTemplate};
pub use spec::{GroupingKind, GroupingSpec, LayerHandling};
