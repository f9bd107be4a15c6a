mod hierarchy;
mod matrix;

pub use hierarchy::{Hierarchy, Level};
pub use matrix::FlowMatrix;
