mod color;
mod graph;

pub use color::{Color, ColorLookup, DEFAULT_COLOR_KEY, Palette, Uniform};
pub use graph::{EDGE_OPACITY, FlowEdge, FlowGraph};
