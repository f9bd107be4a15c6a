#![doc = "projflow public API"]
mod common;
mod dataset;
mod error;
mod session;

pub mod config;
pub mod flow;
pub mod grouping;
pub mod hierarchy;
pub mod profile;
pub mod record;
pub mod source;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use dataset::Dataset;

#[doc(inline)]
pub use session::Session;

#[doc(inline)]
pub use config::{ColorConfig, Settings};

#[doc(inline)]
pub use flow::{Color, ColorLookup, FlowEdge, FlowGraph, Palette, Uniform};

#[doc(inline)]
pub use grouping::{Grouping, GroupingKind, GroupingSpec, Label, LabelTag, LayerHandling};

#[doc(inline)]
pub use hierarchy::{FlowMatrix, Hierarchy};

#[doc(inline)]
pub use source::{ProjectionSource, open_recipe};

#[cfg(feature = "download")]
#[doc(inline)]
pub use source::download_recipe;
