//! Label templates and tagged labels.
//!
//! Every grouping spec renders its labels through a fixed template. The rendered
//! text orders groups and keys color lookups; the tag carries the same
//! information in structured form so lookups never have to re-parse the text.

use std::{fmt, sync::Arc};

use crate::{grouping::{GroupingKind, GroupingSpec, LayerHandling}, record::{Hemisphere, RawRecord}};

/// Record attribute substituted into a label template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Region,
    Class,
    Hemisphere,
    Layer,
}

impl Attribute {
    /// Placeholder name used in templates, e.g. `{region}`.
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Region => "region",
            Attribute::Class => "class",
            Attribute::Hemisphere => "hemisphere",
            Attribute::Layer => "layer",
        }
    }

    fn value<'a>(&self, record: &'a RawRecord) -> &'a str {
        match self {
            Attribute::Region => &record.region,
            Attribute::Class => &record.class,
            Attribute::Hemisphere => record.hemisphere.to_str(),
            Attribute::Layer => &record.layer,
        }
    }
}

/// A format string and the ordered attributes substituted into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelTemplate {
    pub format: &'static str,
    pub attributes: &'static [Attribute],
}

impl LabelTemplate {
    /// Render this template for one record.
    pub fn render(&self, record: &RawRecord) -> String {
        let mut out = String::with_capacity(self.format.len() + 16);
        let mut rest = self.format;
        while let Some((head, tail)) = rest.split_once('{') {
            out.push_str(head);
            let (name, tail) = tail.split_once('}').unwrap_or((tail, ""));
            match self.attributes.iter().find(|attr| attr.name() == name) {
                Some(attr) => out.push_str(attr.value(record)),
                None => { out.push('{'); out.push_str(name); out.push('}'); }
            }
            rest = tail;
        }
        out.push_str(rest);
        out
    }

    /// Template for a grouping spec.
    #[inline]
    pub fn for_spec(spec: GroupingSpec) -> &'static LabelTemplate { &TEMPLATES[spec.index()] }
}

use Attribute::{Class as C, Hemisphere as H, Layer as L, Region as R};

/// Indexed by `GroupingSpec::index()`.
const TEMPLATES: [LabelTemplate; GroupingSpec::COUNT] = [
    // Without layers
    LabelTemplate { format: "ALL", attributes: &[] },
    LabelTemplate { format: "{region}", attributes: &[R] },
    LabelTemplate { format: "Via {class}", attributes: &[C] },
    LabelTemplate { format: "{hemisphere} hemisphere", attributes: &[H] },
    LabelTemplate { format: "{region} via {class} ({hemisphere})", attributes: &[R, C, H] },
    // With layers
    LabelTemplate { format: "ALL to layer {layer}", attributes: &[L] },
    LabelTemplate { format: "{region} to layer {layer}", attributes: &[R, L] },
    LabelTemplate { format: "Via {class} to layer {layer}", attributes: &[C, L] },
    LabelTemplate { format: "{hemisphere} hemisphere to layer {layer}", attributes: &[H, L] },
    LabelTemplate { format: "{region} via {class} ({hemisphere}) to layer {layer}", attributes: &[R, C, H, L] },
];

/// Structured form of a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LabelTag {
    All,
    RawRegion(Arc<str>),
    ViaClass(Arc<str>),
    Hemisphere(Hemisphere),
    Source { region: Arc<str>, class: Arc<str>, hemisphere: Hemisphere },
    Layered { base: Box<LabelTag>, layer: Arc<str> },
}

impl LabelTag {
    /// Tag for a record under a grouping spec.
    pub fn for_record(spec: GroupingSpec, record: &RawRecord) -> Self {
        let base = match spec.kind {
            GroupingKind::AllTogether => LabelTag::All,
            GroupingKind::ByRegion => LabelTag::RawRegion(record.region.clone()),
            GroupingKind::ByProjectionClass => LabelTag::ViaClass(record.class.clone()),
            GroupingKind::ByHemisphere => LabelTag::Hemisphere(record.hemisphere.clone()),
            GroupingKind::NoGrouping => LabelTag::Source {
                region: record.region.clone(),
                class: record.class.clone(),
                hemisphere: record.hemisphere.clone(),
            },
        };
        match spec.layers {
            LayerHandling::WithoutLayers => base,
            LayerHandling::WithLayers => LabelTag::Layered { base: Box::new(base), layer: record.layer.clone() },
        }
    }

    /// The tag with any layer qualification removed.
    pub fn base(&self) -> &LabelTag {
        match self {
            LabelTag::Layered { base, .. } => base.base(),
            other => other,
        }
    }
}

/// A rendered group label together with its tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    text: String,
    tag: LabelTag,
}

impl Label {
    pub fn new(text: impl Into<String>, tag: LabelTag) -> Self { Self { text: text.into(), tag } }

    /// Label of `record` under `spec`, rendered through the template table.
    pub fn for_record(spec: GroupingSpec, record: &RawRecord) -> Self {
        Self { text: LabelTemplate::for_spec(spec).render(record), tag: LabelTag::for_record(spec, record) }
    }

    #[inline] pub fn text(&self) -> &str { &self.text }

    #[inline] pub fn tag(&self) -> &LabelTag { &self.tag }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.text) }
}
