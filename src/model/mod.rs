//! FDL document model.
//!
//! Every entity implements [`Record`], which provides required-field
//! checks, defaults and conversion to and from the JSON mapping form.
//! Entities are plain structs with optional fields so documents can be built
//! up step by step; completeness is only enforced on serialization and
//! validation.

mod canvas;
mod clip_id;
mod canvas_template;
mod collection;
mod context;
mod fdl;
mod framing_decision;
mod framing_intent;
mod geometry;
mod header;
mod options;
pub mod record;
mod rounding;

pub use canvas::Canvas;
pub use clip_id::{ClipId, FileSequence};
pub use canvas_template::CanvasTemplate;
pub use collection::TypedCollection;
pub use context::Context;
pub use fdl::Fdl;
pub use framing_decision::FramingDecision;
pub use framing_intent::FramingIntent;
pub use geometry::{Dimensions, NumericKind, Point};
pub use header::{
    Header, Version, DEFAULT_FDL_CREATOR, FDL_SCHEMA_MAJOR, FDL_SCHEMA_MINOR,
};
pub use options::{
    AlignmentHorizontal, AlignmentVertical, Direction, Evenness, FitMethod, FitSource,
    PreserveFromSourceCanvas,
};
pub use record::{Mapping, Record};
pub use rounding::{RoundStrategy, DEFAULT_ROUNDING_STRATEGY, NO_ROUNDING};
