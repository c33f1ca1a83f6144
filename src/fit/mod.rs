//! Framing geometry: placing framing intents into canvases and deriving
//! canvases from canvas templates.
//!
//! Both operations take the [`RoundStrategy`](crate::model::RoundStrategy)
//! to apply explicitly; nothing here reads shared state.

mod derive;
mod place;

pub use derive::{derive_canvas_from_template, derive_canvas_from_template_at};
pub use place::place_framing_intent;
