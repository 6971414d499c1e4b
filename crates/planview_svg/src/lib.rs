//! SVG plan loading and rendering
//!
//! This crate loads a floor plan from an SVG file and draws it onto a
//! caller-supplied surface with the pan/zoom transform of the current frame.
//! Parsing is done by `usvg`; rasterization by `resvg` and `tiny-skia`.
//!
//! # Example
//!
//! ```ignore
//! use planview_core::{Color, ViewTransform};
//! use planview_svg::{DrawContext, PixmapCanvas, SvgPlan};
//!
//! let plan = SvgPlan::open("floor.svg")?;
//! let mut canvas = PixmapCanvas::new(800, 600)?;
//! canvas.clear(Color::WHITE)?;
//! plan.render(&mut canvas, &ViewTransform::new(2.0, 10.0, 0.0))?;
//! canvas.save_png("floor.png")?;
//! ```

mod canvas;
mod error;
mod picture;
mod plan;
mod rasterize;

pub use canvas::{DrawCommand, DrawContext, RecordingContext};
pub use error::{DrawError, LoadCause, PlanError};
pub use picture::{Picture, PlanOptions};
pub use plan::{SvgPlan, OUTLINE_COLOR, OUTLINE_WIDTH};
pub use rasterize::PixmapCanvas;
