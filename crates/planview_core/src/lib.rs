//! planview core primitives
//!
//! This crate provides the value types shared by the plan renderer and its
//! hosts:
//!
//! - **Geometry**: points, sizes, rectangles and 2D affine matrices
//! - **Style**: colors and stroke settings
//! - **View**: the pan/zoom state supplied on every frame
//!
//! # Example
//!
//! ```rust
//! use planview_core::{Point, Rect, ViewTransform};
//!
//! let view = ViewTransform::IDENTITY.zoom_about(Point::new(50.0, 50.0), 2.0);
//! let outline = view.to_affine().map_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
//! assert_eq!(outline, Rect::new(-50.0, -50.0, 200.0, 200.0));
//! ```

pub mod geometry;
pub mod style;
pub mod view;

pub use geometry::{Affine2D, Point, Rect, Size};
pub use style::{Color, LineCap, LineJoin, Stroke};
pub use view::ViewTransform;
