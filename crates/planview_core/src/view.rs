//! Pan/zoom view state
//!
//! A [`ViewTransform`] is what the pan/zoom controller hands to the renderer
//! on every frame. The renderer uses it verbatim: the translation is expected
//! to already account for the zoom pivot. [`ViewTransform::zoom_about`] is the
//! helper a controller uses to keep that invariant when zooming around a
//! screen point such as the display center or a pinch focus.

use crate::geometry::{Affine2D, Point, Size};

/// Uniform scale plus translation, in screen units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub const fn new(scale: f32, translate_x: f32, translate_y: f32) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    /// The matrix applied to the picture and its outline
    pub fn to_affine(&self) -> Affine2D {
        Affine2D::scale_translate(self.scale, self.translate_x, self.translate_y)
    }

    /// Offset the translation by a screen-space delta
    pub fn pan(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.scale, self.translate_x + dx, self.translate_y + dy)
    }

    /// Multiply the scale by `factor`, keeping the drawing point currently
    /// under the screen point `pivot` in place.
    pub fn zoom_about(&self, pivot: Point, factor: f32) -> Self {
        // screen = scale * drawing + t, solved for t' with the drawing point fixed
        Self::new(
            self.scale * factor,
            pivot.x * (1.0 - factor) + factor * self.translate_x,
            pivot.y * (1.0 - factor) + factor * self.translate_y,
        )
    }

    /// Largest uniform scale that fits `content` inside `viewport`, centered.
    ///
    /// Returns the identity when either size is empty.
    pub fn fit(content: Size, viewport: Size) -> Self {
        if content.is_empty() || viewport.is_empty() {
            return Self::IDENTITY;
        }

        let scale = (viewport.width / content.width).min(viewport.height / content.height);
        Self::new(
            scale,
            (viewport.width - content.width * scale) / 2.0,
            (viewport.height - content.height * scale) / 2.0,
        )
    }

    /// Map a screen point back to drawing coordinates.
    ///
    /// `None` when the scale is zero or not finite.
    pub fn screen_to_drawing(&self, screen: Point) -> Option<Point> {
        if !self.scale.is_finite() || self.scale == 0.0 {
            return None;
        }
        Some(Point::new(
            (screen.x - self.translate_x) / self.scale,
            (screen.y - self.translate_y) / self.scale,
        ))
    }
}
