//! Raster drawing surface backed by tiny-skia
//!
//! Pictures are drawn with resvg, producing anti-aliased output identical to
//! what resvg's own renderer would produce for the same matrix. The outline
//! and any other primitive are drawn with tiny-skia directly.

use std::path::Path;
use std::time::Instant;

use planview_core::{Affine2D, Color, LineCap, LineJoin, Rect, Size, Stroke};
use tiny_skia::{Paint, PathBuilder, Pixmap, Transform};
use tracing::debug;

use crate::canvas::DrawContext;
use crate::error::DrawError;
use crate::picture::Picture;

/// An owned RGBA pixel surface
pub struct PixmapCanvas {
    pixmap: Pixmap,
}

impl PixmapCanvas {
    /// Create a transparent surface. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self, DrawError> {
        let pixmap = Pixmap::new(width, height).ok_or(DrawError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA value of a single pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Whole surface as straight-alpha RGBA
    pub fn to_rgba(&self) -> Vec<u8> {
        unpremultiply_alpha(self.pixmap.data())
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, DrawError> {
        self.pixmap
            .encode_png()
            .map_err(|e| DrawError::Encode(e.to_string()))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), DrawError> {
        self.pixmap
            .save_png(path)
            .map_err(|e| DrawError::Encode(e.to_string()))
    }
}

impl DrawContext for PixmapCanvas {
    fn viewport(&self) -> Size {
        Size::new(self.pixmap.width() as f32, self.pixmap.height() as f32)
    }

    fn clear(&mut self, color: Color) -> Result<(), DrawError> {
        self.pixmap.fill(skia_color(color));
        Ok(())
    }

    fn draw_picture(&mut self, picture: &Picture, transform: &Affine2D) -> Result<(), DrawError> {
        if !transform.is_invertible() {
            return Err(DrawError::NonInvertibleTransform(transform.elements));
        }

        let started = Instant::now();
        resvg::render(
            picture.tree(),
            skia_transform(transform),
            &mut self.pixmap.as_mut(),
        );
        debug!(
            elapsed_us = started.elapsed().as_micros() as u64,
            "picture rasterized"
        );

        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, color: Color) -> Result<(), DrawError> {
        let bounds = tiny_skia::Rect::from_xywh(rect.x(), rect.y(), rect.width(), rect.height())
            .ok_or(DrawError::InvalidRect(rect))?;
        let path = PathBuilder::from_rect(bounds);

        let mut paint = Paint::default();
        paint.set_color(skia_color(color));
        paint.anti_alias = true;

        self.pixmap.stroke_path(
            &path,
            &paint,
            &skia_stroke(stroke),
            Transform::identity(),
            None,
        );

        Ok(())
    }
}

fn skia_transform(transform: &Affine2D) -> Transform {
    let [a, b, c, d, tx, ty] = transform.elements;
    Transform::from_row(a, b, c, d, tx, ty)
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let channel = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    tiny_skia::Color::from_rgba8(
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a),
    )
}

fn skia_stroke(stroke: &Stroke) -> tiny_skia::Stroke {
    let line_cap = match stroke.cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    };

    let line_join = match stroke.join {
        LineJoin::Miter => tiny_skia::LineJoin::Miter,
        LineJoin::Round => tiny_skia::LineJoin::Round,
        LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
    };

    tiny_skia::Stroke {
        width: stroke.width,
        miter_limit: stroke.miter_limit,
        line_cap,
        line_join,
        ..Default::default()
    }
}

/// Convert premultiplied alpha to straight alpha
///
/// tiny-skia stores premultiplied alpha; image encoders and most callers
/// expect straight alpha.
fn unpremultiply_alpha(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());

    for chunk in data.chunks_exact(4) {
        let a = chunk[3] as f32 / 255.0;
        if a > 0.0 {
            let r = (chunk[0] as f32 / a).round().min(255.0) as u8;
            let g = (chunk[1] as f32 / a).round().min(255.0) as u8;
            let b = (chunk[2] as f32 / a).round().min(255.0) as u8;
            result.extend_from_slice(&[r, g, b, chunk[3]]);
        } else {
            result.extend_from_slice(&[0, 0, 0, 0]);
        }
    }

    result
}
