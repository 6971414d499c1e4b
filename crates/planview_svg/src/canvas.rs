//! Draw Context - the surface a plan is rendered onto
//!
//! The host owns the surface and hands it to the renderer for the duration of
//! one frame. A surface only needs the handful of operations the renderer
//! issues: clearing, drawing a picture through a matrix, and stroking a
//! rectangle.
//!
//! [`RecordingContext`] keeps every call as a [`DrawCommand`] so callers can
//! inspect a frame without rasterizing it. The raster implementation lives in
//! [`crate::rasterize`].

use planview_core::{Affine2D, Color, Rect, Size, Stroke};

use crate::error::DrawError;
use crate::picture::Picture;

/// A scoped drawing surface
pub trait DrawContext {
    /// Size of the surface in pixels
    fn viewport(&self) -> Size;

    /// Fill the whole surface with a color
    fn clear(&mut self, color: Color) -> Result<(), DrawError>;

    /// Draw a picture with `transform` applied to the picture only.
    ///
    /// The surface's own state is left untouched.
    fn draw_picture(&mut self, picture: &Picture, transform: &Affine2D) -> Result<(), DrawError>;

    /// Stroke the outline of a rectangle given in surface coordinates
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, color: Color) -> Result<(), DrawError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that was issued against a [`RecordingContext`]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    DrawPicture {
        cull_rect: Rect,
        transform: Affine2D,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
        color: Color,
    },
}

/// A draw context that records commands instead of drawing them
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    viewport: Size,
}

impl RecordingContext {
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Rectangles stroked so far, in call order
    pub fn stroked_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::StrokeRect { rect, .. } => Some(*rect),
            _ => None,
        })
    }
}

impl DrawContext for RecordingContext {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn clear(&mut self, color: Color) -> Result<(), DrawError> {
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn draw_picture(&mut self, picture: &Picture, transform: &Affine2D) -> Result<(), DrawError> {
        self.commands.push(DrawCommand::DrawPicture {
            cull_rect: picture.cull_rect(),
            transform: *transform,
        });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, color: Color) -> Result<(), DrawError> {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            stroke: stroke.clone(),
            color,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picture::PlanOptions;

    #[test]
    fn test_recording_context() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20"/>"#;
        let picture = Picture::from_str(svg, &PlanOptions::default()).unwrap();

        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));
        ctx.clear(Color::WHITE).unwrap();
        ctx.draw_picture(&picture, &Affine2D::translation(5.0, 5.0))
            .unwrap();
        ctx.stroke_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &Stroke::new(2.0), Color::BLACK)
            .unwrap();

        assert_eq!(ctx.viewport(), Size::new(800.0, 600.0));
        assert_eq!(ctx.commands().len(), 3);
        assert_eq!(
            ctx.commands()[1],
            DrawCommand::DrawPicture {
                cull_rect: Rect::new(0.0, 0.0, 10.0, 20.0),
                transform: Affine2D::translation(5.0, 5.0),
            }
        );
        assert_eq!(
            ctx.stroked_rects().collect::<Vec<_>>(),
            vec![Rect::new(0.0, 0.0, 1.0, 1.0)]
        );
    }

    #[test]
    fn test_take_commands_empties() {
        let mut ctx = RecordingContext::default();
        ctx.clear(Color::BLACK).unwrap();

        assert_eq!(ctx.take_commands(), vec![DrawCommand::Clear(Color::BLACK)]);
        assert!(ctx.commands().is_empty());

        ctx.clear(Color::WHITE).unwrap();
        ctx.clear_commands();
        assert!(ctx.commands().is_empty());
    }
}
