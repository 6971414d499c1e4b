//! SVG plan loading and rendering

use std::fs;
use std::path::Path;
use std::time::Instant;

use planview_core::{Color, Rect, Size, Stroke, ViewTransform};
use tracing::{debug, error, info};

use crate::canvas::DrawContext;
use crate::error::{LoadCause, PlanError};
use crate::picture::{Picture, PlanOptions};

/// Width of the outline drawn around the plan
pub const OUTLINE_WIDTH: f32 = 2.0;

/// Color of the outline drawn around the plan
pub const OUTLINE_COLOR: Color = Color::BLACK;

/// A floor plan loaded from an SVG file
///
/// The picture is parsed once, when the plan is opened, and never changes
/// afterwards. Every frame is drawn from the view transform passed to
/// [`SvgPlan::render`]; the plan keeps no per-frame state.
#[derive(Debug)]
pub struct SvgPlan {
    picture: Picture,
    drawing_width: f32,
    drawing_height: f32,
}

impl SvgPlan {
    /// Open a plan with default options
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        Self::open_with(path, &PlanOptions::default())
    }

    /// Open a plan and record its natural width and height
    pub fn open_with(path: impl AsRef<Path>, options: &PlanOptions) -> Result<Self, PlanError> {
        let started = Instant::now();
        let picture = Self::load(path.as_ref(), options)?;

        let size = picture.size();
        info!("plan picture size: {} x {}", size.width, size.height);
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "plan loaded"
        );

        Ok(Self {
            drawing_width: size.width,
            drawing_height: size.height,
            picture,
        })
    }

    /// Read and parse a plan file.
    ///
    /// The path is checked for existence before anything is read, so a
    /// missing file is always reported as [`PlanError::FileNotFound`].
    pub fn load(path: &Path, options: &PlanOptions) -> Result<Picture, PlanError> {
        if !path.exists() {
            let err = PlanError::FileNotFound(path.to_path_buf());
            error!("{err}");
            return Err(err);
        }

        let loaded = fs::read(path)
            .map_err(LoadCause::from)
            .and_then(|data| {
                Picture::parse(&data, &options.to_usvg(path.parent())).map_err(LoadCause::from)
            });

        loaded.map_err(|source| {
            error!(path = %path.display(), "Error loading SVG plan! {source}");
            PlanError::Load {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    pub fn drawing_width(&self) -> f32 {
        self.drawing_width
    }

    pub fn drawing_height(&self) -> f32 {
        self.drawing_height
    }

    pub fn dimensions(&self) -> Size {
        Size::new(self.drawing_width, self.drawing_height)
    }

    /// The untransformed drawing rectangle `[0, 0, width, height]`
    pub fn bounds(&self) -> Rect {
        self.dimensions().to_rect()
    }

    pub fn picture(&self) -> &Picture {
        &self.picture
    }

    /// Draw one frame.
    ///
    /// The picture is drawn through `| s 0 tx | 0 s ty | 0 0 1 |`. The same
    /// matrix maps the drawing rectangle, which is then stroked as a 2px black
    /// outline. The matrix goes to the picture, not the surface, so the
    /// outline is mapped by hand.
    pub fn render(&self, ctx: &mut dyn DrawContext, view: &ViewTransform) -> Result<(), PlanError> {
        let matrix = view.to_affine();

        ctx.draw_picture(&self.picture, &matrix).map_err(|source| {
            error!("Cannot draw SVG plan: {source}");
            PlanError::Render { source }
        })?;

        let outline = matrix.map_rect(self.bounds());
        ctx.stroke_rect(outline, &Stroke::new(OUTLINE_WIDTH), OUTLINE_COLOR)
            .map_err(|source| {
                error!("Cannot draw SVG plan outline: {source}");
                PlanError::Render { source }
            })
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io::Write;

    use planview_core::Affine2D;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::canvas::{DrawCommand, RecordingContext};
    use crate::error::DrawError;
    use crate::rasterize::PixmapCanvas;

    const PLAN_100X200: &str = r#"
        <svg xmlns="http://www.w3.org/2000/svg" width="100" height="200">
            <rect x="10" y="10" width="80" height="180" fill="blue"/>
        </svg>
    "#;

    fn plan_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".svg").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn outline_for(plan: &SvgPlan, view: ViewTransform) -> Rect {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));
        plan.render(&mut ctx, &view).unwrap();
        let rects: Vec<Rect> = ctx.stroked_rects().collect();
        assert_eq!(rects.len(), 1);
        rects[0]
    }

    /// Surface that fails every call
    struct BrokenSurface;

    impl DrawContext for BrokenSurface {
        fn viewport(&self) -> Size {
            Size::ZERO
        }

        fn clear(&mut self, _color: Color) -> Result<(), DrawError> {
            Err(DrawError::InvalidSize { width: 0, height: 0 })
        }

        fn draw_picture(&mut self, _: &Picture, transform: &Affine2D) -> Result<(), DrawError> {
            Err(DrawError::NonInvertibleTransform(transform.elements))
        }

        fn stroke_rect(&mut self, rect: Rect, _: &Stroke, _: Color) -> Result<(), DrawError> {
            Err(DrawError::InvalidRect(rect))
        }
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.svg");

        let err = SvgPlan::open(&path).unwrap_err();
        assert!(matches!(&err, PlanError::FileNotFound(p) if p == &path));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_open_records_dimensions() {
        let file = plan_file(PLAN_100X200);
        let plan = SvgPlan::open(file.path()).unwrap();

        assert_eq!(plan.drawing_width(), 100.0);
        assert_eq!(plan.drawing_height(), 200.0);
        assert_eq!(plan.bounds(), Rect::new(0.0, 0.0, 100.0, 200.0));
        assert_eq!(plan.picture().cull_rect(), plan.bounds());
    }

    #[test]
    fn test_parse_failure_is_load_error() {
        let file = plan_file("<svg xmlns=\"http://www.w3.org/2000/svg\"><rect");

        let err = SvgPlan::open(file.path()).unwrap_err();
        let PlanError::Load { path, source } = &err else {
            panic!("expected load error, got {err:?}");
        };
        assert_eq!(path, file.path());
        assert!(matches!(source, LoadCause::Parse(_)));

        // The parser message is carried through
        let cause = err.source().unwrap().to_string();
        assert!(!cause.is_empty());
        assert!(err.to_string().contains(&cause));
    }

    #[test]
    fn test_directory_is_load_error() {
        // Exists, but cannot be read as a file
        let dir = tempfile::tempdir().unwrap();

        let err = SvgPlan::open(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Load {
                source: LoadCause::Io(_),
                ..
            }
        ));
    }

    #[test]
    fn test_identity_outline_is_drawing_rect() {
        let plan = SvgPlan::open(plan_file(PLAN_100X200).path()).unwrap();
        let outline = outline_for(&plan, ViewTransform::IDENTITY);
        assert_eq!(outline, Rect::new(0.0, 0.0, 100.0, 200.0));
    }

    #[test]
    fn test_scaled_outline() {
        let plan = SvgPlan::open(plan_file(PLAN_100X200).path()).unwrap();
        let outline = outline_for(&plan, ViewTransform::new(2.0, 10.0, 0.0));

        assert_eq!(outline.origin.x, 10.0);
        assert_eq!(outline.origin.y, 0.0);
        assert_eq!(outline.width(), 200.0);
        assert_eq!(outline.height(), 400.0);
    }

    #[test]
    fn test_render_command_sequence() {
        let plan = SvgPlan::open(plan_file(PLAN_100X200).path()).unwrap();
        let view = ViewTransform::new(0.5, 3.0, 4.0);

        let mut ctx = RecordingContext::new(Size::new(320.0, 240.0));
        plan.render(&mut ctx, &view).unwrap();

        assert_eq!(
            ctx.commands(),
            &[
                DrawCommand::DrawPicture {
                    cull_rect: Rect::new(0.0, 0.0, 100.0, 200.0),
                    transform: Affine2D::scale_translate(0.5, 3.0, 4.0),
                },
                DrawCommand::StrokeRect {
                    rect: Rect::new(3.0, 4.0, 50.0, 100.0),
                    stroke: Stroke::new(OUTLINE_WIDTH),
                    color: OUTLINE_COLOR,
                },
            ]
        );
    }

    #[test]
    fn test_renders_are_independent() {
        let plan = SvgPlan::open(plan_file(PLAN_100X200).path()).unwrap();

        let first = outline_for(&plan, ViewTransform::new(3.0, -5.0, 7.0));
        let identity = outline_for(&plan, ViewTransform::IDENTITY);
        let again = outline_for(&plan, ViewTransform::new(3.0, -5.0, 7.0));

        assert_eq!(identity, plan.bounds());
        assert_eq!(first, again);
        assert_eq!(plan.dimensions(), Size::new(100.0, 200.0));
    }

    #[test]
    fn test_surface_failure_is_render_error() {
        let plan = SvgPlan::open(plan_file(PLAN_100X200).path()).unwrap();

        let err = plan
            .render(&mut BrokenSurface, &ViewTransform::IDENTITY)
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::Render {
                source: DrawError::NonInvertibleTransform(_)
            }
        ));
        assert!(err.to_string().starts_with("Cannot draw SVG plan"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_render_to_pixmap() {
        let plan = SvgPlan::open(plan_file(PLAN_100X200).path()).unwrap();
        let mut canvas = PixmapCanvas::new(120, 120).unwrap();
        canvas.clear(Color::WHITE).unwrap();

        // Half scale, shifted right: plan occupies x 10..60, y 0..100
        plan.render(&mut canvas, &ViewTransform::new(0.5, 10.0, 0.0))
            .unwrap();

        // Inside the blue rect (drawing 10..90 x 10..190 -> screen 15..55 x 5..95)
        assert_eq!(canvas.pixel(35, 50), Some([0, 0, 255, 255]));
        // Outline on the left edge at x = 10
        let edge = canvas.pixel(10, 50).unwrap();
        assert!(edge[0] < 64 && edge[2] < 64, "edge pixel {edge:?}");
        // Outside the plan
        assert_eq!(canvas.pixel(100, 50), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_singular_view_fails_on_pixmap() {
        let plan = SvgPlan::open(plan_file(PLAN_100X200).path()).unwrap();
        let mut canvas = PixmapCanvas::new(10, 10).unwrap();

        let err = plan
            .render(&mut canvas, &ViewTransform::new(0.0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, PlanError::Render { .. }));
    }
}
