//! Parsed plan pictures

use std::fmt;
use std::path::{Path, PathBuf};

use planview_core::{Rect, Size};
use usvg::{Options, Tree};

/// Options applied when parsing a plan
#[derive(Clone, Debug, PartialEq)]
pub struct PlanOptions {
    /// Target DPI, used to resolve absolute units (mm, in, pt)
    pub dpi: f32,
    /// Load system fonts so `<text>` elements are rendered
    pub system_fonts: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            dpi: 96.0,
            system_fonts: false,
        }
    }
}

impl PlanOptions {
    /// Build the usvg options, resolving relative hrefs against `resources_dir`
    pub(crate) fn to_usvg(&self, resources_dir: Option<&Path>) -> Options<'static> {
        let mut options = Options {
            dpi: self.dpi,
            resources_dir: resources_dir.map(PathBuf::from),
            ..Options::default()
        };
        if self.system_fonts {
            options.fontdb_mut().load_system_fonts();
        }
        options
    }
}

/// An immutable, parsed vector drawing
///
/// The cull rectangle is the document's declared size at the origin. The
/// picture carries no placement of its own; callers supply a matrix at draw
/// time.
pub struct Picture {
    tree: Tree,
    cull_rect: Rect,
}

impl Picture {
    /// Parse a picture from raw SVG bytes
    pub fn from_data(data: &[u8], options: &PlanOptions) -> Result<Self, usvg::Error> {
        Self::parse(data, &options.to_usvg(None))
    }

    /// Parse a picture from an SVG string
    pub fn from_str(svg: &str, options: &PlanOptions) -> Result<Self, usvg::Error> {
        Self::from_data(svg.as_bytes(), options)
    }

    pub(crate) fn parse(data: &[u8], options: &Options<'_>) -> Result<Self, usvg::Error> {
        let tree = Tree::from_data(data, options)?;
        let size = tree.size();

        Ok(Self {
            cull_rect: Rect::new(0.0, 0.0, size.width(), size.height()),
            tree,
        })
    }

    /// Natural extent of the drawing, before any transform
    pub fn cull_rect(&self) -> Rect {
        self.cull_rect
    }

    pub fn size(&self) -> Size {
        self.cull_rect.size
    }

    pub(crate) fn tree(&self) -> &Tree {
        &self.tree
    }
}

impl fmt::Debug for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picture")
            .field("cull_rect", &self.cull_rect)
            .finish_non_exhaustive()
    }
}
