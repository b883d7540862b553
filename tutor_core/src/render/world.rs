//! In-memory Typst world and PNG rasterization

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::layout::PagedDocument;
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};

use crate::errors::{TutorError, TutorResult};
use crate::settings::MAX_PIXELS_PER_SIDE;

/// Bundled fonts, parsed once per process
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    let fonts: Vec<Font> = typst_assets::fonts()
        .flat_map(|data| Font::iter(Bytes::new(data)))
        .collect();
    log::debug!("loaded {} bundled fonts", fonts.len());
    fonts
});

/// A minimal Typst world holding a single detached source.
struct DiagramWorld {
    main: Source,
    book: LazyHash<FontBook>,
    library: LazyHash<Library>,
}

impl DiagramWorld {
    fn new(source: String) -> Self {
        DiagramWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(FONTS.iter())),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for DiagramWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(now.year(), now.month().try_into().ok()?, now.day().try_into().ok()?)
    }
}

/// Compile Typst markup and rasterize its first page to PNG bytes.
///
/// # Errors
///
/// Returns [`TutorError::RenderFailed`] naming the stage that failed.
pub fn rasterize(source: String, pixel_per_pt: f32) -> TutorResult<Vec<u8>> {
    let world = DiagramWorld::new(source);

    let warned = typst::compile::<PagedDocument>(&world);
    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        TutorError::render_failed("compile", error_msgs.join("; "))
    })?;

    let page = document
        .pages
        .first()
        .ok_or_else(|| TutorError::render_failed("layout", "document has no pages"))?;

    let size = page.frame.size();
    let width_px = (size.x.to_pt() * pixel_per_pt as f64).round();
    let height_px = (size.y.to_pt() * pixel_per_pt as f64).round();
    let limit = MAX_PIXELS_PER_SIDE as f64;
    if !(width_px.is_finite() && height_px.is_finite()) || width_px > limit || height_px > limit {
        return Err(TutorError::render_failed(
            "layout",
            format!("raster of {}x{} px exceeds {} px per side", width_px, height_px, MAX_PIXELS_PER_SIDE),
        ));
    }

    let pixmap = typst_render::render(page, pixel_per_pt);
    pixmap
        .encode_png()
        .map_err(|e| TutorError::render_failed("encode", e.to_string()))
}

/// A white raster of the given pixel size; the last resort when even the
/// placeholder cannot be compiled.
pub fn blank_png(width_px: u32, height_px: u32) -> Vec<u8> {
    let encoded = tiny_skia::Pixmap::new(width_px.max(1), height_px.max(1))
        .or_else(|| tiny_skia::Pixmap::new(1, 1))
        .map(|mut pixmap| {
            pixmap.fill(tiny_skia::Color::WHITE);
            pixmap.encode_png()
        });

    match encoded {
        Some(Ok(png)) => png,
        Some(Err(e)) => {
            log::error!("blank raster could not be encoded: {}", e);
            Vec::new()
        }
        None => {
            log::error!("blank raster could not be allocated");
            Vec::new()
        }
    }
}
