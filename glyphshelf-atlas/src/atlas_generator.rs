use std::path::Path;

use glyphshelf_data::{FontAtlas, GlyphLoadError, GlyphSource};
use glyphshelf_rasterizer::{
    FontDiscovery, FontFace, FontParseError, RasterOptions, SwashRasterizer,
};
use tracing::{debug, info};

use crate::{
    CoverageReport, GlyphSurvey, coverage,
    packer::{AtlasSize, pack_with_size},
    survey,
};

/// A failed atlas build. No partial atlas is produced.
#[derive(thiserror::Error, Debug)]
pub enum AtlasError {
    #[error(transparent)]
    FontParse(#[from] FontParseError),

    #[error(transparent)]
    GlyphLoad(#[from] GlyphLoadError),
}

/// Builds glyph atlases from a single font at a single pixel size.
///
/// The generator owns its [`GlyphSource`]; dropping the generator releases
/// the font. Build several atlases concurrently by giving each thread its own
/// generator.
#[derive(Debug)]
pub struct AtlasGenerator<S> {
    source: S,
}

impl AtlasGenerator<SwashRasterizer> {
    /// Opens face `index` of the font file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::FontParse`] if the file cannot be read or is
    /// not a font.
    pub fn from_path(
        path: impl AsRef<Path>,
        index: usize,
        options: RasterOptions,
    ) -> Result<Self, AtlasError> {
        let path = path.as_ref();
        info!(
            path = %path.display(),
            index,
            size = options.size,
            hinting = options.hinting,
            "Creating atlas generator"
        );

        let face = FontFace::from_path(path, index)?;
        Ok(Self::new(SwashRasterizer::new(face, options)))
    }

    /// Opens the regular face of an installed font family.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::FontParse`] if no installed family matches or
    /// its font data is malformed.
    pub fn from_family(
        discovery: &FontDiscovery,
        family: &str,
        options: RasterOptions,
    ) -> Result<Self, AtlasError> {
        info!(
            family,
            size = options.size,
            hinting = options.hinting,
            "Creating atlas generator"
        );

        let face = discovery.load_face(family)?;
        Ok(Self::new(SwashRasterizer::new(face, options)))
    }
}

impl<S: GlyphSource> AtlasGenerator<S> {
    /// Wraps an already configured glyph source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The glyph source this generator reads from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Unwraps the generator, returning its glyph source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Rasterizes every glyph the font provides.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::GlyphLoad`] if a mapped glyph fails to rasterize.
    pub fn survey(&mut self) -> Result<GlyphSurvey, AtlasError> {
        Ok(survey(&mut self.source)?)
    }

    /// Surveys the font and packs every glyph into a power-of-two atlas.
    ///
    /// Running out of atlas space is not an error: the returned atlas then
    /// carries a [`PackingOverflow`](glyphshelf_data::PackingOverflow) report.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::GlyphLoad`] if a mapped glyph fails to rasterize.
    pub fn generate(&mut self) -> Result<FontAtlas, AtlasError> {
        let survey = self.survey()?;
        Ok(self.pack(&survey, AtlasSize::for_area(survey.total_area)))
    }

    /// Like [`generate`](Self::generate), with a caller-chosen atlas size.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::GlyphLoad`] if a mapped glyph fails to rasterize.
    pub fn generate_with_size(&mut self, size: AtlasSize) -> Result<FontAtlas, AtlasError> {
        let survey = self.survey()?;
        Ok(self.pack(&survey, size))
    }

    fn pack(&self, survey: &GlyphSurvey, size: AtlasSize) -> FontAtlas {
        info!(
            glyph_count = survey.len(),
            total_area = survey.total_area,
            width = size.width,
            height = size.height,
            "Packing glyph atlas"
        );

        let atlas = pack_with_size(survey, self.source.font_bounds(), size);

        info!(
            glyph_count = atlas.glyphs().len(),
            width = atlas.width(),
            height = atlas.height(),
            is_fixed_width = atlas.is_fixed_width(),
            complete = atlas.is_complete(),
            "Atlas generated"
        );
        atlas
    }

    /// Reports which code points the font covers.
    pub fn coverage(&self) -> CoverageReport {
        let report = coverage(&self.source);
        debug!(
            ranges = report.ranges.len(),
            total = report.total,
            "Coverage scan complete"
        );
        report
    }
}
