use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use glyphshelf_data::FontAtlas;
use tracing::info;

/// Writing the diagnostic atlas image failed.
#[derive(thiserror::Error, Debug)]
pub enum PngExportError {
    #[error("Failed to create '{}': {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Encodes the atlas texture as an 8-bit grayscale PNG into `writer`.
///
/// # Errors
///
/// Returns [`PngExportError::Encode`] if the encoder or the writer fails.
pub fn write_png<W: Write>(atlas: &FontAtlas, writer: W) -> Result<(), PngExportError> {
    let mut encoder = png::Encoder::new(writer, atlas.width(), atlas.height());
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(atlas.bitmap().pixels())?;
    writer.finish()?;

    Ok(())
}

/// Encodes the atlas texture as an in-memory PNG.
///
/// # Errors
///
/// Returns [`PngExportError::Encode`] if encoding fails.
pub fn encode_png(atlas: &FontAtlas) -> Result<Vec<u8>, PngExportError> {
    let mut buf = Vec::new();
    write_png(atlas, &mut buf)?;
    Ok(buf)
}

/// Writes the atlas texture to `path` as a PNG for visual inspection.
///
/// # Errors
///
/// Returns [`PngExportError`] if the file cannot be created or encoding
/// fails.
pub fn save_png(atlas: &FontAtlas, path: impl AsRef<Path>) -> Result<(), PngExportError> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|source| PngExportError::Create { path: path.to_path_buf(), source })?;

    write_png(atlas, BufWriter::new(file))?;

    info!(
        path = %path.display(),
        width = atlas.width(),
        height = atlas.height(),
        "Atlas image written"
    );
    Ok(())
}
