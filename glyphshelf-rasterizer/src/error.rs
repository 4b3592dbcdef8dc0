use std::path::PathBuf;

/// The font could not be loaded. Always fatal: no survey is attempted.
#[derive(thiserror::Error, Debug)]
pub enum FontParseError {
    /// Reading the font file failed.
    #[error("Failed to read font file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a supported font, or the collection has no face at
    /// the requested index.
    #[error("Malformed font data (face index {index})")]
    Malformed { index: usize },

    /// No installed font matches the requested family name.
    #[error("Font family '{family}' not found")]
    FamilyNotFound { family: String },
}
