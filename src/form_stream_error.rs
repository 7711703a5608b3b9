use ::std::io::Error as IoError;
use ::std::path::PathBuf;
use ::thiserror::Error;

/// A boxed error, as produced by the byte streams given to a form.
pub type BoxError = Box<dyn ::std::error::Error + Send + Sync + 'static>;

/// All errors produced whilst encoding a [`FormStream`](crate::FormStream).
///
/// Any error ends the stream. To try again build a new `FormStream`.
#[derive(Error, Debug)]
pub enum FormStreamError {
    /// The file for a part could not be opened.
    #[error("Failed to open file '{path}' for part '{name}': {source}")]
    SourceOpen {
        name: String,
        path: PathBuf,
        source: IoError,
    },

    /// A file could not be opened, before it was added to a form.
    #[error("Failed to open file '{path}': {source}")]
    FileOpen { path: PathBuf, source: IoError },

    /// The source for a part failed part way through.
    ///
    /// This is only seen once the form reaches that part.
    /// A source queued behind another stream that never ends will not have its error reported.
    #[error("Failed reading source for part '{name}': {source}")]
    SourceRead { name: String, source: BoxError },

    /// The form stream was destroyed before it finished.
    #[error("Form stream was destroyed")]
    Destroyed,

    /// The part source was released by the form stream, and can take no more data.
    #[error("Source was released by the form stream")]
    SourceReleased,
}

impl FormStreamError {
    pub fn source_open(name: impl Into<String>, path: impl Into<PathBuf>, source: IoError) -> Self {
        Self::SourceOpen {
            name: name.into(),
            path: path.into(),
            source,
        }
    }

    pub fn file_open(path: impl Into<PathBuf>, source: IoError) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    pub fn source_read<E>(name: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::SourceRead {
            name: name.into(),
            source: source.into(),
        }
    }
}
