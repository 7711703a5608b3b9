use ::anyhow::Context;
use ::bytes::Bytes;
use ::futures_util::Stream;
use ::futures_util::StreamExt;
use ::mime::Mime;
use ::std::fmt::Debug;
use ::std::fmt::Display;
use ::std::fmt::Formatter;
use ::std::fmt::Result as FmtResult;
use ::std::path::Path;
use ::std::path::PathBuf;
use ::std::pin::Pin;
use ::tokio::fs::File;

use crate::BoxError;
use crate::FormStreamError;

pub(crate) type BoxByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, BoxError>> + Send>>;

///
/// For creating a section of a [`FormStream`](crate::FormStream).
///
/// Use [`Part::text()`](crate::multipart::Part::text()), [`Part::bytes()`](crate::multipart::Part::bytes()),
/// [`Part::stream()`](crate::multipart::Part::stream()), or [`Part::file()`](crate::multipart::Part::file())
/// for creating new instances.
/// Then attach them to a `FormStream` using [`FormStream::add_part()`](crate::FormStream::add_part()).
///
/// Text and bytes are held in memory, and are sent as soon as the form is read.
/// Streams and files are read from one at a time, in the order they were added.
///
pub struct Part {
    pub(crate) body: PartBody,
    pub(crate) file_name: Option<String>,
    pub(crate) mime_type: Option<Mime>,
    pub(crate) size: Option<u64>,
}

pub(crate) enum PartBody {
    Text(Bytes),
    Bytes(Bytes),
    Stream(BoxByteStream),
    File { path: PathBuf, file: Option<File> },
}

impl Part {
    /// Creates a new part of a multipart form, that will send text.
    ///
    /// This is a plain form field. It has no mime type unless one is set.
    pub fn text<T>(text: T) -> Self
    where
        T: Display,
    {
        let bytes = text.to_string().into_bytes().into();

        Self::new(PartBody::Text(bytes))
    }

    /// Creates a new part of a multipart form, that will upload bytes.
    ///
    /// If a file name is given, the mime type is guessed from it.
    pub fn bytes<B>(bytes: B) -> Self
    where
        B: Into<Bytes>,
    {
        Self::new(PartBody::Bytes(bytes.into()))
    }

    /// Creates a new part that will upload everything produced by the stream.
    ///
    /// The mime type is guessed from the file name,
    /// and is `application/octet-stream` when it cannot be guessed.
    ///
    /// Without a [`Part::size()`](crate::multipart::Part::size()), the form
    /// will not know its `Content-Length`.
    ///
    /// The stream is not polled until the form reaches this part.
    /// So an error from it is not reported whilst an earlier stream is still being sent.
    pub fn stream<S, B, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<B, E>> + Send + 'static,
        B: Into<Bytes> + 'static,
        E: Into<BoxError> + 'static,
    {
        let byte_stream = stream.map(|result| result.map(Into::into).map_err(Into::into));

        Self::new(PartBody::Stream(Box::pin(byte_stream)))
    }

    /// Creates a new part that will upload the file at the given path.
    ///
    /// The file is opened when this part is reached,
    /// and any failure to open it will end the form with an error.
    ///
    /// The file name defaults to the last part of the path,
    /// and the mime type is guessed from the path.
    pub fn file<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::new(PartBody::File {
            path: path.into(),
            file: None,
        })
    }

    /// Opens the file at the given path, and creates a part to upload it.
    ///
    /// Unlike [`Part::file()`](crate::multipart::Part::file()), this opens the file straight away.
    /// The size of the file is set from its metadata.
    pub async fn open_file<P>(path: P) -> Result<Self, FormStreamError>
    where
        P: Into<PathBuf>,
    {
        let path = path.into();
        let file = File::open(&path)
            .await
            .map_err(|err| FormStreamError::file_open(&path, err))?;
        let metadata = file
            .metadata()
            .await
            .map_err(|err| FormStreamError::file_open(&path, err))?;

        let part = Self::new(PartBody::File {
            path,
            file: Some(file),
        })
        .size(metadata.len());

        Ok(part)
    }

    fn new(body: PartBody) -> Self {
        Self {
            body,
            file_name: None,
            mime_type: None,
            size: None,
        }
    }

    /// Sets the file name for this part of a multipart form.
    ///
    /// By default there is no filename, except for files. This will set one.
    pub fn file_name<T>(mut self, file_name: T) -> Self
    where
        T: Display,
    {
        self.file_name = Some(file_name.to_string());
        self
    }

    /// Sets the mime type for this part of a multipart form.
    ///
    /// This replaces any mime type which would be guessed from the file name.
    pub fn mime_type<M>(mut self, mime_type: M) -> Self
    where
        M: AsRef<str>,
    {
        let raw_mime_type = mime_type.as_ref();
        let parsed_mime_type = raw_mime_type
            .parse()
            .with_context(|| format!("Failed to parse '{raw_mime_type}' as a Mime type"))
            .unwrap();

        self.mime_type = Some(parsed_mime_type);

        self
    }

    /// Declares the number of bytes a stream or file will produce.
    ///
    /// This lets the form know its `Content-Length`.
    /// The size is trusted, and is not checked against what is actually sent.
    /// Text and bytes always know their size, and ignore this.
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Returns true if this part is held in memory.
    pub fn is_immediate(&self) -> bool {
        matches!(self.body, PartBody::Text(_) | PartBody::Bytes(_))
    }
}

impl Debug for Part {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Part")
            .field("body", &self.body)
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size)
            .finish()
    }
}

impl Debug for PartBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Text(bytes) => write!(f, "PartBody::Text({} bytes)", bytes.len()),
            Self::Bytes(bytes) => write!(f, "PartBody::Bytes({} bytes)", bytes.len()),
            Self::Stream(_) => write!(f, "PartBody::Stream"),
            Self::File { path, .. } => write!(f, "PartBody::File({:?})", path),
        }
    }
}

/// The file name used for a path, the last section of it.
pub(crate) fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}






#[cfg(test)]
mod test_file_name {
    use super::*;

    #[test]
    fn it_should_use_file_name_given() {
        let mut part = Part::text("some_text");

        assert_eq!(part.file_name, None);
        part = part.file_name("my-text.txt");
        assert_eq!(part.file_name, Some("my-text.txt".to_string()));
    }
}


#[cfg(test)]
mod test_display_file_name {
    use super::*;

    #[test]
    fn it_should_use_last_section_of_path() {
        let name = display_file_name(Path::new("/tmp/uploads/logo.png"));
        assert_eq!(name, "logo.png");
    }
}
