use ::bytes::Bytes;
use ::futures_util::Stream;
use ::std::fmt::Debug;
use ::std::fmt::Formatter;
use ::std::fmt::Result as FmtResult;
use ::std::future::Future;
use ::std::io::Result as IoResult;
use ::std::path::PathBuf;
use ::std::pin::Pin;
use ::std::task::Context;
use ::std::task::Poll;
use ::tokio::fs::File;
use ::tokio_util::io::ReaderStream;

use crate::FormStreamError;

const DEFAULT_READ_CAPACITY: usize = 64 * 1024;

///
/// Streams the contents of a file.
///
/// The file is not opened until the first chunk is asked for.
/// If it cannot be opened, that is returned as a [`FormStreamError::SourceOpen`].
///
/// The file is closed when this is dropped.
///
pub struct FileSource {
    name: String,
    path: PathBuf,
    state: FileSourceState,
}

enum FileSourceState {
    Unopened,
    Opening(Pin<Box<dyn Future<Output = IoResult<File>> + Send>>),
    Reading(ReaderStream<File>),
    Done,
}

impl FileSource {
    /// Creates a source for the file at the path given.
    ///
    /// The name is the name of the part, and is used for errors.
    pub fn new<N, P>(name: N, path: P) -> Self
    where
        N: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            name: name.into(),
            path: path.into(),
            state: FileSourceState::Unopened,
        }
    }

    /// Creates a source from a file already opened.
    pub fn from_file<N, P>(name: N, path: P, file: File) -> Self
    where
        N: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            name: name.into(),
            path: path.into(),
            state: FileSourceState::Reading(ReaderStream::with_capacity(file, DEFAULT_READ_CAPACITY)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Stream for FileSource {
    type Item = Result<Bytes, FormStreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            match &mut this.state {
                FileSourceState::Unopened => {
                    ::tracing::debug!(path = %this.path.display(), "opening file");
                    let open_future = File::open(this.path.clone());
                    this.state = FileSourceState::Opening(Box::pin(open_future));
                }

                FileSourceState::Opening(open_future) => match open_future.as_mut().poll(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(Ok(file)) => {
                        let reader = ReaderStream::with_capacity(file, DEFAULT_READ_CAPACITY);
                        this.state = FileSourceState::Reading(reader);
                    }
                    Poll::Ready(Err(err)) => {
                        this.state = FileSourceState::Done;
                        let error = FormStreamError::source_open(&this.name, &this.path, err);
                        return Poll::Ready(Some(Err(error)));
                    }
                },

                FileSourceState::Reading(reader) => {
                    return match Pin::new(reader).poll_next(cx) {
                        Poll::Pending => Poll::Pending,
                        Poll::Ready(Some(Ok(chunk))) => Poll::Ready(Some(Ok(chunk))),
                        Poll::Ready(Some(Err(err))) => {
                            this.state = FileSourceState::Done;
                            let error = FormStreamError::source_read(&this.name, err);
                            Poll::Ready(Some(Err(error)))
                        }
                        Poll::Ready(None) => {
                            this.state = FileSourceState::Done;
                            Poll::Ready(None)
                        }
                    };
                }

                FileSourceState::Done => return Poll::Ready(None),
            }
        }
    }
}

impl Debug for FileSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let state = match self.state {
            FileSourceState::Unopened => "Unopened",
            FileSourceState::Opening(_) => "Opening",
            FileSourceState::Reading(_) => "Reading",
            FileSourceState::Done => "Done",
        };

        f.debug_struct("FileSource")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("state", &state)
            .finish()
    }
}
