use ::anyhow::Result;
use ::bytes::Bytes;
use ::futures_util::Stream;
use ::http::HeaderMap;
use ::rand::Rng;
use ::std::fmt::Display;
use ::std::path::PathBuf;
use ::std::pin::Pin;
use ::std::sync::Arc;
use ::std::sync::Mutex;
use ::std::task::Context;
use ::std::task::Poll;

use crate::Boundary;
use crate::BoxError;
use crate::FormStreamConfig;
use crate::FormStreamError;
use crate::FormStreamHandle;
use crate::internals::InnerFormStream;
use crate::internals::build_content_type;
use crate::internals::build_headers;
use crate::multipart::Part;
use crate::util::with_this_mut;

///
/// A multipart/form-data body, produced as a stream of byte chunks.
///
/// Fields and buffers are held in memory. Files and streams are read
/// from one at a time, only as fast as the stream is read.
/// So large uploads never need to be held in memory.
///
/// Add the parts, get the [`FormStream::headers()`](crate::FormStream::headers()),
/// and then send the form as the request body.
///
/// ```rust
/// # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
/// #
/// use ::multipart_form_stream::FormStream;
///
/// let form = FormStream::new()
///     .add_field("name", "Joe")
///     .add_field("animals", "foxes")
///     .add_file("avatar", "/tmp/avatar.png");
///
/// let headers = form.headers()?;
/// let body = ::axum::body::Body::from(form);
/// #
/// # Ok(()) }
/// ```
///
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct FormStream {
    inner: Arc<Mutex<InnerFormStream>>,
    boundary: Boundary,
}

impl FormStream {
    pub fn new() -> Self {
        Self::new_with_config(FormStreamConfig::default())
    }

    pub fn new_with_config(config: FormStreamConfig) -> Self {
        Self::new_with_rng(config, &mut ::rand::thread_rng())
    }

    /// Creates a new `FormStream`, generating its boundary with the random number generator given.
    pub fn new_with_rng<R>(config: FormStreamConfig, rng: &mut R) -> Self
    where
        R: Rng,
    {
        let boundary = Boundary::generate_with(rng);
        let inner = InnerFormStream::new(config, boundary.clone());

        Self {
            inner: Arc::new(Mutex::new(inner)),
            boundary,
        }
    }

    /// Adds a plain text field.
    pub fn add_field<N, T>(self, name: N, value: T) -> Self
    where
        N: Display,
        T: Display,
    {
        self.add_part(name, Part::text(value))
    }

    /// Adds a text field, sent with the content type given.
    pub fn add_field_with_content_type<N, T, C>(self, name: N, value: T, content_type: C) -> Self
    where
        N: Display,
        T: Display,
        C: AsRef<str>,
    {
        self.add_part(name, Part::text(value).mime_type(content_type))
    }

    /// Adds bytes held in memory, to be uploaded as a file.
    ///
    /// The content type is guessed from the file name.
    pub fn add_buffer<N, B, F>(self, name: N, bytes: B, file_name: F) -> Self
    where
        N: Display,
        B: Into<Bytes>,
        F: Display,
    {
        self.add_part(name, Part::bytes(bytes).file_name(file_name))
    }

    /// Adds a file to upload. It is not opened until it is reached in the stream.
    ///
    /// As the size is not given, the form will not know its `Content-Length`.
    /// Use [`FormStream::add_file_with_size()`](crate::FormStream::add_file_with_size()),
    /// or [`FormStream::set_total_stream_size()`](crate::FormStream::set_total_stream_size()), to set it.
    pub fn add_file<N, P>(self, name: N, path: P) -> Self
    where
        N: Display,
        P: Into<PathBuf>,
    {
        self.add_part(name, Part::file(path))
    }

    pub fn add_file_with_size<N, P>(self, name: N, path: P, size: u64) -> Self
    where
        N: Display,
        P: Into<PathBuf>,
    {
        self.add_part(name, Part::file(path).size(size))
    }

    /// Adds a stream of bytes, to be uploaded as a file.
    ///
    /// The content type is guessed from the file name.
    pub fn add_stream<N, S, B, E, F>(self, name: N, stream: S, file_name: F) -> Self
    where
        N: Display,
        S: Stream<Item = Result<B, E>> + Send + 'static,
        B: Into<Bytes> + 'static,
        E: Into<BoxError> + 'static,
        F: Display,
    {
        self.add_part(name, Part::stream(stream).file_name(file_name))
    }

    pub fn add_stream_with_size<N, S, B, E, F>(
        self,
        name: N,
        stream: S,
        file_name: F,
        size: u64,
    ) -> Self
    where
        N: Display,
        S: Stream<Item = Result<B, E>> + Send + 'static,
        B: Into<Bytes> + 'static,
        E: Into<BoxError> + 'static,
        F: Display,
    {
        self.add_part(name, Part::stream(stream).file_name(file_name).size(size))
    }

    /// Adds a new section to this multipart form to be sent.
    ///
    /// Parts must all be added before the form is read.
    ///
    /// See [`Part`](crate::multipart::Part).
    pub fn add_part<N>(self, name: N, part: Part) -> Self
    where
        N: Display,
    {
        let name = name.to_string();
        with_this_mut(&self.inner, "add_part", |inner| inner.add_part(name, part));

        self
    }

    /// Sets the total number of bytes of all streams and files added without a size.
    ///
    /// This is needed for a `Content-Length` header when sizes were not given to each part.
    /// It is ignored if every part already has a known size,
    /// or if the form has started being read.
    ///
    /// The size is trusted. If it is wrong the `Content-Length` will be wrong.
    pub fn set_total_stream_size(self, size: u64) -> Self {
        with_this_mut(&self.inner, "set_total_stream_size", |inner| {
            inner.set_total_stream_size(size)
        });

        self
    }

    /// Returns the headers needed for sending this form.
    ///
    /// This is always the `Content-Type`, and the `Content-Length` when it is known.
    /// Call this once all parts have been added.
    pub fn headers(&self) -> Result<HeaderMap> {
        self.build_headers(None)
    }

    /// Returns the headers needed for sending this form, along with the extra headers given.
    ///
    /// The extra headers replace any of the same name.
    pub fn headers_with(&self, extra_headers: HeaderMap) -> Result<HeaderMap> {
        self.build_headers(Some(extra_headers))
    }

    fn build_headers(&self, extra_headers: Option<HeaderMap>) -> Result<HeaderMap> {
        with_this_mut(&self.inner, "headers", |inner| {
            build_headers(&inner.boundary, &inner.content_length, extra_headers)
        })
    }

    /// Returns the content type this form will use when it is sent.
    pub fn content_type(&self) -> String {
        build_content_type(&self.boundary)
    }

    /// Returns the total size of the body, if the size of every part is known.
    pub fn content_length(&self) -> Option<u64> {
        with_this_mut(&self.inner, "content_length", |inner| {
            inner.content_length.total()
        })
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Returns a handle for pausing, resuming, or destroying this form from elsewhere.
    pub fn handle(&self) -> FormStreamHandle {
        FormStreamHandle::new(self.inner.clone())
    }

    /// See [`FormStreamHandle::pause()`](crate::FormStreamHandle::pause()).
    pub fn pause(&self) {
        with_this_mut(&self.inner, "pause", |inner| inner.pause())
    }

    /// See [`FormStreamHandle::resume()`](crate::FormStreamHandle::resume()).
    pub fn resume(&self) {
        with_this_mut(&self.inner, "resume", |inner| inner.resume())
    }

    /// See [`FormStreamHandle::destroy()`](crate::FormStreamHandle::destroy()).
    pub fn destroy(&self) {
        with_this_mut(&self.inner, "destroy", |inner| inner.destroy())
    }
}

impl Default for FormStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for FormStream {
    type Item = Result<Bytes, FormStreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        with_this_mut(&self.inner, "poll_next", |inner| inner.poll_drain(cx))
    }
}

#[cfg(feature = "axum")]
impl From<FormStream> for ::axum::body::Body {
    fn from(form: FormStream) -> Self {
        ::axum::body::Body::from_stream(form)
    }
}

#[cfg(feature = "reqwest")]
impl From<FormStream> for ::reqwest::Body {
    fn from(form: FormStream) -> Self {
        ::reqwest::Body::wrap_stream(form)
    }
}


#[cfg(test)]
mod test_new_with_rng {
    use super::*;
    use ::rand::SeedableRng;
    use ::rand::rngs::StdRng;

    #[test]
    fn it_should_use_same_boundary_for_same_seed() {
        let a = FormStream::new_with_rng(FormStreamConfig::default(), &mut StdRng::seed_from_u64(9));
        let b = FormStream::new_with_rng(FormStreamConfig::default(), &mut StdRng::seed_from_u64(9));

        assert_eq!(a.boundary(), b.boundary());
    }

    #[test]
    fn it_should_generate_new_boundary_by_default() {
        let a = FormStream::new();
        let b = FormStream::new();

        assert_ne!(a.boundary(), b.boundary());
    }
}

#[cfg(test)]
mod test_add_field {
    use super::test_helpers::*;
    use ::pretty_assertions::assert_eq;

    #[tokio::test]
    async fn it_should_send_fields_with_end_boundary() {
        let mut form = new_form().add_field("foo", "bar").add_field("name", "中文名字");
        let boundary = form.boundary().clone();

        let body = collect_body(&mut form).await.unwrap();

        let expected = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"foo\"\r\n\r\nbar\r\n\
             --{boundary}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n中文名字\r\n\
             --{boundary}--\r\n"
        );
        assert_eq!(String::from_utf8(body.clone()).unwrap(), expected);
        assert_eq!(content_length_header(&form), Some(body.len() as u64));
    }

    #[tokio::test]
    async fn it_should_send_numbers_as_text() {
        let mut form = new_form().add_field("now", 1234567890);

        let body = collect_body(&mut form).await.unwrap();

        assert!(String::from_utf8_lossy(&body).contains("\r\n\r\n1234567890\r\n"));
    }

    #[test]
    fn it_should_have_content_length_161_for_a_single_short_field() {
        let form = new_form().add_field("foo", "bar");

        assert_eq!(content_length_header(&form), Some(161));
    }
}



#[cfg(test)]
mod test_add_file {
    use super::test_helpers::*;
    use super::*;
    use ::std::io::Write;
    use ::tempfile::Builder as TempFileBuilder;

    fn new_temp_file(suffix: &str, contents: &[u8]) -> ::tempfile::NamedTempFile {
        let mut file = TempFileBuilder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[tokio::test]
    async fn it_should_use_file_name_and_mime_type_from_path() {
        let file = new_temp_file(".png", b"not really a png");
        let file_name = file.path().file_name().unwrap().to_string_lossy().to_string();
        let mut form = new_form().add_file("logo", file.path());

        let body = collect_body(&mut form).await.unwrap();
        let body = String::from_utf8(body).unwrap();

        let expected = format!(
            "name=\"logo\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\nnot really a png\r\n"
        );
        assert!(body.contains(&expected));
    }

    #[tokio::test]
    async fn it_should_not_know_content_length_without_size() {
        let file = new_temp_file(".txt", b"file contents");
        let mut form = new_form().add_field("foo", "bar").add_file("file", file.path());

        assert_eq!(content_length_header(&form), None);

        let body = collect_body(&mut form).await.unwrap();
        let boundary = form.boundary().clone();
        assert!(String::from_utf8_lossy(&body).ends_with(&format!("--{boundary}--\r\n")));
    }

    #[tokio::test]
    async fn it_should_know_content_length_with_size() {
        let contents = vec![b'x'; 1234];
        let file = new_temp_file(".bin", &contents);
        let mut form = new_form()
            .add_field("foo", "bar")
            .add_file_with_size("file", file.path(), 1234);
        let content_length = content_length_header(&form);

        let body = collect_body(&mut form).await.unwrap();

        assert_eq!(content_length, Some(body.len() as u64));
    }

    #[tokio::test]
    async fn it_should_fail_with_open_error_for_missing_file() {
        let mut form = new_form()
            .add_field("foo", "bar")
            .add_file("file", "/this/file/does/not/exist.txt");

        let error = collect_body(&mut form).await.unwrap_err();

        assert!(matches!(error, FormStreamError::SourceOpen { .. }));
        assert!(error.to_string().contains("/this/file/does/not/exist.txt"));
    }
}
