use ::std::sync::Arc;
use ::std::sync::Mutex;

use crate::internals::InnerFormStream;
use crate::util::with_this_mut;

///
/// Controls a [`FormStream`](crate::FormStream) from elsewhere,
/// such as whilst the form is owned by a http client sending it.
///
/// Get one by calling [`FormStream::handle()`](crate::FormStream::handle()).
///
/// ```rust
/// # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
/// #
/// use ::multipart_form_stream::FormStream;
///
/// let form = FormStream::new()
///     .add_file("file", "/tmp/large-video.mp4");
/// let handle = form.handle();
///
/// let body = ::axum::body::Body::from(form);
///
/// // The user cancelled the upload.
/// handle.destroy();
/// #
/// # Ok(()) }
/// ```
///
#[derive(Debug, Clone)]
pub struct FormStreamHandle {
    inner: Arc<Mutex<InnerFormStream>>,
}

impl FormStreamHandle {
    pub(crate) fn new(inner: Arc<Mutex<InnerFormStream>>) -> Self {
        Self { inner }
    }

    /// Stops the form producing any output, until it is resumed.
    ///
    /// Whilst paused nothing is read from the source of the current part.
    pub fn pause(&self) {
        with_this_mut(&self.inner, "pause", |inner| inner.pause())
    }

    /// Resumes a paused form.
    pub fn resume(&self) {
        with_this_mut(&self.inner, "resume", |inner| inner.resume())
    }

    pub fn is_paused(&self) -> bool {
        with_this_mut(&self.inner, "is_paused", |inner| inner.is_paused)
    }

    /// Stops the form, and releases every source it holds.
    /// Files are closed, and producers pushing into a
    /// [`PushSource`](crate::source::PushSource) are told it was released.
    ///
    /// Anything reading the form will receive [`FormStreamError::Destroyed`](crate::FormStreamError::Destroyed),
    /// followed by the end of the stream.
    ///
    /// Calling this again, or after the form has finished, does nothing.
    pub fn destroy(&self) {
        with_this_mut(&self.inner, "destroy", |inner| inner.destroy())
    }

    /// Returns true once the form has produced everything it will produce.
    pub fn is_finished(&self) -> bool {
        with_this_mut(&self.inner, "is_finished", |inner| inner.is_finished())
    }
}

#[cfg(test)]
mod test_destroy {
    use ::futures::StreamExt;
    use ::futures::stream;
    use ::std::sync::atomic::AtomicUsize;
    use ::std::sync::atomic::Ordering;

    use crate::BoxError;
    use crate::FormStream;
    use crate::FormStreamError;

    use super::*;

    struct DropCounter(Arc<AtomicUsize>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn it_should_release_active_source_once_and_stop_output() {
        let drops = Arc::new(AtomicUsize::new(0));
        let counter = DropCounter(drops.clone());
        let chunks = stream::iter((0..100).map(|_| Ok::<_, BoxError>("chunk"))).map(move |chunk| {
            let _counter = &counter;
            chunk
        });

        let mut form = FormStream::new().add_stream("stream", chunks, "stream.txt");
        let handle = form.handle();

        // Leading block, then the first chunk from the stream.
        form.next().await.unwrap().unwrap();
        form.next().await.unwrap().unwrap();
        assert_eq!(drops.load(Ordering::SeqCst), 0);

        handle.destroy();
        handle.destroy();

        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert!(matches!(form.next().await, Some(Err(FormStreamError::Destroyed))));
        assert!(form.next().await.is_none());
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn it_should_stop_buffered_output_already_queued() {
        let mut form = FormStream::new().add_field("a", "1").add_field("b", "2");
        let handle = form.handle();

        form.next().await.unwrap().unwrap();
        handle.destroy();

        assert!(matches!(form.next().await, Some(Err(FormStreamError::Destroyed))));
        assert!(form.next().await.is_none());
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn it_should_keep_source_error_when_destroyed_after_failing() {
        let chunks = stream::iter(vec![Err::<&'static str, BoxError>("gone".into())]);
        let mut form = FormStream::new().add_stream("stream", chunks, "stream.txt");
        let handle = form.handle();

        form.next().await.unwrap().unwrap();
        let error = form.next().await.unwrap().unwrap_err();
        handle.destroy();

        assert!(matches!(error, FormStreamError::SourceRead { .. }));
        assert!(form.next().await.is_none());
    }

    #[tokio::test]
    async fn it_should_do_nothing_after_finishing() {
        let mut form = FormStream::new().add_field("foo", "bar");
        let handle = form.handle();

        while let Some(chunk) = form.next().await {
            chunk.unwrap();
        }
        handle.destroy();

        assert!(form.next().await.is_none());
    }
}

#[cfg(test)]
mod test_pause {
    use ::futures::StreamExt;
    use ::std::time::Duration;
    use ::tokio::time::timeout;

    use crate::FormStream;
    use crate::source::PushSource;

    #[tokio::test]
    async fn it_should_produce_nothing_whilst_paused() {
        let mut form = FormStream::new().add_field("foo", "bar");
        let handle = form.handle();

        handle.pause();
        assert!(handle.is_paused());

        let result = timeout(Duration::from_millis(20), form.next()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn it_should_continue_when_resumed_from_another_task() {
        let form = FormStream::new().add_field("foo", "bar");
        let handle = form.handle();
        handle.pause();

        let reader = ::tokio::spawn(async move {
            form.collect::<Vec<_>>().await
        });

        ::tokio::time::sleep(Duration::from_millis(10)).await;
        handle.resume();
        assert!(!handle.is_paused());

        let chunks = reader.await.unwrap();
        let body: Vec<u8> = chunks
            .into_iter()
            .flat_map(|chunk| chunk.unwrap().to_vec())
            .collect();
        assert!(String::from_utf8(body).unwrap().contains("\r\n\r\nbar\r\n"));
    }

    #[tokio::test]
    async fn it_should_stop_reading_the_active_source_whilst_paused() {
        let (sender, source) = PushSource::channel(1);
        let mut form = FormStream::new().add_stream("log", source, "log.txt");
        let handle = form.handle();

        // Leading block of the streamed part.
        form.next().await.unwrap().unwrap();
        handle.pause();

        sender.send("first").await.unwrap();
        let blocked = timeout(Duration::from_millis(20), sender.send("second")).await;
        assert!(blocked.is_err());

        handle.resume();
        let chunk = form.next().await.unwrap().unwrap();
        assert_eq!(chunk, "first");

        let unblocked = timeout(Duration::from_millis(200), sender.send("second")).await;
        assert!(matches!(unblocked, Ok(Ok(()))));
    }
}
