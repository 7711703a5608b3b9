use crate::FormStream;
use crate::FormStreamConfigBuilder;

/// The basic setup for a [`FormStream`](crate::FormStream).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormStreamConfig {
    /// Collects the chunks of streamed parts together, until at least this many bytes are held.
    /// They are then sent as one chunk.
    ///
    /// This is for when the receiving side works better with fewer, larger, writes.
    /// The last chunk of each streamed part may be smaller.
    ///
    /// **Defaults** to `None`, where chunks are sent on as they are read.
    pub min_chunk_size: Option<usize>,
}

impl FormStreamConfig {
    /// Creates a builder for making a `FormStreamConfig`.
    pub fn builder() -> FormStreamConfigBuilder {
        FormStreamConfigBuilder::default()
    }

    /// Creates a new `FormStream` using this config.
    pub fn build_form_stream(self) -> FormStream {
        FormStream::new_with_config(self)
    }
}
