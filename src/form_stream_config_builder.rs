use crate::FormStream;
use crate::FormStreamConfig;

/// This is for easing the building of [`FormStreamConfig`](crate::FormStreamConfig).
///
/// For full documentation see there.
///
/// ```rust
/// use ::multipart_form_stream::FormStreamConfig;
///
/// let config = FormStreamConfig::builder()
///     .min_chunk_size(64 * 1024)
///     .build();
/// ```
///
/// A `FormStream` can be built straight from the builder:
///
/// ```rust
/// use ::multipart_form_stream::FormStreamConfig;
///
/// let form = FormStreamConfig::builder()
///     .min_chunk_size(64 * 1024)
///     .build_form_stream()
///     .add_field("name", "Joe");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormStreamConfigBuilder {
    config: FormStreamConfig,
}

impl FormStreamConfigBuilder {
    pub fn min_chunk_size(mut self, min_chunk_size: usize) -> Self {
        self.config.min_chunk_size = Some(min_chunk_size);
        self
    }

    pub fn direct_chunks(mut self) -> Self {
        self.config.min_chunk_size = None;
        self
    }

    pub fn build(self) -> FormStreamConfig {
        self.config
    }

    pub fn build_form_stream(self) -> FormStream {
        self.build().build_form_stream()
    }
}
