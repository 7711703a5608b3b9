use ::bytes::Bytes;
use ::futures_util::TryStreamExt;
use ::std::collections::VecDeque;
use ::std::fmt::Debug;
use ::std::fmt::Formatter;
use ::std::fmt::Result as FmtResult;
use ::std::task::Context;
use ::std::task::Waker;

use crate::Boundary;
use crate::FormStreamConfig;
use crate::FormStreamError;
use crate::internals::ChunkBatcher;
use crate::internals::ContentLength;
use crate::internals::QueuedPart;
use crate::internals::format_leading;
use crate::internals::lookup_mime_type;
use crate::internals::lookup_mime_type_or_octet_stream;
use crate::multipart::Part;
use crate::multipart::PartBody;
use crate::multipart::display_file_name;
use crate::source::FileSource;
use crate::source::PartSource;

/// Where the form is in sending its parts.
pub enum DrainState {
    /// Waiting to start the next part.
    Idle,

    /// Reading through a streamed part.
    Draining { name: String, source: PartSource },

    /// Everything has been written, including the end boundary.
    Ended,

    /// Stopped due to an error, or being destroyed.
    Errored,
}

impl Debug for DrainState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Idle => write!(f, "DrainState::Idle"),
            Self::Draining { name, .. } => write!(f, "DrainState::Draining({:?})", name),
            Self::Ended => write!(f, "DrainState::Ended"),
            Self::Errored => write!(f, "DrainState::Errored"),
        }
    }
}

///
/// The state shared between a `FormStream`, and all handles to it.
///
#[derive(Debug)]
pub struct InnerFormStream {
    pub(crate) boundary: Boundary,
    pub(crate) queue: VecDeque<QueuedPart>,
    pub(crate) content_length: ContentLength,
    pub(crate) state: DrainState,
    pub(crate) output: VecDeque<Bytes>,
    pub(crate) batcher: Option<ChunkBatcher>,
    pub(crate) has_started: bool,
    pub(crate) is_paused: bool,
    pub(crate) waker: Option<Waker>,
    pub(crate) pending_error: Option<FormStreamError>,
}

impl InnerFormStream {
    pub fn new(config: FormStreamConfig, boundary: Boundary) -> Self {
        let end_boundary_size = boundary.end_line().len() as u64;
        let batcher = config
            .min_chunk_size
            .filter(|min_chunk_size| *min_chunk_size > 0)
            .map(ChunkBatcher::new);

        Self {
            boundary,
            queue: VecDeque::new(),
            content_length: ContentLength::new(end_boundary_size),
            state: DrainState::Idle,
            output: VecDeque::new(),
            batcher,
            has_started: false,
            is_paused: false,
            waker: None,
            pending_error: None,
        }
    }

    pub fn add_part(&mut self, name: String, part: Part) {
        if self.has_started {
            ::tracing::warn!(
                part = %name,
                "Part added after the form started sending, it may not be sent"
            );
        }

        let Part {
            body,
            file_name,
            mime_type,
            size,
        } = part;

        match body {
            PartBody::Text(value) => {
                let leading = format_leading(
                    &self.boundary,
                    &name,
                    file_name.as_deref(),
                    mime_type.as_ref(),
                );
                self.content_length
                    .add_known_part(leading.len() as u64, value.len() as u64);

                self.queue.push_back(QueuedPart::Field {
                    name,
                    leading,
                    value,
                });
            }

            PartBody::Bytes(payload) => {
                let mime_type =
                    mime_type.or_else(|| file_name.as_deref().and_then(lookup_mime_type));
                let leading = format_leading(
                    &self.boundary,
                    &name,
                    file_name.as_deref(),
                    mime_type.as_ref(),
                );
                self.content_length
                    .add_known_part(leading.len() as u64, payload.len() as u64);

                self.queue.push_back(QueuedPart::Buffer {
                    name,
                    leading,
                    payload,
                });
            }

            PartBody::Stream(byte_stream) => {
                let mime_type = mime_type.unwrap_or_else(|| match file_name.as_deref() {
                    Some(file_name) => lookup_mime_type_or_octet_stream(file_name),
                    None => mime::APPLICATION_OCTET_STREAM,
                });

                let source_name = name.clone();
                let source: PartSource = Box::pin(
                    byte_stream.map_err(move |err| FormStreamError::source_read(&source_name, err)),
                );

                self.add_streamed_part(name, file_name, mime_type, size, source);
            }

            PartBody::File { path, file } => {
                let file_name = file_name.unwrap_or_else(|| display_file_name(&path));
                let mime_type =
                    mime_type.unwrap_or_else(|| lookup_mime_type_or_octet_stream(&path));

                let file_source = match file {
                    Some(file) => FileSource::from_file(&name, path, file),
                    None => FileSource::new(&name, path),
                };

                self.add_streamed_part(
                    name,
                    Some(file_name),
                    mime_type,
                    size,
                    Box::pin(file_source),
                );
            }
        }
    }

    fn add_streamed_part(
        &mut self,
        name: String,
        file_name: Option<String>,
        mime_type: mime::Mime,
        size: Option<u64>,
        source: PartSource,
    ) {
        let leading = format_leading(
            &self.boundary,
            &name,
            file_name.as_deref(),
            Some(&mime_type),
        );

        match size {
            Some(size) => self.content_length.add_known_part(leading.len() as u64, size),
            None => self.content_length.add_unsized_stream(leading.len() as u64),
        }

        self.queue.push_back(QueuedPart::Streamed {
            name,
            leading,
            source,
        });
    }

    pub fn set_total_stream_size(&mut self, size: u64) {
        if self.has_started {
            ::tracing::warn!(
                size,
                "Total stream size set after the form started sending, it is ignored"
            );
            return;
        }

        let is_used = self.content_length.override_total(size);
        if !is_used {
            ::tracing::debug!(
                size,
                "Total stream size ignored, as all parts already have a known size"
            );
        }
    }

    pub fn pause(&mut self) {
        self.is_paused = true;
    }

    pub fn resume(&mut self) {
        self.is_paused = false;
        self.wake();
    }

    /// Stops the form, and drops every source it holds.
    ///
    /// Calling this more than once, or after the form has finished, does nothing.
    pub fn destroy(&mut self) {
        // Output queued behind the end boundary is still dropped.
        if matches!(self.state, DrainState::Errored) || self.is_finished() {
            return;
        }

        ::tracing::debug!(
            queued_parts = self.queue.len(),
            "Destroying form stream, releasing all sources"
        );

        self.release_all();
        self.pending_error = Some(FormStreamError::Destroyed);
        self.is_paused = false;
        self.wake();
    }

    /// Drops the active source, and everything still waiting to be sent.
    pub(crate) fn release_all(&mut self) {
        self.state = DrainState::Errored;
        self.queue.clear();
        self.output.clear();
        if let Some(batcher) = self.batcher.as_mut() {
            batcher.clear();
        }
    }

    pub(crate) fn register_waker(&mut self, cx: &Context<'_>) {
        match &self.waker {
            Some(waker) if waker.will_wake(cx.waker()) => {}
            _ => self.waker = Some(cx.waker().clone()),
        }
    }

    fn wake(&mut self) {
        if let Some(waker) = self.waker.take() {
            waker.wake();
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, DrainState::Ended | DrainState::Errored)
            && self.output.is_empty()
            && self.pending_error.is_none()
    }
}
