use ::bytes::Bytes;
use ::std::collections::VecDeque;
use ::std::task::Context;
use ::std::task::Poll;

use crate::FormStreamError;
use crate::internals::DrainState;
use crate::internals::InnerFormStream;
use crate::internals::NEW_LINE;
use crate::internals::QueuedPart;

impl InnerFormStream {
    ///
    /// Produces the next chunk of the multipart body.
    ///
    /// Parts held in memory are written first, in the order they were added.
    /// Then streamed parts are read one at a time, in the order they were added.
    /// A streamed part is only read from when all output before it has been taken,
    /// so a slow reader holds back the source being read.
    ///
    pub fn poll_drain(
        &mut self,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Bytes, FormStreamError>>> {
        if !self.has_started {
            ::tracing::debug!(
                boundary = %self.boundary,
                queued_parts = self.queue.len(),
                "Starting form stream"
            );
            self.has_started = true;
        }

        loop {
            if let Some(error) = self.pending_error.take() {
                return Poll::Ready(Some(Err(error)));
            }

            if self.is_paused {
                self.register_waker(cx);
                return Poll::Pending;
            }

            if let Some(chunk) = self.output.pop_front() {
                return Poll::Ready(Some(Ok(chunk)));
            }

            match &mut self.state {
                DrainState::Ended | DrainState::Errored => return Poll::Ready(None),

                DrainState::Idle => self.start_next_part(),

                DrainState::Draining { source, .. } => {
                    let polled = source.as_mut().poll_next(cx);

                    match polled {
                        Poll::Pending => {
                            self.register_waker(cx);
                            return Poll::Pending;
                        }
                        Poll::Ready(Some(Ok(chunk))) => self.write_stream_chunk(chunk),
                        Poll::Ready(Some(Err(error))) => self.fail(error),
                        Poll::Ready(None) => self.finish_streamed_part(),
                    }
                }
            }
        }
    }

    /// Writes out all parts held in memory, and then moves onto the next stream.
    /// If there are no streams left, the end boundary is written.
    fn start_next_part(&mut self) {
        let queue = ::std::mem::take(&mut self.queue);
        let (immediate, streamed): (VecDeque<QueuedPart>, VecDeque<QueuedPart>) =
            queue.into_iter().partition(QueuedPart::is_immediate);
        self.queue = streamed;

        if !immediate.is_empty() {
            ::tracing::debug!(count = immediate.len(), "Writing buffered parts");
        }
        for part in immediate {
            self.write_part(part);
        }

        match self.queue.pop_front() {
            Some(part) => self.write_part(part),
            None => {
                ::tracing::debug!("No more parts, writing end boundary");
                self.output.push_back(self.boundary.end_line());
                self.state = DrainState::Ended;
            }
        }
    }

    fn write_part(&mut self, part: QueuedPart) {
        match part {
            QueuedPart::Field { leading, value, .. } => {
                self.output.push_back(leading);
                self.output.push_back(value);
                self.output.push_back(Bytes::from_static(NEW_LINE));
            }
            QueuedPart::Buffer {
                leading, payload, ..
            } => {
                self.output.push_back(leading);
                self.output.push_back(payload);
                self.output.push_back(Bytes::from_static(NEW_LINE));
            }
            QueuedPart::Streamed {
                name,
                leading,
                source,
            } => {
                ::tracing::debug!(part = %name, "Writing streamed part");
                self.output.push_back(leading);
                self.state = DrainState::Draining { name, source };
            }
        }
    }

    fn write_stream_chunk(&mut self, chunk: Bytes) {
        if chunk.is_empty() {
            return;
        }

        ::tracing::trace!(bytes = chunk.len(), "Stream chunk");
        match self.batcher.as_mut() {
            Some(batcher) => {
                if let Some(batch) = batcher.push(chunk) {
                    self.output.push_back(batch);
                }
            }
            None => self.output.push_back(chunk),
        }
    }

    fn finish_streamed_part(&mut self) {
        if let Some(rest) = self.batcher.as_mut().and_then(|batcher| batcher.finish()) {
            self.output.push_back(rest);
        }
        self.output.push_back(Bytes::from_static(NEW_LINE));

        // Drops the finished source.
        let previous = ::std::mem::replace(&mut self.state, DrainState::Idle);
        if let DrainState::Draining { name, .. } = previous {
            ::tracing::debug!(part = %name, "Streamed part finished");
        }
    }

    fn fail(&mut self, error: FormStreamError) {
        ::tracing::debug!(%error, "Form stream failed, releasing all sources");

        self.release_all();
        self.pending_error = Some(error);
    }
}
