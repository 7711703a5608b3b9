use ::bytes::Bytes;
use ::futures_util::Stream;
use ::std::pin::Pin;
use ::std::task::Context;
use ::std::task::Poll;
use ::tokio::sync::mpsc;
use ::tokio::sync::mpsc::error::TrySendError;

use crate::BoxError;
use crate::FormStreamError;

///
/// A source for producers that push bytes in as they have them.
///
/// Chunks are held in a bounded queue between the producer and the form.
/// When it is full, [`PushSender::send()`] waits until the form has taken more,
/// so a slow upload slows down the producer rather than growing memory.
///
/// The source ends when every [`PushSender`] has been dropped.
///
#[derive(Debug)]
pub struct PushSource {
    receiver: mpsc::Receiver<Result<Bytes, BoxError>>,
}

/// The producing half of a [`PushSource`].
#[derive(Debug, Clone)]
pub struct PushSender {
    sender: mpsc::Sender<Result<Bytes, BoxError>>,
}

impl PushSource {
    /// Creates a new source, holding at most `capacity` chunks which have not yet been sent.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero.
    pub fn channel(capacity: usize) -> (PushSender, PushSource) {
        let (sender, receiver) = mpsc::channel(capacity);

        (PushSender { sender }, PushSource { receiver })
    }
}

impl Stream for PushSource {
    type Item = Result<Bytes, BoxError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl PushSender {
    /// Pushes a chunk, waiting if the queue is full.
    ///
    /// Returns [`FormStreamError::SourceReleased`] if the form has
    /// released the source, such as when it was destroyed.
    pub async fn send<B>(&self, chunk: B) -> Result<(), FormStreamError>
    where
        B: Into<Bytes>,
    {
        self.sender
            .send(Ok(chunk.into()))
            .await
            .map_err(|_| FormStreamError::SourceReleased)
    }

    /// Pushes a chunk if there is space, without waiting.
    ///
    /// Returns false if the queue is full.
    pub fn try_send<B>(&self, chunk: B) -> Result<bool, FormStreamError>
    where
        B: Into<Bytes>,
    {
        match self.sender.try_send(Ok(chunk.into())) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => Ok(false),
            Err(TrySendError::Closed(_)) => Err(FormStreamError::SourceReleased),
        }
    }

    /// Ends the source with an error, which will end the form it is part of.
    pub async fn fail<E>(self, error: E) -> Result<(), FormStreamError>
    where
        E: Into<BoxError>,
    {
        self.sender
            .send(Err(error.into()))
            .await
            .map_err(|_| FormStreamError::SourceReleased)
    }

    /// Returns true once the form has released this source.
    pub fn is_released(&self) -> bool {
        self.sender.is_closed()
    }
}
