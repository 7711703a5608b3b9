use ::bytes::Bytes;
use ::bytes::BytesMut;

///
/// Collects chunks from a stream together, until they reach a minimum size.
///
/// This is for when the receiver works better with fewer larger writes.
///
#[derive(Debug)]
pub struct ChunkBatcher {
    min_chunk_size: usize,
    buffer: BytesMut,
}

impl ChunkBatcher {
    pub fn new(min_chunk_size: usize) -> Self {
        Self {
            min_chunk_size,
            buffer: BytesMut::new(),
        }
    }

    /// Adds the chunk, returning a batch if enough has been collected.
    pub fn push(&mut self, chunk: Bytes) -> Option<Bytes> {
        if self.buffer.is_empty() && chunk.len() >= self.min_chunk_size {
            return Some(chunk);
        }

        self.buffer.extend_from_slice(&chunk);
        if self.buffer.len() >= self.min_chunk_size {
            return Some(self.buffer.split().freeze());
        }

        None
    }

    /// Returns anything left over, which will be smaller than the minimum size.
    pub fn finish(&mut self) -> Option<Bytes> {
        if self.buffer.is_empty() {
            return None;
        }

        Some(self.buffer.split().freeze())
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
