use ::bytes::Bytes;

use crate::source::PartSource;

///
/// A part waiting in the form to be sent.
///
/// Each holds the leading block built when it was added.
///
pub enum QueuedPart {
    Field {
        name: String,
        leading: Bytes,
        value: Bytes,
    },
    Buffer {
        name: String,
        leading: Bytes,
        payload: Bytes,
    },
    Streamed {
        name: String,
        leading: Bytes,
        source: PartSource,
    },
}

impl QueuedPart {
    pub fn is_immediate(&self) -> bool {
        !matches!(self, Self::Streamed { .. })
    }
}

impl ::std::fmt::Debug for QueuedPart {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        match self {
            Self::Field { name, value, .. } => {
                write!(f, "QueuedPart::Field({:?}, {} bytes)", name, value.len())
            }
            Self::Buffer { name, payload, .. } => {
                write!(f, "QueuedPart::Buffer({:?}, {} bytes)", name, payload.len())
            }
            Self::Streamed { name, .. } => write!(f, "QueuedPart::Streamed({:?})", name),
        }
    }
}
