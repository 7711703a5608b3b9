//!
//! Sources of bytes for streamed parts.
//!
//! Any [`Stream`](::futures_util::Stream) of byte chunks can be sent using
//! [`Part::stream()`](crate::multipart::Part::stream()).
//! This module includes sources for the common cases:
//!
//!  * [`FileSource`], reading a file from disk, opened when it is first read.
//!  * [`PushSource`], for producers that push bytes in,
//!    rather than having them pulled out.
//!
//! ```rust
//! # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
//! #
//! use ::multipart_form_stream::FormStream;
//! use ::multipart_form_stream::source::PushSource;
//!
//! let (sender, source) = PushSource::channel(8);
//!
//! let form = FormStream::new()
//!     .add_stream("log", source, "log.txt");
//!
//! ::tokio::spawn(async move {
//!     sender.send("first line\n").await?;
//!     sender.send("second line\n").await?;
//!     Ok::<_, ::multipart_form_stream::FormStreamError>(())
//! });
//! #
//! # Ok(()) }
//! ```
//!

use ::bytes::Bytes;
use ::futures_util::Stream;
use ::std::pin::Pin;

use crate::FormStreamError;

mod file_source;
pub use self::file_source::*;

mod push_source;
pub use self::push_source::*;

/// The bytes of a streamed part, as held by the form whilst it is waiting to be sent.
pub(crate) type PartSource = Pin<Box<dyn Stream<Item = Result<Bytes, FormStreamError>> + Send>>;
