//!
//! This supplies the building blocks for the sections of a
//! [`FormStream`](crate::FormStream).
//!
//! Most forms can be built with the `add_*` functions on `FormStream`.
//! A [`Part`] gives more control, such as a mime type for a field,
//! or declaring the size of a stream.
//!
//! # Sending byte parts
//!
//! ```rust
//! use ::multipart_form_stream::FormStream;
//! use ::multipart_form_stream::multipart::Part;
//!
//! let readme_part = Part::bytes(b"# Hello!".as_slice())
//!     .file_name(&"README.md")
//!     .mime_type(&"text/markdown");
//!
//! let form = FormStream::new()
//!     .add_part("file", readme_part);
//! ```
//!
//! # Sending a stream of a known size
//!
//! ```rust
//! use ::futures_util::stream;
//! use ::multipart_form_stream::BoxError;
//! use ::multipart_form_stream::FormStream;
//! use ::multipart_form_stream::multipart::Part;
//!
//! let chunks = stream::iter(vec![Ok::<_, BoxError>("hello "), Ok("world")]);
//! let part = Part::stream(chunks)
//!     .file_name(&"hello.txt")
//!     .size(11);
//!
//! let form = FormStream::new()
//!     .add_part("greeting", part);
//!
//! assert!(form.content_length().is_some());
//! ```
//!

mod part;
pub use self::part::*;
