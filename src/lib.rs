//!
//! Multipart Form Stream is a library for sending `multipart/form-data` bodies,
//! without needing to hold them in memory.
//!
//!  * You create a [`FormStream`],
//!  * add fields, buffers, files, and streams to it,
//!  * take the [`FormStream::headers()`] to send with it,
//!  * then send the form as the body of a request.
//!
//! The form is a [`Stream`](::futures_util::Stream) of [`Bytes`](::bytes::Bytes).
//! Files and streams are only read from as fast as the body is being sent.
//!
//! ## Getting Started
//!
//! Build a [`FormStream`]:
//!
//! ```rust
//! # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
//! #
//! use ::multipart_form_stream::FormStream;
//!
//! let form = FormStream::new()
//!     .add_field("username", "Terrance Pencilworth")
//!     .add_buffer("notes", "Some notes about foxes", "notes.txt")
//!     .add_file("avatar", "/tmp/avatar.png");
//! #
//! # Ok(())
//! # }
//! ```
//!
//! Then send it, along with its headers:
//!
//! ```rust
//! # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
//! #
//! use ::axum::body::Body;
//! use ::http::Request;
//! use ::multipart_form_stream::FormStream;
//!
//! let form = FormStream::new()
//!     .add_field("username", "Terrance Pencilworth");
//!
//! let headers = form.headers()?;
//! let mut request = Request::post("/users").body(Body::from(form))?;
//! request.headers_mut().extend(headers);
//! #
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Features
//!
//! Here are a list of all features so far that can be enabled:
//!
//!  * `all` _off by default_, turns on all features below.
//!  * `axum` **on by default**, allows a [`FormStream`] to be turned into an [`axum::body::Body`](::axum::body::Body).
//!  * `reqwest` _off by default_, allows a [`FormStream`] to be turned into a [`reqwest::Body`](https://docs.rs/reqwest/latest/reqwest/struct.Body.html).
//!
//! ## Features
//!
//! ### Content Length 📏
//!
//! The `Content-Length` header is only sent when the size of every part is known.
//! Fields and buffers always know their size.
//! Files and streams need their size given when they are added.
//!
//! ```rust
//! use ::futures_util::stream;
//! use ::multipart_form_stream::BoxError;
//! use ::multipart_form_stream::FormStream;
//!
//! let chunks = stream::iter(vec![Ok::<_, BoxError>("hello "), Ok("world")]);
//! let form = FormStream::new()
//!     .add_field("name", "Joe")
//!     .add_stream_with_size("greeting", chunks, "greeting.txt", 11);
//!
//! assert!(form.content_length().is_some());
//! ```
//!
//! Alternatively the total size of all unsized files and streams can be given,
//! using [`FormStream::set_total_stream_size()`].
//!
//! ### Minimum Chunk Size 📦
//!
//! Chunks read from streams are passed on as they arrive.
//! This can be many small writes. A minimum chunk size can be set,
//! where chunks are held until at least that many bytes are ready.
//!
//! ```rust
//! use ::multipart_form_stream::FormStreamConfig;
//!
//! let form = FormStreamConfig::builder()
//!     .min_chunk_size(64 * 1024)
//!     .build_form_stream()
//!     .add_file("video", "/tmp/video.mp4");
//! ```
//!
//! ### Cancelling 🛑
//!
//! A [`FormStreamHandle`] can pause, resume, or destroy the form,
//! after it has been passed on to be sent.
//!

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub(crate) mod internals;

pub mod multipart;
pub mod source;

pub(crate) mod util;

mod boundary;
pub use self::boundary::*;

mod form_stream_config_builder;
pub use self::form_stream_config_builder::*;

mod form_stream_config;
pub use self::form_stream_config::*;

mod form_stream_error;
pub use self::form_stream_error::*;

mod form_stream_handle;
pub use self::form_stream_handle::*;

mod form_stream;
pub use self::form_stream::*;

pub use ::bytes;
pub use ::http;
