mod chunk_batcher;
pub use self::chunk_batcher::*;

mod content_length;
pub use self::content_length::*;

mod drain_loop;

mod format_leading;
pub use self::format_leading::*;

mod header_builder;
pub use self::header_builder::*;

mod inner_form_stream;
pub use self::inner_form_stream::*;

mod mime_lookup;
pub use self::mime_lookup::*;

mod queued_part;
pub use self::queued_part::*;
