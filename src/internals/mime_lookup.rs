use ::mime::Mime;
use ::std::path::Path;

/// Guesses the mime type from the extension of a file name or path.
pub fn lookup_mime_type<P>(path: P) -> Option<Mime>
where
    P: AsRef<Path>,
{
    ::mime_guess::from_path(path).first()
}

/// Guesses the mime type, falling back to `application/octet-stream` when unknown.
pub fn lookup_mime_type_or_octet_stream<P>(path: P) -> Mime
where
    P: AsRef<Path>,
{
    lookup_mime_type(path).unwrap_or(mime::APPLICATION_OCTET_STREAM)
}
