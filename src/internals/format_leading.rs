use ::bytes::Bytes;
use ::mime::Mime;

use crate::Boundary;

/// The line ending used throughout multipart bodies.
pub const NEW_LINE: &'static [u8] = b"\r\n";

///
/// Builds the block written before the contents of each part.
///
/// This is the boundary line, the `Content-Disposition` header,
/// an optional `Content-Type` header, and the blank line ending the headers.
///
/// Names and file names are written as is, quotes within them are not escaped.
///
pub fn format_leading(
    boundary: &Boundary,
    name: &str,
    file_name: Option<&str>,
    content_type: Option<&Mime>,
) -> Bytes {
    let mut leading = format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"");
    if let Some(file_name) = file_name {
        leading.push_str("; filename=\"");
        leading.push_str(file_name);
        leading.push('"');
    }
    leading.push_str("\r\n");

    if let Some(content_type) = content_type {
        leading.push_str("Content-Type: ");
        leading.push_str(content_type.as_ref());
        leading.push_str("\r\n");
    }
    leading.push_str("\r\n");

    Bytes::from(leading)
}

#[cfg(test)]
mod test_format_leading {
    use super::*;
    use ::pretty_assertions::assert_eq;
    use ::rand::SeedableRng;
    use ::rand::rngs::StdRng;

    fn new_boundary() -> Boundary {
        Boundary::generate_with(&mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn it_should_format_field_with_name_only() {
        let boundary = new_boundary();
        let leading = format_leading(&boundary, "foo", None, None);

        let expected = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"foo\"\r\n\r\n"
        );
        assert_eq!(String::from_utf8_lossy(&leading), expected);
    }

    #[test]
    fn it_should_be_100_bytes_for_a_short_field() {
        let boundary = new_boundary();
        let leading = format_leading(&boundary, "foo", None, None);

        assert_eq!(leading.len(), 100);
    }

    #[test]
    fn it_should_put_file_name_after_name() {
        let boundary = new_boundary();
        let leading = format_leading(&boundary, "file", Some("logo.png"), Some(&mime::IMAGE_PNG));

        let expected = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"logo.png\"\r\nContent-Type: image/png\r\n\r\n"
        );
        assert_eq!(String::from_utf8_lossy(&leading), expected);
    }

    #[test]
    fn it_should_write_content_type_without_file_name() {
        let boundary = new_boundary();
        let leading = format_leading(&boundary, "data", None, Some(&mime::APPLICATION_JSON));

        let expected = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"data\"\r\nContent-Type: application/json\r\n\r\n"
        );
        assert_eq!(String::from_utf8_lossy(&leading), expected);
    }

    #[test]
    fn it_should_write_utf8_names_as_is() {
        let boundary = new_boundary();
        let leading = format_leading(&boundary, "名字", Some("中文名.txt"), None);

        let output = String::from_utf8_lossy(&leading);
        assert!(output.contains("name=\"名字\"; filename=\"中文名.txt\""));
    }

    #[test]
    fn it_should_not_escape_quotes() {
        let boundary = new_boundary();
        let leading = format_leading(&boundary, "a\"b", None, None);

        let output = String::from_utf8_lossy(&leading);
        assert!(output.contains("name=\"a\"b\""));
    }
}
