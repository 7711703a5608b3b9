use ::anyhow::Context;
use ::anyhow::Result;
use ::http::HeaderMap;
use ::http::HeaderValue;
use ::http::header;

use crate::Boundary;
use crate::internals::ContentLength;

pub fn build_content_type(boundary: &Boundary) -> String {
    format!("multipart/form-data; boundary={boundary}")
}

///
/// Builds the headers to send with the multipart body.
///
/// `Content-Length` is only included when the size of every part is known.
/// Any extra headers are added last, replacing those of the same name.
///
pub fn build_headers(
    boundary: &Boundary,
    content_length: &ContentLength,
    extra_headers: Option<HeaderMap>,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let content_type = build_content_type(boundary);
    let content_type_value = HeaderValue::from_str(&content_type)
        .with_context(|| format!("Failed to store header content type '{}'", content_type))?;
    headers.insert(header::CONTENT_TYPE, content_type_value);

    if let (true, total) = content_length.finalize() {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(total));
    }

    if let Some(extra_headers) = extra_headers {
        headers.extend(extra_headers);
    }

    Ok(headers)
}

#[cfg(test)]
mod test_build_headers {
    use super::*;
    use ::rand::SeedableRng;
    use ::rand::rngs::StdRng;

    fn new_boundary() -> Boundary {
        Boundary::generate_with(&mut StdRng::seed_from_u64(3))
    }

    #[test]
    fn it_should_set_content_type_with_boundary() {
        let boundary = new_boundary();
        let content_length = ContentLength::new(56);

        let headers = build_headers(&boundary, &content_length, None).unwrap();

        let expected = format!("multipart/form-data; boundary={boundary}");
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), expected.as_str());
    }

    #[test]
    fn it_should_set_content_length_when_known() {
        let boundary = new_boundary();
        let mut content_length = ContentLength::new(56);
        content_length.add_known_part(100, 3);

        let headers = build_headers(&boundary, &content_length, None).unwrap();

        assert_eq!(headers.get(header::CONTENT_LENGTH).unwrap(), "161");
    }

    #[test]
    fn it_should_not_set_content_length_when_unknown() {
        let boundary = new_boundary();
        let mut content_length = ContentLength::new(56);
        content_length.add_unsized_stream(150);

        let headers = build_headers(&boundary, &content_length, None).unwrap();

        assert!(headers.get(header::CONTENT_LENGTH).is_none());
    }

    #[test]
    fn it_should_add_extra_headers() {
        let boundary = new_boundary();
        let content_length = ContentLength::new(56);
        let mut extra = HeaderMap::new();
        extra.insert("x-test", HeaderValue::from_static("hello"));

        let headers = build_headers(&boundary, &content_length, Some(extra)).unwrap();

        assert_eq!(headers.get("x-test").unwrap(), "hello");
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn it_should_let_extra_headers_replace_existing() {
        let boundary = new_boundary();
        let content_length = ContentLength::new(56);
        let mut extra = HeaderMap::new();
        extra.insert(header::CONTENT_LENGTH, HeaderValue::from_static("999"));

        let headers = build_headers(&boundary, &content_length, Some(extra)).unwrap();

        let values: Vec<_> = headers.get_all(header::CONTENT_LENGTH).iter().collect();
        assert_eq!(values, vec!["999"]);
    }
}
