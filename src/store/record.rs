use reqwest::header::HeaderMap;

const REDIRECT_PREFIX: &str = "#REDIRECT ";

/// Builds the header block of a stored article record
///
/// A stored article is this block followed by the raw page bytes. The block
/// replays the upstream response headers behind a fixed status line, then
/// appends `X-Domain` (the article's site) and `X-Crawler` (the instance
/// that fetched it), so consumers can parse the record like an HTTP
/// response.
pub fn header_block(headers: &HeaderMap, site: &str, crawler: &str) -> Vec<u8> {
    let mut block = Vec::with_capacity(512);
    block.extend_from_slice(b"HTTP/1.0 200 OK\r\n");
    for (name, value) in headers {
        block.extend_from_slice(name.as_str().as_bytes());
        block.extend_from_slice(b": ");
        block.extend_from_slice(value.as_bytes());
        block.extend_from_slice(b"\r\n");
    }
    block.extend_from_slice(format!("X-Domain: {}\r\n", site).as_bytes());
    block.extend_from_slice(format!("X-Crawler: {}\r\n", crawler).as_bytes());
    block.extend_from_slice(b"\r\n");
    block
}

/// Builds the body of a redirect record
pub fn redirect_record(target: &str) -> Vec<u8> {
    format!("{}{}", REDIRECT_PREFIX, target).into_bytes()
}
