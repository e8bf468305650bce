//! Metadata header handling
//!
//! A guidance document may start with a header block delimited by a pair of
//! `---` markers. The header is carried through compression byte-for-byte and
//! only the body is handed to the compressor.

/// Marker that opens and closes the header block.
pub const HEADER_DELIMITER: &str = "---";

/// A document split into its verbatim header and its body.
///
/// `header` is empty when the document has no header, or when the opening
/// marker has no matching closing marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    pub header: &'a str,
    pub body: &'a str,
}

impl Split<'_> {
    /// Whether a header block was recognised
    pub fn has_header(&self) -> bool {
        !self.header.is_empty()
    }
}

/// Split content into header and body.
///
/// The closing marker is the next `---` that starts a line. The header runs
/// through the closing marker and the line break that follows it.
pub fn split(content: &str) -> Split<'_> {
    let no_header = Split {
        header: "",
        body: content,
    };

    let Some(after_open) = content.strip_prefix(HEADER_DELIMITER) else {
        return no_header;
    };

    let closing = format!("\n{}", HEADER_DELIMITER);
    let Some(pos) = after_open.find(&closing) else {
        return no_header;
    };

    let mut end = HEADER_DELIMITER.len() + pos + closing.len();
    let rest = &content[end..];
    if rest.starts_with("\r\n") {
        end += 2;
    } else if rest.starts_with('\n') {
        end += 1;
    }

    let (header, body) = content.split_at(end);
    Split { header, body }
}

/// Reassemble a header with a (possibly transformed) body.
pub fn join(header: &str, body: &str) -> String {
    let mut content = String::with_capacity(header.len() + body.len());
    content.push_str(header);
    content.push_str(body);
    content
}
