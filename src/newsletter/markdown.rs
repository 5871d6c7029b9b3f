//! Read-side codec for content strings that interleave plain text with
//! markdown image tokens (`![alt](reference)`).
//!
//! [`split`] yields render-ready [`Segment`]s in document order and [`strip`]
//! drops every token, keeping only the text. Both are driven by the same
//! single-pass scanner, [`find_image_token`].

const TOKEN_OPEN: &str = "![";
const ALT_CLOSE: &str = "](";
const INLINE_IMAGE_MARKER: &str = "data:image/";

/// One `![alt](reference)` occurrence, with byte offsets into the scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageToken<'a> {
    pub start: usize,
    pub end: usize,
    pub alt: &'a str,
    pub reference: &'a str,
}

/// A render-ready piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Trimmed, non-empty text.
    Text(&'a str),
    /// The reference captured from an image token (URL or data URI).
    Image(&'a str),
}

/// Find the first image token starting at or after byte offset `from`.
///
/// A token never spans a line break. The alt text ends at the first `](`
/// and the reference at the first `)` after it. Runs in linear time: once
/// an opener fails to close, no later opener on the same line can close
/// either, so scanning resumes at the line break.
pub fn find_image_token(content: &str, from: usize) -> Option<ImageToken<'_>> {
    let mut search = from;
    while search < content.len() {
        let start = search + content.get(search..)?.find(TOKEN_OPEN)?;
        match token_at(content, start) {
            Ok(token) => return Some(token),
            Err(line_end) => search = line_end,
        }
    }
    None
}

/// The token opening at `start`, or the offset of the line break (or end of
/// input) where the attempt gave up.
fn token_at(content: &str, start: usize) -> Result<ImageToken<'_>, usize> {
    let bytes = content.as_bytes();
    let alt_start = start + TOKEN_OPEN.len();

    let mut pos = alt_start;
    let alt_end = loop {
        match bytes.get(pos) {
            None | Some(b'\n' | b'\r') => return Err(pos),
            Some(b']') if bytes.get(pos + 1) == Some(&b'(') => break pos,
            Some(_) => pos += 1,
        }
    };

    let reference_start = alt_end + ALT_CLOSE.len();
    pos = reference_start;
    let reference_end = loop {
        match bytes.get(pos) {
            None | Some(b'\n' | b'\r') => return Err(pos),
            Some(b')') => break pos,
            Some(_) => pos += 1,
        }
    };

    Ok(ImageToken {
        start,
        end: reference_end + 1,
        alt: &content[alt_start..alt_end],
        reference: &content[reference_start..reference_end],
    })
}

/// Whether a text fragment carries an inlined base64 image payload.
pub fn looks_like_inline_image(text: &str) -> bool {
    text.contains(INLINE_IMAGE_MARKER)
}

fn renderable(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() || looks_like_inline_image(trimmed) {
        None
    } else {
        Some(trimmed)
    }
}

/// Lazy segment iterator returned by [`split`]. Clone it to restart.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    content: &'a str,
    cursor: usize,
    pending: Option<&'a str>,
    done: bool,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(reference) = self.pending.take() {
                return Some(Segment::Image(reference));
            }
            if self.done {
                return None;
            }

            let (text, next_cursor) = match find_image_token(self.content, self.cursor) {
                Some(token) => {
                    self.pending = Some(token.reference);
                    (&self.content[self.cursor..token.start], token.end)
                }
                None => {
                    self.done = true;
                    (&self.content[self.cursor..], self.content.len())
                }
            };
            self.cursor = next_cursor;

            if let Some(text) = renderable(text) {
                return Some(Segment::Text(text));
            }
        }
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

/// Split `content` into text and image segments in document order.
///
/// Empty text between tokens, and text that is itself an inlined image
/// payload, is suppressed.
pub fn split(content: &str) -> Segments<'_> {
    Segments {
        content,
        cursor: 0,
        pending: None,
        done: false,
    }
}

/// Remove every image token, keeping the surrounding text untouched.
pub fn strip(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    while let Some(token) = find_image_token(content, cursor) {
        out.push_str(&content[cursor..token.start]);
        cursor = token.end;
    }
    out.push_str(&content[cursor..]);
    out
}

/// Format a single image token.
pub fn image_token(alt: &str, reference: &str) -> String {
    format!("![{alt}]({reference})")
}
