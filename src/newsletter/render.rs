use super::inline_image::{InlineImage, is_inline};
use super::markdown::{Segment, split};

/// One-line placeholder for an image reference.
pub fn describe_image(reference: &str) -> String {
    if !is_inline(reference) {
        return format!("[image: {reference}]");
    }
    match InlineImage::parse(reference) {
        Some(image) => format!("[inline image: {}, {} bytes]", image.mime, image.data.len()),
        None => "[inline image: unreadable]".to_string(),
    }
}

/// Render content as terminal text: text segments verbatim, images as
/// placeholders, segments separated by blank lines.
pub fn render_plain(content: &str) -> String {
    split(content)
        .map(|segment| match segment {
            Segment::Text(text) => text.to_string(),
            Segment::Image(reference) => describe_image(reference),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_text_and_remote_image() {
        let rendered = render_plain("Hello\n\n![Generated Image](http://x/y.png)");
        assert_eq!(rendered, "Hello\n\n[image: http://x/y.png]");
    }

    #[test]
    fn renders_inline_image_summary() {
        let rendered = render_plain("Hi ![g](data:image/png;base64,aGVsbG8=)");
        assert_eq!(rendered, "Hi\n\n[inline image: image/png, 5 bytes]");
    }

    #[test]
    fn unreadable_inline_image() {
        assert_eq!(
            describe_image("data:image/png;base64,@@"),
            "[inline image: unreadable]"
        );
    }

    #[test]
    fn empty_content_renders_empty() {
        assert_eq!(render_plain(""), "");
    }
}
