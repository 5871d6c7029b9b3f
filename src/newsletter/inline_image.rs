use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const DATA_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// An image carried inline as a `data:<mime>;base64,<payload>` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime: String,
    pub data: Vec<u8>,
}

impl InlineImage {
    /// Decode a data URI. Returns `None` for remote references and for
    /// payloads that are not valid base64.
    pub fn parse(reference: &str) -> Option<Self> {
        let rest = reference.trim().strip_prefix(DATA_SCHEME)?;
        let (mime, payload) = rest.split_once(BASE64_MARKER)?;
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let data = STANDARD.decode(compact).ok()?;
        Some(Self {
            mime: mime.to_ascii_lowercase(),
            data,
        })
    }

    /// File extension for the MIME type; `bin` when unknown.
    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "image/svg+xml" => "svg",
            _ => "bin",
        }
    }
}

pub fn is_inline(reference: &str) -> bool {
    reference.trim_start().starts_with(DATA_SCHEME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_data_uri() {
        let image = InlineImage::parse("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.data, b"hello");
        assert_eq!(image.extension(), "png");
    }

    #[test]
    fn tolerates_wrapped_payload() {
        let image = InlineImage::parse("data:image/JPEG;base64,aGVs\nbG8=").unwrap();
        assert_eq!(image.data, b"hello");
        assert_eq!(image.extension(), "jpg");
    }

    #[test]
    fn remote_reference_is_not_inline() {
        assert!(InlineImage::parse("http://x/y.png").is_none());
        assert!(!is_inline("http://x/y.png"));
        assert!(is_inline("data:image/png;base64,AAAA"));
    }

    #[test]
    fn invalid_payload_is_rejected() {
        assert!(InlineImage::parse("data:image/png;base64,@@@").is_none());
        assert!(InlineImage::parse("data:image/png,raw").is_none());
    }

    #[test]
    fn unknown_mime_gets_bin_extension() {
        let image = InlineImage::parse("data:image/x-custom;base64,AAAA").unwrap();
        assert_eq!(image.extension(), "bin");
    }
}
