//! Text encoding resolution for input decoding and output encoding

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;
use std::fmt;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A resolved text encoding plus whether output should carry a BOM
#[derive(Clone, Copy, PartialEq)]
pub struct TextEncoding {
    encoding: &'static Encoding,
    bom: bool,
}

impl TextEncoding {
    /// Plain UTF-8 without a BOM
    pub fn utf8() -> Self {
        Self {
            encoding: UTF_8,
            bom: false,
        }
    }

    /// Resolve a label such as `cp949`, `utf-8` or `utf-8-sig`
    pub fn for_label(label: &str) -> Result<Self, String> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");

        let (canonical, bom) = match normalized.as_str() {
            "utf-8-sig" | "utf8-sig" => ("utf-8", true),
            "utf8" => ("utf-8", false),
            // Python and Windows code page names missing from the WHATWG table
            "cp949" | "ms949" | "uhc" => ("windows-949", false),
            "cp932" | "ms932" => ("shift_jis", false),
            "cp936" => ("gbk", false),
            "cp1252" => ("windows-1252", false),
            other => (other, false),
        };

        Encoding::for_label(canonical.as_bytes())
            .or_else(|| Encoding::for_label(label.trim().as_bytes()))
            .map(|encoding| Self { encoding, bom })
            .ok_or_else(|| format!("unknown encoding label '{}'", label))
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn writes_bom(&self) -> bool {
        self.bom
    }

    pub fn name(&self) -> String {
        if self.bom {
            format!("{} (BOM)", self.encoding.name())
        } else {
            self.encoding.name().to_string()
        }
    }

    /// Whether text can be encoded into this encoding (UTF-16 cannot)
    pub fn can_encode(&self) -> bool {
        self.encoding.output_encoding() == self.encoding
    }

    /// Decode input bytes. A leading BOM takes precedence over the label.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> ConversionResult<Cow<'a, str>> {
        let (text, used, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            return Err(ConversionError::load(ConversionErrorKind::Decode {
                encoding: used.name().to_string(),
            }));
        }
        if used != self.encoding {
            tracing::debug!(
                label = self.encoding.name(),
                detected = used.name(),
                "byte order mark overrides configured input encoding"
            );
        }
        Ok(text)
    }

    /// Encode output text, failing on characters the encoding cannot represent
    pub fn encode(&self, text: &str) -> ConversionResult<Vec<u8>> {
        if !self.can_encode() {
            return Err(ConversionError::write(
                ConversionErrorKind::UnsupportedEncoding {
                    encoding: self.encoding.name().to_string(),
                },
            ));
        }

        let (bytes, _, had_errors) = self.encoding.encode(text);
        if had_errors {
            return Err(ConversionError::write(ConversionErrorKind::Unencodable {
                encoding: self.encoding.name().to_string(),
                sample: first_unencodable(self.encoding, text).unwrap_or_default(),
            }));
        }

        let mut out = Vec::with_capacity(bytes.len() + UTF8_BOM.len());
        if self.bom && self.encoding == UTF_8 {
            out.extend_from_slice(UTF8_BOM);
        }
        out.extend_from_slice(&bytes);
        Ok(out)
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextEncoding({})", self.name())
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Find the first character the encoding has no mapping for
fn first_unencodable(encoding: &'static Encoding, text: &str) -> Option<String> {
    let mut buf = [0u8; 4];
    text.chars()
        .find(|c| {
            let (_, _, had_errors) = encoding.encode(c.encode_utf8(&mut buf));
            had_errors
        })
        .map(|c| c.to_string())
}
