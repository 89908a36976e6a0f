use std::fmt;
use std::path::Path;

/// Content classification derived from a file's extension.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ContentKind {
    Script,
    Wasm,
    Text,
}

impl ContentKind {
    /// Classify by extension only, the content is never inspected.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("js") => ContentKind::Script,
            Some("wasm") => ContentKind::Wasm,
            _ => ContentKind::Text,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ContentKind::Script => "application/javascript",
            ContentKind::Wasm => "application/wasm",
            ContentKind::Text => "text/plain",
        }
    }

    /// Whether the content is loaded as UTF-8 text rather than raw bytes
    pub fn is_text(self) -> bool {
        !matches!(self, ContentKind::Wasm)
    }

    /// MIME type as written into a data URI, with a charset for text content.
    pub fn data_uri_mime(self) -> String {
        if self.is_text() {
            format!("{};charset=utf-8", self.mime_type())
        } else {
            self.mime_type().to_string()
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}
