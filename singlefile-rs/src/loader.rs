use crate::error::{SingleFileError, SingleFileResult};
use crate::mime::ContentKind;
use std::fs;
use std::path::Path;

/// File content as loaded for its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Binary(Vec<u8>),
}

impl Content {
    pub fn len(&self) -> usize {
        match self {
            Content::Text(text) => text.len(),
            Content::Binary(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Percent-encode the content for use as a data URI payload
    pub fn percent_encode(&self) -> String {
        match self {
            Content::Text(text) => urlencoding::encode(text).into_owned(),
            Content::Binary(bytes) => urlencoding::encode_binary(bytes).into_owned(),
        }
    }
}

/// Read `path` as UTF-8 text or raw bytes depending on `kind`.
///
/// Any failure, including invalid UTF-8 in a text file, is a
/// [`SingleFileError::FileAccess`].
pub fn load_content(path: &Path, kind: ContentKind) -> SingleFileResult<Content> {
    let content = if kind.is_text() {
        Content::Text(fs::read_to_string(path).map_err(|e| SingleFileError::file_access(path, e))?)
    } else {
        Content::Binary(fs::read(path).map_err(|e| SingleFileError::file_access(path, e))?)
    };
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_text() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "export const a = 1;").unwrap();

        let content = load_content(file.path(), ContentKind::Script).unwrap();
        assert_eq!(content, Content::Text("export const a = 1;\n".to_string()));
    }

    #[test]
    fn test_load_binary_keeps_raw_bytes() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x00, 0x61, 0x73, 0x6d, 0xff]).unwrap();

        let content = load_content(file.path(), ContentKind::Wasm).unwrap();
        assert_eq!(content, Content::Binary(vec![0x00, 0x61, 0x73, 0x6d, 0xff]));
        assert_eq!(content.percent_encode(), "%00asm%FF");
    }

    #[test]
    fn test_invalid_utf8_text_is_file_access_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe]).unwrap();

        let err = load_content(file.path(), ContentKind::Text).unwrap_err();
        assert!(matches!(err, SingleFileError::FileAccess { .. }));
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.js");

        let err = load_content(&missing, ContentKind::Script).unwrap_err();
        match err {
            SingleFileError::FileAccess { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_percent_encode_text() {
        let content = Content::Text("import a from \"./a.js\";".to_string());
        assert_eq!(
            content.percent_encode(),
            "import%20a%20from%20%22.%2Fa.js%22%3B"
        );
    }
}
