use crate::error::{SingleFileError, SingleFileResult};
use std::path::{Path, PathBuf};

pub const HEAD_CLOSE: &str = "</head>";
pub const ONEFILE_SUFFIX: &str = "onefile.html";

/// Insert `tag` on its own line directly before the first `</head>`.
///
/// `host_path` is only used to name the document in the error.
pub fn inject_before_head_close(
    html: &str,
    tag: &str,
    host_path: &Path,
) -> SingleFileResult<String> {
    let idx = html
        .find(HEAD_CLOSE)
        .ok_or_else(|| SingleFileError::MalformedHostDocument {
            path: host_path.to_path_buf(),
        })?;

    let mut out = String::with_capacity(html.len() + tag.len() + 1);
    out.push_str(&html[..idx]);
    out.push_str(tag);
    out.push('\n');
    out.push_str(&html[idx..]);
    Ok(out)
}

/// `page.html` -> `page.onefile.html`
pub fn default_output_path(html_file: &Path) -> PathBuf {
    html_file.with_extension(ONEFILE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_before_first_head_close() {
        let html = "<html><head><title>t</title></head><body></head></body></html>";
        let out = inject_before_head_close(html, "<script></script>", Path::new("x.html")).unwrap();
        assert_eq!(
            out,
            "<html><head><title>t</title><script></script>\n</head><body></head></body></html>"
        );
    }

    #[test]
    fn test_head_close_is_case_sensitive() {
        let html = "<html><HEAD></HEAD></html>";
        let err =
            inject_before_head_close(html, "<script></script>", Path::new("x.html")).unwrap_err();
        assert!(matches!(err, SingleFileError::MalformedHostDocument { .. }));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("web/index.html")),
            PathBuf::from("web/index.onefile.html")
        );
        assert_eq!(
            default_output_path(Path::new("page")),
            PathBuf::from("page.onefile.html")
        );
    }
}
