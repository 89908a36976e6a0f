//! Rewriting of relative module imports into the flat specifier namespace.
//!
//! Once every module is served from a `data:` URI there is no directory
//! structure left for the browser to resolve `./` and `../` against, so each
//! relative import is rewritten to the flat specifier of its target, which is
//! the key the import map binds.
//!
//! The rewriting is a textual heuristic over single-line
//! `import <binding> from "<path>"` statements. Multi-line imports, dynamic
//! `import()` calls and `export ... from` re-exports are not recognized and
//! are left as written.

use crate::specifier;
use log::debug;
use regex::{Captures, Regex};

lazy_static! {
    static ref IMPORT_RE: Regex = Regex::new(r#"(import\s+.*?\s+from\s+['"])(.*?)(['"])"#).unwrap();
    static ref SOURCE_MAP_RE: Regex = Regex::new(r"//# sourceMappingURL=.*").unwrap();
}

/// Rewrites the imports of one script so they resolve inside the import map.
///
/// Implementations only see a module's flat specifier and its source text,
/// which keeps the import map builder independent of how imports are found.
pub trait ImportRewriter {
    fn rewrite(&self, specifier: &str, source: &str) -> String;
}

/// Pattern based [`ImportRewriter`] for statically written imports.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexImportRewriter;

impl ImportRewriter for RegexImportRewriter {
    fn rewrite(&self, specifier: &str, source: &str) -> String {
        flatten_imports(specifier, source)
    }
}

pub fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Rewrite every relative import in `source` to its flat specifier.
///
/// Matches are rewritten in place, left to right, so two textually identical
/// import lines are each rewritten exactly once.
pub fn flatten_imports(specifier: &str, source: &str) -> String {
    IMPORT_RE
        .replace_all(source, |caps: &Captures| {
            let import_path = &caps[2];
            if is_absolute_url(import_path) {
                return caps[0].to_string();
            }
            let flat = specifier::resolve(specifier, import_path);
            debug!("{specifier}: rewriting import {import_path} -> {flat}");
            format!("{}{}{}", &caps[1], flat, &caps[3])
        })
        .into_owned()
}

/// Remove the first `//# sourceMappingURL=` directive, up to the end of its line.
pub fn strip_source_map_url(source: &str) -> String {
    SOURCE_MAP_RE.replacen(source, 1, "").into_owned()
}
