use crate::loader::Content;
use crate::mime::ContentKind;
use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};

/// Browser import map with a single `imports` table.
///
/// Entries keep insertion order. Registering a specifier that is already
/// present replaces the earlier data URI.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportMap {
    imports: Map<String, Value>,
}

impl ImportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `specifier` to a data URI holding `content`.
    pub fn insert(&mut self, specifier: &str, kind: ContentKind, content: &Content) {
        let uri = data_uri(kind, content);
        debug!(
            "Registering {specifier} as {kind} ({} bytes, {} encoded)",
            content.len(),
            uri.len()
        );
        if self
            .imports
            .insert(specifier.to_string(), Value::String(uri))
            .is_some()
        {
            warn!("Specifier {specifier} registered twice, keeping the last entry");
        }
    }

    pub fn get(&self, specifier: &str) -> Option<&str> {
        self.imports.get(specifier).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn specifiers(&self) -> impl Iterator<Item = &str> {
        self.imports.keys().map(String::as_str)
    }

    /// Pretty-printed JSON with two space indentation.
    pub fn to_json(&self) -> String {
        // Map of strings to strings always serializes
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn to_script_tag(&self) -> String {
        format!("<script type=\"importmap\">\n{}\n</script>", self.to_json())
    }
}

/// `data:<mime>,<percent-encoded content>`
pub fn data_uri(kind: ContentKind, content: &Content) -> String {
    format!("data:{},{}", kind.data_uri_mime(), content.percent_encode())
}
