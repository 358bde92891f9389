//! Delta document serializer.
//!
//! Renders a model into the JSON-like document consumed by the online
//! update tooling. The format is close to JSON with a few fixed quirks:
//!
//! - the strings `"true"` and `"false"` are written as bare booleans,
//! - sequence items are always quoted, whatever their type,
//! - only embedded double quotes are escaped.
//!
//! Each pair sits on its own line, indented one space per nesting level.

use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::model::{ModelTree, ModelValue, Scalar};

/// Serializer for delta documents.
#[derive(Debug, Default)]
pub struct DeltaSerializer;

impl DeltaSerializer {
    /// Creates a new serializer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders a model into a document string.
    #[must_use]
    pub fn render(&self, tree: &ModelTree) -> String {
        let mut out = String::new();
        write_tree(&mut out, tree, "");
        out
    }

    /// Renders a model and writes it to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_to(&self, tree: &ModelTree, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render(tree))?;
        info!("Delta written to: {}", path.display());
        Ok(())
    }
}

fn write_tree(out: &mut String, tree: &ModelTree, indent: &str) {
    // An empty mapping keeps its closing indent: `{}` at the root, `{ }` one level down
    if tree.is_empty() {
        let _ = write!(out, "{{{indent}}}");
        return;
    }

    let inner = format!("{indent} ");
    out.push('{');
    let mut separator = "";
    for (key, value) in tree {
        out.push_str(separator);
        separator = ",";
        let _ = write!(out, "\n{inner}\"{}\" : ", escape_quotes(key));
        match value {
            ModelValue::Node(child) => write_tree(out, child, &inner),
            ModelValue::Scalar(scalar) => out.push_str(&format_scalar(scalar)),
            ModelValue::Sequence(items) => out.push_str(&format_sequence(items)),
        }
    }
    let _ = write!(out, "\n{indent}}}");
}

fn format_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Bool(b) => b.to_string(),
        Scalar::String(s) if s == "true" || s == "false" => s.clone(),
        Scalar::String(s) => format!("\"{}\"", escape_quotes(s)),
        other => other.to_string(),
    }
}

// Items are quoted verbatim, without escaping.
fn format_sequence(items: &[Scalar]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("\"{item}\"")).collect();
    format!("[ {} ]", quoted.join(", "))
}

fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelParser;

    fn parse(text: &str) -> ModelTree {
        ModelParser::new().parse_str(text, None).expect("model should parse")
    }

    fn render(text: &str) -> String {
        DeltaSerializer::new().render(&parse(text))
    }

    #[test]
    fn test_boolean_strings_and_escaped_quotes() {
        let rendered = render(r#"{"enabled": "true", "name": "x\"y"}"#);
        assert_eq!(rendered, "{\n \"enabled\" : true,\n \"name\" : \"x\\\"y\"\n}");
    }

    #[test]
    fn test_false_string_stays_false() {
        assert_eq!(render("a: 'false'\n"), "{\n \"a\" : false\n}");
        assert_eq!(render("a: false\n"), "{\n \"a\" : false\n}");
    }

    #[test]
    fn test_nested_indentation() {
        let rendered = render("a:\n  b:\n    c: 1\n  d: x\n");
        let expected = "{\n \"a\" : {\n  \"b\" : {\n   \"c\" : 1\n  },\n  \"d\" : \"x\"\n }\n}";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_sequence_items_always_quoted() {
        let rendered = render("Targets: [s1, 7001, true]\n");
        assert_eq!(rendered, "{\n \"Targets\" : [ \"s1\", \"7001\", \"true\" ]\n}");
    }

    #[test]
    fn test_other_scalars_unquoted() {
        let rendered = render("a: 2.5\nb: null\nc: -3\n");
        assert_eq!(rendered, "{\n \"a\" : 2.5,\n \"b\" : null,\n \"c\" : -3\n}");
    }

    #[test]
    fn test_empty_mappings() {
        assert_eq!(render("{}"), "{}");
        assert_eq!(render("a: {}\n"), "{\n \"a\" : { }\n}");
        assert_eq!(render("a: {b: {}}\n"), "{\n \"a\" : {\n  \"b\" : {  }\n }\n}");
    }

    #[test]
    fn test_keys_are_escaped() {
        let mut tree = ModelTree::new();
        tree.insert(String::from("say \"hi\""), ModelValue::from(1_i64));
        let rendered = DeltaSerializer::new().render(&tree);
        assert_eq!(rendered, "{\n \"say \\\"hi\\\"\" : 1\n}");
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("diffed_model.json");
        let tree = parse("a: {b: 'true'}\n");

        DeltaSerializer::new().write_to(&tree, &path).expect("write");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(written, "{\n \"a\" : {\n  \"b\" : true\n }\n}");
    }
}
