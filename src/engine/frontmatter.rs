//! YAML front matter parsing.
//!
//! A template may open with a `---` delimited YAML block carrying metadata
//! (description, allowed tools, and whatever else the authoring surface
//! records). The block is optional; everything after it is the body handed
//! to the expansion pipeline.

use serde_json::Value;

use crate::error::{Result, StrudelError};

/// A template split into metadata and body. Immutable once built.
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    /// Front matter as a JSON object; empty object when absent.
    pub metadata: Value,
    /// Template text after the front matter block.
    pub body: String,
    /// The unmodified input.
    pub raw: String,
}

/// Split a raw template into metadata and body.
pub fn parse(raw: &str) -> Result<ParsedTemplate> {
    let (metadata, body) = match split_front_matter(raw) {
        Some((yaml, body)) => (parse_metadata(yaml)?, body.to_string()),
        None => (empty_metadata(), raw.to_string()),
    };

    Ok(ParsedTemplate {
        metadata,
        body,
        raw: raw.to_string(),
    })
}

fn empty_metadata() -> Value {
    Value::Object(serde_json::Map::new())
}

fn parse_metadata(yaml: &str) -> Result<Value> {
    if yaml.trim().is_empty() {
        return Ok(empty_metadata());
    }

    let metadata: Value = serde_yaml_ng::from_str(yaml)
        .map_err(|e| StrudelError::Parse(e.to_string()))?;

    if !metadata.is_object() {
        return Err(StrudelError::Parse(
            "front matter must be a YAML mapping".to_string(),
        ));
    }

    Ok(metadata)
}

/// Returns `(yaml, body)` when the text opens with a front matter block.
/// An unterminated block is treated as plain body text.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let after_open = raw.strip_prefix("---\n")?;

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_metadata_and_body() {
        let template = parse("---\ndescription: review a file\nmodel: fast\n---\nbody text\n")
            .unwrap();
        assert_eq!(template.metadata["description"], "review a file");
        assert_eq!(template.metadata["model"], "fast");
        assert_eq!(template.body, "body text\n");
    }

    #[test]
    fn absent_front_matter_yields_empty_metadata() {
        let template = parse("just a body\n").unwrap();
        assert!(template.metadata.as_object().unwrap().is_empty());
        assert_eq!(template.body, "just a body\n");
        assert_eq!(template.raw, "just a body\n");
    }

    #[test]
    fn empty_front_matter_block_is_valid() {
        let template = parse("---\n---\nbody\n").unwrap();
        assert!(template.metadata.as_object().unwrap().is_empty());
        assert_eq!(template.body, "body\n");
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let result = parse("---\ndescription: [unclosed\n---\nbody\n");
        assert!(matches!(result, Err(StrudelError::Parse(_))));
    }

    #[test]
    fn non_mapping_front_matter_is_rejected() {
        let result = parse("---\n- a\n- b\n---\nbody\n");
        assert!(matches!(result, Err(StrudelError::Parse(_))));
    }

    #[test]
    fn unterminated_block_is_plain_body() {
        let template = parse("---\ndescription: oops\nno closing line\n").unwrap();
        assert!(template.metadata.as_object().unwrap().is_empty());
        assert_eq!(template.body, "---\ndescription: oops\nno closing line\n");
    }

    #[test]
    fn dashes_mid_document_are_not_front_matter() {
        let template = parse("intro\n---\nnot metadata\n").unwrap();
        assert!(template.metadata.as_object().unwrap().is_empty());
        assert_eq!(template.body, "intro\n---\nnot metadata\n");
    }

    #[test]
    fn raw_preserves_the_original_input() {
        let input = "---\na: 1\n---\nbody\n";
        let template = parse(input).unwrap();
        assert_eq!(template.raw, input);
    }
}
