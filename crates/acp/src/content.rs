//! Content blocks: the shared payload type for prompt turns and tool call output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentBlockType {
    Text,
    Image,
    Audio,
    ResourceLink,
    Resource,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: ContentBlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "mimeType")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Populated only for the `resource` variant: an embedded resource's own
    /// `uri`/`mimeType` plus either inline `text` or base64 `blob` content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<EmbeddedResource>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "_meta")]
    pub meta: Option<Value>,
}

/// The embedded resource payload carried by a `resource` content block, as
/// distinct from a `resource_link`'s bare `uri`/`name` reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedResource {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "mimeType")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,
}

impl ContentBlock {
    pub fn new_text(text: impl Into<String>) -> Self {
        ContentBlock {
            kind: ContentBlockType::Text,
            text: Some(text.into()),
            data: None,
            mime_type: None,
            uri: None,
            description: None,
            name: None,
            resource: None,
            meta: None,
        }
    }

    pub fn new_image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        ContentBlock {
            kind: ContentBlockType::Image,
            text: None,
            data: Some(data.into()),
            mime_type: Some(mime_type.into()),
            uri: None,
            description: None,
            name: None,
            resource: None,
            meta: None,
        }
    }

    pub fn new_resource_link(uri: impl Into<String>, name: impl Into<String>) -> Self {
        ContentBlock {
            kind: ContentBlockType::ResourceLink,
            text: None,
            data: None,
            mime_type: None,
            uri: Some(uri.into()),
            description: None,
            name: Some(name.into()),
            resource: None,
            meta: None,
        }
    }

    pub fn new_resource(resource: EmbeddedResource) -> Self {
        ContentBlock {
            kind: ContentBlockType::Resource,
            text: None,
            data: None,
            mime_type: None,
            uri: None,
            description: None,
            name: None,
            resource: Some(resource),
            meta: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_block_round_trips() {
        let block = ContentBlock::new_text("hello");
        let encoded = serde_json::to_value(&block).unwrap();
        assert_eq!(encoded["type"], "text");
        assert_eq!(encoded["text"], "hello");
        assert!(encoded.get("data").is_none());
    }

    #[test]
    fn resource_block_nests_the_embedded_resource() {
        let block = ContentBlock::new_resource(EmbeddedResource {
            uri: "file:///tmp/notes.txt".to_string(),
            mime_type: Some("text/plain".to_string()),
            text: Some("todo".to_string()),
            blob: None,
        });
        let encoded = serde_json::to_value(&block).unwrap();
        assert_eq!(encoded["type"], "resource");
        assert_eq!(encoded["resource"]["uri"], "file:///tmp/notes.txt");
        assert_eq!(encoded["resource"]["text"], "todo");
        assert!(encoded.get("text").is_none());
    }

    #[test]
    fn resource_link_is_distinct_from_resource() {
        let link = ContentBlock::new_resource_link("file:///tmp/a.rs", "a.rs");
        let encoded = serde_json::to_value(&link).unwrap();
        assert_eq!(encoded["type"], "resource_link");
        assert_eq!(encoded["uri"], "file:///tmp/a.rs");
        assert!(encoded.get("resource").is_none());
    }
}
