use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized description of a validation rule.
///
/// Only the top level is structured: children of an object are reduced to their
/// type tag and description, whatever their own shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    /// Type tag of the described value; always `"object"` after translation
    pub kind: String,
    /// Fields of an object rule
    pub children: IndexMap<String, FieldSchema>,
}

impl SchemaNode {
    /// The shape every untranslatable description degrades to
    pub fn empty_object() -> Self {
        Self {
            kind: "object".to_string(),
            children: IndexMap::new(),
        }
    }
}

/// One field of an object rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Raw type tag of the field (`string`, `number`, `object`, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Field description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Named model placed in the document's `definitions` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub properties: IndexMap<String, FieldSchema>,
}

impl From<SchemaNode> for Definition {
    fn from(node: SchemaNode) -> Self {
        Self {
            properties: node.children,
        }
    }
}

/// `{ "$ref": "#/definitions/<name>" }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRef {
    #[serde(rename = "$ref")]
    pub reference: String,
}

/// Translate a raw schema description into a [`SchemaNode`].
///
/// Never fails. Only `{"type": "object", ...}` descriptions keep their fields; the field
/// map is read from `children`, falling back to `keys`. Anything else becomes an
/// object with no fields.
pub fn translate(raw: &Value) -> SchemaNode {
    let mut node = SchemaNode::empty_object();

    if raw.get("type").and_then(Value::as_str) != Some("object") {
        debug!("Schema description is not an object rule, emitting empty properties");
        return node;
    }

    let fields = raw
        .get("children")
        .or_else(|| raw.get("keys"))
        .and_then(Value::as_object);

    if let Some(fields) = fields {
        for (name, child) in fields {
            node.children.insert(
                name.clone(),
                FieldSchema {
                    kind: string_field(child, "type"),
                    description: string_field(child, "description"),
                },
            );
        }
    }

    node
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Definitions produced during one document build.
///
/// Names are `Model 1`, `Model 2`, ... in registration order. A registry is never
/// shared between builds, so numbering always restarts at 1.
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    next_id: usize,
    definitions: IndexMap<String, Definition>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate `raw` and store it under a fresh name.
    ///
    /// Returns `None` without consuming a name when `raw` is not a JSON object.
    pub fn register(&mut self, raw: &Value) -> Option<SchemaRef> {
        if !raw.is_object() {
            debug!("Ignoring non-object schema attachment: {}", raw);
            return None;
        }

        self.next_id += 1;
        let name = format!("Model {}", self.next_id);
        debug!("Registering definition {}", name);

        self.definitions.insert(name.clone(), translate(raw).into());
        Some(SchemaRef {
            reference: format!("#/definitions/{}", name),
        })
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Consume the registry, yielding the accumulated definitions
    pub fn into_definitions(self) -> IndexMap<String, Definition> {
        self.definitions
    }
}
