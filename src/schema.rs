//! Typed model of the command schema document.
//!
//! The console forwards schema text to the engine verbatim and never
//! validates it. The model exists so the editor can offer a well-formed
//! starting template and so engines written in Rust can deserialize it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON document describing dynamically registered commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSchemaDocument {
    pub commands: Vec<CommandSchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSchema {
    pub name: String,
    pub namespace: Vec<String>,
    pub hint: String,
    pub description: String,
    pub arguments: Vec<ArgumentSchema>,
    pub properties: Map<String, Value>,
    /// Engine-side routine identifier, opaque to the console
    pub routine: String,
}

impl CommandSchema {
    /// Name as typed at the prompt: `ns.sub.name`, or just `name`.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace.join("."), self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentSchema {
    pub name: String,
    pub kind: String,
    pub hint: String,
    pub description: String,
    pub properties: Map<String, Value>,
}

impl CommandSchemaDocument {
    /// Example document offered by the schema editor.
    pub fn template() -> Self {
        let mut optional = Map::new();
        optional.insert("optional".to_string(), Value::Bool(false));

        Self {
            commands: vec![CommandSchema {
                name: "greet".to_string(),
                namespace: Vec::new(),
                hint: "Say hello".to_string(),
                description: "Greets the given person by name".to_string(),
                arguments: vec![ArgumentSchema {
                    name: "name".to_string(),
                    kind: "String".to_string(),
                    hint: "Who to greet".to_string(),
                    description: "Name of the person to greet".to_string(),
                    properties: optional,
                }],
                properties: Map::new(),
                routine: "greet".to_string(),
            }],
        }
    }

    /// Pretty JSON rendering of [`CommandSchemaDocument::template`].
    pub fn template_json() -> String {
        serde_json::to_string_pretty(&Self::template()).unwrap_or_else(|_| "{ \"commands\": [] }".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_exact_field_set() {
        let value: Value = serde_json::from_str(&CommandSchemaDocument::template_json()).unwrap();
        let command = &value["commands"][0];

        let mut keys: Vec<&str> = command.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["arguments", "description", "hint", "name", "namespace", "properties", "routine"]
        );

        let mut arg_keys: Vec<&str> = command["arguments"][0]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        arg_keys.sort_unstable();
        assert_eq!(arg_keys, vec!["description", "hint", "kind", "name", "properties"]);
    }

    #[test]
    fn test_parse_namespaced_command() {
        let raw = r#"{
            "commands": [{
                "name": "list",
                "namespace": ["fs"],
                "hint": "File system listing",
                "description": "List files and directories",
                "arguments": [],
                "properties": {},
                "routine": "echo"
            }]
        }"#;
        let doc: CommandSchemaDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.commands.len(), 1);
        assert_eq!(doc.commands[0].qualified_name(), "fs.list");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let raw = r#"{ "commands": [{ "name": "x" }] }"#;
        assert!(serde_json::from_str::<CommandSchemaDocument>(raw).is_err());
    }
}
