use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::chat::Tool;
use crate::deck::Deck;

use super::error::ToolError;

pub type ToolExecutor = Arc<dyn Fn(&mut Deck, Value) -> Result<String, ToolError> + Send + Sync>;

/// A named deck operation plus the schema advertised for it.
#[derive(Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// Gerund phrase used in error text, e.g. "reordering slide".
    pub action: &'static str,
    pub params: Vec<ToolParam>,
    pub required: Vec<&'static str>,
    pub executor: ToolExecutor,
}

/// One argument of a tool. `items` holds the JSON type of array elements,
/// outermost first, so `["array", "string"]` is a list of string lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolParam {
    pub name: &'static str,
    pub description: &'static str,
    pub param_type: &'static str,
    pub items: Vec<&'static str>,
}

impl ToolParam {
    pub fn simple(name: &'static str, description: &'static str, param_type: &'static str) -> Self {
        Self {
            name,
            description,
            param_type,
            items: Vec::new(),
        }
    }

    pub fn array(name: &'static str, description: &'static str, item_type: &'static str) -> Self {
        Self {
            name,
            description,
            param_type: "array",
            items: vec![item_type],
        }
    }

    /// An array of arrays of `inner_type`.
    pub fn nested_array(
        name: &'static str,
        description: &'static str,
        inner_type: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            param_type: "array",
            items: vec!["array", inner_type],
        }
    }

    fn schema(&self) -> Value {
        let mut schema = json!({ "type": self.param_type });
        if !self.description.is_empty() {
            schema["description"] = json!(self.description);
        }
        let items = self
            .items
            .iter()
            .rev()
            .fold(None, |inner: Option<Value>, item_type| {
                let mut item = json!({ "type": item_type });
                if let Some(inner) = inner {
                    item["items"] = inner;
                }
                Some(item)
            });
        if let Some(items) = items {
            schema["items"] = items;
        }
        schema
    }
}

impl ToolDefinition {
    /// JSON Schema of the arguments object.
    pub fn parameters_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|param| (param.name.to_string(), param.schema()))
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": self.required,
        })
    }

    /// The entry advertised to the model.
    pub fn tool(&self) -> Tool {
        Tool::function(self.name, self.description, self.parameters_schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(params: Vec<ToolParam>, required: Vec<&'static str>) -> ToolDefinition {
        ToolDefinition {
            name: "sample",
            description: "Sample tool",
            action: "sampling",
            params,
            required,
            executor: Arc::new(|_deck: &mut Deck, _args: Value| {
                Ok::<_, ToolError>(String::new())
            }),
        }
    }

    #[test]
    fn object_schema_lists_required_fields() {
        let def = definition(
            vec![
                ToolParam::simple("from_index", "", "integer"),
                ToolParam::simple("to_index", "target", "integer"),
            ],
            vec!["from_index", "to_index"],
        );

        let tool = def.tool();
        assert_eq!(tool.tool_type, "function");
        assert_eq!(tool.function.name, "sample");
        assert_eq!(
            tool.function.parameters,
            json!({
                "type": "object",
                "properties": {
                    "from_index": {"type": "integer"},
                    "to_index": {"type": "integer", "description": "target"}
                },
                "required": ["from_index", "to_index"]
            })
        );
    }

    #[test]
    fn arrays_nest_item_schemas() {
        let def = definition(
            vec![
                ToolParam::array("points", "Bullets", "string"),
                ToolParam::nested_array("columns", "Grid", "string"),
            ],
            Vec::new(),
        );

        let schema = def.parameters_schema();
        assert_eq!(
            schema["properties"]["points"],
            json!({"type": "array", "description": "Bullets", "items": {"type": "string"}})
        );
        assert_eq!(
            schema["properties"]["columns"]["items"],
            json!({"type": "array", "items": {"type": "string"}})
        );
        assert_eq!(schema["required"], json!([]));
    }
}
