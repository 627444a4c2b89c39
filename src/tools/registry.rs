use serde_json::Value;

use crate::chat::Tool;
use crate::config::ToolsConfig;
use crate::deck::Deck;
use crate::ToolCall;

use super::definition::ToolDefinition;
use super::error::ToolError;
use super::handlers::deck_tools;

/// Prefix of the result text for a tool name the registry does not know.
pub const UNKNOWN_TOOL_PREFIX: &str = "Unknown tool: ";

/// Maps tool names to their schema and handler.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl ToolRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every deck tool.
    pub fn deck_tools() -> Self {
        Self { tools: deck_tools() }
    }

    /// Deck tools, narrowed to `config.enabled` when that list is non-empty.
    pub fn from_config(config: &ToolsConfig) -> Self {
        let mut registry = Self::deck_tools();
        if !config.enabled.is_empty() {
            registry
                .tools
                .retain(|tool| config.enabled.iter().any(|name| name == tool.name));
        }
        registry
    }

    /// Adds a tool, replacing any tool registered under the same name.
    pub fn register(&mut self, definition: ToolDefinition) {
        self.tools.retain(|t| t.name != definition.name);
        self.tools.push(definition);
    }

    /// Get the list of tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool catalog advertised to the model.
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDefinition::tool).collect()
    }

    /// Runs a tool and returns its result text. Never fails: unknown tools and
    /// handler errors come back as text for the model to read.
    pub fn execute(&self, name: &str, args_json: &str, deck: &mut Deck) -> String {
        match self.try_execute(name, args_json, deck) {
            Ok(output) => output,
            Err(ToolError::NotFound(name)) => {
                log::warn!("model called unknown tool {name}");
                format!("{UNKNOWN_TOOL_PREFIX}{name}")
            }
            Err(err) => {
                let action = self.find(name).map(|tool| tool.action).unwrap_or("running tool");
                log::warn!("tool {name} failed: {err}");
                format!("Error {action}: {err}")
            }
        }
    }

    pub fn execute_call(&self, call: &ToolCall, deck: &mut Deck) -> String {
        self.execute(&call.function.name, &call.function.arguments, deck)
    }

    pub fn try_execute(
        &self,
        name: &str,
        args_json: &str,
        deck: &mut Deck,
    ) -> Result<String, ToolError> {
        let tool = self
            .find(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        let args = parse_args(args_json)?;
        log::debug!("executing tool {name}");
        (tool.executor)(deck, args)
    }

    fn find(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|tool| tool.name == name)
    }
}

fn parse_args(raw: &str) -> Result<Value, ToolError> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    match serde_json::from_str(raw) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(other) => Err(ToolError::InvalidArgs(format!(
            "expected a JSON object, got {other}"
        ))),
        Err(err) => Err(ToolError::InvalidArgs(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::deck::SlideKind;
    use crate::tools::ToolParam;

    #[test]
    fn unknown_tool_yields_sentinel() {
        let registry = ToolRegistry::deck_tools();
        let mut deck = Deck::new();
        let out = registry.execute("delete_everything", "{}", &mut deck);
        assert_eq!(out, "Unknown tool: delete_everything");
        assert!(deck.is_empty());
    }

    #[rstest]
    #[case::malformed_json("reorder_slide", "{not json", "Error reordering slide: ")]
    #[case::negative_index("reorder_slide", r#"{"from_index": -1, "to_index": 0}"#, "Error reordering slide: ")]
    #[case::missing_points("set_agenda_slide", "{}", "Error setting agenda slide: ")]
    #[case::empty_points("set_agenda_slide", r#"{"points": []}"#, "Error setting agenda slide: ")]
    #[case::too_many_columns(
        "add_content_slide",
        r#"{"title": "t", "columns": [["a"], ["b"], ["c"], ["d"]]}"#,
        "Error adding content slide: "
    )]
    #[case::wrong_type("set_title_slide", r#"{"title": 5}"#, "Error setting title slide: ")]
    fn handler_errors_become_text(
        #[case] name: &str,
        #[case] args: &str,
        #[case] prefix: &str,
    ) {
        let registry = ToolRegistry::deck_tools();
        let mut deck = Deck::new();
        deck.add_content_slide("only", None, vec![vec!["x".into()]])
            .expect("content");
        let before = deck.clone();
        let out = registry.execute(name, args, &mut deck);
        assert!(out.starts_with(prefix), "unexpected output: {out}");
        assert_eq!(deck, before);
    }

    #[test]
    fn executes_deck_scenario() {
        let registry = ToolRegistry::deck_tools();
        let mut deck = Deck::new();
        registry.execute(
            "set_title_slide",
            &json!({"title": "T", "subtitle": "S", "authors": ["A"], "date": "2024"}).to_string(),
            &mut deck,
        );
        registry.execute("set_agenda_slide", r#"{"points": ["x", "y"]}"#, &mut deck);
        registry.execute(
            "add_content_slide",
            r#"{"title": "C", "subtitle": "c", "columns": [["p1"], ["p2"]]}"#,
            &mut deck,
        );
        let out = registry.execute("reorder_slide", r#"{"from_index": 2, "to_index": 0}"#, &mut deck);
        assert!(!out.starts_with("Error"), "{out}");
        assert_eq!(
            deck.kinds(),
            vec![SlideKind::Content, SlideKind::Title, SlideKind::Agenda]
        );
    }

    #[test]
    fn from_config_filters_enabled_tools() {
        let config = ToolsConfig {
            enabled: vec!["reorder_slide".into(), "get_deck_outline".into()],
        };
        let registry = ToolRegistry::from_config(&config);
        assert_eq!(registry.tool_names(), vec!["reorder_slide", "get_deck_outline"]);
        assert!(!registry.has_tool("set_title_slide"));
    }

    #[rstest]
    #[case::array("reorder_slide", "[2, 0]")]
    #[case::string("add_content_slide", "\"C\"")]
    #[case::null("set_agenda_slide", "null")]
    fn non_object_arguments_are_rejected(#[case] name: &str, #[case] args: &str) {
        let registry = ToolRegistry::deck_tools();
        let mut deck = Deck::new();
        deck.add_content_slide("a", None, vec![vec!["x".into()]])
            .expect("content");
        deck.add_content_slide("b", None, vec![vec!["y".into()]])
            .expect("content");
        deck.add_content_slide("c", None, vec![vec!["z".into()]])
            .expect("content");
        let before = deck.clone();

        let err = registry.try_execute(name, args, &mut deck).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgs(_)));
        assert_eq!(deck, before);
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = ToolRegistry::deck_tools();
        let count = registry.len();
        registry.register(ToolDefinition {
            name: "get_deck_outline",
            description: "custom outline",
            action: "reading outline",
            params: vec![ToolParam::simple("verbose", "unused", "boolean")],
            required: Vec::new(),
            executor: Arc::new(|deck: &mut Deck, _args: Value| {
                Ok::<_, ToolError>(format!("{} slides", deck.len()))
            }),
        });
        assert_eq!(registry.len(), count);
        let mut deck = Deck::new();
        assert_eq!(registry.execute("get_deck_outline", "", &mut deck), "0 slides");
    }

    #[test]
    fn catalog_advertises_every_tool() {
        let registry = ToolRegistry::deck_tools();
        let catalog = registry.tools();
        let names: Vec<_> = catalog.iter().map(|t| t.function.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "set_title_slide",
                "set_agenda_slide",
                "add_content_slide",
                "reorder_slide",
                "get_deck_outline"
            ]
        );
        let content = &catalog[2].function.parameters;
        assert_eq!(content["properties"]["columns"]["items"]["items"]["type"], "string");
        assert_eq!(content["required"], json!(["title", "columns"]));
    }
}
