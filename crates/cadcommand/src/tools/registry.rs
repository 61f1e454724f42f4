//! Tool registry keyed by tool name.

use std::collections::HashMap;

use super::schema::ToolDefinition;

/// Registry holding tool definitions in registration order.
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. Panics if a tool with the same name already exists.
    pub fn register(&mut self, tool: ToolDefinition) {
        if self.index.contains_key(&tool.name) {
            panic!("duplicate tool: {}", tool.name);
        }
        self.index.insert(tool.name.clone(), self.tools.len());
        self.tools.push(tool);
    }

    pub fn lookup(&self, name: &str) -> Option<&ToolDefinition> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    /// Tools in the order they were registered.
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_tool(name: &str) -> ToolDefinition {
        ToolDefinition {
            name: name.to_string(),
            description: String::new(),
            input_schema: json!({}),
            handler: Box::new(|_, _| Ok(json!({}))),
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut reg = ToolRegistry::new();
        reg.register(make_tool("draw_line"));
        assert!(reg.lookup("draw_line").is_some());
        assert!(reg.lookup("draw_spline").is_none());
    }

    #[test]
    #[should_panic(expected = "duplicate tool")]
    fn duplicate_tool_panics() {
        let mut reg = ToolRegistry::new();
        reg.register(make_tool("draw_line"));
        reg.register(make_tool("draw_line"));
    }

    #[test]
    fn names_keep_registration_order() {
        let mut reg = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            reg.register(make_tool(name));
        }
        assert_eq!(reg.names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(reg.len(), 3);
        assert!(!reg.is_empty());
    }
}
