//! Conversation context
//!
//! Serializable snapshot of where a chat stands in a multi-step dialog,
//! plus whatever values earlier steps collected.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::errors::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    pub bot_id: i64,
    pub chat_id: i64,
    pub scenario: Option<String>,
    pub step: Option<String>,
    pub data: HashMap<String, Value>,
}

impl ConversationContext {
    pub fn new(bot_id: i64, chat_id: i64) -> Self {
        Self {
            bot_id,
            chat_id,
            scenario: None,
            step: None,
            data: HashMap::new(),
        }
    }

    pub fn start_scenario(&mut self, scenario: &str, step: &str) {
        self.scenario = Some(scenario.to_string());
        self.step = Some(step.to_string());
        self.data.clear();
    }

    pub fn advance(&mut self, step: &str) {
        self.step = Some(step.to_string());
    }

    pub fn is_in(&self, scenario: &str, step: &str) -> bool {
        self.scenario.as_deref() == Some(scenario) && self.step.as_deref() == Some(step)
    }

    pub fn set_data<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        self.data.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.data.get(key).and_then(|v| v.as_str()).map(str::to_string)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.data.get(key).and_then(Value::as_i64)
    }

    pub fn get_data<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_lifecycle() {
        let mut ctx = ConversationContext::new(7, 42);
        assert!(ctx.scenario.is_none());

        ctx.start_scenario("registration", "awaiting_name");
        assert!(ctx.is_in("registration", "awaiting_name"));

        ctx.set_data("name", "Alice").unwrap();
        ctx.advance("awaiting_city");
        assert!(ctx.is_in("registration", "awaiting_city"));
        assert_eq!(ctx.get_string("name"), Some("Alice".to_string()));
    }

    #[test]
    fn test_start_scenario_clears_data() {
        let mut ctx = ConversationContext::new(1, 2);
        ctx.set_data("leftover", 5).unwrap();
        ctx.start_scenario("registration", "awaiting_name");
        assert_eq!(ctx.get_i64("leftover"), None);
    }
}
