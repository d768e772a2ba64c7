//! Validation message model and message-resource lookup.
//!
//! The web framework records validation errors as [`ActionMessages`] in the
//! request (or, after a redirect, the session). Each message is either a
//! resource key to be resolved for the user's locale, or literal text.

use std::collections::HashMap;
use thiserror::Error;

/// Property name used for messages that are not bound to a form field.
pub const GLOBAL_PROPERTY_KEY: &str = "_global";

/// Attribute key under which the framework stores action errors.
pub const ACTION_ERRORS_KEY: &str = "mixview.action_errors";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("Not found the message resource '{key}' for locale '{locale}'")]
    NotFound { locale: String, key: String },
}

/// A single recorded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMessage {
    key: String,
    values: Vec<String>,
    resource: bool,
}

impl ActionMessage {
    /// A message whose key must be resolved against message resources.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: Vec::new(),
            resource: true,
        }
    }

    /// A message whose key is already the display text.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            key: text.into(),
            values: Vec::new(),
            resource: false,
        }
    }

    /// Adds a value substituted for `{n}` placeholders in the resolved text.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_resource(&self) -> bool {
        self.resource
    }
}

/// Messages grouped by property, in the order properties were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionMessages {
    entries: Vec<(String, Vec<ActionMessage>)>,
}

impl ActionMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, property: impl Into<String>, message: ActionMessage) {
        let property = property.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some((_, list)) => list.push(message),
            None => self.entries.push((property, vec![message])),
        }
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(mut self, property: impl Into<String>, message: ActionMessage) -> Self {
        self.add(property, message);
        self
    }

    pub fn add_global(&mut self, message: ActionMessage) {
        self.add(GLOBAL_PROPERTY_KEY, message);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, list)| list.is_empty())
    }

    pub fn size(&self) -> usize {
        self.entries.iter().map(|(_, list)| list.len()).sum()
    }

    pub fn size_of(&self, property: &str) -> usize {
        self.messages_of(property).len()
    }

    pub fn has_message_of(&self, property: &str) -> bool {
        !self.messages_of(property).is_empty()
    }

    pub fn has_message_key_of(&self, property: &str, key: &str) -> bool {
        self.messages_of(property).iter().any(|m| m.key() == key)
    }

    /// Property names in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    pub fn messages_of(&self, property: &str) -> &[ActionMessage] {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }

    /// All messages flattened, property by property.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionMessage)> {
        self.entries
            .iter()
            .flat_map(|(p, list)| list.iter().map(move |m| (p.as_str(), m)))
    }
}

/// Locale-aware lookup of message resources.
pub trait MessageResolver: Send + Sync {
    fn resolve(&self, locale: &str, key: &str) -> Result<String, MessageError>;
}

/// A message resolver backed by per-locale tables.
///
/// Lookups that miss the requested locale fall back to the default table
/// (registered under the empty locale `""`).
#[derive(Debug, Default, Clone)]
pub struct InMemoryMessageResolver {
    tables: HashMap<String, HashMap<String, String>>,
}

impl InMemoryMessageResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.tables
            .entry(locale.into())
            .or_default()
            .insert(key.into(), text.into());
        self
    }

    /// Registers a message in the default table.
    pub fn with_default(self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_message("", key, text)
    }
}

impl MessageResolver for InMemoryMessageResolver {
    fn resolve(&self, locale: &str, key: &str) -> Result<String, MessageError> {
        self.tables
            .get(locale)
            .and_then(|t| t.get(key))
            .or_else(|| self.tables.get("").and_then(|t| t.get(key)))
            .cloned()
            .ok_or_else(|| MessageError::NotFound {
                locale: locale.to_string(),
                key: key.to_string(),
            })
    }
}

/// Replaces `{0}`, `{1}`, ... in `text` with the given values.
pub fn fill_placeholders(text: &str, values: &[String]) -> String {
    values
        .iter()
        .enumerate()
        .fold(text.to_string(), |acc, (i, v)| acc.replace(&format!("{{{}}}", i), v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_property_insertion_order() {
        let messages = ActionMessages::new()
            .with("seaName", ActionMessage::new("errors.required"))
            .with(GLOBAL_PROPERTY_KEY, ActionMessage::literal("system busy"))
            .with("seaName", ActionMessage::new("errors.too_long"));

        let props: Vec<_> = messages.properties().collect();
        assert_eq!(props, vec!["seaName", GLOBAL_PROPERTY_KEY]);
        assert_eq!(messages.size(), 3);
        assert_eq!(messages.size_of("seaName"), 2);
        assert!(messages.has_message_key_of("seaName", "errors.too_long"));
        assert!(!messages.has_message_of("landName"));

        let flat: Vec<_> = messages.iter().map(|(_, m)| m.key()).collect();
        assert_eq!(
            flat,
            vec!["errors.required", "errors.too_long", "system busy"]
        );
    }

    #[test]
    fn test_empty_messages() {
        let messages = ActionMessages::new();
        assert!(messages.is_empty());
        assert!(messages.messages_of("any").is_empty());
    }

    #[test]
    fn test_resolver_falls_back_to_default_locale() {
        let resolver = InMemoryMessageResolver::new()
            .with_default("errors.required", "is required")
            .with_message("ja", "errors.required", "必須です");

        assert_eq!(resolver.resolve("ja", "errors.required").unwrap(), "必須です");
        assert_eq!(resolver.resolve("en", "errors.required").unwrap(), "is required");
        assert!(matches!(
            resolver.resolve("en", "errors.unknown"),
            Err(MessageError::NotFound { .. })
        ));
    }

    #[test]
    fn test_fill_placeholders() {
        let values = vec!["10".to_string(), "name".to_string()];
        assert_eq!(
            fill_placeholders("{1} must be at most {0} chars", &values),
            "name must be at most 10 chars"
        );
        assert_eq!(fill_placeholders("plain", &[]), "plain");
    }
}
