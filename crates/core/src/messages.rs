//! Read-only access to the validation errors recorded for a request.

use crate::error::RenderError;
use mixview_traits::messages::fill_placeholders;
use mixview_traits::{ActionMessage, ActionMessages, RequestContext};
use std::borrow::Cow;

/// A message bound to its display text for the request locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMessage {
    origin: ActionMessage,
    text: String,
}

impl ResolvedMessage {
    pub fn resolve(origin: &ActionMessage, request: &dyn RequestContext) -> Result<Self, RenderError> {
        let text = if origin.is_resource() {
            let template = request
                .message_resolver()
                .resolve(request.user_locale(), origin.key())?;
            fill_placeholders(&template, origin.values())
        } else {
            origin.key().to_string()
        };
        Ok(Self {
            origin: origin.clone(),
            text,
        })
    }

    /// The display text.
    pub fn message(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> &ActionMessage {
        &self.origin
    }
}

/// Errors found in the request attributes, else the session, else none.
pub struct ErrorMessages<'r> {
    messages: Cow<'r, ActionMessages>,
    request: &'r dyn RequestContext,
}

impl<'r> ErrorMessages<'r> {
    pub fn from_request(request: &'r dyn RequestContext, attribute_key: &str) -> Self {
        let messages = request
            .request_messages(attribute_key)
            .or_else(|| request.session_messages(attribute_key))
            .map(Cow::Borrowed)
            .unwrap_or_default();
        Self { messages, request }
    }

    /// Every message, property by property.
    pub fn all(&self) -> Result<Vec<ResolvedMessage>, RenderError> {
        self.messages
            .iter()
            .map(|(_, message)| ResolvedMessage::resolve(message, self.request))
            .collect()
    }

    /// The messages of one property.
    pub fn part(&self, property: &str) -> Result<Vec<ResolvedMessage>, RenderError> {
        self.messages
            .messages_of(property)
            .iter()
            .map(|message| ResolvedMessage::resolve(message, self.request))
            .collect()
    }

    pub fn exists(&self, property: &str) -> bool {
        self.messages.has_message_of(property)
    }

    pub fn exists_key(&self, property: &str, key: &str) -> bool {
        self.messages.has_message_key_of(property, key)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn size(&self) -> usize {
        self.messages.size()
    }

    pub fn size_of(&self, property: &str) -> usize {
        self.messages.size_of(property)
    }

    pub fn property_set(&self) -> Vec<&str> {
        self.messages.properties().collect()
    }
}

impl std::fmt::Debug for ErrorMessages<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorMessages")
            .field("messages", &self.messages)
            .finish()
    }
}
