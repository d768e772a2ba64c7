//! Contracts with the surrounding web framework.
//!
//! Rendering needs only a thin slice of the request: its context path, the
//! user's locale, previously recorded validation messages and a way to write
//! the finished page. Frameworks implement [`RequestContext`] and
//! [`ResponseWriter`] over their own request/response types.

use crate::messages::{ActionMessages, InMemoryMessageResolver, MessageResolver};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("Response already committed")]
    AlreadyCommitted,

    #[error("Failed to write response: {0}")]
    Io(#[from] std::io::Error),
}

/// Identity of the action handling the current request, used in error reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRuntime {
    pub action_name: String,
    pub method_name: String,
}

impl ActionRuntime {
    pub fn new(action_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            action_name: action_name.into(),
            method_name: method_name.into(),
        }
    }
}

impl fmt::Display for ActionRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}()", self.action_name, self.method_name)
    }
}

/// Per-request view of the framework.
pub trait RequestContext {
    /// Servlet-style context path, e.g. `/harbor`, or empty for the root context.
    fn context_path(&self) -> &str;

    fn user_locale(&self) -> &str;

    /// Messages stored as a request attribute under `key`.
    fn request_messages(&self, key: &str) -> Option<&ActionMessages>;

    /// Messages stored in the session under `key` (e.g. kept across a redirect).
    fn session_messages(&self, key: &str) -> Option<&ActionMessages>;

    fn message_resolver(&self) -> &dyn MessageResolver;
}

/// Sink for the rendered page.
pub trait ResponseWriter {
    fn write(&mut self, body: &str, content_type: &str, encoding: &str)
        -> Result<(), ResponseError>;
}

/// A response that keeps the written page in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferedResponse {
    body: Option<String>,
    content_type: Option<String>,
    encoding: Option<String>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn is_committed(&self) -> bool {
        self.body.is_some()
    }
}

impl ResponseWriter for BufferedResponse {
    fn write(
        &mut self,
        body: &str,
        content_type: &str,
        encoding: &str,
    ) -> Result<(), ResponseError> {
        if self.is_committed() {
            return Err(ResponseError::AlreadyCommitted);
        }
        self.body = Some(body.to_string());
        self.content_type = Some(content_type.to_string());
        self.encoding = Some(encoding.to_string());
        Ok(())
    }
}

/// A self-contained request context, for tests, tools and simple embedders.
#[derive(Clone)]
pub struct StaticRequestContext {
    context_path: String,
    locale: String,
    request_attributes: HashMap<String, ActionMessages>,
    session_attributes: HashMap<String, ActionMessages>,
    resolver: Arc<dyn MessageResolver>,
}

impl fmt::Debug for StaticRequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticRequestContext")
            .field("context_path", &self.context_path)
            .field("locale", &self.locale)
            .field("request_attributes", &self.request_attributes.keys().collect::<Vec<_>>())
            .field("session_attributes", &self.session_attributes.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for StaticRequestContext {
    fn default() -> Self {
        Self::new("")
    }
}

impl StaticRequestContext {
    pub fn new(context_path: impl Into<String>) -> Self {
        Self {
            context_path: context_path.into(),
            locale: "en".to_string(),
            request_attributes: HashMap::new(),
            session_attributes: HashMap::new(),
            resolver: Arc::new(InMemoryMessageResolver::new()),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_request_messages(mut self, key: impl Into<String>, messages: ActionMessages) -> Self {
        self.request_attributes.insert(key.into(), messages);
        self
    }

    pub fn with_session_messages(mut self, key: impl Into<String>, messages: ActionMessages) -> Self {
        self.session_attributes.insert(key.into(), messages);
        self
    }

    pub fn with_message_resolver(mut self, resolver: Arc<dyn MessageResolver>) -> Self {
        self.resolver = resolver;
        self
    }
}

impl RequestContext for StaticRequestContext {
    fn context_path(&self) -> &str {
        &self.context_path
    }

    fn user_locale(&self) -> &str {
        &self.locale
    }

    fn request_messages(&self, key: &str) -> Option<&ActionMessages> {
        self.request_attributes.get(key)
    }

    fn session_messages(&self, key: &str) -> Option<&ActionMessages> {
        self.session_attributes.get(key)
    }

    fn message_resolver(&self) -> &dyn MessageResolver {
        self.resolver.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{ActionMessage, ACTION_ERRORS_KEY};

    #[test]
    fn test_buffered_response_writes_once() {
        let mut response = BufferedResponse::new();
        response.write("<html/>", "text/html", "UTF-8").unwrap();
        assert_eq!(response.body(), Some("<html/>"));
        assert_eq!(response.content_type(), Some("text/html"));
        assert_eq!(response.encoding(), Some("UTF-8"));

        let err = response.write("again", "text/html", "UTF-8").unwrap_err();
        assert!(matches!(err, ResponseError::AlreadyCommitted));
    }

    #[test]
    fn test_static_context_attributes() {
        let messages = ActionMessages::new().with("seaName", ActionMessage::literal("bad"));
        let context = StaticRequestContext::new("/harbor")
            .with_locale("ja")
            .with_session_messages(ACTION_ERRORS_KEY, messages.clone());

        assert_eq!(context.context_path(), "/harbor");
        assert_eq!(context.user_locale(), "ja");
        assert!(context.request_messages(ACTION_ERRORS_KEY).is_none());
        assert_eq!(context.session_messages(ACTION_ERRORS_KEY), Some(&messages));
    }

    #[test]
    fn test_action_runtime_display() {
        let runtime = ActionRuntime::new("SeaAction", "index");
        assert_eq!(runtime.to_string(), "SeaAction@index()");
    }
}
