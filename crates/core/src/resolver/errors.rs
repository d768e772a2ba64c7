//! Injects validation errors into placeholder elements.

use crate::config::ErrorsConvention;
use crate::error::RenderError;
use crate::messages::{ErrorMessages, ResolvedMessage};
use crate::supporter::MixSupporter;
use mixview_dom::{Element, HtmlDocument, Node, TagKind};
use mixview_traits::{ACTION_ERRORS_KEY, GLOBAL_PROPERTY_KEY};

const ALL_NAME: &str = "all";
const GLOBAL_NAME: &str = "global";
const DATA_KEY: &str = "errors";
const ID_PREFIX: &str = "errors-";

#[derive(Debug, Clone)]
pub struct ErrorsResolver {
    convention: ErrorsConvention,
    attribute_key: String,
}

impl Default for ErrorsResolver {
    fn default() -> Self {
        Self {
            convention: ErrorsConvention::default(),
            attribute_key: ACTION_ERRORS_KEY.to_string(),
        }
    }
}

impl ErrorsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn convention(mut self, convention: ErrorsConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Request/session attribute holding the errors.
    pub fn attribute_key(mut self, key: impl Into<String>) -> Self {
        self.attribute_key = key.into();
        self
    }

    /// Fills every error placeholder of the body. Without errors nothing
    /// changes.
    pub fn resolve(&self, html: &mut HtmlDocument, supporter: &MixSupporter<'_>) -> Result<(), RenderError> {
        let messages = ErrorMessages::from_request(supporter.request(), &self.attribute_key);
        if messages.is_empty() {
            return Ok(());
        }
        let Some(body) = html.body_mut() else {
            return Ok(());
        };

        // resolved on the first `all` placeholder only
        let mut all: Option<Vec<ResolvedMessage>> = None;
        let convention = self.convention;
        supporter.search_mut(
            body,
            |e| placeholder_name(e, convention).is_some(),
            |placeholder| {
                let Some(name) = placeholder_name(placeholder, convention).map(str::to_string) else {
                    return Ok(());
                };
                if name.eq_ignore_ascii_case(ALL_NAME) {
                    if all.is_none() {
                        all = Some(messages.all()?);
                    }
                    if let Some(all) = &all {
                        placeholder.replace_inner(vec![message_list(all).into()]);
                    }
                } else {
                    let property = to_property_name(&name);
                    if messages.exists(property) {
                        let joined = messages
                            .part(property)?
                            .iter()
                            .map(ResolvedMessage::message)
                            .collect::<Vec<_>>()
                            .join(", ");
                        placeholder.replace_inner_text(joined);
                    }
                }
                Ok(())
            },
        )
    }
}

fn placeholder_name(element: &Element, convention: ErrorsConvention) -> Option<&str> {
    match convention {
        ErrorsConvention::DataAttribute => element.data(DATA_KEY),
        ErrorsConvention::IdPrefix => element.id().and_then(|id| id.strip_prefix(ID_PREFIX)),
    }
}

fn to_property_name(name: &str) -> &str {
    if name == GLOBAL_NAME { GLOBAL_PROPERTY_KEY } else { name }
}

fn message_list(messages: &[ResolvedMessage]) -> Element {
    let items = messages
        .iter()
        .map(|m| Node::from(Element::of(TagKind::Li).with_text(m.message())))
        .collect();
    let mut ul = Element::of(TagKind::Ul);
    ul.replace_inner(items);
    ul
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MixEngine;
    use mixview_dom::{parse_document, write_element};
    use mixview_traits::{ActionMessage, ActionMessages, StaticRequestContext};

    fn try_resolve(
        resolver: &ErrorsResolver,
        source: &str,
        messages: ActionMessages,
    ) -> Result<HtmlDocument, RenderError> {
        let mut html = parse_document(source).unwrap();
        let engine = MixEngine::default();
        let request = StaticRequestContext::new("").with_request_messages(ACTION_ERRORS_KEY, messages);
        let supporter = MixSupporter::new(&engine, &request, None);
        resolver.resolve(&mut html, &supporter)?;
        Ok(html)
    }

    fn resolve(resolver: &ErrorsResolver, source: &str, messages: ActionMessages) -> HtmlDocument {
        try_resolve(resolver, source, messages).unwrap()
    }

    fn body_of(html: &HtmlDocument) -> String {
        write_element(html.body().unwrap()).unwrap()
    }

    fn sample_messages() -> ActionMessages {
        ActionMessages::new()
            .with("fieldA", ActionMessage::literal("required"))
            .with(GLOBAL_PROPERTY_KEY, ActionMessage::literal("system busy"))
    }

    #[test]
    fn test_all_errors_become_a_list() {
        let html = resolve(
            &ErrorsResolver::new(),
            "<html><body><div data-errors=\"all\">x</div></body></html>",
            sample_messages(),
        );
        assert_eq!(
            body_of(&html),
            "<body><div data-errors=\"all\"><ul><li>required</li><li>system busy</li></ul></div></body>"
        );
    }

    #[test]
    fn test_property_errors_are_joined() {
        let messages = sample_messages().with("fieldA", ActionMessage::literal("too long"));
        let html = resolve(
            &ErrorsResolver::new(),
            "<html><body><form><span data-errors=\"fieldA\"/><span data-errors=\"global\"/><span data-errors=\"fieldB\">keep</span></form></body></html>",
            messages,
        );
        let texts: Vec<_> = html
            .body()
            .unwrap()
            .first_child_of(TagKind::Form)
            .unwrap()
            .child_elements()
            .map(|e| e.text_content())
            .collect();
        assert_eq!(texts, vec!["required, too long", "system busy", "keep"]);
    }

    #[test]
    fn test_id_prefix_convention() {
        let html = resolve(
            &ErrorsResolver::new().convention(ErrorsConvention::IdPrefix),
            "<html><body><p id=\"errors-fieldA\"/><div id=\"errors-all\"/></body></html>",
            sample_messages(),
        );
        assert_eq!(
            body_of(&html),
            "<body><p id=\"errors-fieldA\">required</p><div id=\"errors-all\"><ul><li>required</li><li>system busy</li></ul></div></body>"
        );
    }

    #[test]
    fn test_unresolvable_message_of_another_property_is_not_needed() {
        let messages = ActionMessages::new()
            .with("sea", ActionMessage::literal("required"))
            .with("land", ActionMessage::new("errors.unknown"));
        let source = "<html><body><span data-errors=\"sea\"/></body></html>";

        let html = resolve(&ErrorsResolver::new(), source, messages.clone());
        assert_eq!(body_of(&html), "<body><span data-errors=\"sea\">required</span></body>");

        let err = try_resolve(
            &ErrorsResolver::new(),
            "<html><body><div data-errors=\"all\"/></body></html>",
            messages,
        )
        .unwrap_err();
        assert!(err.to_string().contains("errors.unknown"), "{err}");
    }

    #[test]
    fn test_no_errors_is_a_no_op() {
        let source = "<html><body><div data-errors=\"all\">x</div></body></html>";
        let html = resolve(&ErrorsResolver::new(), source, ActionMessages::new());
        assert_eq!(html, parse_document(source).unwrap());
    }
}
