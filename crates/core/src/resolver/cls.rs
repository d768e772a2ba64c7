//! Expands `<option data-cls="Name">` placeholders from classifications.

use crate::error::RenderError;
use crate::supporter::MixSupporter;
use mixview_dom::{Element, HtmlDocument, Node, TagKind};
use mixview_traits::ClassificationProvider;

const CLS_KEY: &str = "cls";

#[derive(Debug, Clone, Copy, Default)]
pub struct ClsResolver;

impl ClsResolver {
    pub fn new() -> Self {
        ClsResolver
    }

    /// Each marked option takes the first classification entry; the other
    /// entries become copies of it inserted right after it, in order.
    pub fn resolve(&self, html: &mut HtmlDocument, supporter: &MixSupporter<'_>) -> Result<(), RenderError> {
        let Some(body) = html.body_mut() else {
            return Ok(());
        };
        if supporter.search(body, has_cls_option).is_empty() {
            return Ok(());
        }
        let provider = supporter.classification_provider()?;
        supporter.search_mut(body, has_cls_option, |select| expand_options(select, provider))
    }
}

fn has_cls_option(element: &Element) -> bool {
    element.kind() == TagKind::Select
        && element.child_elements().any(|child| match child.kind() {
            TagKind::Option => child.data(CLS_KEY).is_some(),
            TagKind::Optgroup => child
                .child_elements()
                .any(|option| option.kind() == TagKind::Option && option.data(CLS_KEY).is_some()),
            _ => false,
        })
}

fn expand_options(container: &mut Element, provider: &dyn ClassificationProvider) -> Result<(), RenderError> {
    let mut index = 0;
    while index < container.children().len() {
        let name = match &mut container.children_mut()[index] {
            Node::Element(group) if group.kind() == TagKind::Optgroup => {
                expand_options(group, provider)?;
                None
            }
            Node::Element(option) if option.kind() == TagKind::Option => option.data(CLS_KEY).map(str::to_string),
            _ => None,
        };
        let Some(name) = name else {
            index += 1;
            continue;
        };

        let entries = provider.provide(&name).map_err(RenderError::from_classification)?;
        let Some(prototype) = container.children()[index].as_element().cloned() else {
            index += 1;
            continue;
        };
        log::trace!("Expanding classification '{}' into {} options", name, entries.len());
        for (offset, cls) in entries.iter().enumerate() {
            let mut option = prototype.clone();
            option.set_attr("value", cls.code.as_str());
            option.replace_inner_text(cls.alias.as_str());
            if offset == 0 {
                container.children_mut()[index] = option.into();
            } else {
                container.children_mut().insert(index + offset, option.into());
            }
        }
        index += entries.len().max(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MixEngine;
    use mixview_dom::{parse_document, write_element};
    use mixview_traits::{Classification, InMemoryClassificationProvider, StaticRequestContext};

    fn provider() -> InMemoryClassificationProvider {
        InMemoryClassificationProvider::new().with(
            "MemberStatus",
            vec![
                Classification::new("FML", "Formalized"),
                Classification::new("PRV", "Provisional"),
                Classification::new("WDL", "Withdrawal"),
            ],
        )
    }

    fn resolve(source: &str, provider: Option<&dyn ClassificationProvider>) -> Result<HtmlDocument, RenderError> {
        let mut html = parse_document(source).unwrap();
        let engine = MixEngine::default();
        let request = StaticRequestContext::new("");
        let supporter = MixSupporter::new(&engine, &request, provider);
        ClsResolver::new().resolve(&mut html, &supporter)?;
        Ok(html)
    }

    #[test]
    fn test_expands_option_in_place() {
        let provider = provider();
        let html = resolve(
            "<html><body><form><select name=\"status\"><option value=\"\">-</option><option data-cls=\"MemberStatus\">x</option><option value=\"z\">last</option></select></form></body></html>",
            Some(&provider),
        )
        .unwrap();
        let select = html.body().unwrap().first_child_of(TagKind::Form).unwrap().first_child_of(TagKind::Select).unwrap();
        let options: Vec<_> = select
            .child_elements()
            .map(|o| (o.attr("value").unwrap_or_default().to_string(), o.text_content()))
            .collect();
        assert_eq!(
            options,
            vec![
                ("".to_string(), "-".to_string()),
                ("FML".to_string(), "Formalized".to_string()),
                ("PRV".to_string(), "Provisional".to_string()),
                ("WDL".to_string(), "Withdrawal".to_string()),
                ("z".to_string(), "last".to_string()),
            ]
        );
    }

    #[test]
    fn test_expands_inside_optgroup() {
        let provider = provider();
        let html = resolve(
            "<html><body><select><optgroup label=\"g\"><option data-cls=\"MemberStatus\"/></optgroup></select></body></html>",
            Some(&provider),
        )
        .unwrap();
        let select = html.body().unwrap().first_child_of(TagKind::Select).unwrap();
        assert_eq!(
            write_element(select).unwrap(),
            "<select><optgroup label=\"g\">\
             <option data-cls=\"MemberStatus\" value=\"FML\">Formalized</option>\
             <option data-cls=\"MemberStatus\" value=\"PRV\">Provisional</option>\
             <option data-cls=\"MemberStatus\" value=\"WDL\">Withdrawal</option>\
             </optgroup></select>"
        );
    }

    #[test]
    fn test_unknown_classification() {
        let provider = provider();
        let err = resolve(
            "<html><body><select><option data-cls=\"Nope\"/></select></body></html>",
            Some(&provider),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::ClassificationNotFound { ref name, .. } if name == "Nope"));
    }

    #[test]
    fn test_provider_needed_only_when_marked() {
        assert!(resolve("<html><body><select><option>a</option></select></body></html>", None).is_ok());
        let err = resolve("<html><body><select><option data-cls=\"A\"/></select></body></html>", None).unwrap_err();
        assert!(matches!(err, RenderError::ClassificationNotFound { .. }));
    }
}
