//! A view base running the standard resolver passes before the page.

use crate::config::RenderingConfig;
use crate::error::RenderError;
use crate::resolver::{ClsResolver, ErrorsResolver, LayoutResolver, StyleResolver};
use crate::supporter::MixSupporter;
use crate::view::{MixView, ViewProducer};
use mixview_dom::HtmlDocument;

/// The page-specific part of a [`TypicalMixView`].
pub trait MixPage: Send + Sync {
    fn render(&self, html: &mut HtmlDocument, supporter: &MixSupporter<'_>) -> Result<(), RenderError>;
}

/// A page that adds nothing of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPage;

impl MixPage for StaticPage {
    fn render(&self, _html: &mut HtmlDocument, _supporter: &MixSupporter<'_>) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Runs, in order: error injection, layout composition, css/js path
/// resolution, link resolution, classification expansion (when enabled) and
/// finally the page.
///
/// Links are resolved after the layout so imported parts are covered too.
#[derive(Debug)]
pub struct TypicalMixView<P> {
    page: P,
    errors: ErrorsResolver,
    layout: LayoutResolver,
    style: StyleResolver,
    cls: Option<ClsResolver>,
}

impl<P: MixPage> TypicalMixView<P> {
    pub fn new(page: P) -> Self {
        Self {
            page,
            errors: ErrorsResolver::new(),
            layout: LayoutResolver::new(),
            style: StyleResolver::new(),
            cls: None,
        }
    }

    pub fn from_config(page: P, config: &RenderingConfig) -> Self {
        let style = if config.version_query {
            StyleResolver::new().use_version_query()
        } else {
            StyleResolver::new()
        };
        Self {
            page,
            errors: ErrorsResolver::new().convention(config.errors_convention),
            layout: LayoutResolver::from_config(config),
            style,
            cls: config.classifications.then(ClsResolver::new),
        }
    }

    pub fn with_errors_resolver(mut self, resolver: ErrorsResolver) -> Self {
        self.errors = resolver;
        self
    }

    pub fn with_layout_resolver(mut self, resolver: LayoutResolver) -> Self {
        self.layout = resolver;
        self
    }

    pub fn with_style_resolver(mut self, resolver: StyleResolver) -> Self {
        self.style = resolver;
        self
    }

    pub fn with_classifications(mut self, enabled: bool) -> Self {
        self.cls = enabled.then(ClsResolver::new);
        self
    }

    pub fn page(&self) -> &P {
        &self.page
    }
}

impl<P: MixPage> MixView for TypicalMixView<P> {
    fn be_dynamic(&self, html: &mut HtmlDocument, supporter: &MixSupporter<'_>) -> Result<(), RenderError> {
        self.errors.resolve(html, supporter)?;
        self.layout.resolve(html, supporter)?;
        self.style.resolve(html, supporter);
        supporter.resolve_url_link(html.root_mut());
        if let Some(cls) = &self.cls {
            cls.resolve(html, supporter)?;
        }
        self.page.render(html, supporter)
    }

    fn view_name(&self) -> String {
        std::any::type_name::<P>().to_string()
    }
}

impl<P: MixPage> ViewProducer for TypicalMixView<P> {
    fn as_mix_view(&self) -> Option<&dyn MixView> {
        Some(self)
    }

    fn producer_name(&self) -> String {
        self.view_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MixEngine;
    use crate::path::resolve_link_value;
    use mixview_dom::{TagKind, parse_document};
    use mixview_traits::{
        ACTION_ERRORS_KEY, ActionMessage, ActionMessages, InMemoryResourceProvider, StaticRequestContext,
    };
    use std::sync::Arc;

    const LAYOUT: &str = "<!DOCTYPE html>\n<html>\n<head><link rel=\"stylesheet\" href=\"../css/layout.css\"/></head>\n<body><header id=\"header\"><a href=\"@{/menu}\">menu</a></header><footer id=\"footer\"><div data-errors=\"all\"/></footer></body>\n</html>";

    struct SeaPage;

    impl MixPage for SeaPage {
        fn render(&self, html: &mut HtmlDocument, supporter: &MixSupporter<'_>) -> Result<(), RenderError> {
            let p = supporter.find_by_id_mut(html.root_mut(), "sea", TagKind::P)?;
            p.replace_inner_text("Pacific");
            Ok(())
        }
    }

    #[test]
    fn test_pipeline_order() {
        let provider = InMemoryResourceProvider::new()
            .with_text("WEB-INF/view/common/layout.html", LAYOUT)
            .unwrap();
        let engine = MixEngine::with_web_root(Arc::new(provider));
        let request = StaticRequestContext::new("/harbor").with_request_messages(
            ACTION_ERRORS_KEY,
            ActionMessages::new().with("sea", ActionMessage::literal("required")),
        );
        let supporter = MixSupporter::new(&engine, &request, None);

        let mut html = parse_document(
            "<html><head></head><body><header id=\"header\"/><p id=\"sea\"/><footer id=\"footer\"/></body></html>",
        )
        .unwrap();
        TypicalMixView::new(SeaPage).be_dynamic(&mut html, &supporter).unwrap();

        let head = html.head().unwrap();
        assert_eq!(
            head.first_child_of(TagKind::Link).unwrap().attr("href"),
            Some("/harbor/css/layout.css")
        );
        let body = html.body().unwrap();
        let link = body.first_child_of(TagKind::Header).unwrap().first_child_of(TagKind::A).unwrap();
        assert_eq!(link.attr("href"), resolve_link_value("@{/menu}", "/harbor").as_deref());
        // errors run before the layout, so the layout's placeholder stays empty
        let footer = body.first_child_of(TagKind::Footer).unwrap();
        assert_eq!(footer.text_content(), "");
        assert_eq!(body.first_child_of(TagKind::P).unwrap().text_content(), "Pacific");
    }

    #[test]
    fn test_from_config() {
        let config = RenderingConfig::new().with_classifications(true).with_version_query(true);
        let view = TypicalMixView::from_config(StaticPage, &config);
        assert!(view.cls.is_some());
        assert!(view.as_mix_view().is_some());
        assert!(view.view_name().ends_with("StaticPage"));
    }
}
