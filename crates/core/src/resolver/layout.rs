//! Composes a page with the shared layout template.
//!
//! The layout contributes head elements, the header and footer regions and
//! trailing body scripts. Each step can be suppressed; a parts hook runs last
//! for anything else the application wants to take from the layout.

use crate::config::{DEFAULT_FOOTER_ID, DEFAULT_HEADER_ID, DEFAULT_LAYOUT_PATH, RenderingConfig};
use crate::error::RenderError;
use crate::supporter::MixSupporter;
use mixview_dom::{Element, HtmlDocument, TagKind};
use std::fmt;

pub type RegionHook = Box<dyn Fn(&mut Element, &MixSupporter<'_>) -> Result<(), RenderError> + Send + Sync>;
pub type PartsHook =
    Box<dyn Fn(&mut HtmlDocument, &MixSupporter<'_>, &HtmlDocument) -> Result<(), RenderError> + Send + Sync>;

const MERGED_HEAD_KINDS: &[TagKind] = &[TagKind::Link, TagKind::Meta, TagKind::Script, TagKind::Style];

pub struct LayoutResolver {
    layout_path: String,
    header_id: String,
    footer_id: String,
    suppress_header: bool,
    suppress_footer: bool,
    suppress_head_merge: bool,
    suppress_script_append: bool,
    header_hook: Option<RegionHook>,
    footer_hook: Option<RegionHook>,
    parts_hook: Option<PartsHook>,
}

impl Default for LayoutResolver {
    fn default() -> Self {
        Self {
            layout_path: DEFAULT_LAYOUT_PATH.to_string(),
            header_id: DEFAULT_HEADER_ID.to_string(),
            footer_id: DEFAULT_FOOTER_ID.to_string(),
            suppress_header: false,
            suppress_footer: false,
            suppress_head_merge: false,
            suppress_script_append: false,
            header_hook: None,
            footer_hook: None,
            parts_hook: None,
        }
    }
}

impl fmt::Debug for LayoutResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutResolver")
            .field("layout_path", &self.layout_path)
            .field("header_id", &self.header_id)
            .field("footer_id", &self.footer_id)
            .field("suppress_header", &self.suppress_header)
            .field("suppress_footer", &self.suppress_footer)
            .field("suppress_head_merge", &self.suppress_head_merge)
            .field("suppress_script_append", &self.suppress_script_append)
            .finish_non_exhaustive()
    }
}

impl LayoutResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RenderingConfig) -> Self {
        Self::new()
            .layout_path(config.layout_path.clone())
            .header_id(config.header_id.clone())
            .footer_id(config.footer_id.clone())
            .suppress_header(config.suppress_header)
            .suppress_footer(config.suppress_footer)
            .suppress_head_merge(config.suppress_head_merge)
            .suppress_script_append(config.suppress_script_append)
    }

    pub fn layout_path(mut self, path: impl Into<String>) -> Self {
        self.layout_path = path.into();
        self
    }

    pub fn header_id(mut self, id: impl Into<String>) -> Self {
        self.header_id = id.into();
        self
    }

    pub fn footer_id(mut self, id: impl Into<String>) -> Self {
        self.footer_id = id.into();
        self
    }

    pub fn suppress_header(mut self, suppressed: bool) -> Self {
        self.suppress_header = suppressed;
        self
    }

    pub fn suppress_footer(mut self, suppressed: bool) -> Self {
        self.suppress_footer = suppressed;
        self
    }

    pub fn suppress_head_merge(mut self, suppressed: bool) -> Self {
        self.suppress_head_merge = suppressed;
        self
    }

    pub fn suppress_script_append(mut self, suppressed: bool) -> Self {
        self.suppress_script_append = suppressed;
        self
    }

    /// Customizes the layout header before it replaces the page's.
    pub fn resolve_header<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Element, &MixSupporter<'_>) -> Result<(), RenderError> + Send + Sync + 'static,
    {
        self.header_hook = Some(Box::new(hook));
        self
    }

    pub fn resolve_footer<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Element, &MixSupporter<'_>) -> Result<(), RenderError> + Send + Sync + 'static,
    {
        self.footer_hook = Some(Box::new(hook));
        self
    }

    /// Receives the page, the supporter and the loaded layout after the
    /// built-in steps.
    pub fn resolve_parts<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut HtmlDocument, &MixSupporter<'_>, &HtmlDocument) -> Result<(), RenderError>
            + Send
            + Sync
            + 'static,
    {
        self.parts_hook = Some(Box::new(hook));
        self
    }

    pub fn resolve(&self, html: &mut HtmlDocument, supporter: &MixSupporter<'_>) -> Result<(), RenderError> {
        let layout = supporter.load_parts_html(&self.layout_path)?;
        if !self.suppress_head_merge {
            merge_head(html, &layout);
        }
        if !self.suppress_header {
            self.replace_region(html, supporter, &layout, &self.header_id, TagKind::Header, self.header_hook.as_ref())?;
        }
        if !self.suppress_footer {
            self.replace_region(html, supporter, &layout, &self.footer_id, TagKind::Footer, self.footer_hook.as_ref())?;
        }
        if !self.suppress_script_append {
            append_scripts(html, &layout);
        }
        if let Some(hook) = &self.parts_hook {
            hook(html, supporter, &layout)?;
        }
        Ok(())
    }

    fn replace_region(
        &self,
        html: &mut HtmlDocument,
        supporter: &MixSupporter<'_>,
        layout: &HtmlDocument,
        id: &str,
        kind: TagKind,
        hook: Option<&RegionHook>,
    ) -> Result<(), RenderError> {
        let mut region = supporter.find_by_id(layout.root(), id, kind)?.clone();
        supporter.resolve_url_link(&mut region);
        if let Some(hook) = hook {
            hook(&mut region, supporter)?;
        }
        supporter.replace_by_id(html.root_mut(), id, region)?;
        log::trace!("Replaced <{}> '{}' with the layout's", kind, id);
        Ok(())
    }
}

/// Copies layout head elements the page head lacks.
fn merge_head(html: &mut HtmlDocument, layout: &HtmlDocument) {
    let (Some(page_head), Some(layout_head)) = (html.head_mut(), layout.head()) else {
        return;
    };
    for candidate in layout_head
        .child_elements()
        .filter(|e| MERGED_HEAD_KINDS.contains(&e.kind()))
    {
        if !page_head.child_elements().any(|e| e == candidate) {
            page_head.push(candidate.clone());
        }
    }
}

/// Appends layout body scripts the page body lacks.
fn append_scripts(html: &mut HtmlDocument, layout: &HtmlDocument) {
    let (Some(page_body), Some(layout_body)) = (html.body_mut(), layout.body()) else {
        return;
    };
    for script in layout_body.child_elements().filter(|e| e.kind() == TagKind::Script) {
        if !page_body.child_elements().any(|e| e == script) {
            page_body.push(script.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MixEngine;
    use mixview_dom::parse_document;
    use mixview_traits::{InMemoryResourceProvider, StaticRequestContext};
    use std::sync::Arc;

    const LAYOUT: &str = "<!DOCTYPE html>\n<html>\n<head><meta charset=\"UTF-8\"/><link rel=\"stylesheet\" href=\"../css/base.css\"/><title>Layout</title></head>\n<body><header id=\"header\"><a href=\"@{/}\">home</a></header><footer id=\"footer\">(c)</footer><script src=\"../js/app.js\"></script></body>\n</html>";

    fn engine() -> MixEngine {
        let provider = InMemoryResourceProvider::new()
            .with_text("WEB-INF/view/common/layout.html", LAYOUT)
            .unwrap();
        MixEngine::with_web_root(Arc::new(provider))
    }

    fn page() -> HtmlDocument {
        parse_document(
            "<html><head><meta charset=\"UTF-8\"/><title>Sea</title></head>\
             <body><header id=\"header\">page header</header><p>sea</p><footer id=\"footer\">page footer</footer></body></html>",
        )
        .unwrap()
    }

    fn resolve(resolver: &LayoutResolver) -> HtmlDocument {
        let engine = engine();
        let request = StaticRequestContext::new("/harbor");
        let supporter = MixSupporter::new(&engine, &request, None);
        let mut html = page();
        resolver.resolve(&mut html, &supporter).unwrap();
        html
    }

    #[test]
    fn test_full_composition() {
        let html = resolve(&LayoutResolver::new());
        let head = html.head().unwrap();
        let kinds: Vec<_> = head.child_elements().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![TagKind::Meta, TagKind::Title, TagKind::Link]);

        let body = html.body().unwrap();
        let header = body.first_child_of(TagKind::Header).unwrap();
        assert_eq!(header.text_content(), "home");
        assert_eq!(header.first_child_of(TagKind::A).unwrap().attr("href"), Some("/harbor/"));
        assert_eq!(body.first_child_of(TagKind::Footer).unwrap().text_content(), "(c)");
        assert!(body.first_child_of(TagKind::Script).is_some());
    }

    #[test]
    fn test_suppressed_steps() {
        let html = resolve(
            &LayoutResolver::new()
                .suppress_header(true)
                .suppress_footer(true)
                .suppress_head_merge(true)
                .suppress_script_append(true),
        );
        assert_eq!(html, page());
    }

    #[test]
    fn test_hooks_run() {
        let html = resolve(
            &LayoutResolver::new()
                .resolve_header(|header, _| {
                    header.set_attr("class", "dark");
                    Ok(())
                })
                .resolve_parts(|page, _, layout| {
                    let title = layout.head().and_then(|h| h.first_child_of(TagKind::Title)).cloned();
                    if let (Some(body), Some(title)) = (page.body_mut(), title) {
                        body.push(title);
                    }
                    Ok(())
                }),
        );
        let body = html.body().unwrap();
        assert_eq!(body.first_child_of(TagKind::Header).unwrap().attr("class"), Some("dark"));
        assert_eq!(body.first_child_of(TagKind::Title).unwrap().text_content(), "Layout");
    }

    #[test]
    fn test_missing_page_region() {
        let engine = engine();
        let request = StaticRequestContext::new("");
        let supporter = MixSupporter::new(&engine, &request, None);
        let mut html = parse_document("<html><body><p>no header</p></body></html>").unwrap();
        let err = LayoutResolver::new().resolve(&mut html, &supporter).unwrap_err();
        assert!(matches!(err, RenderError::ReplaceByIdNotFound { ref id } if id == "header"));
    }

    #[test]
    fn test_missing_layout() {
        let engine = MixEngine::default();
        let request = StaticRequestContext::new("");
        let supporter = MixSupporter::new(&engine, &request, None);
        let mut html = page();
        let err = LayoutResolver::new().resolve(&mut html, &supporter).unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound { .. }));
    }
}
