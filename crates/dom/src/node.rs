//! The template tree: an owned, mutable mirror of an XHTML document.

use std::fmt;

macro_rules! tag_kinds {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Known XHTML element kinds. Anything else parses as [`TagKind::Other`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TagKind {
            $($variant,)*
            Other,
        }

        impl TagKind {
            /// Maps a tag name to its kind, ignoring ASCII case.
            pub fn from_name(name: &str) -> Self {
                match name.to_ascii_lowercase().as_str() {
                    $($name => TagKind::$variant,)*
                    _ => TagKind::Other,
                }
            }

            /// The canonical tag name, `None` for [`TagKind::Other`].
            pub fn tag_name(&self) -> Option<&'static str> {
                match self {
                    $(TagKind::$variant => Some($name),)*
                    TagKind::Other => None,
                }
            }
        }
    };
}

tag_kinds! {
    Html => "html", Head => "head", Title => "title", Meta => "meta", Link => "link",
    Style => "style", Script => "script", Noscript => "noscript", Base => "base",
    Body => "body", Header => "header", Footer => "footer", Nav => "nav", Main => "main",
    Section => "section", Article => "article", Aside => "aside", Div => "div",
    Span => "span", P => "p", A => "a", Em => "em", Strong => "strong", Small => "small",
    B => "b", I => "i", Label => "label", Pre => "pre", Code => "code",
    Blockquote => "blockquote",
    H1 => "h1", H2 => "h2", H3 => "h3", H4 => "h4", H5 => "h5", H6 => "h6",
    Ul => "ul", Ol => "ol", Li => "li", Dl => "dl", Dt => "dt", Dd => "dd",
    Table => "table", Caption => "caption", Colgroup => "colgroup", Col => "col",
    Thead => "thead", Tbody => "tbody", Tfoot => "tfoot", Tr => "tr", Th => "th", Td => "td",
    Form => "form", Fieldset => "fieldset", Legend => "legend", Input => "input",
    Button => "button", Select => "select", Optgroup => "optgroup", Option => "option",
    Textarea => "textarea", Img => "img", Br => "br", Hr => "hr", Iframe => "iframe",
    Area => "area", Embed => "embed", Param => "param", Source => "source", Track => "track",
    Wbr => "wbr",
}

impl TagKind {
    /// Void elements never have content.
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            TagKind::Area
                | TagKind::Base
                | TagKind::Br
                | TagKind::Col
                | TagKind::Embed
                | TagKind::Hr
                | TagKind::Img
                | TagKind::Input
                | TagKind::Link
                | TagKind::Meta
                | TagKind::Param
                | TagKind::Source
                | TagKind::Track
                | TagKind::Wbr
        )
    }

    /// Whether a structural search descends into elements of this kind.
    ///
    /// Void elements, raw-text elements and `<option>` hold no nested
    /// elements worth visiting; everything else (block and inline
    /// containers, forms, lists, tables, `<select>`/`<optgroup>`, unknown
    /// elements) does.
    pub fn is_container(&self) -> bool {
        !(self.is_void()
            || matches!(
                self,
                TagKind::Script
                    | TagKind::Style
                    | TagKind::Textarea
                    | TagKind::Title
                    | TagKind::Option
            ))
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name().unwrap_or("(other)"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Child content of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Unescaped character data.
    Text(String),
    /// An entity reference body kept as written, e.g. `copy` or `#160`.
    EntityRef(String),
    Comment(String),
    CData(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    kind: TagKind,
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
    self_closing: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = TagKind::from_name(&name);
        Self {
            kind,
            name,
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: kind.is_void(),
        }
    }

    /// Creates an element of a known kind.
    ///
    /// # Panics
    ///
    /// Panics for [`TagKind::Other`], which has no name.
    pub fn of(kind: TagKind) -> Self {
        let name = kind
            .tag_name()
            .expect("TagKind::Other has no tag name, use Element::new");
        Self::new(name)
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Sets an attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(index).value)
    }

    /// Value of the `data-<key>` attribute.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attr(&format!("data-{}", key))
    }

    pub fn set_data(&mut self, key: &str, value: impl Into<String>) {
        self.set_attr(format!("data-{}", key), value);
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// First direct child of the given kind.
    pub fn first_child_of(&self, kind: TagKind) -> Option<&Element> {
        self.child_elements().find(|e| e.kind == kind)
    }

    pub fn first_child_of_mut(&mut self, kind: TagKind) -> Option<&mut Element> {
        self.child_elements_mut().find(|e| e.kind == kind)
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.self_closing = false;
        self.children.push(node.into());
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.push(Node::Text(text.into()));
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_child(mut self, node: impl Into<Node>) -> Self {
        self.push(node);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Replaces all content with a single text node.
    pub fn replace_inner_text(&mut self, text: impl Into<String>) {
        self.replace_inner(vec![Node::Text(text.into())]);
    }

    /// Replaces all content with the given nodes.
    pub fn replace_inner(&mut self, nodes: Vec<Node>) {
        self.self_closing = false;
        self.children = nodes;
    }

    /// Concatenated text of all descendant text and CDATA nodes, with entity
    /// references resolved.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Whether this element is written as `<name/>` while empty: as the source
    /// wrote it, or for a void element built in code.
    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    pub(crate) fn set_self_closing(&mut self, self_closing: bool) {
        self.self_closing = self_closing;
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(t) | Node::CData(t) => out.push_str(t),
            Node::EntityRef(body) => {
                if let Some(text) = crate::entities::resolve(body) {
                    out.push_str(&text);
                }
            }
            Node::Element(e) => collect_text(e, out),
            Node::Comment(_) => {}
        }
    }
}

/// A parsed template: the `<html>` root element.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlDocument {
    root: Element,
}

impl HtmlDocument {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    pub fn head(&self) -> Option<&Element> {
        self.root.first_child_of(TagKind::Head)
    }

    pub fn head_mut(&mut self) -> Option<&mut Element> {
        self.root.first_child_of_mut(TagKind::Head)
    }

    pub fn body(&self) -> Option<&Element> {
        self.root.first_child_of(TagKind::Body)
    }

    pub fn body_mut(&mut self) -> Option<&mut Element> {
        self.root.first_child_of_mut(TagKind::Body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_kind_from_name() {
        assert_eq!(TagKind::from_name("tbody"), TagKind::Tbody);
        assert_eq!(TagKind::from_name("TBODY"), TagKind::Tbody);
        assert_eq!(TagKind::from_name("custom-widget"), TagKind::Other);
        assert_eq!(TagKind::Header.tag_name(), Some("header"));
        assert_eq!(TagKind::Other.to_string(), "(other)");
    }

    #[test]
    fn test_containers() {
        assert!(TagKind::Div.is_container());
        assert!(TagKind::Form.is_container());
        assert!(TagKind::Select.is_container());
        assert!(TagKind::Optgroup.is_container());
        assert!(TagKind::Dl.is_container());
        assert!(TagKind::Other.is_container());
        assert!(!TagKind::Option.is_container());
        assert!(!TagKind::Input.is_container());
        assert!(!TagKind::Script.is_container());
    }

    #[test]
    fn test_attributes_keep_position() {
        let mut el = Element::new("a")
            .with_attr("href", "x")
            .with_id("link");
        el.set_attr("href", "y");
        let names: Vec<_> = el.attributes().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["href", "id"]);
        assert_eq!(el.attr("href"), Some("y"));
        assert_eq!(el.id(), Some("link"));

        assert_eq!(el.remove_attr("href"), Some("y".to_string()));
        assert_eq!(el.attr("href"), None);
    }

    #[test]
    fn test_data_attributes() {
        let mut el = Element::new("span");
        el.set_data("errors", "seaName");
        assert_eq!(el.data("errors"), Some("seaName"));
        assert_eq!(el.attr("data-errors"), Some("seaName"));
    }

    #[test]
    fn test_text_content_and_replace_inner() {
        let mut el = Element::new("p")
            .with_text("Hello, ")
            .with_child(Element::new("b").with_text("sea"));
        assert_eq!(el.text_content(), "Hello, sea");

        el.replace_inner_text("land");
        assert_eq!(el.children().len(), 1);
        assert_eq!(el.text_content(), "land");
    }

    #[test]
    fn test_document_head_and_body() {
        let doc = HtmlDocument::new(
            Element::of(TagKind::Html)
                .with_child(Element::of(TagKind::Head))
                .with_child(Element::of(TagKind::Body)),
        );
        assert!(doc.head().is_some());
        assert_eq!(doc.body().map(|b| b.kind()), Some(TagKind::Body));
    }
}
