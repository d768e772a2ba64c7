//! Serializes a template tree back to XHTML text.

use crate::error::DomError;
use crate::node::{Element, HtmlDocument, Node};
use quick_xml::Writer;
use quick_xml::escape::{minimal_escape, partial_escape};
use quick_xml::events::attributes::Attribute as XmlAttribute;
use quick_xml::events::{BytesCData, BytesEnd, BytesRef, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use std::borrow::Cow;

/// Writes the root element and its content. No DOCTYPE is emitted.
pub fn write_document(document: &HtmlDocument) -> Result<String, DomError> {
    write_element(document.root())
}

/// Writes one element subtree.
pub fn write_element(element: &Element) -> Result<String, DomError> {
    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, element)?;
    String::from_utf8(writer.into_inner()).map_err(|e| DomError::Write(e.to_string()))
}

fn write_node(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), DomError> {
    let mut start = BytesStart::new(element.name());
    for attr in element.attributes() {
        let escaped = escape_attribute(&attr.value);
        start.push_attribute(XmlAttribute {
            key: QName(attr.name.as_bytes()),
            value: Cow::Owned(escaped.into_bytes()),
        });
    }

    if element.children().is_empty() && element.is_self_closing() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in element.children() {
        match child {
            Node::Element(e) => write_node(writer, e)?,
            // only `<` and `&` are escaped, `>` is written as is
            Node::Text(text) => {
                emit(writer, Event::Text(BytesText::from_escaped(minimal_escape(text))))?
            }
            Node::EntityRef(body) => emit(writer, Event::GeneralRef(BytesRef::new(body.as_str())))?,
            Node::Comment(text) => {
                emit(writer, Event::Comment(BytesText::from_escaped(text.as_str())))?
            }
            Node::CData(text) => emit(writer, Event::CData(BytesCData::new(text.as_str())))?,
        }
    }
    emit(writer, Event::End(BytesEnd::new(element.name())))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), DomError> {
    writer
        .write_event(event)
        .map_err(|e| DomError::Write(e.to_string()))
}

fn escape_attribute(value: &str) -> String {
    partial_escape(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TagKind;
    use crate::parser::parse_document;

    #[test]
    fn test_round_trip_preserves_text_layout() {
        let source = "<html xmlns=\"http://www.w3.org/1999/xhtml\">\n<head>\n    <meta charset=\"UTF-8\"/>\n    <title>Sea &amp; Land</title>\n</head>\n<body>\n    <!-- main -->\n    <p class=\"lead\" id=\"x\">a &lt; b</p>\n</body>\n</html>";
        let doc = parse_document(source).unwrap();
        assert_eq!(write_document(&doc).unwrap(), source);
    }

    #[test]
    fn test_attribute_escaping() {
        let el = Element::new("a").with_attr("title", "say \"hi\" & <go>");
        assert_eq!(
            write_element(&el).unwrap(),
            "<a title=\"say &quot;hi&quot; &amp; &lt;go&gt;\"></a>"
        );
    }

    #[test]
    fn test_void_elements_are_empty() {
        let el = Element::of(TagKind::Input).with_attr("name", "sea");
        assert_eq!(write_element(&el).unwrap(), "<input name=\"sea\"/>");
    }

    #[test]
    fn test_source_spelling_is_kept() {
        let source = "<html><head><script>if (a > 0) { go(); }</script></head><body><p>&copy; 2015&nbsp;sea &#169;</p><br></br><br/></body></html>";
        let doc = parse_document(source).unwrap();
        assert_eq!(write_document(&doc).unwrap(), source);
    }

    #[test]
    fn test_inserted_text_is_escaped() {
        let el = Element::new("p").with_text("a < b & c > d");
        assert_eq!(write_element(&el).unwrap(), "<p>a &lt; b &amp; c > d</p>");
    }

    #[test]
    fn test_replaced_content_is_written() {
        let mut doc = parse_document("<html><body><div id=\"d\"/></body></html>").unwrap();
        let div = doc.body_mut().unwrap().first_child_of_mut(TagKind::Div).unwrap();
        div.replace_inner_text("filled");
        assert_eq!(
            write_document(&doc).unwrap(),
            "<html><body><div id=\"d\">filled</div></body></html>"
        );
    }
}
