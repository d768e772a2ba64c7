//! Builds a template tree from XHTML source with quick-xml.
//!
//! The reader reports events; this module keeps a stack of open elements and
//! attaches each finished element to its parent. Text, comments and CDATA are
//! kept verbatim and entity references stay separate nodes, so a parse/write
//! round trip reproduces conforming sources.

use crate::entities;
use crate::error::{DomError, Location};
use crate::node::{Attribute, Element, HtmlDocument, Node};
use quick_xml::Reader;
use quick_xml::escape::unescape_with;
use quick_xml::events::{BytesStart, Event};

/// Parses a complete document with exactly one root element.
///
/// DOCTYPE declarations, XML declarations and processing instructions are
/// accepted and dropped; whitespace outside the root element is ignored.
pub fn parse_document(source: &str) -> Result<HtmlDocument, DomError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let pos = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| DomError::Syntax {
            message: e.to_string(),
            location: Location::from_offset(source, reader.error_position() as usize),
        })?;
        match event {
            Event::Start(e) => {
                let mut element = start_element(&e, source, pos)?;
                element.set_self_closing(false);
                stack.push(element);
            }
            Event::Empty(e) => {
                let mut element = start_element(&e, source, pos)?;
                element.set_self_closing(true);
                attach(&mut stack, &mut root, element, source, pos)?;
            }
            Event::End(_) => {
                // quick-xml has already matched the end tag name
                let element = stack.pop().ok_or_else(|| malformed(source, pos, "unexpected end tag"))?;
                attach(&mut stack, &mut root, element, source, pos)?;
            }
            Event::Text(e) => {
                let raw = std::str::from_utf8(&e).map_err(|err| malformed(source, pos, &err.to_string()))?;
                let text = unescape_text(raw, source, pos)?;
                push_text(&mut stack, &text, source, pos)?;
            }
            Event::GeneralRef(e) => {
                let body = std::str::from_utf8(&e).map_err(|err| malformed(source, pos, &err.to_string()))?;
                if entities::resolve(body).is_none() {
                    return Err(DomError::UnknownEntity {
                        entity: body.to_string(),
                        location: Location::from_offset(source, pos),
                    });
                }
                match stack.last_mut() {
                    Some(parent) => parent.push(Node::EntityRef(body.to_string())),
                    None => return Err(malformed(source, pos, "entity reference outside of the root element")),
                }
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e).map_err(|err| malformed(source, pos, &err.to_string()))?;
                if let Some(parent) = stack.last_mut() {
                    parent.push(Node::CData(text.to_string()));
                }
            }
            Event::Comment(e) => {
                let text = std::str::from_utf8(&e).map_err(|err| malformed(source, pos, &err.to_string()))?;
                if let Some(parent) = stack.last_mut() {
                    parent.push(Node::Comment(text.to_string()));
                }
            }
            Event::Eof => break,
            // DOCTYPE, XML declaration, processing instructions
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(
            source,
            source.len(),
            &format!("element <{}> is not closed", open.name()),
        ));
    }
    let root = root.ok_or(DomError::NoRootElement)?;
    log::trace!("Parsed template tree rooted at <{}>", root.name());
    Ok(HtmlDocument::new(root))
}

fn start_element(e: &BytesStart<'_>, source: &str, pos: usize) -> Result<Element, DomError> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| malformed(source, pos, &err.to_string()))?
        .to_string();
    let mut element = Element::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| DomError::Syntax {
            message: err.to_string(),
            location: Location::from_offset(source, pos),
        })?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| malformed(source, pos, &err.to_string()))?;
        let raw = std::str::from_utf8(&attr.value)
            .map_err(|err| malformed(source, pos, &err.to_string()))?;
        let value = unescape_text(raw, source, pos)?;
        element.attributes_mut().push(Attribute::new(key, value));
    }
    Ok(element)
}

fn unescape_text(raw: &str, source: &str, pos: usize) -> Result<String, DomError> {
    unescape_with(raw, entities::resolve_named)
        .map(|text| text.into_owned())
        .map_err(|err| DomError::Syntax {
            message: err.to_string(),
            location: Location::from_offset(source, pos),
        })
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    source: &str,
    pos: usize,
) -> Result<(), DomError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(malformed(source, pos, "more than one root element")),
    }
}

/// Appends text to the open element, merging with a preceding text node.
fn push_text(stack: &mut [Element], text: &str, source: &str, pos: usize) -> Result<(), DomError> {
    match stack.last_mut() {
        Some(parent) => {
            if let Some(Node::Text(previous)) = parent.children_mut().last_mut() {
                previous.push_str(text);
            } else {
                parent.push_text(text);
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(malformed(source, pos, "text outside of the root element")),
    }
}

fn malformed(source: &str, offset: usize, message: &str) -> DomError {
    DomError::Malformed {
        message: message.to_string(),
        location: Location::from_offset(source, offset),
    }
}
