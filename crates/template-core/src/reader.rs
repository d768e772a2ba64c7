//! Reads template text into a tree.
//!
//! Templates are plain HTML5-looking files that must follow a two-line
//! convention:
//!
//! ```text
//! <!DOCTYPE html>
//! <html>
//! ...
//! ```
//!
//! The parser needs a declared default namespace, so an `<html>` tag without
//! `xmlns` gets one synthesized. [`LoadedTemplate::restore`] takes both the
//! DOCTYPE and the synthesized namespace back out when writing.

use crate::error::TemplateError;
use crate::loaded::LoadedTemplate;
use mixview_dom::parse_document;

pub const DOCTYPE_DEF: &str = "<!DOCTYPE html>";
pub const HTML_PREFIX: &str = "<html";
pub const HTML_XMLNS_PREFIX: &str = "<html xmlns=\"http://www.w3.org/1999/xhtml\"";
pub const LINE_SEPARATOR: &str = "\n";

const BOM: char = '\u{feff}';

/// The convention-checked text of a template, before structural parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadText {
    pub text: String,
    pub doctype_defined: bool,
    pub xmlns_filtered: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateReader;

impl TemplateReader {
    pub fn new() -> Self {
        TemplateReader
    }

    /// Checks the convention and parses `bytes`. `path` only labels errors.
    pub fn read(&self, bytes: &[u8], path: &str) -> Result<LoadedTemplate, TemplateError> {
        let read = self.read_text(bytes, path)?;
        let document = parse_document(&read.text).map_err(|source| TemplateError::Parse {
            path: path.to_string(),
            source,
        })?;
        log::trace!(
            "Read template '{}' (doctype: {}, xmlns synthesized: {})",
            path,
            read.doctype_defined,
            read.xmlns_filtered
        );
        Ok(LoadedTemplate::new(
            document,
            read.doctype_defined,
            read.xmlns_filtered,
        ))
    }

    /// Decodes `bytes` as UTF-8 and applies the two-line convention.
    pub fn read_text(&self, bytes: &[u8], path: &str) -> Result<ReadText, TemplateError> {
        let source = std::str::from_utf8(bytes).map_err(|e| TemplateError::Encoding {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        let mut lines: Vec<String> = Vec::new();
        let mut doctype_defined = false;
        let mut xmlns_filtered = false;
        for (index, line) in source.lines().enumerate() {
            let mut line = line.to_string();
            match index {
                0 => {
                    if line.starts_with(BOM) {
                        line.remove(0);
                    }
                    doctype_defined = line == DOCTYPE_DEF;
                    if !doctype_defined {
                        return Err(TemplateError::MissingDoctype {
                            path: path.to_string(),
                            line,
                        });
                    }
                }
                1 => {
                    if !(line.starts_with(HTML_PREFIX) && line.ends_with('>')) {
                        return Err(TemplateError::MissingHtmlTag {
                            path: path.to_string(),
                            line,
                        });
                    }
                    if !line.contains("xmlns") {
                        line = line.replacen(HTML_PREFIX, HTML_XMLNS_PREFIX, 1);
                        xmlns_filtered = true;
                    }
                }
                _ => {}
            }
            lines.push(line);
        }

        if lines.len() == 1 {
            return Err(TemplateError::MissingHtmlTag {
                path: path.to_string(),
                line: String::new(),
            });
        }

        Ok(ReadText {
            text: lines.join(LINE_SEPARATOR),
            doctype_defined,
            xmlns_filtered,
        })
    }
}
