use crate::reader::{DOCTYPE_DEF, HTML_PREFIX, HTML_XMLNS_PREFIX, LINE_SEPARATOR};
use mixview_dom::HtmlDocument;

/// A parsed template plus what the reader patched while reading it.
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    document: HtmlDocument,
    doctype_defined: bool,
    xmlns_filtered: bool,
}

impl LoadedTemplate {
    pub fn new(document: HtmlDocument, doctype_defined: bool, xmlns_filtered: bool) -> Self {
        Self {
            document,
            doctype_defined,
            xmlns_filtered,
        }
    }

    pub fn document(&self) -> &HtmlDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut HtmlDocument {
        &mut self.document
    }

    pub fn into_document(self) -> HtmlDocument {
        self.document
    }

    pub fn doctype_defined(&self) -> bool {
        self.doctype_defined
    }

    pub fn xmlns_filtered(&self) -> bool {
        self.xmlns_filtered
    }

    /// Reverses the reader's patches on serialized output.
    pub fn restore(&self, html_text: &str) -> String {
        let mut resolved = if self.doctype_defined {
            format!("{DOCTYPE_DEF}{LINE_SEPARATOR}{html_text}")
        } else {
            html_text.to_string()
        };
        if self.xmlns_filtered {
            resolved = resolved.replace(HTML_XMLNS_PREFIX, HTML_PREFIX);
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::TemplateReader;
    use mixview_dom::write_document;

    fn round_trip(source: &str) -> String {
        let loaded = TemplateReader::new().read(source.as_bytes(), "sea.html").unwrap();
        let written = write_document(loaded.document()).unwrap();
        loaded.restore(&written)
    }

    #[test]
    fn test_conforming_template_round_trips() {
        let source = "<!DOCTYPE html>\n<html xmlns=\"http://www.w3.org/1999/xhtml\">\n<head>\n<title>Sea</title>\n</head>\n<body>\n<p id=\"x\" class=\"lead\">land &amp; sea</p>\n<br/>\n</body>\n</html>";
        assert_eq!(round_trip(source), source);
    }

    #[test]
    fn test_inline_script_comparison_round_trips() {
        let source = "<!DOCTYPE html>\n<html xmlns=\"http://www.w3.org/1999/xhtml\">\n<head>\n<script>if (a > 0) { sea(); }</script>\n</head>\n<body></body>\n</html>";
        assert_eq!(round_trip(source), source);
    }

    #[test]
    fn test_entity_references_round_trip() {
        let source = "<!DOCTYPE html>\n<html xmlns=\"http://www.w3.org/1999/xhtml\">\n<body>\n<p>&copy; 2015&nbsp;sea &#x2192; land</p>\n</body>\n</html>";
        assert_eq!(round_trip(source), source);
    }

    #[test]
    fn test_empty_void_element_pair_round_trips() {
        let source = "<!DOCTYPE html>\n<html xmlns=\"http://www.w3.org/1999/xhtml\">\n<body>\n<br></br>\n<br/>\n</body>\n</html>";
        assert_eq!(round_trip(source), source);
    }

    #[test]
    fn test_synthesized_namespace_is_removed() {
        let source = "<!DOCTYPE html>\n<html>\n<body><p>sea</p></body>\n</html>";
        let output = round_trip(source);
        assert!(!output.contains("xmlns"));
        assert_eq!(output, source);
    }

    #[test]
    fn test_restore_without_patches() {
        let loaded = LoadedTemplate::new(
            HtmlDocument::new(mixview_dom::Element::new("html")),
            false,
            false,
        );
        assert_eq!(loaded.restore("<html></html>"), "<html></html>");
    }
}
