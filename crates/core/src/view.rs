//! The contract between the renderer and application views.

use crate::error::RenderError;
use crate::supporter::MixSupporter;
use mixview_dom::HtmlDocument;
use std::fmt;

/// An application view that turns the static template into the page.
pub trait MixView {
    /// Mutates the parsed template in place. Called once per render.
    fn be_dynamic(&self, html: &mut HtmlDocument, supporter: &MixSupporter<'_>) -> Result<(), RenderError>;

    /// Name used in logs and error reports.
    fn view_name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// Whatever an action hands over as its view.
///
/// Only producers exposing a [`MixView`] can be rendered by the mix renderer.
pub trait ViewProducer {
    fn as_mix_view(&self) -> Option<&dyn MixView> {
        None
    }

    fn producer_name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// Where the action sends the request next: the route of the template and
/// the view object.
pub struct NextJourney {
    routing_path: String,
    view: Option<Box<dyn ViewProducer>>,
}

impl NextJourney {
    pub fn new(routing_path: impl Into<String>) -> Self {
        Self {
            routing_path: routing_path.into(),
            view: None,
        }
    }

    pub fn with_view(mut self, view: impl ViewProducer + 'static) -> Self {
        self.view = Some(Box::new(view));
        self
    }

    pub fn routing_path(&self) -> &str {
        &self.routing_path
    }

    pub fn view(&self) -> Option<&dyn ViewProducer> {
        self.view.as_deref()
    }

    /// The last path segment, e.g. `sea.html` for `/harbor/sea.html`.
    pub fn pure_name(&self) -> &str {
        self.routing_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.routing_path)
    }
}

impl fmt::Debug for NextJourney {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NextJourney")
            .field("routing_path", &self.routing_path)
            .field("view", &self.view.as_ref().map(|v| v.producer_name()))
            .finish()
    }
}

/// Lifecycle of the tree a view works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Parsed from the template, untouched.
    Unrendered,
    /// Handed to the view.
    Dynamic,
    /// The view returned successfully.
    Rendered,
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewState::Unrendered => "unrendered",
            ViewState::Dynamic => "dynamic",
            ViewState::Rendered => "rendered",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PlainObject;
    impl ViewProducer for PlainObject {}

    struct SeaView;
    impl MixView for SeaView {
        fn be_dynamic(&self, _html: &mut HtmlDocument, _supporter: &MixSupporter<'_>) -> Result<(), RenderError> {
            Ok(())
        }
    }
    impl ViewProducer for SeaView {
        fn as_mix_view(&self) -> Option<&dyn MixView> {
            Some(self)
        }
    }

    #[test]
    fn test_capability_query() {
        let journey = NextJourney::new("/harbor/sea.html").with_view(SeaView);
        let view = journey.view().and_then(|v| v.as_mix_view()).unwrap();
        assert!(view.view_name().ends_with("SeaView"));
        assert_eq!(journey.pure_name(), "sea.html");

        let journey = NextJourney::new("/land.html").with_view(PlainObject);
        assert!(journey.view().unwrap().as_mix_view().is_none());
        assert!(format!("{journey:?}").contains("PlainObject"));
    }
}
