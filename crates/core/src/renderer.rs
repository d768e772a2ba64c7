//! Drives one render: view check, template load, view, serialization and
//! the response write.

use crate::engine::MixEngine;
use crate::error::RenderError;
use crate::supporter::MixSupporter;
use crate::view::{MixView, NextJourney, ViewState};
use mixview_traits::{ActionRuntime, ClassificationProvider, RequestContext, ResponseWriter};
use std::fmt;

pub const CONTENT_TYPE: &str = "text/html";
pub const ENCODING: &str = "UTF-8";

/// Progress of one render. `Failed` can follow any other stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    Start,
    Located,
    Parsed,
    Dynamic,
    Serialized,
    Written,
    Failed,
}

impl fmt::Display for RenderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How far one render got: the pipeline stage and the state of the view's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Progress {
    stage: RenderStage,
    view: ViewState,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            stage: RenderStage::Start,
            view: ViewState::Unrendered,
        }
    }
}

pub struct MixHtmlRenderer<'e> {
    engine: &'e MixEngine,
    classifications: Option<&'e dyn ClassificationProvider>,
}

impl<'e> MixHtmlRenderer<'e> {
    pub fn new(engine: &'e MixEngine) -> Self {
        Self {
            engine,
            classifications: None,
        }
    }

    pub fn with_classifications(mut self, provider: &'e dyn ClassificationProvider) -> Self {
        self.classifications = Some(provider);
        self
    }

    /// Renders the journey's template into `response`. Nothing is written
    /// unless every stage succeeds.
    pub fn render(
        &self,
        request: &dyn RequestContext,
        response: &mut dyn ResponseWriter,
        runtime: &ActionRuntime,
        journey: &NextJourney,
    ) -> Result<(), RenderError> {
        let mut progress = Progress::default();
        let result = self.run(request, response, runtime, journey, &mut progress);
        if let Err(err) = &result {
            log::debug!(
                "Rendering {} failed after stage {} with a {} view: {}",
                journey.routing_path(),
                progress.stage,
                progress.view,
                err
            );
            progress.stage = RenderStage::Failed;
        }
        log::trace!("Rendering {} ended at stage {}", journey.routing_path(), progress.stage);
        result
    }

    fn run(
        &self,
        request: &dyn RequestContext,
        response: &mut dyn ResponseWriter,
        runtime: &ActionRuntime,
        journey: &NextJourney,
        progress: &mut Progress,
    ) -> Result<(), RenderError> {
        let action = runtime.to_string();
        let view = self.extract_mix_view(&action, journey)?;
        log::debug!(
            "#flow ...Rendering {} by mix view: {}",
            journey.pure_name(),
            view.view_name()
        );

        let route = journey.routing_path();
        let bytes = self
            .engine
            .locator()
            .locate(route)
            .map_err(|e| RenderError::from_template(&action, e))?;
        progress.stage = RenderStage::Located;
        let mut loaded = self
            .engine
            .reader()
            .read(&bytes, route)
            .map_err(|e| RenderError::from_template(&action, e))?;
        progress.stage = RenderStage::Parsed;

        let supporter = MixSupporter::new(self.engine, request, self.classifications).with_runtime(runtime);
        progress.view = ViewState::Dynamic;
        log::trace!("Handing {} to {} as {}", route, view.view_name(), progress.view);
        view.be_dynamic(loaded.document_mut(), &supporter)
            .map_err(|e| to_dynamic_failure(e, &action, route, view))?;
        progress.view = ViewState::Rendered;
        progress.stage = RenderStage::Dynamic;

        let html_text = self.engine.save_to_string(&loaded).map_err(RenderError::Serialize)?;
        progress.stage = RenderStage::Serialized;

        response.write(&html_text, CONTENT_TYPE, ENCODING)?;
        progress.stage = RenderStage::Written;
        Ok(())
    }

    fn extract_mix_view<'j>(&self, action: &str, journey: &'j NextJourney) -> Result<&'j dyn MixView, RenderError> {
        let producer = journey.view().ok_or_else(|| RenderError::ViewContractViolation {
            action: action.to_string(),
            view: "(no view)".to_string(),
        })?;
        producer
            .as_mix_view()
            .ok_or_else(|| RenderError::ViewContractViolation {
                action: action.to_string(),
                view: producer.producer_name(),
            })
    }
}

/// Tree lookup failures keep their identity; anything else the view raised
/// is wrapped with the render context.
fn to_dynamic_failure(err: RenderError, action: &str, route: &str, view: &dyn MixView) -> RenderError {
    if err.is_tree_error() {
        return err;
    }
    RenderError::DynamicRenderFailure {
        action: action.to_string(),
        route: route.to_string(),
        view: view.view_name(),
        source: Box::new(err),
    }
}
