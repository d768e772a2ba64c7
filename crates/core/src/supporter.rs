//! Tree lookups and edits offered to views.
//!
//! `MixSupporter` wraps the dom query primitives with the render error
//! taxonomy and gives views access to the engine and the request. One
//! supporter lives for one render.

use crate::engine::MixEngine;
use crate::error::RenderError;
use crate::path;
use crate::table::TableDataResource;
use mixview_dom::query::{self, for_each_match_mut};
use mixview_dom::{Element, HtmlDocument, Node, TagKind};
use mixview_traits::{ActionRuntime, ClassificationProvider, RequestContext};

pub struct MixSupporter<'a> {
    engine: &'a MixEngine,
    request: &'a dyn RequestContext,
    classifications: Option<&'a dyn ClassificationProvider>,
    runtime: Option<&'a ActionRuntime>,
}

impl<'a> MixSupporter<'a> {
    pub fn new(
        engine: &'a MixEngine,
        request: &'a dyn RequestContext,
        classifications: Option<&'a dyn ClassificationProvider>,
    ) -> Self {
        Self {
            engine,
            request,
            classifications,
            runtime: None,
        }
    }

    /// Names the action in template errors raised through this supporter.
    pub fn with_runtime(mut self, runtime: &'a ActionRuntime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    // ---- lookups by id ----

    /// The single element carrying `id`, which must be of `kind`.
    pub fn find_by_id<'t>(&self, root: &'t Element, id: &str, kind: TagKind) -> Result<&'t Element, RenderError> {
        query::find_by_id_of(root, id, kind).map_err(RenderError::from_find)
    }

    pub fn find_by_id_mut<'t>(
        &self,
        root: &'t mut Element,
        id: &str,
        kind: TagKind,
    ) -> Result<&'t mut Element, RenderError> {
        query::find_by_id_of_mut(root, id, kind).map_err(RenderError::from_find)
    }

    /// Replaces the single element carrying `id`, returning the old one.
    pub fn replace_by_id(&self, root: &mut Element, id: &str, replacement: Element) -> Result<Element, RenderError> {
        query::replace_by_id(root, id, replacement).map_err(RenderError::from_replace)
    }

    // ---- structural search ----

    /// Matching elements in pre-order, descending only into containers.
    pub fn search<'t, F>(&self, root: &'t Element, predicate: F) -> Vec<&'t Element>
    where
        F: Fn(&Element) -> bool,
    {
        query::search(root, predicate)
    }

    /// Runs `action` on every element [`search`](Self::search) would find.
    pub fn search_mut<P, A>(&self, root: &mut Element, predicate: P, mut action: A) -> Result<(), RenderError>
    where
        P: Fn(&Element) -> bool,
        A: FnMut(&mut Element) -> Result<(), RenderError>,
    {
        for_each_match_mut(root, &predicate, &mut action)
    }

    pub fn find_input<'t>(&self, root: &'t Element, name: &str) -> Result<&'t Element, RenderError> {
        self.find_named(root, TagKind::Input, name)
    }

    pub fn find_input_mut<'t>(&self, root: &'t mut Element, name: &str) -> Result<&'t mut Element, RenderError> {
        self.find_named_mut(root, TagKind::Input, name)
    }

    pub fn find_select<'t>(&self, root: &'t Element, name: &str) -> Result<&'t Element, RenderError> {
        self.find_named(root, TagKind::Select, name)
    }

    pub fn find_select_mut<'t>(&self, root: &'t mut Element, name: &str) -> Result<&'t mut Element, RenderError> {
        self.find_named_mut(root, TagKind::Select, name)
    }

    fn find_named<'t>(&self, root: &'t Element, kind: TagKind, name: &str) -> Result<&'t Element, RenderError> {
        let mut found = query::search(root, named(kind, name));
        match found.len() {
            1 => Ok(found.remove(0)),
            count => Err(name_error(kind, name, count)),
        }
    }

    fn find_named_mut<'t>(
        &self,
        root: &'t mut Element,
        kind: TagKind,
        name: &str,
    ) -> Result<&'t mut Element, RenderError> {
        let predicate = named(kind, name);
        let count = query::search(root, &predicate).len();
        if count != 1 {
            return Err(name_error(kind, name, count));
        }
        query::find_first_mut(root, &predicate).ok_or_else(|| name_error(kind, name, 0))
    }

    // ---- table reflection ----

    /// Rebuilds the rows of the `<tbody>` carrying `tbody_id` from `entities`.
    pub fn reflect_list_to_table<T, F>(
        &self,
        root: &mut Element,
        tbody_id: &str,
        entities: &[T],
        per_row: F,
    ) -> Result<(), RenderError>
    where
        F: FnMut(&mut TableDataResource<'_>, &T) -> Result<(), RenderError>,
    {
        let tbody = self.find_by_id_mut(root, tbody_id, TagKind::Tbody)?;
        self.reflect_rows(tbody, entities, per_row)
    }

    /// Uses the first `<tr>` of `tbody` as prototype, removes every row and
    /// appends one prototype clone per entity, in order.
    pub fn reflect_rows<T, F>(&self, tbody: &mut Element, entities: &[T], mut per_row: F) -> Result<(), RenderError>
    where
        F: FnMut(&mut TableDataResource<'_>, &T) -> Result<(), RenderError>,
    {
        let prototype = tbody
            .first_child_of(TagKind::Tr)
            .cloned()
            .ok_or_else(|| RenderError::TableRowNotFound {
                id: tbody.id().unwrap_or_default().to_string(),
            })?;
        tbody
            .children_mut()
            .retain(|node| !matches!(node, Node::Element(e) if e.kind() == TagKind::Tr));

        for entity in entities {
            let mut row = prototype.clone();
            {
                let mut cells = TableDataResource::new(&mut row);
                per_row(&mut cells, entity)?;
            }
            tbody.push(row);
        }
        log::trace!("Reflected {} rows into table body {:?}", entities.len(), tbody.id());
        Ok(())
    }

    // ---- links and parts ----

    /// Rewrites `@{/path}` link markers below `node` against the context path.
    pub fn resolve_url_link(&self, node: &mut Element) {
        path::resolve_url_link(node, self.request.context_path());
    }

    /// Loads a template only for its fragments.
    pub fn load_parts_html(&self, path: &str) -> Result<HtmlDocument, RenderError> {
        self.engine
            .load_parts(path)
            .map_err(|e| RenderError::from_template(&self.action_label(), e))
    }

    /// Loads a parts file and takes one element out of it.
    pub fn load_by_id(&self, path: &str, id: &str, kind: TagKind) -> Result<Element, RenderError> {
        let parts = self.load_parts_html(path)?;
        self.find_by_id(parts.root(), id, kind).cloned()
    }

    // ---- accessors ----

    pub fn engine(&self) -> &MixEngine {
        self.engine
    }

    pub fn request(&self) -> &dyn RequestContext {
        self.request
    }

    pub fn context_path(&self) -> &str {
        self.request.context_path()
    }

    pub fn runtime(&self) -> Option<&ActionRuntime> {
        self.runtime
    }

    /// The classification provider, required by `<select>` expansion.
    pub fn classification_provider(&self) -> Result<&dyn ClassificationProvider, RenderError> {
        self.classifications.ok_or_else(|| RenderError::ClassificationNotFound {
            name: "(any)".to_string(),
            reason: "no classification provider is configured".to_string(),
        })
    }

    fn action_label(&self) -> String {
        self.runtime
            .map(ToString::to_string)
            .unwrap_or_else(|| "(unknown action)".to_string())
    }
}

fn named(kind: TagKind, name: &str) -> impl Fn(&Element) -> bool + '_ {
    move |e: &Element| e.kind() == kind && e.attr("name") == Some(name)
}

fn name_error(kind: TagKind, name: &str, count: usize) -> RenderError {
    if count == 0 {
        RenderError::ElementByNameNotFound {
            kind,
            name: name.to_string(),
        }
    } else {
        RenderError::ElementByNameFailure {
            kind,
            name: name.to_string(),
            count,
        }
    }
}
