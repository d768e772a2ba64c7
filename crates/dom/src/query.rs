//! Finding and replacing elements in a template tree.
//!
//! Identifier lookups walk the whole subtree and insist on a unique match.
//! Predicate searches are structural: they only descend into container kinds
//! (see [`TagKind::is_container`]).

use crate::node::{Element, Node, TagKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Not found the element by id '{id}'")]
    NotFound { id: String },

    #[error("Found {count} elements by id '{id}', the id should be unique")]
    Duplicate { id: String, count: usize },

    #[error("The element by id '{id}' is <{actual}>, expected <{expected}>")]
    KindMismatch {
        id: String,
        expected: TagKind,
        actual: TagKind,
    },
}

/// Elements matching `predicate` in pre-order, starting with `root` itself.
pub fn search<'a, F>(root: &'a Element, predicate: F) -> Vec<&'a Element>
where
    F: Fn(&Element) -> bool,
{
    let mut found = Vec::new();
    search_into(root, &predicate, &mut found);
    found
}

fn search_into<'a, F>(element: &'a Element, predicate: &F, found: &mut Vec<&'a Element>)
where
    F: Fn(&Element) -> bool,
{
    if predicate(element) {
        found.push(element);
    }
    if element.kind().is_container() {
        for child in element.child_elements() {
            search_into(child, predicate, found);
        }
    }
}

/// The first element [`search`] would report, borrowed mutably.
pub fn find_first_mut<'a, F>(root: &'a mut Element, predicate: &F) -> Option<&'a mut Element>
where
    F: Fn(&Element) -> bool,
{
    if predicate(root) {
        return Some(root);
    }
    if !root.kind().is_container() {
        return None;
    }
    for child in root.child_elements_mut() {
        if let Some(found) = find_first_mut(child, predicate) {
            return Some(found);
        }
    }
    None
}

/// Calls `action` on every element matching `predicate`, in pre-order.
///
/// Children are visited after `action` ran on their parent, so content the
/// action inserts is visited too.
pub fn for_each_match_mut<P, A, E>(root: &mut Element, predicate: &P, action: &mut A) -> Result<(), E>
where
    P: Fn(&Element) -> bool,
    A: FnMut(&mut Element) -> Result<(), E>,
{
    if predicate(root) {
        action(root)?;
    }
    if root.kind().is_container() {
        for child in root.child_elements_mut() {
            for_each_match_mut(child, predicate, action)?;
        }
    }
    Ok(())
}

/// Calls `action` on every element of the subtree, containers or not.
pub fn visit_all_mut<A>(root: &mut Element, action: &mut A)
where
    A: FnMut(&mut Element),
{
    action(root);
    for child in root.child_elements_mut() {
        visit_all_mut(child, action);
    }
}

/// Number of elements in the subtree carrying `id`.
pub fn count_by_id(root: &Element, id: &str) -> usize {
    let own = usize::from(root.id() == Some(id));
    own + root
        .child_elements()
        .map(|child| count_by_id(child, id))
        .sum::<usize>()
}

fn ensure_unique(root: &Element, id: &str) -> Result<(), QueryError> {
    match count_by_id(root, id) {
        0 => Err(QueryError::NotFound { id: id.to_string() }),
        1 => Ok(()),
        count => Err(QueryError::Duplicate {
            id: id.to_string(),
            count,
        }),
    }
}

fn first_by_id<'a>(element: &'a Element, id: &str) -> Option<&'a Element> {
    if element.id() == Some(id) {
        return Some(element);
    }
    element.child_elements().find_map(|child| first_by_id(child, id))
}

fn first_by_id_mut<'a>(element: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if element.id() == Some(id) {
        return Some(element);
    }
    for child in element.child_elements_mut() {
        if let Some(found) = first_by_id_mut(child, id) {
            return Some(found);
        }
    }
    None
}

/// The single element carrying `id`.
pub fn find_by_id<'a>(root: &'a Element, id: &str) -> Result<&'a Element, QueryError> {
    ensure_unique(root, id)?;
    first_by_id(root, id).ok_or_else(|| QueryError::NotFound { id: id.to_string() })
}

pub fn find_by_id_mut<'a>(root: &'a mut Element, id: &str) -> Result<&'a mut Element, QueryError> {
    ensure_unique(root, id)?;
    first_by_id_mut(root, id).ok_or_else(|| QueryError::NotFound { id: id.to_string() })
}

/// Like [`find_by_id`], additionally requiring the element to be of `kind`.
pub fn find_by_id_of<'a>(
    root: &'a Element,
    id: &str,
    kind: TagKind,
) -> Result<&'a Element, QueryError> {
    let found = find_by_id(root, id)?;
    check_kind(found, id, kind)?;
    Ok(found)
}

pub fn find_by_id_of_mut<'a>(
    root: &'a mut Element,
    id: &str,
    kind: TagKind,
) -> Result<&'a mut Element, QueryError> {
    let found = find_by_id_mut(root, id)?;
    check_kind(found, id, kind)?;
    Ok(found)
}

fn check_kind(element: &Element, id: &str, kind: TagKind) -> Result<(), QueryError> {
    if element.kind() == kind {
        Ok(())
    } else {
        Err(QueryError::KindMismatch {
            id: id.to_string(),
            expected: kind,
            actual: element.kind(),
        })
    }
}

/// Replaces the single descendant carrying `id`, returning the old element.
///
/// The root itself cannot be replaced.
pub fn replace_by_id(root: &mut Element, id: &str, replacement: Element) -> Result<Element, QueryError> {
    ensure_unique(root, id)?;
    replace_in(root, id, replacement).map_err(|_| QueryError::NotFound { id: id.to_string() })
}

/// Hands the replacement back when `id` is not below `element`.
fn replace_in(element: &mut Element, id: &str, replacement: Element) -> Result<Element, Element> {
    let mut replacement = replacement;
    for child in element.children_mut().iter_mut() {
        if let Node::Element(child_element) = child {
            if child_element.id() == Some(id) {
                return Ok(std::mem::replace(child_element, replacement));
            }
            match replace_in(child_element, id, replacement) {
                Ok(old) => return Ok(old),
                Err(back) => replacement = back,
            }
        }
    }
    Err(replacement)
}
