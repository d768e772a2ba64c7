//! Attribute value rewriting for asset paths and internal links.

use mixview_dom::Element;
use mixview_dom::query::visit_all_mut;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Attributes holding asset paths.
pub const PATH_ATTRIBUTES: &[&str] = &["href", "src"];

/// Attributes that may hold `@{...}` link markers.
pub const LINK_ATTRIBUTES: &[&str] = &["href", "src", "action"];

static LINK_BEGIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@\{").expect("BUG: invalid LINK_BEGIN regex literal"));

static LINK_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\}$").expect("BUG: invalid LINK_END regex literal"));

/// Replaces the first match of `pattern` in every `href`/`src` value below
/// `root` with what `replacement` builds from the match. Its output is taken
/// literally.
pub fn replace_path<F>(root: &mut Element, pattern: &Regex, replacement: F)
where
    F: Fn(&Captures<'_>) -> String,
{
    replace_attributes(root, PATH_ATTRIBUTES, |value| {
        pattern
            .is_match(value)
            .then(|| pattern.replace(value, |caps: &Captures<'_>| replacement(caps)).into_owned())
    });
}

/// Rewrites `@{/path}` to `<context_path>/path` in link attributes below `root`.
pub fn resolve_url_link(root: &mut Element, context_path: &str) {
    replace_attributes(root, LINK_ATTRIBUTES, |value| resolve_link_value(value, context_path));
}

/// `None` when `value` is not a link marker.
pub fn resolve_link_value(value: &str, context_path: &str) -> Option<String> {
    if !(LINK_BEGIN.is_match(value) && LINK_END.is_match(value)) {
        return None;
    }
    let begun = LINK_BEGIN.replace(value, regex::NoExpand(context_path));
    Some(LINK_END.replace(&begun, "").into_owned())
}

fn replace_attributes<F>(root: &mut Element, names: &[&str], rewrite: F)
where
    F: Fn(&str) -> Option<String>,
{
    visit_all_mut(root, &mut |element| {
        for attr in element.attributes_mut().iter_mut() {
            if names.contains(&attr.name.as_str())
                && let Some(rewritten) = rewrite(&attr.value)
            {
                log::trace!("Rewrote {}=\"{}\" to \"{}\"", attr.name, attr.value, rewritten);
                attr.value = rewritten;
            }
        }
    });
}
