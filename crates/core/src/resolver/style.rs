//! Rewrites relative css/js paths to context paths, optionally with a
//! cache-busting version query.

use crate::path::replace_path;
use crate::supporter::MixSupporter;
use chrono::Utc;
use mixview_dom::HtmlDocument;
use once_cell::sync::Lazy;
use regex::Regex;

static CSS_PATH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.+/.*css/(.*)$").expect("BUG: invalid CSS_PATH_PATTERN regex literal"));
static CSS_SUFFIX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.css$").expect("BUG: invalid CSS_SUFFIX_PATTERN regex literal"));
static JS_PATH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.+/.*js/(.*)$").expect("BUG: invalid JS_PATH_PATTERN regex literal"));
static JS_SUFFIX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.js$").expect("BUG: invalid JS_SUFFIX_PATTERN regex literal"));

/// Epoch millis of the first use in this process.
static VERSION_QUERY: Lazy<i64> = Lazy::new(|| Utc::now().timestamp_millis());

/// The cache-busting token, constant for the process lifetime.
pub fn version_token() -> i64 {
    *VERSION_QUERY
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StyleResolver {
    version_query_used: bool,
}

impl StyleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_version_query(mut self) -> Self {
        self.version_query_used = true;
        self
    }

    pub fn resolve(&self, html: &mut HtmlDocument, supporter: &MixSupporter<'_>) {
        let context_path = supporter.context_path();
        let root = html.root_mut();
        replace_path(root, &CSS_PATH_PATTERN, |caps| format!("{context_path}/css/{}", &caps[1]));
        if self.version_query_used {
            replace_path(root, &CSS_SUFFIX_PATTERN, |_| format!(".css?v={}", version_token()));
        }
        replace_path(root, &JS_PATH_PATTERN, |caps| format!("{context_path}/js/{}", &caps[1]));
        if self.version_query_used {
            replace_path(root, &JS_SUFFIX_PATTERN, |_| format!(".js?v={}", version_token()));
        }
    }
}
