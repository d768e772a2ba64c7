//! Entity references accepted in XHTML templates.
//!
//! XML only predefines five entities; templates written as HTML commonly use a
//! handful more. Those are resolved here so `&nbsp;` does not fail the parse.

/// Resolves a named entity (without `&` and `;`) to its text.
pub fn resolve_named(name: &str) -> Option<&'static str> {
    let text = match name {
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "yen" => "\u{a5}",
        "euro" => "\u{20ac}",
        "middot" => "\u{b7}",
        "hellip" => "\u{2026}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "times" => "\u{d7}",
        "larr" => "\u{2190}",
        "rarr" => "\u{2192}",
        _ => return None,
    };
    Some(text)
}

/// Resolves any entity body: named, `#123` decimal or `#x7B` hexadecimal.
pub fn resolve(body: &str) -> Option<String> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    resolve_named(body).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(resolve("amp").as_deref(), Some("&"));
        assert_eq!(resolve("nbsp").as_deref(), Some("\u{a0}"));
        assert_eq!(resolve("#65").as_deref(), Some("A"));
        assert_eq!(resolve("#x41").as_deref(), Some("A"));
        assert_eq!(resolve("bogus"), None);
        assert_eq!(resolve("#xZZ"), None);
    }
}
