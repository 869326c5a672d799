//! Minimal inflection helpers for label fallbacks.
//!
//! Hosts with a full I18n/inflector stack should prefer it for
//! human-readable names. This crate only needs enough to produce sensible
//! defaults when no explicit label or translation is configured: camelize for
//! stored STI values, humanize for display labels, pluralize for headers.

/// `blog_post` -> `BlogPost`. Already-camelized input passes through.
pub fn camelize(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// `BlogPost` -> `blog_post`. Underscored input passes through.
pub fn underscore(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `blog_post` or `BlogPost` -> `Blog post`.
pub fn humanize(name: &str) -> String {
    let underscored = underscore(name);
    let spaced = underscored.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Naive English pluralization, good enough for default page headers.
pub fn pluralize(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let lower = name.to_lowercase();
    if let Some(stem) = lower.strip_suffix('y') {
        let penultimate = stem.chars().last();
        if !matches!(penultimate, Some('a' | 'e' | 'i' | 'o' | 'u')) {
            return format!("{}ies", &name[..name.len() - 1]);
        }
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{name}es");
    }
    format!("{name}s")
}
