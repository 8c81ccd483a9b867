use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new("[^a-z0-9-]+").expect("valid regex"));

/// Converts a post title to its URL-safe slug: lowercase, spaces become
/// hyphens, everything outside `[a-z0-9-]` is stripped. A title made entirely
/// of stripped characters yields an empty slug, which callers must reject.
pub fn to_slug(title: &str) -> String {
    let lowered = title.to_lowercase().replace(' ', "-");
    NON_SLUG_CHARS.replace_all(&lowered, "").into_owned()
}
