//! Text rendering utilities for human-friendly error messages.
//!
//! Provides helpers to format lookup chains, fully qualified names,
//! and helpful suggestions in error output.

/// Renders a lookup chain as a readable string.
///
/// # Examples
/// ```
/// use rabita_support::rendering::render_chain;
///
/// let chain = vec!["store", "cache", "store"];
/// let rendered = render_chain(&chain);
/// assert_eq!(rendered, "store → cache → store");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    chain
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Returns the last path segment of a fully qualified name.
///
/// ```
/// use rabita_support::rendering::shorten_fqn;
///
/// assert_eq!(shorten_fqn("app::cache::RedisCache"), "RedisCache");
/// assert_eq!(shorten_fqn("RedisCache"), "RedisCache");
/// ```
pub fn shorten_fqn(fqn: &str) -> &str {
    fqn.rsplit("::").next().unwrap_or(fqn)
}

/// Generates a "did you mean?" suggestion list for an unresolved token.
///
/// Compares the token against the declared keys and names, scoring
/// substring matches above shared prefixes, and returns the closest
/// matches best-first.
pub fn suggest_similar(
    requested: &str,
    available: &[&str],
    max_suggestions: usize,
) -> Vec<String> {
    let requested_lower = requested.to_lowercase();
    let requested_short = shorten_fqn(&requested_lower);

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter_map(|&name| {
            let name_lower = name.to_lowercase();

            // Exact substring match (highest priority)
            if name_lower.contains(&requested_lower)
                || requested_lower.contains(&name_lower)
            {
                return Some((name, 100));
            }

            // Last-segment match catches typos inside a namespaced name
            let name_short = shorten_fqn(&name_lower);
            if name_short.contains(requested_short)
                || requested_short.contains(name_short)
            {
                return Some((name, 80));
            }

            // Common prefix
            let common = name_lower
                .chars()
                .zip(requested_lower.chars())
                .take_while(|(a, b)| a == b)
                .count();

            if common >= 3 {
                return Some((name, common * 10));
            }

            None
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}
