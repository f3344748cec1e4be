//! Item name resolution with fuzzy matching.

use infoprox_core::Item;
use strsim::jaro_winkler;

use super::command::normalize;

/// Minimum similarity for a "did you mean" suggestion (0.0-1.0).
const SUGGEST_THRESHOLD: f64 = 0.8;

/// Index of the item in `items` that best answers `query`.
///
/// Passes run in priority order and the first pass with any hit wins:
/// exact name, then name prefix, then every query word found among the
/// item's name and tag words, then name suffix.
pub fn find_item(items: &[Item], query: &str) -> Option<usize> {
    let query = normalize(query);
    if query.is_empty() {
        return None;
    }
    let names: Vec<String> = items.iter().map(|i| normalize(&i.name)).collect();

    if let Some(pos) = names.iter().position(|n| *n == query) {
        return Some(pos);
    }
    if let Some(pos) = names.iter().position(|n| n.starts_with(&query)) {
        return Some(pos);
    }

    let words: Vec<&str> = query.split(' ').collect();
    let by_tokens = items.iter().zip(&names).position(|(item, name)| {
        let mut pool: Vec<String> = name.split(' ').map(str::to_string).collect();
        pool.extend(item.tags.iter().flat_map(|t| t.tokens()));
        words.iter().all(|w| pool.iter().any(|p| p == w))
    });
    if by_tokens.is_some() {
        return by_tokens;
    }

    names.iter().position(|n| n.ends_with(&query))
}

/// The name of the item closest to `query`, for "did you mean" hints.
pub fn suggest_item<'a>(items: &'a [Item], query: &str) -> Option<&'a str> {
    let query = normalize(query);
    if query.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|i| (i.name.as_str(), jaro_winkler(&query, &normalize(&i.name))))
        .filter(|(_, score)| *score >= SUGGEST_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(name, _)| name)
}
