//! Text rendering utilities for human-friendly error messages.
//!
//! Registry keys carry full type paths such as
//! `dyn my_app::services::Logger`. These helpers trim them down and
//! find near misses among bound keys.

/// Characters that end a path segment inside a type name.
const DELIMITERS: &[char] = &['<', '>', ',', ' ', '&', '(', ')', '[', ']', ';', '+', '*'];

/// Shortens a fully qualified type name for display.
///
/// ```
/// use warren_support::rendering::shorten_type_name;
///
/// assert_eq!(shorten_type_name("my_app::services::Registry"), "Registry");
/// assert_eq!(
///     shorten_type_name("alloc::sync::Arc<dyn my_app::Logger + Send>"),
///     "Arc<dyn Logger + Send>"
/// );
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut result = String::with_capacity(full_name.len());
    let mut segment_start = 0;

    for (idx, ch) in full_name.char_indices() {
        if DELIMITERS.contains(&ch) {
            result.push_str(last_path_segment(&full_name[segment_start..idx]));
            result.push(ch);
            segment_start = idx + ch.len_utf8();
        }
    }

    result.push_str(last_path_segment(&full_name[segment_start..]));
    result
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Suggests labels from `available` that look like `requested`.
///
/// Matching is case-insensitive on shortened names. Results are ordered
/// best first and capped at `max_suggestions`.
///
/// ```
/// use warren_support::rendering::suggest_similar;
///
/// let bound = ["app::ConsoleLogger", "app::Database"];
/// assert_eq!(suggest_similar("dyn app::Logger", &bound, 3), vec!["app::ConsoleLogger"]);
/// ```
pub fn suggest_similar(requested: &str, available: &[&str], max_suggestions: usize) -> Vec<String> {
    let wanted = normalized(requested);

    let mut scored: Vec<(usize, &str)> = available
        .iter()
        .filter_map(|&candidate| similarity(&wanted, &normalized(candidate)).map(|s| (s, candidate)))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(_, name)| name.to_string())
        .collect()
}

fn normalized(name: &str) -> String {
    let short = shorten_type_name(name).to_lowercase();
    match short.strip_prefix("dyn ") {
        Some(rest) => rest.to_string(),
        None => short,
    }
}

fn similarity(wanted: &str, candidate: &str) -> Option<usize> {
    if wanted.is_empty() || candidate.is_empty() {
        return None;
    }
    if wanted == candidate {
        return Some(100);
    }
    if candidate.contains(wanted) || wanted.contains(candidate) {
        return Some(80);
    }

    let prefix = wanted
        .chars()
        .zip(candidate.chars())
        .take_while(|(a, b)| a == b)
        .count();
    (prefix >= 3).then_some(prefix.min(7) * 10)
}
