//! Home screen entry list.
//!
//! The list is the main consumer of the bar's shared state: it filters the
//! loaded entries by the current search term and orders them by the current
//! sort option. It never writes either value.

use crate::domain::{Entry, SortOption};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Ordering;

/// Entries visible for `search_term`, ordered by `sort`.
///
/// The term is split on whitespace and every token must fuzzy-match the
/// entry's display name (case-insensitive). An empty term keeps everything.
///
/// ```
/// use vaultbar::{app::entries::visible_entries, Entry, SortOption};
///
/// let entries = vec![
///     Entry::new("1", "GitLab", "me", 0),
///     Entry::new("2", "GitHub", "me", 1),
///     Entry::new("3", "Proton", "me", 2),
/// ];
/// let shown = visible_entries(&entries, "git", SortOption::AlphabeticalAscending);
/// let issuers: Vec<_> = shown.iter().map(|e| e.issuer.as_str()).collect();
/// assert_eq!(issuers, ["GitHub", "GitLab"]);
/// ```
#[must_use]
pub fn visible_entries(entries: &[Entry], search_term: &str, sort: SortOption) -> Vec<Entry> {
    let _span = tracing::debug_span!("visible_entries",
        total_entries = entries.len(),
        query_len = search_term.len(),
        sort = ?sort
    )
    .entered();

    let tokens: Vec<String> = search_term
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    let mut visible: Vec<Entry> = if tokens.is_empty() {
        entries.to_vec()
    } else {
        let matcher = SkimMatcherV2::default();
        entries
            .iter()
            .filter(|entry| {
                let name = entry.display_name().to_lowercase();
                tokens.iter().all(|token| matcher.fuzzy_match(&name, token).is_some())
            })
            .cloned()
            .collect()
    };

    match sort {
        SortOption::Custom => visible.sort_by_key(|e| e.position),
        SortOption::AlphabeticalAscending => visible.sort_by(alphabetical),
        SortOption::AlphabeticalDescending => visible.sort_by(|a, b| alphabetical(b, a)),
    }

    tracing::debug!(visible_count = visible.len(), "entry list computed");
    visible
}

fn alphabetical(a: &Entry, b: &Entry) -> Ordering {
    a.issuer
        .to_lowercase()
        .cmp(&b.issuer.to_lowercase())
        .then_with(|| a.account.to_lowercase().cmp(&b.account.to_lowercase()))
}
