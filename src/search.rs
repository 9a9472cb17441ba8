//! Search term resolution
//!
//! Decides, for a committed term, whether the already-loaded collection can
//! answer it or whether an exact-name lookup is worth a request.

use crate::state::PokemonDetail;

/// Shortest term that may be escalated to a remote lookup.
pub const MIN_REMOTE_TERM_LEN: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchDecision {
    Clear,
    LocalMatch,
    Remote(String),
    TooShort,
}

pub fn decide(term: &str, loaded: &[PokemonDetail]) -> SearchDecision {
    let term = term.trim();
    if term.is_empty() {
        return SearchDecision::Clear;
    }

    let needle = term.to_lowercase();
    if loaded
        .iter()
        .any(|pokemon| pokemon.name.to_lowercase().contains(&needle))
    {
        return SearchDecision::LocalMatch;
    }

    if term.chars().count() >= MIN_REMOTE_TERM_LEN && term.chars().all(char::is_alphabetic) {
        SearchDecision::Remote(term.to_string())
    } else {
        SearchDecision::TooShort
    }
}

pub fn not_found_message(term: &str) -> String {
    format!("Pokémon \"{term}\" não encontrado.")
}
