//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::{Effect, PageRequest, PageSource};
use crate::search::{self, SearchDecision};
use crate::state::{
    page_slice, AbilityDescription, AppState, FocusArea, SearchOutcome, POKEMON_TYPES,
};

const CATALOG_ERROR: &str = "Erro ao carregar Pokémon. Tente novamente.";
const DETAIL_ERROR: &str = "Ocorreu um erro ao carregar os detalhes do Pokémon. Tente novamente.";
const NO_ABILITY_DESCRIPTION: &str = "Nenhuma descrição disponível.";

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            if state.initialized {
                return DispatchResult::unchanged();
            }
            state.initialized = true;
            DispatchResult::changed_with(restart_catalog(state))
        }

        // ===== Catalog =====
        Action::CatalogLoadMore => match load_more(state) {
            Some(effect) => DispatchResult::changed_with(effect),
            None => DispatchResult::unchanged(),
        },

        Action::CatalogDidLoad { generation, page } => {
            if generation != state.generation {
                return DispatchResult::unchanged();
            }
            if let Some(members) = page.type_members {
                state.type_members = members;
            }
            if page.offset == 0 {
                state.collection.replace(page.pokemon);
            } else {
                state.collection.append_unique(page.pokemon);
            }
            state.collection.next_offset = page.offset + state.page_size;
            state.collection.has_more = page.has_more;
            state.collection.total = page.total;
            state.collection.loading = false;
            state.message = None;
            state.clamp_selection();
            DispatchResult::changed()
        }

        Action::CatalogDidError { generation, error } => {
            if generation != state.generation {
                return DispatchResult::unchanged();
            }
            state.collection.loading = false;
            if !error.is_cancelled() {
                state.message = Some(CATALOG_ERROR.to_string());
            }
            DispatchResult::changed()
        }

        Action::TypeFilterSet(type_name) => set_type_filter(state, type_name),
        Action::TypeFilterNext => cycle_filter(state, 1),
        Action::TypeFilterPrev => cycle_filter(state, -1),
        Action::TypeFilterClear => set_type_filter(state, None),

        // ===== Search =====
        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.input.is_empty() {
                return DispatchResult::unchanged();
            }
            let effect = clear_search(state);
            state.clamp_selection();
            DispatchResult::changed_with_many(effect.into_iter().collect())
        }

        Action::SearchSubmit => {
            state.search.active = false;
            state.search.revision += 1;
            let term = state.search.input.clone();
            DispatchResult::changed_with(commit_search(state, &term))
        }

        Action::SearchInput(ch) => {
            state.search.input.push(ch);
            edit_search(state)
        }

        Action::SearchBackspace => {
            if state.search.input.pop().is_none() {
                return DispatchResult::unchanged();
            }
            edit_search(state)
        }

        Action::SearchSet(term) => {
            if state.search.input == term {
                return DispatchResult::unchanged();
            }
            state.search.input = term;
            edit_search(state)
        }

        Action::SearchCommit { term, revision } => {
            if revision != state.search.revision {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with(commit_search(state, &term))
        }

        Action::SearchDidLoad { lookup, pokemon } => {
            if lookup != state.search.lookup {
                return DispatchResult::unchanged();
            }
            state.search.loading = false;
            state.search.outcome = SearchOutcome::Found(Box::new(pokemon));
            state.selected_index = 0;
            DispatchResult::changed()
        }

        Action::SearchDidError { lookup, error } => {
            if lookup != state.search.lookup {
                return DispatchResult::unchanged();
            }
            state.search.loading = false;
            if error.is_cancelled() {
                return DispatchResult::changed();
            }
            state.search.outcome = if error.is_not_found() {
                SearchOutcome::NotFound(search::not_found_message(&state.search.term))
            } else {
                SearchOutcome::Idle
            };
            DispatchResult::changed()
        }

        // ===== List selection =====
        Action::SelectionMove(delta) => {
            let index = (state.selected_index as i64 + delta as i64).max(0) as usize;
            select_index(state, index)
        }

        Action::ListSelect(index) => select_index(state, index),

        // ===== Detail =====
        Action::DetailOpen(name) => open_detail(state, &name),

        Action::DetailOpenSelected => {
            let Some(name) = state.selected_pokemon().map(|pokemon| pokemon.name.clone()) else {
                return DispatchResult::unchanged();
            };
            open_detail(state, &name)
        }

        Action::DetailClose => {
            if !state.detail.is_open() {
                return DispatchResult::unchanged();
            }
            state.detail.generation += 1;
            state.detail.ability_generation += 1;
            state.detail.name = None;
            state.detail.pokemon = DataResource::Empty;
            state.detail.abilities.clear();
            state.detail.selected_ability = 0;
            state.focus = FocusArea::List;
            DispatchResult::changed_with(Effect::CancelDetail)
        }

        Action::DetailDidLoad {
            generation,
            pokemon,
        } => {
            if generation != state.detail.generation {
                return DispatchResult::unchanged();
            }
            state.detail.pokemon = DataResource::Loaded(pokemon);
            state.detail.selected_ability = 0;
            match select_ability(state, 0) {
                Some(effect) => DispatchResult::changed_with(effect),
                None => DispatchResult::changed(),
            }
        }

        Action::DetailDidError {
            generation,
            name,
            error,
        } => {
            if generation != state.detail.generation || error.is_cancelled() {
                return DispatchResult::unchanged();
            }
            let message = if error.is_not_found() {
                format!("Pokémon \"{name}\" não encontrado. Verifique o nome.")
            } else {
                DETAIL_ERROR.to_string()
            };
            state.detail.pokemon = DataResource::Failed(message);
            DispatchResult::changed()
        }

        Action::AbilitySelect(index) => {
            let moved = index != state.detail.selected_ability;
            match select_ability(state, index) {
                Some(effect) => DispatchResult::changed_with(effect),
                None if moved && state.detail.selected_ability == index => {
                    DispatchResult::changed()
                }
                None => DispatchResult::unchanged(),
            }
        }

        Action::AbilityDidLoad {
            generation,
            name,
            ability,
        } => {
            if generation != state.detail.ability_generation {
                return DispatchResult::unchanged();
            }
            let text = ability
                .effect
                .unwrap_or_else(|| NO_ABILITY_DESCRIPTION.to_string());
            state
                .detail
                .abilities
                .insert(name, AbilityDescription::Loaded(text));
            DispatchResult::changed()
        }

        Action::AbilityDidError {
            generation,
            name,
            error,
        } => {
            if generation != state.detail.ability_generation {
                return DispatchResult::unchanged();
            }
            if error.is_cancelled() {
                state.detail.abilities.remove(&name);
            } else {
                state
                    .detail
                    .abilities
                    .insert(name, AbilityDescription::Failed);
            }
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::FocusSet(area) => {
            if state.focus == area || (area == FocusArea::Detail && !state.detail.is_open()) {
                return DispatchResult::unchanged();
            }
            state.focus = area;
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Starts a fresh offset-0 fetch under the current filter, invalidating every
/// fetch issued before it.
fn restart_catalog(state: &mut AppState) -> Effect {
    state.generation += 1;
    state.collection.reset();
    state.collection.loading = true;
    state.type_members.clear();
    state.selected_index = 0;
    state.message = None;
    let source = match &state.filter.selected_type {
        Some(type_name) => PageSource::Type(type_name.clone()),
        None => PageSource::Remote,
    };
    Effect::LoadCatalog {
        generation: state.generation,
        request: PageRequest {
            offset: 0,
            limit: state.page_size,
            source,
        },
    }
}

fn load_more(state: &mut AppState) -> Option<Effect> {
    if state.collection.loading || !state.collection.has_more {
        return None;
    }
    let offset = state.collection.next_offset;
    let limit = state.page_size;
    let source = match &state.filter.selected_type {
        None => PageSource::Remote,
        // The first window never committed; membership still has to be fetched.
        Some(type_name) if offset == 0 && state.type_members.is_empty() => {
            PageSource::Type(type_name.clone())
        }
        Some(_) => PageSource::Cached {
            refs: page_slice(&state.type_members, offset, limit),
            total: state.type_members.len(),
        },
    };
    state.collection.loading = true;
    Some(Effect::LoadCatalog {
        generation: state.generation,
        request: PageRequest {
            offset,
            limit,
            source,
        },
    })
}

fn set_type_filter(state: &mut AppState, type_name: Option<String>) -> DispatchResult<Effect> {
    state.filter.selected_type = type_name
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty() && name != "all");
    let mut effects: Vec<Effect> = clear_search(state).into_iter().collect();
    effects.push(restart_catalog(state));
    DispatchResult::changed_with_many(effects)
}

fn cycle_filter(state: &mut AppState, delta: isize) -> DispatchResult<Effect> {
    // Index 0 is "all types"; 1..=18 map onto POKEMON_TYPES.
    let slots = POKEMON_TYPES.len() as isize + 1;
    let current = state
        .filter
        .selected_type
        .as_deref()
        .and_then(|name| POKEMON_TYPES.iter().position(|known| *known == name))
        .map(|index| index as isize + 1)
        .unwrap_or(0);
    let next = (current + delta).rem_euclid(slots);
    let type_name = if next == 0 {
        None
    } else {
        Some(POKEMON_TYPES[next as usize - 1].to_string())
    };
    set_type_filter(state, type_name)
}

/// Clears input, committed term and outcome; pending debounces and lookups become stale.
fn clear_search(state: &mut AppState) -> Option<Effect> {
    let had_lookup = state.search.loading;
    state.search.active = false;
    state.search.input.clear();
    state.search.term.clear();
    state.search.outcome = SearchOutcome::Idle;
    state.search.loading = false;
    state.search.revision += 1;
    state.search.lookup += 1;
    had_lookup.then_some(Effect::CancelLookup)
}

fn edit_search(state: &mut AppState) -> DispatchResult<Effect> {
    state.search.revision += 1;
    if matches!(
        state.search.outcome,
        SearchOutcome::Found(_) | SearchOutcome::NotFound(_)
    ) {
        state.search.outcome = SearchOutcome::Idle;
    }
    state.selected_index = 0;
    DispatchResult::changed_with(Effect::DebounceSearch {
        term: state.search.input.clone(),
        revision: state.search.revision,
    })
}

fn commit_search(state: &mut AppState, term: &str) -> Effect {
    state.search.lookup += 1;
    state.search.term = term.trim().to_string();
    state.search.loading = false;
    let decision = search::decide(&state.search.term, &state.collection.items);
    state.search.outcome = match decision {
        SearchDecision::Clear | SearchDecision::Remote(_) => SearchOutcome::Idle,
        SearchDecision::LocalMatch => SearchOutcome::LocalMatch,
        SearchDecision::TooShort => SearchOutcome::TooShort,
    };
    state.clamp_selection();
    match decision {
        SearchDecision::Remote(name) => {
            state.search.loading = true;
            Effect::LookupPokemon {
                name,
                lookup: state.search.lookup,
            }
        }
        _ => Effect::CancelLookup,
    }
}

fn select_index(state: &mut AppState, index: usize) -> DispatchResult<Effect> {
    let len = state.visible_pokemon().len();
    if len == 0 {
        return DispatchResult::unchanged();
    }
    let bounded = index.min(len - 1);
    if bounded == state.selected_index {
        return DispatchResult::unchanged();
    }
    state.selected_index = bounded;
    if bounded == len - 1 && state.can_load_more() {
        if let Some(effect) = load_more(state) {
            return DispatchResult::changed_with(effect);
        }
    }
    DispatchResult::changed()
}

fn open_detail(state: &mut AppState, name: &str) -> DispatchResult<Effect> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return DispatchResult::unchanged();
    }
    state.detail.generation += 1;
    state.detail.ability_generation += 1;
    state.detail.name = Some(name.clone());
    state.detail.pokemon = DataResource::Loading;
    state.detail.abilities.clear();
    state.detail.selected_ability = 0;
    state.focus = FocusArea::Detail;
    DispatchResult::changed_with(Effect::LoadDetail {
        name,
        generation: state.detail.generation,
    })
}

/// Highlights an ability and, when its description is not cached yet,
/// requests it in place of any other description still loading.
fn select_ability(state: &mut AppState, index: usize) -> Option<Effect> {
    let slot = state.detail.loaded()?.abilities.get(index).cloned()?;
    state.detail.selected_ability = index;
    if state.detail.abilities.contains_key(&slot.name) {
        return None;
    }
    state
        .detail
        .abilities
        .retain(|_, description| *description != AbilityDescription::Loading);
    state.detail.ability_generation += 1;
    state
        .detail
        .abilities
        .insert(slot.name.clone(), AbilityDescription::Loading);
    Some(Effect::LoadAbility {
        name: slot.name,
        url: slot.url,
        generation: state.detail.ability_generation,
    })
}
