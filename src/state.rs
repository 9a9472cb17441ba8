//! Application state - single source of truth

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::config::DEFAULT_PAGE_SIZE;

/// Every type the type filter can cycle through, in PokeAPI naming.
pub const POKEMON_TYPES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

/// A `{name, url}` pointer to a resource that has not been fetched yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
    pub url: String,
}

/// One page of the unfiltered `/pokemon` listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
    pub items: Vec<NamedRef>,
    pub next: Option<String>,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub stats: Vec<PokemonStat>,
    pub abilities: Vec<AbilitySlot>,
    pub moves: Vec<String>,
    pub height: u16,
    pub weight: u16,
    pub sprite_front_default: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub name: String,
    pub value: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub name: String,
    pub url: String,
    pub is_hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilityDetail {
    pub name: String,
    pub effect: Option<String>,
}

/// A resolved batch ready to be committed into the collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub offset: usize,
    pub pokemon: Vec<PokemonDetail>,
    pub has_more: bool,
    pub total: Option<usize>,
    /// Full member list of the selected type, present only on the offset-0 load of a filter.
    pub type_members: Option<Vec<NamedRef>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionState {
    pub items: Vec<PokemonDetail>,
    pub next_offset: usize,
    pub has_more: bool,
    pub loading: bool,
    /// Size of the remote collection as last advertised by the API.
    pub total: Option<usize>,
}

impl Default for CollectionState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_offset: 0,
            has_more: true,
            loading: false,
            total: None,
        }
    }
}

impl CollectionState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Appends entries whose id is not yet present, returning how many were added.
    pub fn append_unique(&mut self, batch: Vec<PokemonDetail>) -> usize {
        let before = self.items.len();
        for pokemon in batch {
            if !self.contains_id(pokemon.id) {
                self.items.push(pokemon);
            }
        }
        self.items.len() - before
    }

    /// Replaces the items wholesale, still collapsing duplicate ids within the batch.
    pub fn replace(&mut self, batch: Vec<PokemonDetail>) {
        self.items.clear();
        self.append_unique(batch);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub selected_type: Option<String>,
}

/// What the last committed search term resolved to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum SearchOutcome {
    #[default]
    Idle,
    /// Some loaded Pokemon contains the term; the list filters locally.
    LocalMatch,
    /// No local match and the term is too short or not purely alphabetic.
    TooShort,
    Found(Box<PokemonDetail>),
    NotFound(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    /// Whether the search line is capturing keystrokes.
    pub active: bool,
    /// Raw buffer, updated on every keystroke.
    pub input: String,
    /// Last committed (debounced, trimmed) term.
    pub term: String,
    /// Bumped on every edit; only the debounce carrying the latest revision may commit.
    pub revision: u64,
    /// Bumped on every commit; only the lookup carrying the latest value may resolve.
    pub lookup: u64,
    pub outcome: SearchOutcome,
    pub loading: bool,
}

impl SearchState {
    pub fn resolved_entity(&self) -> Option<&PokemonDetail> {
        match &self.outcome {
            SearchOutcome::Found(pokemon) => Some(pokemon.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            SearchOutcome::NotFound(message) => Some(message),
            _ => None,
        }
    }

    pub fn needs_more_input(&self) -> bool {
        self.outcome == SearchOutcome::TooShort
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AbilityDescription {
    Loading,
    Loaded(String),
    Failed,
}

impl AbilityDescription {
    pub fn text(&self) -> &str {
        match self {
            AbilityDescription::Loading => "Carregando descrição...",
            AbilityDescription::Loaded(text) => text,
            AbilityDescription::Failed => "Erro ao carregar descrição.",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetailState {
    pub name: Option<String>,
    pub generation: u64,
    pub pokemon: DataResource<PokemonDetail>,
    pub selected_ability: usize,
    pub ability_generation: u64,
    pub abilities: HashMap<String, AbilityDescription>,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            name: None,
            generation: 0,
            pokemon: DataResource::Empty,
            selected_ability: 0,
            ability_generation: 0,
            abilities: HashMap::new(),
        }
    }
}

impl DetailState {
    pub fn is_open(&self) -> bool {
        self.name.is_some()
    }

    pub fn loaded(&self) -> Option<&PokemonDetail> {
        match &self.pokemon {
            DataResource::Loaded(pokemon) => Some(pokemon),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.pokemon, DataResource::Loading)
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.pokemon {
            DataResource::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn ability_text(&self, name: &str) -> &str {
        self.abilities
            .get(name)
            .map(AbilityDescription::text)
            .unwrap_or("Selecione para carregar...")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusArea {
    List,
    Detail,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub focus: FocusArea,
    pub page_size: usize,

    pub initialized: bool,
    /// Identity of the active catalog fetch sequence.
    pub generation: u64,
    pub collection: CollectionState,
    pub filter: FilterState,
    pub type_members: Vec<NamedRef>,

    pub search: SearchState,
    pub detail: DetailState,
    pub selected_index: usize,

    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        Self {
            terminal_size: (80, 24),
            focus: FocusArea::List,
            page_size: page_size.max(1),
            initialized: false,
            generation: 0,
            collection: CollectionState::default(),
            filter: FilterState::default(),
            type_members: Vec::new(),
            search: SearchState::default(),
            detail: DetailState::default(),
            selected_index: 0,
            message: None,
        }
    }

    /// What the list shows: the remotely resolved entity, or the loaded
    /// collection narrowed by the raw search input.
    pub fn visible_pokemon(&self) -> Vec<&PokemonDetail> {
        if let Some(pokemon) = self.search.resolved_entity() {
            return vec![pokemon];
        }
        let query = self.search.input.trim().to_lowercase();
        self.collection
            .items
            .iter()
            .filter(|pokemon| query.is_empty() || pokemon.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn selected_pokemon(&self) -> Option<&PokemonDetail> {
        self.visible_pokemon().get(self.selected_index).copied()
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_pokemon().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn can_load_more(&self) -> bool {
        self.collection.has_more && !self.collection.loading && self.search.input.is_empty()
    }
}

/// The `[offset, offset + limit)` window of `members`, clamped to its bounds.
pub fn page_slice(members: &[NamedRef], offset: usize, limit: usize) -> Vec<NamedRef> {
    let start = offset.min(members.len());
    let end = offset.saturating_add(limit).min(members.len());
    members[start..end].to_vec()
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("generation", ron_string(&self.generation))
                .entry("items", ron_string(&self.collection.items.len()))
                .entry("next_offset", ron_string(&self.collection.next_offset))
                .entry("has_more", ron_string(&self.collection.has_more))
                .entry("loading", ron_string(&self.collection.loading))
                .entry("total", ron_string(&self.collection.total))
                .entry("type", ron_string(&self.filter.selected_type))
                .entry("type_members", ron_string(&self.type_members.len())),
            DebugSection::new("Search")
                .entry("input", ron_string(&self.search.input))
                .entry("term", ron_string(&self.search.term))
                .entry("revision", ron_string(&self.search.revision))
                .entry("lookup", ron_string(&self.search.lookup))
                .entry("loading", ron_string(&self.search.loading))
                .entry("error", ron_string(&self.search.error())),
            DebugSection::new("Detail")
                .entry("name", ron_string(&self.detail.name))
                .entry("generation", ron_string(&self.detail.generation))
                .entry("ability_generation", ron_string(&self.detail.ability_generation))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
