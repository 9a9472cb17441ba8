use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::state::{AbilityDetail, CatalogPage, FocusArea, PokemonDetail};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    CatalogLoadMore,
    CatalogDidLoad { generation: u64, page: CatalogPage },
    CatalogDidError { generation: u64, error: ApiError },

    TypeFilterSet(Option<String>),
    TypeFilterNext,
    TypeFilterPrev,
    TypeFilterClear,

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,
    SearchSet(String),
    SearchCommit { term: String, revision: u64 },
    SearchDidLoad { lookup: u64, pokemon: PokemonDetail },
    SearchDidError { lookup: u64, error: ApiError },

    SelectionMove(i16),
    ListSelect(usize),

    DetailOpen(String),
    DetailOpenSelected,
    DetailClose,
    DetailDidLoad { generation: u64, pokemon: PokemonDetail },
    DetailDidError { generation: u64, name: String, error: ApiError },
    AbilitySelect(usize),
    AbilityDidLoad { generation: u64, name: String, ability: AbilityDetail },
    AbilityDidError { generation: u64, name: String, error: ApiError },

    FocusSet(FocusArea),
    UiTerminalResize(u16, u16),
    Quit,
}
