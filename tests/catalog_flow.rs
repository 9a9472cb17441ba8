//! Store flows with EffectStoreTestHarness, plus full-screen render checks.

use pokedex::{
    action::Action,
    api::ApiError,
    effect::{Effect, PageSource},
    reducer::reducer,
    state::{AppState, CatalogPage, PokemonDetail, SearchOutcome},
    ui::PokedexUi,
};
use tui_dispatch::testing::*;

fn mon(id: u32, name: &str) -> PokemonDetail {
    PokemonDetail {
        id,
        name: name.to_string(),
        types: vec!["grass".into(), "poison".into()],
        stats: Vec::new(),
        abilities: Vec::new(),
        moves: Vec::new(),
        height: 7,
        weight: 69,
        sprite_front_default: None,
    }
}

fn first_page() -> CatalogPage {
    CatalogPage {
        offset: 0,
        pokemon: vec![mon(1, "bulbasaur"), mon(2, "ivysaur"), mon(3, "venusaur")],
        has_more: true,
        total: Some(1302),
        type_members: None,
    }
}

// ============================================================================
// EffectStoreTestHarness flows
// ============================================================================

#[test]
fn init_loads_first_page() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.collection.loading);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(
            e,
            Effect::LoadCatalog { generation: 1, request }
                if request.offset == 0 && request.source == PageSource::Remote
        )
    });

    harness.complete_action(Action::CatalogDidLoad {
        generation: 1,
        page: first_page(),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));

    harness.assert_state(|s| s.collection.items.len() == 3);
    harness.assert_state(|s| !s.collection.loading && s.collection.has_more);
    harness.assert_state(|s| s.collection.total == Some(1302));
}

#[test]
fn clearing_filter_twice_fetches_page_zero_each_time() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.drain_effects();

    let results = harness.dispatch_all([Action::TypeFilterSet(None), Action::TypeFilterSet(None)]);
    assert_eq!(results, vec![true, true]);

    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_all_match(|e| {
        matches!(e, Effect::LoadCatalog { request, .. } if request.offset == 0)
    });
    harness.assert_state(|s| s.generation == 3);
    harness.assert_state(|s| s.collection.items.is_empty() && s.collection.has_more);
}

#[test]
fn type_filter_keys_cycle_and_clear() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::TypeFilterNext);
    harness.assert_state(|s| s.filter.selected_type.as_deref() == Some("normal"));
    harness.dispatch_collect(Action::TypeFilterNext);
    harness.assert_state(|s| s.filter.selected_type.as_deref() == Some("fire"));

    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_all_match(|e| {
        matches!(e, Effect::LoadCatalog { request, .. } if matches!(request.source, PageSource::Type(_)))
    });

    harness.dispatch_collect(Action::TypeFilterClear);
    harness.assert_state(|s| s.filter.selected_type.is_none());
}

#[test]
fn stale_page_after_filter_change_is_ignored() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.dispatch_collect(Action::TypeFilterSet(Some("grass".into())));
    harness.drain_effects();

    harness.complete_action(Action::CatalogDidLoad {
        generation: 1,
        page: first_page(),
    });
    let (changed, _) = harness.process_emitted();

    assert_eq!(changed, 0);
    harness.assert_state(|s| s.collection.items.is_empty() && s.collection.loading);
}

#[test]
fn typing_schedules_debounce_and_escape_clears() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_all([
        Action::SearchStart,
        Action::SearchInput('m'),
        Action::SearchInput('e'),
        Action::SearchInput('w'),
    ]);
    harness.assert_state(|s| s.search.active && s.search.input == "mew");

    let effects = harness.drain_effects();
    effects.effects_count(3);
    effects.effects_all_match(|e| matches!(e, Effect::DebounceSearch { .. }));

    harness.dispatch_collect(Action::SearchCancel);
    harness.assert_state(|s| !s.search.active && s.search.input.is_empty());
    harness.assert_state(|s| s.search.outcome == SearchOutcome::Idle);
}

#[test]
fn submit_commits_without_waiting_for_debounce() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_all([Action::SearchStart, Action::SearchSet("pikachu".into())]);
    harness.drain_effects();

    harness.dispatch_collect(Action::SearchSubmit);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::LookupPokemon { name, .. } if name == "pikachu")
    });
    harness.assert_state(|s| !s.search.active && s.search.loading);

    harness.complete_action(Action::SearchDidError {
        lookup: 1,
        error: ApiError::Remote {
            status: Some(404),
            message: "missing".into(),
        },
    });
    harness.process_emitted();
    harness.assert_state(|s| s.search.error() == Some("Pokémon \"pikachu\" não encontrado."));
}

#[test]
fn open_selected_requests_detail() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.complete_action(Action::CatalogDidLoad {
        generation: 1,
        page: first_page(),
    });
    harness.process_emitted();
    harness.drain_effects();

    harness.dispatch_all([Action::SelectionMove(1), Action::DetailOpenSelected]);

    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| {
        matches!(e, Effect::LoadDetail { name, .. } if name == "ivysaur")
    });
    harness.assert_state(|s| s.detail.is_open() && s.detail.is_loading());
}

// ============================================================================
// Render checks
// ============================================================================

#[test]
fn render_lists_loaded_pokemon() {
    let mut render = RenderHarness::new(100, 30);
    let mut ui = PokedexUi::new();
    let mut state = AppState::default();
    reducer(&mut state, Action::Init);
    reducer(
        &mut state,
        Action::CatalogDidLoad {
            generation: 1,
            page: first_page(),
        },
    );

    let output = render.render_to_string_plain(|frame| ui.draw(frame, frame.area(), &state));

    assert!(output.contains("#001 Bulbasaur"), "should list bulbasaur");
    assert!(output.contains("#003 Venusaur"), "should list venusaur");
    assert!(output.contains("Type: ALL"), "should show the active filter");
    assert!(output.contains("3/1302"), "should show loaded count");
}

#[test]
fn render_shows_not_found_message() {
    let mut render = RenderHarness::new(100, 30);
    let mut ui = PokedexUi::new();
    let mut state = AppState::default();
    state.search.input = "char".into();
    state.search.outcome = SearchOutcome::NotFound("Pokémon \"char\" não encontrado.".into());

    let output = render.render_to_string_plain(|frame| ui.draw(frame, frame.area(), &state));

    assert!(output.contains("não encontrado"), "should show the search error");
}

#[test]
fn render_shows_type_more_hint() {
    let mut render = RenderHarness::new(100, 30);
    let mut ui = PokedexUi::new();
    let mut state = AppState::default();
    state.search.input = "pi".into();
    state.search.outcome = SearchOutcome::TooShort;

    let output = render.render_to_string_plain(|frame| ui.draw(frame, frame.area(), &state));

    assert!(output.contains("Digite ao menos 3 letras"), "should ask for more input");
}
