use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{
    Component, EventContext, EventKind, EventRoutingState, HandlerResponse, RenderContext,
};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use crate::action::Action;
use crate::state::{AppState, FocusArea, PokemonDetail, PokemonStat};

const BG_BASE: Color = Color::Rgb(12, 18, 28);
const BG_PANEL: Color = Color::Rgb(20, 32, 46);
const BG_PANEL_ALT: Color = Color::Rgb(26, 40, 58);
const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const TEXT_ERROR: Color = Color::Rgb(232, 108, 96);
const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);

const SEARCH_PLACEHOLDER: &str = "Buscar Pokémon pelo nome...";
const TOO_SHORT_HINT: &str = "Digite ao menos 3 letras para buscar na PokéAPI.";
const EMPTY_CATALOG: &str = "Nenhum Pokémon encontrado.";
const MOVE_PREVIEW: usize = 12;

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PokedexComponentId {
    Header,
    DexList,
    Detail,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PokedexContext {
    Header,
    DexList,
    Detail,
    Search,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        if self.search.active {
            return Some(PokedexComponentId::Search);
        }
        match self.focus {
            FocusArea::List => Some(PokedexComponentId::DexList),
            FocusArea::Detail => Some(PokedexComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        if self.search.active {
            Some(PokedexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: PokedexComponentId) -> PokedexContext {
        match id {
            PokedexComponentId::Header => PokedexContext::Header,
            PokedexComponentId::DexList => PokedexContext::DexList,
            PokedexComponentId::Detail => PokedexContext::Detail,
            PokedexComponentId::Search => PokedexContext::Search,
        }
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::DexList
    }
}

struct ScreenAreas {
    header: Rect,
    list: Rect,
    detail: Rect,
    footer: Rect,
}

fn screen_areas(area: Rect) -> ScreenAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);
    ScreenAreas {
        header: rows[0],
        list: columns[0],
        detail: columns[1],
        footer: rows[2],
    }
}

pub struct PokedexUi {
    dex_list: SelectList,
    ability_list: SelectList,
    status_bar: StatusBar,
}

impl Default for PokedexUi {
    fn default() -> Self {
        Self::new()
    }
}

impl PokedexUi {
    pub fn new() -> Self {
        Self {
            dex_list: SelectList::new(),
            ability_list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokedexComponentId>,
    ) {
        let areas = screen_areas(area);
        event_ctx.set_component_area(PokedexComponentId::Header, areas.header);
        if state.search.active {
            event_ctx.set_component_area(PokedexComponentId::Search, areas.header);
        } else {
            event_ctx
                .component_areas
                .remove(&PokedexComponentId::Search);
        }
        event_ctx.set_component_area(PokedexComponentId::DexList, areas.list);
        event_ctx.set_component_area(PokedexComponentId::Detail, areas.detail);
        self.draw(frame, area, state);
    }

    /// Draws the whole screen without touching event routing.
    pub fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
        let areas = screen_areas(area);
        render_header(frame, areas.header, state);
        render_list(frame, areas.list, state, &mut self.dex_list);
        render_detail(frame, areas.detail, state, &mut self.ability_list);
        render_footer(frame, areas.footer, state, &mut self.status_bar);
    }

    pub fn handle_header_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_header_event(event, state)
    }

    pub fn handle_list_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_list_event(event, state, &mut self.dex_list)
    }

    pub fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_detail_event(event, state, &mut self.ability_list)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_search_event(event, state)
    }
}

pub fn handle_header_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Char('c') => vec![Action::TypeFilterClear],
            _ => vec![],
        },
        _ => vec![],
    };
    handler_response(actions)
}

pub fn handle_list_event(
    event: &EventKind,
    state: &AppState,
    dex_list: &mut SelectList,
) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Enter => vec![Action::DetailOpenSelected],
            crossterm::event::KeyCode::Char('m') => vec![Action::CatalogLoadMore],
            crossterm::event::KeyCode::Char('c') => vec![Action::TypeFilterClear],
            crossterm::event::KeyCode::Esc if !state.search.input.is_empty() => {
                vec![Action::SearchCancel]
            }
            crossterm::event::KeyCode::Right | crossterm::event::KeyCode::Char('l')
                if state.detail.is_open() =>
            {
                vec![Action::FocusSet(FocusArea::Detail)]
            }
            _ => {
                let items = dex_items(state);
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.selected_index.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: dex_list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::ListSelect,
                    render_item: &|item| item.clone(),
                };
                let actions: Vec<_> = dex_list.handle_event(event, props).into_iter().collect();
                return handler_response(actions);
            }
        },
        EventKind::Scroll { delta, .. } => vec![Action::SelectionMove((*delta * 3) as i16)],
        _ => vec![],
    };
    handler_response(actions)
}

pub fn handle_detail_event(
    event: &EventKind,
    state: &AppState,
    ability_list: &mut SelectList,
) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Esc => vec![Action::DetailClose],
            crossterm::event::KeyCode::Left | crossterm::event::KeyCode::Char('h') => {
                vec![Action::FocusSet(FocusArea::List)]
            }
            _ => vec![],
        },
        _ => vec![],
    };
    if !actions.is_empty() {
        return handler_response(actions);
    }

    let items = ability_items(state);
    if items.is_empty() {
        return HandlerResponse::ignored();
    }
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state
            .detail
            .selected_ability
            .min(items.len().saturating_sub(1)),
        is_focused: true,
        style: detail_list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: false,
            wrap_navigation: false,
        },
        on_select: Action::AbilitySelect,
        render_item: &|item| item.clone(),
    };
    let actions: Vec<_> = ability_list
        .handle_event(event, props)
        .into_iter()
        .collect();
    handler_response(actions)
}

pub fn handle_search_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Esc => vec![Action::SearchCancel],
            crossterm::event::KeyCode::Enter => vec![Action::SearchSubmit],
            crossterm::event::KeyCode::Backspace => vec![Action::SearchBackspace],
            crossterm::event::KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
            _ => vec![],
        },
        _ => vec![],
    };
    handler_response(actions)
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let title_style = Style::default()
        .fg(ACCENT_TEAL)
        .add_modifier(Modifier::BOLD);
    let filter = state
        .filter
        .selected_type
        .as_deref()
        .map(|name| name.to_ascii_uppercase())
        .unwrap_or_else(|| "ALL".to_string());
    let loaded = state.collection.items.len();
    let total = state
        .collection
        .total
        .map(|total| total.to_string())
        .unwrap_or_else(|| "?".to_string());

    let search = if state.search.active {
        Span::styled(
            format!("/{}_", state.search.input),
            Style::default().fg(ACCENT_TEAL),
        )
    } else if state.search.input.is_empty() {
        Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(TEXT_DIM))
    } else {
        Span::styled(
            format!("/{}", state.search.input),
            Style::default().fg(ACCENT_TEAL),
        )
    };
    let mut search_line = vec![Span::raw("Search: "), search];
    if state.search.loading {
        search_line.push(Span::styled(
            "  buscando...",
            Style::default().fg(ACCENT_GOLD),
        ));
    }

    let header_text = Text::from(vec![
        Line::from(vec![
            Span::styled("POKEDEX", title_style),
            Span::raw("  |  Type: "),
            Span::styled(filter, Style::default().fg(ACCENT_GOLD)),
            Span::raw("  |  Loaded: "),
            Span::styled(format!("{loaded}/{total}"), Style::default().fg(ACCENT_TEAL)),
        ]),
        Line::from(search_line),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(if state.search.active {
            active_border()
        } else {
            Style::default().fg(TEXT_DIM)
        });
    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(Style::default().fg(TEXT_MAIN));
    frame.render_widget(paragraph, area);
}

fn render_list(frame: &mut Frame, area: Rect, state: &AppState, dex_list: &mut SelectList) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("DEX")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(focus_border(state, FocusArea::List));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(message) = list_notice(state) {
        let (text, color) = message;
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(color))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let items = dex_items(state);
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: state.selected_index.min(items.len().saturating_sub(1)),
        is_focused: state.focus == FocusArea::List && !state.search.active,
        style: dex_list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: false,
        },
        on_select: Action::ListSelect,
        render_item: &|item| item.clone(),
    };
    dex_list.render(frame, inner, props);
}

/// A message shown in place of the list, when there is nothing to list.
fn list_notice(state: &AppState) -> Option<(String, Color)> {
    if let Some(error) = state.search.error() {
        return Some((error.to_string(), TEXT_ERROR));
    }
    if !state.visible_pokemon().is_empty() {
        return None;
    }
    if state.search.needs_more_input() {
        return Some((TOO_SHORT_HINT.to_string(), TEXT_DIM));
    }
    if state.collection.loading || state.search.loading {
        return Some(("Carregando...".to_string(), TEXT_DIM));
    }
    Some((EMPTY_CATALOG.to_string(), TEXT_DIM))
}

fn render_detail(frame: &mut Frame, area: Rect, state: &AppState, ability_list: &mut SelectList) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("DATA")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(focus_border(state, FocusArea::Detail));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !state.detail.is_open() {
        let text = match state.selected_pokemon() {
            Some(pokemon) => {
                let mut lines = profile_lines(pokemon);
                lines.push(Line::from(""));
                lines.push(Line::styled(
                    "Enter: ver detalhes",
                    Style::default().fg(TEXT_DIM),
                ));
                Text::from(lines)
            }
            None => Text::styled("[select a pokemon]", Style::default().fg(TEXT_DIM)),
        };
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
        return;
    }

    if let Some(message) = state.detail.failure() {
        frame.render_widget(
            Paragraph::new(message.to_string())
                .style(Style::default().fg(TEXT_ERROR))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let Some(pokemon) = state.detail.loaded() else {
        frame.render_widget(
            Paragraph::new("Carregando...")
                .style(Style::default().fg(TEXT_DIM))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(5)])
        .split(inner);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[0]);

    let mut profile = profile_lines(pokemon);
    profile.push(Line::from(format!(
        "Height: {:.1} m  Weight: {:.1} kg",
        f32::from(pokemon.height) / 10.0,
        f32::from(pokemon.weight) / 10.0
    )));
    profile.push(Line::from(""));
    profile.extend(move_lines(pokemon));
    frame.render_widget(
        Paragraph::new(Text::from(profile)).wrap(Wrap { trim: true }),
        top[0],
    );

    let stats_block = Block::default()
        .borders(Borders::ALL)
        .title("STATS")
        .style(Style::default().fg(TEXT_MAIN));
    frame.render_widget(
        Paragraph::new(detail_stats(pokemon)).block(stats_block),
        top[1],
    );

    render_abilities(frame, layout[1], state, pokemon, ability_list);
}

fn render_abilities(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    pokemon: &PokemonDetail,
    ability_list: &mut SelectList,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    let list_block = Block::default()
        .borders(Borders::ALL)
        .title("ABILITIES")
        .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN));
    let list_inner = list_block.inner(layout[0]);
    frame.render_widget(list_block, layout[0]);

    let items = ability_items(state);
    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("No abilities.").style(Style::default().fg(TEXT_DIM)),
            list_inner,
        );
    } else {
        let props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state
                .detail
                .selected_ability
                .min(items.len().saturating_sub(1)),
            is_focused: state.focus == FocusArea::Detail,
            style: detail_list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: false,
                wrap_navigation: false,
            },
            on_select: Action::AbilitySelect,
            render_item: &|item| item.clone(),
        };
        ability_list.render(frame, list_inner, props);
    }

    let detail_block = Block::default()
        .borders(Borders::ALL)
        .title("ABILITY DETAIL")
        .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN));
    let description = pokemon
        .abilities
        .get(state.detail.selected_ability)
        .map(|slot| state.detail.ability_text(&slot.name).to_string())
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(description)
            .block(detail_block)
            .wrap(Wrap { trim: true }),
        layout[1],
    );
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = state.message.clone().unwrap_or_else(|| {
        if state.collection.loading {
            "Loading pokedex...".to_string()
        } else if state.search.loading {
            "Searching...".to_string()
        } else if state.detail.is_loading() {
            "Loading pokemon...".to_string()
        } else if !state.collection.has_more && !state.collection.items.is_empty() {
            "End of pokedex".to_string()
        } else {
            "".to_string()
        }
    });
    let (left_hints, center_hints) = status_hints(state);
    let status_color = if state.message.is_some() {
        TEXT_ERROR
    } else {
        ACCENT_GOLD
    };
    let status_span = Span::styled(status.as_str(), Style::default().fg(status_color));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&left_hints).with_separator("  "),
        center: StatusBarSection::hints(&center_hints).with_separator("  "),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn status_hints(state: &AppState) -> (Vec<StatusBarHint<'static>>, Vec<StatusBarHint<'static>>) {
    if state.search.active {
        let left = vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Cancel"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
        return (left, Vec::new());
    }

    let left = match state.focus {
        FocusArea::List => vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("Enter", "Details"),
            StatusBarHint::new("m", "More"),
        ],
        FocusArea::Detail => vec![
            StatusBarHint::new("j/k", "Ability"),
            StatusBarHint::new("h", "List"),
            StatusBarHint::new("Esc", "Close"),
        ],
    };
    let center = vec![
        StatusBarHint::new("/", "Search"),
        StatusBarHint::new("[ ]", "Type"),
        StatusBarHint::new("c", "All"),
        StatusBarHint::new("q", "Quit"),
    ];
    (left, center)
}

fn dex_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .visible_pokemon()
        .into_iter()
        .map(|pokemon| {
            Line::from(vec![
                Span::raw(format!("#{:03} {}", pokemon.id, format_name(&pokemon.name))),
                Span::styled(
                    format!("  {}", pokemon.types.join("/")),
                    Style::default().fg(TEXT_DIM),
                ),
            ])
        })
        .collect()
}

fn ability_items(state: &AppState) -> Vec<Line<'static>> {
    let Some(pokemon) = state.detail.loaded() else {
        return Vec::new();
    };
    pokemon
        .abilities
        .iter()
        .map(|slot| {
            let hidden = if slot.is_hidden { " (hidden)" } else { "" };
            Line::from(format!("{}{hidden}", format_name(&slot.name)))
        })
        .collect()
}

fn profile_lines(pokemon: &PokemonDetail) -> Vec<Line<'static>> {
    vec![
        Line::styled(
            format!("#{:03} {}", pokemon.id, format_name(&pokemon.name)),
            Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(vec![
            Span::raw("Types: "),
            Span::styled(
                pokemon
                    .types
                    .iter()
                    .map(|name| name.to_ascii_uppercase())
                    .collect::<Vec<_>>()
                    .join(" / "),
                Style::default().fg(ACCENT_GOLD),
            ),
        ]),
    ]
}

fn move_lines(pokemon: &PokemonDetail) -> Vec<Line<'static>> {
    if pokemon.moves.is_empty() {
        return vec![Line::styled("No moves.", Style::default().fg(TEXT_DIM))];
    }
    let preview = pokemon
        .moves
        .iter()
        .take(MOVE_PREVIEW)
        .map(|name| format_name(name))
        .collect::<Vec<_>>()
        .join(", ");
    let rest = pokemon.moves.len().saturating_sub(MOVE_PREVIEW);
    let mut lines = vec![
        Line::styled(
            format!("Moves ({})", pokemon.moves.len()),
            Style::default().fg(ACCENT_GOLD),
        ),
        Line::from(preview),
    ];
    if rest > 0 {
        lines.push(Line::styled(
            format!("+{rest} more"),
            Style::default().fg(TEXT_DIM),
        ));
    }
    lines
}

fn detail_stats(pokemon: &PokemonDetail) -> Text<'static> {
    if pokemon.stats.is_empty() {
        return Text::from("No stats loaded.");
    }
    Text::from(
        pokemon
            .stats
            .iter()
            .map(|stat| Line::from(render_stat(stat)))
            .collect::<Vec<_>>(),
    )
}

fn dex_list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn detail_list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL_ALT),
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => "".to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_stat(stat: &PokemonStat) -> String {
    let label = shorten_stat(&stat.name);
    let bar_len = (stat.value as usize / 10).clamp(1, 20);
    let bar = "#".repeat(bar_len);
    format!("{label:>4} {value:>3} {bar}", value = stat.value)
}

fn shorten_stat(name: &str) -> String {
    match name {
        "hp" => " HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SAT".to_string(),
        "special-defense" => "SDF".to_string(),
        "speed" => "SPD".to_string(),
        _ => name.to_ascii_uppercase(),
    }
}

fn active_border() -> Style {
    Style::default()
        .fg(ACCENT_TEAL)
        .add_modifier(Modifier::BOLD)
}

fn focus_border(state: &AppState, area: FocusArea) -> Style {
    if state.focus == area && !state.search.active {
        active_border()
    } else {
        Style::default().fg(TEXT_DIM)
    }
}
