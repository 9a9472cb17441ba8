//! In-memory catalog client and a synchronous effect driver shared by the
//! integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use pokedex::action::Action;
use pokedex::api::{ApiError, CatalogClient};
use pokedex::effect::Effect;
use pokedex::reducer::reducer;
use pokedex::state::{AbilityDetail, AbilitySlot, AppState, ListPage, NamedRef, PokemonDetail};
use pokedex::tasks::TaskRunner;

const BASE: &str = "mock://pokeapi";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    ListPage { offset: usize, limit: usize },
    ListByType(String),
    DetailByUrl(String),
    DetailByName(String),
    AbilityByUrl(String),
}

pub fn pokemon(id: u32, name: &str, types: &[&str]) -> PokemonDetail {
    PokemonDetail {
        id,
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        stats: Vec::new(),
        abilities: vec![AbilitySlot {
            name: format!("{name}-ability"),
            url: format!("{BASE}/ability/{id}/"),
            is_hidden: false,
        }],
        moves: Vec::new(),
        height: 7,
        weight: 69,
        sprite_front_default: None,
    }
}

pub fn pokemon_url(id: u32) -> String {
    format!("{BASE}/pokemon/{id}/")
}

#[derive(Default)]
pub struct MockCatalog {
    pokemon: Vec<PokemonDetail>,
    types: HashMap<String, Vec<NamedRef>>,
    failing: HashSet<u32>,
    /// Each list page starts this many entries before the requested offset.
    list_overlap: usize,
    /// When set, gated calls keep waiting after their token fires.
    ignore_cancel: bool,
    /// How long each `detail_by_url` call stays in flight.
    detail_delay: Duration,
    detail_in_flight: AtomicUsize,
    detail_peak: AtomicUsize,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockCatalog {
    pub fn new(pokemon: Vec<PokemonDetail>) -> Self {
        let mut types: HashMap<String, Vec<NamedRef>> = HashMap::new();
        for entry in &pokemon {
            for type_name in &entry.types {
                types.entry(type_name.clone()).or_default().push(NamedRef {
                    name: entry.name.clone(),
                    url: pokemon_url(entry.id),
                });
            }
        }
        Self {
            pokemon,
            types,
            ..Self::default()
        }
    }

    /// `count` generated pokemon, alternating between fire and water.
    pub fn generated(count: u32) -> Self {
        Self::new(
            (1..=count)
                .map(|id| {
                    let type_name = if id % 2 == 0 { "water" } else { "fire" };
                    pokemon(id, &format!("mon{id}"), &[type_name])
                })
                .collect(),
        )
    }

    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.list_overlap = overlap;
        self
    }

    pub fn ignoring_cancel(mut self) -> Self {
        self.ignore_cancel = true;
        self
    }

    pub fn slow_details(mut self, delay: Duration) -> Self {
        self.detail_delay = delay;
        self
    }

    /// Most `detail_by_url` calls observed in flight at the same time.
    pub fn peak_detail_requests(&self) -> usize {
        self.detail_peak.load(Ordering::SeqCst)
    }

    pub fn failing(mut self, id: u32) -> Self {
        self.failing.insert(id);
        self
    }

    /// Holds calls keyed by `key` (a type or pokemon name) until [`release`](Self::release).
    pub fn gate(&self, key: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(key.to_string(), Arc::new(Notify::new()));
    }

    pub fn release(&self, key: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(key) {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn remote_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait(&self, key: &str, cancel: &CancellationToken) -> Result<(), ApiError> {
        let gate = self.gates.lock().unwrap().get(key).cloned();
        let Some(gate) = gate else {
            return check(cancel);
        };
        if self.ignore_cancel {
            gate.notified().await;
            return Ok(());
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
            _ = gate.notified() => Ok(()),
        }
    }

    fn refs(&self) -> Vec<NamedRef> {
        self.pokemon
            .iter()
            .map(|entry| NamedRef {
                name: entry.name.clone(),
                url: pokemon_url(entry.id),
            })
            .collect()
    }
}

fn check(cancel: &CancellationToken) -> Result<(), ApiError> {
    if cancel.is_cancelled() {
        Err(ApiError::Cancelled)
    } else {
        Ok(())
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Remote {
        status: Some(404),
        message: format!("{what} not found"),
    }
}

#[async_trait]
impl CatalogClient for MockCatalog {
    async fn list_page(
        &self,
        offset: usize,
        limit: usize,
        cancel: &CancellationToken,
    ) -> Result<ListPage, ApiError> {
        self.record(Call::ListPage { offset, limit });
        self.wait("list", cancel).await?;
        let refs = self.refs();
        let start = offset.saturating_sub(self.list_overlap).min(refs.len());
        let end = (offset + limit).min(refs.len());
        Ok(ListPage {
            items: refs[start..end].to_vec(),
            next: (offset + limit < refs.len())
                .then(|| format!("{BASE}/pokemon?offset={}&limit={limit}", offset + limit)),
            count: refs.len(),
        })
    }

    async fn list_by_type(
        &self,
        type_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<NamedRef>, ApiError> {
        self.record(Call::ListByType(type_name.to_string()));
        self.wait(type_name, cancel).await?;
        self.types
            .get(type_name)
            .cloned()
            .ok_or_else(|| not_found(type_name))
    }

    async fn detail_by_url(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<PokemonDetail, ApiError> {
        self.record(Call::DetailByUrl(url.to_string()));
        let in_flight = self.detail_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.detail_peak.fetch_max(in_flight, Ordering::SeqCst);
        if !self.detail_delay.is_zero() {
            tokio::time::sleep(self.detail_delay).await;
        }
        self.detail_in_flight.fetch_sub(1, Ordering::SeqCst);
        if !self.ignore_cancel {
            check(cancel)?;
        }
        self.pokemon
            .iter()
            .find(|entry| pokemon_url(entry.id) == url && !self.failing.contains(&entry.id))
            .cloned()
            .ok_or_else(|| not_found(url))
    }

    async fn detail_by_name(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<PokemonDetail, ApiError> {
        self.record(Call::DetailByName(name.to_string()));
        self.wait(name, cancel).await?;
        let name = name.to_lowercase();
        self.pokemon
            .iter()
            .find(|entry| entry.name == name)
            .cloned()
            .ok_or_else(|| not_found(&name))
    }

    async fn ability_by_url(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<AbilityDetail, ApiError> {
        self.record(Call::AbilityByUrl(url.to_string()));
        check(cancel)?;
        Ok(AbilityDetail {
            name: url.to_string(),
            effect: Some(format!("effect of {url}")),
        })
    }
}

pub fn runner(client: Arc<MockCatalog>) -> TaskRunner<MockCatalog> {
    TaskRunner::new(client, std::time::Duration::ZERO)
}

/// Runs an effect to completion, returning the action it would dispatch.
pub async fn execute(runner: &TaskRunner<MockCatalog>, effect: Effect) -> Option<Action> {
    match effect {
        Effect::LoadCatalog {
            generation,
            request,
        } => Some(runner.load_catalog(generation, request).await),
        Effect::DebounceSearch { term, revision } => Some(Action::SearchCommit { term, revision }),
        Effect::LookupPokemon { name, lookup } => Some(runner.lookup(name, lookup).await),
        Effect::CancelLookup => {
            runner.cancel_lookup();
            None
        }
        Effect::LoadDetail { name, generation } => {
            Some(runner.load_detail(name, generation).await)
        }
        Effect::CancelDetail => {
            runner.cancel_detail();
            None
        }
        Effect::LoadAbility {
            name,
            url,
            generation,
        } => Some(runner.load_ability(name, url, generation).await),
    }
}

/// Dispatches `action` and every action its effects produce, depth first.
pub async fn drive(runner: &TaskRunner<MockCatalog>, state: &mut AppState, action: Action) {
    let mut pending = vec![action];
    while let Some(action) = pending.pop() {
        let result = reducer(state, action);
        let mut produced = Vec::new();
        for effect in result.effects {
            if let Some(next) = execute(runner, effect).await {
                produced.push(next);
            }
        }
        pending.extend(produced.into_iter().rev());
    }
}
