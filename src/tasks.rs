//! Effect execution
//!
//! Turns reducer effects into tasks on the `tui-dispatch` task manager. Each
//! request stream (catalog, lookup, detail, ability) owns one
//! [`CancellationToken`] slot: a newer generation cancels the previous token,
//! requests sharing the current generation share its token.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tui_dispatch::{EffectContext, TaskKey};

use crate::action::Action;
use crate::api::{ApiError, CatalogClient};
use crate::effect::{Effect, PageRequest, PageSource};
use crate::state::{page_slice, CatalogPage, NamedRef, PokemonDetail};

const SEARCH_DEBOUNCE_KEY: &str = "search_debounce";
const LOOKUP_KEY: &str = "lookup";

#[derive(Debug, Default)]
struct TokenSlot {
    generation: u64,
    token: Option<CancellationToken>,
}

impl TokenSlot {
    /// Token for a request issued under `generation`.
    fn claim(&mut self, generation: u64) -> CancellationToken {
        if generation < self.generation {
            let stale = CancellationToken::new();
            stale.cancel();
            return stale;
        }
        if generation == self.generation {
            if let Some(token) = &self.token {
                return token.clone();
            }
        }
        self.cancel();
        let token = CancellationToken::new();
        self.generation = generation;
        self.token = Some(token.clone());
        token
    }

    fn cancel(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

pub struct TaskRunner<C: CatalogClient + ?Sized + 'static> {
    client: Arc<C>,
    search_debounce: Duration,
    catalog: Mutex<TokenSlot>,
    lookup: Mutex<TokenSlot>,
    detail: Mutex<TokenSlot>,
    ability: Mutex<TokenSlot>,
}

impl<C: CatalogClient + ?Sized + 'static> TaskRunner<C> {
    pub fn new(client: Arc<C>, search_debounce: Duration) -> Self {
        Self {
            client,
            search_debounce,
            catalog: Mutex::default(),
            lookup: Mutex::default(),
            detail: Mutex::default(),
            ability: Mutex::default(),
        }
    }

    pub fn handle(&self, effect: Effect, ctx: &mut EffectContext<Action>) {
        match effect {
            Effect::LoadCatalog {
                generation,
                request,
            } => {
                let key = format!("catalog_{generation}_{}", request.offset);
                ctx.tasks()
                    .spawn(TaskKey::new(key), self.load_catalog(generation, request));
            }
            Effect::DebounceSearch { term, revision } => {
                ctx.tasks()
                    .debounce(SEARCH_DEBOUNCE_KEY, self.search_debounce, async move {
                        Action::SearchCommit { term, revision }
                    });
            }
            Effect::LookupPokemon { name, lookup } => {
                ctx.tasks()
                    .spawn(TaskKey::new(LOOKUP_KEY), self.lookup(name, lookup));
            }
            Effect::CancelLookup => {
                self.cancel_lookup();
                ctx.tasks().cancel(&TaskKey::new(LOOKUP_KEY));
            }
            Effect::LoadDetail { name, generation } => {
                let key = format!("detail_{generation}");
                ctx.tasks()
                    .spawn(TaskKey::new(key), self.load_detail(name, generation));
            }
            Effect::CancelDetail => self.cancel_detail(),
            Effect::LoadAbility {
                name,
                url,
                generation,
            } => {
                let key = format!("ability_{generation}");
                ctx.tasks()
                    .spawn(TaskKey::new(key), self.load_ability(name, url, generation));
            }
        }
    }

    pub fn load_catalog(
        &self,
        generation: u64,
        request: PageRequest,
    ) -> impl Future<Output = Action> + Send + 'static {
        let cancel = claim(&self.catalog, generation);
        let client = Arc::clone(&self.client);
        async move {
            match fetch_page(&client, &request, &cancel).await {
                Ok(page) => Action::CatalogDidLoad { generation, page },
                Err(error) => {
                    if !error.is_cancelled() {
                        tracing::warn!(generation, offset = request.offset, %error, "catalog load failed");
                    }
                    Action::CatalogDidError { generation, error }
                }
            }
        }
    }

    pub fn lookup(
        &self,
        name: String,
        lookup: u64,
    ) -> impl Future<Output = Action> + Send + 'static {
        let cancel = claim(&self.lookup, lookup);
        let client = Arc::clone(&self.client);
        async move {
            match client.detail_by_name(&name, &cancel).await {
                Ok(pokemon) => Action::SearchDidLoad { lookup, pokemon },
                Err(error) => {
                    if error.is_not_found() {
                        tracing::debug!(%name, "lookup found nothing");
                    } else if !error.is_cancelled() {
                        tracing::warn!(%name, %error, "lookup failed");
                    }
                    Action::SearchDidError { lookup, error }
                }
            }
        }
    }

    pub fn load_detail(
        &self,
        name: String,
        generation: u64,
    ) -> impl Future<Output = Action> + Send + 'static {
        let cancel = claim(&self.detail, generation);
        let client = Arc::clone(&self.client);
        async move {
            match client.detail_by_name(&name, &cancel).await {
                Ok(pokemon) => Action::DetailDidLoad {
                    generation,
                    pokemon,
                },
                Err(error) => {
                    if !error.is_cancelled() && !error.is_not_found() {
                        tracing::warn!(%name, %error, "detail load failed");
                    }
                    Action::DetailDidError {
                        generation,
                        name,
                        error,
                    }
                }
            }
        }
    }

    pub fn load_ability(
        &self,
        name: String,
        url: String,
        generation: u64,
    ) -> impl Future<Output = Action> + Send + 'static {
        let cancel = claim(&self.ability, generation);
        let client = Arc::clone(&self.client);
        async move {
            match client.ability_by_url(&url, &cancel).await {
                Ok(ability) => Action::AbilityDidLoad {
                    generation,
                    name,
                    ability,
                },
                Err(error) => {
                    if !error.is_cancelled() {
                        tracing::warn!(ability = %name, %error, "ability load failed");
                    }
                    Action::AbilityDidError {
                        generation,
                        name,
                        error,
                    }
                }
            }
        }
    }

    pub fn cancel_lookup(&self) {
        cancel(&self.lookup);
    }

    pub fn cancel_detail(&self) {
        cancel(&self.detail);
        cancel(&self.ability);
    }

    /// Cancels every outstanding request.
    pub fn shutdown(&self) {
        for slot in [&self.catalog, &self.lookup, &self.detail, &self.ability] {
            cancel(slot);
        }
    }
}

fn claim(slot: &Mutex<TokenSlot>, generation: u64) -> CancellationToken {
    slot.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .claim(generation)
}

fn cancel(slot: &Mutex<TokenSlot>) {
    slot.lock().unwrap_or_else(PoisonError::into_inner).cancel();
}

async fn fetch_page<C: CatalogClient + ?Sized + 'static>(
    client: &Arc<C>,
    request: &PageRequest,
    cancel: &CancellationToken,
) -> Result<CatalogPage, ApiError> {
    let (offset, limit) = (request.offset, request.limit);
    match &request.source {
        PageSource::Remote => {
            let listing = client.list_page(offset, limit, cancel).await?;
            let has_more = listing.next.is_some();
            let pokemon = resolve_details(client, listing.items, cancel).await?;
            Ok(CatalogPage {
                offset,
                pokemon,
                has_more,
                total: Some(listing.count),
                type_members: None,
            })
        }
        PageSource::Type(type_name) => {
            let members = client.list_by_type(type_name, cancel).await?;
            let window = page_slice(&members, offset, limit);
            let pokemon = resolve_details(client, window, cancel).await?;
            Ok(CatalogPage {
                offset,
                pokemon,
                has_more: offset + limit < members.len(),
                total: Some(members.len()),
                type_members: Some(members),
            })
        }
        PageSource::Cached { refs, total } => {
            let pokemon = resolve_details(client, refs.clone(), cancel).await?;
            Ok(CatalogPage {
                offset,
                pokemon,
                has_more: offset + limit < *total,
                total: Some(*total),
                type_members: None,
            })
        }
    }
}

/// Resolves every reference at once and returns the successes in list
/// order. Individual failures are dropped; a batch where nothing resolved is
/// an error so the caller keeps its previous state.
async fn resolve_details<C: CatalogClient + ?Sized + 'static>(
    client: &Arc<C>,
    refs: Vec<NamedRef>,
    cancel: &CancellationToken,
) -> Result<Vec<PokemonDetail>, ApiError> {
    if refs.is_empty() {
        return Ok(Vec::new());
    }

    let requested = refs.len();
    let mut join_set = JoinSet::new();
    for (index, reference) in refs.into_iter().enumerate() {
        let client = Arc::clone(client);
        let cancel = cancel.clone();
        join_set.spawn(async move {
            let result = client.detail_by_url(&reference.url, &cancel).await;
            (index, reference.name, result)
        });
    }

    let mut resolved = Vec::with_capacity(requested);
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, _, Ok(pokemon))) => resolved.push((index, pokemon)),
            // Dropping the set aborts the siblings still in flight.
            Ok((_, _, Err(ApiError::Cancelled))) => return Err(ApiError::Cancelled),
            Ok((_, name, Err(error))) => {
                tracing::warn!(pokemon = %name, %error, "dropping unresolved pokemon");
            }
            Err(error) => tracing::warn!(%error, "detail task failed"),
        }
    }

    if cancel.is_cancelled() {
        return Err(ApiError::Cancelled);
    }
    if resolved.is_empty() {
        return Err(ApiError::Remote {
            status: None,
            message: format!("none of {requested} pokemon could be resolved"),
        });
    }
    resolved.sort_by_key(|(index, _)| *index);
    Ok(resolved.into_iter().map(|(_, pokemon)| pokemon).collect())
}
