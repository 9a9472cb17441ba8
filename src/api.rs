//! PokeAPI client
//!
//! Every call takes a [`CancellationToken`]. When the token fires first the
//! in-flight request future is dropped, which aborts the HTTP exchange, and
//! the call fails with [`ApiError::Cancelled`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::state::{AbilityDetail, AbilitySlot, ListPage, NamedRef, PokemonDetail, PokemonStat};

#[derive(thiserror::Error, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ApiError {
    #[error("request cancelled")]
    Cancelled,
    #[error("request failed (status {status:?}): {message}")]
    Remote {
        status: Option<u16>,
        message: String,
    },
}

impl ApiError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => *status,
            ApiError::Cancelled => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    fn from_reqwest(error: reqwest::Error) -> Self {
        ApiError::Remote {
            status: error.status().map(|status| status.as_u16()),
            message: error.to_string(),
        }
    }
}

/// Read operations against the catalog API.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn list_page(
        &self,
        offset: usize,
        limit: usize,
        cancel: &CancellationToken,
    ) -> Result<ListPage, ApiError>;

    /// Complete membership of a type; the API does not page these.
    async fn list_by_type(
        &self,
        type_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<NamedRef>, ApiError>;

    async fn detail_by_url(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<PokemonDetail, ApiError>;

    async fn detail_by_name(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<PokemonDetail, ApiError>;

    async fn ability_by_url(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<AbilityDetail, ApiError>;
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

impl From<NamedResource> for NamedRef {
    fn from(resource: NamedResource) -> Self {
        NamedRef {
            name: resource.name,
            url: resource.url,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
    next: Option<String>,
    count: usize,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeDetailResponse {
    pokemon: Vec<TypePokemonEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypePokemonEntry {
    pokemon: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    #[serde(default)]
    height: u16,
    #[serde(default)]
    weight: u16,
    #[serde(default)]
    types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    stats: Vec<PokemonStatSlot>,
    #[serde(default)]
    abilities: Vec<PokemonAbilitySlot>,
    #[serde(default)]
    moves: Vec<PokemonMoveSlot>,
    #[serde(default)]
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
    #[serde(default)]
    is_hidden: bool,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonMoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct AbilityDetailResponse {
    name: String,
    #[serde(default)]
    effect_entries: Vec<EffectEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct EffectEntry {
    effect: String,
    language: NamedResource,
}

impl From<PokemonResponse> for PokemonDetail {
    fn from(response: PokemonResponse) -> Self {
        let sprite_front_default = pointer_string(&response.sprites, "/front_default");
        PokemonDetail {
            id: response.id,
            name: response.name,
            types: response
                .types
                .into_iter()
                .map(|slot| slot.type_info.name)
                .collect(),
            stats: response
                .stats
                .into_iter()
                .map(|slot| PokemonStat {
                    name: slot.stat.name,
                    value: slot.base_stat,
                })
                .collect(),
            abilities: response
                .abilities
                .into_iter()
                .map(|slot| AbilitySlot {
                    name: slot.ability.name,
                    url: slot.ability.url,
                    is_hidden: slot.is_hidden,
                })
                .collect(),
            moves: response
                .moves
                .into_iter()
                .map(|slot| slot.move_info.name)
                .collect(),
            height: response.height,
            weight: response.weight,
            sprite_front_default,
        }
    }
}

impl From<AbilityDetailResponse> for AbilityDetail {
    fn from(response: AbilityDetailResponse) -> Self {
        let effect = response
            .effect_entries
            .iter()
            .find(|entry| entry.language.name == "en")
            .map(|entry| sanitize_text(&entry.effect));
        AbilityDetail {
            name: response.name,
            effect,
        }
    }
}

/// reqwest-backed [`CatalogClient`] for PokeAPI.
#[derive(Clone, Debug)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn list_url(&self, offset: usize, limit: usize) -> String {
        format!("{}/pokemon?offset={offset}&limit={limit}", self.base_url)
    }

    pub fn type_url(&self, type_name: &str) -> String {
        format!(
            "{}/type/{}",
            self.base_url,
            urlencoding::encode(&type_name.trim().to_lowercase())
        )
    }

    pub fn name_url(&self, name: &str) -> String {
        format!(
            "{}/pokemon/{}",
            self.base_url,
            urlencoding::encode(&name.trim().to_lowercase())
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
            result = self.fetch_json(url) => result,
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Remote {
                status: Some(status.as_u16()),
                message: format!("GET {url} returned {status}"),
            });
        }
        response.json::<T>().await.map_err(ApiError::from_reqwest)
    }
}

#[async_trait]
impl CatalogClient for PokeApiClient {
    async fn list_page(
        &self,
        offset: usize,
        limit: usize,
        cancel: &CancellationToken,
    ) -> Result<ListPage, ApiError> {
        let response: ListResponse = self.get_json(&self.list_url(offset, limit), cancel).await?;
        Ok(list_page_from(response))
    }

    async fn list_by_type(
        &self,
        type_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<NamedRef>, ApiError> {
        let response: TypeDetailResponse = self.get_json(&self.type_url(type_name), cancel).await?;
        Ok(type_members_from(response))
    }

    async fn detail_by_url(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<PokemonDetail, ApiError> {
        let response: PokemonResponse = self.get_json(url, cancel).await?;
        Ok(response.into())
    }

    async fn detail_by_name(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<PokemonDetail, ApiError> {
        let response: PokemonResponse = self.get_json(&self.name_url(name), cancel).await?;
        Ok(response.into())
    }

    async fn ability_by_url(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<AbilityDetail, ApiError> {
        let response: AbilityDetailResponse = self.get_json(url, cancel).await?;
        Ok(response.into())
    }
}

fn list_page_from(response: ListResponse) -> ListPage {
    ListPage {
        items: response.results.into_iter().map(NamedRef::from).collect(),
        next: response.next,
        count: response.count,
    }
}

fn type_members_from(response: TypeDetailResponse) -> Vec<NamedRef> {
    response
        .pokemon
        .into_iter()
        .map(|entry| entry.pokemon.into())
        .collect()
}

fn sanitize_text(text: &str) -> String {
    text.replace('\n', " ").replace('\u{000C}', " ")
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn urls_are_built_from_base() {
        let client = PokeApiClient::new("https://pokeapi.co/api/v2/");
        assert_eq!(
            client.list_url(20, 10),
            "https://pokeapi.co/api/v2/pokemon?offset=20&limit=10"
        );
        assert_eq!(client.type_url("Fire"), "https://pokeapi.co/api/v2/type/fire");
        assert_eq!(
            client.name_url(" Pikachu "),
            "https://pokeapi.co/api/v2/pokemon/pikachu"
        );
    }

    #[test]
    fn name_url_encodes_path_segment() {
        let client = PokeApiClient::new("http://localhost");
        assert_eq!(client.name_url("mr mime"), "http://localhost/pokemon/mr%20mime");
    }

    #[test]
    fn list_response_keeps_next_cursor() {
        let body = r#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=10&limit=10",
            "previous": null,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
            ]
        }"#;
        let response: ListResponse = serde_json::from_str(body).unwrap();
        let page = list_page_from(response);

        assert_eq!(page.count, 1302);
        assert!(page.next.is_some());
        assert_eq!(
            page.items[1],
            NamedRef {
                name: "ivysaur".into(),
                url: "https://pokeapi.co/api/v2/pokemon/2/".into(),
            }
        );
    }

    #[test]
    fn last_list_page_has_no_cursor() {
        let body = r#"{"count": 2, "next": null, "results": []}"#;
        let response: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(list_page_from(response).next, None);
    }

    #[test]
    fn type_response_unwraps_pokemon_entries() {
        let body = r#"{
            "name": "fire",
            "pokemon": [
                {"slot": 1, "pokemon": {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/"}},
                {"slot": 1, "pokemon": {"name": "vulpix", "url": "https://pokeapi.co/api/v2/pokemon/37/"}}
            ]
        }"#;
        let response: TypeDetailResponse = serde_json::from_str(body).unwrap();
        let members = type_members_from(response);

        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["charmander", "vulpix"]);
    }

    #[test]
    fn pokemon_response_maps_nested_slots() {
        let body = r#"{
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "types": [{"slot": 1, "type": {"name": "electric", "url": "u"}}],
            "stats": [{"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "u"}}],
            "abilities": [
                {"ability": {"name": "static", "url": "https://pokeapi.co/api/v2/ability/9/"}, "is_hidden": false, "slot": 1},
                {"ability": {"name": "lightning-rod", "url": "https://pokeapi.co/api/v2/ability/31/"}, "is_hidden": true, "slot": 3}
            ],
            "moves": [{"move": {"name": "thunder-shock", "url": "u"}}],
            "sprites": {"front_default": "https://img/25.png"}
        }"#;
        let response: PokemonResponse = serde_json::from_str(body).unwrap();
        let detail = PokemonDetail::from(response);

        assert_eq!(detail.id, 25);
        assert_eq!(detail.types, vec!["electric".to_string()]);
        assert_eq!(detail.stats[0].value, 35);
        assert!(detail.abilities[1].is_hidden);
        assert_eq!(detail.moves, vec!["thunder-shock".to_string()]);
        assert_eq!(detail.sprite_front_default.as_deref(), Some("https://img/25.png"));
    }

    #[test]
    fn pokemon_without_id_fails_to_decode() {
        let body = r#"{"name": "missingno"}"#;
        assert!(serde_json::from_str::<PokemonResponse>(body).is_err());
    }

    #[test]
    fn ability_response_picks_english_effect() {
        let body = r#"{
            "name": "static",
            "effect_entries": [
                {"effect": "Kann bei Berührung paralysieren.", "language": {"name": "de", "url": "u"}},
                {"effect": "Has a 30% chance\nof paralyzing.", "language": {"name": "en", "url": "u"}}
            ]
        }"#;
        let response: AbilityDetailResponse = serde_json::from_str(body).unwrap();
        let ability = AbilityDetail::from(response);
        assert_eq!(ability.effect.as_deref(), Some("Has a 30% chance of paralyzing."));
    }

    #[test]
    fn not_found_is_read_from_status() {
        let error = ApiError::Remote {
            status: Some(404),
            message: "missing".into(),
        };
        assert!(error.is_not_found());
        assert!(!ApiError::Cancelled.is_not_found());
        assert!(ApiError::Cancelled.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits_request() {
        // Port 9 (discard) on localhost; the cancelled branch wins before any I/O.
        let client = PokeApiClient::new("http://127.0.0.1:9");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = client.detail_by_name("pikachu", &cancel).await;
        assert_eq!(result, Err(ApiError::Cancelled));
    }
}
