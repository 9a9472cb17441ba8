//! Effects - side effects declared by the reducer

use crate::state::NamedRef;

/// Where the references of a catalog page come from.
#[derive(Clone, Debug, PartialEq)]
pub enum PageSource {
    /// Unfiltered `/pokemon` listing.
    Remote,
    /// Fresh membership fetch for a type, then the first window of it.
    Type(String),
    /// A window already sliced from the cached type membership.
    Cached { refs: Vec<NamedRef>, total: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
    pub source: PageSource,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch and resolve one catalog page under the given generation.
    LoadCatalog { generation: u64, request: PageRequest },
    /// Commit the raw search input once it has been quiet long enough.
    DebounceSearch { term: String, revision: u64 },
    /// Exact-name lookup, superseding any earlier one.
    LookupPokemon { name: String, lookup: u64 },
    /// Abort the outstanding lookup without issuing a new one.
    CancelLookup,
    LoadDetail { name: String, generation: u64 },
    /// Abort the detail and ability requests of a closed detail view.
    CancelDetail,
    LoadAbility { name: String, url: String, generation: u64 },
}
