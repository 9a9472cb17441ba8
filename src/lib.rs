//! Pokedex TUI - paginated PokeAPI catalog browser
//!
//! The library holds the store pieces (state, actions, reducer), the PokeAPI
//! client and the task runner so they can be driven from integration tests.

pub mod action;
pub mod api;
pub mod config;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod search;
pub mod state;
pub mod tasks;
pub mod ui;
