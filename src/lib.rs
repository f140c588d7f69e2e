#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod ai;
mod battleship;
mod common;
mod config;
mod dots;
mod game;
mod grid;
pub mod letter_link;
mod ship;
#[cfg(feature = "std")]
pub mod dictionary;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod notification;
pub mod prelude;
#[cfg(feature = "std")]
pub mod service;
#[cfg(feature = "std")]
pub mod store;

pub use battleship::*;
pub use common::*;
pub use config::*;
pub use dots::*;
pub use game::*;
pub use grid::*;
pub use letter_link::{
    bonus_at, bonus_at_cell, score_move, words_formed, BoardTile, BonusKind, HistoryEntry,
    LetterLinkMove, LetterLinkOutcome, LetterLinkState, PendingMove, PlacedTile, Tile, TileBag,
    TilePlacement,
};
pub use ship::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use service::{Applied, MatchService, ServiceError};
#[cfg(feature = "std")]
pub use store::{in_memory::InMemoryStore, MatchStore, StoreError};
