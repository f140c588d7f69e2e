//! Commonly used types and utilities for ease of import.

pub use crate::{
    AttackResult, BattleshipBoard, BattleshipMove, BattleshipState, DotsMove, DotsState,
    GameError, GameRules, LetterLinkMove, LetterLinkState, LineKind, Match, MatchId,
    MatchResult, Orientation, Phase, PlayerId, ShipKind, TilePlacement,
};

#[cfg(feature = "std")]
pub use crate::{
    dictionary::{Dictionary, ValidationMode, ValidatorConfig, WordListDictionary, WordValidator},
    service::{MatchService, ServiceError},
    store::{in_memory::InMemoryStore, MatchStore, StoreError},
};
