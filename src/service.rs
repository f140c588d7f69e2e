#![cfg(feature = "std")]

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::common::{GameError, MatchId, PlayerId};
use crate::dictionary::{Dictionary, WordValidator};
use crate::game::{GameRules, Match, PLAYERS_PER_MATCH};
use crate::letter_link::{LetterLinkState, TilePlacement};
use crate::notification::{self, Notification};
use crate::store::{MatchStore, StoreError};

/// Why a service call did not change the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Move rejected by the rules.
    Game(GameError),
    Store(StoreError),
    /// Strict validation could not reach the dictionary.
    DictionaryUnavailable(String),
    /// Validation outlived its timeout; the move was abandoned.
    ValidationTimedOut,
}

impl ServiceError {
    /// Whether re-fetching and resubmitting may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ServiceError::Store(StoreError::StaleRevision { .. })
                | ServiceError::DictionaryUnavailable(_)
                | ServiceError::ValidationTimedOut
        )
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Game(e) => write!(f, "{}", e),
            ServiceError::Store(e) => write!(f, "{}", e),
            ServiceError::DictionaryUnavailable(w) => {
                write!(f, "Dictionary unavailable while checking '{}'", w)
            }
            ServiceError::ValidationTimedOut => write!(f, "Word check timed out, please resubmit"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<GameError> for ServiceError {
    fn from(err: GameError) -> Self {
        ServiceError::Game(err)
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err)
    }
}

/// Result of an accepted move.
#[derive(Debug)]
pub struct Applied<S: GameRules> {
    pub game: Match<S>,
    pub outcome: S::Outcome,
    pub notifications: Vec<Notification>,
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Runs moves against stored matches with optimistic concurrency: each
/// write succeeds only if no other move was stored since the match was read.
pub struct MatchService<St: MatchStore> {
    store: St,
}

impl<St: MatchStore> MatchService<St> {
    pub fn new(store: St) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub async fn create<S: GameRules>(
        &self,
        match_id: MatchId,
        participants: [PlayerId; PLAYERS_PER_MATCH],
        state: S,
    ) -> Result<Match<S>, ServiceError> {
        let game = Match::new(match_id, participants, state, now_ms())?;
        self.store.create(&game.clone().into_document()).await?;
        log::info!("created {} match {}", game.game_type(), game.match_id());
        Ok(game)
    }

    pub async fn load<S: GameRules>(&self, match_id: &MatchId) -> Result<Match<S>, ServiceError> {
        Ok(self.store.load(match_id).await?.into_match::<S>()?)
    }

    /// Load the latest match, apply `mv` and store the result.
    pub async fn submit<S: GameRules, R: Rng + ?Sized>(
        &self,
        match_id: &MatchId,
        mover: &PlayerId,
        mv: &S::Move,
        rng: &mut R,
    ) -> Result<Applied<S>, ServiceError> {
        let current = self.load::<S>(match_id).await?;
        self.commit(&current, mover, mv, rng).await
    }

    /// Apply `mv` to `current` and store the result, provided the stored
    /// match is still at `current`'s revision.
    pub async fn commit<S: GameRules, R: Rng + ?Sized>(
        &self,
        current: &Match<S>,
        mover: &PlayerId,
        mv: &S::Move,
        rng: &mut R,
    ) -> Result<Applied<S>, ServiceError> {
        let (game, outcome) = current.apply(mover, mv, rng, now_ms())?;
        self.store
            .update_if(current.revision(), &game.clone().into_document())
            .await?;
        let notifications = notification::for_transition(mover, current, &game);
        Ok(Applied {
            game,
            outcome,
            notifications,
        })
    }

    /// Play Letter-Link tiles: check the placement, wait for the dictionary,
    /// then commit against the revision the words were computed from.
    pub async fn play_word<D: Dictionary, R: Rng + ?Sized>(
        &self,
        match_id: &MatchId,
        mover: &PlayerId,
        placements: &[TilePlacement],
        validator: &WordValidator<D>,
        rng: &mut R,
    ) -> Result<Applied<LetterLinkState>, ServiceError> {
        let current = self.load::<LetterLinkState>(match_id).await?;
        if current.is_over() {
            return Err(GameError::MatchEnded.into());
        }
        if current.current_turn() != Some(mover) {
            return Err(GameError::NotYourTurn.into());
        }
        let pending = current.state().prepare_move(mover, placements)?;
        validator.validate_all(&pending.words).await?;
        self.commit(&current, mover, &pending.into_play(), rng).await
    }
}
