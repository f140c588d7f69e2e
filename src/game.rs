//! Match envelope and the turn protocol shared by every game.
//!
//! A [`Match`] wraps one engine state together with the participants, the
//! phase and whose turn it is. Engines plug in by implementing
//! [`GameRules`]; [`Match::apply`] enforces membership, phase and turn order
//! before handing the move to the engine, then applies the engine's
//! [`TurnChange`]. Matches are immutable snapshots: applying a move returns a
//! new match with its revision bumped by one.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::battleship::BattleshipState;
use crate::common::{GameError, MatchId, PlayerId};
use crate::dots::DotsState;
use crate::letter_link::LetterLinkState;

/// Number of participants in every match.
pub const PLAYERS_PER_MATCH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameType {
    Battleship,
    LetterLink,
    DotsAndBoxes,
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameType::Battleship => "Battleship",
            GameType::LetterLink => "Letter Link",
            GameType::DotsAndBoxes => "Dots and Boxes",
        })
    }
}

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Setup,
    Active,
    Ended,
}

/// Final result of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchResult {
    Winner(PlayerId),
    Draw,
}

/// How the turn moves after an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnChange {
    /// Mover keeps the turn.
    Keep,
    /// Turn passes to the next participant.
    Pass,
    /// Setup is finished; play starts with the first participant.
    Start,
    /// Match is over.
    Finish(MatchResult),
}

/// New engine state produced by an accepted move.
#[derive(Debug, Clone)]
pub struct Transition<S, O> {
    pub state: S,
    pub outcome: O,
    pub turn: TurnChange,
}

/// Match facts an engine may consult while applying a move.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    pub mover: &'a PlayerId,
    pub participants: &'a [PlayerId],
    pub phase: Phase,
    pub now_ms: u64,
}

impl<'a> MoveContext<'a> {
    /// The participant following the mover in turn order.
    pub fn opponent(&self) -> &'a PlayerId {
        next_in_order(self.participants, self.mover)
    }
}

fn next_in_order<'a>(participants: &'a [PlayerId], current: &'a PlayerId) -> &'a PlayerId {
    let idx = participants
        .iter()
        .position(|p| p == current)
        .unwrap_or(0);
    participants
        .get((idx + 1) % participants.len().max(1))
        .unwrap_or(current)
}

/// Two distinct participants, and an engine state dealt to exactly them.
fn check_seating<S: GameRules>(participants: &[PlayerId], state: &S) -> Result<(), GameError> {
    let distinct = match participants {
        [a, b] => a != b,
        _ => false,
    };
    if distinct && state.is_seated_for(participants) {
        Ok(())
    } else {
        Err(GameError::InvalidParticipants)
    }
}

/// Contract every game engine satisfies to run inside a [`Match`].
pub trait GameRules: Clone + Sized {
    type Move: fmt::Debug;
    type Outcome: fmt::Debug;

    const GAME_TYPE: GameType;
    const INITIAL_PHASE: Phase;

    /// Whether the move may only be made by the participant holding the
    /// turn during the active phase. Other moves are checked by the engine.
    fn is_turn_bound(_mv: &Self::Move) -> bool {
        true
    }

    /// Whether this state was set up for exactly `participants`. Engines
    /// that keep per-player data override this.
    fn is_seated_for(&self, _participants: &[PlayerId]) -> bool {
        true
    }

    /// Validate and apply a move, returning the next state. A rejected move
    /// must leave `self` untouched.
    fn apply<R: Rng + ?Sized>(
        &self,
        ctx: &MoveContext<'_>,
        mv: &Self::Move,
        rng: &mut R,
    ) -> Result<Transition<Self, Self::Outcome>, GameError>;

    fn into_document(m: Match<Self>) -> MatchDocument;

    fn from_document(doc: MatchDocument) -> Result<Match<Self>, GameError>;
}

/// One game instance between two participants.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Match<S> {
    match_id: MatchId,
    game_type: GameType,
    participants: Vec<PlayerId>,
    current_turn: Option<PlayerId>,
    phase: Phase,
    created_at: u64,
    revision: u64,
    result: Option<MatchResult>,
    state: S,
}

impl<S> Match<S> {
    pub fn match_id(&self) -> &MatchId {
        &self.match_id
    }

    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    pub fn participants(&self) -> &[PlayerId] {
        &self.participants
    }

    pub fn current_turn(&self) -> Option<&PlayerId> {
        self.current_turn.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Number of moves applied since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// The participant following `player` in turn order.
    pub fn next_player<'a>(&'a self, player: &'a PlayerId) -> &'a PlayerId {
        next_in_order(&self.participants, player)
    }
}

impl<S: GameRules> Match<S> {
    /// Start a match. Play begins with the first participant. `state` must
    /// have been set up for the same two participants.
    pub fn new(
        match_id: MatchId,
        participants: [PlayerId; PLAYERS_PER_MATCH],
        state: S,
        created_at: u64,
    ) -> Result<Self, GameError> {
        check_seating(&participants, &state)?;
        let participants: Vec<PlayerId> = participants.into_iter().collect();
        Ok(Match {
            match_id,
            game_type: S::GAME_TYPE,
            current_turn: Some(participants[0].clone()),
            participants,
            phase: S::INITIAL_PHASE,
            created_at,
            revision: 0,
            result: None,
            state,
        })
    }

    /// Apply `mv` on behalf of `mover`, returning the next snapshot and what
    /// the move did. Nothing changes when the move is rejected.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        mover: &PlayerId,
        mv: &S::Move,
        rng: &mut R,
        now_ms: u64,
    ) -> Result<(Self, S::Outcome), GameError> {
        if !self.participants.contains(mover) {
            return Err(GameError::NotParticipant);
        }
        if self.phase == Phase::Ended {
            return Err(GameError::MatchEnded);
        }
        if S::is_turn_bound(mv) {
            if self.phase != Phase::Active {
                return Err(GameError::WrongPhase);
            }
            if self.current_turn.as_ref() != Some(mover) {
                return Err(GameError::NotYourTurn);
            }
        }

        let ctx = MoveContext {
            mover,
            participants: &self.participants,
            phase: self.phase,
            now_ms,
        };
        let transition = self.state.apply(&ctx, mv, rng)?;
        log::debug!(
            "match {} rev {}: {} played {:?} -> {:?}",
            self.match_id,
            self.revision,
            mover,
            mv,
            transition.outcome
        );

        let mut next = Match {
            match_id: self.match_id.clone(),
            game_type: self.game_type,
            participants: self.participants.clone(),
            current_turn: self.current_turn.clone(),
            phase: self.phase,
            created_at: self.created_at,
            revision: self.revision + 1,
            result: None,
            state: transition.state,
        };
        match transition.turn {
            TurnChange::Keep => {}
            TurnChange::Pass => {
                next.current_turn = Some(self.next_player(mover).clone());
            }
            TurnChange::Start => {
                next.phase = Phase::Active;
                next.current_turn = Some(self.participants[0].clone());
            }
            TurnChange::Finish(result) => {
                log::info!("match {} ended: {:?}", self.match_id, result);
                next.phase = Phase::Ended;
                next.current_turn = None;
                next.result = Some(result);
            }
        }
        Ok((next, transition.outcome))
    }

    pub fn into_document(self) -> MatchDocument {
        S::into_document(self)
    }
}

/// A match of any game type, as kept by a document store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchDocument {
    Battleship(Match<BattleshipState>),
    LetterLink(Match<LetterLinkState>),
    DotsAndBoxes(Match<DotsState>),
}

macro_rules! with_match {
    ($doc:expr, $m:ident => $body:expr) => {
        match $doc {
            MatchDocument::Battleship($m) => $body,
            MatchDocument::LetterLink($m) => $body,
            MatchDocument::DotsAndBoxes($m) => $body,
        }
    };
}

impl MatchDocument {
    pub fn match_id(&self) -> &MatchId {
        with_match!(self, m => m.match_id())
    }

    pub fn game_type(&self) -> GameType {
        with_match!(self, m => m.game_type())
    }

    pub fn revision(&self) -> u64 {
        with_match!(self, m => m.revision())
    }

    pub fn phase(&self) -> Phase {
        with_match!(self, m => m.phase())
    }

    pub fn current_turn(&self) -> Option<&PlayerId> {
        with_match!(self, m => m.current_turn())
    }

    pub fn participants(&self) -> &[PlayerId] {
        with_match!(self, m => m.participants())
    }

    pub fn result(&self) -> Option<&MatchResult> {
        with_match!(self, m => m.result())
    }

    /// Downcast into a typed match. A document whose participants or turn
    /// holder do not fit its state is refused.
    pub fn into_match<S: GameRules>(self) -> Result<Match<S>, GameError> {
        let m = S::from_document(self)?;
        check_seating(&m.participants, &m.state)?;
        let stray_turn = m
            .current_turn
            .as_ref()
            .is_some_and(|p| !m.participants.contains(p));
        if stray_turn {
            return Err(GameError::InvalidParticipants);
        }
        Ok(m)
    }
}
