//! Letter Link: a two-player tile word game on an 11×11 board.
//!
//! A play is two steps. [`LetterLinkState::prepare_move`] checks the
//! placement and reports the words it forms and the points it earns without
//! touching state; the caller then validates those words against a
//! dictionary and submits [`LetterLinkMove::Play`]. The words carried by the
//! move must still match what the board produces when it is applied,
//! otherwise the move is rejected and must be prepared again.

pub mod bonus;
pub mod tiles;
pub mod words;

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;
use rand::seq::SliceRandom;
use rand::Rng;

pub use bonus::{bonus_at, bonus_at_cell, BonusKind};
pub use tiles::{Tile, TileBag};
pub use words::{placement_axis, score_move, words_formed, BoardTile, PlacedTile};

use crate::common::{GameError, PlayerId};
use crate::config::{HAND_SIZE, LETTER_LINK_SIZE, MAX_CONSECUTIVE_PASSES};
use crate::game::{
    GameRules, GameType, Match, MatchDocument, MatchResult, MoveContext, Phase, Transition,
    TurnChange,
};
use crate::grid::Grid;

/// One tile taken from the mover's hand and put on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePlacement {
    /// Position in the hand before the move.
    pub hand_index: usize,
    pub row: usize,
    pub col: usize,
    /// Letter chosen for a blank tile.
    pub blank_letter: Option<char>,
}

impl TilePlacement {
    pub fn new(hand_index: usize, row: usize, col: usize) -> Self {
        TilePlacement {
            hand_index,
            row,
            col,
            blank_letter: None,
        }
    }

    pub fn blank(hand_index: usize, row: usize, col: usize, letter: char) -> Self {
        TilePlacement {
            hand_index,
            row,
            col,
            blank_letter: Some(letter),
        }
    }
}

/// Record of an accepted play.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryEntry {
    pub player: PlayerId,
    pub words: Vec<String>,
    pub points: u32,
    pub timestamp: u64,
}

/// A checked placement waiting for dictionary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub player: PlayerId,
    pub placements: Vec<TilePlacement>,
    pub tiles: Vec<PlacedTile>,
    pub words: Vec<String>,
    pub points: u32,
}

impl PendingMove {
    /// The move to submit once every word has been accepted.
    pub fn into_play(self) -> LetterLinkMove {
        LetterLinkMove::Play {
            placements: self.placements,
            words: self.words,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum LetterLinkMove {
    /// Place tiles forming `words`, which the caller has validated.
    Play {
        placements: Vec<TilePlacement>,
        words: Vec<String>,
    },
    /// Swap the whole hand for fresh tiles and give up the turn.
    Pass,
    /// Reorder the mover's hand; does not use the turn.
    ShuffleHand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LetterLinkOutcome {
    Played { words: Vec<String>, points: u32 },
    Passed,
    Shuffled,
}

/// Shared board, bag, hands and scores.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct LetterLinkState {
    board: Grid<BoardTile>,
    bag: TileBag,
    hands: BTreeMap<PlayerId, Vec<Tile>>,
    scores: BTreeMap<PlayerId, u32>,
    history: Vec<HistoryEntry>,
    consecutive_passes: u32,
}

impl LetterLinkState {
    /// Shuffle a standard bag and deal a hand to each participant.
    pub fn new<R: Rng + ?Sized>(participants: &[PlayerId], rng: &mut R) -> Self {
        let mut bag = TileBag::standard();
        bag.shuffle(rng);
        Self::deal(participants, bag)
    }

    /// Deal hands from `bag` as given, without shuffling.
    pub fn deal(participants: &[PlayerId], mut bag: TileBag) -> Self {
        let hands = participants
            .iter()
            .map(|p| (p.clone(), bag.draw(HAND_SIZE)))
            .collect();
        LetterLinkState {
            board: Grid::new(LETTER_LINK_SIZE),
            bag,
            hands,
            scores: participants.iter().map(|p| (p.clone(), 0)).collect(),
            history: Vec::new(),
            consecutive_passes: 0,
        }
    }

    pub fn board(&self) -> &Grid<BoardTile> {
        &self.board
    }

    pub fn bag(&self) -> &TileBag {
        &self.bag
    }

    pub fn hand(&self, player: &PlayerId) -> Option<&[Tile]> {
        self.hands.get(player).map(Vec::as_slice)
    }

    pub fn score(&self, player: &PlayerId) -> u32 {
        self.scores.get(player).copied().unwrap_or(0)
    }

    pub fn scores(&self) -> &BTreeMap<PlayerId, u32> {
        &self.scores
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Tiles on the board, in the bag and in every hand.
    pub fn tile_count(&self) -> usize {
        self.board.count_occupied() + self.bag.len() + self.hands.values().map(Vec::len).sum::<usize>()
    }

    fn hand_of(&self, player: &PlayerId) -> Result<&Vec<Tile>, GameError> {
        self.hands.get(player).ok_or(GameError::NotParticipant)
    }

    /// Check a placement and compute its words and points. State is not
    /// changed.
    pub fn prepare_move(
        &self,
        player: &PlayerId,
        placements: &[TilePlacement],
    ) -> Result<PendingMove, GameError> {
        if placements.is_empty() {
            return Err(GameError::NoTilesPlaced);
        }
        let hand = self.hand_of(player)?;
        let mut used = BTreeSet::new();
        let mut cells = BTreeSet::new();
        let mut tiles = Vec::with_capacity(placements.len());
        for p in placements {
            let tile = *hand
                .get(p.hand_index)
                .ok_or(GameError::InvalidHandIndex(p.hand_index))?;
            if !used.insert(p.hand_index) {
                return Err(GameError::DuplicateHandIndex(p.hand_index));
            }
            if !self.board.is_empty_at(p.row, p.col)? {
                return Err(GameError::CellOccupied { row: p.row, col: p.col });
            }
            if !cells.insert((p.row, p.col)) {
                return Err(GameError::DuplicateCell { row: p.row, col: p.col });
            }
            let (letter, blank) = match (tile, p.blank_letter) {
                (Tile::Letter(c), None) => (c, false),
                (Tile::Blank, Some(c)) if c.is_ascii_alphabetic() => (c.to_ascii_uppercase(), true),
                _ => return Err(GameError::InvalidBlankLetter),
            };
            tiles.push(PlacedTile {
                row: p.row,
                col: p.col,
                letter,
                blank,
            });
        }

        let words = words_formed(&tiles, &self.board)?;
        if words.is_empty() {
            return Err(GameError::NoWordFormed);
        }
        let points = score_move(&tiles, &self.board);
        Ok(PendingMove {
            player: player.clone(),
            placements: placements.to_vec(),
            tiles,
            words,
            points,
        })
    }

    /// Write a prepared move: tiles to the board, hand refilled from the bag,
    /// score and history updated.
    fn commit(&self, pending: &PendingMove, now_ms: u64) -> Self {
        let mut next = self.clone();
        for t in &pending.tiles {
            let _ = next.board.set(
                t.row,
                t.col,
                BoardTile {
                    letter: t.letter,
                    blank: t.blank,
                    placed_by: pending.player.clone(),
                },
            );
        }
        if let Some(hand) = next.hands.get_mut(&pending.player) {
            let mut indices: Vec<usize> = pending.placements.iter().map(|p| p.hand_index).collect();
            indices.sort_unstable_by(|a, b| b.cmp(a));
            for idx in indices {
                hand.remove(idx);
            }
            let missing = HAND_SIZE.saturating_sub(hand.len());
            hand.extend(next.bag.draw(missing));
        }
        *next.scores.entry(pending.player.clone()).or_insert(0) += pending.points;
        next.history.push(HistoryEntry {
            player: pending.player.clone(),
            words: pending.words.clone(),
            points: pending.points,
            timestamp: now_ms,
        });
        next.consecutive_passes = 0;
        next
    }

    /// Return the player's hand to the bag, reshuffle, and draw the same
    /// number of tiles.
    pub fn pass_turn<R: Rng + ?Sized>(&self, player: &PlayerId, rng: &mut R) -> Result<Self, GameError> {
        let count = self.hand_of(player)?.len();
        let mut next = self.clone();
        if let Some(hand) = next.hands.get_mut(player) {
            next.bag.put_back(hand.drain(..));
            next.bag.shuffle(rng);
            hand.extend(next.bag.draw(count));
        }
        next.consecutive_passes += 1;
        Ok(next)
    }

    /// Reorder the player's own hand.
    pub fn shuffle_hand<R: Rng + ?Sized>(&self, player: &PlayerId, rng: &mut R) -> Result<Self, GameError> {
        self.hand_of(player)?;
        let mut next = self.clone();
        if let Some(hand) = next.hands.get_mut(player) {
            hand.shuffle(rng);
        }
        Ok(next)
    }

    /// Highest score wins; equal top scores draw.
    pub fn standings(&self) -> MatchResult {
        let best = self.scores.values().copied().max().unwrap_or(0);
        let mut leaders = self.scores.iter().filter(|(_, s)| **s == best);
        match (leaders.next(), leaders.next()) {
            (Some((player, _)), None) => MatchResult::Winner(player.clone()),
            _ => MatchResult::Draw,
        }
    }
}

fn normalized(words: &[String]) -> Vec<String> {
    let set: BTreeSet<String> = words.iter().map(|w| w.to_ascii_uppercase()).collect();
    set.into_iter().collect()
}

impl GameRules for LetterLinkState {
    type Move = LetterLinkMove;
    type Outcome = LetterLinkOutcome;
    const GAME_TYPE: GameType = GameType::LetterLink;
    const INITIAL_PHASE: Phase = Phase::Active;

    fn is_turn_bound(mv: &LetterLinkMove) -> bool {
        !matches!(mv, LetterLinkMove::ShuffleHand)
    }

    fn apply<R: Rng + ?Sized>(
        &self,
        ctx: &MoveContext<'_>,
        mv: &LetterLinkMove,
        rng: &mut R,
    ) -> Result<Transition<Self, LetterLinkOutcome>, GameError> {
        match mv {
            LetterLinkMove::ShuffleHand => Ok(Transition {
                state: self.shuffle_hand(ctx.mover, rng)?,
                outcome: LetterLinkOutcome::Shuffled,
                turn: TurnChange::Keep,
            }),
            LetterLinkMove::Pass => {
                let next = self.pass_turn(ctx.mover, rng)?;
                let turn = if next.consecutive_passes >= MAX_CONSECUTIVE_PASSES {
                    TurnChange::Finish(next.standings())
                } else {
                    TurnChange::Pass
                };
                Ok(Transition {
                    state: next,
                    outcome: LetterLinkOutcome::Passed,
                    turn,
                })
            }
            LetterLinkMove::Play { placements, words } => {
                let pending = self.prepare_move(ctx.mover, placements)?;
                if pending.words != normalized(words) {
                    return Err(GameError::UnvalidatedWords);
                }
                let next = self.commit(&pending, ctx.now_ms);
                let hand_empty = next.hand(ctx.mover).map_or(true, <[Tile]>::is_empty);
                let turn = if next.bag.is_empty() && hand_empty {
                    TurnChange::Finish(next.standings())
                } else {
                    TurnChange::Pass
                };
                Ok(Transition {
                    state: next,
                    outcome: LetterLinkOutcome::Played {
                        words: pending.words,
                        points: pending.points,
                    },
                    turn,
                })
            }
        }
    }

    fn is_seated_for(&self, participants: &[PlayerId]) -> bool {
        self.hands.len() == participants.len()
            && participants
                .iter()
                .all(|p| self.hands.contains_key(p) && self.scores.contains_key(p))
    }

    fn into_document(m: Match<Self>) -> MatchDocument {
        MatchDocument::LetterLink(m)
    }

    fn from_document(doc: MatchDocument) -> Result<Match<Self>, GameError> {
        match doc {
            MatchDocument::LetterLink(m) => Ok(m),
            _ => Err(GameError::WrongGameType),
        }
    }
}
