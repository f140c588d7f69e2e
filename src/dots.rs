//! Dots and Boxes: claim lines between adjacent dots, close boxes to score.

use alloc::collections::BTreeMap;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::str::FromStr;
use rand::Rng;

use crate::common::{GameError, PlayerId};
use crate::config::MAX_DOTS_GRID_SIZE;
use crate::game::{
    GameRules, GameType, Match, MatchDocument, MatchResult, MoveContext, Phase, Transition,
    TurnChange,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum LineKind {
    /// Joins dot (r, c) to dot (r, c + 1).
    Horizontal,
    /// Joins dot (r, c) to dot (r + 1, c).
    Vertical,
}

impl FromStr for LineKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(LineKind::Horizontal),
            "vertical" | "v" => Ok(LineKind::Vertical),
            _ => Err(GameError::MalformedOrientation(s.to_string())),
        }
    }
}

/// A line identified by its kind and anchor dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct LineKey {
    pub kind: LineKind,
    pub row: usize,
    pub col: usize,
}

impl LineKey {
    pub const fn horizontal(row: usize, col: usize) -> Self {
        LineKey {
            kind: LineKind::Horizontal,
            row,
            col,
        }
    }

    pub const fn vertical(row: usize, col: usize) -> Self {
        LineKey {
            kind: LineKind::Vertical,
            row,
            col,
        }
    }
}

/// A box identified by its top-left dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxKey {
    pub row: usize,
    pub col: usize,
}

impl BoxKey {
    /// Top, bottom, left and right edges.
    pub fn edges(self) -> [LineKey; 4] {
        [
            LineKey::horizontal(self.row, self.col),
            LineKey::horizontal(self.row + 1, self.col),
            LineKey::vertical(self.row, self.col),
            LineKey::vertical(self.row, self.col + 1),
        ]
    }
}

/// A claim request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DotsMove {
    pub row: usize,
    pub col: usize,
    pub kind: LineKind,
}

/// Result of claiming a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub line: LineKey,
    /// Boxes closed by this line, now owned by the claimer.
    pub completed: Vec<BoxKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DotsState {
    grid_size: usize,
    lines: BTreeMap<LineKey, PlayerId>,
    boxes: BTreeMap<BoxKey, PlayerId>,
}

impl DotsState {
    /// Empty board with `grid_size` dots per side.
    pub fn new(grid_size: usize) -> Result<Self, GameError> {
        if grid_size < 2 {
            return Err(GameError::GridTooSmall(grid_size));
        }
        if grid_size > MAX_DOTS_GRID_SIZE {
            return Err(GameError::GridTooLarge(grid_size));
        }
        Ok(DotsState {
            grid_size,
            lines: BTreeMap::new(),
            boxes: BTreeMap::new(),
        })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn lines(&self) -> &BTreeMap<LineKey, PlayerId> {
        &self.lines
    }

    pub fn boxes(&self) -> &BTreeMap<BoxKey, PlayerId> {
        &self.boxes
    }

    pub fn total_boxes(&self) -> usize {
        let per_side = self.grid_size.saturating_sub(1);
        per_side * per_side
    }

    pub fn is_complete(&self) -> bool {
        self.boxes.len() == self.total_boxes()
    }

    /// Returns `true` when `line` joins two dots of this grid.
    pub fn is_valid_line(&self, line: LineKey) -> bool {
        let n = self.grid_size;
        let last = n.saturating_sub(1);
        match line.kind {
            LineKind::Horizontal => line.row < n && line.col < last,
            LineKind::Vertical => line.row < last && line.col < n,
        }
    }

    pub fn is_claimed(&self, line: LineKey) -> bool {
        self.lines.contains_key(&line)
    }

    /// Every line on the grid not yet claimed.
    pub fn open_lines(&self) -> Vec<LineKey> {
        let n = self.grid_size;
        let last = n.saturating_sub(1);
        let horizontal = (0..n).flat_map(move |r| (0..last).map(move |c| LineKey::horizontal(r, c)));
        let vertical = (0..last).flat_map(move |r| (0..n).map(move |c| LineKey::vertical(r, c)));
        horizontal
            .chain(vertical)
            .filter(|l| !self.is_claimed(*l))
            .collect()
    }

    /// The one or two boxes bordered by `line`.
    pub fn adjacent_boxes(&self, line: LineKey) -> Vec<BoxKey> {
        let last = self.grid_size.saturating_sub(1);
        let mut adjacent = Vec::with_capacity(2);
        match line.kind {
            LineKind::Horizontal => {
                if line.row > 0 {
                    adjacent.push(BoxKey { row: line.row - 1, col: line.col });
                }
                if line.row < last {
                    adjacent.push(BoxKey { row: line.row, col: line.col });
                }
            }
            LineKind::Vertical => {
                if line.col > 0 {
                    adjacent.push(BoxKey { row: line.row, col: line.col - 1 });
                }
                if line.col < last {
                    adjacent.push(BoxKey { row: line.row, col: line.col });
                }
            }
        }
        adjacent
    }

    /// Number of claimed edges around `cell`.
    pub fn claimed_edges(&self, cell: BoxKey) -> usize {
        cell.edges().iter().filter(|l| self.is_claimed(**l)).count()
    }

    /// Claim a line for `player`. Any box it closes goes to `player`,
    /// whoever drew the box's other edges.
    pub fn claim_line(
        &self,
        row: usize,
        col: usize,
        kind: LineKind,
        player: &PlayerId,
    ) -> Result<(Self, ClaimOutcome), GameError> {
        let line = LineKey { kind, row, col };
        if !self.is_valid_line(line) {
            return Err(GameError::Grid(crate::grid::GridError::OutOfBounds {
                row,
                col,
                size: self.grid_size,
            }));
        }
        if self.is_claimed(line) {
            return Err(GameError::LineAlreadyClaimed);
        }
        let mut next = self.clone();
        next.lines.insert(line, player.clone());
        let mut completed = Vec::new();
        for cell in self.adjacent_boxes(line) {
            if next.claimed_edges(cell) == 4 && !next.boxes.contains_key(&cell) {
                next.boxes.insert(cell, player.clone());
                completed.push(cell);
            }
        }
        Ok((next, ClaimOutcome { line, completed }))
    }

    pub fn score(&self, player: &PlayerId) -> usize {
        self.boxes.values().filter(|owner| *owner == player).count()
    }

    /// Box counts for every player that owns at least one box.
    pub fn scores(&self) -> BTreeMap<PlayerId, usize> {
        let mut scores = BTreeMap::new();
        for owner in self.boxes.values() {
            *scores.entry(owner.clone()).or_insert(0) += 1;
        }
        scores
    }

    /// Strictly more boxes wins; otherwise a draw.
    pub fn winner(&self, participants: &[PlayerId]) -> MatchResult {
        let counts: Vec<(usize, &PlayerId)> = participants.iter().map(|p| (self.score(p), p)).collect();
        let best = counts.iter().map(|(n, _)| *n).max().unwrap_or(0);
        let mut leaders = counts.iter().filter(|(n, _)| *n == best);
        match (leaders.next(), leaders.next()) {
            (Some((_, player)), None) => MatchResult::Winner((*player).clone()),
            _ => MatchResult::Draw,
        }
    }
}

impl GameRules for DotsState {
    type Move = DotsMove;
    type Outcome = ClaimOutcome;
    const GAME_TYPE: GameType = GameType::DotsAndBoxes;
    const INITIAL_PHASE: Phase = Phase::Active;

    fn apply<R: Rng + ?Sized>(
        &self,
        ctx: &MoveContext<'_>,
        mv: &DotsMove,
        _rng: &mut R,
    ) -> Result<Transition<Self, ClaimOutcome>, GameError> {
        let (next, outcome) = self.claim_line(mv.row, mv.col, mv.kind, ctx.mover)?;
        let turn = if next.is_complete() {
            TurnChange::Finish(next.winner(ctx.participants))
        } else if outcome.completed.is_empty() {
            TurnChange::Pass
        } else {
            TurnChange::Keep
        };
        Ok(Transition {
            state: next,
            outcome,
            turn,
        })
    }

    fn into_document(m: Match<Self>) -> MatchDocument {
        MatchDocument::DotsAndBoxes(m)
    }

    fn from_document(doc: MatchDocument) -> Result<Match<Self>, GameError> {
        match doc {
            MatchDocument::DotsAndBoxes(m) => Ok(m),
            _ => Err(GameError::WrongGameType),
        }
    }
}
