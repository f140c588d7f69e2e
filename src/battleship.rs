//! Battleship boards, placement and attack resolution.
//!
//! Every operation returns a new board and leaves its input untouched, so a
//! caller can keep the previous snapshot for undo or for a conditional write.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use rand::Rng;

use crate::common::{GameError, PlayerId};
use crate::config::{BOARD_SIZE, FLEET};
use crate::game::{
    GameRules, GameType, Match, MatchDocument, MatchResult, MoveContext, Phase, Transition,
    TurnChange,
};
use crate::grid::{Grid, GridError};
use crate::ship::{Orientation, ShipKind};

/// Contents of an occupied cell on a player's own board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Ship { kind: ShipKind, hit: bool },
    Miss,
}

/// A resolved shot in the attack log. Untried cells are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Shot {
    Miss,
    Hit,
}

/// Result of an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackResult {
    /// Coordinate outside the board.
    Invalid,
    /// Cell was resolved by an earlier attack.
    AlreadyAttacked,
    Miss,
    /// Ship segment hit, ship still afloat.
    Hit,
    /// Last segment of the named ship hit.
    Sunk(ShipKind),
}

impl AttackResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, AttackResult::Hit | AttackResult::Sunk(_))
    }
}

/// One player's board: their ships and their shots at the opponent.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleshipBoard {
    cells: Grid<Cell>,
    attack_log: Grid<Shot>,
}

impl Default for BattleshipBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleshipBoard {
    /// Create an empty board state (no ships placed, no shots fired).
    pub fn new() -> Self {
        BattleshipBoard {
            cells: Grid::new(BOARD_SIZE),
            attack_log: Grid::new(BOARD_SIZE),
        }
    }

    /// Own ships and the opponent's marks on them.
    pub fn cells(&self) -> &Grid<Cell> {
        &self.cells
    }

    /// This player's shots at the opponent.
    pub fn attack_log(&self) -> &Grid<Shot> {
        &self.attack_log
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<Option<Cell>, GridError> {
        Ok(self.cells.get(row, col)?.copied())
    }

    pub fn shot_at(&self, row: usize, col: usize) -> Result<Option<Shot>, GridError> {
        Ok(self.attack_log.get(row, col)?.copied())
    }

    /// Returns `true` when every cell the ship would cover is on the board
    /// and empty.
    pub fn is_valid_placement(
        &self,
        kind: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> bool {
        orientation
            .cells(row, col, kind.size())
            .all(|(r, c)| matches!(self.cells.is_empty_at(r, c), Ok(true)))
    }

    /// Mark the ship's cells. Placement is not re-validated here; call
    /// [`is_valid_placement`](Self::is_valid_placement) first. Cells that fall
    /// off the board are skipped.
    pub fn place_ship(
        &self,
        kind: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Self {
        let mut next = self.clone();
        for (r, c) in orientation.cells(row, col, kind.size()) {
            let _ = next.cells.set(r, c, Cell::Ship { kind, hit: false });
        }
        next
    }

    /// Clear every cell of `kind`.
    pub fn remove_ship(&self, kind: ShipKind) -> Self {
        let mut next = self.clone();
        let coords: Vec<(usize, usize)> = self.cells_of(kind).collect();
        for (r, c) in coords {
            let _ = next.cells.take(r, c);
        }
        next
    }

    /// Returns `true` if at least one cell carries `kind`.
    pub fn has_ship(&self, kind: ShipKind) -> bool {
        self.cells_of(kind).next().is_some()
    }

    fn cells_of(&self, kind: ShipKind) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter_occupied().filter_map(move |(pos, cell)| match cell {
            Cell::Ship { kind: k, .. } if *k == kind => Some(pos),
            _ => None,
        })
    }

    fn is_kind_sunk(&self, kind: ShipKind) -> bool {
        self.cells.iter_occupied().all(|(_, cell)| match cell {
            Cell::Ship { kind: k, hit } if *k == kind => *hit,
            _ => true,
        })
    }

    /// Resolve an attack at (row, col) against this board.
    pub fn attack(&self, row: usize, col: usize) -> (Self, AttackResult) {
        let cell = match self.cells.get(row, col) {
            Ok(cell) => cell.copied(),
            Err(_) => return (self.clone(), AttackResult::Invalid),
        };
        let mut next = self.clone();
        let result = match cell {
            None => {
                let _ = next.cells.set(row, col, Cell::Miss);
                AttackResult::Miss
            }
            Some(Cell::Miss) | Some(Cell::Ship { hit: true, .. }) => AttackResult::AlreadyAttacked,
            Some(Cell::Ship { kind, hit: false }) => {
                let _ = next.cells.set(row, col, Cell::Ship { kind, hit: true });
                if next.is_kind_sunk(kind) {
                    AttackResult::Sunk(kind)
                } else {
                    AttackResult::Hit
                }
            }
        };
        (next, result)
    }

    /// Record the outcome of this player's shot at the opponent.
    pub fn record_shot(&self, row: usize, col: usize, result: AttackResult) -> Self {
        let mut next = self.clone();
        let shot = match result {
            AttackResult::Miss => Shot::Miss,
            AttackResult::Hit | AttackResult::Sunk(_) => Shot::Hit,
            AttackResult::Invalid | AttackResult::AlreadyAttacked => return next,
        };
        let _ = next.attack_log.set(row, col, shot);
        next
    }

    /// Returns `true` when every fleet kind is on the board and fully hit.
    pub fn all_ships_sunk(&self) -> bool {
        FLEET
            .iter()
            .all(|&kind| self.has_ship(kind) && self.is_kind_sunk(kind))
    }

    /// Ship kinds on the board with at least one un-hit cell.
    pub fn afloat_kinds(&self) -> Vec<ShipKind> {
        FLEET
            .iter()
            .copied()
            .filter(|&kind| self.has_ship(kind) && !self.is_kind_sunk(kind))
            .collect()
    }

    pub fn remaining_ship_count(&self) -> usize {
        self.afloat_kinds().len()
    }

    /// Returns `true` when each fleet kind covers exactly its size in cells.
    pub fn all_ships_placed(&self) -> bool {
        FLEET
            .iter()
            .all(|&kind| self.cells_of(kind).count() == kind.size())
    }

    /// Returns a random non‐overlapping (row, col, Orientation) for `kind`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        kind: ShipKind,
    ) -> Result<(usize, usize, Orientation), GameError> {
        let len = kind.size();
        for _ in 0..100 {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Vertical => (BOARD_SIZE - len, BOARD_SIZE - 1),
                Orientation::Horizontal => (BOARD_SIZE - 1, BOARD_SIZE - len),
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            if self.is_valid_placement(kind, r, c, orient) {
                return Ok((r, c, orient));
            }
        }
        Err(GameError::InvalidPlacement { kind, row: 0, col: 0 })
    }

    /// Place every fleet kind not yet on the board at a random position.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self, GameError> {
        let mut board = self.clone();
        for &kind in FLEET.iter() {
            if board.has_ship(kind) {
                continue;
            }
            let (r, c, o) = board.random_placement(rng, kind)?;
            board = board.place_ship(kind, r, c, o);
        }
        Ok(board)
    }
}

/// Moves accepted by a Battleship match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleshipMove {
    PlaceShip {
        kind: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    },
    RemoveShip {
        kind: ShipKind,
    },
    /// Randomly place every ship not yet on the board.
    AutoPlace,
    ConfirmFleet,
    Attack {
        row: usize,
        col: usize,
    },
}

/// What an accepted Battleship move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleshipOutcome {
    Placed(ShipKind),
    Removed(ShipKind),
    AutoPlaced,
    /// Fleet locked in; `battle_started` once both players confirmed.
    Confirmed { battle_started: bool },
    Attack(AttackResult),
}

/// Both players' boards plus who has locked in their fleet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleshipState {
    boards: BTreeMap<PlayerId, BattleshipBoard>,
    confirmed: BTreeSet<PlayerId>,
}

impl BattleshipState {
    pub fn new(participants: &[PlayerId]) -> Self {
        BattleshipState {
            boards: participants
                .iter()
                .map(|p| (p.clone(), BattleshipBoard::new()))
                .collect(),
            confirmed: BTreeSet::new(),
        }
    }

    pub fn board(&self, player: &PlayerId) -> Option<&BattleshipBoard> {
        self.boards.get(player)
    }

    pub fn is_confirmed(&self, player: &PlayerId) -> bool {
        self.confirmed.contains(player)
    }

    fn board_of(&self, player: &PlayerId) -> Result<&BattleshipBoard, GameError> {
        self.boards.get(player).ok_or(GameError::NotParticipant)
    }

    fn setup_move(
        &self,
        ctx: &MoveContext<'_>,
        edit: impl FnOnce(&BattleshipBoard) -> Result<(BattleshipBoard, BattleshipOutcome), GameError>,
    ) -> Result<Transition<Self, BattleshipOutcome>, GameError> {
        if ctx.phase != Phase::Setup {
            return Err(GameError::WrongPhase);
        }
        if self.is_confirmed(ctx.mover) {
            return Err(GameError::FleetLocked);
        }
        let (board, outcome) = edit(self.board_of(ctx.mover)?)?;
        let mut next = self.clone();
        next.boards.insert(ctx.mover.clone(), board);
        Ok(Transition {
            state: next,
            outcome,
            turn: TurnChange::Keep,
        })
    }
}

impl GameRules for BattleshipState {
    type Move = BattleshipMove;
    type Outcome = BattleshipOutcome;
    const GAME_TYPE: GameType = GameType::Battleship;
    const INITIAL_PHASE: Phase = Phase::Setup;

    fn is_turn_bound(mv: &BattleshipMove) -> bool {
        matches!(mv, BattleshipMove::Attack { .. })
    }

    fn apply<R: Rng + ?Sized>(
        &self,
        ctx: &MoveContext<'_>,
        mv: &BattleshipMove,
        rng: &mut R,
    ) -> Result<Transition<Self, BattleshipOutcome>, GameError> {
        match *mv {
            BattleshipMove::PlaceShip {
                kind,
                row,
                col,
                orientation,
            } => self.setup_move(ctx, |board| {
                if board.has_ship(kind) {
                    return Err(GameError::ShipAlreadyPlaced(kind));
                }
                if !board.is_valid_placement(kind, row, col, orientation) {
                    return Err(GameError::InvalidPlacement { kind, row, col });
                }
                Ok((
                    board.place_ship(kind, row, col, orientation),
                    BattleshipOutcome::Placed(kind),
                ))
            }),
            BattleshipMove::RemoveShip { kind } => self.setup_move(ctx, |board| {
                if !board.has_ship(kind) {
                    return Err(GameError::ShipNotPlaced(kind));
                }
                Ok((board.remove_ship(kind), BattleshipOutcome::Removed(kind)))
            }),
            BattleshipMove::AutoPlace => self.setup_move(ctx, |board| {
                Ok((board.place_fleet_randomly(rng)?, BattleshipOutcome::AutoPlaced))
            }),
            BattleshipMove::ConfirmFleet => {
                let mut transition = self.setup_move(ctx, |board| {
                    if !board.all_ships_placed() {
                        return Err(GameError::FleetIncomplete);
                    }
                    Ok((board.clone(), BattleshipOutcome::Confirmed { battle_started: false }))
                })?;
                transition.state.confirmed.insert(ctx.mover.clone());
                if transition.state.confirmed.len() == ctx.participants.len() {
                    log::debug!("both fleets confirmed, battle begins");
                    transition.outcome = BattleshipOutcome::Confirmed { battle_started: true };
                    transition.turn = TurnChange::Start;
                }
                Ok(transition)
            }
            BattleshipMove::Attack { row, col } => {
                let defender = ctx.opponent();
                let (target, result) = self.board_of(defender)?.attack(row, col);
                match result {
                    AttackResult::Invalid => {
                        return Err(GameError::Grid(GridError::OutOfBounds {
                            row,
                            col,
                            size: BOARD_SIZE,
                        }))
                    }
                    AttackResult::AlreadyAttacked => {
                        return Err(GameError::AlreadyAttacked { row, col })
                    }
                    _ => {}
                }
                let shooter = self.board_of(ctx.mover)?.record_shot(row, col, result);
                let turn = if target.all_ships_sunk() {
                    TurnChange::Finish(MatchResult::Winner(ctx.mover.clone()))
                } else {
                    TurnChange::Pass
                };
                let mut next = self.clone();
                next.boards.insert(defender.clone(), target);
                next.boards.insert(ctx.mover.clone(), shooter);
                Ok(Transition {
                    state: next,
                    outcome: BattleshipOutcome::Attack(result),
                    turn,
                })
            }
        }
    }

    fn is_seated_for(&self, participants: &[PlayerId]) -> bool {
        self.boards.len() == participants.len()
            && participants.iter().all(|p| self.boards.contains_key(p))
    }

    fn into_document(m: Match<Self>) -> MatchDocument {
        MatchDocument::Battleship(m)
    }

    fn from_document(doc: MatchDocument) -> Result<Match<Self>, GameError> {
        match doc {
            MatchDocument::Battleship(m) => Ok(m),
            _ => Err(GameError::WrongGameType),
        }
    }
}
