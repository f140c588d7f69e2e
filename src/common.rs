//! Common types for the games: identifiers and move errors.

use alloc::string::String;
use core::fmt;

use crate::grid::GridError;
use crate::ship::ShipKind;

/// Opaque participant identifier supplied by the host application.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        PlayerId(id.into())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque match identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct MatchId(String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        MatchId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        MatchId(id.into())
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Broad classification of a rejected move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input, or a target that is already taken.
    InvalidInput,
    /// Well-formed input that the game rules forbid right now.
    RuleViolation,
}

/// Errors returned when a move is rejected. A rejected move never changes
/// state and never consumes the mover's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameError {
    /// Underlying grid error (coordinate outside the board).
    Grid(GridError),
    /// Orientation or line kind string could not be parsed.
    MalformedOrientation(String),
    /// Ship kind string could not be parsed.
    UnknownShipKind(String),
    /// Ship would leave the board or overlap another ship.
    InvalidPlacement { kind: ShipKind, row: usize, col: usize },
    /// This ship kind is already on the board.
    ShipAlreadyPlaced(ShipKind),
    /// This ship kind is not on the board.
    ShipNotPlaced(ShipKind),
    /// The fleet was already confirmed and can no longer change.
    FleetLocked,
    /// Confirmation attempted before every ship was placed exactly once.
    FleetIncomplete,
    /// Target cell was already resolved by an earlier attack.
    AlreadyAttacked { row: usize, col: usize },
    /// Line was already claimed.
    LineAlreadyClaimed,
    /// Dots grid must have at least two dots per side.
    GridTooSmall(usize),
    /// Dots grid is larger than `MAX_DOTS_GRID_SIZE`.
    GridTooLarge(usize),
    /// A placement must use at least one tile.
    NoTilesPlaced,
    /// Hand index does not address a tile in the mover's hand.
    InvalidHandIndex(usize),
    /// The same hand tile was used twice.
    DuplicateHandIndex(usize),
    /// Two tiles target the same cell.
    DuplicateCell { row: usize, col: usize },
    /// Target cell already holds a tile.
    CellOccupied { row: usize, col: usize },
    /// Tiles neither share a row nor a column.
    TilesNotInLine,
    /// An empty cell splits the placed tiles along their line.
    TilesNotContiguous,
    /// Blank tile needs a letter A-Z; lettered tiles must not carry one.
    InvalidBlankLetter,
    /// The tiles do not form any word of two or more letters.
    NoWordFormed,
    /// A formed word was rejected by the dictionary.
    WordRejected(String),
    /// The words formed now differ from the ones that were validated.
    UnvalidatedWords,
    /// Player is not a participant of this match.
    NotParticipant,
    /// Another participant holds the turn.
    NotYourTurn,
    /// Move is not allowed in the current phase.
    WrongPhase,
    /// The match is over.
    MatchEnded,
    /// Match needs exactly two distinct participants.
    InvalidParticipants,
    /// Stored document holds a different game.
    WrongGameType,
}

impl GameError {
    /// Classify the error for user-facing messaging.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::Grid(_)
            | GameError::MalformedOrientation(_)
            | GameError::UnknownShipKind(_)
            | GameError::InvalidPlacement { .. }
            | GameError::AlreadyAttacked { .. }
            | GameError::LineAlreadyClaimed
            | GameError::GridTooSmall(_)
            | GameError::GridTooLarge(_)
            | GameError::NoTilesPlaced
            | GameError::InvalidHandIndex(_)
            | GameError::DuplicateHandIndex(_)
            | GameError::DuplicateCell { .. }
            | GameError::CellOccupied { .. }
            | GameError::InvalidBlankLetter
            | GameError::InvalidParticipants
            | GameError::WrongGameType => ErrorKind::InvalidInput,
            GameError::ShipAlreadyPlaced(_)
            | GameError::ShipNotPlaced(_)
            | GameError::FleetLocked
            | GameError::FleetIncomplete
            | GameError::TilesNotInLine
            | GameError::TilesNotContiguous
            | GameError::NoWordFormed
            | GameError::WordRejected(_)
            | GameError::UnvalidatedWords
            | GameError::NotParticipant
            | GameError::NotYourTurn
            | GameError::WrongPhase
            | GameError::MatchEnded => ErrorKind::RuleViolation,
        }
    }
}

impl From<GridError> for GameError {
    fn from(err: GridError) -> Self {
        GameError::Grid(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Grid(e) => write!(f, "Grid error: {}", e),
            GameError::MalformedOrientation(s) => write!(f, "Unknown orientation '{}'", s),
            GameError::UnknownShipKind(s) => write!(f, "Unknown ship kind '{}'", s),
            GameError::InvalidPlacement { kind, row, col } => {
                write!(f, "{} cannot be placed at ({}, {})", kind.name(), row, col)
            }
            GameError::ShipAlreadyPlaced(kind) => write!(f, "{} is already placed", kind.name()),
            GameError::ShipNotPlaced(kind) => write!(f, "{} is not on the board", kind.name()),
            GameError::FleetLocked => write!(f, "Fleet is already confirmed"),
            GameError::FleetIncomplete => write!(f, "Every ship must be placed before confirming"),
            GameError::AlreadyAttacked { row, col } => {
                write!(f, "({}, {}) was already attacked", row, col)
            }
            GameError::LineAlreadyClaimed => write!(f, "Line is already claimed"),
            GameError::GridTooSmall(n) => write!(f, "Grid of {} dots per side is too small", n),
            GameError::GridTooLarge(n) => write!(f, "Grid of {} dots per side is too large", n),
            GameError::NoTilesPlaced => write!(f, "No tiles placed"),
            GameError::InvalidHandIndex(i) => write!(f, "No tile at hand index {}", i),
            GameError::DuplicateHandIndex(i) => write!(f, "Hand tile {} used twice", i),
            GameError::DuplicateCell { row, col } => {
                write!(f, "Two tiles placed on ({}, {})", row, col)
            }
            GameError::CellOccupied { row, col } => write!(f, "({}, {}) is occupied", row, col),
            GameError::TilesNotInLine => write!(f, "Tiles must share a row or a column"),
            GameError::TilesNotContiguous => write!(f, "Tiles must form one unbroken line"),
            GameError::InvalidBlankLetter => write!(f, "Blank tiles need a letter A-Z"),
            GameError::NoWordFormed => write!(f, "Tiles do not form a word"),
            GameError::WordRejected(w) => write!(f, "'{}' is not a word", w),
            GameError::UnvalidatedWords => write!(f, "Board changed since the words were checked"),
            GameError::NotParticipant => write!(f, "Player is not in this match"),
            GameError::NotYourTurn => write!(f, "It is not your turn"),
            GameError::WrongPhase => write!(f, "Move not allowed in this phase"),
            GameError::MatchEnded => write!(f, "Match has ended"),
            GameError::InvalidParticipants => write!(f, "A match needs two distinct players"),
            GameError::WrongGameType => write!(f, "Match holds a different game"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
