//! Messages the host app may send after a move. The engines only describe
//! them; delivery is up to the integration layer.

#![cfg(feature = "std")]

use crate::common::PlayerId;
use crate::game::{Match, MatchResult, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    MatchStarted,
    YourTurn,
    MatchOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient: PlayerId,
    pub title: String,
    pub body: String,
    pub category: Category,
}

/// Notifications implied by `mover` turning `before` into `after`.
pub fn for_transition<S>(mover: &PlayerId, before: &Match<S>, after: &Match<S>) -> Vec<Notification> {
    let game = after.game_type();

    if after.phase() == Phase::Ended && before.phase() != Phase::Ended {
        return after
            .participants()
            .iter()
            .map(|p| {
                let body = match after.result() {
                    Some(MatchResult::Winner(w)) if w == p => format!("You won {}!", game),
                    Some(MatchResult::Winner(w)) => format!("{} won {}.", w, game),
                    _ => format!("{} ended in a draw.", game),
                };
                Notification {
                    recipient: p.clone(),
                    title: "Game over".to_string(),
                    body,
                    category: Category::MatchOver,
                }
            })
            .collect();
    }

    if before.phase() == Phase::Setup && after.phase() == Phase::Active {
        let first = after.current_turn().cloned();
        return after
            .participants()
            .iter()
            .map(|p| Notification {
                recipient: p.clone(),
                title: format!("{} has started", game),
                body: match &first {
                    Some(f) if f == p => "You go first.".to_string(),
                    Some(f) => format!("{} goes first.", f),
                    None => String::new(),
                },
                category: Category::MatchStarted,
            })
            .collect();
    }

    match after.current_turn() {
        Some(next) if before.current_turn() != Some(next) && next != mover => vec![Notification {
            recipient: next.clone(),
            title: "Your turn".to_string(),
            body: format!("{} made a move in {}.", mover, game),
            category: Category::YourTurn,
        }],
        _ => Vec::new(),
    }
}
