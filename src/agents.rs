//! Agents: pluggable opponents and the scheduler that drives them.
//!
//! An [`OpponentPolicy`] only decides. [`AgentTable`] is the external
//! scheduler: it asks the policy for a move, waits out the configured delay,
//! and submits the move through the same [`GameEngine`] surface a human uses.
//! The engine re-validates every move regardless of where it came from.

use crate::cards::Card;
use crate::config::WinnerPick;
use crate::engine::GameEngine;
use crate::game::{ActionError, Phase};
use crate::side::Seat;
use crate::snapshot::Snapshot;
use core::fmt;
use std::time::{Duration, Instant};

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// One engine action on behalf of a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Move {
    Place { hand_index: usize },
    Reveal { slot: usize },
    Swap { slot: usize },
    TakeCard(Card),
    TiebreakCard(Card),
}

/// Every move the engine would currently accept from `seat`.
pub fn legal_moves(view: &Snapshot, seat: Seat) -> Vec<Move> {
    let side = view.side(seat);
    match view.phase {
        Phase::Placing | Phase::RevealSwap if side.slots.iter().any(Option::is_none) => {
            (0..side.hand.len()).map(|hand_index| Move::Place { hand_index }).collect()
        }
        Phase::RevealSwap => {
            if !view.all_slots_filled() || view.reveal_turn() != Some(seat) {
                return Vec::new();
            }
            let face_down = side.face_down_slots();
            let mut moves: Vec<Move> =
                face_down.iter().map(|&slot| Move::Reveal { slot }).collect();
            if view.last_revealer.is_some() {
                moves.extend(face_down.iter().map(|&slot| Move::Swap { slot }));
            }
            moves
        }
        Phase::BattleResolved { winner } if winner == seat => {
            let mut cards = side.selectable_cards();
            if view.winner_pick == WinnerPick::AnySlot {
                cards.extend(view.side(seat.other()).selectable_cards());
            }
            cards.into_iter().map(Move::TakeCard).collect()
        }
        Phase::DrawTiebreak { picks } if picks[seat.index()].is_none() => {
            side.selectable_cards().into_iter().map(Move::TiebreakCard).collect()
        }
        _ => Vec::new(),
    }
}

/// Submit `mv` for `seat` as an ordinary engine action.
pub fn apply_move(engine: &mut dyn GameEngine, seat: Seat, mv: Move) -> Result<(), ActionError> {
    match mv {
        Move::Place { hand_index } => engine.play_card(seat, hand_index),
        Move::Reveal { slot } => engine.reveal(seat, slot),
        Move::Swap { slot } => engine.swap(seat, slot),
        Move::TakeCard(card) => engine.select_winning_card(seat, card),
        Move::TiebreakCard(card) => engine.select_tiebreak_card(seat, card),
    }
}

/// Decision policy for a seat. Given the current snapshot and the legal
/// moves for `seat`, pick one, or `None` to pass for now.
pub trait OpponentPolicy {
    fn choose(&mut self, view: &Snapshot, seat: Seat, legal: &[Move]) -> Option<Move>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
}

mod random;

pub use random::{PolicyProfile, RandomPolicy};

/// Holds an optional policy per seat and drives whichever seat has a move,
/// pacing bot moves by a minimum delay.
pub struct AgentTable {
    seats: [Option<Box<dyn OpponentPolicy>>; 2],
    min_action_delay: Duration,
    next_action_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String =
            self.seats.iter().map(|a| if a.is_some() { 'B' } else { '-' }).collect();
        write!(f, "AgentTable({flags})")
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTable {
    /// Create a table with both seats empty.
    pub fn new() -> Self {
        Self { seats: [None, None], min_action_delay: Duration::ZERO, next_action_at: None }
    }

    /// Assign a policy to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: Seat, agent: Option<Box<dyn OpponentPolicy>>) {
        self.seats[seat.index()] = agent;
    }

    /// Return the kind of agent at a seat, if any.
    pub fn agent_kind(&self, seat: Seat) -> Option<AgentKind> {
        self.seats[seat.index()].as_deref().map(|ag| ag.kind())
    }

    /// Whether a seat currently has an agent assigned.
    pub fn has_agent(&self, seat: Seat) -> bool {
        self.seats[seat.index()].is_some()
    }

    /// Whether any agents are currently assigned.
    pub fn any_agents(&self) -> bool {
        self.seats.iter().any(Option::is_some)
    }

    /// Delay between a bot noticing it has a move and submitting it.
    pub fn set_min_action_delay_ms(&mut self, delay_ms: u64) {
        self.min_action_delay = Duration::from_millis(delay_ms);
    }

    /// Whether a bot move is scheduled and waiting out its delay.
    pub fn is_thinking(&self) -> bool {
        self.next_action_at.is_some()
    }

    /// Drive the first seat whose agent has a legal move. Returns `Ok(true)`
    /// when a move was submitted and accepted.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> Result<bool, ActionError> {
        let view = engine.snapshot();
        let actor = Seat::ALL.into_iter().find_map(|seat| {
            if !self.has_agent(seat) {
                return None;
            }
            let legal = legal_moves(&view, seat);
            (!legal.is_empty()).then_some((seat, legal))
        });
        let Some((seat, legal)) = actor else {
            self.next_action_at = None;
            return Ok(false);
        };

        let now = Instant::now();
        match self.next_action_at {
            None if !self.min_action_delay.is_zero() => {
                self.next_action_at = Some(now + self.min_action_delay);
                return Ok(false);
            }
            Some(at) if now < at => return Ok(false),
            _ => {}
        }
        self.next_action_at = None;

        let Some(agent) = self.seats[seat.index()].as_mut() else {
            return Ok(false);
        };
        let Some(mv) = agent.choose(&view, seat, &legal) else {
            return Ok(false);
        };
        apply_move(engine, seat, mv)?;
        Ok(true)
    }

    /// Remove all agents.
    pub fn clear(&mut self) {
        self.seats = [None, None];
        self.next_action_at = None;
    }
}
