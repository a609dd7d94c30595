//! dragon-dance: round engine for a two-player reveal-and-swap card game
//!
//! Goals:
//! - One state machine owns the deck, both sides and the phase
//! - Every action is validated; a rejection never changes the game
//! - Seedable shuffles so games can be replayed exactly
//!
//! ## Quick start: play a round
//! ```
//! use dragon_dance::config::GameConfig;
//! use dragon_dance::game::{Game, Phase};
//! use dragon_dance::side::Seat;
//!
//! let mut game = Game::new(GameConfig::default().with_seed(42));
//! for _ in 0..3 {
//!     game.play_card(Seat::One, 0).unwrap();
//!     game.play_card(Seat::Two, 0).unwrap();
//! }
//! assert_eq!(game.phase(), Phase::RevealSwap);
//!
//! // Player 1 reveals first; then the turn alternates.
//! let err = game.reveal(Seat::Two, 0).unwrap_err();
//! assert_eq!(err.code(), "first_reveal_by_player_one");
//! for slot in 0..3 {
//!     game.reveal(Seat::One, slot).unwrap();
//!     game.reveal(Seat::Two, slot).unwrap();
//! }
//! assert!(game.snapshot().is_battle_resolved());
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin dragon-dance
//! ```
//! Set `DRAGON_DANCE_LOG=/path/to/file` to capture debug logs.

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod game;
pub mod scoring;
pub mod side;
pub mod snapshot;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
