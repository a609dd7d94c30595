use crate::agents::{AgentKind, AgentTable, PolicyProfile, RandomPolicy};
use crate::config::{GameConfig, WinnerPick, SLOT_COUNT};
use crate::game::{ActionError, Game, Phase};
use crate::side::Seat;
use std::time::{Duration, Instant};

/// The keyboard seat.
pub const HUMAN: Seat = Seat::One;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// Row of cards the cursor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Hand,
    MySlots,
    OpponentSlots,
}

impl Zone {
    fn next(self) -> Zone {
        match self {
            Zone::Hand => Zone::MySlots,
            Zone::MySlots => Zone::OpponentSlots,
            Zone::OpponentSlots => Zone::Hand,
        }
    }
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewGame,
    FocusNext,
    CursorLeft,
    CursorRight,
    Activate,
    Swap,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub started: Instant,
    pub game: Game,
    pub agents: AgentTable,
    // Cursor position (zone + index within it)
    pub zone: Zone,
    pub cursor: usize,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_bot_delay_ms: u64,
    pub bot_delay_ms: u64,
    pub cfg_winner_pick: WinnerPick,
    pub cfg_swap_cap: Option<u32>,
    pub swap_cap: Option<u32>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        let default_delay = 500;
        let swap_cap = PolicyProfile::default().swap_cap;
        let mut app = Self {
            scene: Scene::Menu,
            started: Instant::now(),
            game: Game::new(GameConfig::default()),
            agents: AgentTable::new(),
            zone: Zone::Hand,
            cursor: 0,
            menu_index: 0,
            cfg_bot_delay_ms: default_delay,
            bot_delay_ms: default_delay,
            cfg_winner_pick: WinnerPick::default(),
            cfg_swap_cap: swap_cap,
            swap_cap,
            help_open: false,
            history_open: false,
            history_offset: 0,
            action_error: None,
            action_error_at: None,
        };
        app.seat_opponent();
        app
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    /// Rebuild the agent table with a fresh opponent for Player 2.
    pub(crate) fn seat_opponent(&mut self) {
        let profile = PolicyProfile::default().with_swap_cap(self.swap_cap);
        self.agents.clear();
        self.agents.set_min_action_delay_ms(self.bot_delay_ms);
        self.agents.set_agent(HUMAN.other(), Some(Box::new(RandomPolicy::new(profile))));
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    fn set_action_error(&mut self, err: &ActionError) {
        self.action_error = Some(err.to_string());
        self.action_error_at = Some(Instant::now());
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    pub fn bot_label(&self, seat: Seat) -> Option<&'static str> {
        match self.agents.agent_kind(seat) {
            Some(AgentKind::Bot) if self.agents.is_thinking() => Some("BOT…"),
            Some(AgentKind::Bot) => Some("BOT"),
            _ => None,
        }
    }

    fn zone_len(&self, zone: Zone) -> usize {
        match zone {
            Zone::Hand => self.game.side(HUMAN).hand().len(),
            Zone::MySlots | Zone::OpponentSlots => SLOT_COUNT,
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.zone_len(self.zone);
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn focus_next(&mut self) {
        self.zone = self.zone.next();
        self.clamp_cursor();
    }

    pub fn cursor_left(&mut self) {
        let len = self.zone_len(self.zone);
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    pub fn cursor_right(&mut self) {
        let len = self.zone_len(self.zone);
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    fn submit(&mut self, result: Result<(), ActionError>) -> bool {
        match result {
            Ok(()) => {
                self.clear_action_error();
                self.clamp_cursor();
                true
            }
            Err(err) => {
                self.set_action_error(&err);
                false
            }
        }
    }

    /// Perform the natural action for the card under the cursor.
    fn activate(&mut self) -> bool {
        if self.scene != Scene::Table {
            return false;
        }
        let slot = self.cursor % SLOT_COUNT;
        let mine = self.game.side(HUMAN).slots()[slot];
        let theirs = self.game.side(HUMAN.other()).slots()[slot];
        // wrong-phase attempts go to the engine so the rejection is shown
        let result = match (self.zone, self.game.phase()) {
            (Zone::Hand, _) => self.game.play_card(HUMAN, self.cursor),
            (Zone::MySlots, Phase::BattleResolved { .. }) => match mine {
                Some(card) => self.game.select_winning_card(HUMAN, card),
                None => return false,
            },
            (Zone::MySlots, Phase::DrawTiebreak { .. }) => match mine {
                Some(card) => self.game.select_tiebreak_card(HUMAN, card),
                None => return false,
            },
            (Zone::MySlots, _) => self.game.reveal(HUMAN, self.cursor),
            (Zone::OpponentSlots, _) => match theirs {
                Some(card) => self.game.select_winning_card(HUMAN, card),
                None => return false,
            },
        };
        self.submit(result)
    }

    fn swap(&mut self) -> bool {
        if self.scene != Scene::Table || self.zone != Zone::MySlots {
            return false;
        }
        let result = self.game.swap(HUMAN, self.cursor);
        let ok = self.submit(result);
        if ok {
            // the card is back in hand; point at it for the refill
            self.zone = Zone::Hand;
            self.cursor = self.zone_len(Zone::Hand).saturating_sub(1);
        }
        ok
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.game.history_len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::NewGame => {
                if self.scene == Scene::Table {
                    self.new_game();
                }
                false
            }
            InputAction::FocusNext => {
                if self.scene == Scene::Table {
                    self.focus_next();
                }
                false
            }
            InputAction::CursorLeft => {
                if self.scene == Scene::Table {
                    self.cursor_left();
                }
                false
            }
            InputAction::CursorRight => {
                if self.scene == Scene::Table {
                    self.cursor_right();
                }
                false
            }
            InputAction::Activate => self.activate(),
            InputAction::Swap => self.swap(),
        }
    }

    pub fn new_game(&mut self) {
        self.game.reset_game();
        self.zone = Zone::Hand;
        self.cursor = 0;
        self.history_offset = 0;
        self.clear_action_error();
    }

    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table {
            return;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        match self.agents.on_turn(&mut self.game) {
            Ok(true) => self.clamp_cursor(),
            Ok(false) => {}
            Err(err) => self.set_action_error(&err),
        }
    }
}
