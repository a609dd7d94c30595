use crate::config::{GameConfig, WinnerPick};
use crate::game::Game;

use super::{AppState, Scene, Zone};

/// Highest finite swap cap offered before "unlimited".
const MAX_SWAP_CAP: u32 = 5;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    BotDelayMs,
    WinnerPick,
    SwapCap,
}

const MENU_ITEMS: [MenuItem; 3] = [MenuItem::BotDelayMs, MenuItem::WinnerPick, MenuItem::SwapCap];

fn swap_cap_label(cap: Option<u32>) -> String {
    match cap {
        Some(n) => n.to_string(),
        None => "unlimited".to_string(),
    }
}

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::BotDelayMs => format!("Bot Delay (ms): {}", app.cfg_bot_delay_ms),
            MenuItem::WinnerPick => format!("Winner Picks From: {}", app.cfg_winner_pick.label()),
            MenuItem::SwapCap => {
                format!("Bot Swaps Per Round: {}", swap_cap_label(app.cfg_swap_cap))
            }
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_add(100);
            }
            MenuItem::WinnerPick => app.cfg_winner_pick = toggle_pick(app.cfg_winner_pick),
            MenuItem::SwapCap => {
                app.cfg_swap_cap = match app.cfg_swap_cap {
                    Some(n) if n < MAX_SWAP_CAP => Some(n + 1),
                    Some(_) => None,
                    None => Some(0),
                };
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(100);
            }
            MenuItem::WinnerPick => app.cfg_winner_pick = toggle_pick(app.cfg_winner_pick),
            MenuItem::SwapCap => {
                app.cfg_swap_cap = match app.cfg_swap_cap {
                    Some(0) => None,
                    Some(n) => Some(n - 1),
                    None => Some(MAX_SWAP_CAP),
                };
            }
        }
    }
}

fn toggle_pick(pick: WinnerPick) -> WinnerPick {
    match pick {
        WinnerPick::AnySlot => WinnerPick::OwnSlots,
        WinnerPick::OwnSlots => WinnerPick::AnySlot,
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            Scene::Menu => Scene::Table,
            _ => {
                self.open_menu();
                Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        self.cfg_bot_delay_ms = self.bot_delay_ms;
        self.cfg_winner_pick = self.game.config().winner_pick;
        self.cfg_swap_cap = self.swap_cap;
        self.scene = Scene::Menu;
    }

    /// Commit the edited settings and start a new game with them.
    pub fn apply_menu(&mut self) {
        self.bot_delay_ms = self.cfg_bot_delay_ms;
        self.swap_cap = self.cfg_swap_cap;
        self.game = Game::new(GameConfig::default().with_winner_pick(self.cfg_winner_pick));
        self.seat_opponent();
        self.zone = Zone::Hand;
        self.cursor = 0;
        self.scene = Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_cap_cycles_through_unlimited() {
        let mut app = AppState::default();
        app.menu_index = 2;
        app.cfg_swap_cap = Some(MAX_SWAP_CAP);
        app.menu_inc();
        assert_eq!(app.cfg_swap_cap, None);
        app.menu_inc();
        assert_eq!(app.cfg_swap_cap, Some(0));
        app.menu_dec();
        assert_eq!(app.cfg_swap_cap, None);
    }

    #[test]
    fn apply_carries_winner_pick_into_the_game() {
        let mut app = AppState::default();
        app.menu_index = 1;
        app.menu_inc();
        app.apply_menu();
        assert_eq!(app.game.config().winner_pick, WinnerPick::OwnSlots);
        app.open_menu();
        assert_eq!(app.cfg_winner_pick, WinnerPick::OwnSlots);
    }
}
