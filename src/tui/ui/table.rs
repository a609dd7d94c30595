use crate::cards::{Card, Color as CardColor, Suit};
use crate::game::{HistoryEntry, Phase};
use crate::scoring::BattleScore;
use crate::side::Seat;
use crate::snapshot::{SideView, Snapshot};
use crate::tui::app::{AppState, Zone, HUMAN};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{card_columns, centered_rect, inner};

const CARD_WIDTH: u16 = 8;

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let snap = app.game.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(5), // opponent slots
            Constraint::Length(5), // own slots
            Constraint::Length(5), // hand
            Constraint::Min(4),    // status bar
        ])
        .split(size);

    let mut header_lines: Vec<Line> = Vec::new();
    let turn = match (snap.phase, snap.reveal_turn()) {
        (_, Some(seat)) => format!("   Turn: {seat}"),
        (Phase::BattleResolved { winner }, None) => format!("   Selecting: {winner}"),
        _ => String::new(),
    };
    header_lines.push(Line::from(format!(
        "Round {}   Phase: {}   Deck: {}{turn}",
        snap.round,
        snap.phase.label(),
        snap.deck_len,
    )));
    header_lines.push(score_line(&snap));
    let header = Paragraph::new(header_lines)
        .block(Block::default().title("dragon-dance").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let opponent = HUMAN.other();
    let mut opp_title = format!(
        "{opponent}  hand {}  stack {}",
        snap.side(opponent).hand.len(),
        snap.side(opponent).stack.len()
    );
    if let Some(label) = app.bot_label(opponent) {
        opp_title.push_str(&format!(" [{label}]"));
    }
    draw_slots(f, chunks[1], app, &snap, opponent, opp_title);

    let me = snap.side(HUMAN);
    let my_title = format!("{HUMAN} (you)  stack {}  swaps {}", me.stack.len(), me.swaps);
    draw_slots(f, chunks[2], app, &snap, HUMAN, my_title);

    draw_hand(f, chunks[3], app, me);

    let status_area = chunks[4];
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), status_area);
    let status_inner = inner(status_area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(status_inner);

    let mut left_info = vec![Line::from(snap.message.clone())];
    if let Some(err) = app.action_error() {
        left_info.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }
    left_info.push(Line::from(Span::styled(
        action_hint(&snap),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let right_keys = vec![
        Line::from("Tab zone • ←/→ move • Enter act • S swap"),
        Line::from("N new game • ? help • H history • M menu"),
    ];
    let left_para = Paragraph::new(left_info).wrap(Wrap { trim: true });
    let right_para =
        Paragraph::new(right_keys).wrap(Wrap { trim: true }).alignment(Alignment::Right);
    f.render_widget(left_para, cols[0]);
    f.render_widget(right_para, cols[1]);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    }
}

fn score_line(snap: &Snapshot) -> Line<'static> {
    if let Some(outcome) = snap.final_outcome() {
        let [one, two] = outcome.scores;
        let verdict = match outcome.winner {
            Some(w) => format!("{w} wins"),
            None => "Draw".to_string(),
        };
        return Line::from(Span::styled(
            format!(
                "Final: {verdict}   P1 red {} / black {}   P2 red {} / black {}",
                one.red, one.black, two.red, two.black
            ),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(battle) = snap.battle {
        let fmt = |s: BattleScore| format!("{} (R {} + B {})", s.total(), s.red, s.black);
        return Line::from(format!(
            "Battle: P1 {}  vs  P2 {}",
            fmt(battle.scores[0]),
            fmt(battle.scores[1])
        ));
    }
    Line::from(Span::styled(
        "Battle score: red + black, each doubled by its own Dragon",
        Style::default().add_modifier(Modifier::DIM),
    ))
}

fn action_hint(snap: &Snapshot) -> String {
    let me = snap.side(HUMAN);
    match snap.phase {
        Phase::Placing | Phase::RevealSwap if !me.empty_slots().is_empty() => {
            "Your move: place a card from your hand.".to_string()
        }
        Phase::Placing => "Waiting for the opponent to place.".to_string(),
        Phase::RevealSwap if snap.reveal_turn() == Some(HUMAN) && snap.all_slots_filled() => {
            if snap.last_revealer.is_some() {
                "Your move: reveal (Enter) or swap (S) a face-down slot.".to_string()
            } else {
                "Your move: reveal one of your slots.".to_string()
            }
        }
        Phase::RevealSwap => "Waiting for the opponent.".to_string(),
        Phase::BattleResolved { winner } if winner == HUMAN => {
            "You won the battle: pick a non-Dragon card to keep.".to_string()
        }
        Phase::BattleResolved { .. } => "The opponent is picking a card.".to_string(),
        Phase::DrawTiebreak { picks } if picks[HUMAN.index()].is_none() => {
            "Tiebreak: pick one of your own non-Dragon cards.".to_string()
        }
        Phase::DrawTiebreak { .. } => "Tiebreak: waiting for the opponent.".to_string(),
        Phase::GameEnded { .. } => "Game over. Press N for a new game.".to_string(),
    }
}

fn draw_slots(
    f: &mut Frame,
    area: Rect,
    app: &AppState,
    snap: &Snapshot,
    seat: Seat,
    title: String,
) {
    let side = snap.side(seat);
    let zone = if seat == HUMAN { Zone::MySlots } else { Zone::OpponentSlots };
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if app.zone == zone {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }
    if let Phase::BattleResolved { winner } = snap.phase {
        if winner == seat {
            block = block.border_style(Style::default().fg(Color::Green));
        }
    }
    f.render_widget(block, area);
    let cols = card_columns(inner(area), side.slots.len(), CARD_WIDTH);
    for (i, slot) in side.slots.iter().enumerate() {
        let selected = app.zone == zone && app.cursor == i;
        let face_down = side.face_down[i];
        let content = match slot {
            None => Line::from("[  ]"),
            Some(_) if face_down && seat != HUMAN => {
                Line::from(Span::styled("??", Style::default().fg(Color::DarkGray)))
            }
            Some(card) => {
                let mut line = card_line(*card);
                if face_down {
                    line = line.patch_style(Style::default().add_modifier(Modifier::DIM));
                }
                line
            }
        };
        render_card_widget(f, cols[i], content, selected.then_some(Color::Yellow));
    }
}

fn draw_hand(f: &mut Frame, area: Rect, app: &AppState, me: &SideView) {
    let mut block =
        Block::default().title(format!("Hand ({})", me.hand.len())).borders(Borders::ALL);
    if app.zone == Zone::Hand {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }
    f.render_widget(block, area);
    if me.hand.is_empty() {
        return;
    }
    let cols = card_columns(inner(area), me.hand.len(), CARD_WIDTH);
    for (i, card) in me.hand.iter().enumerate() {
        let selected = app.zone == Zone::Hand && app.cursor == i;
        render_card_widget(f, cols[i], card_line(*card), selected.then_some(Color::Yellow));
    }
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries = app.game.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No history yet."));
    } else {
        lines.extend(entries.iter().map(history_line));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn history_line(entry: &HistoryEntry) -> Line<'static> {
    let who = entry.seat.map(|s| format!("{s} ")).unwrap_or_default();
    let card = entry.card.map(|c| format!(" {c}")).unwrap_or_default();
    Line::from(format!("R{} {who}{}{card}", entry.round, entry.verb.label()))
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Tab: cycle hand / your slots / opponent slots"),
        Line::from("- Left / Right: move the cursor"),
        Line::from("- Enter or Space: place, reveal, or pick the card under the cursor"),
        Line::from("- S: swap a face-down slot back to hand"),
        Line::from("- N: new game"),
        Line::from("- H: history"),
        Line::from(""),
        Line::from(Span::styled("Rules:", bold)),
        Line::from("- Both sides place 3 cards face down; Player 1 reveals first."),
        Line::from("- After a reveal the other side reveals or swaps."),
        Line::from("- Red and black totals add up; a Dragon doubles its own color."),
        Line::from("- The higher total takes one card. Dragons go back to the deck."),
        Line::from("- A tie: each side picks a card, the higher value takes both."),
        Line::from("- When the deck cannot refill 6 cards, the best color stack wins."),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: apply and start a new game"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn suit_glyph(s: Suit) -> char {
    match s {
        Suit::Hearts => '♥',
        Suit::Diamonds => '♦',
        Suit::Spades => '♠',
        Suit::Clubs => '♣',
    }
}

fn color_style(c: CardColor) -> Style {
    match c {
        CardColor::Red => Style::default().fg(Color::Red),
        CardColor::Black => Style::default().fg(Color::White),
    }
}

fn card_line(card: Card) -> Line<'static> {
    let style = color_style(card.color());
    let text = match (card.rank(), card.suit()) {
        (Some(rank), Some(suit)) => format!("{}{}", rank.label(), suit_glyph(suit)),
        _ => "DRGN".to_string(),
    };
    Line::from(Span::styled(text, style))
}

fn render_card_widget(f: &mut Frame, area: Rect, content: Line<'static>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL).title_alignment(Alignment::Center);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let inner = inner(area);
    f.render_widget(block, area);
    let para = Paragraph::new(content).alignment(Alignment::Center);
    f.render_widget(para, inner);
}
