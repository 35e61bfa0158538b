//! UI rendering with Ratatui.
//!
//! Draws the corridor around the hero, a status header, the message log and a
//! key hint footer. Everything is derived from a [`View`] snapshot; rendering
//! never talks to the runtime.
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use anyhow::Result;
use game_core::{GameState, MobKind, Observables, Position, PropKind, TurnPhase};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::terminal::Tui;

pub const MESSAGE_PANEL_HEIGHT: u16 = 6;

/// Bounded log of recent messages, newest last.
#[derive(Debug, Clone)]
pub struct MessageLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message.into());
    }

    pub fn recent(&self, count: usize) -> impl Iterator<Item = &String> {
        self.entries.iter().skip(self.entries.len().saturating_sub(count))
    }
}

/// Everything one frame needs.
pub struct View<'a> {
    pub state: &'a GameState,
    pub observables: Observables,
    pub lanes: (i32, i32),
    pub messages: &'a MessageLog,
}

pub fn render(terminal: &mut Tui, view: &View<'_>) -> Result<()> {
    terminal.draw(|frame| render_frame(frame, view))?;
    Ok(())
}

fn render_frame(frame: &mut Frame, view: &View<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(MESSAGE_PANEL_HEIGHT),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], view.observables);
    render_corridor(frame, chunks[1], view);
    render_messages(frame, chunks[2], view.messages);
    render_footer(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect, observables: Observables) {
    let status = if observables.hero_alive {
        let phase = match observables.turn_phase {
            TurnPhase::HeroTurn => "your move",
            TurnPhase::MobsTurn => "the dead stir",
        };
        Span::styled(phase, Style::default().fg(Color::Gray))
    } else {
        let killer = observables
            .last_killed_by
            .map(MobKind::title)
            .unwrap_or("Something");
        Span::styled(
            format!("A {killer} got you. Press r to rise again."),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    };

    let line = Line::from(vec![
        Span::styled(
            format!("Score {:>4}", observables.score),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::raw(format_elapsed(observables.elapsed)),
        Span::raw("   "),
        status,
    ]);

    let block = Block::default().borders(Borders::ALL).title(" Crypt ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_corridor(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let block = Block::default().borders(Borders::ALL);
    let rows = i32::from(area.height.saturating_sub(2));
    if rows == 0 {
        frame.render_widget(block, area);
        return;
    }

    let glyphs = glyph_map(view.state);
    let (lane_min, lane_max) = view.lanes;
    let min_boundary = view.state.window.min_boundary;

    // Keep the hero in the lower quarter; the corridor extends upward.
    let bottom = view.state.hero.position.y - rows / 4;
    let top = bottom + rows - 1;

    let lines: Vec<Line> = (bottom..=top)
        .rev()
        .map(|y| {
            let mut spans = Vec::with_capacity((lane_max - lane_min + 3) as usize);
            spans.push(Span::styled("# ", Style::default().fg(Color::DarkGray)));
            for x in lane_min..=lane_max {
                let position = Position::new(x, y);
                let span = match glyphs.get(&position) {
                    Some(&(glyph, style)) => Span::styled(format!("{glyph} "), style),
                    None if y < min_boundary => {
                        Span::styled("~ ", Style::default().fg(Color::Blue))
                    }
                    None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                };
                spans.push(span);
            }
            spans.push(Span::styled("#", Style::default().fg(Color::DarkGray)));
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn glyph_map(state: &GameState) -> HashMap<Position, (char, Style)> {
    let mut glyphs = HashMap::new();

    for prop in &state.entities.props {
        glyphs.insert(
            prop.position,
            (prop_glyph(prop.kind), Style::default().fg(Color::Gray)),
        );
    }

    for mob in &state.entities.mobs {
        let Some(kind) = mob.mob_kind() else {
            continue;
        };
        let (glyph, color) = mob_glyph(kind);
        let entry = if mob.alive {
            (glyph, Style::default().fg(color).add_modifier(Modifier::BOLD))
        } else {
            ('%', Style::default().fg(Color::DarkGray))
        };
        glyphs.insert(mob.position, entry);
    }

    let hero = if state.hero.alive {
        (
            '@',
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ('%', Style::default().fg(Color::Red))
    };
    glyphs.insert(state.hero.position, hero);

    glyphs
}

fn mob_glyph(kind: MobKind) -> (char, Color) {
    match kind {
        MobKind::Walker => ('z', Color::Green),
        MobKind::Floater => ('s', Color::Cyan),
        MobKind::ChargerA => ('B', Color::Red),
        MobKind::ChargerB => ('R', Color::Magenta),
    }
}

fn prop_glyph(kind: PropKind) -> char {
    match kind {
        PropKind::Grave => 'n',
        PropKind::Cross => '+',
        PropKind::Tomb => '=',
        PropKind::Stones => '*',
        PropKind::Tree => 'T',
    }
}

fn render_messages(frame: &mut Frame, area: Rect, messages: &MessageLog) {
    let visible = usize::from(area.height.saturating_sub(2));
    let lines: Vec<Line> = messages
        .recent(visible)
        .map(|message| Line::from(message.as_str()))
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Log ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let hint = Line::from(Span::styled(
        " arrows/wasd move or strike   r restart   q quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(hint), area);
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
