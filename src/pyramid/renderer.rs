/// Pure drawing of a session snapshot - no game logic
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::pyramid::session::GamePhase;
use crate::pyramid::snapshot::{SessionSnapshot, WordView};
use crate::pyramid::word::Word;

const KEY_HELP: &str = "[A-Z] Type  [Bksp] Delete  [Tab] Hint  [Ctrl+R] Reveal  [Ctrl+U] Reset  [→] Skip  [Esc] Quit";

pub fn render(frame: &mut Frame, view: &SessionSnapshot) {
    let Some(puzzle) = view.puzzle.as_ref() else {
        render_empty(frame);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(header_text(view))
            .block(Block::default().borders(Borders::ALL).title(" WORD PYRAMID "))
            .alignment(Alignment::Center),
        chunks[0],
    );

    let base = Line::from(
        puzzle
            .three
            .to_uppercase()
            .chars()
            .map(|c| Span::styled(format!("[{}]", c), Style::default().fg(Color::Green)))
            .collect::<Vec<_>>(),
    );
    let rows = vec![
        base.alignment(Alignment::Center),
        Line::default(),
        word_row(&view.four, view.phase).alignment(Alignment::Center),
        Line::default(),
        word_row(&view.five, view.phase).alignment(Alignment::Center),
    ];
    frame.render_widget(
        Paragraph::new(rows).block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );

    let step = if view.phase == GamePhase::InWordFour { Word::Four } else { Word::Five };
    let clue = vec![
        Line::styled(
            format!("Add one letter to {} to make:", puzzle.base_of(step)),
            Style::default().fg(Color::Gray),
        ),
        Line::from(puzzle.clue(step).to_string()),
    ];
    frame.render_widget(
        Paragraph::new(clue)
            .block(Block::default().borders(Borders::ALL).title(format!(" STEP {} ", view.step_number)))
            .wrap(Wrap { trim: true }),
        chunks[2],
    );

    frame.render_widget(
        Paragraph::new(KEY_HELP)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );

    if view.show_success {
        render_success(frame, view, chunks[3]);
    }
}

pub fn header_text(view: &SessionSnapshot) -> String {
    format!(
        "Puzzle {} of {} | Completed: {}",
        view.puzzle_index + 1,
        view.puzzle_total,
        view.completed_count
    )
}

fn word_row(word: &WordView, phase: GamePhase) -> Line<'static> {
    let active = phase.active_word() == Some(word.word);
    let done = word.solved
        || match word.word {
            Word::Four => phase != GamePhase::InWordFour,
            Word::Five => phase == GamePhase::PuzzleCompleted,
        };

    let spans = word
        .letters
        .iter()
        .enumerate()
        .map(|(i, letter)| {
            let style = if word.is_glowing(i) {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else if word.is_hinted(i) {
                Style::default().fg(Color::Yellow)
            } else if done {
                Style::default().fg(Color::Green)
            } else if active {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!("[{}]", letter.unwrap_or(' ')), style)
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

fn render_success(frame: &mut Frame, view: &SessionSnapshot, area: Rect) {
    let Some(puzzle) = view.puzzle.as_ref() else {
        return;
    };
    let text = vec![
        Line::styled("Puzzle solved!", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Line::default(),
        Line::from(format!(
            "{} → {} → {}",
            puzzle.three.to_uppercase(),
            puzzle.four.to_uppercase(),
            puzzle.five.to_uppercase()
        )),
        Line::default(),
        Line::from(header_text(view)),
        Line::styled("Press Enter for the next puzzle", Style::default().fg(Color::Gray)),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" SUCCESS ")),
        area,
    );
}

fn render_empty(frame: &mut Frame) {
    frame.render_widget(
        Paragraph::new("No puzzles available")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" WORD PYRAMID ")),
        frame.area(),
    );
}
