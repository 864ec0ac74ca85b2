//! TUI rendering with ratatui
//!
//! Visualizations for the solver interface.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{LetterStatus, to_emoji};
use crate::solver::GuessSource;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Candidates listed in the candidates panel
const SHOWN_CANDIDATES: usize = 12;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(5), // Input area
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_main_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🎯 HYBRID WORDLE SOLVER - Interactive Mode")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_main_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30), // Current guess info
            Constraint::Percentage(35), // Candidates
            Constraint::Percentage(35), // History
        ])
        .split(area);

    render_current_guess(f, app, chunks[0]);
    render_candidates(f, app, chunks[1]);
    render_history(f, app, chunks[2]);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

fn render_current_guess(f: &mut Frame, app: &App, area: Rect) {
    let Some(ref guess) = app.current_guess else {
        let text = if app.input_mode == InputMode::WinCelebration {
            "Solved!"
        } else {
            "No suggestion available"
        };
        f.render_widget(Paragraph::new(text).block(panel(" Current Guess ")), area);
        return;
    };

    let mut content = vec![Line::from(vec![
        Span::raw("Suggested: "),
        Span::styled(
            guess.word.to_uppercase(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ])];

    match &guess.source {
        GuessSource::Oracle { explanation } => {
            content.push(Line::from(vec![
                Span::raw("Source:    "),
                Span::styled("oracle", Style::default().fg(Color::Magenta)),
            ]));
            if !explanation.is_empty() {
                content.push(Line::from(format!("Why:       {explanation}")));
            }
        }
        GuessSource::Ranked { score } => {
            content.push(Line::from(format!("Source:    letter coverage ({score})")));
        }
    }

    if let Some(ref manual) = app.manual_guess {
        content.push(Line::from(vec![
            Span::raw("Playing:   "),
            Span::styled(
                manual.to_uppercase(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    let paragraph = Paragraph::new(content)
        .block(panel(" Current Guess "))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn render_candidates(f: &mut Frame, app: &App, area: Rect) {
    let ranked = app.session.ranked();

    let items: Vec<ListItem> = if ranked.is_empty() {
        vec![ListItem::new("No candidates remain")]
    } else {
        ranked
            .iter()
            .take(SHOWN_CANDIDATES)
            .enumerate()
            .map(|(i, (word, score))| {
                let style = if i == 0 {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                ListItem::new(format!(
                    "{:>2}. {}  {score}",
                    i + 1,
                    word.text().to_uppercase()
                ))
                .style(style)
            })
            .collect()
    };

    let title = if ranked.len() > SHOWN_CANDIDATES {
        format!(" Top {SHOWN_CANDIDATES} of {} Candidates ", ranked.len())
    } else {
        format!(" Candidates ({}) ", ranked.len())
    };

    f.render_widget(List::new(items).block(panel(&title)), area);
}

fn tile_style(status: LetterStatus) -> Style {
    let bg = match status {
        LetterStatus::Correct => Color::Green,
        LetterStatus::Present => Color::Yellow,
        LetterStatus::Absent => Color::DarkGray,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let history_items: Vec<ListItem> = app
        .history
        .iter()
        .enumerate()
        .rev()
        .map(|(i, entry)| {
            let mut spans = vec![Span::raw(format!("{}: ", i + 1))];
            spans.extend(
                entry
                    .guess
                    .chars()
                    .zip(&entry.feedback)
                    .map(|(letter, status)| {
                        Span::styled(
                            format!(" {} ", letter.to_ascii_uppercase()),
                            tile_style(*status),
                        )
                    }),
            );
            spans.push(Span::raw(format!(
                " {} {} → {}{}",
                to_emoji(&entry.feedback),
                entry.candidates_before,
                entry.candidates_after,
                if entry.from_oracle { " (oracle)" } else { "" }
            )));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let history = List::new(history_items).block(panel(" History "));
    f.render_widget(history, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Search space gauge
            Constraint::Percentage(50), // Constraints
            Constraint::Min(5),         // Messages
        ])
        .split(area);

    render_search_progress(f, app, chunks[0]);
    render_constraints(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_search_progress(f: &mut Frame, app: &App, area: Rect) {
    let total = app.session.pool().len();
    let remaining = app.session.candidate_count();
    let eliminated = total.saturating_sub(remaining);
    let progress_pct = if total == 0 {
        0
    } else {
        (eliminated * 100 / total) as u16
    };

    let gauge = Gauge::default()
        .block(panel(" Search Space "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(progress_pct)
        .label(format!("{remaining}/{total} candidates remain"));

    f.render_widget(gauge, area);
}

fn render_constraints(f: &mut Frame, app: &App, area: Rect) {
    let summary = app.session.model().summary().to_string();
    let lines: Vec<Line> = summary.lines().map(|l| Line::from(l.to_string())).collect();

    let paragraph = Paragraph::new(lines)
        .block(panel(" Constraints "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::WinCelebration => (
            " 🎉 CONGRATULATIONS! 🎉 | Press 'n' for new game or 'q' to quit ".to_string(),
            "",
            Color::Green,
        ),
        InputMode::Feedback => (
            " Enter Feedback (G=Green Y=Yellow -=Gray, or emojis) | TAB for manual word "
                .to_string(),
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
        InputMode::ManualWord => (
            format!(
                " Enter Word to Try ({} letters) | ESC to cancel ",
                app.word_length()
            ),
            app.manual_word.as_str(),
            Color::Cyan,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let state = Paragraph::new(format!("Game: {}", app.session.state()))
        .alignment(Alignment::Center);
    f.render_widget(state, chunks[0]);

    let best = app
        .stats
        .guess_distribution
        .keys()
        .next()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    let stats = Paragraph::new(format!("Won: {} | Best: {best}", app.stats.games_won))
        .alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);

    let language = Paragraph::new(format!("Language: {}", app.session.config().language))
        .alignment(Alignment::Center);
    f.render_widget(language, chunks[2]);

    let help_text = if app.session.candidate_count() == 0 && !app.history.is_empty() {
        "q: Quit | n: New Game | u: Undo"
    } else {
        "q: Quit | u: Undo | Enter: Submit | TAB: Manual Word"
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::solver::SolverSession;
    use crate::wordlists::WordPool;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn renders_suggestion_and_candidates() {
        let pool = WordPool::from_strs(5, &["crane", "slate", "plate"]).unwrap();
        let mut app = App::new(SolverSession::new(pool, SessionConfig::default()));
        app.compute_suggestion();

        let text = screen(&app);
        assert!(text.contains("SLATE"));
        assert!(text.contains("PLATE"));
        assert!(text.contains("3/3 candidates remain"));
    }

    #[test]
    fn renders_constraints_after_feedback() {
        let pool = WordPool::from_strs(5, &["crane", "slate", "plate"]).unwrap();
        let mut app = App::new(SolverSession::new(pool, SessionConfig::default()));
        app.compute_suggestion();
        app.handle_feedback("-GGGG");

        let text = screen(&app);
        assert!(text.contains("_late"));
        assert!(text.contains("1/3 candidates remain"));
    }
}
