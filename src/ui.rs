use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::render::{self, DrawCmd};

const FIELD_BG: Color = Color::Rgb(5, 5, 15);

/// Renders the current frame from the game's draw commands. Also records
/// where the field landed on screen so mouse clicks can be mapped back.
pub fn render(frame: &mut Frame, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(220, 80, 80)))
        .title(" 🎯 Click the Target! ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(255, 120, 120))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // score / time readouts
            Constraint::Min(4),    // play field
            Constraint::Length(1), // help bar
        ])
        .split(inner);
    app.field_area = chunks[1];

    let mut score_text = String::new();
    let mut time_text = String::new();
    let mut circle = None;
    let mut message = None;
    for cmd in render::draw(&app.game) {
        match cmd {
            DrawCmd::Clear => {}
            DrawCmd::Circle { x, y, radius } => circle = Some((x, y, radius)),
            DrawCmd::ScoreText(s) => score_text = s,
            DrawCmd::TimeText(s) => time_text = s,
            DrawCmd::CenterMessage(s) => message = Some(s),
        }
    }

    render_status(frame, chunks[0], app, &score_text, &time_text);
    render_field(frame, chunks[1], app, circle);
    if let Some(msg) = message {
        render_message(frame, chunks[1], &msg);
    }
    render_help(frame, chunks[2], app);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App, score_text: &str, time_text: &str) {
    let time_color = if app.game.running() && app.game.time_left() <= 5 {
        Color::Rgb(255, 80, 80)
    } else {
        Color::Rgb(80, 200, 255)
    };
    let status = Line::from(vec![
        Span::styled(" 🎯 ", Style::default()),
        Span::styled(
            format!("{} ", score_text),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} ", time_text),
            Style::default().fg(time_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Move: {}ms ", app.game.move_interval_ms()),
            Style::default().fg(Color::Rgb(180, 180, 200)),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}

fn render_field(frame: &mut Frame, area: Rect, app: &App, circle: Option<(f32, f32, f32)>) {
    let w = area.width as usize;
    let h = area.height as usize;
    if w == 0 || h == 0 {
        return;
    }
    let cfg = app.game.config();

    let mut grid: Vec<Vec<(char, Style)>> =
        vec![vec![(' ', Style::default().bg(FIELD_BG)); w]; h];

    if let Some((tx, ty, radius)) = circle {
        let target_style = Style::default()
            .fg(Color::Rgb(255, 60, 60))
            .bg(FIELD_BG)
            .add_modifier(Modifier::BOLD);
        for (cy, row) in grid.iter_mut().enumerate() {
            for (cx, cell) in row.iter_mut().enumerate() {
                // Same cell-center mapping the mouse handler uses, so what
                // looks like the target is exactly what clicks as the
                // target.
                let lx = (cx as f32 + 0.5) * cfg.width / w as f32;
                let ly = (cy as f32 + 0.5) * cfg.height / h as f32;
                let (dx, dy) = (lx - tx, ly - ty);
                if dx * dx + dy * dy <= radius * radius {
                    *cell = ('█', target_style);
                }
            }
        }
    }

    let lines: Vec<Line<'static>> = grid
        .into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_message(frame: &mut Frame, field: Rect, msg: &str) {
    let lines: Vec<Line> = msg
        .lines()
        .map(|l| {
            Line::from(Span::styled(
                l.to_string(),
                Style::default()
                    .fg(Color::Rgb(80, 200, 255))
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    let msg_h = (lines.len() as u16).min(field.height);
    let y = field.y + (field.height.saturating_sub(msg_h)) / 2;
    let overlay = Rect::new(field.x, y, field.width, msg_h);
    frame.render_widget(Clear, overlay);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(FIELD_BG)),
        overlay,
    );
}

fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let help = if app.game.running() {
        Line::from(vec![
            Span::styled(" 🖱 Click the red target! ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("R Reset ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Q Quit", Style::default().fg(Color::DarkGray)),
        ])
    } else if app.game.is_over() {
        Line::from(vec![
            Span::styled(" S Play again ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("R Reset ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Q Quit", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::styled(" S Start ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("R Reset ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Q Quit", Style::default().fg(Color::DarkGray)),
        ])
    };
    frame.render_widget(Paragraph::new(help), area);
}
