pub mod palette;

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};

use crate::{
    app::App,
    celebration::ParticleField,
    metrics::{self, CharState, SpeedTier},
};
use palette::Palette;

const HORIZONTAL_MARGIN: u16 = 4;
const VERTICAL_MARGIN: u16 = 1;
const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 12;
/// Streaks longer than this get a banner
const STREAK_BANNER_AFTER: u32 = 10;

const LEGEND: &str = "(ctrl+r) reset / (tab) next / (ctrl+t) theme / (ctrl+s) style / (esc) quit";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = Palette::from_preferences(self.preferences());
        Block::default().style(palette.base()).render(area, buf);

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            Paragraph::new("terminal too small")
                .style(palette.base())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(area, buf);
            return;
        }

        let session = &self.session;
        let metrics = session.snapshot();
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        // target paragraph with per character correctness
        let cursor = session.cursor_pos();
        let spans: Vec<Span> = session
            .classify()
            .into_iter()
            .enumerate()
            .map(|(idx, (expected, state))| match state {
                CharState::Correct => Span::styled(expected.to_string(), palette.correct()),
                CharState::Incorrect => Span::styled(
                    match expected {
                        ' ' => "·".to_owned(),
                        c => c.to_string(),
                    },
                    palette.incorrect(),
                ),
                CharState::Pending if idx == cursor => {
                    Span::styled(expected.to_string(), palette.cursor())
                }
                CharState::Pending => Span::styled(expected.to_string(), palette.pending()),
            })
            .collect();

        let border_color = if session.is_advance_pending() {
            palette.correct
        } else {
            palette.accent
        };
        let prompt = Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(palette.border_type)
                    .border_style(Style::default().fg(border_color)),
            )
            .wrap(Wrap { trim: false });

        // word wrap inside the borders and side margins
        let text_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2 + 2);
        let prompt_height = u16::try_from(prompt.line_count(text_width))
            .unwrap_or(u16::MAX)
            .max(3);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),             // stats
                Constraint::Min(0),                // padding
                Constraint::Length(prompt_height), // paragraph
                Constraint::Length(1),             // progress
                Constraint::Length(1),             // streak banner
                Constraint::Min(0),                // padding
                Constraint::Length(1),             // legend
            ])
            .split(area);

        // stats bar
        let stat_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(14)])
            .split(chunks[0]);

        let tier = SpeedTier::from_wpm(metrics.wpm);
        let wpm_style = if tier == SpeedTier::Blazing {
            bold_style.fg(palette.speed(tier))
        } else {
            bold_style.fg(palette.text)
        };
        let label_style = Style::default().fg(palette.muted);

        let stats = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(format!("{:>4}", metrics.wpm), wpm_style),
                Span::styled(format!("   {:>3}%", metrics.accuracy), bold_style),
                Span::styled(format!("   {:>4}", metrics.completed_count), bold_style),
            ]),
            Line::from(Span::styled(" WPM   ACCURACY   COMPLETED", label_style)),
        ]);
        stats.render(stat_chunks[0], buf);

        let lit = metrics::lit_bars(metrics.wpm);
        let bars: Vec<Span> = (0..metrics::SPEED_BAR_THRESHOLDS.len())
            .map(|i| {
                if i < lit {
                    Span::styled("▮ ", Style::default().fg(palette.speed(tier)))
                } else {
                    Span::styled("▯ ", label_style)
                }
            })
            .collect();
        let speed = Paragraph::new(vec![
            Line::from(bars),
            Line::from(Span::styled(format!("{}s", metrics.elapsed_secs), label_style)),
        ])
        .alignment(Alignment::Right);
        speed.render(stat_chunks[1], buf);

        prompt.render(chunks[2], buf);

        Gauge::default()
            .gauge_style(Style::default().fg(palette.speed(tier)).bg(palette.background))
            .ratio(session.progress())
            .label("")
            .render(chunks[3], buf);

        if metrics.streak > STREAK_BANNER_AFTER {
            Paragraph::new(Span::styled(
                format!("{} streak!", metrics.streak),
                bold_style.fg(palette.speed(SpeedTier::Blazing)),
            ))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
        }

        Paragraph::new(Span::styled(
            LEGEND,
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

        render_particles(&self.particles, &palette, area, buf, Instant::now());
    }
}

/// Map percent-space particles onto the drawing area
fn render_particles(
    particles: &ParticleField,
    palette: &Palette,
    area: Rect,
    buf: &mut Buffer,
    now: Instant,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    for particle in particles.iter() {
        let x = ((particle.x / 100.0) * area.width as f64) as u16;
        let y = ((particle.y / 100.0) * area.height as f64) as u16;
        let x = area.x + x.min(area.width - 1);
        let y = area.y + y.min(area.height - 1);

        let color = if particle.id % 2 == 0 {
            palette.accent
        } else {
            palette.speed(SpeedTier::Blazing)
        };
        let style = if particle.fade(now, particles.ttl()) < 0.5 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol(palette.particle_symbol);
            cell.set_style(style);
        }
    }
}
