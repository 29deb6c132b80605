use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Sparkline};

use crate::state::WatchState;

pub fn render(frame: &mut Frame, state: &WatchState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(0)])
        .split(area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(8)])
        .split(chunks[1]);

    // Left panel: status + hints
    let (status, status_style) = if state.paused {
        ("Paused", Style::default().fg(Color::Yellow).bold())
    } else {
        ("Running", Style::default().fg(Color::Green).bold())
    };

    let mut info = vec![
        Line::styled("Dropball", Style::default().bold().fg(Color::Cyan)),
        Line::styled(state.config_label.clone(), Style::default().fg(Color::DarkGray)),
        Line::raw(""),
        Line::from(vec![Span::raw("Status: "), Span::styled(status, status_style)]),
        Line::raw(format!("Ticks:  {}", state.ticks)),
        Line::raw(format!("Resets: {}", state.resets)),
    ];
    if let Some(report) = &state.last_report {
        info.push(Line::raw(format!("Frame:  {}", report.frame)));
        info.push(Line::raw(format!("Lines:  {}", report.debug_segments)));
        info.push(Line::raw(format!("dt:     {:.4}s", report.dt)));
    }
    if let Some(sphere) = &state.sphere {
        let p = sphere.position;
        info.push(Line::raw(""));
        info.push(Line::raw(format!("Pos:   ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z)));
        info.push(Line::raw(format!("Speed: {:.3}", sphere.linear_velocity.length())));
        info.push(Line::raw(format!("Spin:  {:.3}", sphere.angular_velocity.length())));
    }
    info.push(Line::raw(""));
    info.push(Line::raw("[Space] Pause/resume"));
    info.push(Line::raw("[r] Reset sphere"));
    info.push(Line::raw("[q/Esc] Quit"));

    let info_widget = Paragraph::new(info).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Demo ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(info_widget, chunks[0]);

    // Right top: height over time
    let data = state.heights.sparkline_data();
    let title = format!(" Sphere height (max {:.2}) ", state.heights.max());
    let sparkline = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(&data)
        .style(Style::default().fg(Color::Green));
    frame.render_widget(sparkline, right[0]);

    // Right bottom: events
    let visible = right[1].height.saturating_sub(2) as usize;
    let events: Vec<Line> = state
        .log
        .tail(visible)
        .iter()
        .map(|l| {
            Line::from(vec![
                Span::styled(format!("{:>7} ", l.tick), Style::default().fg(Color::DarkGray)),
                Span::raw(l.text.clone()),
            ])
        })
        .collect();
    let events_widget =
        Paragraph::new(events).block(Block::default().borders(Borders::ALL).title(" Events "));
    frame.render_widget(events_widget, right[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_shows_status_and_events() {
        let mut state = WatchState::new("built-in defaults".into());
        state.log.push(3, "sphere reset (#1)".into());
        state.resets = 1;

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, &state, area);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Running"));
        assert!(text.contains("Resets: 1"));
        assert!(text.contains("sphere reset (#1)"));
        assert!(text.contains("Sphere height"));
    }

    #[test]
    fn test_render_paused() {
        let mut state = WatchState::new("built-in defaults".into());
        state.paused = true;
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, &state, area);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("Paused"));
    }
}
