use crate::tui::widgets::{centered, BlockWithLegend, InfoDialog, PomodoroClock};
use crate::tui::TimerVisuals;
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{BorderType, Borders, Paragraph},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;
use url::Url;

const TITLE: &str = "Pomodoro Timer";
const TAGLINE: &str = "A timer for the Pomodoro Technique.";

const INFO_DIALOG_WIDTH: u16 = 64;
const INFO_DIALOG_HEIGHT: u16 = 16;

fn split_initial(str: &str) -> (&str, &str) {
    let mut graphemes = str.graphemes(true);

    let initial = graphemes.next().unwrap_or("");
    let remainder = graphemes.as_str();

    (initial, remainder)
}

/// Titles and legend entries get their first grapheme highlighted, which
/// doubles as the key that triggers them.
fn define_block<'a>(title: &'a str, legend: Vec<&'a str>) -> BlockWithLegend<'a> {
    let text_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let initials_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

    let highlight = |s: &'a str| {
        let (initial, remainder) = split_initial(s);
        Spans::from(vec![
            Span::styled(initial, initials_style),
            Span::styled(remainder, text_style),
        ])
    };

    BlockWithLegend::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(highlight(title))
        .legend(legend.into_iter().map(highlight).collect::<Vec<Spans>>())
}

pub fn render_ui<B: Backend>(
    frame: &mut Frame<B>,
    timer_visuals: &TimerVisuals,
    info_url: Option<&Url>,
) {
    let (header_chunk, timer_chunk) = {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(frame.size());

        (chunks[0], chunks[1])
    };

    let header = Paragraph::new(vec![
        Spans::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Spans::from(Span::styled(TAGLINE, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, header_chunk);

    let timer_widget = PomodoroClock::default()
        .block(define_block(
            "timer",
            vec!["␣ start/pause", "↕ adjust", "reset", "info", "quit"],
        ))
        .time_remaining(timer_visuals.time_remaining)
        .session(timer_visuals.session)
        .timer_is_paused(timer_visuals.timer_is_paused)
        .progress_percentage(timer_visuals.progress_percentage)
        .durations(timer_visuals.work_duration, timer_visuals.break_duration);
    frame.render_widget(timer_widget, timer_chunk);

    if let Some(url) = info_url {
        let dialog = InfoDialog::default()
            .block(define_block("info", vec!["⎋ close"]))
            .link(url.as_str());
        let dialog_chunk = centered(frame.size(), INFO_DIALOG_WIDTH, INFO_DIALOG_HEIGHT);
        frame.render_widget(dialog, dialog_chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pomodoro::State;
    use tui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn draw(info_url: Option<&Url>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let visuals = TimerVisuals::from(&State::default());
        terminal
            .draw(|f| render_ui(f, &visuals, info_url))
            .unwrap();

        screen(terminal.backend().buffer())
    }

    fn screen(buf: &Buffer) -> String {
        buf.content
            .chunks(buf.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_split_initial() {
        assert_eq!(split_initial("reset"), ("r", "eset"));
        assert_eq!(split_initial("␣ start"), ("␣", " start"));
        assert_eq!(split_initial(""), ("", ""));
    }

    #[test]
    fn test_timer_screen() {
        let screen = draw(None);

        assert!(screen.contains(TITLE));
        assert!(screen.contains(TAGLINE));
        assert!(screen.contains("25:00"));
        assert!(screen.contains("reset"));
        assert!(!screen.contains("Read more"));
    }

    #[test]
    fn test_info_dialog_overlays_timer() {
        let url = Url::parse("https://example.com/pomodoro").unwrap();

        let screen = draw(Some(&url));

        assert!(screen.contains("Read more: https://example.com/pomodoro"));
        assert!(screen.contains("close"));
    }
}
