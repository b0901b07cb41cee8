use crate::event::{Event, EventConversionUndefinedError};
use crate::pomodoro::{Adjustment, Session, SessionDuration, State as PomodoroState, Status};
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};
use futures::StreamExt;
use std::io;
use thiserror::Error;
use tui::{backend::CrosstermBackend, Terminal};
use url::Url;

mod animation;
mod render;
mod widgets;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    events: EventStream,
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl Tui {
    pub fn new() -> Result<Self, TuiError> {
        let backend = CrosstermBackend::new(io::stdout());

        Ok(Tui {
            terminal: Terminal::new(backend).map_err(TuiError::Creation)?,
            events: EventStream::new(),
            alternate_screen_enabled: false,
            raw_mode_enabled: false,
        })
    }

    /// Has to be explicitly disabled, because disabling can cause errors that have to be catched.
    /// Is not disabled by dropping.
    pub fn enable(&mut self) -> Result<(), TuiError> {
        crossterm::terminal::enable_raw_mode().map_err(TuiError::RawModeToggle)?;
        self.raw_mode_enabled = true;

        crossterm::execute!(
            self.terminal.backend_mut(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::event::EnableMouseCapture,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        )
        .map_err(TuiError::AlternateScreenToggle)?;
        self.alternate_screen_enabled = true;

        Ok(())
    }

    pub fn disable(&mut self) -> Result<(), TuiError> {
        if self.alternate_screen_enabled {
            crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
                crossterm::terminal::LeaveAlternateScreen,
                crossterm::event::DisableMouseCapture,
            )
            .map_err(TuiError::AlternateScreenToggle)?;
            self.alternate_screen_enabled = false;
        }
        if self.raw_mode_enabled {
            crossterm::terminal::disable_raw_mode().map_err(TuiError::RawModeToggle)?;
            self.raw_mode_enabled = false;
        }

        Ok(())
    }

    /// Draws the timer, with the info dialog on top if a link for it is given.
    pub fn render(
        &mut self,
        visuals: &TimerVisuals,
        info_url: Option<&Url>,
    ) -> Result<(), TuiError> {
        self.terminal
            .draw(|f| {
                render::render_ui(f, visuals, info_url);
            })
            .map_err(TuiError::Rendering)?;

        Ok(())
    }

    /// Waits for the next input that maps to an [`Event`]. Cancel safe.
    pub async fn read_event(&mut self) -> Result<Event, TuiError> {
        loop {
            let crossterm_event = self
                .events
                .next()
                .await
                .ok_or(TuiError::InputClosed)?
                .map_err(TuiError::ReadInputEvent)?;

            if let Ok(event) = Event::try_from(crossterm_event) {
                return Ok(event);
            }
        }
    }
}

/// Everything the timer panel shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerVisuals {
    pub time_remaining: SessionDuration,
    pub timer_is_paused: bool,
    pub session: Session,
    pub progress_percentage: f64,
    pub work_duration: SessionDuration,
    pub break_duration: SessionDuration,
}

impl From<&PomodoroState> for TimerVisuals {
    fn from(state: &PomodoroState) -> Self {
        TimerVisuals {
            time_remaining: state.time_remaining(),
            timer_is_paused: state.status() != Status::Running,
            session: state.current_session(),
            progress_percentage: state.progress_percentage(),
            work_duration: state.duration_of(Session::Work),
            break_duration: state.duration_of(Session::Break),
        }
    }
}

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("failed to initialize terminal ui: {0}")]
    Creation(io::Error),
    #[error("failed to toggle terminal raw mode: {0}")]
    RawModeToggle(io::Error),
    #[error("failed to toggle alternate terminal screen: {0}")]
    AlternateScreenToggle(io::Error),
    #[error("failed to render terminal ui: {0}")]
    Rendering(io::Error),
    #[error("failed to read input event from terminal: {0}")]
    ReadInputEvent(io::Error),
    #[error("terminal input stream closed")]
    InputClosed,
}

// Only the work duration is bound to keys; break adjustments have no binding.
impl TryFrom<CrosstermEvent> for Event {
    type Error = EventConversionUndefinedError;

    fn try_from(value: CrosstermEvent) -> Result<Self, Self::Error> {
        let work = |adjustment| Event::AdjustDuration(Session::Work, adjustment);

        match value {
            CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Release => None,
            CrosstermEvent::Key(key_event)
                if key_event.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                match key_event.code {
                    KeyCode::Char('c') => Some(Event::Quit),
                    _ => None,
                }
            }
            CrosstermEvent::Key(key_event) => match key_event.code {
                KeyCode::Char('q') => Some(Event::Quit),
                KeyCode::Char('r') => Some(Event::ResetTimer),
                KeyCode::Char('i') => Some(Event::ToggleInfo),
                KeyCode::Char(' ') => Some(Event::ToggleTimer),
                KeyCode::Up => Some(work(Adjustment::Extend)),
                KeyCode::Down => Some(work(Adjustment::Reduce)),
                KeyCode::Esc | KeyCode::Enter => Some(Event::CloseInfo),
                _ => None,
            },
            CrosstermEvent::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::ScrollUp => Some(work(Adjustment::Extend)),
                MouseEventKind::ScrollDown => Some(work(Adjustment::Reduce)),
                _ => None,
            },
            CrosstermEvent::Resize(..) => Some(Event::Redraw),
            _ => None,
        }
        .ok_or(EventConversionUndefinedError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState, MouseEvent};

    fn key(code: KeyCode) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn convert(event: CrosstermEvent) -> Option<Event> {
        Event::try_from(event).ok()
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(convert(key(KeyCode::Char(' '))), Some(Event::ToggleTimer));
        assert_eq!(convert(key(KeyCode::Char('r'))), Some(Event::ResetTimer));
        assert_eq!(convert(key(KeyCode::Char('i'))), Some(Event::ToggleInfo));
        assert_eq!(convert(key(KeyCode::Char('q'))), Some(Event::Quit));
        assert_eq!(convert(key(KeyCode::Esc)), Some(Event::CloseInfo));
        assert_eq!(
            convert(key(KeyCode::Up)),
            Some(Event::AdjustDuration(Session::Work, Adjustment::Extend))
        );
        assert_eq!(
            convert(key(KeyCode::Down)),
            Some(Event::AdjustDuration(Session::Work, Adjustment::Reduce))
        );
        assert_eq!(convert(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = CrosstermEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(convert(event), Some(Event::Quit));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let event = CrosstermEvent::Key(KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });

        assert_eq!(convert(event), None);
    }

    #[test]
    fn test_mouse_scroll_adjusts_work_duration() {
        let scroll = |kind| {
            CrosstermEvent::Mouse(MouseEvent {
                kind,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            })
        };

        assert_eq!(
            convert(scroll(MouseEventKind::ScrollUp)),
            Some(Event::AdjustDuration(Session::Work, Adjustment::Extend))
        );
        assert_eq!(
            convert(scroll(MouseEventKind::ScrollDown)),
            Some(Event::AdjustDuration(Session::Work, Adjustment::Reduce))
        );
    }

    #[test]
    fn test_resize_redraws() {
        assert_eq!(convert(CrosstermEvent::Resize(80, 24)), Some(Event::Redraw));
    }

    #[test]
    fn test_visuals_from_state() {
        let mut state = PomodoroState::default();
        let visuals = TimerVisuals::from(&state);
        assert!(visuals.timer_is_paused);
        assert_eq!(visuals.session, Session::Work);
        assert_eq!(visuals.time_remaining.to_string(), "25:00");

        state.start();
        assert!(!TimerVisuals::from(&state).timer_is_paused);
    }
}
