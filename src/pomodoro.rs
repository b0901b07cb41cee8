use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// No session may be configured shorter than this.
pub const MIN_SESSION_DURATION: SessionDuration = SessionDuration(Duration::from_secs(60));

/// Amount by which a single adjustment extends or reduces a session.
pub const ADJUSTMENT_STEP: Duration = Duration::from_secs(60);

const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    work_duration: SessionDuration,
    break_duration: SessionDuration,
    time_remaining: SessionDuration,
    session: Session,
    status: Status,
}

impl State {
    pub fn new(settings: Settings) -> State {
        let work_duration = settings.work_duration.max(MIN_SESSION_DURATION);
        let break_duration = settings.break_duration.max(MIN_SESSION_DURATION);

        State {
            work_duration,
            break_duration,
            time_remaining: work_duration,
            session: Session::Work,
            status: Status::Idle,
        }
    }

    pub fn time_remaining(&self) -> SessionDuration {
        self.time_remaining
    }

    pub fn current_session(&self) -> Session {
        self.session
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn timer_is_active(&self) -> bool {
        self.status == Status::Running
    }

    pub fn duration_of(&self, session: Session) -> SessionDuration {
        match session {
            Session::Work => self.work_duration,
            Session::Break => self.break_duration,
        }
    }

    /// Share of the current session that has already elapsed, in `0.0..=1.0`.
    pub fn progress_percentage(&self) -> f64 {
        let total = self.duration_of(self.session).as_secs_f64();
        let remaining = self.time_remaining.as_secs_f64();

        (1.0 - remaining / total).clamp(0.0, 1.0)
    }

    pub fn start(&mut self) {
        self.status = self.status.next(Transition::Start);
    }

    pub fn pause(&mut self) {
        self.status = self.status.next(Transition::Pause);
    }

    pub fn reset(&mut self) {
        self.status = self.status.next(Transition::Reset);
        self.session = Session::Work;
        self.time_remaining = self.work_duration;
    }

    /// Counts down one second of the running session.
    ///
    /// When the countdown reaches zero the other session begins right away and
    /// is returned. Does nothing unless the timer is running.
    pub fn tick(&mut self) -> Option<Session> {
        if !self.timer_is_active() {
            return None;
        }

        self.time_remaining = SessionDuration(self.time_remaining.saturating_sub(TICK));
        if !self.time_remaining.is_zero() {
            return None;
        }

        self.session = self.session.other();
        self.time_remaining = self.duration_of(self.session);
        Some(self.session)
    }

    pub fn adjust_duration(&mut self, session: Session, adjustment: Adjustment) {
        let duration = match session {
            Session::Work => &mut self.work_duration,
            Session::Break => &mut self.break_duration,
        };
        *duration = duration.adjusted(adjustment);

        if session == self.session {
            self.time_remaining = *duration;
        }
    }
}

impl Default for State {
    fn default() -> Self {
        State::new(Settings::default())
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.session, self.time_remaining, self.status)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Session {
    Work,
    Break,
}

impl Session {
    pub fn other(self) -> Session {
        match self {
            Session::Work => Session::Break,
            Session::Break => Session::Work,
        }
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Session::Work => write!(f, "work"),
            Session::Break => write!(f, "break"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Paused,
}

impl Status {
    pub fn next(self, transition: Transition) -> Status {
        match (self, transition) {
            (_, Transition::Reset) => Status::Idle,
            (Status::Idle | Status::Paused, Transition::Start) => Status::Running,
            (Status::Running, Transition::Pause) => Status::Paused,
            (status, _) => status,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Idle => write!(f, "idle"),
            Status::Running => write!(f, "running"),
            Status::Paused => write!(f, "paused"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Start,
    Pause,
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adjustment {
    Extend,
    Reduce,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub work_duration: SessionDuration,
    pub break_duration: SessionDuration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            work_duration: SessionDuration::from_mins(25),
            break_duration: SessionDuration::from_mins(5),
        }
    }
}

/// A session length in whole seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionDuration(pub Duration);

impl SessionDuration {
    pub const fn from_secs(secs: u64) -> Self {
        SessionDuration(Duration::from_secs(secs))
    }

    pub const fn from_mins(mins: u64) -> Self {
        SessionDuration(Duration::from_secs(mins * 60))
    }

    fn adjusted(self, adjustment: Adjustment) -> Self {
        let duration = match adjustment {
            Adjustment::Extend => self.0.saturating_add(ADJUSTMENT_STEP),
            Adjustment::Reduce => self.0.saturating_sub(ADJUSTMENT_STEP),
        };

        SessionDuration(duration).max(MIN_SESSION_DURATION)
    }
}

impl Deref for SessionDuration {
    type Target = Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Duration> for SessionDuration {
    fn from(duration: Duration) -> Self {
        SessionDuration(duration)
    }
}

impl Display for SessionDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_time(self.0.as_secs()))
    }
}

/// Formats seconds as zero-padded `MM:SS`. There is no hour component.
pub fn format_time(seconds: u64) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[derive(Debug, Error)]
pub enum ParseSessionDurationError {
    #[error("expected \"minutes\" or \"minutes:seconds\"")]
    InvalidFormat,
    #[error("seconds must be less than 60")]
    TooManySeconds,
    #[error("seconds must be two digits")]
    NotTwoDigitsForSeconds,
    #[error("failed to parse integer: {0}")]
    ParseIntError(#[from] std::num::ParseIntError),
    #[error("sessions must last at least one minute")]
    TooShort,
    #[error("session is too long")]
    TooLong,
}

impl FromStr for SessionDuration {
    type Err = ParseSessionDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let minutes = parts[0].parse::<u64>()?;

        let minutes_in_secs = minutes
            .checked_mul(60)
            .ok_or(ParseSessionDurationError::TooLong)?;

        match parts[..] {
            [_] => Ok(SessionDuration::from_secs(minutes_in_secs)),
            [_, seconds_str] => {
                let seconds = seconds_str.parse::<u64>()?;
                if seconds > 59 {
                    return Err(ParseSessionDurationError::TooManySeconds);
                } else if seconds_str.len() != 2 {
                    return Err(ParseSessionDurationError::NotTwoDigitsForSeconds);
                }

                let secs = minutes_in_secs
                    .checked_add(seconds)
                    .ok_or(ParseSessionDurationError::TooLong)?;
                Ok(SessionDuration::from_secs(secs))
            }
            _ => Err(ParseSessionDurationError::InvalidFormat),
        }
    }
}

/// Parses a session length and rejects anything below the one minute floor.
pub fn parse_session_duration(s: &str) -> Result<SessionDuration, ParseSessionDurationError> {
    let duration: SessionDuration = s.parse()?;
    if duration < MIN_SESSION_DURATION {
        return Err(ParseSessionDurationError::TooShort);
    }

    Ok(duration)
}
