use crate::event::Event;
use crate::pomodoro::{Adjustment, Session, State};
use crate::tui::{TimerVisuals, Tui, TuiError};
use std::ops::Deref;
use std::time::Duration;
use thiserror::Error;
use tokio::select;
use tokio::time::{interval_at, Instant, Interval};
use tracing::{debug, error, info, trace};
use url::Url;

const TICK_PERIOD: Duration = Duration::from_secs(1);

pub struct App {
    controller: Controller,
    tui: Tui,
    info_url: Url,
}

impl App {
    pub fn new(pomodoro_state: State, info_url: Url) -> Result<Self, UnrecoverableError> {
        let tui = Tui::new()?;

        Ok(Self {
            controller: Controller::new(Timer::new(pomodoro_state)),
            tui,
            info_url,
        })
    }

    pub async fn run(&mut self) -> Result<(), UnrecoverableError> {
        self.tui.enable()?;
        let maybe_err = self.run_inner().await;
        let restored = self.tui.disable();

        run_outcome(maybe_err, restored)
    }

    async fn run_inner(&mut self) -> Result<(), UnrecoverableError> {
        info!(state = %self.controller.timer.state(), "timer ready");

        loop {
            let visuals = TimerVisuals::from(self.controller.timer.state());
            let info_url = self.controller.info_is_open().then_some(&self.info_url);
            self.tui.render(&visuals, info_url)?;

            select! {
                next_session = self.controller.timer.tick() => {
                    if let Some(session) = next_session {
                        info!(%session, "session finished, switching");
                    }
                }
                tui_event = self.tui.read_event() => {
                    let event = tui_event?;
                    if *self.controller.handle_event(event) {
                        break;
                    }
                }
            }
        }

        info!("quitting");
        Ok(())
    }
}

/// Routes user events to the timer. The info dialog is modal: while it is open
/// only closing it or quitting has an effect.
pub struct Controller {
    timer: Timer,
    info_is_open: bool,
}

impl Controller {
    pub fn new(timer: Timer) -> Self {
        Self {
            timer,
            info_is_open: false,
        }
    }

    pub fn info_is_open(&self) -> bool {
        self.info_is_open
    }

    pub fn handle_event(&mut self, event: Event) -> AppShouldQuit {
        match event {
            Event::Quit => return AppShouldQuit(true),
            Event::Redraw => (),
            Event::ToggleInfo => self.info_is_open = !self.info_is_open,
            Event::CloseInfo => self.info_is_open = false,
            _ if self.info_is_open => debug!(?event, "ignored while info dialog is open"),
            Event::ToggleTimer => self.timer.toggle(),
            Event::ResetTimer => self.timer.reset(),
            Event::AdjustDuration(session, adjustment) => {
                self.timer.adjust_duration(session, adjustment)
            }
        }

        AppShouldQuit(false)
    }
}

/// Pomodoro state together with the ticker that drives its countdown.
///
/// The ticker is armed exactly while the state is running.
pub struct Timer {
    state: State,
    ticker: Ticker,
}

impl Timer {
    pub fn new(state: State) -> Self {
        let mut timer = Self {
            state,
            ticker: Ticker::new(TICK_PERIOD),
        };
        if timer.state.timer_is_active() {
            timer.ticker.arm();
        }
        timer
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn start(&mut self) {
        if self.ticker.is_armed() {
            debug!("timer already running");
            return;
        }
        self.state.start();
        self.ticker.arm();
        info!(state = %self.state, "timer started");
    }

    pub fn pause(&mut self) {
        self.ticker.disarm();
        self.state.pause();
        info!(state = %self.state, "timer paused");
    }

    pub fn toggle(&mut self) {
        if self.state.timer_is_active() {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.ticker.disarm();
        self.state.reset();
        info!(state = %self.state, "timer reset");
    }

    /// Adjusting the running session restarts its countdown, so the next tick
    /// is a full second away.
    pub fn adjust_duration(&mut self, session: Session, adjustment: Adjustment) {
        self.state.adjust_duration(session, adjustment);
        if self.state.timer_is_active() && session == self.state.current_session() {
            self.ticker.disarm();
            self.ticker.arm();
        }
        debug!(
            %session,
            ?adjustment,
            duration = %self.state.duration_of(session),
            "session duration adjusted"
        );
    }

    /// Waits for the next tick and applies it, returning the session that
    /// began if the countdown ran out. Never completes while the timer is not
    /// running. Cancel safe.
    pub async fn tick(&mut self) -> Option<Session> {
        self.ticker.tick().await;
        let next_session = self.state.tick();
        trace!(remaining = %self.state.time_remaining(), "tick");
        next_session
    }
}

/// A recurring one second timer that is either armed or released.
pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// First tick is due one period from now. Arming an armed ticker keeps the
    /// schedule it already has.
    pub fn arm(&mut self) {
        if self.interval.is_none() {
            self.interval = Some(interval_at(Instant::now() + self.period, self.period));
        }
    }

    pub fn disarm(&mut self) {
        self.interval = None;
    }

    pub async fn tick(&mut self) {
        match &mut self.interval {
            Some(interval) => {
                interval.tick().await;
            }
            None => futures::future::pending::<()>().await,
        }
    }
}

/// An error from the run loop takes precedence over failing to restore the
/// terminal afterwards, which is then only logged.
fn run_outcome(
    run: Result<(), UnrecoverableError>,
    restore: Result<(), TuiError>,
) -> Result<(), UnrecoverableError> {
    match (run, restore) {
        (Err(err), Err(restore_err)) => {
            error!("failed to restore terminal: {restore_err}");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), restore) => Ok(restore?),
    }
}

pub struct AppShouldQuit(bool);

impl Deref for AppShouldQuit {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Represents errors the app has no control over.
#[derive(Debug, Error)]
pub enum UnrecoverableError {
    #[error("error while interfacing with the terminal: {0}")]
    Tui(#[from] TuiError),
}
