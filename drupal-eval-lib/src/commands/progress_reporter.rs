use crate::pipeline::Progress;
use core::fmt::{Debug, Formatter};
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tokio::task::JoinHandle;

/// Refresh rate for progress updates (10 Hz).
const REFRESH_INTERVAL_MS: u64 = 100;

const TEMPLATE: &str = "{prefix:>12.bold.cyan} [{spinner}] {msg}";
const TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{spinner}] {msg}";

const TICK_STRINGS: &[&str] = &[
    ">          ",
    "=>         ",
    "==>        ",
    "===>       ",
    " ===>      ",
    "  ===>     ",
    "   ===>    ",
    "    ===>   ",
    "     ===>  ",
    "      ===> ",
    "       ===>",
    "        ===",
    "         ==",
    "          =",
    "           ",
    "          <",
    "         <=",
    "        <==",
    "       <===",
    "      <=== ",
    "     <===  ",
    "    <===   ",
    "   <===    ",
    "  <===     ",
    " <===      ",
    "<===       ",
    "===        ",
    "==         ",
    "=          ",
    "           ",
];

#[derive(Debug)]
struct DelayedProgressState {
    visible_after: Instant,
    visible: AtomicBool,
    phase_start_time: Mutex<Instant>,
}

/// A spinner that delays showing itself until an evaluation has run for a while.
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    state: Arc<DelayedProgressState>,
    message: Arc<Mutex<String>>,
    refresh_task: Arc<JoinHandle<()>>,
}

impl ProgressReporter {
    /// Create a new progress reporter.
    ///
    /// When `use_colors` is false, the spinner is rendered without ANSI styling.
    #[must_use]
    pub fn new(delay: Duration, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_draw_target(ProgressDrawTarget::hidden());

        let template = if use_colors { TEMPLATE } else { TEMPLATE_NO_COLOR };
        if let Ok(style) = ProgressStyle::default_spinner().template(template) {
            bar.set_style(style.tick_strings(TICK_STRINGS));
        }
        bar.enable_steady_tick(Duration::from_millis(REFRESH_INTERVAL_MS));

        let state = Arc::new(DelayedProgressState {
            visible_after: Instant::now() + delay,
            visible: AtomicBool::new(false),
            phase_start_time: Mutex::new(Instant::now()),
        });
        let message = Arc::new(Mutex::new(String::new()));

        Self {
            refresh_task: Arc::new(tokio::spawn(refresh_task(bar.clone(), Arc::clone(&state), Arc::clone(&message)))),
            bar,
            state,
            message,
        }
    }
}

impl Progress for ProgressReporter {
    fn set_phase(&self, phase: &str) {
        self.bar.set_prefix(phase.to_string());
        *self.state.phase_start_time.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    fn set_message(&self, message: &str) {
        message.clone_into(&mut self.message.lock().unwrap_or_else(PoisonError::into_inner));
    }

    fn done(&self) {
        self.refresh_task.abort();
        if self.state.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}

impl Debug for ProgressReporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("bar", &self.bar)
            .field("state", &self.state)
            .field("message", &self.message)
            .field("refresh_task", &"<task>")
            .finish()
    }
}

/// Background refresh task that periodically updates the spinner's message.
async fn refresh_task(bar: ProgressBar, state: Arc<DelayedProgressState>, message: Arc<Mutex<String>>) {
    let mut interval = tokio::time::interval(Duration::from_millis(REFRESH_INTERVAL_MS));
    #[expect(clippy::infinite_loop, reason = "task runs until aborted")]
    loop {
        let _ = interval.tick().await;

        if !state.visible.load(Ordering::Relaxed) && Instant::now() >= state.visible_after {
            state.visible.store(true, Ordering::Relaxed);
            bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }

        if state.visible.load(Ordering::Relaxed) {
            let elapsed_secs = state.phase_start_time.lock().unwrap_or_else(PoisonError::into_inner).elapsed().as_secs();
            let current = message.lock().unwrap_or_else(PoisonError::into_inner).clone();
            bar.set_message(format!("{elapsed_secs}s: {current}"));
        }
    }
}
