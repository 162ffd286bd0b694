//! Work/break session state machine.
//!
//! A cycle alternates work and break intervals until the configured number
//! of breaks has been taken:
//!
//! ```text
//! Idle -> Working -> Idle(StartBreak) -> OnBreak -> Idle(ResumeWork) -> Working -> ...
//!      ... -> OnBreak -> (completed breaks == target) -> CycleFinished -> Idle(StartWork)
//! ```
//!
//! Every countdown is tied to a [`CountdownToken`]. Starting or cancelling a
//! countdown bumps the generation, so ticks carrying an older token are
//! ignored.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::durations::{
    break_seconds, work_seconds, DEFAULT_BREAK_COUNT, DEFAULT_BREAK_LABEL, DEFAULT_WORK_LABEL,
};
use super::format::format_elapsed;

/// What the session is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No countdown is running.
    Idle,
    /// A work interval is counting down.
    Working,
    /// A break interval is counting down.
    OnBreak,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Working => write!(f, "Working"),
            Self::OnBreak => write!(f, "On break"),
        }
    }
}

/// Which start operation is valid while the session is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    /// No cycle in progress.
    StartWork,
    /// A work interval just finished.
    StartBreak,
    /// A break just finished and the cycle continues.
    ResumeWork,
}

impl NextStep {
    /// Label for the primary action button.
    #[must_use]
    pub const fn action_label(&self) -> &'static str {
        match self {
            Self::StartWork => "Start work",
            Self::StartBreak => "Start break",
            Self::ResumeWork => "Resume work",
        }
    }
}

/// Handle for one running countdown.
///
/// The clock hands this back with every tick. Once the countdown finishes or
/// the session is reset, the token is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownToken {
    generation: u64,
}

/// Kind of lifecycle event emitted when an interval ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A work interval reached zero.
    WorkFinished,
    /// A break interval reached zero.
    BreakFinished,
    /// The last break of the cycle reached zero; the session was reset.
    CycleFinished,
}

impl EventKind {
    /// Alert title for this event.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::WorkFinished => "Work finished",
            Self::BreakFinished => "Break finished",
            Self::CycleFinished => "Cycle finished",
        }
    }
}

/// Time accumulated over the current cycle, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElapsedSummary {
    /// Seconds of work started this cycle.
    pub work_seconds: u64,
    /// Seconds of break started this cycle.
    pub break_seconds: u64,
}

impl ElapsedSummary {
    /// Work plus break seconds.
    #[must_use]
    pub const fn total_seconds(&self) -> u64 {
        self.work_seconds + self.break_seconds
    }
}

/// A lifecycle event. Collaborators should request the user's attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// What happened.
    pub kind: EventKind,
    /// Accumulated durations at the moment of the event.
    pub summary: ElapsedSummary,
    /// Breaks completed at the moment of the event.
    pub completed_breaks: u32,
}

impl SessionEvent {
    /// Alert body for this event.
    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            EventKind::WorkFinished => "The work interval is over.".to_string(),
            EventKind::BreakFinished => "The break is over.".to_string(),
            EventKind::CycleFinished => format!(
                "Well done!\nTotal: {}\nWork:  {}\nBreak: {}",
                format_elapsed(self.summary.total_seconds()),
                format_elapsed(self.summary.work_seconds),
                format_elapsed(self.summary.break_seconds),
            ),
        }
    }
}

/// Interval lengths and cycle size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Work interval length in seconds.
    pub work_seconds: u32,
    /// Break interval length in seconds.
    pub break_seconds: u32,
    /// Breaks that make up one cycle.
    pub target_break_count: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            work_seconds: work_seconds(DEFAULT_WORK_LABEL),
            break_seconds: break_seconds(DEFAULT_BREAK_LABEL),
            target_break_count: DEFAULT_BREAK_COUNT,
        }
    }
}

/// Read-only view of the session for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// Start operation valid while idle.
    pub next_step: NextStep,
    /// Seconds left in the running interval.
    pub remaining_seconds: u32,
    /// Length of the running interval.
    pub interval_seconds: u32,
    /// Breaks completed in this cycle.
    pub completed_breaks: u32,
    /// Current selections.
    pub settings: SessionSettings,
    /// Accumulated durations.
    pub summary: ElapsedSummary,
}

impl SessionSnapshot {
    /// Fraction of the running interval already elapsed (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.phase == Phase::Idle || self.interval_seconds == 0 {
            return 0.0;
        }
        1.0 - f64::from(self.remaining_seconds) / f64::from(self.interval_seconds)
    }
}

/// The work/break interval state machine.
#[derive(Debug, Clone)]
pub struct SessionCore {
    defaults: SessionSettings,
    settings: SessionSettings,
    phase: Phase,
    next_step: NextStep,
    remaining_seconds: u32,
    interval_seconds: u32,
    completed_breaks: u32,
    accumulated_work_seconds: u64,
    accumulated_break_seconds: u64,
    generation: u64,
}

impl Default for SessionCore {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl SessionCore {
    /// Create an idle session with the given default selections.
    #[must_use]
    pub const fn new(defaults: SessionSettings) -> Self {
        Self {
            defaults,
            settings: defaults,
            phase: Phase::Idle,
            next_step: NextStep::StartWork,
            remaining_seconds: 0,
            interval_seconds: 0,
            completed_breaks: 0,
            accumulated_work_seconds: 0,
            accumulated_break_seconds: 0,
            generation: 0,
        }
    }

    /// Start a work interval.
    ///
    /// Valid before a cycle starts and after a break finished. Returns `None`
    /// (and changes nothing) while a countdown runs or a break is due.
    pub fn start_work(&mut self) -> Option<CountdownToken> {
        if self.phase != Phase::Idle {
            debug!("start_work ignored: {} in progress", self.phase);
            return None;
        }
        if self.next_step == NextStep::StartBreak {
            debug!("start_work ignored: a break is due");
            return None;
        }

        self.phase = Phase::Working;
        self.remaining_seconds = self.settings.work_seconds;
        self.interval_seconds = self.settings.work_seconds;
        self.accumulated_work_seconds += u64::from(self.settings.work_seconds);
        info!("Work interval started ({}s)", self.settings.work_seconds);
        Some(self.next_token())
    }

    /// Start a break interval.
    ///
    /// Valid only right after a work interval finished.
    pub fn start_break(&mut self) -> Option<CountdownToken> {
        if self.phase != Phase::Idle || self.next_step != NextStep::StartBreak {
            debug!(
                "start_break ignored: phase {}, next step {:?}",
                self.phase, self.next_step
            );
            return None;
        }

        self.phase = Phase::OnBreak;
        self.remaining_seconds = self.settings.break_seconds;
        self.interval_seconds = self.settings.break_seconds;
        self.accumulated_break_seconds += u64::from(self.settings.break_seconds);
        info!("Break interval started ({}s)", self.settings.break_seconds);
        Some(self.next_token())
    }

    /// Advance the running countdown by one second.
    ///
    /// Returns the events emitted by this tick, in order. A finished break
    /// that completes the cycle yields `BreakFinished` then `CycleFinished`
    /// and leaves the session reset.
    pub fn tick(&mut self, token: CountdownToken) -> Vec<SessionEvent> {
        if token.generation != self.generation {
            debug!("Ignoring tick from cancelled countdown");
            return Vec::new();
        }
        if self.phase == Phase::Idle {
            return Vec::new();
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return Vec::new();
        }

        self.finish_interval()
    }

    fn finish_interval(&mut self) -> Vec<SessionEvent> {
        let finished = self.phase;
        self.phase = Phase::Idle;
        self.interval_seconds = 0;
        // The countdown is over; its token must not drive another interval.
        self.generation += 1;

        match finished {
            Phase::Working => {
                self.next_step = NextStep::StartBreak;
                info!("Work interval finished");
                vec![self.event(EventKind::WorkFinished)]
            }
            Phase::OnBreak => {
                self.completed_breaks += 1;
                info!(
                    "Break finished ({}/{})",
                    self.completed_breaks, self.settings.target_break_count
                );
                let mut events = vec![self.event(EventKind::BreakFinished)];

                if self.completed_breaks >= self.settings.target_break_count {
                    events.push(self.event(EventKind::CycleFinished));
                    info!("Cycle finished");
                    self.reset();
                } else {
                    self.next_step = NextStep::ResumeWork;
                }
                events
            }
            Phase::Idle => Vec::new(),
        }
    }

    /// Cancel any countdown and return to the initial state.
    ///
    /// Clears counters and accumulators and restores the default selections.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.settings = self.defaults;
        self.phase = Phase::Idle;
        self.next_step = NextStep::StartWork;
        self.remaining_seconds = 0;
        self.interval_seconds = 0;
        self.completed_breaks = 0;
        self.accumulated_work_seconds = 0;
        self.accumulated_break_seconds = 0;
        debug!("Session reset");
    }

    /// Set the work interval length. Returns whether it was applied.
    pub fn set_work_duration(&mut self, seconds: u32) -> bool {
        self.configure(|s| s.work_seconds = seconds)
    }

    /// Set the break interval length. Returns whether it was applied.
    pub fn set_break_duration(&mut self, seconds: u32) -> bool {
        self.configure(|s| s.break_seconds = seconds)
    }

    /// Set the number of breaks per cycle. Returns whether it was applied.
    ///
    /// Zero is rejected.
    pub fn set_target_break_count(&mut self, count: u32) -> bool {
        if count == 0 {
            debug!("Rejecting zero break count");
            return false;
        }
        self.configure(|s| s.target_break_count = count)
    }

    fn configure(&mut self, apply: impl FnOnce(&mut SessionSettings)) -> bool {
        if !self.is_configurable() {
            debug!("Configuration change rejected: cycle in progress");
            return false;
        }
        apply(&mut self.settings);
        true
    }

    /// Whether settings can be changed (idle with no cycle in progress).
    #[must_use]
    pub const fn is_configurable(&self) -> bool {
        matches!(self.phase, Phase::Idle) && matches!(self.next_step, NextStep::StartWork)
    }

    /// Whether a countdown is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Start operation valid while idle.
    #[must_use]
    pub const fn next_step(&self) -> NextStep {
        self.next_step
    }

    /// Seconds left in the running interval.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Breaks completed in this cycle.
    #[must_use]
    pub const fn completed_breaks(&self) -> u32 {
        self.completed_breaks
    }

    /// Current selections.
    #[must_use]
    pub const fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Accumulated work and break time.
    #[must_use]
    pub const fn summary(&self) -> ElapsedSummary {
        ElapsedSummary {
            work_seconds: self.accumulated_work_seconds,
            break_seconds: self.accumulated_break_seconds,
        }
    }

    /// Copy of the full state.
    #[must_use]
    pub const fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            next_step: self.next_step,
            remaining_seconds: self.remaining_seconds,
            interval_seconds: self.interval_seconds,
            completed_breaks: self.completed_breaks,
            settings: self.settings,
            summary: self.summary(),
        }
    }

    fn next_token(&mut self) -> CountdownToken {
        self.generation += 1;
        CountdownToken {
            generation: self.generation,
        }
    }

    const fn event(&self, kind: EventKind) -> SessionEvent {
        SessionEvent {
            kind,
            summary: self.summary(),
            completed_breaks: self.completed_breaks,
        }
    }
}
