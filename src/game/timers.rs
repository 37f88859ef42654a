//! Scheduled actions for a running session.
//!
//! Three slots, one per timer kind: the question clock, the post-answer
//! advance and the category countdown. After every transition the host calls
//! [`SessionTimers::sync`], which aborts each slot that no longer matches the
//! snapshot before arming a new one. Every armed task stamps its events with
//! an epoch, and [`SessionTimers::accept`] drops events from slots that were
//! cancelled after the event was already queued.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use uuid::Uuid;

use crate::config::TimerConfig;

use super::state::{Phase, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Tick,
    Advance,
    Countdown,
}

/// Event emitted by an armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { epoch: u64 },
    Advance { epoch: u64 },
    /// `remaining == 0` means the countdown is over.
    Countdown { epoch: u64, remaining: u32 },
}

impl TimerEvent {
    pub fn kind(&self) -> TimerKind {
        match self {
            TimerEvent::Tick { .. } => TimerKind::Tick,
            TimerEvent::Advance { .. } => TimerKind::Advance,
            TimerEvent::Countdown { .. } => TimerKind::Countdown,
        }
    }

    fn epoch(&self) -> u64 {
        match self {
            TimerEvent::Tick { epoch }
            | TimerEvent::Advance { epoch }
            | TimerEvent::Countdown { epoch, .. } => *epoch,
        }
    }
}

/// Which question a slot was armed for.
type SlotKey = (Uuid, usize);

struct Armed {
    key: SlotKey,
    epoch: u64,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Slot {
    armed: Option<Armed>,
}

impl Slot {
    fn cancel(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.handle.abort();
        }
    }

    /// Keep the slot only if it is wanted for `key`.
    fn retain(&mut self, wanted: bool, key: SlotKey) -> bool {
        let still_valid = wanted && self.armed.as_ref().is_some_and(|a| a.key == key);
        if !still_valid {
            self.cancel();
        }
        still_valid
    }

    fn epoch(&self) -> Option<u64> {
        self.armed.as_ref().map(|a| a.epoch)
    }
}

pub struct SessionTimers {
    config: TimerConfig,
    tx: mpsc::UnboundedSender<TimerEvent>,
    next_epoch: u64,
    tick: Slot,
    advance: Slot,
    countdown: Slot,
}

impl SessionTimers {
    /// Create the timer slots and the receiving end of their event queue.
    ///
    /// The countdown always runs at least one step, so a transition is
    /// always continued by a final `remaining == 0` event.
    pub fn new(mut config: TimerConfig) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        config.countdown_steps = config.countdown_steps.max(1);
        let (tx, rx) = mpsc::unbounded_channel();
        let timers = Self {
            config,
            tx,
            next_epoch: 0,
            tick: Slot::default(),
            advance: Slot::default(),
            countdown: Slot::default(),
        };
        (timers, rx)
    }

    /// Bring the armed timers in line with `session`. Must run inside a
    /// tokio runtime.
    pub fn sync(&mut self, session: &Session) {
        let key = (session.session_id, session.question_index);
        let playing = session.phase == Phase::Playing;

        if !self.tick.retain(playing && !session.answered, key) && playing && !session.answered {
            let epoch = self.bump();
            let handle = tokio::spawn(run_clock(self.tx.clone(), epoch, self.config.tick_interval));
            self.tick.armed = Some(Armed { key, epoch, handle });
            tracing::debug!(epoch, question = key.1, "armed question clock");
        }

        if !self.advance.retain(playing && session.answered, key) && playing && session.answered {
            let epoch = self.bump();
            let handle = tokio::spawn(run_advance(self.tx.clone(), epoch, self.config.advance_delay));
            self.advance.armed = Some(Armed { key, epoch, handle });
            tracing::debug!(epoch, question = key.1, "armed advance");
        }

        let transition = session.phase == Phase::CategoryTransition;
        if !self.countdown.retain(transition, key) && transition {
            let epoch = self.bump();
            let handle = tokio::spawn(run_countdown(
                self.tx.clone(),
                epoch,
                self.config.countdown_steps,
                self.config.countdown_step,
            ));
            self.countdown.armed = Some(Armed { key, epoch, handle });
            tracing::debug!(epoch, question = key.1, "armed category countdown");
        }
    }

    /// Whether `event` comes from a timer that is still armed.
    pub fn accept(&self, event: &TimerEvent) -> bool {
        let slot = match event.kind() {
            TimerKind::Tick => &self.tick,
            TimerKind::Advance => &self.advance,
            TimerKind::Countdown => &self.countdown,
        };
        slot.epoch() == Some(event.epoch())
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        match kind {
            TimerKind::Tick => self.tick.armed.is_some(),
            TimerKind::Advance => self.advance.armed.is_some(),
            TimerKind::Countdown => self.countdown.armed.is_some(),
        }
    }

    pub fn countdown_steps(&self) -> u32 {
        self.config.countdown_steps
    }

    pub fn cancel_all(&mut self) {
        self.tick.cancel();
        self.advance.cancel();
        self.countdown.cancel();
    }

    fn bump(&mut self) -> u64 {
        self.next_epoch += 1;
        self.next_epoch
    }
}

impl Drop for SessionTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

async fn run_clock(tx: mpsc::UnboundedSender<TimerEvent>, epoch: u64, period: std::time::Duration) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    loop {
        interval.tick().await;
        if tx.send(TimerEvent::Tick { epoch }).is_err() {
            break;
        }
    }
}

async fn run_advance(tx: mpsc::UnboundedSender<TimerEvent>, epoch: u64, delay: std::time::Duration) {
    time::sleep(delay).await;
    let _ = tx.send(TimerEvent::Advance { epoch });
}

async fn run_countdown(
    tx: mpsc::UnboundedSender<TimerEvent>,
    epoch: u64,
    steps: u32,
    step: std::time::Duration,
) {
    for remaining in (0..steps).rev() {
        time::sleep(step).await;
        if tx.send(TimerEvent::Countdown { epoch, remaining }).is_err() {
            break;
        }
    }
}
