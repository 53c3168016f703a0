use std::mem;
use std::time::Duration;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::clock::{Clock, SystemClock};
use crate::game::{dispatch, Context, GameEvent, GameSession};
use crate::timer::Countdown;
use crate::word_bank::{Theme, WordBank};

/// Owns a round and everything needed to advance it.
///
/// The session itself is a plain value run through [`dispatch`]; this type
/// supplies the clock reading and RNG, and keeps the countdown armed exactly
/// while the session is playing.
#[derive(Debug)]
pub struct Game<C: Clock = SystemClock> {
    bank: WordBank,
    session: GameSession,
    rng: StdRng,
    clock: C,
    countdown: Countdown,
}

impl Game<SystemClock> {
    /// `seed` makes the word sequence reproducible; `None` seeds from the OS.
    pub fn new(bank: WordBank, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                info!("word rng seeded with {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self::with_clock(bank, rng, SystemClock::new())
    }
}

impl<C: Clock> Game<C> {
    pub fn with_clock(bank: WordBank, rng: StdRng, clock: C) -> Self {
        Self {
            bank,
            session: GameSession::default(),
            rng,
            clock,
            countdown: Countdown::new(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    /// The theme of the current round, if one was chosen.
    pub fn theme(&self) -> Option<&Theme> {
        self.session
            .theme
            .as_deref()
            .and_then(|key| self.bank.get(key))
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Wait until the countdown next fires, `None` while it is disarmed.
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.countdown
            .ms_until_next(self.clock.now_ms())
            .map(Duration::from_millis)
    }

    pub fn dispatch(&mut self, event: GameEvent) -> &GameSession {
        let now_ms = self.clock.now_ms();
        let before = mem::take(&mut self.session);
        let was_playing = before.is_playing();
        let prior = before.clone();

        let mut ctx = Context::new(&self.bank, &mut self.rng, now_ms);
        self.session = dispatch(before, &event, &mut ctx);

        let restarted = matches!(event, GameEvent::SelectTheme(_))
            && self.session.is_playing()
            && self.session != prior;
        self.sync_countdown(was_playing, restarted, now_ms);

        &self.session
    }

    /// Deliver any countdown ticks that have come due. Returns how many were applied.
    pub fn pump_timer(&mut self) -> u32 {
        let now_ms = self.clock.now_ms();
        let due = self.countdown.poll(now_ms);

        let mut applied = 0;
        for _ in 0..due {
            if !self.session.is_playing() {
                break;
            }
            self.dispatch(GameEvent::Tick);
            applied += 1;
        }
        applied
    }

    fn sync_countdown(&mut self, was_playing: bool, restarted: bool, now_ms: u64) {
        match (self.session.is_playing(), was_playing) {
            (true, false) => self.countdown.arm(now_ms),
            (true, true) if restarted => self.countdown.arm(now_ms),
            (false, true) => {
                debug!("left playing as {}", self.session.phase);
                self.countdown.disarm();
            }
            _ => {}
        }
    }
}
