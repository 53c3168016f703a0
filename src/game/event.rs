use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::session::GameSession;
use crate::word_bank::WordBank;

/// Everything the view (or the clock) can ask of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SelectTheme(String),
    /// The full contents of the input box after a change.
    Input(String),
    Commit,
    Tick,
    Reset,
}

/// What a transition may read besides the session itself.
pub struct Context<'a, R: Rng + ?Sized> {
    pub bank: &'a WordBank,
    pub rng: &'a mut R,
    pub now_ms: u64,
}

impl<'a, R: Rng + ?Sized> Context<'a, R> {
    pub fn new(bank: &'a WordBank, rng: &'a mut R, now_ms: u64) -> Self {
        Self { bank, rng, now_ms }
    }
}

pub fn dispatch<R: Rng + ?Sized>(
    session: GameSession,
    event: &GameEvent,
    ctx: &mut Context<'_, R>,
) -> GameSession {
    trace!("dispatch {event:?} in phase {}", session.phase);

    match event {
        GameEvent::SelectTheme(theme) => session.start(ctx.bank, theme, ctx.rng, ctx.now_ms),
        GameEvent::Input(value) => {
            session.apply_input(ctx.bank, value.clone(), ctx.rng, ctx.now_ms)
        }
        GameEvent::Commit => session.commit(ctx.bank, ctx.rng, ctx.now_ms),
        GameEvent::Tick => session.tick(),
        GameEvent::Reset => session.reset(),
    }
}
