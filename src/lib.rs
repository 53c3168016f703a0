// Library surface for the binary, headless runs and integration tests.
// Terminal rendering stays in the binary.
pub mod app_dirs;
pub mod clock;
pub mod controller;
pub mod game;
pub mod logging;
pub mod runtime;
pub mod timer;
pub mod word_bank;

pub use controller::Game;
pub use word_bank::WordBank;
