pub use board::*;
pub use cell::*;
pub use clock::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use session::*;
pub use shell::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod clock;
mod config;
mod error;
mod generator;
mod reveal;
mod session;
mod shell;
mod snapshot;
mod types;
