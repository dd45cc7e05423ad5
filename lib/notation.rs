mod error;
mod finder;
mod observer;
mod options;
mod pgn;
mod resolver;
mod sequencer;
mod validate;

pub use error::*;
pub use finder::*;
pub use observer::*;
pub use options::*;
pub use pgn::*;
pub use resolver::*;
pub use sequencer::*;
pub use validate::*;
