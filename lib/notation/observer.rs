use crate::chess::Board;
use crate::notation::MovePair;
use tracing::debug;

/// Watches a game unfold, one [`MovePair`] at a time.
#[cfg_attr(test, mockall::automock)]
pub trait Observer {
    /// Called once both moves of a pair have been applied to the [`Board`].
    fn observe(&mut self, pair: &MovePair, board: &Board);
}

/// Observes nothing.
impl Observer for () {
    fn observe(&mut self, _: &MovePair, _: &Board) {}
}

/// Logs the board after every [`MovePair`].
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Tracer;

impl Observer for Tracer {
    fn observe(&mut self, pair: &MovePair, board: &Board) {
        debug!(%pair, %board, "\n{board:#}");
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn observe(&mut self, pair: &MovePair, board: &Board) {
        (**self).observe(pair, board)
    }
}
