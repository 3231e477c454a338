//! Panel trait.
//!
//! RULE: every tab's content implements Panel. The app shell owns
//! exactly one mounted panel and tears it down before mounting the next.
//! A panel never reads another panel's state.

use crate::types::Tab;

pub trait Panel: Send {
    /// The tab this panel is mounted under.
    fn tab(&self) -> Tab;

    /// Cancel any pending delayed work.
    ///
    /// Returns the number of delayed results that were cancelled.
    fn teardown(&mut self) -> usize;
}
