use std::io;

use crate::core::TimerToken;
use crate::types::InputEvent;

/// Everything the host loop reacts to, in arrival order.
///
/// Timer tasks and the input reader share one sender, so the loop sees a single
/// ordered stream and never needs a lock around the session.
#[derive(Debug)]
pub enum LoopEvent {
    Input(InputEvent),
    Timer(TimerToken),
    /// Terminal size changed; redraw from scratch
    Resize,
    /// The input source failed; the loop ends with this error
    Closed(io::Error),
}
