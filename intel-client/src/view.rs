use std::cell::Cell;
use std::rc::Rc;

/// Lifecycle of one page-owned piece of remote data. `Loading` replaces the
/// previous value outright, so a view never shows stale data alongside a
/// spinner, and `Failed` carries the message the page displays.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Issues tickets for overlapping fetches of the same view state. Starting a
/// new fetch invalidates every outstanding ticket, so a response that lands
/// late can be recognized as stale and dropped.
#[derive(Clone, Default)]
pub struct FetchGate {
    generation: Rc<Cell<u64>>,
}

impl FetchGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> FetchTicket {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        FetchTicket {
            generation: Rc::clone(&self.generation),
            issued: next,
        }
    }
}

#[derive(Clone)]
pub struct FetchTicket {
    generation: Rc<Cell<u64>>,
    issued: u64,
}

impl FetchTicket {
    pub fn is_current(&self) -> bool {
        self.generation.get() == self.issued
    }
}
