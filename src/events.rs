// events.rs
//
// View-invalidation signal. The service announces which logical view a
// successful mutation affected; re-rendering is the presentation
// layer's job. Sending is best-effort: no subscriber, no problem.

use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewInvalidation {
    PollListing,
    AdminOverview,
}

#[derive(Debug, Clone)]
pub struct Invalidations {
    tx: broadcast::Sender<ViewInvalidation>,
}

impl Invalidations {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewInvalidation> {
        self.tx.subscribe()
    }

    pub fn emit(&self, view: ViewInvalidation) {
        let _ = self.tx.send(view);
    }
}

impl Default for Invalidations {
    fn default() -> Self {
        Self::new()
    }
}
