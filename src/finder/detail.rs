use crate::model::RecipeDetail;

/// Visible state of the detail overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerPhase {
    Closed,
    Loading,
    Shown,
}

/// Holds at most one recipe detail and tracks which request produced it.
///
/// A response is applied only if its sequence number is newer than the one
/// already applied; `close` raises that floor to the newest request so
/// in-flight answers cannot reopen the overlay.
#[derive(Debug, Clone, Default)]
pub struct DetailViewer {
    issued: u64,
    applied: u64,
    detail: Option<RecipeDetail>,
}

impl DetailViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that request `seq` is in flight.
    pub fn request(&mut self, seq: u64) {
        self.issued = self.issued.max(seq);
    }

    /// Apply the answer to request `seq`. Returns false for stale answers.
    pub fn complete(&mut self, seq: u64, detail: Option<RecipeDetail>) -> bool {
        if seq <= self.applied || seq > self.issued {
            return false;
        }
        self.applied = seq;
        self.detail = detail;
        true
    }

    pub fn close(&mut self) {
        self.detail = None;
        self.applied = self.issued;
    }

    pub fn detail(&self) -> Option<&RecipeDetail> {
        self.detail.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.issued > self.applied
    }

    pub fn phase(&self) -> ViewerPhase {
        if self.detail.is_some() {
            ViewerPhase::Shown
        } else if self.is_loading() {
            ViewerPhase::Loading
        } else {
            ViewerPhase::Closed
        }
    }
}
