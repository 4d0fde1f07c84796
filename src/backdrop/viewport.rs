use eframe::egui::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingResize {
    size: Vec2,
    due_ms: f64,
}

/// Tracks the viewport size and collapses bursts of resize events into one.
#[derive(Debug)]
pub struct ViewportManager {
    size: Vec2,
    debounce_ms: f64,
    pending: Option<PendingResize>,
}

impl ViewportManager {
    pub fn new(size: Vec2, debounce_ms: f64) -> Self {
        Self {
            size,
            debounce_ms,
            pending: None,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a resize and (re)arms the debounce timer; earlier pending sizes are dropped.
    pub fn on_resize(&mut self, size: Vec2, now_ms: f64) {
        self.pending = Some(PendingResize {
            size,
            due_ms: now_ms + self.debounce_ms,
        });
    }

    /// Applies the pending size once its timer has run out and returns it.
    pub fn poll(&mut self, now_ms: f64) -> Option<Vec2> {
        let pending = self.pending?;
        if now_ms < pending.due_ms {
            return None;
        }

        self.pending = None;
        self.size = pending.size;
        log::debug!(
            "resize settled at {:.0}x{:.0}",
            pending.size.x,
            pending.size.y
        );
        Some(pending.size)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
