use std::sync::mpsc;

use glam::Vec2;

/// Create a pointer subscription. The sender goes to whatever produces cursor
/// samples; the feed stays with the engine.
pub fn channel(initial: Vec2) -> (PointerSender, PointerFeed) {
    let (tx, rx) = mpsc::channel();
    (
        PointerSender(tx),
        PointerFeed {
            rx,
            latest: initial,
        },
    )
}

/// Producer side of the pointer subscription.
#[derive(Clone)]
pub struct PointerSender(mpsc::Sender<Vec2>);

impl PointerSender {
    /// Publish a sample in screen pixels. Returns false once the feed is gone.
    pub fn send(&self, pos: Vec2) -> bool {
        self.0.send(pos).is_ok()
    }
}

/// Consumer side. Samples collapse to the most recent one.
pub struct PointerFeed {
    rx: mpsc::Receiver<Vec2>,
    latest: Vec2,
}

impl PointerFeed {
    /// Newest sample received so far. Older queued samples are discarded.
    pub fn latest(&mut self) -> Vec2 {
        if let Some(pos) = self.rx.try_iter().last() {
            self.latest = pos;
        }
        self.latest
    }
}
