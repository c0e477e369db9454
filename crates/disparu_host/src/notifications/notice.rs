//! Degraded-mode notice contracts and adapters.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// User-visible storage problem, shown as a transient auto-dismissing banner.
pub enum DegradedNotice {
    /// No medium can store anything; nothing will be saved this session.
    Unavailable,
    /// A single save failed, typically because storage is full.
    WriteFailed,
}

impl DegradedNotice {
    /// Stable category token for the notice.
    pub const fn category(self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::WriteFailed => "write failed",
        }
    }

    /// Human-readable banner text.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Unavailable => "Storage unavailable. Messages will not be saved.",
            Self::WriteFailed => "Failed to save. Storage may be full.",
        }
    }

    /// How long the banner stays visible before dismissing itself.
    pub const fn dismiss_after_ms(self) -> u32 {
        match self {
            Self::Unavailable => 5_000,
            Self::WriteFailed => 3_000,
        }
    }
}

/// Receiver for degraded-mode notices.
pub trait NoticeSink {
    /// Delivers one notice. Called at most once per failed operation.
    fn notify(&self, notice: DegradedNotice);
}

#[derive(Debug, Clone, Copy, Default)]
/// Sink that drops every notice.
pub struct NoopNoticeSink;

impl NoticeSink for NoopNoticeSink {
    fn notify(&self, _notice: DegradedNotice) {}
}

#[derive(Debug, Clone, Default)]
/// Sink that queues notices until the UI drains them.
pub struct MemoryNoticeSink {
    inner: Rc<RefCell<Vec<DegradedNotice>>>,
}

impl MemoryNoticeSink {
    /// Returns queued notices without draining them.
    pub fn pending(&self) -> Vec<DegradedNotice> {
        self.inner.borrow().clone()
    }

    /// Drains and returns queued notices, oldest first.
    pub fn drain(&self) -> Vec<DegradedNotice> {
        std::mem::take(&mut *self.inner.borrow_mut())
    }
}

impl NoticeSink for MemoryNoticeSink {
    fn notify(&self, notice: DegradedNotice) {
        self.inner.borrow_mut().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_distinguish_unavailable_from_write_failure() {
        assert_eq!(DegradedNotice::Unavailable.category(), "unavailable");
        assert_eq!(DegradedNotice::WriteFailed.category(), "write failed");
        assert_ne!(
            DegradedNotice::Unavailable.message(),
            DegradedNotice::WriteFailed.message()
        );
        assert!(
            DegradedNotice::Unavailable.dismiss_after_ms()
                > DegradedNotice::WriteFailed.dismiss_after_ms()
        );
    }

    #[test]
    fn memory_sink_queues_and_drains_in_order() {
        let sink = MemoryNoticeSink::default();
        let sink_obj: &dyn NoticeSink = &sink;
        sink_obj.notify(DegradedNotice::WriteFailed);
        sink_obj.notify(DegradedNotice::Unavailable);

        assert_eq!(sink.pending().len(), 2);
        assert_eq!(
            sink.drain(),
            vec![DegradedNotice::WriteFailed, DegradedNotice::Unavailable]
        );
        assert!(sink.pending().is_empty());
    }
}
