//! In-memory message log with retention and best-effort persistence.

use std::{cell::RefCell, rc::Rc};

use disparu_host::{DegradedNotice, MonotonicClock, NoticeSink};
use disparu_storage::{DurableKvStore, KvStore, StorageStatus};
use futures::lock::Mutex;

use crate::{
    error::PersistFailure,
    model::{Message, MessageKind, Settings, SettingsPatch},
    persistence::{decode_messages, decode_settings, encode_messages, encode_settings, StorageKeys},
    retention::apply_retention,
};

/// Owns the message sequence and settings of one session.
///
/// Every mutation updates memory first and then persists the affected records. In-memory state
/// stays authoritative: a failed save is reported once through the [`NoticeSink`] and the session
/// carries on.
///
/// Writes to one key pass through a per-key async gate. The blob is serialized only after the
/// gate is acquired, so overlapping operations never interleave their writes and the last write
/// always carries the latest state.
pub struct MessageLog {
    store: Rc<dyn KvStore>,
    notices: Rc<dyn NoticeSink>,
    keys: StorageKeys,
    clock: MonotonicClock,
    messages: RefCell<Vec<Message>>,
    settings: RefCell<Settings>,
    messages_gate: Mutex<()>,
    settings_gate: Mutex<()>,
}

impl std::fmt::Debug for MessageLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageLog")
            .field("keys", &self.keys)
            .field("messages", &self.messages.borrow().len())
            .field("settings", &self.settings.borrow())
            .finish_non_exhaustive()
    }
}

impl MessageLog {
    /// Creates an empty log with default settings over `store`.
    ///
    /// Nothing is read until [`MessageLog::rehydrate`].
    pub fn new(store: Rc<dyn KvStore>, notices: Rc<dyn NoticeSink>) -> Self {
        Self::with_keys(store, notices, StorageKeys::default())
    }

    /// Like [`MessageLog::new`] with explicit storage keys.
    pub fn with_keys(store: Rc<dyn KvStore>, notices: Rc<dyn NoticeSink>, keys: StorageKeys) -> Self {
        Self {
            store,
            notices,
            keys,
            clock: MonotonicClock::default(),
            messages: RefCell::new(Vec::new()),
            settings: RefCell::new(Settings::default()),
            messages_gate: Mutex::new(()),
            settings_gate: Mutex::new(()),
        }
    }

    /// Startup sequence: initializes `store`, refreshes its usage estimate, and rehydrates a log
    /// keyed under the store's namespace.
    pub async fn launch(store: Rc<DurableKvStore>, notices: Rc<dyn NoticeSink>) -> Self {
        store.initialize().await;
        if let Some(estimate) = store.refresh_usage_estimate().await {
            leptos::logging::log!("storage usage: {estimate}");
        }
        let keys = StorageKeys::for_config(store.config());
        let log = Self::with_keys(store, notices, keys);
        log.rehydrate().await;
        log
    }

    /// Returns the retained messages, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.borrow().clone()
    }

    /// Returns the current settings.
    pub fn settings(&self) -> Settings {
        self.settings.borrow().clone()
    }

    /// Returns the storage keys in use.
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Passes through the store's status snapshot.
    pub fn describe_status(&self) -> StorageStatus {
        self.store.describe_status()
    }

    /// Replaces in-memory state with what the store holds.
    ///
    /// Each record is recovered independently: a missing or unparsable settings blob yields
    /// defaults, a missing or unparsable message blob yields an empty log. Retention is applied
    /// to the recovered messages. Emits one [`DegradedNotice::Unavailable`] when no medium is
    /// usable.
    pub async fn rehydrate(&self) {
        let settings = match self.store.get(&self.keys.settings).await {
            Some(raw) => decode_settings(&self.keys.settings, &raw).unwrap_or_else(|err| {
                leptos::logging::warn!("using default settings: {err}");
                Settings::default()
            }),
            None => Settings::default(),
        };

        let mut messages = match self.store.get(&self.keys.messages).await {
            Some(raw) => decode_messages(&self.keys.messages, &raw).unwrap_or_else(|err| {
                leptos::logging::warn!("starting with an empty message log: {err}");
                Vec::new()
            }),
            None => Vec::new(),
        };

        if let Some(latest) = messages.iter().map(|message| message.timestamp).max() {
            self.clock.observe(latest);
        }
        apply_retention(&mut messages, settings.message_limit as usize);

        *self.settings.borrow_mut() = settings;
        *self.messages.borrow_mut() = messages;

        if !self.store.describe_status().capability().can_persist() {
            self.notices.notify(DegradedNotice::Unavailable);
        }
    }

    /// Appends a message and persists the log.
    ///
    /// `text` is trimmed; blank text is ignored and yields `None`. Otherwise returns the stored
    /// message, which stays in memory even if saving fails.
    pub async fn append(&self, text: &str, kind: MessageKind) -> Option<Message> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let stamp = self.clock.next_stamp_ms();
        let message = Message {
            id: stamp.to_string(),
            text: text.to_string(),
            timestamp: stamp,
            kind,
        };
        {
            let limit = self.limit();
            let mut messages = self.messages.borrow_mut();
            messages.push(message.clone());
            apply_retention(&mut *messages, limit);
        }

        if let Err(err) = self.persist_messages().await {
            self.report("append", vec![err]);
        }
        Some(message)
    }

    /// Merges `patch` into the settings, re-applies retention, and persists both records.
    ///
    /// Returns the normalized settings.
    pub async fn update_settings(&self, patch: SettingsPatch) -> Settings {
        let settings = {
            let mut settings = self.settings.borrow_mut();
            settings.apply(patch);
            settings.clone()
        };
        let dropped = apply_retention(
            &mut *self.messages.borrow_mut(),
            settings.message_limit as usize,
        );
        if dropped > 0 {
            leptos::logging::log!("message limit {} dropped {dropped} messages", settings.message_limit);
        }

        let failures: Vec<PersistFailure> = [
            self.persist_messages().await,
            self.persist_settings().await,
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();
        self.report("update settings", failures);
        settings
    }

    /// Removes every message and persists the empty log. Settings are kept.
    pub async fn clear_all(&self) {
        self.messages.borrow_mut().clear();
        if let Err(err) = self.persist_messages().await {
            self.report("clear", vec![err]);
        }
    }

    fn limit(&self) -> usize {
        self.settings.borrow().message_limit as usize
    }

    async fn persist_messages(&self) -> Result<(), PersistFailure> {
        let _gate = self.messages_gate.lock().await;
        let blob = encode_messages(&self.keys.messages, &self.messages.borrow())?;
        self.store.set(&self.keys.messages, &blob).await?;
        Ok(())
    }

    async fn persist_settings(&self) -> Result<(), PersistFailure> {
        let _gate = self.settings_gate.lock().await;
        let blob = encode_settings(&self.keys.settings, &self.settings.borrow())?;
        self.store.set(&self.keys.settings, &blob).await?;
        Ok(())
    }

    // One notice per operation; "unavailable" outranks "write failed".
    fn report(&self, operation: &str, failures: Vec<PersistFailure>) {
        if failures.is_empty() {
            return;
        }
        for err in &failures {
            leptos::logging::error!("{operation}: failed to save: {err}");
        }
        let notice = if failures
            .iter()
            .any(|err| err.notice() == DegradedNotice::Unavailable)
        {
            DegradedNotice::Unavailable
        } else {
            DegradedNotice::WriteFailed
        };
        self.notices.notify(notice);
    }
}
