//! Bounded message log and recipient settings persisted through the durable store.
//!
//! [`MessageLog`] owns the in-memory message sequence and [`Settings`], enforces the retention
//! limit on every mutation, and persists each record as one JSON blob through a
//! [`disparu_storage::KvStore`]. Storage failures never interrupt the log: they are reported
//! once per operation through a [`disparu_host::NoticeSink`] and the session continues in
//! memory.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod log;
pub mod model;
pub mod persistence;
pub mod retention;

pub use error::{ParseFailure, PersistFailure};
pub use log::MessageLog;
pub use model::{
    Message, MessageKind, ProfilePictureKind, Settings, SettingsPatch, DEFAULT_MESSAGE_LIMIT,
    DEFAULT_RECIPIENT_NAME, MAX_MESSAGE_LIMIT, MIN_MESSAGE_LIMIT,
};
pub use persistence::{
    decode_messages, decode_settings, encode_messages, encode_settings, StorageKeys,
};
pub use retention::{apply_retention, clamp_message_limit, retained};
