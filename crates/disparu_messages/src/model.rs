//! Message and settings records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::retention::clamp_message_limit;

/// Recipient name used when none is configured.
pub const DEFAULT_RECIPIENT_NAME: &str = "Someone Great";
/// Smallest allowed retention limit.
pub const MIN_MESSAGE_LIMIT: u32 = 10;
/// Largest allowed retention limit.
pub const MAX_MESSAGE_LIMIT: u32 = 50;
/// Retention limit used when none is configured.
pub const DEFAULT_MESSAGE_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Direction of a message.
pub enum MessageKind {
    /// Written by the user.
    Sent,
    /// Shown as coming from the recipient.
    Received,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One entry of the message log. Never modified after creation.
pub struct Message {
    /// Unique id derived from the creation stamp.
    pub id: String,
    /// Message body, non-empty after trimming.
    pub text: String,
    /// Creation time in unix milliseconds.
    pub timestamp: u64,
    /// Message direction, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What the stored profile picture string refers to.
pub enum ProfilePictureKind {
    /// No picture; the UI shows its placeholder avatar.
    None,
    /// A remote image URL.
    Url,
    /// An uploaded image embedded as a `data:` URL.
    Embedded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Recipient display settings and the retention limit.
pub struct Settings {
    /// Name shown in the conversation header. Never empty.
    pub recipient_name: String,
    /// Empty, an image URL, or a `data:` URL.
    pub profile_picture: String,
    /// Number of messages kept, within `[MIN_MESSAGE_LIMIT, MAX_MESSAGE_LIMIT]`.
    pub message_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recipient_name: DEFAULT_RECIPIENT_NAME.to_string(),
            profile_picture: String::new(),
            message_limit: DEFAULT_MESSAGE_LIMIT,
        }
    }
}

impl Settings {
    /// Merges the fields present in `patch`, normalizing each one.
    ///
    /// A blank recipient name falls back to [`DEFAULT_RECIPIENT_NAME`], the picture is trimmed,
    /// and the limit is clamped to `[MIN_MESSAGE_LIMIT, MAX_MESSAGE_LIMIT]`.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(name) = patch.recipient_name {
            let name = name.trim();
            self.recipient_name = if name.is_empty() {
                DEFAULT_RECIPIENT_NAME.to_string()
            } else {
                name.to_string()
            };
        }
        if let Some(picture) = patch.profile_picture {
            self.profile_picture = picture.trim().to_string();
        }
        if let Some(limit) = patch.message_limit {
            self.message_limit = clamp_message_limit(limit);
        }
    }

    /// Classifies the profile picture string.
    pub fn profile_picture_kind(&self) -> ProfilePictureKind {
        if self.profile_picture.is_empty() {
            ProfilePictureKind::None
        } else if self.profile_picture.starts_with("data:") {
            ProfilePictureKind::Embedded
        } else {
            ProfilePictureKind::Url
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Partial settings update. Absent fields are left unchanged.
pub struct SettingsPatch {
    /// New recipient name.
    pub recipient_name: Option<String>,
    /// New profile picture.
    pub profile_picture: Option<String>,
    /// Requested retention limit before clamping.
    pub message_limit: Option<i64>,
}

impl SettingsPatch {
    /// Sets the recipient name.
    pub fn recipient_name(mut self, name: impl Into<String>) -> Self {
        self.recipient_name = Some(name.into());
        self
    }

    /// Sets the profile picture.
    pub fn profile_picture(mut self, picture: impl Into<String>) -> Self {
        self.profile_picture = Some(picture.into());
        self
    }

    /// Sets the requested retention limit.
    pub fn message_limit(mut self, limit: i64) -> Self {
        self.message_limit = Some(limit);
        self
    }

    /// Sets the retention limit from raw form input.
    ///
    /// Leading whitespace, an optional sign, and leading digits are read (`"25 msgs"` is 25).
    /// Input with no leading digits leaves the limit unchanged.
    pub fn message_limit_input(mut self, raw: &str) -> Self {
        if let Some(limit) = parse_leading_integer(raw) {
            self.message_limit = Some(limit);
        }
        self
    }

    // Fields with an unexpected JSON type are skipped one by one.
    pub(crate) fn from_stored_fields(fields: &Map<String, Value>) -> Self {
        Self {
            recipient_name: fields
                .get("recipientName")
                .and_then(Value::as_str)
                .map(str::to_string),
            profile_picture: fields
                .get("profilePicture")
                .and_then(Value::as_str)
                .map(str::to_string),
            message_limit: fields.get("messageLimit").and_then(|value| {
                value
                    .as_i64()
                    .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            }),
        }
    }
}

fn parse_leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Overlong digit runs saturate.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
