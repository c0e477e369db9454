use std::rc::Rc;

use disparu_host::{
    DegradedNotice, MemoryNoticeSink, MemoryPrimaryMedium, MemorySecondaryMedium,
    NoopPrimaryMedium, NoopSecondaryMedium, PrimaryMedium,
};
use disparu_messages::{
    MessageKind, MessageLog, Settings, SettingsPatch, DEFAULT_RECIPIENT_NAME, MAX_MESSAGE_LIMIT,
    MIN_MESSAGE_LIMIT,
};
use disparu_storage::{DurableKvStore, DurableStoreConfig, StorageCapability};
use futures::executor::block_on;
use pretty_assertions::assert_eq;

struct Device {
    primary: MemoryPrimaryMedium,
    secondary: MemorySecondaryMedium,
}

impl Device {
    fn new() -> Self {
        Self {
            primary: MemoryPrimaryMedium::default(),
            secondary: MemorySecondaryMedium::default(),
        }
    }

    fn store(&self) -> Rc<DurableKvStore> {
        Rc::new(DurableKvStore::new(
            self.primary.clone(),
            self.secondary.clone(),
            DurableStoreConfig::default(),
        ))
    }

    fn launch(&self) -> (MessageLog, MemoryNoticeSink) {
        let notices = MemoryNoticeSink::default();
        let log = block_on(MessageLog::launch(self.store(), Rc::new(notices.clone())));
        (log, notices)
    }
}

#[test]
fn appended_message_survives_a_relaunch() {
    let device = Device::new();
    let (log, _) = device.launch();
    let sent = block_on(log.append("hi", MessageKind::Sent)).expect("appended");

    let (relaunched, notices) = device.launch();
    assert_eq!(relaunched.messages(), vec![sent]);
    assert!(notices.pending().is_empty());
}

#[test]
fn settings_survive_a_relaunch() {
    let device = Device::new();
    let (log, _) = device.launch();
    block_on(
        log.update_settings(
            SettingsPatch::default()
                .recipient_name("Morgan")
                .profile_picture("https://example.com/morgan.png")
                .message_limit_input("20"),
        ),
    );

    let (relaunched, _) = device.launch();
    assert_eq!(
        relaunched.settings(),
        Settings {
            recipient_name: "Morgan".to_string(),
            profile_picture: "https://example.com/morgan.png".to_string(),
            message_limit: 20,
        }
    );
}

#[test]
fn primary_rejecting_every_write_falls_back_to_secondary() {
    let device = Device::new();
    device.primary.set_fail_writes(true);

    let (log, notices) = device.launch();
    assert_eq!(
        log.describe_status().capability(),
        StorageCapability::SecondaryOnly
    );
    let sent = block_on(log.append("saved elsewhere", MessageKind::Sent)).expect("appended");
    assert!(notices.pending().is_empty());
    assert!(device.secondary.peek("messages_app_messages").is_some());

    let (relaunched, _) = device.launch();
    assert_eq!(relaunched.messages(), vec![sent]);
}

#[test]
fn no_usable_medium_keeps_messages_in_memory() {
    let store = DurableKvStore::new(
        NoopPrimaryMedium,
        NoopSecondaryMedium,
        DurableStoreConfig::default(),
    );
    let notices = MemoryNoticeSink::default();
    let log = block_on(MessageLog::launch(Rc::new(store), Rc::new(notices.clone())));
    assert_eq!(notices.drain(), vec![DegradedNotice::Unavailable]);

    let sent = block_on(log.append("only in memory", MessageKind::Sent)).expect("appended");
    assert_eq!(log.messages(), vec![sent]);
    assert_eq!(notices.drain(), vec![DegradedNotice::Unavailable]);
}

#[test]
fn malformed_settings_fall_back_to_defaults_without_losing_messages() {
    let device = Device::new();
    let (log, _) = device.launch();
    block_on(log.append("one", MessageKind::Sent));
    block_on(log.append("two", MessageKind::Received));
    device
        .primary
        .set_item("messages_app_settings", "{not json")
        .expect("seed");

    let (relaunched, _) = device.launch();
    assert_eq!(relaunched.settings(), Settings::default());
    assert_eq!(relaunched.settings().recipient_name, DEFAULT_RECIPIENT_NAME);
    let texts: Vec<String> = relaunched.messages().into_iter().map(|m| m.text).collect();
    assert_eq!(texts, vec!["one", "two"]);
}

#[test]
fn malformed_messages_fall_back_to_empty_without_losing_settings() {
    let device = Device::new();
    let (log, _) = device.launch();
    block_on(log.update_settings(SettingsPatch::default().recipient_name("Ash")));
    device
        .primary
        .set_item("messages_app_messages", r#"{"not":"an array"}"#)
        .expect("seed");

    let (relaunched, _) = device.launch();
    assert!(relaunched.messages().is_empty());
    assert_eq!(relaunched.settings().recipient_name, "Ash");
}

#[test]
fn requested_limits_are_clamped() {
    let device = Device::new();
    let (log, _) = device.launch();

    let settings = block_on(log.update_settings(SettingsPatch::default().message_limit(999)));
    assert_eq!(settings.message_limit, MAX_MESSAGE_LIMIT);

    let settings = block_on(log.update_settings(SettingsPatch::default().message_limit(1)));
    assert_eq!(settings.message_limit, MIN_MESSAGE_LIMIT);
}

#[test]
fn limit_three_after_ten_appends_keeps_the_last_ten_in_order() {
    let device = Device::new();
    let (log, _) = device.launch();
    for i in 0..10 {
        block_on(log.append(&format!("m{i}"), MessageKind::Sent));
    }

    let settings = block_on(log.update_settings(SettingsPatch::default().message_limit(3)));
    assert_eq!(settings.message_limit, MIN_MESSAGE_LIMIT);
    let texts: Vec<String> = log.messages().into_iter().map(|m| m.text).collect();
    let expected: Vec<String> = (0..10).map(|i| format!("m{i}")).collect();
    assert_eq!(texts, expected);

    block_on(log.append("m10", MessageKind::Sent));
    let texts: Vec<String> = log.messages().into_iter().map(|m| m.text).collect();
    let expected: Vec<String> = (1..=10).map(|i| format!("m{i}")).collect();
    assert_eq!(texts, expected);
}

#[test]
fn stored_messages_beyond_the_limit_are_trimmed_on_relaunch() {
    let device = Device::new();
    let (log, _) = device.launch();
    block_on(log.update_settings(SettingsPatch::default().message_limit(40)));
    for i in 0..40 {
        block_on(log.append(&format!("m{i}"), MessageKind::Sent));
    }
    device
        .primary
        .set_item(
            "messages_app_settings",
            r#"{"recipientName":"Ash","profilePicture":"","messageLimit":15}"#,
        )
        .expect("seed");

    let (relaunched, _) = device.launch();
    let messages = relaunched.messages();
    assert_eq!(messages.len(), 15);
    assert_eq!(messages[0].text, "m25");
}
