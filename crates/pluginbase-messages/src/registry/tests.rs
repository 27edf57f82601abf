use super::*;
use crate::generic::GenericMessages;
use tracing_test::traced_test;

fn key(k: &str) -> MessageKey {
    MessageKey::parse(k)
}

fn shop() -> MessageGroup {
    MessageGroup::new("shop")
        .message(Message::create("shop.bought", "You bought %s", &[]))
        .message(Message::create("shop.sold", "You sold %s for %s", &[]))
}

#[test]
fn test_unregistered_owner_fails() {
    let messages = Messages::new();
    assert!(matches!(
        messages.message_keys("nobody"),
        Err(PluginBaseError::NotRegistered(owner)) if owner == "nobody"
    ));
    assert!(messages.get_message("nobody", None).is_err());
    assert!(messages.contains_message_key("nobody", &key("a")).is_err());
    assert!(messages.messages("nobody").is_err());
    assert!(!messages.is_registered("nobody"));
}

#[test]
fn test_register_accepts_messages() {
    let mut messages = Messages::new();
    assert_eq!(messages.register_messages("shop", &shop()), 2);
    assert!(messages.is_registered("shop"));
    assert!(messages.contains_message_key("shop", &key("shop.bought")).unwrap());
    let sold = messages
        .get_message("shop", Some(&key("shop.sold")))
        .unwrap()
        .unwrap();
    assert_eq!(sold.arg_count(), 2);
}

#[test]
fn test_generic_messages_seeded_first() {
    let mut messages = Messages::new();
    messages.register_messages("shop", &shop());
    let keys: Vec<String> = messages
        .message_keys("shop")
        .unwrap()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(keys[0], "generic.success");
    assert_eq!(keys.len(), generic::keyed().len() + 2);
    assert_eq!(keys[keys.len() - 2..], ["shop.bought", "shop.sold"]);
}

#[test]
fn test_first_registration_wins() {
    let mut messages = Messages::new();
    let group = MessageGroup::new("dupes")
        .message(Message::create("a.b", "first", &[]))
        .message(Message::create("a.b", "second", &[]));
    assert_eq!(messages.register_messages("o", &group), 1);

    let later = MessageGroup::new("later").message(Message::create("a.b", "third", &[]));
    assert_eq!(messages.register_messages("o", &later), 0);

    let stored = messages.get_message("o", Some(&key("a.b"))).unwrap().unwrap();
    assert_eq!(stored.default_text(), "first");
}

#[test]
fn test_user_message_cannot_replace_generic() {
    let mut messages = Messages::new();
    let group = MessageGroup::new("g").message(Message::create("generic.success", "yay", &[]));
    assert_eq!(messages.register_messages("o", &group), 0);
    let stored = messages
        .get_message("o", Some(&key("generic.success")))
        .unwrap()
        .unwrap();
    assert_eq!(stored, &*generic::SUCCESS);
}

#[test]
fn test_nested_groups_registered() {
    let mut messages = Messages::new();
    let group = MessageGroup::new("outer")
        .message(Message::create("outer.a", "A", &[]))
        .group(
            MessageGroup::new("inner")
                .message(Message::create("inner.b", "B", &[]))
                .group(MessageGroup::new("deepest").message(Message::create("deep.c", "C", &[]))),
        );
    assert_eq!(messages.register_messages("o", &group), 3);
    assert!(messages.contains_message_key("o", &key("deep.c")).unwrap());
}

#[test]
#[traced_test]
fn test_unreadable_entry_skipped() {
    let mut messages = Messages::new();
    let group = MessageGroup::new("g")
        .message(Message::create("a", "A", &[]))
        .unreadable("SECRET", "access denied")
        .message(Message::create("b", "B", &[]));
    assert_eq!(messages.register_messages("o", &group), 2);
    assert!(logs_contain(
        "could not register message in g: cannot read 'SECRET': access denied"
    ));
}

#[test]
fn test_static_and_empty_keys_skipped() {
    let mut messages = Messages::new();
    let group = MessageGroup::new("g")
        .message(Message::create_static("inline", &[]))
        .message(Message::create("..", "empty", &[]));
    assert_eq!(messages.register_messages("o", &group), 0);
    assert_eq!(
        messages.message_keys("o").unwrap().len(),
        generic::keyed().len()
    );
}

#[test]
fn test_builtin_group_not_registered() {
    let mut messages = Messages::new();
    assert_eq!(messages.register_messages("o", &GenericMessages), 0);
    assert!(!messages.is_registered("o"));
}

#[test]
fn test_nested_builtin_group_skipped() {
    struct WithGeneric;
    impl Declarations for WithGeneric {
        fn group_name(&self) -> &str {
            "with_generic"
        }
        fn declared(&self) -> Vec<Result<Message, DeclarationError>> {
            vec![Ok(Message::create("mine", "M", &[]))]
        }
        fn nested(&self) -> Vec<&dyn Declarations> {
            vec![&GenericMessages as &dyn Declarations]
        }
    }

    let mut messages = Messages::new();
    assert_eq!(messages.register_messages("o", &WithGeneric), 1);
}

#[test]
fn test_none_key_returns_blank() {
    let mut messages = Messages::new();
    messages.register_messages("o", &MessageGroup::new("empty"));
    let blank = messages.get_message("o", None).unwrap().unwrap();
    assert_eq!(blank.default_text(), "");
    assert!(messages.get_message("o", Some(&key("missing"))).unwrap().is_none());
}

#[test]
fn test_owners_are_isolated() {
    let mut messages = Messages::new();
    messages.register_messages("b", &shop());
    messages.register_messages("a", &MessageGroup::new("empty"));
    assert_eq!(messages.owners(), ["a", "b"]);
    assert!(!messages.contains_message_key("a", &key("shop.bought")).unwrap());
}
