use super::Message;
use super::Role;

#[test]
fn it_executes_new() {
    let msg = Message::new(Role::Assistant, "Hi there!");
    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.role.to_string(), "Groundwork");
    assert_eq!(msg.content, "Hi there!".to_string());
    assert!(!msg.id.is_empty());
    assert!(!msg.created_at.is_empty());
}

#[test]
fn it_executes_new_replacing_tabs() {
    let msg = Message::new(Role::Assistant, "\t\tHi there!");
    assert_eq!(msg.content, "    Hi there!".to_string());
}

#[test]
fn it_assigns_unique_ids() {
    let first = Message::new(Role::User, "one");
    let second = Message::new(Role::User, "one");
    assert_ne!(first.id, second.id);
}
