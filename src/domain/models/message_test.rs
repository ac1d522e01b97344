use super::Author;
use super::Message;
use super::MessageType;
use super::TYPING_TEXT;

#[test]
fn it_executes_new() {
    let msg = Message::new(Author::Bot, "Hi there!");
    assert_eq!(msg.author, Author::Bot);
    assert_eq!(msg.text, "Hi there!".to_string());
    assert_eq!(msg.mtype, MessageType::Normal);
    assert!(msg.record_id().is_none());
}

#[test]
fn it_executes_new_replacing_tabs() {
    let msg = Message::new(Author::Bot, "\t\tHi there!");
    assert_eq!(msg.text, "    Hi there!".to_string());
}

#[test]
fn it_executes_new_with_type() {
    let msg = Message::new_with_type(Author::Bot, MessageType::Error, "It broke!");
    assert_eq!(msg.author, Author::Bot);
    assert_eq!(msg.text, "It broke!".to_string());
    assert_eq!(msg.message_type(), MessageType::Error);
}

#[test]
fn it_creates_typing_placeholders() {
    let msg = Message::typing("row-1");
    assert_eq!(msg.author, Author::Bot);
    assert_eq!(msg.text, TYPING_TEXT.to_string());
    assert_eq!(msg.message_type(), MessageType::Typing);
    assert_eq!(msg.record_id(), Some("row-1"));
}

#[test]
fn it_resolves_placeholders() {
    let mut msg = Message::typing("row-1");
    msg.resolve("The answer is 42.");
    assert_eq!(msg.text, "The answer is 42.".to_string());
    assert_eq!(msg.message_type(), MessageType::Normal);
    assert_eq!(msg.record_id(), Some("row-1"));
}

#[test]
fn it_wraps_long_lines() {
    let msg = Message::new(
        Author::User,
        "This is a somewhat longer line that should wrap at least once.",
    );
    let lines = msg.as_string_lines(20);
    assert!(lines.len() > 1);
    for line in lines {
        assert!(line.len() <= 20);
    }
}

#[test]
fn it_keeps_blank_lines_when_wrapping() {
    let msg = Message::new(Author::User, "first\n\nsecond");
    let lines = msg.as_string_lines(40);
    assert_eq!(lines, vec!["first", " ", "second"]);
}
