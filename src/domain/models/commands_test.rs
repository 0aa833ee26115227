use super::InterviewCommand;

#[test]
fn it_parses_quit() {
    for text in ["/q", "/quit", "/exit"] {
        let cmd = InterviewCommand::parse(text).unwrap();
        assert!(cmd.is_quit());
    }
}

#[test]
fn it_parses_help() {
    let cmd = InterviewCommand::parse("/help").unwrap();
    assert!(cmd.is_help());
    assert!(!cmd.is_quit());
}

#[test]
fn it_parses_topics() {
    let cmd = InterviewCommand::parse("/topics").unwrap();
    assert!(cmd.is_topics());
}

#[test]
fn it_parses_retry() {
    let cmd = InterviewCommand::parse("  /retry  ").unwrap();
    assert!(cmd.is_retry());
}

#[test]
fn it_ignores_regular_messages() {
    assert!(InterviewCommand::parse("tell me about budgets").is_none());
    assert!(InterviewCommand::parse("/unknown").is_none());
    assert!(InterviewCommand::parse("").is_none());
}
