use std::io::Write;

use anyhow::bail;
use anyhow::Result;
use owo_colors::OwoColorize;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ClassifierName;
use crate::domain::models::InterviewCommand;
use crate::domain::models::Message;
use crate::domain::models::ProgressNote;
use crate::domain::models::Role;
use crate::domain::models::StreamSignal;
use crate::domain::models::TopicRubric;
use crate::domain::models::TransportName;
use crate::domain::services::render_blocks;
use crate::domain::services::BlockNode;
use crate::domain::services::InlineSpan;
use crate::domain::services::InterviewSession;
use crate::domain::services::Phase;
use crate::domain::services::Sessions;
use crate::infrastructure::classifiers::ClassifierManager;
use crate::infrastructure::transports::TransportManager;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /topics (/t) - Show the topic checklist and whether all core topics are covered.
- /retry (/r) - Resend your last message after a failed reply.
- /help (/h) - Show this help menu.
- /quit (/q, /exit) - Save the session and exit.

Press CTRL+C while a reply is streaming to cancel and discard it.
"#;

    return text.trim().to_string();
}

fn spans_to_string(spans: &[InlineSpan]) -> String {
    return spans
        .iter()
        .map(|span| {
            return match span {
                InlineSpan::Text(text) => text.to_string(),
                InlineSpan::Bold(text) => text.bold().to_string(),
                InlineSpan::Italic(text) => text.italic().to_string(),
            };
        })
        .collect::<Vec<String>>()
        .join("");
}

fn print_rendered(content: &str) {
    for block in render_blocks(content) {
        match block {
            BlockNode::Heading(spans) => {
                println!("{}", spans_to_string(&spans).bold().underline());
            }
            BlockNode::SubHeading(spans) => {
                println!("{}", spans_to_string(&spans).bold());
            }
            BlockNode::Paragraph(spans) => {
                println!("{}", spans_to_string(&spans));
            }
            BlockNode::List(items) => {
                for item in items {
                    println!("  • {}", spans_to_string(&item));
                }
            }
            BlockNode::LineBreak => {
                println!();
            }
        }
    }
}

fn print_message(message: &Message) {
    if message.role == Role::User {
        let prompt = format!("{}>", message.role.to_string());
        println!("{} {}", prompt.cyan(), message.content);
    } else {
        print_rendered(&message.content);
    }
    println!();
}

fn print_checklist(session: &InterviewSession) {
    let progress = session.progress();

    for topic in &session.rubric().topics {
        let mut label = topic.label.to_string();
        if topic.core {
            label = format!("{label} (core)");
        }

        if progress.is_completed(&topic.id) {
            println!("  [{}] {label}", "x".green());
        } else {
            println!("  [ ] {label}");
        }
    }

    if progress.gate_passed {
        println!(
            "{}",
            "All core topics are covered. Ready to draft the plan.".green()
        );
    } else {
        let remaining = session
            .rubric()
            .core_topics()
            .iter()
            .filter(|topic| return !progress.is_completed(&topic.id))
            .count();
        println!("{remaining} core topic(s) still to cover.");
    }
    println!();
}

fn print_error(session: &InterviewSession) {
    let error = session.last_error().unwrap_or("Unknown error").to_string();
    println!("{}", error.red());
    println!("Use /retry to send your last message again.");
    println!();
}

fn print_prompt(username: &str) -> Result<()> {
    print!("{} ", format!("{username}>").cyan());
    std::io::stdout().flush()?;
    return Ok(());
}

/// Drives one assistant reply to completion, surfacing progress notes as
/// they arrive. The reply itself is rendered once the stream finishes.
/// CTRL+C cancels the reply and returns the session to idle with the
/// partial content discarded.
async fn drain_stream(
    session: &mut InterviewSession,
    signals_rx: &mut mpsc::UnboundedReceiver<StreamSignal>,
) -> Result<()> {
    let mut last_note: Option<ProgressNote> = None;

    while session.phase() == Phase::Streaming {
        tokio::select! {
            signal = signals_rx.recv() => {
                let signal = match signal {
                    Some(signal) => signal,
                    None => break,
                };
                session.apply(signal).await;

                if let Some(buffer) = session.buffer() {
                    if buffer.progress_note != last_note {
                        if let Some(note) = &buffer.progress_note {
                            let mut line = note.step.to_string();
                            if let Some(detail) = &note.detail {
                                line = format!("{line}: {detail}");
                            }
                            println!("{}", format!("· {line}").dimmed());
                        }
                        last_note = buffer.progress_note.clone();
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                session.cancel();
                println!("{}", "Cancelled. The partial reply was discarded.".yellow());
            }
        }
    }

    return Ok(());
}

pub async fn start() -> Result<()> {
    let transport_name = match TransportName::parse(Config::get(ConfigKey::Transport)) {
        Some(name) => name,
        None => bail!("Unknown transport in config"),
    };
    let transport = TransportManager::get(transport_name)?;

    let classifier_name = match ClassifierName::parse(Config::get(ConfigKey::Classifier)) {
        Some(name) => name,
        None => bail!("Unknown classifier in config"),
    };
    let classifier = ClassifierManager::get(classifier_name)?;

    if let Err(err) = transport.health_check().await {
        println!("{}", format!("{err}").yellow());
    }
    if let Err(err) = classifier.health_check().await {
        println!("{}", format!("{err}").yellow());
    }

    let rubric = TopicRubric::active().await?;
    let sessions = Sessions::default();

    let mut session_id = Config::get(ConfigKey::SessionID);
    let mut history: Vec<Message> = vec![];
    if session_id.is_empty() {
        session_id = Sessions::create_id();
    } else {
        history = sessions.load(&session_id).await?.state.messages;
    }

    let (signals_tx, mut signals_rx) = mpsc::unbounded_channel();
    let mut session = InterviewSession::resume(
        &session_id,
        transport,
        classifier,
        rubric,
        history,
        signals_tx,
    )
    .await;

    if session.history().is_empty() {
        println!("Hi! Tell me about the project you have in mind, and I'll help you shape a plan.");
        println!("Type /help for commands.");
        println!();
    } else {
        for message in session.history() {
            print_message(message);
        }
        print_checklist(&session);
    }

    let username = Config::get(ConfigKey::Username);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_prompt(&username)?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        if let Some(command) = InterviewCommand::parse(&line) {
            if command.is_quit() {
                break;
            }
            if command.is_help() {
                println!("{}", help_text());
                println!();
                continue;
            }
            if command.is_topics() {
                print_checklist(&session);
                continue;
            }
            if command.is_retry() {
                session.retry_last_message();
                if session.phase() != Phase::Streaming {
                    println!("There is nothing to retry.");
                    println!();
                    continue;
                }
            }
        } else {
            session.send(&line);
        }

        if session.phase() != Phase::Streaming {
            continue;
        }

        let turns_before = session.history().len();
        drain_stream(&mut session, &mut signals_rx).await?;

        match session.phase() {
            Phase::Error => print_error(&session),
            _ => {
                if session.history().len() > turns_before {
                    if let Some(message) = session.history().last() {
                        print_message(message);
                    }
                    print_checklist(&session);
                }
            }
        }

        sessions.save(&session_id, session.history()).await?;
    }

    if !session.history().is_empty() {
        sessions.save(&session_id, session.history()).await?;
        println!("Session saved. Resume it with 'groundwork sessions open --id {session_id}'.");
    }

    return Ok(());
}
