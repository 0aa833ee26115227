use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgGroup;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::repl::help_text;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ClassifierName;
use crate::domain::models::Session;
use crate::domain::models::TopicRubric;
use crate::domain::models::TransportName;
use crate::domain::services::Sessions;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn format_session(session: &Session) -> String {
    let mut res = format!(
        "- (ID: {}) {}, Transport: {}",
        session.id, session.timestamp, session.state.transport_name,
    );

    if !session.state.messages.is_empty() {
        let mut line = session.state.messages[0]
            .content
            .split('\n')
            .collect::<Vec<_>>()[0]
            .to_string();

        if line.len() >= 70 {
            line = format!("{}...", &line[..67]);
        }
        res = format!("{res}, {line}");
    }

    return res;
}

async fn print_sessions_list() -> Result<()> {
    let mut sessions = Sessions::default()
        .list()
        .await?
        .iter()
        .map(|session| {
            return format_session(session);
        })
        .collect::<Vec<String>>();

    sessions.reverse();

    if sessions.is_empty() {
        println!("There are no sessions available. You should start your first one!");
    } else {
        println!("{}", sessions.join("\n"));
    }

    return Ok(());
}

async fn print_rubric() -> Result<()> {
    let rubric = TopicRubric::active().await?;
    for topic in &rubric.topics {
        let mut label = topic.label.to_string();
        if topic.core {
            label = format!("{label} {}", "(core)".bold());
        }
        println!("- {id}: {label}", id = topic.id);
    }

    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn load_config_from_session(session_id: &str) -> Result<()> {
    let session = Sessions::default().load(session_id).await?;
    Config::set(ConfigKey::Transport, &session.state.transport_name);
    Config::set(ConfigKey::Classifier, &session.state.classifier_name);
    Config::set(ConfigKey::SessionID, session_id);

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_sessions_delete() -> Command {
    return Command::new("delete")
        .about("Delete one or all sessions.")
        .arg(
            clap::Arg::new("session-id")
                .short('i')
                .long("id")
                .help("Session ID")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("all")
                .long("all")
                .help("Delete all sessions.")
                .num_args(0),
        )
        .group(
            ArgGroup::new("delete-args")
                .args(["session-id", "all"])
                .required(true),
        );
}

fn subcommand_sessions() -> Command {
    return Command::new("sessions")
        .about("Manage past interview sessions.")
        .arg_required_else_help(true)
        .subcommand(Command::new("dir").about("Print the sessions cache directory path."))
        .subcommand(
            Command::new("list").about("List all previous sessions with their ids and transports."),
        )
        .subcommand(
            Command::new("open").about("Open a previous session by ID.").arg(
                clap::Arg::new(ConfigKey::SessionID.to_string())
                    .short('i')
                    .long("id")
                    .help("Session ID")
                    .required(true),
            ),
        )
        .subcommand(subcommand_sessions_delete());
}

fn subcommand_rubric() -> Command {
    return Command::new("rubric")
        .about("Rubric options.")
        .subcommand(Command::new("show").about("Print the active topic rubric."));
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return format!("INTERVIEW {line}").underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("groundwork")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_rubric())
        .subcommand(subcommand_sessions())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("GROUNDWORK_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Transport.to_string())
                .short('t')
                .long(ConfigKey::Transport.to_string())
                .env("GROUNDWORK_TRANSPORT")
                .num_args(1)
                .help(format!(
                    "The transport used to reach the interview service. [default: {}]",
                    Config::default(ConfigKey::Transport)
                ))
                .value_parser(PossibleValuesParser::new(TransportName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Classifier.to_string())
                .long(ConfigKey::Classifier.to_string())
                .env("GROUNDWORK_CLASSIFIER")
                .num_args(1)
                .help(format!(
                    "The classifier used to judge topic completion. [default: {}]",
                    Config::default(ConfigKey::Classifier)
                ))
                .value_parser(PossibleValuesParser::new(ClassifierName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::WizardURL.to_string())
                .long(ConfigKey::WizardURL.to_string())
                .env("GROUNDWORK_WIZARD_URL")
                .num_args(1)
                .help(format!(
                    "Interview service API URL when using the wizard transport. [default: {}]",
                    Config::default(ConfigKey::WizardURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::WizardToken.to_string())
                .long(ConfigKey::WizardToken.to_string())
                .env("GROUNDWORK_WIZARD_TOKEN")
                .num_args(1)
                .help("Bearer token passed to the interview service, if it requires one.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ClassifierURL.to_string())
                .long(ConfigKey::ClassifierURL.to_string())
                .env("GROUNDWORK_CLASSIFIER_URL")
                .num_args(1)
                .help(format!(
                    "Classifier service API URL when using the remote classifier. [default: {}]",
                    Config::default(ConfigKey::ClassifierURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::HealthCheckTimeout.to_string())
                .long(ConfigKey::HealthCheckTimeout.to_string())
                .env("GROUNDWORK_HEALTH_CHECK_TIMEOUT")
                .num_args(1)
                .help(format!(
                    "Time to wait in milliseconds before timing out when doing a healthcheck. [default: {}]",
                    Config::default(ConfigKey::HealthCheckTimeout)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::RequestTimeout.to_string())
                .long(ConfigKey::RequestTimeout.to_string())
                .env("GROUNDWORK_REQUEST_TIMEOUT")
                .num_args(1)
                .help(format!(
                    "Time to wait in milliseconds before giving up on a streaming reply. [default: {}]",
                    Config::default(ConfigKey::RequestTimeout)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::RubricFile.to_string())
                .long(ConfigKey::RubricFile.to_string())
                .env("GROUNDWORK_RUBRIC_FILE")
                .num_args(1)
                .help("Path to a YAML rubric file. Defaults to the built-in project plan rubric.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("GROUNDWORK_USERNAME")
                .num_args(1)
                .help("Your display name in the interview transcript.")
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("rubric", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            match subcmd_matches.subcommand() {
                Some(("show", _)) => {
                    print_rubric().await?;
                }
                _ => {
                    subcommand_rubric().print_long_help()?;
                }
            }
            return Ok(false);
        }
        Some(("sessions", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("dir", _)) => {
                let dir = Sessions::default().cache_dir.to_string_lossy().to_string();
                println!("{dir}");
                return Ok(false);
            }
            Some(("list", _)) => {
                print_sessions_list().await?;
                return Ok(false);
            }
            Some(("open", open_matches)) => {
                Config::load(build(), vec![&matches, open_matches]).await?;
                if let Some(session_id) = open_matches.get_one::<String>("session-id") {
                    load_config_from_session(session_id).await?;
                } else {
                    bail!("A session ID is required. Run 'groundwork sessions list' to find one.");
                }
            }
            Some(("delete", delete_matches)) => {
                if let Some(session_id) = delete_matches.get_one::<String>("session-id") {
                    Sessions::default().delete(session_id).await?;
                    println!("Deleted session {session_id}");
                } else if delete_matches.get_one::<bool>("all").is_some() {
                    Sessions::default().delete_all().await?;
                    println!("Deleted all sessions");
                } else {
                    subcommand_sessions_delete().print_long_help()?;
                }
                return Ok(false);
            }
            _ => {
                subcommand_sessions().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
