use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::IntoEnumIterator;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Enter - Submit your message.
- Up arrow / Down arrow - Scroll.
- CTRL+U - Page up.
- CTRL+D - Page down.
- CTRL+C - Quit.
        "#;

    return text.trim().to_string();
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
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
        .arg_required_else_help(true)
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

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Wicket")
        .hide(true)
        .subcommand(Command::new("log-path").about(
            "Output path to the debug log file generated when running Wicket with environment variable RUST_LOG=wicket",
        ))
        .subcommand(Command::new("enum-config").about("List all config keys as strings."));
}

fn arg_session_id() -> Arg {
    return Arg::new(ConfigKey::SessionID.to_string())
        .short('i')
        .long(ConfigKey::SessionID.to_string())
        .env("WICKET_SESSION_ID")
        .num_args(1)
        .help(format!(
            "The session record identifier to gate on. [default: {}]",
            Config::default(ConfigKey::SessionID)
        ))
        .global(true);
}

fn arg_store_url() -> Arg {
    return Arg::new(ConfigKey::StoreURL.to_string())
        .long(ConfigKey::StoreURL.to_string())
        .env("WICKET_STORE_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the hosted data store. [default: {}]",
            Config::default(ConfigKey::StoreURL)
        ))
        .global(true);
}

fn arg_store_key() -> Arg {
    return Arg::new(ConfigKey::StoreKey.to_string())
        .long(ConfigKey::StoreKey.to_string())
        .env("WICKET_STORE_KEY")
        .num_args(1)
        .help("API key sent to the hosted data store.")
        .global(true);
}

fn arg_username() -> Arg {
    return Arg::new(ConfigKey::Username.to_string())
        .short('u')
        .long(ConfigKey::Username.to_string())
        .env("WICKET_USERNAME")
        .num_args(1)
        .help("Your user name displayed in all chat bubbles.")
        .global(true);
}

pub fn build() -> Command {
    let hotkeys_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}")).underline().bold().to_string();
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

    return Command::new("wicket")
        .about(about)
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("chat").about("Start the chat widget. This is the default."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("WICKET_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(arg_session_id())
        .arg(arg_store_url())
        .arg(arg_store_key())
        .arg(arg_username());
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", completions_matches)) => {
            if let Some(shell) = completions_matches.get_one::<Shell>("shell").copied() {
                let mut cmd = build();
                print_completions(shell, &mut cmd);
            }
            return Ok(false);
        }
        Some(("config", config_matches)) => {
            match config_matches.subcommand() {
                Some(("create", _)) => {
                    create_config_file().await?;
                }
                Some(("default", _)) => {
                    println!("{}", Config::serialize_default(build()));
                }
                Some(("path", _)) => {
                    println!("{}", Config::default(ConfigKey::ConfigFile));
                }
                _ => {}
            }
            return Ok(false);
        }
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir().unwrap().join("wicket/debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    for key in ConfigKey::iter() {
                        println!("{key}");
                    }
                }
                _ => {}
            }
            return Ok(false);
        }
        Some(("chat", chat_matches)) => {
            Config::load(vec![&matches, chat_matches]).await?;
            return Ok(true);
        }
        _ => {
            Config::load(vec![&matches]).await?;
            return Ok(true);
        }
    }
}
