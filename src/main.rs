//! Postboard - A small in-memory feed for your terminal
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    match parse_args(std::env::args().skip(1))? {
        Command::Run { seed } => postboard::app::run(seed),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run { seed: bool },
    Help,
    Version,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command> {
    let args: Vec<String> = args.into_iter().collect();

    let Some(first) = args.first() else {
        return Ok(Command::Run { seed: true });
    };

    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),
        "--empty" => Ok(Command::Run { seed: false }),
        other => Err(anyhow::anyhow!(
            "Unknown argument: {other}\nRun 'postboard --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = postboard::Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
📝 Postboard - A small in-memory feed for your terminal

USAGE:
    postboard                          Launch with the starter posts
    postboard --empty                  Launch with an empty feed

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

KEYBINDINGS (feed):
    j/↓, k/↑      Move selection
    g/G           Jump to newest/oldest
    J/K           Scroll post
    n, a          New post
    e, Enter      Edit selected post
    d, Del        Delete selected post
    o             Open image in viewer
    t             Change theme
    ?             Help
    q             Quit

KEYBINDINGS (new / edit):
    Tab           Switch between text and image input
    Enter         New line, or import the typed image path/URL
    Ctrl+X        Remove attached image
    Ctrl+S        Post / save
    Esc           Cancel

Posts live in memory only and are gone when you quit.

CONFIG:
    {}
"#,
        postboard::LOGO,
        config_path
    );
}

fn print_version() {
    println!("postboard {}", postboard::VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(args(&[])).unwrap(), Command::Run { seed: true });
        assert_eq!(
            parse_args(args(&["--empty"])).unwrap(),
            Command::Run { seed: false }
        );
        assert_eq!(parse_args(args(&["-h"])).unwrap(), Command::Help);
        assert_eq!(parse_args(args(&["--version"])).unwrap(), Command::Version);
        assert!(parse_args(args(&["post"])).is_err());
    }
}
