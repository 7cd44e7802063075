//! Line-oriented operator console.

use std::collections::HashMap;

use anyhow::Result;
use gadget_core::ActorId;
use gadget_runtime::{InteractAction, RuntimeHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

pub const HELP: &str = "\
commands:
  give <player> <item_id> [amount]   grant tagged items
  use <player> [air|block]           right-click with the held item
  advance [ticks]                    run ticks now (default 1)
  stats                              show server counters
  help                               show this text
  quit                               stop the server";

/// One parsed console line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Tokens of a grant command, starting with `give`.
    Give(Vec<String>),
    Use { player: String, action: InteractAction },
    Advance(u32),
    Stats,
    Help,
    Quit,
    Unknown(String),
}

impl ConsoleCommand {
    /// Parses one line; `None` for blank input.
    pub fn parse(line: &str) -> Option<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (&head, rest) = tokens.split_first()?;
        let command = match head.to_ascii_lowercase().as_str() {
            "give" => ConsoleCommand::Give(tokens.iter().map(|t| t.to_string()).collect()),
            "use" => match rest {
                [player] => ConsoleCommand::Use {
                    player: player.to_string(),
                    action: InteractAction::RightClickAir,
                },
                [player, "air"] => ConsoleCommand::Use {
                    player: player.to_string(),
                    action: InteractAction::RightClickAir,
                },
                [player, "block"] => ConsoleCommand::Use {
                    player: player.to_string(),
                    action: InteractAction::RightClickBlock,
                },
                _ => ConsoleCommand::Unknown(line.trim().to_string()),
            },
            "advance" => match rest {
                [] => ConsoleCommand::Advance(1),
                [ticks] => match ticks.parse() {
                    Ok(ticks) => ConsoleCommand::Advance(ticks),
                    Err(_) => ConsoleCommand::Unknown(line.trim().to_string()),
                },
                _ => ConsoleCommand::Unknown(line.trim().to_string()),
            },
            "stats" => ConsoleCommand::Stats,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" | "stop" => ConsoleCommand::Quit,
            _ => ConsoleCommand::Unknown(line.trim().to_string()),
        };
        Some(command)
    }
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run(handle: RuntimeHandle, players: HashMap<String, ActorId>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");

    while let Some(line) = lines.next_line().await? {
        let Some(command) = ConsoleCommand::parse(&line) else {
            continue;
        };
        match command {
            ConsoleCommand::Give(args) => {
                if let Err(err) = handle.give(None, args).await? {
                    println!("{err}");
                }
            }
            ConsoleCommand::Use { player, action } => {
                match players.get(&player.to_ascii_lowercase()) {
                    Some(actor) => {
                        let outcome = handle.interact(*actor, action).await?;
                        info!(player = %player, ?outcome, "console use");
                    }
                    None => println!("Player '{player}' not found or offline."),
                }
            }
            ConsoleCommand::Advance(ticks) => {
                let stats = handle.advance(ticks).await?;
                println!("{}", serde_json::to_string(&stats)?);
            }
            ConsoleCommand::Stats => {
                let stats = handle.stats().await?;
                println!("{}", serde_json::to_string(&stats)?);
            }
            ConsoleCommand::Help => println!("{HELP}"),
            ConsoleCommand::Quit => break,
            ConsoleCommand::Unknown(line) => {
                warn!(%line, "unrecognised console command");
                println!("Unknown command: {line}. Type 'help'.");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn give_keeps_every_token() {
        assert_eq!(
            ConsoleCommand::parse("give alex molotov 3"),
            Some(ConsoleCommand::Give(vec![
                "give".into(),
                "alex".into(),
                "molotov".into(),
                "3".into()
            ]))
        );
    }

    #[test]
    fn use_defaults_to_air() {
        assert_eq!(
            ConsoleCommand::parse("use steve"),
            Some(ConsoleCommand::Use {
                player: "steve".into(),
                action: InteractAction::RightClickAir,
            })
        );
        assert_eq!(
            ConsoleCommand::parse("use steve block"),
            Some(ConsoleCommand::Use {
                player: "steve".into(),
                action: InteractAction::RightClickBlock,
            })
        );
    }

    #[test]
    fn advance_parses_ticks() {
        assert_eq!(ConsoleCommand::parse("advance"), Some(ConsoleCommand::Advance(1)));
        assert_eq!(ConsoleCommand::parse("ADVANCE 20"), Some(ConsoleCommand::Advance(20)));
        assert!(matches!(
            ConsoleCommand::parse("advance soon"),
            Some(ConsoleCommand::Unknown(_))
        ));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(ConsoleCommand::parse("   "), None);
        assert_eq!(ConsoleCommand::parse("quit"), Some(ConsoleCommand::Quit));
    }
}
