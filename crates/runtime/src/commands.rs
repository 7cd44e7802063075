//! The `give` grant command.
//!
//! Parsing never fails on the amount: anything that is not a 32-bit integer
//! falls back to [`DEFAULT_AMOUNT`] with a warning, and integers are clamped
//! to `1..=MAX_STACK_SIZE`.
use tracing::{info, warn};

use gadget_core::{ActorId, ItemId, ItemRegistry, MAX_STACK_SIZE, World};

use crate::api::CommandError;

pub const DEFAULT_AMOUNT: u32 = 1;

/// Shown to the sender when the amount could not be parsed.
pub const INVALID_AMOUNT_MESSAGE: &str = "Invalid amount specified. Defaulting to 1.";

/// Parsed quantity and whether the raw input had to be replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Amount {
    pub value: u32,
    pub defaulted: bool,
}

/// Parses an optional amount argument.
///
/// Missing input yields the default silently. Anything that is not a 32-bit
/// integer (words, empty input, values past `i32`) yields the default and
/// logs a warning. Integers are clamped into range.
pub fn parse_amount(raw: Option<&str>) -> Amount {
    let Some(raw) = raw else {
        return Amount {
            value: DEFAULT_AMOUNT,
            defaulted: false,
        };
    };
    match raw.trim().parse::<i32>() {
        Ok(n) => Amount {
            value: n.clamp(1, MAX_STACK_SIZE as i32) as u32,
            defaulted: false,
        },
        Err(_) => {
            warn!(input = raw, "malformed amount, defaulting to {DEFAULT_AMOUNT}");
            Amount {
                value: DEFAULT_AMOUNT,
                defaulted: true,
            }
        }
    }
}

/// `give <actor> <item-id> [amount]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GiveCommand {
    pub recipient: String,
    /// Already lowercased.
    pub item: String,
    pub amount: Amount,
}

impl GiveCommand {
    /// Parses the tokens of a command line, starting with `give`.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, CommandError> {
        let mut args = args.iter().map(AsRef::as_ref);
        match args.next() {
            Some(sub) if sub.eq_ignore_ascii_case("give") => {}
            Some(sub) => {
                return Err(CommandError::UnknownSubcommand {
                    name: sub.to_string(),
                });
            }
            None => return Err(CommandError::Usage),
        }
        let (Some(recipient), Some(item)) = (args.next(), args.next()) else {
            return Err(CommandError::Usage);
        };
        Ok(Self {
            recipient: recipient.to_string(),
            item: item.to_ascii_lowercase(),
            amount: parse_amount(args.next()),
        })
    }
}

/// Result of a successful grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GiveReport {
    pub recipient: ActorId,
    pub item: ItemId,
    pub amount: u32,
    /// Units that did not fit in the recipient's inventory.
    pub overflow: u32,
    pub amount_defaulted: bool,
}

/// Runs a parsed grant against the world.
///
/// `sender` is `None` for the console. Messages go to the sender and the
/// recipient through the world; the sender's confirmation is skipped when
/// they gave to themselves. Errors are returned for the caller to report.
pub fn execute_give(
    registry: &ItemRegistry,
    world: &mut dyn World,
    sender: Option<ActorId>,
    command: &GiveCommand,
) -> Result<GiveReport, CommandError> {
    let recipient = world
        .actor_by_name(&command.recipient)
        .ok_or_else(|| CommandError::UnknownActor {
            name: command.recipient.clone(),
        })?;

    if command.amount.defaulted {
        if let Some(sender) = sender {
            world.send_message(sender, INVALID_AMOUNT_MESSAGE);
        }
    }

    let amount = command.amount.value;
    let stack = registry
        .create_tagged_stack(&command.item, amount)
        .ok_or_else(|| CommandError::UnknownItem {
            id: command.item.clone(),
            available: available_ids(registry),
        })?;
    let item = registry
        .read_tag(&stack)
        .ok_or_else(|| CommandError::UnknownItem {
            id: command.item.clone(),
            available: available_ids(registry),
        })?;

    let overflow = world.give_item(recipient, stack).map_or(0, |rest| rest.amount);

    let sender_name = sender
        .and_then(|s| world.actor_name(s))
        .unwrap_or_else(|| "Console".to_string());
    let recipient_name = world
        .actor_name(recipient)
        .unwrap_or_else(|| command.recipient.clone());
    world.send_message(
        recipient,
        &format!("You received {amount} {item} from {sender_name}."),
    );
    if let Some(sender) = sender.filter(|s| *s != recipient) {
        world.send_message(
            sender,
            &format!("Successfully gave {amount} {item} to {recipient_name}."),
        );
    }

    info!(
        item = %item,
        amount,
        overflow,
        recipient = %recipient_name,
        sender = %sender_name,
        "granted items"
    );

    Ok(GiveReport {
        recipient,
        item,
        amount,
        overflow,
        amount_defaulted: command.amount.defaulted,
    })
}

fn available_ids(registry: &ItemRegistry) -> String {
    registry
        .ids()
        .iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
