//! Command parsing for player input.

use std::collections::BTreeMap;

use infoprox_core::Direction;
use strsim::jaro_winkler;

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move through an exit. `None` when the direction was not understood.
    Go {
        /// The direction to move.
        direction: Option<Direction>,
    },
    /// Describe the current room.
    Look,
    /// Look closely at an item.
    Examine {
        /// The item query.
        item: String,
    },
    /// Read something written.
    Read {
        /// The item query.
        item: String,
    },
    /// Pick up an item.
    Take {
        /// The item query.
        item: String,
    },
    /// Put an item down.
    Drop {
        /// The item query.
        item: String,
    },
    /// List inventory.
    Inventory,
    /// Use an item, optionally on a target.
    Use {
        /// The item query, possibly empty.
        item: String,
        /// The target text, possibly empty.
        target: String,
    },
    /// Draw the map.
    Map {
        /// Draw every level instead of the current one.
        all: bool,
    },
    /// Report score and turns.
    Score,
    /// Show help.
    Help {
        /// Optional help topic.
        topic: Option<String>,
    },
    /// Save the game.
    Save {
        /// Optional file path.
        file: Option<String>,
    },
    /// Load a saved game.
    Load {
        /// Optional file path.
        file: Option<String>,
    },
    /// End the session.
    Quit,
    /// Print diagnostics about the world.
    Debug,
    /// Unknown command.
    Unknown {
        /// The normalized input.
        input: String,
    },
}

impl Command {
    /// The verb tag this command was classified as.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Go { .. } => "go",
            Self::Look => "look",
            Self::Examine { .. } => "examine",
            Self::Read { .. } => "read",
            Self::Take { .. } => "take",
            Self::Drop { .. } => "drop",
            Self::Inventory => "inventory",
            Self::Use { .. } => "use",
            Self::Map { .. } => "map",
            Self::Score => "score",
            Self::Help { .. } => "help",
            Self::Save { .. } => "save",
            Self::Load { .. } => "load",
            Self::Quit => "quit",
            Self::Debug => "debug",
            Self::Unknown { .. } => "unknown",
        }
    }

    /// Arguments as a flat string map.
    pub fn args(&self) -> BTreeMap<&'static str, String> {
        let mut args = BTreeMap::new();
        match self {
            Self::Go { direction } => {
                args.insert("dir", direction.map(|d| d.name()).unwrap_or("").to_string());
            }
            Self::Examine { item } | Self::Read { item } | Self::Take { item } | Self::Drop { item } => {
                args.insert("item", item.clone());
            }
            Self::Use { item, target } => {
                args.insert("item", item.clone());
                args.insert("target", target.clone());
            }
            Self::Map { all } => {
                args.insert("rest", if *all { "all" } else { "" }.to_string());
            }
            Self::Help { topic: rest } | Self::Save { file: rest } | Self::Load { file: rest } => {
                args.insert("rest", rest.clone().unwrap_or_default());
            }
            Self::Unknown { input } => {
                args.insert("raw", input.clone());
            }
            Self::Look | Self::Inventory | Self::Score | Self::Quit | Self::Debug => {}
        }
        args
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Go,
    Look,
    Examine,
    Read,
    Take,
    Drop,
    Inventory,
    Use,
    Map,
    Score,
    Help,
    Save,
    Load,
    Quit,
    Debug,
}

/// Verb synonyms. Matching picks the longest synonym that fits.
const VERBS: &[(Verb, &[&str])] = &[
    (Verb::Go, &["go", "move", "walk", "run", "head"]),
    (Verb::Look, &["look", "l"]),
    (Verb::Examine, &["look at", "examine", "inspect", "x"]),
    (Verb::Read, &["read"]),
    (Verb::Take, &["take", "get", "grab", "pick up"]),
    (Verb::Drop, &["drop", "leave", "put down"]),
    (Verb::Inventory, &["inventory", "inv", "i"]),
    (Verb::Use, &["use", "unlock", "open"]),
    (Verb::Map, &["map"]),
    (Verb::Score, &["score"]),
    (Verb::Help, &["help", "?"]),
    (Verb::Save, &["save"]),
    (Verb::Load, &["load", "restore"]),
    (Verb::Quit, &["quit", "exit", "q"]),
    (Verb::Debug, &["debug", "dev", "diag"]),
];

/// Collapse whitespace and lowercase.
pub fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parse a player input string into a command.
pub fn parse_command(input: &str) -> Command {
    let raw = input;
    let input = normalize(raw);
    if input.is_empty() {
        return Command::Look;
    }

    if let Some(direction) = Direction::parse(&input) {
        return Command::Go {
            direction: Some(direction),
        };
    }

    let matched = VERBS
        .iter()
        .flat_map(|(verb, synonyms)| synonyms.iter().map(move |s| (*verb, *s)))
        .filter(|(_, s)| {
            input == *s
                || input
                    .strip_prefix(s)
                    .is_some_and(|rest| rest.starts_with(' '))
        })
        .max_by_key(|(_, s)| s.len());

    let Some((verb, synonym)) = matched else {
        return Command::Unknown { input };
    };
    let rest = input[synonym.len()..].trim().to_string();
    if matches!(verb, Verb::Save | Verb::Load) {
        // File names keep their case.
        let skip = synonym.split(' ').count();
        let raw = raw.split_whitespace().skip(skip).collect::<Vec<_>>().join(" ");
        return shape(verb, raw);
    }
    shape(verb, rest)
}

fn shape(verb: Verb, rest: String) -> Command {
    let optional = |rest: String| if rest.is_empty() { None } else { Some(rest) };
    match verb {
        Verb::Go => Command::Go {
            direction: Direction::parse(&rest),
        },
        Verb::Look | Verb::Examine => {
            let item = rest.strip_prefix("at ").map(str::trim).unwrap_or(&rest);
            if item.is_empty() || item == "at" {
                Command::Look
            } else {
                Command::Examine {
                    item: item.to_string(),
                }
            }
        }
        Verb::Read => Command::Read { item: rest },
        Verb::Take => Command::Take { item: rest },
        Verb::Drop => Command::Drop { item: rest },
        Verb::Inventory => Command::Inventory,
        Verb::Use => parse_use(&rest),
        Verb::Map => Command::Map { all: rest == "all" },
        Verb::Score => Command::Score,
        Verb::Help => Command::Help {
            topic: optional(rest),
        },
        Verb::Save => Command::Save {
            file: optional(rest),
        },
        Verb::Load => Command::Load {
            file: optional(rest),
        },
        Verb::Quit => Command::Quit,
        Verb::Debug => Command::Debug,
    }
}

/// `<item> [on <target>]`, both halves optional.
fn parse_use(rest: &str) -> Command {
    let words: Vec<&str> = rest.split(' ').filter(|w| !w.is_empty()).collect();
    match words.iter().position(|w| *w == "on") {
        Some(split) => Command::Use {
            item: words[..split].join(" "),
            target: words[split + 1..].join(" "),
        },
        None => Command::Use {
            item: words.join(" "),
            target: String::new(),
        },
    }
}

/// The closest known verb to the first word of `input`, if it is close enough.
pub fn suggest_verb(input: &str) -> Option<&'static str> {
    let word = input.split_whitespace().next()?;
    VERBS
        .iter()
        .flat_map(|(_, synonyms)| synonyms.iter().copied())
        .filter(|s| s.len() > 2 && !s.contains(' '))
        .map(|s| (s, jaro_winkler(word, s)))
        .filter(|(_, score)| *score >= 0.85)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(s, _)| s)
}
