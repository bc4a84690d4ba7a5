use clap::{Parser, Subcommand};
use fracpos::types::Generated;
use fracpos::{Placement, Positioner, Preset, config, ordering, output};
use std::path::PathBuf;

/// Shared flag for commands that can show the resulting list.
#[derive(clap::Args, Clone)]
struct ShowArgs {
    /// Also print the list as it looks after the change
    #[arg(long)]
    list: bool,
}

#[derive(Parser)]
#[command(name = "fracpos")]
#[command(about = "Fractional position keys for ordered lists")]
#[command(long_about = "\
Fractional position keys for ordered lists

Each list member stores one position key. The list's order is the ascending
sort of those keys. Inserting or moving a member only writes that member's key;
siblings are never renumbered.

Keys are strings over an ordered alphabet (default base36: 0-9a-z). A key must
not end with the lowest symbol, so there is always room between two keys.

Examples:
  fracpos first                    # key for an empty list
  fracpos after i                  # append after the last member
  fracpos between a b              # insert between two members
  fracpos insert 1 3 5 7 --list    # insert at index 1 of a sorted list
  fracpos move 0 2 3 5 7           # move member 0 to index 2
  fracpos check 3 5 7              # verify keys are valid and ascending

Run 'fracpos gen-config' to generate a documented fracpos.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing fracpos.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Built-in alphabet (overrides config)
    #[arg(long, value_enum, global = true)]
    alphabet: Option<Preset>,

    /// Custom ordered symbols, lowest first (overrides --alphabet and config)
    #[arg(long, global = true)]
    symbols: Option<String>,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Key that sorts before KEY
    Before { key: String },
    /// Key that sorts after KEY
    After { key: String },
    /// Key that sorts between LOW and HIGH
    Between { low: String, high: String },
    /// Key for the first member of an empty list
    First,
    /// Evenly spread COUNT ascending keys
    Spread {
        /// Number of keys (default: generate.spread from config)
        count: Option<usize>,
        /// Keys must sort after this key
        #[arg(long)]
        after: Option<String>,
        /// Keys must sort before this key
        #[arg(long)]
        before: Option<String>,
    },
    /// Key for inserting at INDEX into the sorted KEYS
    Insert {
        index: usize,
        keys: Vec<String>,
        #[command(flatten)]
        show: ShowArgs,
    },
    /// Key for moving the member at FROM so it ends up at TO
    Move {
        from: usize,
        to: usize,
        keys: Vec<String>,
        #[command(flatten)]
        show: ShowArgs,
    },
    /// Sort a JSON array of {id, position} records (file or stdin)
    Sort { file: Option<PathBuf> },
    /// Verify KEYS are well-formed and strictly ascending
    Check { keys: Vec<String> },
    /// Print a stock fracpos.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let settings = config::load_config(&cli.config)?;
    let alphabet =
        config::resolve_alphabet(&settings, cli.alphabet, cli.symbols.as_deref())?;
    log::debug!("alphabet {alphabet} (base {})", alphabet.len());
    let positioner = Positioner::new(alphabet);

    match cli.command {
        Command::Before { key } => {
            let out = positioner.position_before(&key)?;
            print_generated(&Generated::new(None, Some(&key), out), cli.json)?;
        }
        Command::After { key } => {
            let out = positioner.position_after(&key)?;
            print_generated(&Generated::new(Some(&key), None, out), cli.json)?;
        }
        Command::Between { low, high } => {
            let out = positioner.position_between(&low, &high)?;
            print_generated(&Generated::new(Some(&low), Some(&high), out), cli.json)?;
        }
        Command::First => {
            let out = positioner.first_position();
            print_generated(&Generated::new(None, None, out), cli.json)?;
        }
        Command::Spread {
            count,
            after,
            before,
        } => {
            let count = count.unwrap_or(settings.generate.spread);
            let keys = positioner.positions_between(after.as_deref(), before.as_deref(), count)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&keys)?);
            } else {
                output::print_lines(&output::format_keys(&keys));
            }
        }
        Command::Insert { index, keys, show } => {
            ordering::verify_order(&positioner, &keys)?;
            let out = ordering::key_for_insert(&positioner, &keys, index)?;
            let low = index.checked_sub(1).map(|i| keys[i].as_str());
            let high = keys.get(index).map(String::as_str);
            print_generated(&Generated::new(low, high, out.clone()), cli.json)?;
            if show.list && !cli.json {
                output::print_lines(&output::format_insert(&keys, index, &out));
            }
        }
        Command::Move {
            from,
            to,
            keys,
            show,
        } => {
            ordering::verify_order(&positioner, &keys)?;
            let moved = ordering::key_for_move(&positioner, &keys, from, to)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&moved)?);
            } else {
                match &moved {
                    ordering::Moved::To(key) => println!("{key}"),
                    ordering::Moved::Unchanged => println!("{}", keys[from]),
                }
                if show.list {
                    output::print_lines(&output::format_move(&keys, from, to, &moved));
                }
            }
        }
        Command::Sort { file } => {
            let content = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            let items: Vec<Placement> = serde_json::from_str(&content)?;
            let sorted = ordering::sort_by_position(positioner.alphabet(), items)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&sorted)?);
            } else {
                output::print_lines(&output::format_placements(&sorted));
            }
        }
        Command::Check { keys } => {
            ordering::verify_order(&positioner, &keys)?;
            if cli.json {
                let report = serde_json::json!({ "ok": true, "count": keys.len() });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", output::format_check(keys.len()));
            }
        }
        Command::GenConfig => unreachable!("handled before config loading"),
    }

    Ok(())
}

/// Log to stderr; `-v` raises the default level, `RUST_LOG` overrides both.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

fn print_generated(generated: &Generated, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(generated)?);
    } else {
        println!("{}", generated.key);
    }
    Ok(())
}
