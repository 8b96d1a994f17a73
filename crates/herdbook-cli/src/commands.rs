use anyhow::Context;
use colored::Colorize;
use herdbook_ledger::{Herdbook, LedgerConfig, Outcome, Transaction};
use herdbook_store::FileKvStore;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    match cli.command {
        Command::Invoke(ref args) => cmd_invoke(&cli, config, args),
        Command::Init => cmd_init(&cli, config),
        Command::Transactions => cmd_transactions(&cli.format),
        Command::Config(ref args) => cmd_config(&config, args),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<LedgerConfig> {
    match &cli.config {
        Some(path) => LedgerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(LedgerConfig::default()),
    }
}

fn open_ledger(cli: &Cli, config: LedgerConfig) -> anyhow::Result<Herdbook<FileKvStore>> {
    let store = FileKvStore::open(&cli.store)
        .with_context(|| format!("opening ledger {}", cli.store.display()))?;
    Ok(Herdbook::with_config(store, config))
}

fn cmd_invoke(cli: &Cli, config: LedgerConfig, args: &InvokeArgs) -> anyhow::Result<()> {
    let ledger = open_ledger(cli, config)?;
    let outcome = ledger
        .invoke(&args.function, &args.args)
        .with_context(|| format!("{} failed", args.function))?;
    print_outcome(&cli.format, &args.function, outcome)
}

fn cmd_init(cli: &Cli, config: LedgerConfig) -> anyhow::Result<()> {
    let ledger = open_ledger(cli, config)?;
    ledger.seed().context("seeding ledger")?;
    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "status": "ok" })),
        OutputFormat::Text => {
            println!(
                "{} Seeded ledger at {}",
                "✓".green().bold(),
                cli.store.display().to_string().bold()
            );
            for (owner_key, owner, cow_key, cow) in herdbook_ledger::sample_records() {
                println!(
                    "  {} {}  ←  {} {}",
                    cow_key.as_str().yellow(),
                    cow.id_no,
                    owner_key.as_str().cyan(),
                    owner.name
                );
            }
        }
    }
    Ok(())
}

fn cmd_transactions(format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let list: Vec<_> = Transaction::ALL
                .iter()
                .map(|t| serde_json::json!({ "name": t.name(), "arity": t.arity() }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        OutputFormat::Text => {
            for t in Transaction::ALL {
                let arity = match t.arity() {
                    Some(n) => n.to_string(),
                    None => "by subtype".to_string(),
                };
                println!("  {:<36} {}", t.name().bold(), arity.dimmed());
            }
        }
    }
    Ok(())
}

fn cmd_config(config: &LedgerConfig, args: &ConfigArgs) -> anyhow::Result<()> {
    let rendered = config.to_toml_string()?;
    match &args.write {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("{} Wrote {}", "✓".green(), path.display().to_string().bold());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn print_outcome(format: &OutputFormat, function: &str, outcome: Outcome) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = match outcome {
                Outcome::Done => serde_json::json!({ "status": "ok" }),
                Outcome::Absent => serde_json::json!({ "status": "absent" }),
                Outcome::Payload(bytes) => serde_json::json!({
                    "status": "ok",
                    "payload": payload_json(&bytes),
                }),
            };
            println!("{value}");
        }
        OutputFormat::Text => match outcome {
            Outcome::Done => println!("{} {}", "✓".green().bold(), function),
            Outcome::Absent => println!("{}", "(absent)".dimmed()),
            Outcome::Payload(bytes) => match serde_json::from_slice::<serde_json::Value>(&bytes) {
                Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                Err(_) => println!("{}", String::from_utf8_lossy(&bytes)),
            },
        },
    }
    Ok(())
}

/// Embed a payload as JSON when it is JSON, otherwise as a string.
fn payload_json(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(store: &std::path::Path, rest: &[&str]) -> Cli {
        let mut argv = vec!["herdbook".to_string(), "--store".into(), store.display().to_string()];
        argv.extend(rest.iter().map(|s| s.to_string()));
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn payload_json_embeds_records() {
        let value = payload_json(br#"{"Id_no":"180501-2"}"#);
        assert_eq!(value["Id_no"], "180501-2");
        assert_eq!(payload_json(b"plain"), serde_json::json!("plain"));
    }

    #[test]
    fn init_then_invoke_against_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herdbook.db");

        run_command(cli(&path, &["init"])).unwrap();
        run_command(cli(&path, &["invoke", "addRemark", "COW0", "checked", "yes"])).unwrap();

        let ledger = Herdbook::new(FileKvStore::open(&path).unwrap());
        let cow: herdbook_types::Cow = ledger.load("COW0").unwrap();
        assert_eq!(cow.remarks.first("checked"), Some("yes"));
    }

    #[test]
    fn failed_invoke_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herdbook.db");
        let err = run_command(cli(&path, &["invoke", "deleteCow", "COW0"])).unwrap_err();
        assert!(format!("{err:#}").contains("deleteCow failed"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herdbook.db");
        let missing = dir.path().join("absent.toml");
        let err = run_command(cli(
            &path,
            &["--config", missing.to_str().unwrap(), "transactions"],
        ))
        .unwrap_err();
        assert!(format!("{err:#}").contains("loading config"));
    }

    #[test]
    fn config_write_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("herdbook.toml");
        run_command(cli(
            &dir.path().join("herdbook.db"),
            &["config", "--write", out.to_str().unwrap()],
        ))
        .unwrap();
        let loaded = LedgerConfig::load(&out).unwrap();
        assert_eq!(loaded, LedgerConfig::default());
    }
}
