use anyhow::{bail, Context};
use colored::Colorize;
use froth_stash::{CodecKind, LocalBlobStore, Stash, StashConfig, Value, ValueKind};
use serde_json::json;

use crate::cli::*;

type CliStash = Stash<LocalBlobStore, CodecKind>;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    tracing::debug!(
        destination = %config.destination.display(),
        asset = %config.asset,
        codec = %config.codec,
        "resolved stash config"
    );

    match cli.command {
        Command::List => cmd_list(&config, &cli.format),
        Command::Get(ref args) => cmd_get(&config, args, &cli.format),
        Command::Set(ref args) => cmd_set(&config, args),
        Command::SetMany(ref args) => cmd_set_many(&config, args),
        Command::Assets => cmd_assets(&config, &cli.format),
    }
}

/// Config file first, then command-line overrides.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<StashConfig> {
    let mut config = match &cli.config {
        Some(path) => StashConfig::load(path)?,
        None => StashConfig::default(),
    };
    if let Some(dest) = &cli.dest {
        config.destination = dest.clone();
    }
    if let Some(asset) = &cli.asset {
        config.asset = asset.clone();
    }
    if let Some(codec) = cli.codec {
        config.codec = codec;
    }
    Ok(config)
}

fn open(config: &StashConfig) -> anyhow::Result<CliStash> {
    Stash::from_config(config).with_context(|| {
        format!(
            "opening stash {} in {}",
            config.asset,
            config.destination.display()
        )
    })
}

fn cmd_list(config: &StashConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let stash = open(config)?;
    match format {
        OutputFormat::Json => println!("{}", json!(stash.all())),
        OutputFormat::Text => {
            if stash.is_empty() {
                println!("Stash {} is empty.", config.asset.bold());
            }
            for (key, value) in stash.values() {
                println!("{} {} {}", key.bold(), format!("({})", value.kind()).dimmed(), value);
            }
        }
    }
    Ok(())
}

fn cmd_get(config: &StashConfig, args: &GetArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let stash = open(config)?;
    let value = match args.expected_kind() {
        None => stash.get(&args.key).cloned(),
        Some(ValueKind::Text) => stash.get_string(&args.key)?.map(Value::from),
        Some(ValueKind::TextList) => stash
            .get_string_list(&args.key)?
            .map(|l| Value::TextList(l.to_vec())),
        Some(ValueKind::Integer) => stash.get_int(&args.key)?.map(Value::Integer),
    };

    let Some(value) = value else {
        bail!("key not found: {}", args.key);
    };

    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "key": args.key, "kind": value.kind().to_string(), "value": value })
        ),
        OutputFormat::Text => println!("{value}"),
    }
    Ok(())
}

fn cmd_set(config: &StashConfig, args: &SetArgs) -> anyhow::Result<()> {
    let mut stash = open(config)?;
    match args.kind.kind() {
        ValueKind::Text => stash.set_string(args.key.as_str(), args.value.as_str())?,
        ValueKind::TextList => stash.set_string_list(args.key.as_str(), split_list(&args.value))?,
        ValueKind::Integer => stash.set_int(args.key.as_str(), parse_int(&args.key, &args.value)?)?,
    }
    println!("{} Set {}", "✓".green().bold(), args.key.bold());
    Ok(())
}

fn cmd_set_many(config: &StashConfig, args: &SetManyArgs) -> anyhow::Result<()> {
    let pairs = args
        .pairs
        .iter()
        .map(|p| split_pair(p))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut stash = open(config)?;
    match args.kind.kind() {
        ValueKind::Text => stash.set_many_strings(pairs.iter().copied())?,
        ValueKind::TextList => stash.set_many_string_lists(
            pairs.iter().map(|(k, v)| (*k, split_list(v))),
        )?,
        ValueKind::Integer => {
            let ints = pairs
                .iter()
                .map(|(k, v)| -> anyhow::Result<(String, i64)> {
                    Ok((k.to_string(), parse_int(k, v)?))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            stash.set_many_ints(ints)?
        }
    }
    println!("{} Set {} keys", "✓".green().bold(), pairs.len().to_string().bold());
    Ok(())
}

fn cmd_assets(config: &StashConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let store = LocalBlobStore::open(&config.destination)?;
    let assets = store.assets()?;
    match format {
        OutputFormat::Json => println!("{}", json!(assets)),
        OutputFormat::Text => {
            if assets.is_empty() {
                println!("No stashes in {}.", config.destination.display());
            }
            for asset in &assets {
                println!("{asset}");
            }
        }
    }
    Ok(())
}

fn split_pair(pair: &str) -> anyhow::Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => bail!("expected key=value, got {pair:?}"),
    }
}

/// Comma-separated list; an empty string is an empty list.
fn split_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(|s| s.trim().to_string()).collect()
}

fn parse_int(key: &str, value: &str) -> anyhow::Result<i64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("value for {key} is not an integer: {value:?}"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn split_pair_parses() {
        assert_eq!(split_pair("a=1").unwrap(), ("a", "1"));
        assert_eq!(split_pair("a=b=c").unwrap(), ("a", "b=c"));
        assert_eq!(split_pair("empty=").unwrap(), ("empty", ""));
        assert!(split_pair("novalue").is_err());
        assert!(split_pair("=1").is_err());
    }

    #[test]
    fn split_list_parses() {
        assert_eq!(split_list("a, b,c"), vec!["a", "b", "c"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn parse_int_reports_key() {
        assert_eq!(parse_int("n", " 7 ").unwrap(), 7);
        let err = parse_int("n", "seven").unwrap_err();
        assert!(err.to_string().contains("n"));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("froth.toml");
        std::fs::write(&path, "asset = \"notes\"\ncodec = \"json\"\n").unwrap();
        let path = path.to_str().unwrap();

        let config = resolve_config(&cli(&["froth", "-c", path, "list"])).unwrap();
        assert_eq!(config.asset, "notes");
        assert_eq!(config.codec, CodecKind::Json);

        let config =
            resolve_config(&cli(&["froth", "-c", path, "--asset", "other", "list"])).unwrap();
        assert_eq!(config.asset, "other");
        assert_eq!(config.codec, CodecKind::Json);
    }

    #[test]
    fn set_and_set_many_write_through() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().to_str().unwrap();

        run_command(cli(&["froth", "-d", dest, "-a", "catalog", "set", "title", "Froth"])).unwrap();
        run_command(cli(&["froth", "-d", dest, "-a", "catalog", "set-many", "a=1", "b=2", "--int"]))
            .unwrap();
        run_command(cli(&["froth", "-d", dest, "-a", "catalog", "set", "tags", "x,y", "--list"]))
            .unwrap();

        let stash = Stash::open(dest, "catalog").unwrap();
        assert_eq!(stash.get_string("title").unwrap(), Some("Froth"));
        assert_eq!(stash.get_int("b").unwrap(), Some(2));
        assert_eq!(stash.get_string_list("tags").unwrap().unwrap(), ["x", "y"]);
    }

    #[test]
    fn get_with_wrong_kind_fails() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().to_str().unwrap();
        run_command(cli(&["froth", "-d", dest, "set", "n", "5", "--int"])).unwrap();

        assert!(run_command(cli(&["froth", "-d", dest, "get", "n", "--int"])).is_ok());
        assert!(run_command(cli(&["froth", "-d", dest, "get", "n", "--text"])).is_err());
        assert!(run_command(cli(&["froth", "-d", dest, "get", "missing"])).is_err());
    }

    #[test]
    fn bad_integer_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().to_str().unwrap();
        let result = run_command(cli(&["froth", "-d", dest, "set-many", "a=1", "b=x", "--int"]));
        assert!(result.is_err());
        assert!(LocalBlobStore::open(dest).unwrap().assets().unwrap().is_empty());
    }
}
