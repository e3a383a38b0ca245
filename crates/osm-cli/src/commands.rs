use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use osm_diff::{ChangeConfig, Way};
use osm_types::Address;
use serde_json::json;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ChangeConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ChangeConfig::default(),
    };
    let output = match cli.command {
        Command::Nodes(args) => cmd_nodes(&load_way(&args.file)?, cli.format),
        Command::Closed(args) => cmd_closed(&load_way(&args.file)?, cli.format),
        Command::Address(args) => cmd_address(&load_way(&args.file)?, cli.format),
        Command::Change(args) => cmd_change(args, config, cli.format)?,
    };
    println!("{output}");
    Ok(())
}

fn load_way(path: &Path) -> anyhow::Result<Way> {
    let xml = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let way = Way::from_xml(&xml)
        .with_context(|| format!("parsing way from {}", path.display()))?;
    debug!(path = %path.display(), id = ?way.id(), "loaded way");
    Ok(way)
}

fn cmd_nodes(way: &Way, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json!(way.nodes()).to_string(),
        OutputFormat::Text => way
            .nodes()
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn cmd_closed(way: &Way, format: OutputFormat) -> String {
    let closed = way.is_closed();
    match format {
        OutputFormat::Json => json!({ "id": way.id(), "closed": closed }).to_string(),
        OutputFormat::Text if closed => format!("{} closed", "✓".green().bold()),
        OutputFormat::Text => format!("{} open", "✗".yellow()),
    }
}

fn cmd_address(way: &Way, format: OutputFormat) -> String {
    let address = way.address();
    match format {
        OutputFormat::Json => json!(address).to_string(),
        OutputFormat::Text => match address {
            Some(address) => render_address(&address),
            None => "No address.".dimmed().to_string(),
        },
    }
}

fn render_address(address: &Address) -> String {
    let known = [
        ("housename", &address.housename),
        ("housenumber", &address.housenumber),
        ("street", &address.street),
        ("city", &address.city),
        ("country", &address.country),
    ];
    let mut lines: Vec<String> = known
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .map(|v| format!("{:>12}: {}", label.bold(), v))
        })
        .collect();
    for (key, value) in &address.other {
        lines.push(format!("{:>12}: {}", key.trim_start_matches("addr_").bold(), value));
    }
    lines.join("\n")
}

fn cmd_change(args: ChangeArgs, mut config: ChangeConfig, format: OutputFormat) -> anyhow::Result<String> {
    if args.compact {
        config.indent = 0;
    }
    let mut way = load_way(&args.file)?;
    for raw in &args.remove {
        way.remove_node(raw.as_str())
            .with_context(|| format!("removing node {raw:?}"))?;
    }
    for id in &args.add {
        way.add_node(*id);
    }

    let fragment = match (&args.base, args.changeset) {
        (Some(base), _) => {
            let xml = std::fs::read_to_string(base)
                .with_context(|| format!("reading {}", base.display()))?;
            way.build_change_fragment_with(&xml, &config)?
        }
        (None, Some(changeset)) => way.change_fragment(changeset, &config)?,
        (None, None) => bail!("--changeset is required when no --base document is given"),
    };

    Ok(match format {
        OutputFormat::Json => json!({
            "id": way.id(),
            "action": way.action(),
            "nodes": way.nodes(),
            "added": way.added_nodes(),
            "fragment": fragment,
        })
        .to_string(),
        OutputFormat::Text => fragment,
    })
}
