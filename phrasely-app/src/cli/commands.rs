use crate::api::dto::{ApplyRequest, PreviewOk, PreviewRequest};
use crate::api::server as api_server;
use crate::cli::opts::*;

use anyhow::{Context, Result};
use phrasely_core::{apply_rating, compute_previews, Rating};
use std::io::Read;
use std::path::PathBuf;

pub async fn run_cli(args: Cli) -> Result<()> {
    match args.cmd {
        Command::Preview(cmd) => preview_cmd(cmd),
        Command::Apply(cmd) => apply_cmd(cmd),
        Command::Api(api) => {
            let addr: std::net::SocketAddr = api.addr.parse()?;
            api_server::run(addr).await
        }
    }
}

fn preview_cmd(cmd: PreviewCmd) -> Result<()> {
    let request: PreviewRequest =
        serde_json::from_str(&read_request(&cmd.file)?).context("parse request JSON")?;
    let (card, now, config) = request.into_parts()?;
    let previews = compute_previews(&card, now, &config)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&PreviewOk::new(previews))?);
    } else {
        for rating in Rating::ALL {
            let p = previews.get(rating);
            println!(
                "{}\t{}\t{}ms\t{}",
                rating.as_str(),
                p.label,
                p.interval_ms,
                p.due_at.to_rfc3339()
            );
        }
    }
    Ok(())
}

fn apply_cmd(cmd: ApplyCmd) -> Result<()> {
    let mut request: ApplyRequest =
        serde_json::from_str(&read_request(&cmd.file)?).context("parse request JSON")?;
    if let Some(raw) = cmd.rating {
        request.rating = Some(raw);
    }
    let (card, now, config, rating) = request.into_parts()?;
    let outcome = apply_rating(&card, rating, now, &config)?;

    println!(
        "→ {} in {} (due {})",
        rating.as_str(),
        outcome.applied.label,
        outcome.applied.due_at.to_rfc3339()
    );
    println!("{}", serde_json::to_string_pretty(&outcome.updated_card)?);
    Ok(())
}

fn read_request(file: &Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
