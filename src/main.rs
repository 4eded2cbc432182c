//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `target_fetch` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! It opens a single hop and reports where the next one would go; it does not
//! walk the redirect chain.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;
use std::process;

use target_fetch::config::Opt;
use target_fetch::initialization::init_logger_with;
use target_fetch::{get_redirection_target, Fetcher, Response, Target};

/// What one hop produced, as printed with `--json`.
#[derive(Serialize)]
struct HopReport<'a> {
    target: &'a str,
    response: &'a Response,
    redirect: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let options = opt.fetch_options().context("Invalid request options")?;
    let policy = opt
        .redirect_policy()
        .context("Invalid --follow-redirect value")?;
    let target = Target::new(opt.target.as_str())?;

    let response = match Fetcher::new().open(&target, &options).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("target_fetch error ({}): {:#}", e.error_type(), e);
            process::exit(1);
        }
    };
    let redirect = get_redirection_target(&target, &response, policy);
    if let Some(next) = &redirect {
        info!("{target} redirects to {next} (policy {policy})");
    }

    if opt.json {
        let report = HopReport {
            target: target.as_str(),
            response: &response,
            redirect,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize response")?
        );
    } else {
        print_summary(&target, &response, redirect.as_deref());
    }
    Ok(())
}

fn print_summary(target: &Target, response: &Response, redirect: Option<&str>) {
    println!("{} [{}]", target, response.status());
    if let Some(ip) = response.ip() {
        println!("  IP: {ip}");
    }
    for (name, value) in response.headers() {
        for line in value.lines() {
            println!("  {name}: {line}");
        }
    }
    println!("  Body: {} bytes, md5 {}", response.body().len(), response.content_hash());
    if !response.tag_pattern().is_empty() {
        println!("  Tags: {}", response.tag_pattern().tags().count());
    }
    if let Some(next) = redirect {
        println!("  Redirect: {next}");
    }
}
