//! Entry point for the redwatch TUI. Parses args, resolves the profile, and runs the App.

use std::env;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use redwatch::app::App;
use redwatch::client::RedisClient;
use redwatch::demo::{DemoSource, DEMO_ADDR};
use redwatch::logging::init_file_logging;
use redwatch::pane::MonitorPane;
use redwatch::poller::{MetricsPoller, POLL_INTERVAL};
use redwatch::profiles::{
    load_profiles, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile,
};

const USAGE_TAIL: &str = "[--profile NAME|-P NAME] [--save] [--interval MS|-i MS] [--paused] [--demo] [--dry-run] [redis://HOST:PORT[/DB]]";

#[derive(Debug, Default)]
struct ParsedArgs {
    url: Option<String>,
    profile: Option<String>,
    interval_ms: Option<u64>,
    save: bool,
    paused: bool,
    demo: bool,
    dry_run: bool,
}

fn parse_interval(v: &str) -> Result<u64, String> {
    match v.parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(format!("Invalid interval '{v}': expected milliseconds > 0")),
    }
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "redwatch".into());
    let mut parsed = ParsedArgs::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Err(format!("Usage: {prog} {USAGE_TAIL}"));
            }
            "--profile" | "-P" => {
                parsed.profile = it.next();
            }
            "--interval" | "-i" => {
                let v = it.next().unwrap_or_default();
                parsed.interval_ms = Some(parse_interval(&v)?);
            }
            "--save" => parsed.save = true,
            "--paused" => parsed.paused = true,
            "--demo" => parsed.demo = true,
            "--dry-run" => parsed.dry_run = true,
            _ if arg.starts_with("--profile=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        parsed.profile = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--interval=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    parsed.interval_ms = Some(parse_interval(v)?);
                }
            }
            _ => {
                if parsed.url.is_none() {
                    parsed.url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. Usage: {prog} {USAGE_TAIL}"));
                }
            }
        }
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Help and usage errors exit cleanly, like the other front-ends
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    if parsed.demo || matches!(parsed.profile.as_deref(), Some("demo")) {
        if parsed.dry_run {
            return Ok(());
        }
        init_logging();
        return run_demo_mode(&parsed).await;
    }

    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
        interval_ms: parsed.interval_ms,
    };

    let mut profiles_mut = profiles_file.clone();
    let entry: ProfileEntry = match req.resolve(&profiles_file) {
        ResolveProfile::Direct(entry) => {
            // Possibly save if profile specified and --save or new entry
            if let Some(name) = parsed.profile.as_ref() {
                let changed = match profiles_mut.profiles.get(name) {
                    None => true,
                    Some(existing) if *existing == entry => false,
                    Some(_) => {
                        parsed.save
                            || prompt_yes_no(&format!(
                                "Overwrite existing profile '{name}'? [y/N]: "
                            ))
                    }
                };
                if changed {
                    profiles_mut.profiles.insert(name.clone(), entry.clone());
                    if let Err(e) = save_profiles(&profiles_mut) {
                        eprintln!("Could not save profile '{name}': {e}");
                    }
                }
            }
            entry
        }
        ResolveProfile::Loaded(entry) => entry,
        ResolveProfile::PromptSelect(mut names) => {
            // Always add demo option to list
            if !names.iter().any(|n| n == "demo") {
                names.push("demo".into());
            }
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            let line = prompt_string("Enter number (or blank to abort): ")?;
            let Some(name) = line
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|idx| (1..=names.len()).contains(idx))
                .map(|idx| &names[idx - 1])
            else {
                return Ok(());
            };
            if name == "demo" {
                if parsed.dry_run {
                    return Ok(());
                }
                init_logging();
                return run_demo_mode(&parsed).await;
            }
            match profiles_mut.profiles.get(name) {
                Some(entry) => ProfileEntry {
                    url: entry.url.clone(),
                    interval_ms: parsed.interval_ms.or(entry.interval_ms),
                },
                None => return Ok(()),
            }
        }
        ResolveProfile::Missing(name) => {
            eprintln!("Profile '{name}' does not exist yet. Pass a URL to create it: redwatch --profile {name} redis://HOST:PORT");
            return Ok(());
        }
        ResolveProfile::None => {
            eprintln!("No URL provided and no profiles to select.");
            return Ok(());
        }
    };

    if parsed.dry_run {
        return Ok(());
    }

    init_logging();
    let client = RedisClient::connect(&entry.url)
        .await
        .with_context(|| format!("connecting to {}", entry.url))?;
    let addr = client.addr().to_string();

    let poller = MetricsPoller::new(Arc::new(client), MonitorPane::shared(), &addr)
        .with_interval(interval_from(entry.interval_ms));
    let mut app = App::new(poller, addr).autostart(!parsed.paused);
    app.run().await
}

fn interval_from(ms: Option<u64>) -> Duration {
    ms.map(Duration::from_millis).unwrap_or(POLL_INTERVAL)
}

fn init_logging() {
    match init_file_logging() {
        Ok(path) => info!(log = %path.display(), "logging initialized"),
        Err(e) => eprintln!("logging disabled: {e}"),
    }
}

fn prompt_yes_no(prompt: &str) -> bool {
    match prompt_string(prompt) {
        Ok(line) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

// --- Demo Mode ---

async fn run_demo_mode(parsed: &ParsedArgs) -> anyhow::Result<()> {
    warn!("running against the synthetic demo source");
    let poller = MetricsPoller::new(Arc::new(DemoSource::new()), MonitorPane::shared(), DEMO_ADDR)
        .with_interval(interval_from(parsed.interval_ms));
    let mut app = App::new(poller, "demo").autostart(!parsed.paused);
    // raw mode delivers Ctrl+C as a key event; the app's quit path restores the terminal
    app.run().await
}
