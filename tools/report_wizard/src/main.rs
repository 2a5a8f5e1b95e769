use anyhow::Context;
use clap::Parser;
use cybersafe_core::case::status::lookup_case_status;
use cybersafe_core::config::WizardConfig;
use cybersafe_core::report::evidence::{IncomingFile, UrlInputProvider};
use cybersafe_core::report::model::{CHOICE_GROUPS, FIELD_KEYS};
use cybersafe_core::report::render::{render_evidence_manifest_csv, render_review_markdown};
use cybersafe_core::report::submit::SimulatedSubmitter;
use cybersafe_core::report::wizard::{ReportWizard, WizardStage};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Walks through the incident report form from a terminal.
#[derive(Debug, Parser)]
#[command(name = "report_wizard", version)]
struct Args {
    /// JSON config file. Environment variables are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the simulated submission delay.
    #[arg(long)]
    latency_ms: Option<u64>,
}

struct LineSource {
    inner: Box<dyn BufRead>,
}

impl LineSource {
    fn next_line(&mut self) -> Option<String> {
        let mut buf = String::new();
        match self.inner.read_line(&mut buf) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(buf.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

struct PromptUrl<'a> {
    lines: &'a mut LineSource,
}

impl UrlInputProvider for PromptUrl<'_> {
    fn request_url(&mut self) -> Option<String> {
        prompt("Enter evidence URL: ");
        self.lines.next_line()
    }
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = io::stdout().flush();
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "report_wizard=info,cybersafe_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => WizardConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WizardConfig::from_env().context("loading config from environment")?,
    };
    if let Some(ms) = args.latency_ms {
        config.submit_latency_ms = ms;
    }
    tracing::info!(prefix = %config.case_id_prefix, "report wizard ready");

    let submitter = SimulatedSubmitter::from_config(&config);
    let mut wizard = ReportWizard::new(config);
    let mut lines = LineSource {
        inner: Box::new(io::BufReader::new(io::stdin())),
    };

    println!("CyberSafe incident reporting. Type `help` for commands, `start` to begin.");
    loop {
        prompt(&stage_prompt(wizard.stage()));
        let Some(line) = lines.next_line() else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let result = match cmd {
            "quit" | "exit" => break,
            "help" => {
                print_help();
                Ok(())
            }
            "start" => wizard.start().map(|s| println!("Section {}: {}", s.number(), s.title())),
            "next" => wizard
                .advance()
                .map(|s| println!("Section {}: {}", s.number(), s.title())),
            "back" => wizard
                .back()
                .map(|s| println!("Section {}: {}", s.number(), s.title())),
            "set" => match rest.split_once(' ') {
                Some((key, value)) => wizard.set_field(key, value.trim()),
                None => wizard.set_field(rest, ""),
            },
            "toggle" => match rest.split_once(' ') {
                Some((group, value)) => wizard
                    .toggle_choice(group, value.trim())
                    .map(|on| println!("{} {}", value.trim(), if on { "selected" } else { "cleared" })),
                None => {
                    println!("usage: toggle <group> <value>");
                    Ok(())
                }
            },
            "attach" => attach(&mut wizard, rest),
            "rm-file" => wizard
                .remove_file(rest)
                .map(|removed| if !removed { println!("no file with id {}", rest) }),
            "add-url" => {
                let added = if rest.is_empty() {
                    wizard.add_url_from(&mut PromptUrl { lines: &mut lines })
                } else {
                    wizard.add_url(rest)
                };
                added.map(|id| {
                    if let Some(id) = id {
                        println!("added {}", id);
                    }
                })
            }
            "describe-url" => {
                let (id, text) = rest.split_once(' ').unwrap_or((rest, ""));
                wizard
                    .set_url_description(id, text.trim())
                    .map(|found| if !found { println!("no link with id {}", id) })
            }
            "encrypt" => match rest {
                "on" => wizard.set_encryption(true),
                "off" => wizard.set_encryption(false),
                _ => {
                    println!("usage: encrypt on|off");
                    Ok(())
                }
            },
            "password" => wizard.set_field("encryption_password", rest),
            "check" => {
                if let Some(check) = wizard.check_current() {
                    if check.passed() {
                        println!("All required fields are filled in.");
                    } else {
                        println!("Missing: {}", check.missing.join(", "));
                    }
                }
                Ok(())
            }
            "review" => {
                println!("{}", render_review_markdown(wizard.draft()));
                Ok(())
            }
            "manifest" => render_evidence_manifest_csv(wizard.draft()).map(|csv| print!("{}", csv)),
            "submit" => {
                println!("Submitting securely...");
                wizard.submit(&submitter).map(|receipt| {
                    println!("Report submitted. Your case ID: {}", receipt.case_id);
                    println!("Keep it safe. Helpline: {}", wizard.config().helpline);
                    if let Ok(json) = serde_json::to_string_pretty(&receipt) {
                        println!("{}", json);
                    }
                })
            }
            "another" => wizard.submit_another(),
            "status" => lookup_case_status(&wizard.config().case_id_prefix, rest).map(|view| {
                println!("{}: {}", view.case_id, view.stage.label());
                for stage in view.history {
                    println!("  - {}", stage.label());
                }
            }),
            other => {
                println!("unknown command `{}`; type `help`", other);
                Ok(())
            }
        };

        if let Some(notice) = wizard.take_notice() {
            println!("\n[!] {}\n", notice);
        } else if let Err(e) = result {
            println!("error: {}", e);
        }
    }
    Ok(())
}

/// Reads every path it can and attaches those. Unreadable paths are reported one by one.
fn attach(wizard: &mut ReportWizard, rest: &str) -> cybersafe_core::error::CoreResult<()> {
    let paths = match split_paths(rest) {
        Ok(paths) if !paths.is_empty() => paths,
        Ok(_) => {
            println!("usage: attach <path>...");
            return Ok(());
        }
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };
    let max_bytes = wizard.config().max_evidence_file_bytes;
    let mut batch = Vec::with_capacity(paths.len());
    for path in &paths {
        match IncomingFile::from_path(path, max_bytes) {
            Ok(file) => batch.push(file),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "evidence file skipped");
                println!("skipped {}: {}", path, e);
            }
        }
    }
    if batch.is_empty() {
        return Ok(());
    }
    let outcome = wizard.attach_files(batch)?;
    for id in &outcome.accepted_ids {
        println!("added {}", id);
    }
    Ok(())
}

/// Splits on whitespace, keeping quoted runs together so paths may contain spaces.
fn split_paths(input: &str) -> Result<Vec<String>, String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    for c in input.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    out.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if let Some(q) = quote {
        return Err(format!("unterminated {} in path list", q));
    }
    if in_token {
        out.push(current);
    }
    Ok(out)
}

fn stage_prompt(stage: &WizardStage) -> String {
    match stage {
        WizardStage::Intro => "[intro] > ".to_string(),
        WizardStage::Editing(s) => format!("[{}/6 {}] > ", s.number(), s.title()),
        WizardStage::Submitting => "[submitting] > ".to_string(),
        WizardStage::Submitted(r) => format!("[submitted {}] > ", r.case_id),
    }
}

fn print_help() {
    println!("commands:");
    println!("  start | next | back | check | review | manifest | submit | another | quit");
    println!("  set <field> <value>        fields: {}", FIELD_KEYS.join(", "));
    println!("  toggle <group> <value>     groups: {}", CHOICE_GROUPS.join(", "));
    println!("  attach <path>...           add evidence files; quote paths with spaces");
    println!("  rm-file <id>");
    println!("  add-url [url]              prompts when no url is given");
    println!("  describe-url <id> <text>");
    println!("  encrypt on|off, password <text>");
    println!("  status <case-id>           look up a case");
}
