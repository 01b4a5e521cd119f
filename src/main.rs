// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! csp-bypass CLI
//!
//! Analyze a CSP header value, a saved raw HTTP response or a live URL.

use std::env;
use std::fs;
use std::process::ExitCode;

use anyhow::{bail, Context};

use csp_bypass::{
    BypassCatalog, CapturedResponse, FindingKind, HttpClient, PassiveScanner, ScanIssue,
    ScannerConfig, Severity,
};

/// Options shared by every command
#[derive(Debug, Default)]
struct Options {
    positional: Vec<String>,
    header: Option<String>,
    url: Option<String>,
    catalog: Option<String>,
    disabled: Vec<String>,
    json: bool,
    lenient: bool,
    insecure: bool,
}

impl Options {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut options = Options::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--json" => options.json = true,
                "--lenient" => options.lenient = true,
                "--insecure" | "-k" => options.insecure = true,
                "--header" => options.header = Some(value_of(&mut iter, arg)?),
                "--url" => options.url = Some(value_of(&mut iter, arg)?),
                "--catalog" => options.catalog = Some(value_of(&mut iter, arg)?),
                "--disable" => options.disabled.push(value_of(&mut iter, arg)?),
                flag if flag.starts_with("--") => bail!("unknown option {}", flag),
                _ => options.positional.push(arg.clone()),
            }
        }

        Ok(options)
    }

    fn config(&self) -> anyhow::Result<ScannerConfig> {
        let mut config = ScannerConfig::new()
            .strict_directives(!self.lenient)
            .ignore_https_errors(self.insecure);

        for id in &self.disabled {
            let kind = FindingKind::from_id(id).with_context(|| format!("unknown rule '{}'", id))?;
            config = config.disable_rule(kind);
        }

        if let Some(ref path) = self.catalog {
            let catalog = BypassCatalog::from_file(path)
                .with_context(|| format!("failed to load catalog {}", path))?;
            config = config.bypasses(catalog);
        }

        Ok(config)
    }
}

fn value_of<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> anyhow::Result<String> {
    iter.next()
        .cloned()
        .with_context(|| format!("{} requires a value", flag))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("csp_bypass=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "analyze" => analyze(&args[2..]),
        "raw" => analyze_raw(&args[2..]),
        "fetch" => fetch(&args[2..]).await,
        "catalog" => print_catalog(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("csp-bypass {}", csp_bypass::VERSION);
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(issues) if issues.iter().any(|i| i.severity() == Severity::High) => ExitCode::from(2),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"csp-bypass - Passive Content-Security-Policy analyzer

USAGE:
    csp-bypass <COMMAND> [OPTIONS]

COMMANDS:
    analyze <value>   Analyze a CSP header value
    raw <file>        Analyze the headers of a saved raw HTTP response
    fetch <url>       Fetch a URL and analyze its CSP headers
    catalog           List known bypass domains
    help              Show this help message
    version           Show version information

OPTIONS:
    --header <name>   Header name for `analyze` (default: Content-Security-Policy)
    --url <url>       URL to report for `raw`
    --catalog <file>  Merge extra bypass entries from a JSON file
    --disable <rule>  Skip a rule (deprecated-header, unsafe-content-source,
                      wildcard-content-source, missing-directive,
                      weak-default-source, known-bypass)
    --lenient         Skip unknown directives instead of rejecting the header
    --insecure, -k    Accept invalid TLS certificates for `fetch`
    --json            Print issues as JSON

EXIT STATUS:
    0 no high severity issues, 1 error, 2 high severity issues found

EXAMPLES:
    csp-bypass analyze "default-src 'self'; script-src 'self' *.googleapis.com"
    csp-bypass analyze --header X-WebKit-CSP "default-src *"
    csp-bypass raw response.txt --url https://example.com/
    csp-bypass fetch https://example.com --json
"#
    );
}

fn analyze(args: &[String]) -> anyhow::Result<Vec<ScanIssue>> {
    let options = Options::parse(args)?;
    let value = options
        .positional
        .first()
        .context("Usage: csp-bypass analyze <value>")?;
    let header = options
        .header
        .clone()
        .unwrap_or_else(|| "Content-Security-Policy".to_string());

    let mut config = options.config()?;
    // an explicit --header is always analyzed
    config = config.header_name(header.clone());

    let scanner = PassiveScanner::with_config(config);
    let findings = scanner.analyze_header(&header, value)?;
    let issues: Vec<ScanIssue> = findings
        .into_iter()
        .map(|finding| ScanIssue {
            url: options.url.clone().unwrap_or_default(),
            header_name: header.clone(),
            finding,
        })
        .collect();

    report(&issues, options.json)?;
    Ok(issues)
}

fn analyze_raw(args: &[String]) -> anyhow::Result<Vec<ScanIssue>> {
    let options = Options::parse(args)?;
    let path = options
        .positional
        .first()
        .context("Usage: csp-bypass raw <file>")?;
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path))?;

    let exchange = CapturedResponse::from_raw(options.url.clone().unwrap_or_default(), &raw);
    if exchange.headers.is_empty() {
        tracing::warn!(file = %path, "No headers found");
    }

    let issues = PassiveScanner::with_config(options.config()?).scan(&exchange);
    report(&issues, options.json)?;
    Ok(issues)
}

async fn fetch(args: &[String]) -> anyhow::Result<Vec<ScanIssue>> {
    let options = Options::parse(args)?;
    let url = options
        .positional
        .first()
        .context("Usage: csp-bypass fetch <url>")?;

    let config = options.config()?;
    let client = HttpClient::new(&config)?;
    let response = client
        .fetch(url)
        .await
        .with_context(|| format!("failed to fetch {}", url))?;

    let scanner = PassiveScanner::with_config(config);
    if !response
        .headers
        .iter()
        .any(|(name, _)| scanner.config().is_policy_header(name))
    {
        tracing::info!(url = %response.url, "No CSP header in response");
    }

    let issues = scanner.scan(&response);
    report(&issues, options.json)?;
    Ok(issues)
}

fn print_catalog(args: &[String]) -> anyhow::Result<Vec<ScanIssue>> {
    let options = Options::parse(args)?;
    let catalog = options.config()?.catalog();

    for (directive, bypasses) in catalog.iter() {
        println!("\n=== {} ({}) ===", directive, bypasses.len());
        for bypass in bypasses {
            println!("  - {}", bypass.domain);
            println!("      {}", bypass.payload);
        }
    }

    Ok(Vec::new())
}

fn report(issues: &[ScanIssue], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(issues)?);
        return Ok(());
    }

    if issues.is_empty() {
        println!("[OK] No CSP issues detected");
        return Ok(());
    }

    println!("[!] CSP issues ({}):", issues.len());
    for issue in issues {
        println!(
            "  [{:?}] {} <- {}",
            issue.severity(),
            issue.finding.detail(),
            issue.header_name
        );
    }

    Ok(())
}
