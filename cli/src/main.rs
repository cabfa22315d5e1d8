use clap::{CommandFactory, Parser};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::io::Write;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use scanlaunch_core::{
    read_lines, ConsoleLauncher, FormError, FormField, FormState, LaunchLog, LauncherRef,
    MultiLauncher, ScanLauncher, ScanRequest, ScanType, ScanTypeCatalog,
};

#[derive(Parser, Debug)]
#[command(
    name = "scanlaunch",
    version,
    about = "Validate scan targets and hand them to the scan launcher",
    override_usage = "scanlaunch <target>  <options>",
    after_help = "\x1b[1;36mEXAMPLES:\x1b[0m
  Single IP:                      scanlaunch 192.168.1.1
  Domain with profile:            scanlaunch scanme.nmap.org -s comprehensive
  URL (host is extracted):        scanlaunch https://example.com/login -d \"login portal\"
  Targets from file:              scanlaunch -l targets.txt -s stealth
  Request from JSON:              scanlaunch --request scan.json
  Record launches:                scanlaunch example.com -o launches.jsonl
  Validate only:                  scanlaunch example.com --dry-run
  List scan profiles:             scanlaunch --profiles"
)]
pub struct Args {
    #[arg(required_unless_present_any = ["list", "request", "profiles"])]
    pub target: Option<String>,

    #[arg(short = 's', long = "scan-type", default_value = "basic",
        value_parser = clap::builder::PossibleValuesParser::new(["basic", "comprehensive", "stealth"]),
        help = "Scan profile: basic, comprehensive or stealth")]
    pub scan_type: String,

    #[arg(short = 'd', long, help = "Description or notes for the scan")]
    pub description: Option<String>,

    #[arg(short = 'l', long = "list", help = "File containing targets (one per line)")]
    pub list: Option<String>,

    #[arg(long, conflicts_with_all = ["target", "list", "scan_type", "description"],
        help = "Load the scan request from a JSON file")]
    pub request: Option<String>,

    #[arg(short = 'o', long, help = "Append accepted requests to a JSON-lines file")]
    pub output: Option<String>,

    #[arg(long, help = "Validate targets without starting any scan")]
    pub dry_run: bool,

    #[arg(long, help = "List the available scan profiles and exit")]
    pub profiles: bool,

    #[arg(short = 'v', long, default_value_t = false, help = "Show debug logging")]
    pub verbose: bool,
}

fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let args = Args::parse();
    init_logging(args.verbose);

    if args.profiles {
        print_profiles();
        process::exit(0);
    }

    let requests = match collect_requests(&args) {
        Ok(r) => r,
        Err(e) => {
            eprint!("{}\r\n", format!("[!] {:#}", e).red());
            process::exit(1);
        }
    };

    if requests.is_empty() {
        eprint!("{}\r\n", "[!] No targets specified. Provide a target, -l <file> or --request <file>.".red());
        let mut cmd = Args::command();
        cmd.print_help().ok();
        process::exit(1);
    }

    let launcher = match build_launcher(&args) {
        Ok(l) => l,
        Err(e) => {
            eprint!("{}\r\n", format!("[!] {:#}", e).red());
            process::exit(1);
        }
    };

    let total = requests.len();
    let mut accepted = 0;
    for (i, request) in requests.into_iter().enumerate() {
        if total > 1 {
            print!(
                "\r\n{}\r\n",
                format!("━━━ Target {}/{}: {} ━━━", i + 1, total, request.target).bright_white().bold()
            );
            std::io::stdout().flush().ok();
        }
        if run_form(request, &args, launcher.as_ref()) {
            accepted += 1;
        }
    }

    if total > 1 {
        print!("\r\n{}\r\n", format!("[*] {}/{} target(s) accepted", accepted, total).bright_cyan());
        std::io::stdout().flush().ok();
    }

    if accepted == 0 {
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Turns the CLI inputs into raw requests, one per target.
fn collect_requests(args: &Args) -> anyhow::Result<Vec<ScanRequest>> {
    if let Some(ref path) = args.request {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", path, e))?;
        let request = ScanRequest::from_json(&text)
            .map_err(|e| anyhow::anyhow!("Invalid request file '{}': {}", path, e))?;
        return Ok(vec![request]);
    }

    let mut targets: Vec<String> = Vec::new();

    if let Some(ref list_path) = args.list {
        let lines = read_lines(list_path)
            .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", list_path, e))?;
        print!(
            "{}\r\n",
            format!("[+] Loaded {} target(s) from {}", lines.len(), list_path).green().bold()
        );
        std::io::stdout().flush().ok();
        targets.extend(lines);
    }

    if let Some(ref t) = args.target {
        targets.push(t.clone());
    }

    let scan_type: ScanType = args.scan_type.parse()?;
    let description = args.description.clone().unwrap_or_default();
    Ok(targets
        .into_iter()
        .map(|t| ScanRequest::new(t, scan_type, description.clone()))
        .collect())
}

fn build_launcher(args: &Args) -> anyhow::Result<LauncherRef> {
    let console = ConsoleLauncher::new_ref();
    match args.output {
        Some(ref path) if !args.dry_run => {
            // Record first so nothing is reported as queued unless the write landed.
            let log: LauncherRef = Arc::new(LaunchLog::open(path)?);
            Ok(Arc::new(MultiLauncher::new(vec![log, console])))
        }
        _ => Ok(console),
    }
}

/// Feeds one request through a fresh form the way the renderer would:
/// one input event per field, then submit. Returns whether it was accepted.
fn run_form(request: ScanRequest, args: &Args, launcher: &dyn ScanLauncher) -> bool {
    let mut form = FormState::new();
    let inputs = [
        ("target", request.target.clone()),
        ("scanType", request.scan_type.to_string()),
        ("description", request.description.clone()),
    ];
    for (field, value) in &inputs {
        if let Err(e) = form.handle_input(field, value) {
            eprint!("{}\r\n", format!("[!] {}", e).red());
            return false;
        }
    }

    if args.dry_run {
        if form.validate() {
            println!("[DRY RUN] Would scan target: {}", request.target);
            return true;
        }
        print_field_errors(&form, &request.target);
        return false;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Starting scan...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let outcome = spinner.suspend(|| form.submit(launcher));
    spinner.finish_and_clear();

    match outcome {
        Ok(()) => {
            debug!("Launcher accepted '{}'", request.target);
            form.finish_submission();
            true
        }
        Err(FormError::Invalid(_)) => {
            print_field_errors(&form, &request.target);
            false
        }
        Err(e) => {
            eprint!("{}\r\n", format!("[!] {}: {:#}", request.target, e).red());
            false
        }
    }
}

fn print_field_errors(form: &FormState, target: &str) {
    if let Some(err) = form.error_for(FormField::Target) {
        eprint!("{}\r\n", format!("[!] {}: {}", target, err).red());
    }
    std::io::stderr().flush().ok();
}

fn print_profiles() {
    print!("{}\r\n", "Scan profiles:".bright_cyan().bold());
    for profile in ScanTypeCatalog::all() {
        print!(
            "{}\r\n",
            format!("  {:<14} {}", profile.value.key(), profile.label).green().bold()
        );
        print!("    {}\r\n", profile.description);
        print!(
            "{}\r\n",
            format!("    Duration: {} | Coverage: {}", profile.duration, profile.coverage).dimmed()
        );
    }
    std::io::stdout().flush().ok();
}
