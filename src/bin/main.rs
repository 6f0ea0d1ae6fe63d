use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "eoka-codegen")]
#[command(about = "Generate puppeteer scripts from recorded browser sessions")]
#[command(version)]
struct Cli {
    /// Recording file (JSON)
    recording: PathBuf,

    /// Generation options file (YAML)
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Write the script to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit a standalone puppeteer program instead of a test case
    #[arg(long)]
    program: bool,

    /// Launch the browser headless (overrides options)
    #[arg(long, conflicts_with = "headed")]
    headless: bool,

    /// Launch the browser with a visible window (overrides options)
    #[arg(long)]
    headed: bool,

    /// Don't wrap the program in an async IIFE
    #[arg(long)]
    no_wrap_async: bool,

    /// Don't await navigations
    #[arg(long)]
    no_wait_for_navigation: bool,

    /// Don't wait for selectors before interacting
    #[arg(long)]
    no_wait_for_selector: bool,

    /// Don't separate blocks with blank lines
    #[arg(long)]
    no_blank_lines: bool,

    /// Escape quotes in recorded strings
    #[arg(long)]
    escape: bool,

    /// Validate the recording without generating
    #[arg(long)]
    check: bool,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> eoka_codegen::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let recording = eoka_codegen::Recording::load(&cli.recording)?;

    if cli.check {
        println!("Recording valid: {}", cli.recording.display());
        println!("  Events: {}", recording.recording.len());
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for event in &recording.recording {
            *counts.entry(event.action.as_str()).or_default() += 1;
        }
        for (action, count) in &counts {
            println!("    - {}: {}", action, count);
        }
        let mut frames: BTreeMap<eoka_codegen::FrameId, &str> = BTreeMap::new();
        for event in &recording.recording {
            if let Some(id) = event.frame_id.filter(|id| *id != 0) {
                frames.insert(id, event.frame_url.as_deref().unwrap_or(""));
            }
        }
        if !frames.is_empty() {
            println!("  Frames: {}", frames.len());
            for (id, url) in &frames {
                println!("    - {}: {}", id, url);
            }
        }
        println!("  Network entries: {}", recording.network_entries());
        return Ok(());
    }

    let mut options = match cli.options {
        Some(ref path) => eoka_codegen::GenerationOptions::load(path)?,
        None => eoka_codegen::GenerationOptions::default(),
    };

    // Flags override the options file
    if cli.headless {
        options.headless = true;
    }
    if cli.headed {
        options.headless = false;
    }
    if cli.no_wrap_async {
        options.wrap_async = false;
    }
    if cli.no_wait_for_navigation {
        options.wait_for_navigation = false;
    }
    if cli.no_wait_for_selector {
        options.wait_for_selector_on_click = false;
    }
    if cli.no_blank_lines {
        options.blank_lines_between_blocks = false;
    }
    if cli.escape {
        options.escape_strings = true;
    }

    let generator = eoka_codegen::Generator::new(options);
    let script = if cli.program {
        generator.generate_program(&recording.recording)
    } else {
        generator.generate_recording(&recording)
    };

    match cli.output {
        Some(ref path) => {
            std::fs::write(path, &script)?;
            info!("Wrote {} bytes to {}", script.len(), path.display());
        }
        None => print!("{}", script),
    }

    Ok(())
}
