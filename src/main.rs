use capture_dashboard::{app::App, settings::Config};
use clap::Parser;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "capture-dashboard")]
#[command(about = "TUI dashboard for packet-capture CSV exports")]
struct Cli {
    #[arg(help = "CSV capture files, loaded into scenario slots in order")]
    files: Vec<PathBuf>,

    #[arg(short, long, help = "Configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Tab shown on startup (overview, details, statistics)")]
    tab: Option<String>,

    #[arg(long, help = "Scenario slot selected on startup (1-based)")]
    scenario: Option<usize>,

    #[arg(long, help = "Print the current view tree as JSON and exit")]
    snapshot: bool,

    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::init();
    }

    // Load configuration
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    let mut app = App::new(config);
    app.load_files(&cli.files);

    if let Some(index) = cli.scenario {
        app.select_scenario(index);
    }
    if let Some(tab) = cli.tab {
        app.select_tab_value(&tab);
    }

    // Machine-readable export: emit the view tree instead of drawing it
    if cli.snapshot {
        println!("{}", serde_json::to_string_pretty(&app.tree)?);
        return Ok(());
    }

    println!(
        "Loaded {} of {} scenario slot(s)",
        app.store.loaded_count(),
        app.config.ui.scenario_labels.len()
    );
    println!("Starting Capture Dashboard TUI...");
    println!("Press 'q' to quit, Tab or 1-3 to switch between views, 's' to switch scenario");

    if let Err(e) = app.run() {
        eprintln!("Application error: {}", e);
        process::exit(1);
    }

    println!("Capture Dashboard stopped.");
    Ok(())
}
