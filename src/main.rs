use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::path::PathBuf;

use trailv::app::App;
use trailv::config::Config;
use trailv::host::Graph;

#[derive(Parser, Debug)]
#[command(name = "trailv")]
#[command(version)]
#[command(about = "A terminal breadcrumb trail viewer for linked-notes graphs")]
#[command(
    long_about = "A terminal breadcrumb trail viewer for linked-notes graphs.

trailv keeps a bounded, deduplicated trail of the pages and blocks you visit
and renders it as a clickable breadcrumb strip. Move through the demo graph
(or your own TOML graph) and jump back along the trail with Tab + Enter."
)]
#[command(after_long_help = "KEYBINDINGS:
    j/k, Up/Down      Move through pages and blocks
    Enter             Visit the selected destination
    Tab / Shift-Tab   Focus a breadcrumb in the strip
    Enter (on strip)  Jump back to the focused breadcrumb
    q, Escape         Quit

CONFIGURATION:
    Config file: ~/.config/trailv/config.toml
    Keys: max_breadcrumbs, truncate_length, enabled")]
struct Args {
    /// Graph file (TOML) to browse; omit for the built-in demo graph
    #[arg(value_name = "GRAPH")]
    graph: Option<PathBuf>,

    /// Initial routing signal, e.g. "#/page/home"
    #[arg(long, value_name = "ROUTE")]
    route: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load();
    let graph = Graph::load(args.graph.as_deref())?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, graph, config, args.route);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    graph: Graph,
    config: Config,
    route: Option<String>,
) -> Result<()> {
    let mut app = App::new(graph, config, route);
    app.run(terminal)
}
