use clap::Parser;
use conductor_tui::cli::commands::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = conductor_tui::tui::run(cli.into_run_options()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
