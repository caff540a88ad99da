use blocksig::cli::{self, Cli};

fn run() -> anyhow::Result<()> {
    Cli::init().execute()
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(cli::exit_code(&e));
    }
}
