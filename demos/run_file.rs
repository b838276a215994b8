//! Run a Brewin program from its JSON AST on stdin/stdout.
//!
//! ```text
//! cargo run --example run_file -- tests/fixtures/sum_inputs.json
//! RUST_LOG=brewin=debug BREWIN_TRACE=1 cargo run --example run_file -- prog.json
//! ```

use anyhow::{bail, Context};
use brewin::parser::load_program_file;
use brewin::{run_program_with_config, InterpreterConfig, StdConsole};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: run_file <program.json>");
    };

    let program =
        load_program_file(&path).with_context(|| format!("failed to load {}", path))?;
    let config = InterpreterConfig::from_env();
    let mut console = StdConsole::new();

    if let Err(err) = run_program_with_config(&program, &mut console, config) {
        eprintln!("{:?}: {}", err.kind(), err);
        std::process::exit(1);
    }
    Ok(())
}
