//! TreeSleuth — streaming filesystem risk scanner.
//!
//! Thin binary entry point. All logic lives in the `treesleuth-core`
//! and `treesleuth-cli` crates.

fn main() -> anyhow::Result<()> {
    // Initialise structured logging. Logs go to stderr so `--json`
    // output on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("TreeSleuth starting");

    treesleuth_cli::run()
}
