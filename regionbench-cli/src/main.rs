use clap::Parser;
use regionbench::{matrix_from_args, Calibration, Suite, SuiteConfig};
use std::io;
use std::thread;
use tracing_subscriber::EnvFilter;

/// Stack reserved for the suite thread. Recursive fill on the largest default
/// blank canvas recurses once per pixel.
const SUITE_STACK_BYTES: usize = 1 << 30;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Instrumented benchmark of image equality, flood fill and segmentation (CSV on stdout)"
)]
struct Cli {
    /// Image sizes to test: `W` for a square or `WxH`. Tokens that are not two
    /// positive integers are skipped. Without any, a built-in matrix is used.
    #[arg(value_name = "DIMS", allow_hyphen_values = true)]
    dims: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("regionbench=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let matrix = matrix_from_args(&cli.dims);
    let calibration = Calibration::measure();
    tracing::debug!(
        ctu_sec = calibration.ctu_sec(),
        fixtures = matrix.len(),
        "calibrated"
    );

    let worker = thread::Builder::new()
        .name("suite".to_string())
        .stack_size(SUITE_STACK_BYTES)
        .spawn(move || -> io::Result<()> {
            let stdout = io::stdout();
            let mut suite = Suite::new(stdout.lock(), calibration, SuiteConfig::default());
            suite.run(&matrix)
        })?;

    match worker.join() {
        Ok(result) => result?,
        Err(panic) => std::panic::resume_unwind(panic),
    }
    Ok(())
}
