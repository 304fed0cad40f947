use anyhow::Result;

fn main() -> Result<()> {
    carsales_cli::cli::init_logging();
    carsales_cli::cli::run()
}
