use anyhow::Result;
use argoviz::cli::{App, Args};

fn main() -> Result<()> {
    let args = Args::parse_args();
    let app = App::from_args(&args)?;

    app.run(args)?;

    Ok(())
}
