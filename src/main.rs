use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = xmv::cli::parse();
    app::run(args)
}
