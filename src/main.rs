use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = media_collect::cli::parse();
    app::run(args)
}
