use std::process::ExitCode;

fn main() -> ExitCode {
    // `.env` may carry RUST_LOG; a missing file is fine.
    dotenvy::dotenv().ok();
    env_logger::init();

    match pce_density::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:?}");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
