//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(script) = args.next() else {
        eprintln!("usage: memegen <script.json> [out_dir]");
        return ExitCode::from(2);
    };
    let out_dir = args.next().unwrap_or_else(|| ".".to_string());

    log::info!("Starting memegen");
    match memegen_app::run_script(&script, out_dir) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            log::warn!("{failures} action(s) failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
