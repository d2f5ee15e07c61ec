mod app;
mod neko;
mod platform;
mod pointer;
mod render;
mod schedule;

fn main() {
    env_logger::init();
    log::info!("neko starting up");

    if platform::prefers_reduced_motion() {
        log::info!("Reduced motion requested, not starting");
        return;
    }

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
