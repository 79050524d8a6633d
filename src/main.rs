mod app;
mod config;
mod import;
mod library;
mod mpris;
mod player;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    runtime::run()
}
