use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use lottie_preview::cli::CliArgs;
use lottie_preview::config::PreviewConfig;
use lottie_preview::model::AppModel;
use lottie_preview::runtime::App;
use lottie_preview::store::ThemeStore;

fn main() -> Result<()> {
    lottie_preview::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(|e| anyhow::anyhow!(e))?;

    let config = PreviewConfig::load();
    let themes = ThemeStore::load();
    let model = AppModel::new(config, themes);

    tracing::info!("lottie-preview starting");

    let event_loop = EventLoop::new()?;
    let mut app = App::new(model, startup);
    event_loop.run_app(&mut app)?;

    tracing::info!("lottie-preview exiting");
    Ok(())
}
