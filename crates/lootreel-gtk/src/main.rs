mod gui;
mod sys;

use gui::app::AppModel;
use lootreel::config;
use lootreel::source::TextFileSource;
use lootreel::sys::runtime;
use lootreel::{CaseOpener, TIER_TABLE};
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_default();
    let source = TextFileSource::new(config.items_path());
    let audio = sys::audio::open(config.audio.enabled);
    let opener = CaseOpener::from_source(
        &source,
        &TIER_TABLE,
        config.reel.clone(),
        config.seed,
        audio,
    )?;
    log::info!(
        "{} items loaded from {}",
        opener.item_count(),
        source.path().display()
    );

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    let items_watch = runtime::start_background_services(tx, source.path().to_path_buf());

    let app = RelmApp::new("org.lootreel.gtk");

    app.run::<AppModel>((opener, source, rx, items_watch));
    Ok(())
}
