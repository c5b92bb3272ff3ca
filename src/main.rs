use color_eyre::Result;
use crossterm::event::{self, Event};
use glass_diary::app::App;
use glass_diary::clock::SystemClock;
use glass_diary::entry_store::EntryStore;
use glass_diary::storage::FileStorage;
use glass_diary::theme::ThemeState;
use glass_diary::ui::Tui;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glass_diary=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("glass-diary");
    tracing::debug!(dir = %data_dir.display(), "opening diary storage");

    let store = EntryStore::load(
        Box::new(FileStorage::new(data_dir.clone())?),
        Box::new(SystemClock),
    );
    let theme = ThemeState::load(Box::new(FileStorage::new(data_dir)?));
    let mut app = App::new(store, theme, Box::new(SystemClock));

    let mut tui = Tui::new()?;
    while !app.should_quit() {
        tui.draw(&app)?;
        // short poll so entrance/exit effects keep advancing between keys
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                app.on_key(key);
            }
        }
        app.tick();
    }
    Ok(())
}
