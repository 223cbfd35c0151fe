use std::sync::Arc;

use crate::config::Config;
use crate::refresh::Scheduler;
use crate::station::StationClient;
use crate::view::Page;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scheduler: Arc<Scheduler<StationClient>>,
}

impl AppState {
    /// Build the page from the configured regions and a scheduler over it.
    /// Nothing is armed until `scheduler.start()` is called.
    pub fn new(config: Config, station_client: StationClient) -> Self {
        let page = Page::new(&config.page_regions);
        let scheduler = Scheduler::new(Arc::new(station_client), page, &config);

        Self {
            config: Arc::new(config),
            scheduler: Arc::new(scheduler),
        }
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        self.scheduler.page()
    }
}
