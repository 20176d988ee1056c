use std::sync::Arc;

use crate::config::Config;
use crate::email::Notifier;
use crate::sheets::SheetStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub sheet: Option<Arc<dyn SheetStore>>,
    pub notifier: Option<Arc<dyn Notifier>>,
}
