use std::sync::Arc;

use crate::config::Config;
use crate::submission::dispatcher::Dispatcher;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
}
