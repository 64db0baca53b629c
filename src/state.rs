use std::sync::Arc;

use crate::clock::Clock;
use crate::config::Config;
use crate::store::KvStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn KvStore>,
    pub clock: Arc<dyn Clock>,
}
