use std::sync::Arc;

use crate::dashboard::Composer;

#[derive(Clone)]
pub struct AppState {
    pub composer: Arc<Composer>,
}

impl AppState {
    pub fn new(composer: Composer) -> Self {
        Self {
            composer: Arc::new(composer),
        }
    }
}
