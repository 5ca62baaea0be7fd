//! Shared application state for all routes. Immutable after startup.

use crate::render::Renderer;
use crate::settings::Settings;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub renderer: Arc<Renderer>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, renderer: Renderer, settings: Settings) -> Self {
        AppState {
            store,
            renderer: Arc::new(renderer),
            settings: Arc::new(settings),
        }
    }
}
