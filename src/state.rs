//! Shared application state for all routes. Built once in `main` and handed to the routers.

use crate::store::StudentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StudentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }
}
