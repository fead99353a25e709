#![allow(non_snake_case, non_camel_case_types)]
#![allow(clippy::needless_return)]

use std::sync::Arc;

use super::{mediator::Mediator, sessions::SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub mediator: Arc<Mediator>,
    pub sessions: Arc<dyn SessionStore>
}

impl AppState {
    pub fn new(mediator: Mediator, sessions: Arc<dyn SessionStore>) -> AppState {
        return AppState {
            mediator: Arc::new(mediator),
            sessions
        };
    }
}
