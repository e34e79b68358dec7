// Application state for HTTP handlers
use crate::application::session_service::SessionService;

#[derive(Clone)]
pub struct AppState {
    pub session: SessionService,
}
