use crate::config::RedirectConfig;
use redirect_client::domain::Redirect;

mod navigation;
mod state;
pub use state::{
    DateInput, DeleteContext, DialogField, FormMode, FormState, TextInput, View,
};

pub struct App {
    pub running: bool,
    pub status_message: Option<String>,
    pub current_view: View,

    // Last list loaded from the server; replaced wholesale on every reload
    pub redirects: Vec<Redirect>,
    pub selected_index: usize,

    // Create/edit dialog
    pub form: Option<FormState>,

    // Delete confirmation
    pub delete_context: Option<DeleteContext>,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    /// Set when the server rejected the stored credential during a reload.
    pub session_expired: bool,

    pub api_url: String,
}

impl App {
    pub fn new(cfg: &RedirectConfig) -> Self {
        Self {
            running: true,
            status_message: None,
            current_view: View::List,
            redirects: Vec::new(),
            selected_index: 0,
            form: None,
            delete_context: None,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            session_expired: false,
            api_url: cfg.api_url.clone(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Replace the loaded list, keeping the selection in range.
    pub fn set_redirects(&mut self, redirects: Vec<Redirect>) {
        self.redirects = redirects;
        if self.selected_index >= self.redirects.len() {
            self.selected_index = self.redirects.len().saturating_sub(1);
        }
    }

    pub fn selected_redirect(&self) -> Option<&Redirect> {
        self.redirects.get(self.selected_index)
    }

    /// The server refused the credential: stop and let the caller clear it.
    pub fn expire_session(&mut self) {
        self.session_expired = true;
        self.quit();
    }

    /// True while a dialog has a request in flight.
    pub fn is_busy(&self) -> bool {
        self.form.as_ref().is_some_and(|f| f.is_busy)
    }
}
