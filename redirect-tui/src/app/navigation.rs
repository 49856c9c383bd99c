use super::*;

impl App {
    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
        self.clear_status();
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.redirects.len() {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.redirects.len().saturating_sub(1);
    }

    pub fn open_create(&mut self) {
        self.form = Some(FormState::create());
        self.navigate_to(View::Create);
    }

    /// Open the edit dialog for the selected redirect in its loading state.
    /// Returns the id to fetch.
    pub fn open_edit(&mut self) -> Option<i64> {
        let id = self.selected_redirect()?.id;
        self.form = Some(FormState::loading_edit(id));
        self.navigate_to(View::Edit);
        Some(id)
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.navigate_to(View::List);
    }

    pub fn open_delete(&mut self) {
        let Some(redirect) = self.selected_redirect() else {
            return;
        };
        self.delete_context = Some(DeleteContext {
            id: redirect.id,
            from_path: redirect.from_path.clone(),
        });
        self.navigate_to(View::ConfirmDelete);
    }

    pub fn close_delete(&mut self) {
        self.delete_context = None;
        self.navigate_to(View::List);
    }
}
