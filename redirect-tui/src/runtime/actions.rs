use crate::app::{App, FormMode, FormState, View};
use redirect_client::{RedirectClient, RedirectError, TokenProvider};

use super::action_queue::Action;

pub(super) async fn run_action<T: TokenProvider>(
    action: Action,
    app: &mut App,
    client: &RedirectClient<T>,
) {
    match action {
        Action::ReloadRedirects => {
            reload_redirects(app, client).await;
        }
        Action::LoadRedirectForEdit { id } => {
            load_redirect_for_edit(id, app, client).await;
        }
        Action::SubmitForm => {
            submit_form(app, client).await;
        }
        Action::ConfirmDelete => {
            confirm_delete(app, client).await;
        }
    }
}

/// Replace the list with the server's current state.
pub(super) async fn reload_redirects<T: TokenProvider>(app: &mut App, client: &RedirectClient<T>) {
    match client.list().await {
        Ok(redirects) => {
            tracing::debug!("Loaded {} redirects", redirects.len());
            app.set_redirects(redirects);
        }
        Err(RedirectError::Unauthorized) => {
            tracing::info!("Stored token rejected, ending session");
            app.expire_session();
        }
        Err(e) => {
            app.set_status(format!("Could not load redirects: {}", e));
        }
    }
}

async fn load_redirect_for_edit<T: TokenProvider>(
    id: i64,
    app: &mut App,
    client: &RedirectClient<T>,
) {
    let result = client.get(id).await;

    // The dialog may have been closed while loading.
    let still_open = app
        .form
        .as_ref()
        .is_some_and(|f| f.mode == FormMode::Edit { id });
    if !still_open {
        return;
    }

    match result {
        Ok(redirect) => match FormState::edit(&redirect) {
            Ok(state) => app.form = Some(state),
            Err(e) => {
                app.close_form();
                app.set_status(format!("Could not edit redirect: {}", e));
            }
        },
        Err(RedirectError::NotFound) => {
            app.close_form();
            reload_redirects(app, client).await;
            app.set_status("Redirect no longer exists".to_string());
        }
        Err(e) => {
            app.close_form();
            app.set_status(format!("Could not load redirect: {}", e));
        }
    }
}

async fn submit_form<T: TokenProvider>(app: &mut App, client: &RedirectClient<T>) {
    let Some(form) = app.form.as_mut() else {
        return;
    };
    let mode = form.mode;

    let request = match form.to_form().submission() {
        Ok(request) => request,
        Err(RedirectError::ValidationFailed(errors)) => {
            form.errors = errors;
            form.is_busy = false;
            return;
        }
        Err(e) => {
            form.is_busy = false;
            app.set_status(format!("Save failed: {}", e));
            return;
        }
    };

    let result = match mode {
        FormMode::Create => client.create(&request).await,
        FormMode::Edit { id } => client.update(id, &request).await,
    };

    match result {
        Ok(()) => {
            app.close_form();
            reload_redirects(app, client).await;
            if app.status_message.is_none() {
                app.set_status(match mode {
                    FormMode::Create => "Redirect created".to_string(),
                    FormMode::Edit { .. } => "Redirect updated".to_string(),
                });
            }
        }
        Err(e) => {
            if let Some(form) = app.form.as_mut() {
                form.is_busy = false;
            }
            app.set_status(format!("Save failed: {}", e));
        }
    }
}

async fn confirm_delete<T: TokenProvider>(app: &mut App, client: &RedirectClient<T>) {
    let Some(ctx) = app.delete_context.take() else {
        return;
    };

    match client.delete(ctx.id).await {
        // Already gone counts as deleted.
        Ok(()) | Err(RedirectError::NotFound) => {
            app.navigate_to(View::List);
            reload_redirects(app, client).await;
            if app.status_message.is_none() {
                app.set_status(format!("Deleted {}", ctx.from_path));
            }
        }
        Err(e) => {
            app.navigate_to(View::List);
            app.set_status(format!("Delete failed: {}", e));
        }
    }
}
