//! Public event page and RSVP submission.

use axum::{
    Form, Router,
    extract::State,
    response::Html,
    routing::{get, post},
};
use chrono::Local;
use serde::Deserialize;
use tracing::info;

use shindig_core::{Rsvp, cover};

use crate::pages;
use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/rsvp", post(submit_rsvp))
}

/// GET / - the public event page
async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let store = state.store()?;

    let event = match store.load_event()? {
        Some(event) if event.active => event,
        _ => return Ok(pages::placeholder_page()),
    };

    let cover_url = cover::find_cover(&state.config.static_dir).and_then(|path| {
        path.file_name()
            .map(|name| format!("/static/{}", name.to_string_lossy()))
    });

    let today = Local::now().date_naive();
    Ok(pages::event_page(
        &event,
        event.days_until(today),
        cover_url.as_deref(),
    ))
}

#[derive(Deserialize)]
struct RsvpForm {
    name: Option<String>,
    adults: Option<String>,
    kids: Option<String>,
    notes: Option<String>,
}

/// Counts come in as free text; anything that does not parse as a
/// non-negative integer counts as zero.
pub(crate) fn count_or(raw: Option<&String>, missing_default: u32) -> u32 {
    match raw {
        Some(value) => value.trim().parse().unwrap_or(0),
        None => missing_default,
    }
}

/// POST /rsvp - append a submission and confirm
async fn submit_rsvp(
    State(state): State<AppState>,
    Form(form): Form<RsvpForm>,
) -> Result<Html<String>, AppError> {
    let rsvp = Rsvp {
        name: form.name.unwrap_or_default(),
        adults: count_or(form.adults.as_ref(), 1),
        kids: count_or(form.kids.as_ref(), 0),
        notes: form.notes.unwrap_or_default(),
    };

    let store = state.store()?;
    store.append_rsvp(rsvp)?;
    info!("stored new RSVP");

    let event = store.load_event()?;
    Ok(pages::confirmation_page(event.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_coercion_rules() {
        // Parse failures fall back to zero
        assert_eq!(count_or(Some(&"abc".to_string()), 1), 0);
        assert_eq!(count_or(Some(&"-2".to_string()), 1), 0);
        assert_eq!(count_or(Some(&"".to_string()), 1), 0);

        // Absent fields use the per-field default
        assert_eq!(count_or(None, 1), 1);
        assert_eq!(count_or(None, 0), 0);

        // Honest values pass through, whitespace tolerated
        assert_eq!(count_or(Some(&" 3 ".to_string()), 1), 3);
    }
}
