//! Admin endpoints: RSVP list and edit views, event updates, cover upload,
//! and CSV export. Every route here goes through the Basic auth gate.

use axum::{
    Router,
    extract::{Multipart, State},
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::info;

use shindig_core::{Event, Rsvp, Totals, cover};

use crate::pages;
use crate::routes::{AppError, require_admin};
use crate::routes::public::count_or;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_list))
        .route("/admin/edit", get(admin_edit))
        .route("/edit-rsvp", post(edit_rsvp))
        .route("/update-event", post(update_event))
        .route("/upload", post(upload_cover))
        .route("/export.csv", get(export_csv))
}

/// GET /admin - all RSVPs with totals, plus event and cover forms
async fn admin_list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    require_admin(&headers, &state)?;
    let store = state.store()?;

    let event = store.load_event()?;
    let rsvps = store.load_rsvps()?;
    let totals = Totals::of(&rsvps);

    let cover_url = cover::find_cover(&state.config.static_dir).and_then(|path| {
        path.file_name()
            .map(|name| format!("/static/{}", name.to_string_lossy()))
    });

    Ok(pages::admin_page(
        event.as_ref(),
        &rsvps,
        totals,
        cover_url.as_deref(),
    ))
}

/// GET /admin/edit - per-record update/delete forms
async fn admin_edit(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    require_admin(&headers, &state)?;

    let rsvps = state.store()?.load_rsvps()?;
    let totals = Totals::of(&rsvps);

    Ok(pages::edit_page(&rsvps, totals))
}

#[derive(Deserialize)]
struct EditForm {
    index: usize,
    action: String,
    name: Option<String>,
    adults: Option<String>,
    kids: Option<String>,
    notes: Option<String>,
}

/// POST /edit-rsvp - update or delete one record by its list position
async fn edit_rsvp(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Form(form): axum::Form<EditForm>,
) -> Result<Redirect, AppError> {
    require_admin(&headers, &state)?;
    let store = state.store()?;

    match form.action.as_str() {
        "update" => {
            let rsvp = Rsvp {
                name: form.name.unwrap_or_default(),
                adults: count_or(form.adults.as_ref(), 1),
                kids: count_or(form.kids.as_ref(), 0),
                notes: form.notes.unwrap_or_default(),
            };
            store.update_rsvp(form.index, rsvp)?;
            info!(index = form.index, "updated RSVP");
        }
        "delete" => {
            let removed = store.delete_rsvp(form.index)?;
            info!(index = form.index, name = %removed.name, "deleted RSVP");
        }
        other => {
            return Err(AppError::BadRequest(format!("Unknown action: {other}")));
        }
    }

    Ok(Redirect::to("/admin/edit"))
}

#[derive(Deserialize)]
struct EventForm {
    title: String,
    datetime: String,
    location: String,
    description: String,
    // Checkboxes are simply absent when unchecked
    active: Option<String>,
}

/// POST /update-event - overwrite the event record wholesale
async fn update_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Form(form): axum::Form<EventForm>,
) -> Result<Redirect, AppError> {
    require_admin(&headers, &state)?;

    let event = Event {
        title: form.title,
        datetime: form.datetime,
        location: form.location,
        description: form.description,
        active: form.active.is_some(),
    };
    state.store()?.save_event(&event)?;
    info!(active = event.active, "updated event record");

    Ok(Redirect::to("/admin"))
}

/// POST /upload - replace the cover image
async fn upload_cover(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    require_admin(&headers, &state)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let Some(ext) = cover::allowed_extension(&filename) else {
            return Err(AppError::BadRequest(format!(
                "Unsupported image extension: {filename}"
            )));
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let path = cover::store_cover(&state.config.static_dir, &ext, &bytes)?;
        info!(path = %path.display(), "stored new cover image");
        return Ok(Redirect::to("/admin"));
    }

    Err(AppError::BadRequest("Missing file part".to_string()))
}

/// GET /export.csv - the RSVP list as a CSV attachment
async fn export_csv(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    require_admin(&headers, &state)?;
    let rsvps = state.store()?.load_rsvps()?;

    let mut out = String::from("name,adults,kids,notes\n");
    for rsvp in &rsvps {
        out.push_str(&format!(
            "{},{},{},{}\n",
            csv_field(&rsvp.name),
            rsvp.adults,
            rsvp.kids,
            csv_field(&rsvp.notes),
        ));
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"rsvps.csv\"",
            ),
        ],
        out,
    )
        .into_response())
}

/// Free-text fields get a naive comma-to-semicolon substitution instead of
/// quoting.
fn csv_field(field: &str) -> String {
    field.replace(',', ";")
}
