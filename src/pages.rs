//! Server-rendered HTML pages.
//!
//! Markup is built inline and handed to axum as `Html`; styling comes from
//! the Pico CSS stylesheet. All user-provided text goes through [`escape`].

use axum::response::Html;

use shindig_core::{Event, Rsvp, Totals};

const PICO_CSS: &str = "https://unpkg.com/@picocss/pico@latest/css/pico.min.css";

/// Escape text for interpolation into HTML bodies and attribute values.
pub fn escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            other => other.to_string(),
        })
        .collect()
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<link rel="stylesheet" href="{PICO_CSS}">
<title>{}</title>
</head>
<body><main class="container">
{body}
</main></body>
</html>"#,
        escape(title),
    ))
}

// =============================================================================
// Public pages
// =============================================================================

pub fn event_page(event: &Event, days_until: Option<i64>, cover_url: Option<&str>) -> Html<String> {
    let mut body = String::new();

    if let Some(url) = cover_url {
        body.push_str(&format!(
            r#"<img src="{}" alt="Event cover image">
"#,
            escape(url)
        ));
    }

    body.push_str(&format!(
        r#"<h1>{}</h1>
<p><strong>{}</strong> at <strong>{}</strong><br>{}</p>
<p>{}</p>
"#,
        escape(&event.title),
        escape(&event.formatted_date()),
        escape(&event.formatted_time()),
        escape(&event.location),
        escape(&event.description),
    ));

    let past = matches!(days_until, Some(n) if n < 0);
    match days_until {
        Some(0) => body.push_str("<p><mark>Today!</mark></p>\n"),
        Some(n) if n > 0 => body.push_str(&format!("<p><mark>{n} days to go</mark></p>\n")),
        _ => {}
    }

    if past {
        body.push_str("<p>Thanks for coming!</p>\n");
    } else {
        body.push_str(
            r#"<h2>RSVP</h2>
<form action="/rsvp" method="post">
<label>Name <input name="name" required></label>
<label>Adults <input name="adults" type="number" min="0" value="1"></label>
<label>Kids <input name="kids" type="number" min="0" value="0"></label>
<label>Notes <textarea name="notes"></textarea></label>
<button type="submit">Submit RSVP</button>
</form>
"#,
        );
    }

    layout(&event.title, &body)
}

pub fn placeholder_page() -> Html<String> {
    layout(
        "RSVP",
        "<h1>No upcoming event</h1>\n<p>Check back soon for the next one.</p>",
    )
}

pub fn confirmation_page(event: Option<&Event>) -> Html<String> {
    let body = match event {
        Some(event) => format!(
            "<h1>RSVP received. Thank you!</h1>\n<p>See you on {} at {}.</p>\n<p><a href=\"/\">Back to the event page</a></p>",
            escape(&event.formatted_date()),
            escape(&event.formatted_time()),
        ),
        None => "<h1>RSVP received. Thank you!</h1>".to_string(),
    };
    layout("RSVP received", &body)
}

// =============================================================================
// Admin pages
// =============================================================================

fn totals_line(totals: Totals) -> String {
    format!(
        "<p>Adults: {} &middot; Kids: {} &middot; Total: {}</p>",
        totals.adults,
        totals.kids,
        totals.combined()
    )
}

fn rsvp_table(rsvps: &[Rsvp]) -> String {
    let rows: String = rsvps
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&r.name),
                r.adults,
                r.kids,
                escape(&r.notes),
            )
        })
        .collect();

    format!(
        "<table>\n<tr><th>Name</th><th>Adults</th><th>Kids</th><th>Notes</th></tr>\n{rows}</table>"
    )
}

pub fn admin_page(
    event: Option<&Event>,
    rsvps: &[Rsvp],
    totals: Totals,
    cover_url: Option<&str>,
) -> Html<String> {
    let mut body = String::from("<h1>Admin</h1>\n");
    body.push_str("<p><a href=\"/admin/edit\">Edit RSVPs</a> &middot; <a href=\"/export.csv\">Download CSV</a></p>\n");

    body.push_str("<h2>RSVPs</h2>\n");
    body.push_str(&totals_line(totals));
    body.push('\n');
    body.push_str(&rsvp_table(rsvps));
    body.push('\n');

    body.push_str("<h2>Event</h2>\n");
    match event {
        Some(event) => body.push_str(&event_form(event)),
        None => body.push_str("<p>No event file yet.</p>\n"),
    }

    body.push_str("<h2>Cover image</h2>\n");
    if let Some(url) = cover_url {
        body.push_str(&format!(
            r#"<img src="{}" alt="Current cover image" width="400">
"#,
            escape(url)
        ));
    }
    body.push_str(
        r#"<form action="/upload" method="post" enctype="multipart/form-data">
<input type="file" name="file" accept=".png,.jpg,.jpeg,.webp" required>
<button type="submit">Upload cover</button>
</form>
"#,
    );

    layout("Admin", &body)
}

fn event_form(event: &Event) -> String {
    let checked = if event.active { " checked" } else { "" };
    format!(
        r#"<form action="/update-event" method="post">
<label>Title <input name="title" value="{}" required></label>
<label>Date &amp; time <input name="datetime" type="datetime-local" value="{}"></label>
<label>Location <input name="location" value="{}"></label>
<label>Description <textarea name="description">{}</textarea></label>
<label><input name="active" type="checkbox" value="on"{checked}> Event is active</label>
<button type="submit">Save event</button>
</form>
"#,
        escape(&event.title),
        escape(&event.datetime),
        escape(&event.location),
        escape(&event.description),
    )
}

pub fn edit_page(rsvps: &[Rsvp], totals: Totals) -> Html<String> {
    let mut body = String::from("<h1>Edit RSVPs</h1>\n<p><a href=\"/admin\">Back to admin</a></p>\n");
    body.push_str(&totals_line(totals));
    body.push('\n');

    if rsvps.is_empty() {
        body.push_str("<p>No RSVPs yet.</p>\n");
    }

    for (index, rsvp) in rsvps.iter().enumerate() {
        body.push_str(&format!(
            r#"<form action="/edit-rsvp" method="post">
<input type="hidden" name="index" value="{index}">
<fieldset role="group">
<input name="name" value="{}" required>
<input name="adults" type="number" min="0" value="{}">
<input name="kids" type="number" min="0" value="{}">
<input name="notes" value="{}">
<button name="action" value="update">Save</button>
<button name="action" value="delete" class="secondary"
  onclick="return confirm('Delete this RSVP?')">Delete</button>
</fieldset>
</form>
"#,
            escape(&rsvp.name),
            rsvp.adults,
            rsvp.kids,
            escape(&rsvp.notes),
        ));
    }

    layout("Edit RSVPs", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_past_event_swaps_form_for_thanks() {
        let event = Event::default();
        let Html(page) = event_page(&event, Some(-3), None);

        assert!(page.contains("Thanks for coming!"));
        assert!(
            !page.contains("action=\"/rsvp\""),
            "Past event should not render the RSVP form"
        );
    }

    #[test]
    fn test_event_today_renders_today_banner() {
        let event = Event::default();
        let Html(page) = event_page(&event, Some(0), None);

        assert!(page.contains("Today!"));
        assert!(page.contains("action=\"/rsvp\""));
    }

    #[test]
    fn test_upcoming_event_counts_days() {
        let Html(page) = event_page(&Event::default(), Some(12), None);
        assert!(page.contains("12 days to go"));
    }

    #[test]
    fn test_rsvp_table_escapes_user_content() {
        let rsvps = vec![Rsvp {
            name: "<script>alert(1)</script>".to_string(),
            adults: 1,
            kids: 0,
            notes: String::new(),
        }];

        let Html(page) = admin_page(None, &rsvps, Totals::of(&rsvps), None);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
