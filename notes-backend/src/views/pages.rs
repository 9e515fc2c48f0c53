use super::{escape_html, layout};
use crate::models::{Flash, Note, Session};

pub fn login_page(session: &Session, flashes: &[Flash]) -> String {
    let content = r#"<div class="login-form-container">
<h1>Log in</h1>
<form method="POST" action="/login">
<label for="username">Username:</label>
<input type="text" id="username" name="username" required autocomplete="username">
<label for="password">Password:</label>
<input type="password" id="password" name="password" required autocomplete="current-password">
<button type="submit">Log in</button>
</form>
</div>"#;
    layout("Log in", session, flashes, content)
}

pub fn index_page(session: &Session, flashes: &[Flash], notes: &[Note]) -> String {
    let body = if notes.is_empty() {
        r#"<p class="no-notes-message">No notes yet. <a href="/add_note">Add your first note!</a></p>"#
            .to_string()
    } else {
        let cards: String = notes
            .iter()
            .map(|note| {
                format!(
                    "<div class=\"note-card\"><h2>{}</h2><p>{}</p><small>Added by: <strong>{}</strong></small></div>\n",
                    escape_html(&note.title),
                    escape_html(&note.content),
                    escape_html(&note.author),
                )
            })
            .collect();
        format!("<div class=\"notes-grid\">\n{}</div>", cards)
    };

    let content = format!("<h1>My notes</h1>\n{}", body);
    layout("My notes", session, flashes, &content)
}

pub fn add_note_page(session: &Session, flashes: &[Flash]) -> String {
    let content = r#"<h1>Add a new note</h1>
<form method="POST" action="/add_note">
<label for="title">Title:</label>
<input type="text" id="title" name="title" required placeholder="Write the title here">
<label for="content">Content:</label>
<textarea id="content" name="content" required rows="7" placeholder="Write the note..."></textarea>
<button type="submit">Save note</button>
</form>"#;
    layout("Add note", session, flashes, content)
}
