//! HTML rendering for the web UI.
//!
//! Every user-supplied string goes through `escape_html` before it reaches
//! the page.

pub mod pages;

use crate::models::{Flash, Session};

pub use pages::{add_note_page, index_page, login_page};

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
body { font-family: sans-serif; background: #eceff1; margin: 0; color: #333; }
.container { max-width: 1200px; margin: 20px auto; background: white; padding: 25px 35px; border-radius: 12px; border-top: 5px solid #4a90e2; }
.nav { background: #2c3e50; border-radius: 8px; display: flex; justify-content: space-between; align-items: center; margin-bottom: 25px; flex-wrap: wrap; }
.nav a, .nav .user-info { color: white; padding: 14px 18px; text-decoration: none; font-weight: bold; }
.nav .logout-btn { background: #e74c3c; border-radius: 8px; margin: 8px 15px; padding: 8px 15px; }
.flash { padding: 12px; margin-bottom: 20px; border-radius: 8px; font-weight: bold; }
.success { background: #e6ffed; color: #1a6d2c; border: 1px solid #b3e6c3; }
.danger { background: #ffe6e6; color: #a32a2a; border: 1px solid #e6b3b3; }
.info { background: #e6f7ff; color: #1a6d91; border: 1px solid #b3e0ff; }
h1 { color: #4a90e2; border-bottom: 2px solid #e0e0e0; padding-bottom: 15px; }
input[type="text"], input[type="password"], textarea { width: 100%; padding: 12px; margin-bottom: 18px; border: 1px solid #cfd8dc; border-radius: 8px; box-sizing: border-box; }
label { display: block; margin-bottom: 8px; font-weight: bold; color: #555; }
button[type="submit"] { background: #4a90e2; color: white; padding: 12px 25px; border: none; border-radius: 8px; cursor: pointer; }
.notes-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 25px; }
.note-card { background: #fdfdfd; padding: 20px; border-radius: 10px; border-left: 6px solid #4a90e2; }
.note-card p { white-space: pre-wrap; }
.note-card small { color: #7f8c8d; }
.no-notes-message { text-align: center; padding: 30px; border: 2px dashed #b0c4de; border-radius: 10px; }
.login-form-container { max-width: 450px; margin: 30px auto; }
"#;

fn render_nav(session: &Session) -> String {
    match session.current_user() {
        Some(username) => format!(
            r#"<div class="nav"><div class="nav-left"><a href="/">Home</a><a href="/add_note">Add note</a></div><div class="nav-right"><span class="user-info">User: {}</span><a href="/logout" class="logout-btn">Log out</a></div></div>"#,
            escape_html(username)
        ),
        None => r#"<div class="nav"><div class="nav-left"><a href="/">Home</a></div><div class="nav-right"><a href="/login" class="logout-btn">Log in</a></div></div>"#.to_string(),
    }
}

fn render_flashes(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|flash| {
            format!(
                r#"<div class="flash {}">{}</div>"#,
                flash.category.as_str(),
                escape_html(&flash.message)
            )
        })
        .collect()
}

/// Wrap page content in the shared document shell
pub fn layout(title: &str, session: &Session, flashes: &[Flash], content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<div class="container">
{nav}
{flashes}
{content}
</div>
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
        nav = render_nav(session),
        flashes = render_flashes(flashes),
        content = content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
        assert_eq!(escape_html("مرحباً"), "مرحباً");
    }

    #[test]
    fn test_layout_renders_flashes_escaped() {
        let page = layout(
            "Title",
            &Session::anonymous(),
            &[Flash::danger("<b>bad</b>"), Flash::info("bye")],
            "<p>body</p>",
        );
        assert!(page.contains(r#"<div class="flash danger">&lt;b&gt;bad&lt;/b&gt;</div>"#));
        assert!(page.contains(r#"<div class="flash info">bye</div>"#));
        assert!(page.contains("<p>body</p>"));
    }

    #[test]
    fn test_nav_depends_on_login() {
        let anonymous = layout("t", &Session::anonymous(), &[], "");
        assert!(anonymous.contains(r#"href="/login""#));
        assert!(!anonymous.contains(r#"href="/logout""#));

        let session = Session {
            logged_in: true,
            username: Some("izuko".to_string()),
        };
        let logged_in = layout("t", &session, &[], "");
        assert!(logged_in.contains("User: izuko"));
        assert!(logged_in.contains(r#"href="/logout""#));
        assert!(logged_in.contains(r#"href="/add_note""#));
    }
}
