pub mod session_gate;

pub use session_gate::{require_login, require_login_json};
