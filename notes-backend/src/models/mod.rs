pub mod flash;
pub mod note;
pub mod session;

pub use flash::Flash;
pub use note::Note;
pub use session::Session;
