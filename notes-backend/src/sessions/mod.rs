pub mod cookie;
pub mod store;

pub use cookie::SessionContext;
pub use store::SessionStore;
