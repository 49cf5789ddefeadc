pub mod forms;
pub mod handlers;
pub mod helpers;
pub mod state;

pub use state::AppState;
