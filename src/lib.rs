pub mod app;
pub mod cycle;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use state::AppState;
pub use storage::{ensure_parent_dirs, resolve_store_paths};
