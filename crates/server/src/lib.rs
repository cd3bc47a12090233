pub mod errors;
pub mod routes;
pub mod startup;

pub use routes::{build_router, AppState};
pub use startup::{run_with_config, serve};
