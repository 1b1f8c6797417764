// Library surface for the binary, headless drivers and integration tests.
pub mod app;
pub mod app_dirs;
pub mod celebration;
pub mod config;
pub mod corpus;
pub mod error;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod ui;

pub use app::App;
pub use corpus::Corpus;
pub use session::{Metrics, Session, SessionConfig, SessionEvent};
