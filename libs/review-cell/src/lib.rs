pub mod board;
pub mod error;
pub mod handlers;
pub mod models;
pub mod prompt;
pub mod router;
pub mod services;

pub use board::ReviewBoard;
pub use error::ReviewError;
pub use models::*;
pub use prompt::{Clipboard, ExternalReviewPrompt};
pub use router::review_routes;
pub use services::ReviewService;
