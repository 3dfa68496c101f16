//! File-system side of the server.
//!
//! - **`resolver`**: turns a request path into a path under the root
//! - **`handlers`**: one handler per verb, plus the 501 fallback

pub mod handlers;
pub mod resolver;

pub use handlers::{FileHandler, Outcome};
pub use resolver::ResourceResolver;
