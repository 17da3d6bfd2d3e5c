pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

// `domain::auth` is not re-exported at the root: it would shadow the
// `auth` library crate in use paths.
pub use domain::token;
pub use domain::user;
pub use outbound::repositories;
