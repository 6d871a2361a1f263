//! The spla draw session.
//!
//! [`DrawSession`] owns the application state (catalogs, filter selections,
//! roster, draw results, team assignment) and exposes one handler per user
//! intent. Front ends dispatch [`Intent`]s and either re-read the session
//! afterwards or subscribe to [`SessionEvent`]s.

pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod session;

pub use command::Intent;
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use event::SessionEvent;
pub use session::{CatalogStatus, DrawSession};
