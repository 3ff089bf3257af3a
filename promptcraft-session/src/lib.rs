//! Authenticated HTTP session for the PromptCraft backend.
//!
//! Requests go through an explicit middleware chain: [`BearerAuth`] attaches
//! the access token read from the [`CredentialStore`] at send time, and
//! [`RefreshOnUnauthorized`] turns a first 401 into one refresh call plus one
//! retry. When the refresh cannot happen the stored session is wiped and the
//! [`LoginRedirect`] handler is told to send the user back to sign in.

mod auth;
mod client;
mod config;
mod context;
mod error;
mod redirect;
mod storage;
mod transport;

pub use auth::AuthService;
pub use client::{session_chain, SessionClient, SessionTransport};
pub use config::Settings;
pub use context::SessionContext;
pub use error::SessionError;
pub use redirect::{LoginRedirect, NoRedirect};
pub use storage::{CredentialStore, FileStorage, MemoryStorage, SessionStorage, StorageKey};
pub use transport::{
    ApiRequest, BearerAuth, HttpTransport, RawResponse, RefreshOnUnauthorized, Transport,
};

// Always expose testing module (integration tests need it)
pub mod testing;
