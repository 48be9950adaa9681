//! Acceptance notifications over third-party email APIs.
//!
//! - Resend (primary, awaited)
//! - EmailJS (secondary, best-effort)
//!
//! No retries and no delivery tracking: a failed send is logged and, for the
//! primary channel, reported to the caller.

pub mod dispatch;
pub mod emailjs;
pub mod error;
pub mod mailer;
pub mod message;
pub mod resend;

pub use dispatch::Dispatcher;
pub use error::NotifyError;
pub use mailer::Mailer;
