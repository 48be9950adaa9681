use std::future::Future;
use std::pin::Pin;

use valentine_common::types::Acceptance;

use crate::error::NotifyError;

/// Future returned by [`Mailer::send`].
pub type SendFuture<'a> = Pin<Box<dyn Future<Output = Result<(), NotifyError>> + Send + 'a>>;

/// One email channel. Implementations render the acceptance in whatever
/// shape their provider expects.
pub trait Mailer: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    fn send<'a>(&'a self, acceptance: &'a Acceptance) -> SendFuture<'a>;
}

/// Stand-in for a channel whose credentials are missing. Every send fails.
pub struct Unconfigured {
    name: &'static str,
}

impl Unconfigured {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Mailer for Unconfigured {
    fn name(&self) -> &'static str {
        self.name
    }

    fn send<'a>(&'a self, _acceptance: &'a Acceptance) -> SendFuture<'a> {
        Box::pin(async move { Err(NotifyError::NotConfigured(self.name)) })
    }
}
