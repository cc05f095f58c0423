use std::future::Future;
use std::pin::Pin;

use crate::error::Error;
use crate::types::CompletionRequest;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The language-model capability consumed by the interview pipeline.
///
/// Given an ordered list of role-tagged messages and a model selector, an
/// implementation returns the text of a single completion. Every call is
/// independent: nothing is remembered between calls, so callers that want a
/// continuation must send the whole history themselves.
///
/// The trait is object-safe via the explicit [`BoxFuture`] return type so the
/// HTTP layer can hold an `Arc<dyn CompletionService>` and tests can swap in a
/// scripted fake.
pub trait CompletionService: Send + Sync {
    fn complete<'a>(&'a self, request: &'a CompletionRequest)
    -> BoxFuture<'a, Result<String, Error>>;
}
