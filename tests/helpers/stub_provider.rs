// ABOUTME: Scripted GenerativeProvider stubs for dispatcher and route tests
// ABOUTME: Replay queued results, record the keys used, and optionally stall

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use fitcoach_server::llm::{GenerativeProvider, ProviderFailure};

/// Provider that replays queued results, then repeats a fallback result
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, ProviderFailure>>>,
    fallback: Result<String, ProviderFailure>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedProvider {
    /// Always returns `fallback`
    pub fn always(fallback: Result<String, ProviderFailure>) -> Self {
        Self::scripted(Vec::new(), fallback)
    }

    /// Returns `script` in order, then `fallback` forever
    pub fn scripted(
        script: Vec<Result<String, ProviderFailure>>,
        fallback: Result<String, ProviderFailure>,
    ) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always rate limited
    pub fn rate_limited() -> Self {
        Self::always(Err(ProviderFailure::http(
            429,
            "[429 Too Many Requests] Resource has been exhausted",
        )))
    }

    /// Always succeeds with `text`
    pub fn replying(text: &str) -> Self {
        Self::always(Ok(text.to_owned()))
    }

    /// Sleep before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of calls made
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Keys used, in call order
    pub fn credentials_seen(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Prompts received, in call order
    pub fn prompts_seen(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, prompt)| prompt.clone())
            .collect()
    }
}

#[async_trait]
impl GenerativeProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, credential: &str, prompt: &str) -> Result<String, ProviderFailure> {
        self.calls
            .lock()
            .unwrap()
            .push((credential.to_owned(), prompt.to_owned()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}
