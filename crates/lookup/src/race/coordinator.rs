//! First-wins race over address providers.
//!
//! Each provider runs in its own detached task and reports through a bounded
//! channel sized to the number of providers, so a sender never blocks:
//! - The first message received is returned to the caller
//! - Later results are dropped when the receiver is gone
//! - Losing tasks are neither awaited nor cancelled

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::LookupConfig;
use crate::errors::LookupError;
use crate::models::LookupResult;
use crate::provider::{brasil_api, via_cep, AddressProvider};

/// Races address providers against each other under a single deadline.
pub struct RaceCoordinator {
    providers: Vec<Arc<dyn AddressProvider>>,
    timeout: Duration,
}

impl RaceCoordinator {
    /// Create a coordinator over an explicit provider list.
    pub fn new(providers: Vec<Arc<dyn AddressProvider>>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    /// Create a coordinator with BrasilAPI and ViaCEP sharing one HTTP client.
    pub fn from_config(config: &LookupConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| LookupError::Client(e.to_string()))?;

        let providers: Vec<Arc<dyn AddressProvider>> = vec![
            Arc::new(brasil_api::provider(
                config.brasil_api_url.as_str(),
                client.clone(),
            )),
            Arc::new(via_cep::provider(config.via_cep_url.as_str(), client)),
        ];

        Ok(Self::new(providers, config.timeout))
    }

    /// Get the list of registered providers.
    pub fn providers(&self) -> &[Arc<dyn AddressProvider>] {
        &self.providers
    }

    /// Deadline applied to every race.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve a postal code to the first address any provider returns.
    ///
    /// 1. Reject an empty (or blank) postal code without any network call
    /// 2. Spawn one task per provider, all sharing one result channel
    /// 3. Wait for the first result or the deadline, whichever comes first
    ///
    /// Provider failures are logged and otherwise invisible: if nothing
    /// arrives in time, or every provider has already failed, the result is
    /// [`LookupError::Timeout`].
    pub async fn resolve(&self, cep: &str) -> Result<LookupResult, LookupError> {
        let trimmed = cep.trim();
        if trimmed.is_empty() {
            return Err(LookupError::InvalidInput(cep.to_string()));
        }

        if self.providers.is_empty() {
            return Err(LookupError::NoProvidersAvailable);
        }

        let started = Instant::now();
        // Capacity covers one send per provider.
        let (tx, mut rx) = mpsc::channel::<LookupResult>(self.providers.len());

        for provider in &self.providers {
            let provider = Arc::clone(provider);
            let tx = tx.clone();
            let cep = trimmed.to_string();

            debug!("Launching provider '{}' for {}", provider.id(), cep);

            tokio::spawn(async move {
                match provider.lookup(&cep).await {
                    Ok(address) => {
                        let result = LookupResult::new(provider.id(), address, started.elapsed());
                        if tx.try_send(result).is_err() {
                            debug!(
                                "Discarding result from '{}' for {}: race already decided",
                                provider.id(),
                                cep
                            );
                        }
                    }
                    Err(e) => {
                        warn!("Provider '{}' failed for {}: {}", provider.id(), cep, e);
                    }
                }
            });
        }

        // Only the spawned tasks hold senders now; recv() yields None once all fail.
        drop(tx);

        match tokio::time::timeout(self.timeout, rx.recv()).await {
            Ok(Some(result)) => {
                info!(
                    "Resolved {} via '{}' in {:?}",
                    trimmed, result.source, result.elapsed
                );
                Ok(result)
            }
            Ok(None) => {
                warn!(
                    "All {} providers failed for {}",
                    self.providers.len(),
                    trimmed
                );
                Err(LookupError::Timeout {
                    timeout: self.timeout,
                })
            }
            Err(_) => {
                warn!("No provider answered {} within {:?}", trimmed, self.timeout);
                Err(LookupError::Timeout {
                    timeout: self.timeout,
                })
            }
        }
    }
}

/// Resolve a postal code with the default providers built from `config`.
pub async fn resolve(cep: &str, config: &LookupConfig) -> Result<LookupResult, LookupError> {
    if cep.trim().is_empty() {
        return Err(LookupError::InvalidInput(cep.to_string()));
    }
    RaceCoordinator::from_config(config)?.resolve(cep).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProviderError;
    use crate::models::Address;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    struct MockProvider {
        id: &'static str,
        delay: Duration,
        should_fail: bool,
        call_count: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn new(id: &'static str, delay: Duration, should_fail: bool) -> Self {
            Self {
                id,
                delay,
                should_fail,
                call_count: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl AddressProvider for MockProvider {
        fn id(&self) -> &'static str {
            self.id
        }

        async fn lookup(&self, cep: &str) -> Result<Address, ProviderError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(cep.to_string());

            tokio::time::sleep(self.delay).await;

            if self.should_fail {
                Err(ProviderError::Status {
                    provider: self.id.to_string(),
                    status: 500,
                })
            } else {
                Ok(Address {
                    street: format!("Rua {}", self.id),
                    neighborhood: "Centro".to_string(),
                    city: "São Paulo".to_string(),
                    state: "SP".to_string(),
                    postal_code: cep.to_string(),
                })
            }
        }
    }

    fn coordinator(
        a: &Arc<MockProvider>,
        b: &Arc<MockProvider>,
        timeout: Duration,
    ) -> RaceCoordinator {
        let providers: Vec<Arc<dyn AddressProvider>> = vec![
            a.clone() as Arc<dyn AddressProvider>,
            b.clone() as Arc<dyn AddressProvider>,
        ];
        RaceCoordinator::new(providers, timeout)
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_cep_is_rejected_without_calls() {
        let a = Arc::new(MockProvider::new("A", ms(10), false));
        let b = Arc::new(MockProvider::new("B", ms(10), false));
        let race = coordinator(&a, &b, ms(1000));

        for input in ["", "   ", "\n"] {
            let err = race.resolve(input).await.unwrap_err();
            assert!(matches!(err, LookupError::InvalidInput(_)));
        }

        assert_eq!(a.calls(), 0);
        assert_eq!(b.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_providers() {
        let race = RaceCoordinator::new(Vec::new(), ms(1000));
        let err = race.resolve("01001000").await.unwrap_err();
        assert!(matches!(err, LookupError::NoProvidersAvailable));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fastest_provider_wins_without_waiting_for_slow_one() {
        let fast = Arc::new(MockProvider::new("FAST", ms(10), false));
        let slow = Arc::new(MockProvider::new("SLOW", ms(500), false));
        let race = coordinator(&slow, &fast, ms(1000));

        let start = Instant::now();
        let result = race.resolve("01001-000").await.unwrap();

        assert_eq!(result.source, "FAST");
        assert_eq!(result.address.street, "Rua FAST");
        assert_eq!(result.address.postal_code, "01001-000");
        assert!(start.elapsed() < ms(500));
        assert!(result.elapsed >= ms(10));
        assert_eq!(fast.calls(), 1);
        assert_eq!(slow.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_provider_does_not_block_successful_one() {
        let broken = Arc::new(MockProvider::new("BROKEN", ms(5), true));
        let slower = Arc::new(MockProvider::new("SLOWER", ms(300), false));
        let race = coordinator(&broken, &slower, ms(1000));

        let result = race.resolve("01001000").await.unwrap();
        assert_eq!(result.source, "SLOWER");
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_failed_is_timeout_and_returns_early() {
        let a = Arc::new(MockProvider::new("A", ms(10), true));
        let b = Arc::new(MockProvider::new("B", ms(20), true));
        let race = coordinator(&a, &b, ms(1000));

        let start = Instant::now();
        let err = race.resolve("01001000").await.unwrap_err();

        match err {
            LookupError::Timeout { timeout } => assert_eq!(timeout, ms(1000)),
            other => panic!("expected timeout, got {:?}", other),
        }
        assert!(start.elapsed() < ms(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_success_after_deadline_is_timeout() {
        let a = Arc::new(MockProvider::new("A", ms(1500), false));
        let b = Arc::new(MockProvider::new("B", ms(2000), false));
        let race = coordinator(&a, &b, ms(1000));

        let start = Instant::now();
        let err = race.resolve("01001000").await.unwrap_err();

        assert!(matches!(err, LookupError::Timeout { .. }));
        assert!(start.elapsed() >= ms(1000));
        assert!(start.elapsed() < ms(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_losing_provider_task_terminates() {
        let fast = Arc::new(MockProvider::new("FAST", ms(10), false));
        let slow = Arc::new(MockProvider::new("SLOW", ms(200), false));
        let race = coordinator(&fast, &slow, ms(1000));

        let result = race.resolve("01001000").await.unwrap();
        assert_eq!(result.source, "FAST");

        // Held by the test, the coordinator and the still-running task.
        assert_eq!(Arc::strong_count(&slow), 3);

        tokio::time::sleep(ms(300)).await;

        // The late send was dropped and the task exited.
        assert_eq!(Arc::strong_count(&slow), 2);
        assert_eq!(slow.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exactly_one_result_when_both_succeed() {
        let a = Arc::new(MockProvider::new("A", ms(10), false));
        let b = Arc::new(MockProvider::new("B", ms(10), false));
        let race = coordinator(&a, &b, ms(1000));

        let result = race.resolve("01001000").await.unwrap();
        assert!(result.source == "A" || result.source == "B");
    }

    #[tokio::test(start_paused = true)]
    async fn test_providers_receive_trimmed_cep() {
        let a = Arc::new(MockProvider::new("A", ms(10), false));
        let b = Arc::new(MockProvider::new("B", ms(20), false));
        let race = coordinator(&a, &b, ms(1000));

        let result = race.resolve("  01001000\n").await.unwrap();
        assert_eq!(result.address.postal_code, "01001000");

        tokio::time::sleep(ms(50)).await;
        assert_eq!(*a.seen.lock().unwrap(), vec!["01001000".to_string()]);
        assert_eq!(*b.seen.lock().unwrap(), vec!["01001000".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_coordinator_is_reusable_across_lookups() {
        let a = Arc::new(MockProvider::new("A", ms(10), false));
        let b = Arc::new(MockProvider::new("B", ms(50), false));
        let race = coordinator(&a, &b, ms(1000));

        let first = race.resolve("01001000").await.unwrap();
        let second = race.resolve("20040002").await.unwrap();

        assert_eq!(first.address.postal_code, "01001000");
        assert_eq!(second.address.postal_code, "20040002");
        assert_eq!(a.calls(), 2);
    }

    #[test]
    fn test_from_config_registers_default_providers() {
        let race = RaceCoordinator::from_config(&LookupConfig::default()).unwrap();
        let ids: Vec<_> = race.providers().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["BrasilAPI", "ViaCEP"]);
        assert_eq!(race.timeout(), ms(1000));
    }
}
