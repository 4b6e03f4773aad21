//! In-process stand-in for the on-chain combat resolver.
//!
//! The engine publishes `game:attackRequested`; [`forward_attacks`] bridges
//! those events onto a tokio channel, a background task resolves them after
//! a short delay, and the host feeds the outcomes back as `sui:*` events.

use std::time::Duration;

use tactics_core::Position;
use tactics_runtime::{ChainEvent, Engine, Event, GameEvent, GameEventKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Work submitted to the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainRequest {
    Attack {
        attacker: Position,
        target: Position,
    },
}

/// Deterministic resolver: fixed damage, attacks beyond `max_range` fail.
#[derive(Clone, Debug)]
pub struct MockChain {
    pub damage: u32,
    pub max_range: u32,
    pub latency: Duration,
}

impl Default for MockChain {
    fn default() -> Self {
        Self {
            damage: 4,
            max_range: 8,
            latency: Duration::from_millis(20),
        }
    }
}

impl MockChain {
    fn resolve(&self, request: ChainRequest) -> ChainEvent {
        match request {
            ChainRequest::Attack { attacker, target }
                if attacker.manhattan(target) > self.max_range =>
            {
                ChainEvent::CommitFailed {
                    reason: format!("target {target} out of range from {attacker}"),
                }
            }
            ChainRequest::Attack { attacker, target } => ChainEvent::AttackResolved {
                attacker,
                target,
                damage: self.damage,
            },
        }
    }
}

/// Host side of the mock chain.
pub struct ChainHandle {
    requests: mpsc::UnboundedSender<ChainRequest>,
    outcomes: mpsc::Receiver<ChainEvent>,
    task: JoinHandle<()>,
}

impl ChainHandle {
    pub fn requests(&self) -> mpsc::UnboundedSender<ChainRequest> {
        self.requests.clone()
    }

    pub async fn next_outcome(&mut self) -> Option<ChainEvent> {
        self.outcomes.recv().await
    }

    /// Closes the request channel and waits for the resolver to drain.
    pub async fn shutdown(self) {
        let Self {
            requests,
            outcomes,
            task,
        } = self;
        drop(requests);
        drop(outcomes);
        if let Err(error) = task.await {
            tracing::warn!(%error, "chain task ended abnormally");
        }
    }
}

/// Starts the resolver task.
pub fn spawn(chain: MockChain) -> ChainHandle {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel();
    let (outcome_tx, outcome_rx) = mpsc::channel(16);

    let task = tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            tokio::time::sleep(chain.latency).await;
            let outcome = chain.resolve(request);
            tracing::debug!(?request, ?outcome, "chain resolved request");
            if outcome_tx.send(outcome).await.is_err() {
                break;
            }
        }
    });

    ChainHandle {
        requests: request_tx,
        outcomes: outcome_rx,
        task,
    }
}

/// Subscribes to attack requests and submits them to the chain.
pub fn forward_attacks(engine: &mut Engine, chain: &ChainHandle) {
    let requests = chain.requests();
    engine
        .bus_mut()
        .subscribe(GameEventKind::AttackRequested, move |event| {
            if let Event::Game(GameEvent::AttackRequested { from, at, .. }) = event {
                let request = ChainRequest::Attack {
                    attacker: *from,
                    target: *at,
                };
                if requests.send(request).is_err() {
                    tracing::warn!("chain is gone, attack request dropped");
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attacks_beyond_range_fail() {
        let chain = MockChain {
            max_range: 2,
            ..MockChain::default()
        };

        let outcome = chain.resolve(ChainRequest::Attack {
            attacker: Position::ORIGIN,
            target: Position::new(2, 1),
        });

        assert!(matches!(outcome, ChainEvent::CommitFailed { .. }));
    }

    #[tokio::test]
    async fn resolver_answers_each_request() {
        let mut handle = spawn(MockChain {
            latency: Duration::ZERO,
            ..MockChain::default()
        });

        handle
            .requests()
            .send(ChainRequest::Attack {
                attacker: Position::ORIGIN,
                target: Position::new(1, 0),
            })
            .unwrap();

        assert_eq!(
            handle.next_outcome().await,
            Some(ChainEvent::AttackResolved {
                attacker: Position::ORIGIN,
                target: Position::new(1, 0),
                damage: 4,
            })
        );
        handle.shutdown().await;
    }
}
