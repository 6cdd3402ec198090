//! Metrics for the registry.

use crate::{BatchReceipt, RegistryError};

/// Container for the registry's metric names.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Counter of registered chains.
    pub const CHAINS_REGISTERED: &str = "ahu_registry_chains_registered";
    /// Counter of accepted headers.
    pub const HEADERS_ACCEPTED: &str = "ahu_registry_headers_accepted";
    /// Counter of rejected batches, labelled by `reason`.
    pub const BATCHES_REJECTED: &str = "ahu_registry_batches_rejected";
    /// Counter of applied validator rotations.
    pub const ROTATIONS: &str = "ahu_registry_rotations";

    /// Describes and zeroes the registry metrics.
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    fn describe() {
        metrics::describe_counter!(
            Self::CHAINS_REGISTERED,
            metrics::Unit::Count,
            "Number of chains registered by the voting authority",
        );
        metrics::describe_counter!(
            Self::HEADERS_ACCEPTED,
            metrics::Unit::Count,
            "Number of signed headers appended to the accepted header log",
        );
        metrics::describe_counter!(
            Self::BATCHES_REJECTED,
            metrics::Unit::Count,
            "Number of submission batches rejected, by reason",
        );
        metrics::describe_counter!(
            Self::ROTATIONS,
            metrics::Unit::Count,
            "Number of validator set rotations applied",
        );
    }

    fn zero() {
        metrics::counter!(Self::CHAINS_REGISTERED).increment(0);
        metrics::counter!(Self::HEADERS_ACCEPTED).increment(0);
        metrics::counter!(Self::ROTATIONS).increment(0);
    }

    pub(crate) fn record_registration() {
        metrics::counter!(Self::CHAINS_REGISTERED).increment(1);
    }

    pub(crate) fn record_batch(receipt: &BatchReceipt) {
        metrics::counter!(Self::HEADERS_ACCEPTED).increment(receipt.accepted.len() as u64);
        metrics::counter!(Self::ROTATIONS).increment(receipt.rotations() as u64);
    }

    pub(crate) fn record_rejection(err: &RegistryError) {
        metrics::counter!(Self::BATCHES_REJECTED, "reason" => err.kind()).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        BlockHeaderRegistry, FixedVoter, SignedBlockSubmission, StaticBootstrap,
        test_utils::{TestValidator, test_header},
    };
    use alloy_primitives::{Address, B256};
    use metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use std::{
        collections::HashMap,
        sync::{
            Arc, Mutex,
            atomic::{AtomicU64, Ordering},
        },
    };

    /// Records counters in memory; gauges and histograms are dropped.
    #[derive(Debug, Default)]
    struct CounterRecorder {
        counters: Mutex<HashMap<Key, Arc<AtomicU64>>>,
    }

    impl CounterRecorder {
        fn value(&self, name: &str, labels: &[(&str, &str)]) -> Option<u64> {
            let counters = self.counters.lock().unwrap();
            counters
                .iter()
                .find(|(key, _)| {
                    key.name() == name &&
                        key.labels().count() == labels.len() &&
                        labels.iter().all(|(k, v)| {
                            key.labels().any(|label| label.key() == *k && label.value() == *v)
                        })
                })
                .map(|(_, counter)| counter.load(Ordering::Relaxed))
        }
    }

    impl Recorder for CounterRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            let mut counters = self.counters.lock().unwrap();
            Counter::from_arc(counters.entry(key.clone()).or_default().clone())
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    const CHAIN: u64 = 1337;

    #[test]
    fn test_counters_follow_registry_calls() {
        let recorder = CounterRecorder::default();
        let voter = Address::repeat_byte(0x01);
        let validator = TestValidator::new(0x42);

        metrics::with_local_recorder(&recorder, || {
            Metrics::init();
            let bootstrap =
                StaticBootstrap::default().with_chain(CHAIN, vec![validator.address()]);
            let mut registry = BlockHeaderRegistry::new(FixedVoter(voter), bootstrap);
            registry.add_blockchain(&voter, CHAIN, "http://localhost:8545").unwrap();

            let bad_hash = SignedBlockSubmission {
                block_hash: B256::ZERO,
                ..validator.submit(CHAIN, &test_header(1))
            };
            registry.add_signed_blocks(&[bad_hash.clone()]).unwrap_err();
            registry.add_signed_blocks(&[bad_hash]).unwrap_err();

            let rotation = validator.submit_rotation(
                CHAIN,
                &test_header(2),
                10,
                vec![validator.address()],
            );
            let first = validator.submit(CHAIN, &test_header(1));
            registry.add_signed_blocks(&[first, rotation]).unwrap();
        });

        assert_eq!(recorder.value(Metrics::CHAINS_REGISTERED, &[]), Some(1));
        assert_eq!(recorder.value(Metrics::HEADERS_ACCEPTED, &[]), Some(2));
        assert_eq!(recorder.value(Metrics::ROTATIONS, &[]), Some(1));
        assert_eq!(
            recorder.value(Metrics::BATCHES_REJECTED, &[("reason", "digest_mismatch")]),
            Some(2)
        );
    }
}
