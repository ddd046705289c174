//! # Concurrency Tests
//!
//! Many threads sharing one pool. The store has a single writer gate; these
//! tests check that it holds under contention in both read modes.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    use gw_02_credential_store::{
        CredentialStoreApi, InMemoryPoolMedium, MediumError, PoolMedium, PoolRow, ReadConsistency,
    };
    use gw_03_allocation::{AllocationConfig, AllocationEngine};
    use gw_03_allocation::{AllocationApi, AllocationError, CompletionRequest};
    use gw_04_conversation::{Command, ConversationApi, InboundEvent, RecordingReplyChannel, Reply};
    use gw_runtime::GuestWifiRuntime;
    use shared_types::{Assignment, DeviceClass, PoolId};

    use crate::integration::fixtures::*;

    /// In-memory medium whose persists take a while, widening the window
    /// between a quota count and the matching commit.
    struct SlowPersistMedium(InMemoryPoolMedium);

    impl PoolMedium for SlowPersistMedium {
        fn load(&self) -> Result<Vec<PoolRow>, MediumError> {
            self.0.load()
        }

        fn persist(&self, rows: &[PoolRow]) -> Result<(), MediumError> {
            thread::sleep(Duration::from_millis(50));
            self.0.persist(rows)
        }

        fn describe(&self) -> String {
            "slow-memory".to_string()
        }
    }

    #[test]
    fn test_one_requester_racing_on_distinct_slots_stays_within_quota() {
        const ATTEMPTS: usize = 4;

        for consistency in [ReadConsistency::Snapshot, ReadConsistency::Refresh] {
            let store = store_over(
                SlowPersistMedium(InMemoryPoolMedium::provisioned(ATTEMPTS + 1)),
                consistency,
            );
            store
                .commit_assignment(
                    PoolId(0),
                    &Assignment {
                        identity: VALID_NATIONAL_ID.to_string(),
                        requester: requester("42"),
                        device_class: DeviceClass::Phone,
                        display_name: None,
                    },
                )
                .unwrap();

            let engine = Arc::new(AllocationEngine::new(store, AllocationConfig::default()));
            let barrier = Arc::new(Barrier::new(ATTEMPTS));

            let handles: Vec<_> = (1..=ATTEMPTS)
                .map(|slot| {
                    let engine = Arc::clone(&engine);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        let request = CompletionRequest {
                            pool_id: PoolId(slot),
                            requester: requester("42"),
                            raw_document: OTHER_VALID_NATIONAL_ID.to_string(),
                            device_class: DeviceClass::OtherDevice,
                            display_name: None,
                        };
                        barrier.wait();
                        engine.complete_request(&request)
                    })
                })
                .collect();

            let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            let delivered = results.iter().filter(|r| r.is_ok()).count();
            let refused = results
                .iter()
                .filter(|r| matches!(r, Err(AllocationError::QuotaExceeded { limit: 2, .. })))
                .count();

            assert_eq!(delivered, 1, "{consistency:?}");
            assert_eq!(refused, ATTEMPTS - 1, "{consistency:?}");
            assert_eq!(
                engine.store().count_by_requester(&requester("42")).unwrap(),
                2,
                "{consistency:?}"
            );
        }
    }

    #[test]
    fn test_same_slot_delivered_at_most_once() {
        const CONTENDERS: usize = 24;

        for consistency in [ReadConsistency::Snapshot, ReadConsistency::Refresh] {
            let engine = Arc::new(engine(4, consistency));
            let barrier = Arc::new(Barrier::new(CONTENDERS));

            let handles: Vec<_> = (0..CONTENDERS)
                .map(|i| {
                    let engine = Arc::clone(&engine);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        let request = CompletionRequest {
                            pool_id: PoolId(2),
                            requester: requester(&format!("visitor-{i}")),
                            raw_document: VALID_NATIONAL_ID.to_string(),
                            device_class: DeviceClass::Phone,
                            display_name: None,
                        };
                        barrier.wait();
                        engine.complete_request(&request)
                    })
                })
                .collect();

            let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            let delivered = results.iter().filter(|r| r.is_ok()).count();
            let stale = results
                .iter()
                .filter(|r| matches!(r, Err(AllocationError::StaleSlot { pool_id: PoolId(2) })))
                .count();

            assert_eq!(delivered, 1, "{consistency:?}");
            assert_eq!(stale, CONTENDERS - 1, "{consistency:?}");
            assert_eq!(engine.store().medium().persist_count(), 1);
            assert_eq!(engine.store().stats().unwrap().delivered, 1);
        }
    }

    #[test]
    fn test_many_requesters_never_share_a_slot() {
        const VISITORS: usize = 16;
        const SLOTS: usize = 10;

        let controller = Arc::new(controller(SLOTS));
        let barrier = Arc::new(Barrier::new(VISITORS));

        let handles: Vec<_> = (0..VISITORS)
            .map(|i| {
                let controller = Arc::clone(&controller);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    let id = requester(&format!("v{i}"));
                    let send = |command| controller.handle(&InboundEvent::new(id.clone(), command));
                    barrier.wait();

                    // Retry lost races until delivered or the pool runs dry.
                    loop {
                        match send(Command::RequestCredential) {
                            Reply::DevicePrompt { .. } => {}
                            other => return other,
                        }
                        send(Command::SubmitDeviceChoice("1".to_string()));
                        match send(Command::SubmitDocument(VALID_NATIONAL_ID.to_string())) {
                            Reply::StaleSlot => continue,
                            other => return other,
                        }
                    }
                })
            })
            .collect();

        let replies: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let delivered: Vec<_> = replies
            .iter()
            .filter_map(|r| match r {
                Reply::Delivered(d) => Some(d.pool_id),
                _ => None,
            })
            .collect();
        let exhausted = replies
            .iter()
            .filter(|r| **r == Reply::NoSlotsAvailable)
            .count();

        assert_eq!(delivered.len(), SLOTS);
        assert_eq!(exhausted, VISITORS - SLOTS);
        let unique: HashSet<_> = delivered.iter().collect();
        assert_eq!(unique.len(), SLOTS);

        let owners: HashSet<_> = controller
            .engine()
            .store()
            .medium()
            .rows()
            .into_iter()
            .map(|row| row.user_ref)
            .collect();
        assert_eq!(owners.len(), SLOTS);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_runtime_serves_interleaved_requesters() {
        const VISITORS: usize = 8;

        let controller = Arc::new(controller(VISITORS));
        let channel = Arc::new(RecordingReplyChannel::new());
        let runtime = GuestWifiRuntime::new(controller.clone(), channel.clone());

        // Interleave every step of every visitor.
        let mut input = String::new();
        for step in ["/wifi", "Celular", VALID_NATIONAL_ID] {
            for i in 0..VISITORS {
                input.push_str(&format!("{i} (Visitor {i}): {step}\n"));
            }
        }

        let summary = runtime.run(input.as_bytes()).await.unwrap();
        assert_eq!(summary.events, 3 * VISITORS);

        // Stale slots are possible when reservations overlap; nothing is
        // ever delivered twice and every visitor gets a final answer.
        let mut pools = HashSet::new();
        for i in 0..VISITORS {
            let replies = channel.replies_to(&requester(&i.to_string()));
            assert_eq!(replies.len(), 3);
            match &replies[2] {
                Reply::Delivered(delivered) => assert!(pools.insert(delivered.pool_id)),
                other => assert_eq!(*other, Reply::StaleSlot),
            }
        }
        assert_eq!(
            controller.engine().store().stats().unwrap().delivered,
            pools.len()
        );
        assert!(!pools.is_empty());
    }
}
