//! # Integration Tests

pub mod concurrency;
pub mod file_pool;
pub mod flows;

/// Shared fixtures.
#[cfg(test)]
pub(crate) mod fixtures {
    use gw_02_credential_store::{
        CredentialStoreService, InMemoryPoolMedium, PoolMedium, ReadConsistency, StoreConfig,
    };
    use gw_03_allocation::{AllocationConfig, AllocationEngine};
    use gw_04_conversation::ConversationController;
    use shared_types::RequesterRef;

    pub const VALID_NATIONAL_ID: &str = "529.982.247-25";
    pub const OTHER_VALID_NATIONAL_ID: &str = "111.444.777-35";

    pub type MemoryStore<M = InMemoryPoolMedium> = CredentialStoreService<M>;
    pub type MemoryEngine<M = InMemoryPoolMedium> = AllocationEngine<MemoryStore<M>>;
    pub type MemoryController<M = InMemoryPoolMedium> = ConversationController<MemoryEngine<M>>;

    pub fn requester(id: &str) -> RequesterRef {
        RequesterRef::new(id).unwrap()
    }

    pub fn store_over<M: PoolMedium>(medium: M, consistency: ReadConsistency) -> MemoryStore<M> {
        CredentialStoreService::open(
            medium,
            StoreConfig {
                read_consistency: consistency,
            },
        )
        .unwrap()
    }

    pub fn engine(slots: usize, consistency: ReadConsistency) -> MemoryEngine {
        AllocationEngine::new(
            store_over(InMemoryPoolMedium::provisioned(slots), consistency),
            AllocationConfig::default(),
        )
    }

    pub fn controller(slots: usize) -> MemoryController {
        ConversationController::new(engine(slots, ReadConsistency::Refresh))
    }
}
