//! # Integration Test Flows
//!
//! Drives the conversation controller against a real allocation engine and
//! credential store, checking what ends up in the pool medium.
//!
//! ## Flows Tested
//!
//! 1. **Request → device → document → delivered**, with pool columns filled
//! 2. **Quota**: a third credential is refused even with free slots
//! 3. **Exhaustion**: the last slot goes, then nobody gets a session
//! 4. **Read-after-write**: the listing shows what was just delivered
//! 5. **Recovery**: bad document, store outage and a lost race

#[cfg(test)]
mod tests {
    use gw_02_credential_store::{CredentialStoreApi, PoolRow, DELIVERED_LABEL};
    use gw_03_allocation::AllocationApi;
    use gw_04_conversation::{Command, ConversationApi, InboundEvent, Reply};
    use shared_types::{DeliveryStatus, PoolId};

    use crate::integration::fixtures::*;

    fn say(controller: &MemoryController, id: &str, text: &str) -> Reply {
        controller.handle_text(&requester(id), Some("Visitante"), text)
    }

    fn command(controller: &MemoryController, id: &str, command: Command) -> Reply {
        controller.handle(&InboundEvent::new(requester(id), command))
    }

    /// Run a full request and return the final reply.
    fn obtain(controller: &MemoryController, id: &str, device: &str, document: &str) -> Reply {
        let prompt = command(controller, id, Command::RequestCredential);
        if !matches!(prompt, Reply::DevicePrompt { .. }) {
            return prompt;
        }
        assert_eq!(say(controller, id, device), Reply::DocumentPrompt);
        say(controller, id, document)
    }

    fn rows(controller: &MemoryController) -> Vec<PoolRow> {
        controller.engine().store().medium().rows()
    }

    #[test]
    fn test_delivery_fills_every_pool_column() {
        let controller = controller(3);

        let Reply::Delivered(delivered) =
            obtain(&controller, "1001", "Outros Dispositivos", VALID_NATIONAL_ID)
        else {
            panic!("expected delivery");
        };
        assert_eq!(delivered.pool_id, PoolId(0));

        let row = &rows(&controller)[0];
        assert_eq!(row.identity, VALID_NATIONAL_ID);
        assert_eq!(row.user_ref, "1001");
        assert_eq!(row.user_name, "Visitante");
        assert_eq!(row.device_class, "Outros Dispositivos");
        assert_eq!(row.status, DELIVERED_LABEL);
        assert_eq!(row.secret, delivered.secret);

        // Untouched rows stay untouched.
        assert_eq!(rows(&controller)[1], PoolRow::provisioned("Guest-1", "pw-1"));
    }

    #[test]
    fn test_quota_refuses_third_credential_with_free_slots() {
        let controller = controller(6);

        assert!(matches!(
            obtain(&controller, "7", "1", VALID_NATIONAL_ID),
            Reply::Delivered(_)
        ));
        assert!(matches!(
            obtain(&controller, "7", "2", OTHER_VALID_NATIONAL_ID),
            Reply::Delivered(_)
        ));
        assert_eq!(
            obtain(&controller, "7", "1", "AB123456"),
            Reply::QuotaExceeded { limit: 2 }
        );

        let stats = controller.engine().store().stats().unwrap();
        assert_eq!(stats.delivered, 2);
        assert_eq!(stats.unassigned, 4);
    }

    #[test]
    fn test_exhaustion_after_last_slot() {
        let controller = controller(2);
        assert!(matches!(
            obtain(&controller, "a", "1", VALID_NATIONAL_ID),
            Reply::Delivered(_)
        ));
        assert!(matches!(
            obtain(&controller, "b", "1", VALID_NATIONAL_ID),
            Reply::Delivered(_)
        ));

        assert_eq!(
            command(&controller, "c", Command::RequestCredential),
            Reply::NoSlotsAvailable
        );
        assert!(controller.sessions().is_empty());
        assert_eq!(
            controller.engine().begin_request(&requester("c")),
            Err(gw_03_allocation::AllocationError::NoSlotsAvailable)
        );
    }

    #[test]
    fn test_listing_reads_own_writes() {
        let controller = controller(3);
        let Reply::Delivered(delivered) = obtain(&controller, "55", "1", VALID_NATIONAL_ID)
        else {
            panic!("expected delivery");
        };

        let Reply::CredentialList(listing) =
            command(&controller, "55", Command::ListMyCredentials)
        else {
            panic!("expected listing");
        };
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].secret, delivered.secret);
        assert_eq!(listing[0].network_name, delivered.network_name);
        assert_eq!(listing[0].status, DeliveryStatus::Delivered);

        assert_eq!(
            command(&controller, "56", Command::ListMyCredentials),
            Reply::CredentialList(vec![])
        );
    }

    #[test]
    fn test_bad_document_then_good_document() {
        let controller = controller(1);
        command(&controller, "1", Command::RequestCredential);
        say(&controller, "1", "Celular");

        for bad in ["000.000.000-00", "123456", "AB12345", "529.982.247-26"] {
            assert_eq!(say(&controller, "1", bad), Reply::InvalidDocument, "{bad}");
        }
        assert_eq!(controller.engine().store().medium().persist_count(), 0);

        assert!(matches!(
            say(&controller, "1", "12.345.678"),
            Reply::Delivered(_)
        ));
        assert_eq!(rows(&controller)[0].identity, "12.345.678");
    }

    #[test]
    fn test_store_outage_aborts_without_mutation() {
        let controller = controller(2);
        command(&controller, "1", Command::RequestCredential);
        say(&controller, "1", "1");

        let medium = controller.engine().store().medium();
        medium.set_fail_persists(true);
        assert_eq!(say(&controller, "1", VALID_NATIONAL_ID), Reply::StoreUnavailable);
        assert_eq!(rows(&controller)[0], PoolRow::provisioned("Guest-0", "pw-0"));

        medium.set_fail_persists(false);
        medium.set_fail_loads(true);
        assert_eq!(
            command(&controller, "1", Command::RequestCredential),
            Reply::StoreUnavailable
        );

        medium.set_fail_loads(false);
        assert!(matches!(
            obtain(&controller, "1", "1", VALID_NATIONAL_ID),
            Reply::Delivered(_)
        ));
    }

    #[test]
    fn test_lost_race_can_restart() {
        let controller = controller(2);
        command(&controller, "a", Command::RequestCredential);
        command(&controller, "b", Command::RequestCredential);
        say(&controller, "a", "1");
        say(&controller, "b", "1");

        assert!(matches!(
            say(&controller, "a", VALID_NATIONAL_ID),
            Reply::Delivered(_)
        ));
        assert_eq!(say(&controller, "b", VALID_NATIONAL_ID), Reply::StaleSlot);

        let Reply::Delivered(delivered) = obtain(&controller, "b", "1", VALID_NATIONAL_ID)
        else {
            panic!("expected delivery on restart");
        };
        assert_eq!(delivered.pool_id, PoolId(1));
    }

    #[test]
    fn test_restart_mid_session_reserves_afresh() {
        let controller = controller(2);
        command(&controller, "1", Command::RequestCredential);
        say(&controller, "1", "1");

        assert!(matches!(
            command(&controller, "1", Command::RequestCredential),
            Reply::DevicePrompt { .. }
        ));
        // The restarted session asks for the device again.
        assert_eq!(say(&controller, "1", VALID_NATIONAL_ID), Reply::DevicePrompt {
            network_name: "Guest-0".to_string()
        });
    }
}
