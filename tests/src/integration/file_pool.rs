//! # File Pool Tests
//!
//! The JSON pool file on disk, as provisioned by hand, driven through the
//! runtime's service container and console channel.

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use gw_02_credential_store::{JsonFilePoolMedium, ReadConsistency};
    use gw_04_conversation::{Command, ConversationApi, InboundEvent, Reply};
    use gw_runtime::adapters::ConsoleReplyChannel;
    use gw_runtime::{GuestWifiRuntime, RuntimeConfig, ServiceContainer};
    use serde_json::{json, Value};

    use crate::integration::fixtures::*;

    fn write_json(path: &Path, value: &Value) {
        std::fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
    }

    fn config_for(path: PathBuf) -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.pool.file = path;
        config
    }

    fn obtain(container: &ServiceContainer, id: &str, document: &str) -> Reply {
        let controller = container.controller();
        let send = |command| controller.handle(&InboundEvent::new(requester(id), command));
        let prompt = send(Command::RequestCredential);
        if !matches!(prompt, Reply::DevicePrompt { .. }) {
            return prompt;
        }
        send(Command::SubmitDeviceChoice("Celular".to_string()));
        send(Command::SubmitDocument(document.to_string()))
    }

    #[test]
    fn test_hand_provisioned_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("password.json");
        write_json(
            &path,
            &json!([
                {"nome": "Biblio-1", "senha": 11112222, "documento": null, "lote": "A"},
                {"nome": "Biblio-2", "senha": "abc-def", "documento": "", "status": "", "lote": "A"},
                {"nome": "Biblio-3", "senha": "ghi-jkl", "lote": "B"}
            ]),
        );

        let container = ServiceContainer::open(config_for(path.clone())).unwrap();
        let Reply::Delivered(delivered) = obtain(&container, "900", VALID_NATIONAL_ID) else {
            panic!("expected delivery");
        };
        assert_eq!(delivered.network_name, "Biblio-1");
        assert_eq!(delivered.secret, "11112222");

        let rows = read_json(&path);
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["documento"], VALID_NATIONAL_ID);
        assert_eq!(rows[0]["user_id"], "900");
        assert_eq!(rows[0]["dispositivos"], "Celular");
        assert_eq!(rows[0]["status"], "entregue");
        assert_eq!(rows[0]["lote"], "A");
        assert_eq!(rows[1]["nome"], "Biblio-2");
        assert_eq!(rows[1]["documento"], "");
        assert_eq!(rows[2]["lote"], "B");
    }

    #[test]
    fn test_numeric_user_ids_count_toward_quota() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("password.json");
        write_json(
            &path,
            &json!([
                {"nome": "W", "senha": "1", "documento": "1234567", "user_id": 77, "status": "entregue"},
                {"nome": "W", "senha": "2", "documento": "7654321", "user_id": " 77 ", "status": "entregue"},
                {"nome": "W", "senha": "3"}
            ]),
        );

        let container = ServiceContainer::open(config_for(path)).unwrap();
        assert_eq!(
            obtain(&container, "77", VALID_NATIONAL_ID),
            Reply::QuotaExceeded { limit: 2 }
        );

        let Reply::CredentialList(listing) = container
            .controller()
            .handle(&InboundEvent::new(requester("77"), Command::ListMyCredentials))
        else {
            panic!("expected listing");
        };
        let secrets: Vec<_> = listing.iter().map(|c| c.secret.as_str()).collect();
        assert_eq!(secrets, ["1", "2"]);
    }

    #[test]
    fn test_refresh_sees_new_batch_without_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("password.json");
        write_json(
            &path,
            &json!([{"nome": "Old", "senha": "x", "documento": "AB123456", "user_id": "1"}]),
        );

        let container = ServiceContainer::open(config_for(path.clone())).unwrap();
        assert_eq!(container.config.pool.read_consistency, ReadConsistency::Refresh);
        assert_eq!(obtain(&container, "2", VALID_NATIONAL_ID), Reply::NoSlotsAvailable);

        // Operator appends a new batch while the service is running.
        let mut rows = read_json(&path);
        rows.as_array_mut()
            .unwrap()
            .push(json!({"nome": "New", "senha": "fresh"}));
        write_json(&path, &rows);

        let Reply::Delivered(delivered) = obtain(&container, "2", VALID_NATIONAL_ID) else {
            panic!("expected delivery from the new batch");
        };
        assert_eq!(delivered.network_name, "New");
    }

    #[test]
    fn test_corrupt_file_reports_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("password.json");
        write_json(&path, &json!([{"nome": "A", "senha": "a"}]));

        let container = ServiceContainer::open(config_for(path.clone())).unwrap();
        std::fs::write(&path, b"{ not json").unwrap();

        assert_eq!(
            container
                .controller()
                .handle(&InboundEvent::new(requester("1"), Command::RequestCredential)),
            Reply::StoreUnavailable
        );
    }

    #[tokio::test]
    async fn test_console_session_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("password.json");
        write_json(&path, &json!([{"nome": "Biblioteca", "senha": "s3nha"}]));

        let container = ServiceContainer::open(config_for(path.clone())).unwrap();
        let channel = Arc::new(ConsoleReplyChannel::new(Vec::new()));
        let runtime = GuestWifiRuntime::new(container.controller(), channel.clone());

        let input = "\
            42 (Ana Souza): /start\n\
            42 (Ana Souza): /wifi\n\
            42 (Ana Souza): 2\n\
            42 (Ana Souza): 111.444.777-35\n";
        let summary = runtime.run(input.as_bytes()).await.unwrap();
        assert_eq!(summary.events, 4);

        // Pool is now empty for the next visitor.
        runtime.run("43: /wifi\n".as_bytes()).await.unwrap();
        drop(runtime);

        let output = String::from_utf8(
            Arc::try_unwrap(channel)
                .unwrap_or_else(|_| panic!("channel still shared"))
                .into_inner(),
        )
        .unwrap();
        assert!(output.contains("[42] Senha: s3nha"));
        assert!(output.contains("[43] Todas as senhas já foram entregues."));

        let stored = JsonFilePoolMedium::new(&path);
        let rows = read_json(stored.path());
        assert_eq!(rows[0]["usuario"], "Ana Souza");
        assert_eq!(rows[0]["dispositivos"], "Outros Dispositivos");
        assert_eq!(rows[0]["documento"], "111.444.777-35");
    }
}
