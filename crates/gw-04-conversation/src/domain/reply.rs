//! # Replies
//!
//! Every message the controller can send. `Display` renders the text shown
//! to the requester.

use gw_03_allocation::{AllocationError, DeliveredCredential};
use shared_types::{DeliveryStatus, DeviceClass, IssuedCredential};
use std::fmt;

/// A single answer to an inbound event.
#[derive(Clone, PartialEq, Eq)]
pub enum Reply {
    Welcome,
    /// Ask which kind of device will connect.
    DevicePrompt { network_name: String },
    /// Ask for the identity document.
    DocumentPrompt,
    /// Credential committed to the requester.
    Delivered(DeliveredCredential),
    NoSlotsAvailable,
    QuotaExceeded { limit: usize },
    InvalidDocument,
    StaleSlot,
    StoreUnavailable,
    Cancelled,
    /// Credentials already held, possibly none.
    CredentialList(Vec<IssuedCredential>),
    /// Free text arrived with no request in progress.
    NoActiveRequest,
}

impl Reply {
    /// Short name for logs. Never includes secrets.
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Welcome => "welcome",
            Reply::DevicePrompt { .. } => "device_prompt",
            Reply::DocumentPrompt => "document_prompt",
            Reply::Delivered(_) => "delivered",
            Reply::NoSlotsAvailable => "no_slots_available",
            Reply::QuotaExceeded { .. } => "quota_exceeded",
            Reply::InvalidDocument => "invalid_document",
            Reply::StaleSlot => "stale_slot",
            Reply::StoreUnavailable => "store_unavailable",
            Reply::Cancelled => "cancelled",
            Reply::CredentialList(_) => "credential_list",
            Reply::NoActiveRequest => "no_active_request",
        }
    }
}

impl From<&AllocationError> for Reply {
    fn from(err: &AllocationError) -> Self {
        match err {
            AllocationError::NoSlotsAvailable => Reply::NoSlotsAvailable,
            AllocationError::QuotaExceeded { limit, .. } => Reply::QuotaExceeded { limit: *limit },
            AllocationError::InvalidDocument { .. } => Reply::InvalidDocument,
            AllocationError::StaleSlot { .. } => Reply::StaleSlot,
            AllocationError::StoreUnavailable { .. } => Reply::StoreUnavailable,
        }
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Delivered(delivered) => f.debug_tuple("Delivered").field(delivered).finish(),
            Reply::CredentialList(list) => write!(f, "CredentialList({} entries)", list.len()),
            other => f.write_str(other.kind()),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Welcome => write!(
                f,
                "Olá! Envie /wifi para pedir uma senha de acesso ao WiFi. \
                 Só vamos pedir o seu documento, o resto é automático.\n\n\
                 Envie /minhassenhas para ver as senhas que você já recebeu."
            ),
            Reply::DevicePrompt { network_name } => {
                writeln!(f, "Rede {network_name}. Qual dispositivo você vai conectar?")?;
                for (index, class) in DeviceClass::ALL.iter().enumerate() {
                    write!(f, "\n{}. {}", index + 1, class.label())?;
                }
                Ok(())
            }
            Reply::DocumentPrompt => {
                write!(f, "Informe o número do seu documento (CPF, RG ou passaporte):")
            }
            Reply::Delivered(delivered) => write!(
                f,
                "Cadastro concluído!\n\n\
                 Rede: {}\n\
                 Senha: {}\n\n\
                 Esta senha é exclusiva e não será enviada de novo. Guarde-a com cuidado.",
                delivered.network_name, delivered.secret
            ),
            Reply::NoSlotsAvailable => {
                write!(f, "Todas as senhas já foram entregues. Aguarde o próximo lote.")
            }
            Reply::QuotaExceeded { limit } => write!(
                f,
                "Você já recebeu o limite de {limit} senhas. Não é possível pedir outra."
            ),
            Reply::InvalidDocument => write!(
                f,
                "Documento inválido. Informe um CPF, RG ou passaporte válido."
            ),
            Reply::StaleSlot => write!(
                f,
                "Essa senha acabou de ser entregue a outra pessoa. Envie /wifi para tentar de novo."
            ),
            Reply::StoreUnavailable => write!(
                f,
                "Não foi possível acessar a base de senhas. Tente novamente mais tarde."
            ),
            Reply::Cancelled => write!(f, "Operação cancelada."),
            Reply::CredentialList(list) if list.is_empty() => {
                write!(f, "Você ainda não recebeu nenhuma senha.")
            }
            Reply::CredentialList(list) => {
                write!(f, "Suas senhas:")?;
                for credential in list {
                    write!(
                        f,
                        "\n\n• Rede: {}\n  Senha: {}\n  Dispositivo: {}\n  Status: {}",
                        credential.network_name,
                        credential.secret,
                        credential.device_class.as_deref().unwrap_or("-"),
                        status_label(credential.status),
                    )?;
                }
                Ok(())
            }
            Reply::NoActiveRequest => {
                write!(f, "Nenhum pedido em andamento. Envie /wifi para começar.")
            }
        }
    }
}

fn status_label(status: DeliveryStatus) -> &'static str {
    match status {
        DeliveryStatus::Delivered => "entregue",
        DeliveryStatus::Unassigned => "disponível",
    }
}
