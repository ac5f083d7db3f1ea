use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::ProcedureCatalog,
    conversation::{ConversationEntry, ConversationLog, Role},
    error::{Error, Result},
    router::{self, Reply},
};

pub const EMPTY_MESSAGE: &str = "No se recibió ningún mensaje.";

/// Inbound chat payload. A missing message is treated like an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ChatRequest {
    /// The user's question, in Spanish.
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TitlesResponse {
    pub titles: Vec<String>,
}

/// Answers chat messages against a shared catalog and keeps a short log of
/// the exchange.
#[derive(Debug)]
pub struct Assistant {
    catalog: Arc<ProcedureCatalog>,
    log: ConversationLog,
}

impl Assistant {
    pub fn new(catalog: Arc<ProcedureCatalog>) -> Self {
        Self {
            catalog,
            log: ConversationLog::new(),
        }
    }

    pub fn catalog(&self) -> &ProcedureCatalog {
        &self.catalog
    }

    pub fn history(&self) -> Vec<ConversationEntry> {
        self.log.history()
    }

    pub fn titles(&self) -> TitlesResponse {
        TitlesResponse {
            titles: self.catalog.titles(),
        }
    }

    /// Route one message and record both sides of the exchange.
    ///
    /// A missing or blank message is rejected before any lookup and leaves
    /// the log untouched.
    pub fn chat(&self, request: &ChatRequest) -> Result<Reply> {
        let message = request
            .message
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();
        if message.trim().is_empty() {
            return Err(Error::InvalidRequest(EMPTY_MESSAGE.to_string()));
        }

        self.log.append(Role::User, message.as_str());
        let routed = router::route(&self.catalog, &message);
        tracing::debug!(branch = ?routed.branch, response_type = routed.reply.response_type(), "routed message");
        self.log.append(Role::Assistant, routed.reply.transcript());

        Ok(routed.reply)
    }
}
