//! Chain-specific handler registry.
//!
//! Two dispatch tables: message kind → handler, and for generic contract
//! executions an exact address table plus an ordered list of label-pattern
//! rules. Ambiguous configurations are rejected when the registry is built,
//! never at dispatch time.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::handler::{ContractHandler, MsgHandler};
use super::transaction::MsgKind;

/// Malformed registry configuration. Construction-time only.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate handler binding for message kind `{0}`")]
    DuplicateKind(String),
    #[error("duplicate handler binding for contract `{0}`")]
    DuplicateContract(String),
    #[error("duplicate label rule `{0}`")]
    DuplicateLabelRule(String),
    #[error("message kind `{0}` is dispatched through contract bindings, not kind bindings")]
    ReservedKind(String),
}

/// Predicate matched against a resolved contract label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelPattern {
    Exact(String),
    Prefix(String),
}

impl LabelPattern {
    pub fn exact(s: impl Into<String>) -> Self {
        Self::Exact(s.into())
    }

    pub fn prefix(s: impl Into<String>) -> Self {
        Self::Prefix(s.into())
    }

    pub fn matches(&self, label: &str) -> bool {
        match self {
            Self::Exact(expected) => label == expected,
            Self::Prefix(prefix) => label.starts_with(prefix.as_str()),
        }
    }
}

impl std::fmt::Display for LabelPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(s) => write!(f, "= {s}"),
            Self::Prefix(s) => write!(f, "^ {s}"),
        }
    }
}

/// Validated dispatch tables for one chain.
pub struct HandlerRegistry {
    by_kind: HashMap<MsgKind, Arc<dyn MsgHandler>>,
    contracts: HashMap<String, Arc<dyn ContractHandler>>,
    label_rules: Vec<(LabelPattern, Arc<dyn ContractHandler>)>,
}

impl HandlerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn handler_for(&self, kind: &MsgKind) -> Option<&Arc<dyn MsgHandler>> {
        self.by_kind.get(kind)
    }

    /// Stage-1 contract lookup: exact address match.
    pub fn contract_handler(&self, address: &str) -> Option<&Arc<dyn ContractHandler>> {
        self.contracts.get(address)
    }

    /// Stage-2 contract lookup: first label rule that matches wins. Rules are
    /// evaluated in registration order.
    pub fn label_handler(&self, label: &str) -> Option<&Arc<dyn ContractHandler>> {
        self.label_rules
            .iter()
            .find(|(pattern, _)| pattern.matches(label))
            .map(|(_, handler)| handler)
    }

    /// Whether label resolution can change the dispatch outcome. When no label
    /// rules exist the resolver is never consulted.
    pub fn has_label_rules(&self) -> bool {
        !self.label_rules.is_empty()
    }
}

/// Collects bindings, validates on [`RegistryBuilder::build`].
#[derive(Default)]
pub struct RegistryBuilder {
    kinds: Vec<(MsgKind, Arc<dyn MsgHandler>)>,
    contracts: Vec<(String, Arc<dyn ContractHandler>)>,
    label_rules: Vec<(LabelPattern, Arc<dyn ContractHandler>)>,
}

impl RegistryBuilder {
    /// Binds a handler to a message kind.
    pub fn bind(mut self, kind: MsgKind, handler: Arc<dyn MsgHandler>) -> Self {
        self.kinds.push((kind, handler));
        self
    }

    /// Binds the same handler to several kinds.
    pub fn bind_each(mut self, kinds: impl IntoIterator<Item = MsgKind>, handler: Arc<dyn MsgHandler>) -> Self {
        for kind in kinds {
            self.kinds.push((kind, Arc::clone(&handler)));
        }
        self
    }

    /// Binds a handler to an exact contract address.
    pub fn bind_contract(
        mut self,
        address: impl Into<String>,
        handler: Arc<dyn ContractHandler>,
    ) -> Self {
        self.contracts.push((address.into(), handler));
        self
    }

    /// Appends a label-pattern rule. Order is priority: earlier rules win.
    pub fn bind_label(mut self, pattern: LabelPattern, handler: Arc<dyn ContractHandler>) -> Self {
        self.label_rules.push((pattern, handler));
        self
    }

    pub fn build(self) -> Result<HandlerRegistry, RegistryError> {
        let mut by_kind = HashMap::new();
        for (kind, handler) in self.kinds {
            if kind == MsgKind::ExecuteContract {
                return Err(RegistryError::ReservedKind(kind.name().to_string()));
            }
            tracing::debug!(
                target: "tally::engine::registry",
                kind = kind.name(),
                handler = handler.name(),
                "registered message handler"
            );
            if by_kind.insert(kind.clone(), handler).is_some() {
                return Err(RegistryError::DuplicateKind(kind.name().to_string()));
            }
        }

        let mut contracts = HashMap::new();
        for (address, handler) in self.contracts {
            tracing::debug!(
                target: "tally::engine::registry",
                contract = %address,
                handler = handler.name(),
                "registered contract handler"
            );
            if contracts.insert(address.clone(), handler).is_some() {
                return Err(RegistryError::DuplicateContract(address));
            }
        }

        for (i, (pattern, _)) in self.label_rules.iter().enumerate() {
            if self.label_rules[..i].iter().any(|(seen, _)| seen == pattern) {
                return Err(RegistryError::DuplicateLabelRule(pattern.to_string()));
            }
        }

        Ok(HandlerRegistry {
            by_kind,
            contracts,
            label_rules: self.label_rules,
        })
    }
}
