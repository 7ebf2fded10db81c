//! Base registry shared by every Cosmos chain.

use std::sync::Arc;

use tally::engine::{HandlerRegistry, MsgKind, RegistryBuilder, RegistryError};

use crate::bank::BankTransferHandler;
use crate::gov::GovHandler;
use crate::ibc::{IbcTransferHandler, PacketHandler, UpdateClientHandler};
use crate::staking::StakingHandler;

/// Builder pre-loaded with the chain-agnostic bindings. Chain packs add their
/// own kinds, contracts and label rules on top before building.
pub fn base_registry_builder() -> RegistryBuilder {
    HandlerRegistry::builder()
        .bind_each(
            [MsgKind::Send, MsgKind::MultiSend],
            Arc::new(BankTransferHandler),
        )
        .bind_each(
            [
                MsgKind::Delegate,
                MsgKind::Undelegate,
                MsgKind::Redelegate,
                MsgKind::WithdrawReward,
                MsgKind::WithdrawCommission,
                MsgKind::SetWithdrawAddress,
            ],
            Arc::new(StakingHandler),
        )
        .bind_each(
            [MsgKind::Vote, MsgKind::SubmitProposal, MsgKind::GovDeposit],
            Arc::new(GovHandler),
        )
        .bind(MsgKind::IbcTransfer, Arc::new(IbcTransferHandler))
        .bind_each(
            [
                MsgKind::RecvPacket,
                MsgKind::Acknowledgement,
                MsgKind::IbcTimeout,
            ],
            Arc::new(PacketHandler),
        )
        .bind(MsgKind::UpdateClient, Arc::new(UpdateClientHandler))
}

/// Registry for thin chains with no chain-specific handlers.
pub fn build_base_registry() -> Result<HandlerRegistry, RegistryError> {
    base_registry_builder().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_registry_builds_and_covers_the_common_kinds() {
        let registry = build_base_registry().unwrap();
        assert!(registry.handler_for(&MsgKind::Send).is_some());
        assert!(registry.handler_for(&MsgKind::Delegate).is_some());
        assert!(registry.handler_for(&MsgKind::Vote).is_some());
        assert!(registry.handler_for(&MsgKind::IbcTransfer).is_some());
        assert!(registry.handler_for(&MsgKind::UpdateClient).is_some());
        assert!(!registry.has_label_rules());
        assert!(registry
            .handler_for(&MsgKind::SwapExactAmountIn)
            .is_none());
    }
}
