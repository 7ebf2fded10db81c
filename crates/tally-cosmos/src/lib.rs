//! Chain-agnostic Cosmos SDK message handlers.
//!
//! Every account-based Cosmos chain shares the bank, staking, distribution,
//! gov and IBC message families; this crate turns those into normalized rows.
//! Chain packs start from [`base_registry_builder`] and add their own
//! bindings on top (see `tally-osmosis`); thin chains use it as-is.

pub mod bank;
pub mod gov;
pub mod ibc;
pub mod registry;
pub mod staking;

pub use bank::BankTransferHandler;
pub use gov::GovHandler;
pub use ibc::{IbcTransferHandler, PacketHandler, UpdateClientHandler};
pub use registry::{base_registry_builder, build_base_registry};
pub use staking::StakingHandler;
