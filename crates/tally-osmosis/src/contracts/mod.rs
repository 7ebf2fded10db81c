//! CosmWasm contract handlers.
//!
//! Some contract families live at stable, individually well-known addresses
//! and are bound in the registry's exact-address table. Others (Quasar vaults,
//! Levana markets) are instantiated per-vault or per-market and are only
//! identifiable by their resolved contract label, so they bind to label
//! patterns instead.

pub mod cosmwasmpool;
pub mod icns;
pub mod levana;
pub mod liquid;
pub mod mars;
pub mod quasar;
pub mod tfm;

pub use cosmwasmpool::CosmwasmPoolHandler;
pub use icns::IcnsHandler;
pub use levana::{LevanaPerpsHandler, PythUpdateHandler};
pub use liquid::LiquidStakeHandler;
pub use mars::{MarsClaimRewardsHandler, MarsCreditManagerHandler, MarsRedBankHandler};
pub use quasar::QuasarVaultHandler;
pub use tfm::{TfmLimitOrderHandler, TfmRouterHandler};

use serde_json::Value;

/// First key of an execute payload, which names the contract method being
/// called (`{"swap": {...}}` → `swap`).
pub(crate) fn payload_method(payload: Option<&Value>) -> Option<&str> {
    payload
        .and_then(Value::as_object)
        .and_then(|object| object.keys().next())
        .map(String::as_str)
}
