//! Osmosis dispatch table.

use std::sync::Arc;

use tally::engine::{HandlerRegistry, LabelPattern, MsgKind, RegistryError};
use tally_cosmos::base_registry_builder;

use crate::concentrated::ConcentratedLpHandler;
use crate::contracts::{
    CosmwasmPoolHandler, IcnsHandler, LevanaPerpsHandler, LiquidStakeHandler,
    MarsClaimRewardsHandler, MarsCreditManagerHandler, MarsRedBankHandler, PythUpdateHandler,
    QuasarVaultHandler, TfmLimitOrderHandler, TfmRouterHandler,
};
use crate::general::SimpleMsgHandler;
use crate::lp::{LockupHandler, LpDepositHandler, LpWithdrawHandler};
use crate::superfluid::SuperfluidHandler;
use crate::swap::SwapHandler;

// Individually well-known contracts, stable enough to hard-code.
pub const CONTRACT_ICNS_REGISTRAR: &str =
    "osmo1llh07xn7pcst3jqm0xpsucf90lzugfskkkhk8a3u2yznqmse4l5smydwpw";
pub const CONTRACT_ICNS_RESOLVER: &str =
    "osmo1xk0s8xgktn9x5vwcgtjdxqzadg88fgn33p8u9cnpdxwemvxscvast52cdd";
pub const CONTRACT_LIQUID_STAKE: &str =
    "osmo1f5vfcph2dvfeqcqkhetwv75fda69z7e5c2dldm3kvgj23crkv6wqcn47a0";
pub const CONTRACT_MARS_CREDIT_MANAGER: &str =
    "osmo1f2m24wktq0sw3c0lexlg7fv4kngwyttvzws3a3r3al9ld2s2pvds87jqvf";
pub const CONTRACT_MARS_INCENTIVES: &str =
    "osmo1nkahswfr8shg8rlxqwup0vgahp0dk4x8w6tkv3rra8rratnut36sk22vrm";
pub const CONTRACT_MARS_RED_BANK: &str =
    "osmo1c3ljch9dfw5kf52nfwpxd2zmj2ese7agnx0p9tenkrryasrle5sqf3ftpg";
pub const CONTRACT_PYTH: &str =
    "osmo13ge29x4e2s63a8ytz2px8gurtyznmue4a69n5275692v3qn3ks8q7cwck7";
pub const CONTRACT_QUASAR_VAULT: &str =
    "osmo15uk8m3wchpee8gjl02lwelxlsl4uuy3pdy7u6kz7cu7krlph2xpscf53cy";
pub const CONTRACT_TFM_LIMIT_ORDER: &str =
    "osmo1rqamy6jc3f0rwrg5xz8hy8q7n932t2488f2gqg3d0cadvd3uqaxq4wazn8";
pub const CONTRACT_TFM_ROUTER: &str =
    "osmo1aj2aqz04yftsseht37mhguxxtqqacs0t3vt332u6gtr9z4r2lxyq5h69zg";

/// Full Osmosis registry: base Cosmos bindings, the Osmosis module families,
/// the hard-coded contract table and the label rules for per-instance
/// contract families.
pub fn build_registry() -> Result<HandlerRegistry, RegistryError> {
    base_registry_builder()
        // swaps
        .bind_each(
            [
                MsgKind::SwapExactAmountIn,
                MsgKind::SplitRouteSwapExactAmountIn,
                MsgKind::SwapExactAmountOut,
                MsgKind::SplitRouteSwapExactAmountOut,
            ],
            Arc::new(SwapHandler),
        )
        // classic liquidity pools
        .bind_each(
            [MsgKind::JoinPool, MsgKind::JoinSwapExternAmountIn],
            Arc::new(LpDepositHandler),
        )
        .bind(MsgKind::ExitPool, Arc::new(LpWithdrawHandler))
        .bind_each(
            [
                MsgKind::LockTokens,
                MsgKind::BeginUnlocking,
                MsgKind::UnlockPeriodLock,
            ],
            Arc::new(LockupHandler),
        )
        // superfluid
        .bind_each(
            [
                MsgKind::SuperfluidDelegate,
                MsgKind::LockAndSuperfluidDelegate,
                MsgKind::SuperfluidUndelegate,
                MsgKind::SuperfluidUnbondLock,
                MsgKind::CreateFullRangePositionAndSuperfluidDelegate,
            ],
            Arc::new(SuperfluidHandler),
        )
        // concentrated liquidity
        .bind_each(
            [
                MsgKind::CreatePosition,
                MsgKind::AddToPosition,
                MsgKind::CollectIncentives,
                MsgKind::CollectSpreadRewards,
                MsgKind::WithdrawPosition,
                MsgKind::UnlockAndMigrateSharesToFullRangeConcentratedPosition,
            ],
            Arc::new(ConcentratedLpHandler),
        )
        // miscellaneous
        .bind_each(
            [
                MsgKind::AddAuthenticator,
                MsgKind::RemoveAuthenticator,
                MsgKind::SetValidatorPreference,
            ],
            Arc::new(SimpleMsgHandler),
        )
        // well-known contracts
        .bind_contract(CONTRACT_LIQUID_STAKE, Arc::new(LiquidStakeHandler))
        .bind_contract(CONTRACT_ICNS_REGISTRAR, Arc::new(IcnsHandler))
        .bind_contract(CONTRACT_ICNS_RESOLVER, Arc::new(IcnsHandler))
        .bind_contract(CONTRACT_PYTH, Arc::new(PythUpdateHandler))
        .bind_contract(CONTRACT_MARS_INCENTIVES, Arc::new(MarsClaimRewardsHandler))
        .bind_contract(
            CONTRACT_MARS_CREDIT_MANAGER,
            Arc::new(MarsCreditManagerHandler),
        )
        .bind_contract(CONTRACT_MARS_RED_BANK, Arc::new(MarsRedBankHandler))
        .bind_contract(CONTRACT_TFM_ROUTER, Arc::new(TfmRouterHandler))
        .bind_contract(CONTRACT_TFM_LIMIT_ORDER, Arc::new(TfmLimitOrderHandler))
        .bind_contract(CONTRACT_QUASAR_VAULT, Arc::new(QuasarVaultHandler))
        // per-instance contract families, identified by label
        .bind_label(
            LabelPattern::prefix("quasar-cl-vault-"),
            Arc::new(QuasarVaultHandler),
        )
        .bind_label(
            LabelPattern::prefix("Levana Perps Market"),
            Arc::new(LevanaPerpsHandler),
        )
        .bind_label(
            LabelPattern::exact("cosmwasmpool"),
            Arc::new(CosmwasmPoolHandler),
        )
        .build()
}
