pub mod dispatch;
pub mod driver;
pub mod fallback;
pub mod handler;
pub mod label;
pub mod normalize;
pub mod registry;
pub mod row;
pub mod sink;
pub mod transaction;

pub use dispatch::{DispatchConfig, Dispatcher};
pub use driver::{BatchDriver, LogProgress, Progress, PHASE_PROCESS_TRANSACTIONS};
pub use fallback::{EventTransferDetector, TransferDetector};
pub use handler::{ContractHandler, HandlerOutcome, MsgHandler};
pub use label::{CachedResolver, LabelResolver, LcdLabelResolver};
pub use normalize::{LcdNormalizer, Normalizer};
pub use registry::{HandlerRegistry, LabelPattern, RegistryBuilder, RegistryError};
pub use row::{Row, RowKind};
pub use sink::{Exporter, RowSink};
pub use transaction::{Coin, Message, MsgKind, Transaction};
