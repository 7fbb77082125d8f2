#![forbid(unsafe_code)]

//! Dual-list transfer engine for FrankenTUI.
//!
//! A transfer shows one data source as two lists. Records named by the
//! *target keys* sit on the right, everything else on the left. Each side has
//! its own selection, search text and page. Moves resolve the selection of
//! one side into a proposed new set of target keys.
//!
//! The crate holds no rendering code. A widget draws
//! [`Transfer::visible`] and [`Transfer::selection`], and relays gestures as
//! [`TransferRequest`]s.
//!
//! ```text
//! (data_source, target_keys) ─► partition ─► filter ─► paginate ─► visible rows
//!                                   ▲                                   │
//!                     sync(props)   │          dispatch(request)        ▼
//!                    ◄──── host ◄── Change / SelectChange / Search / Scroll
//! ```
//!
//! # Feature flags
//!
//! - `tracing`: structured logs and spans through `tracing`.
//! - `serde`: `Serialize`/`Deserialize` on items, requests and events.

pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod item;
pub mod logging;
pub mod moves;
pub mod paginator;
pub mod partition;
pub mod selection;
pub mod transfer;

#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};

pub use config::{DEFAULT_PAGE_SIZE, MoveOrder, PaginationConfig, TransferConfig};
pub use error::{ConfigError, Diagnostic};
pub use event::{ScrollEvent, Side, TransferEvent, TransferRequest};
pub use filter::{FilterPredicate, title_contains};
pub use item::{Key, RowKey, TransferItem, TransferRecord};
pub use paginator::{PageState, PageWindow};
pub use partition::Partition;
pub use selection::{CheckStatus, SelectionState, SelectionSummary};
pub use transfer::{ListenerId, Operations, Transfer, TransferProps};
