//! `ns-network`: the logistics network and its per-tick operations.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`node`]        | `Ramp`, `Worker`, `Storehouse`, `SenderId`, `ReceiverId`  |
//! | [`capability`]  | `PackageSender`, `PackageReceiver`, `SendingSlot`         |
//! | [`preferences`] | `ReceiverPreferences`: uniform weighted router            |
//! | [`collection`]  | `NodeCollection<N>`: insertion-ordered node storage       |
//! | [`network`]     | `Network`: owns every node; linking, removal, phases      |
//! | [`verify`]      | `ReachabilityVerifier`: every ramp reaches a storehouse   |
//! | [`error`]       | `NetworkError`, `NetworkResult<T>`                        |
//!
//! # References between nodes
//!
//! A sender's preference table never holds a pointer to a receiver.  It
//! holds a [`ReceiverId`] value handle that the [`Network`] resolves on every
//! hand-off.  Removing a receiver scrubs its handle from every table before
//! the node itself is dropped, so no table can name a node that is gone.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash for the verifier's memo map.                        |
//! | `serde`   | Derives `Serialize`/`Deserialize` on id handles.           |

pub mod capability;
pub mod collection;
pub mod error;
pub mod network;
pub mod node;
pub mod preferences;
pub mod verify;


pub use capability::{PackageReceiver, PackageSender, SendingSlot};
pub use collection::{Node, NodeCollection};
pub use error::{NetworkError, NetworkResult};
pub use network::Network;
pub use node::{NodeKind, ParseNodeRefError, Ramp, ReceiverId, ReceiverKind, SenderId, Storehouse, Worker};
pub use preferences::ReceiverPreferences;
pub use verify::ReachabilityVerifier;
