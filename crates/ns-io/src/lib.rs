//! `ns-io`: network definition files.
//!
//! # Format
//!
//! ```text
//! ; == LOADING RAMPS ==
//!
//! LOADING_RAMP id=1 delivery-interval=3
//!
//! ; == WORKERS ==
//!
//! WORKER id=1 processing-time=2 queue-type=FIFO
//!
//! ; == STOREHOUSES ==
//!
//! STOREHOUSE id=1
//!
//! ; == LINKS ==
//!
//! LINK src=ramp-1 dest=worker-1
//! LINK src=worker-1 dest=store-1
//! ```
//!
//! Blank lines and lines starting with `;` are ignored.  Every other line
//! is a keyword followed by `key=value` tokens.  Link weights are not
//! stored; they are recomputed as links are added.
//!
//! | Module   | Contents                                               |
//! |----------|--------------------------------------------------------|
//! | [`load`] | `load_network`, `load_network_file`, `parse_network`   |
//! | [`save`] | `save_network`, `save_network_file`                    |
//! | [`error`]| `FormatError` (every load error carries its line)      |

pub mod error;
pub mod load;
pub mod save;


pub use error::{FormatError, FormatResult};
pub use load::{load_network, load_network_file, parse_network};
pub use save::{save_network, save_network_file};
