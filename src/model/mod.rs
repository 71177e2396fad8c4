//! # Property Graph Model
//!
//! Plain data types shared by the graph view, the algorithms and the
//! exporters. Nothing in here does I/O or holds state.

pub mod node;
pub mod relationship;
pub mod path;
pub mod value;
pub mod property_map;

pub use node::{Node, NodeId};
pub use relationship::{Relationship, RelId, Direction};
pub use path::Path;
pub use value::{Value, IsoDuration};
pub use property_map::PropertyMap;
