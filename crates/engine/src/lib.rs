//! revtris-engine - gravity, collision and legal placement enumeration.

pub mod apply;
pub mod collision;
pub mod move_list;
pub mod movegen;

pub use apply::{apply_placement, apply_placement_mut, placed_shape};
pub use collision::{can_place, collides, drop_row, DropError};
pub use move_list::PlacementList;
pub use movegen::{enumerate_placements, enumerate_shape};
