//! Layout engine.
//!
//! Pure computation from a ring configuration to LED coordinates, port groups
//! and grid cells. Nothing in this module performs I/O or logs; callers decide
//! how to report an `EngineError`.

pub mod coordinates;
pub mod error;
pub mod grid_projection;
pub mod partition;
pub mod ring_layout;
pub mod sphere_model;

// Re-export commonly used types and functions
pub use coordinates::{coordinate_for, map_layout, ring_height, ring_radius};
pub use error::{EngineError, EngineResult};
pub use grid_projection::{
    cell_size, find_collisions, project, project_all, project_ring_position, unproject, Collision,
};
pub use partition::{partition, ring_assignment, PartitionStats};
pub use ring_layout::RingLayout;
pub use sphere_model::{EngineInput, GridProjection, GridSpec, SphereModel};
