//! WebGPU rendering module
//!
//! Reads [`Snapshot`](crate::sim::Snapshot)s only; nothing here touches the simulation.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene_vertices;
