//! Material shader graph and the writers that apply lighting results to it.
//!
//! Computing a recommendation never touches a graph. The only mutations are
//! [`apply_temperature`] and [`apply_strength`], which take the graph by
//! `&mut` and check their preconditions before writing anything.

mod apply;
mod blackbody;
mod graph;

pub use apply::{
    apply_strength, apply_temperature, emission_strength_of, temperature_of, LAMP_KELVIN,
};
pub use blackbody::{blackbody_to_hex, blackbody_to_rgb};
pub use graph::{socket, Link, MaterialGraph, NodeId, NodeKind, ShaderNode, SocketValue};
