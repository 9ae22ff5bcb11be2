//! Minimal shader-node graph for a single material.
//!
//! Only the node kinds the lighting workflow reads or writes are modelled.
//! Sockets are addressed by name; unlinked inputs carry a default value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type NodeId = usize;

pub mod socket {
    pub const SURFACE: &str = "Surface";
    pub const BSDF: &str = "BSDF";
    pub const EMISSION: &str = "Emission";
    pub const COLOR: &str = "Color";
    pub const STRENGTH: &str = "Strength";
    pub const TEMPERATURE: &str = "Temperature";
    pub const BASE_COLOR: &str = "Base Color";
    pub const METALLIC: &str = "Metallic";
    pub const ROUGHNESS: &str = "Roughness";
    pub const IOR: &str = "IOR";
    pub const IOR_LEVEL: &str = "IOR Level";
    pub const TRANSMISSION_WEIGHT: &str = "Transmission Weight";
    pub const COAT_WEIGHT: &str = "Coat Weight";
    pub const SHEEN_WEIGHT: &str = "Sheen Weight";
    pub const EMISSION_COLOR: &str = "Emission Color";
    pub const EMISSION_STRENGTH: &str = "Emission Strength";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    MaterialOutput,
    PrincipledBsdf,
    Emission,
    Blackbody,
}

impl NodeKind {
    /// Whether the node produces a shader (closure) output
    pub fn is_shader(&self) -> bool {
        matches!(self, NodeKind::PrincipledBsdf | NodeKind::Emission)
    }

    fn default_inputs(&self) -> BTreeMap<String, SocketValue> {
        use self::socket::*;
        let pairs: Vec<(&str, SocketValue)> = match self {
            NodeKind::MaterialOutput => vec![],
            NodeKind::PrincipledBsdf => vec![
                (BASE_COLOR, SocketValue::Color([0.8, 0.8, 0.8, 1.0])),
                (METALLIC, SocketValue::Float(0.0)),
                (ROUGHNESS, SocketValue::Float(0.5)),
                (IOR, SocketValue::Float(1.5)),
                (IOR_LEVEL, SocketValue::Float(0.5)),
                (TRANSMISSION_WEIGHT, SocketValue::Float(0.0)),
                (COAT_WEIGHT, SocketValue::Float(0.0)),
                (SHEEN_WEIGHT, SocketValue::Float(0.0)),
                (EMISSION_COLOR, SocketValue::Color([1.0, 1.0, 1.0, 1.0])),
                (EMISSION_STRENGTH, SocketValue::Float(0.0)),
            ],
            NodeKind::Emission => vec![
                (COLOR, SocketValue::Color([1.0, 1.0, 1.0, 1.0])),
                (STRENGTH, SocketValue::Float(1.0)),
            ],
            NodeKind::Blackbody => vec![(TEMPERATURE, SocketValue::Float(1500.0))],
        };
        pairs
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}

/// Default value of an input socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SocketValue {
    Float(f64),
    Color([f64; 4]),
}

impl SocketValue {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SocketValue::Float(v) => Some(*v),
            SocketValue::Color(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderNode {
    pub id: NodeId,
    pub kind: NodeKind,
    #[serde(default)]
    pub inputs: BTreeMap<String, SocketValue>,
}

impl ShaderNode {
    pub fn input(&self, socket: &str) -> Option<&SocketValue> {
        self.inputs.get(socket)
    }
}

/// Connection from a node output to a node input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub from_node: NodeId,
    pub from_socket: String,
    pub to_node: NodeId,
    pub to_socket: String,
}

/// Shader graph of one material.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialGraph {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<ShaderNode>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl MaterialGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a node of `kind` with its default inputs and return its id.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.nodes.iter().map(|n| n.id + 1).max().unwrap_or(0);
        self.nodes.push(ShaderNode {
            id,
            kind,
            inputs: kind.default_inputs(),
        });
        id
    }

    /// Remove a node and every link touching it
    pub fn remove_node(&mut self, id: NodeId) -> Option<ShaderNode> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        self.links.retain(|l| l.from_node != id && l.to_node != id);
        Some(self.nodes.remove(index))
    }

    pub fn node(&self, id: NodeId) -> Option<&ShaderNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut ShaderNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn find_node(&self, kind: NodeKind) -> Option<&ShaderNode> {
        self.nodes.iter().find(|n| n.kind == kind)
    }

    /// Connect an output to an input.
    ///
    /// An input accepts one link; an existing link into the same input is replaced.
    pub fn link(
        &mut self,
        from_node: NodeId,
        from_socket: &str,
        to_node: NodeId,
        to_socket: &str,
    ) {
        self.links
            .retain(|l| !(l.to_node == to_node && l.to_socket == to_socket));
        self.links.push(Link {
            from_node,
            from_socket: from_socket.to_string(),
            to_node,
            to_socket: to_socket.to_string(),
        });
    }

    /// Node feeding the given input, if linked
    pub fn linked_from(&self, to_node: NodeId, to_socket: &str) -> Option<&ShaderNode> {
        self.links
            .iter()
            .find(|l| l.to_node == to_node && l.to_socket == to_socket)
            .and_then(|l| self.node(l.from_node))
    }

    /// Shader linked to the surface input of the first material output
    pub fn surface_shader(&self) -> Option<&ShaderNode> {
        let output = self.find_node(NodeKind::MaterialOutput)?;
        self.linked_from(output.id, socket::SURFACE)
    }

    /// Set an input default value; false when the node does not exist.
    pub fn set_input(&mut self, id: NodeId, socket: &str, value: SocketValue) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.inputs.insert(socket.to_string(), value);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node_assigns_increasing_ids() {
        let mut graph = MaterialGraph::new("Test");
        let a = graph.add_node(NodeKind::MaterialOutput);
        let b = graph.add_node(NodeKind::Emission);
        assert_eq!((a, b), (0, 1));
        assert_eq!(
            graph.node(b).unwrap().input(socket::STRENGTH),
            Some(&SocketValue::Float(1.0))
        );
    }

    #[test]
    fn test_ids_are_not_reused_after_removal_of_earlier_node() {
        let mut graph = MaterialGraph::new("Test");
        let a = graph.add_node(NodeKind::Emission);
        let b = graph.add_node(NodeKind::Emission);
        graph.remove_node(a);
        let c = graph.add_node(NodeKind::Blackbody);
        assert_ne!(b, c);
    }

    #[test]
    fn test_link_replaces_existing_input_link() {
        let mut graph = MaterialGraph::new("Test");
        let out = graph.add_node(NodeKind::MaterialOutput);
        let first = graph.add_node(NodeKind::Emission);
        let second = graph.add_node(NodeKind::PrincipledBsdf);

        graph.link(first, socket::EMISSION, out, socket::SURFACE);
        graph.link(second, socket::BSDF, out, socket::SURFACE);

        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.surface_shader().unwrap().id, second);
    }

    #[test]
    fn test_remove_node_drops_links() {
        let mut graph = MaterialGraph::new("Test");
        let out = graph.add_node(NodeKind::MaterialOutput);
        let em = graph.add_node(NodeKind::Emission);
        graph.link(em, socket::EMISSION, out, socket::SURFACE);

        let removed = graph.remove_node(em).unwrap();
        assert_eq!(removed.kind, NodeKind::Emission);
        assert!(graph.links.is_empty());
        assert!(graph.surface_shader().is_none());
        assert!(graph.remove_node(em).is_none());
    }

    #[test]
    fn test_set_input_missing_node() {
        let mut graph = MaterialGraph::new("Test");
        assert!(!graph.set_input(3, socket::STRENGTH, SocketValue::Float(2.0)));
    }

    #[test]
    fn test_graph_deserializes_from_json() {
        let json = r#"{
            "name": "Bulb",
            "nodes": [
                {"id": 0, "kind": "material_output"},
                {"id": 1, "kind": "emission", "inputs": {"Strength": 4.0, "Color": [1, 0.5, 0.2, 1]}}
            ],
            "links": [
                {"from_node": 1, "from_socket": "Emission", "to_node": 0, "to_socket": "Surface"}
            ]
        }"#;
        let graph: MaterialGraph = serde_json::from_str(json).unwrap();
        let shader = graph.surface_shader().unwrap();
        assert_eq!(shader.kind, NodeKind::Emission);
        assert_eq!(shader.input(socket::STRENGTH), Some(&SocketValue::Float(4.0)));
        assert_eq!(
            shader.input(socket::COLOR),
            Some(&SocketValue::Color([1.0, 0.5, 0.2, 1.0]))
        );
    }
}
