use super::graph::{socket, MaterialGraph, NodeId, NodeKind, SocketValue};
use crate::error::{CalcError, Result};
use crate::lighting::EmissionResult;

/// Color temperature of a freshly built lamp material
pub const LAMP_KELVIN: f64 = 3500.0;

/// Accepted range for a blackbody temperature input
const KELVIN_RANGE: std::ops::RangeInclusive<f64> = 1000.0..=40000.0;

/// Blackbody node feeding the emission color of the shader on the material surface
fn emission_blackbody(graph: &MaterialGraph) -> Option<NodeId> {
    let shader = graph.surface_shader()?;
    let color_socket = match shader.kind {
        NodeKind::Emission => socket::COLOR,
        NodeKind::PrincipledBsdf => socket::EMISSION_COLOR,
        _ => return None,
    };
    let source = graph.linked_from(shader.id, color_socket)?;
    (source.kind == NodeKind::Blackbody).then_some(source.id)
}

/// Shader on the material surface and the socket holding its emission strength
fn strength_socket(graph: &MaterialGraph) -> Option<(NodeId, &'static str)> {
    let shader = graph.surface_shader()?;
    match shader.kind {
        NodeKind::PrincipledBsdf => Some((shader.id, socket::EMISSION_STRENGTH)),
        NodeKind::Emission => Some((shader.id, socket::STRENGTH)),
        _ => None,
    }
}

/// Write `kelvin` into the blackbody node feeding the material's emission color.
///
/// Only the shader linked to the material output counts. Fails with
/// `MissingEmissionNode` when that shader has no blackbody on its emission
/// color input; the graph is left untouched on every failure.
pub fn apply_temperature(material: &mut MaterialGraph, kelvin: f64) -> Result<()> {
    if !KELVIN_RANGE.contains(&kelvin) {
        return Err(CalcError::InvalidInput(format!(
            "color temperature must lie within 1000..=40000 K, got {kelvin}"
        )));
    }
    let node = emission_blackbody(material)
        .ok_or_else(|| CalcError::MissingEmissionNode(material.name.clone()))?;
    material.set_input(node, socket::TEMPERATURE, SocketValue::Float(kelvin));
    Ok(())
}

/// Write an emission strength into the shader on the material surface.
///
/// Principled BSDF surfaces get "Emission Strength", Emission surfaces get
/// "Strength". Any other wiring fails with `MissingEmissionNode`.
pub fn apply_strength(material: &mut MaterialGraph, result: &EmissionResult) -> Result<()> {
    if !result.strength_watts.is_finite() || result.strength_watts < 0.0 {
        return Err(CalcError::InvalidInput(format!(
            "emission strength must be zero or positive, got {}",
            result.strength_watts
        )));
    }
    let (node, input) = strength_socket(material)
        .ok_or_else(|| CalcError::MissingEmissionNode(material.name.clone()))?;
    material.set_input(node, input, SocketValue::Float(result.strength_watts));
    Ok(())
}

/// Current temperature of the emission blackbody, if wired
pub fn temperature_of(material: &MaterialGraph) -> Option<f64> {
    let id = emission_blackbody(material)?;
    material.node(id)?.input(socket::TEMPERATURE)?.as_float()
}

/// Current emission strength of the surface shader, if any
pub fn emission_strength_of(material: &MaterialGraph) -> Option<f64> {
    let (id, input) = strength_socket(material)?;
    material.node(id)?.input(input)?.as_float()
}

impl MaterialGraph {
    /// Glass-bulb lamp material: Principled BSDF with a blackbody-driven emission color.
    pub fn lamp(name: impl Into<String>) -> Self {
        let mut graph = MaterialGraph::new(name);
        let output = graph.add_node(NodeKind::MaterialOutput);
        graph.build_lamp_shader(output);
        graph
    }

    /// Replace every shader and blackbody node with the lamp setup.
    ///
    /// The material output node is kept (or created when missing).
    pub fn convert_to_lamp(&mut self) {
        let purge: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|n| n.kind.is_shader() || n.kind == NodeKind::Blackbody)
            .map(|n| n.id)
            .collect();
        for id in purge {
            self.remove_node(id);
        }

        let existing = self.find_node(NodeKind::MaterialOutput).map(|n| n.id);
        let output = match existing {
            Some(id) => id,
            None => self.add_node(NodeKind::MaterialOutput),
        };
        self.build_lamp_shader(output);
    }

    fn build_lamp_shader(&mut self, output: NodeId) {
        let principled = self.add_node(NodeKind::PrincipledBsdf);
        self.link(principled, socket::BSDF, output, socket::SURFACE);

        let settings = [
            (socket::METALLIC, 0.0),
            (socket::ROUGHNESS, 0.05),
            (socket::IOR, 1.45),
            (socket::IOR_LEVEL, 0.705),
            (socket::TRANSMISSION_WEIGHT, 1.0),
            (socket::COAT_WEIGHT, 0.0),
            (socket::SHEEN_WEIGHT, 0.0),
        ];
        for (input, value) in settings {
            self.set_input(principled, input, SocketValue::Float(value));
        }

        let blackbody = self.add_node(NodeKind::Blackbody);
        self.set_input(blackbody, socket::TEMPERATURE, SocketValue::Float(LAMP_KELVIN));
        self.link(blackbody, socket::COLOR, principled, socket::EMISSION_COLOR);
    }
}
