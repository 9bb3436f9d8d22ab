// ABOUTME: Converts a workflow graph into an editable draw.io (mxGraph XML) document
// ABOUTME: Node positions come from a Graphviz JSON layout, styling from the graph itself

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use super::dot::to_dot;
use super::error::ConversionError;
use super::graphviz::Graphviz;
use super::DiagramConverter;
use crate::graph::{NodeStyle, WorkflowGraph};

pub const DIAGRAM_EXTENSION: &str = "drawio";

const NODE_STYLE: &str = "ellipse;whiteSpace=wrap;html=1;";
const EDGE_STYLE: &str = "endArrow=classic;html=1;rounded=0;";

/// A rendered draw.io document
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramDocument {
    name: String,
    content: String,
}

/// Node geometry in draw.io coordinates (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default)]
pub struct GraphLayout {
    pub width: f64,
    pub height: f64,
    nodes: HashMap<usize, NodeGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawLayout {
    bb: Option<String>,
    #[serde(default)]
    objects: Vec<RawObject>,
}

#[derive(Debug, Deserialize)]
struct RawObject {
    #[serde(rename = "_gvid")]
    gvid: usize,
    pos: Option<String>,
    width: Option<String>,
    height: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DrawioConverter {
    graphviz: Graphviz,
}

impl DiagramDocument {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, &self.content)
    }
}

impl GraphLayout {
    /// Parse the output of `dot -Tjson`. Graphviz reports points with the
    /// origin at the bottom-left and positions at node centers.
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        let raw: RawLayout = serde_json::from_str(json)?;

        let (width, height) = match raw.bb.as_deref() {
            Some(bb) => {
                let values = parse_numbers("bb", bb)?;
                match values.as_slice() {
                    [x0, y0, x1, y1] => (x1 - x0, y1 - y0),
                    _ => return Err(malformed("bb", bb)),
                }
            }
            None => (0.0, 0.0),
        };

        let mut nodes = HashMap::new();
        for object in raw.objects {
            // Subgraph objects carry no position
            let Some(pos) = object.pos.as_deref() else {
                continue;
            };
            let center = parse_numbers("pos", pos.trim_end_matches('!'))?;
            let [cx, cy] = center.as_slice() else {
                return Err(malformed("pos", pos));
            };
            let node_width = parse_inches("width", object.width.as_deref())?;
            let node_height = parse_inches("height", object.height.as_deref())?;

            nodes.insert(
                object.gvid,
                NodeGeometry {
                    x: cx - node_width / 2.0,
                    y: height - cy - node_height / 2.0,
                    width: node_width,
                    height: node_height,
                },
            );
        }

        Ok(Self {
            width,
            height,
            nodes,
        })
    }

    /// Geometry of the node declared `index`-th in the DOT source. Graphviz
    /// echoes names with their DOT escapes, so lookups go by `_gvid`.
    pub fn node(&self, index: usize) -> Option<&NodeGeometry> {
        self.nodes.get(&index)
    }

    pub fn insert(&mut self, index: usize, geometry: NodeGeometry) {
        self.nodes.insert(index, geometry);
    }
}

impl DrawioConverter {
    pub fn new(graphviz: Graphviz) -> Self {
        Self { graphviz }
    }
}

impl DiagramConverter for DrawioConverter {
    fn convert(&self, graph: &WorkflowGraph) -> Result<DiagramDocument, ConversionError> {
        let dot = to_dot(graph);
        let output = self.graphviz.run(&dot, "json", None)?;
        let layout = GraphLayout::from_json(&String::from_utf8_lossy(&output))?;
        debug!(
            "Graphviz layout for '{}' is {}x{} points",
            graph.name(),
            layout.width,
            layout.height
        );

        build_document(graph, &layout)
    }
}

/// Assemble the mxGraph XML for `graph` using positions from `layout`.
pub fn build_document(
    graph: &WorkflowGraph,
    layout: &GraphLayout,
) -> Result<DiagramDocument, ConversionError> {
    let page_width = format_coord(layout.width.ceil());
    let page_height = format_coord(layout.height.ceil());
    let modified = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let agent = format!("argoviz/{}", crate::VERSION);
    let diagram_id = uuid::Uuid::new_v4().to_string();

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Start(BytesStart::new("mxfile").with_attributes([
        ("host", "argoviz"),
        ("modified", modified.as_str()),
        ("agent", agent.as_str()),
        ("type", "device"),
    ])))?;
    writer.write_event(Event::Start(
        BytesStart::new("diagram")
            .with_attributes([("id", diagram_id.as_str()), ("name", graph.name())]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("mxGraphModel").with_attributes([
        ("dx", page_width.as_str()),
        ("dy", page_height.as_str()),
        ("grid", "1"),
        ("gridSize", "10"),
        ("guides", "1"),
        ("tooltips", "1"),
        ("connect", "1"),
        ("arrows", "1"),
        ("fold", "1"),
        ("page", "1"),
        ("pageScale", "1"),
        ("pageWidth", page_width.as_str()),
        ("pageHeight", page_height.as_str()),
        ("math", "0"),
        ("shadow", "0"),
    ])))?;
    writer.write_event(Event::Start(BytesStart::new("root")))?;
    writer.write_event(Event::Empty(
        BytesStart::new("mxCell").with_attributes([("id", "0")]),
    ))?;
    writer.write_event(Event::Empty(
        BytesStart::new("mxCell").with_attributes([("id", "1"), ("parent", "0")]),
    ))?;

    let mut cell_ids = HashMap::new();
    for (index, node) in graph.nodes().enumerate() {
        let geometry = layout
            .node(index)
            .ok_or_else(|| ConversionError::MissingPosition {
                node: node.name.clone(),
            })?;
        let id = format!("node-{}", index);
        let style = node_style(node.style.as_ref());

        writer.write_event(Event::Start(BytesStart::new("mxCell").with_attributes([
            ("id", id.as_str()),
            ("value", node.name.as_str()),
            ("style", style.as_str()),
            ("vertex", "1"),
            ("parent", "1"),
        ])))?;
        writer.write_event(Event::Empty(BytesStart::new("mxGeometry").with_attributes([
            ("x", format_coord(geometry.x).as_str()),
            ("y", format_coord(geometry.y).as_str()),
            ("width", format_coord(geometry.width).as_str()),
            ("height", format_coord(geometry.height).as_str()),
            ("as", "geometry"),
        ])))?;
        writer.write_event(Event::End(BytesEnd::new("mxCell")))?;

        cell_ids.insert(node.name.as_str(), id);
    }

    for (index, (from, to)) in graph.edges().into_iter().enumerate() {
        let id = format!("edge-{}", index);
        writer.write_event(Event::Start(BytesStart::new("mxCell").with_attributes([
            ("id", id.as_str()),
            ("style", EDGE_STYLE),
            ("edge", "1"),
            ("parent", "1"),
            ("source", cell_ids[from].as_str()),
            ("target", cell_ids[to].as_str()),
        ])))?;
        writer.write_event(Event::Empty(
            BytesStart::new("mxGeometry").with_attributes([("relative", "1"), ("as", "geometry")]),
        ))?;
        writer.write_event(Event::End(BytesEnd::new("mxCell")))?;
    }

    for element in ["root", "mxGraphModel", "diagram", "mxfile"] {
        writer.write_event(Event::End(BytesEnd::new(element)))?;
    }

    let mut content = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    content.push('\n');

    Ok(DiagramDocument {
        name: graph.name().to_string(),
        content,
    })
}

fn node_style(style: Option<&NodeStyle>) -> String {
    match style {
        Some(style) if style.style.split(',').any(|s| s.trim() == "filled") => {
            format!("{}fillColor={};", NODE_STYLE, drawio_color(&style.fill_color))
        }
        _ => format!("{}fillColor=none;", NODE_STYLE),
    }
}

/// Map a Graphviz color to the hex form draw.io expects
pub fn drawio_color(color: &str) -> String {
    if color.starts_with('#') {
        return color.to_uppercase();
    }

    let hex = match color.to_lowercase().as_str() {
        "lightblue" => "#ADD8E6",
        "lightgreen" => "#90EE90",
        "lightgray" | "lightgrey" => "#D3D3D3",
        "lightcoral" => "#F08080",
        "lightyellow" => "#FFFFE0",
        "white" => "#FFFFFF",
        "black" => "#000000",
        "red" => "#FF0000",
        "green" => "#00FF00",
        "blue" => "#0000FF",
        "yellow" => "#FFFF00",
        "orange" => "#FFA500",
        "pink" => "#FFC0CB",
        "gold" => "#FFD700",
        _ => return color.to_string(),
    };
    hex.to_string()
}

fn format_coord(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}", rounded)
}

fn parse_numbers(attribute: &str, value: &str) -> Result<Vec<f64>, ConversionError> {
    value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| malformed(attribute, value))
}

fn parse_inches(attribute: &str, value: Option<&str>) -> Result<f64, ConversionError> {
    let value = value.ok_or_else(|| malformed(attribute, "<missing>"))?;
    let inches: f64 = value.trim().parse().map_err(|_| malformed(attribute, value))?;
    Ok(inches * 72.0)
}

fn malformed(attribute: &str, value: &str) -> ConversionError {
    ConversionError::MalformedAttribute {
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
}
