//! Per-frame drawable output of an engine.
//!
//! A [`Scene`] is a flat, ordered list of [`Node`]s drawn back to front.
//! Render targets (DOM view, SVG writer, rasterizer) consume it without
//! knowing which engine produced it.

use crate::color::{Color, Srgb};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Geometry of a node, centred on [`Node::center`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Circle { radius: f64 },
    /// An axis-aligned box before rotation.
    Sprite { width: f64, height: f64 },
    Label {
        text: String,
        font_size: f64,
        #[serde(default)]
        bold: bool,
    },
}

/// One drawable element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Visual role, used as the DOM class name (`rocket`, `gravity-well`, ...).
    pub role: String,
    pub center: DVec2,
    pub shape: Shape,
    /// Radians, clockwise in screen space.
    pub rotation: f64,
    /// `None` leaves styling to the host (CSS class).
    pub fill: Option<Color>,
    /// Roles of host-styled child elements (`rocket-body`, `rocket-nose`, ...),
    /// in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<String>,
}

impl Node {
    pub fn circle(role: &str, center: DVec2, radius: f64) -> Self {
        Self {
            role: role.to_string(),
            center,
            shape: Shape::Circle { radius },
            rotation: 0.0,
            fill: None,
            parts: Vec::new(),
        }
    }

    pub fn sprite(role: &str, center: DVec2, width: f64, height: f64, rotation: f64) -> Self {
        Self {
            role: role.to_string(),
            center,
            shape: Shape::Sprite { width, height },
            rotation,
            fill: None,
            parts: Vec::new(),
        }
    }

    pub fn label(role: &str, center: DVec2, text: &str, font_size: f64) -> Self {
        Self {
            role: role.to_string(),
            center,
            shape: Shape::Label {
                text: text.to_string(),
                font_size,
                bold: false,
            },
            rotation: 0.0,
            fill: None,
            parts: Vec::new(),
        }
    }

    pub fn with_fill(mut self, fill: impl Into<Color>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_parts(mut self, parts: &[&str]) -> Self {
        self.parts = parts.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Bold text; other shapes are unchanged.
    pub fn bold(mut self) -> Self {
        if let Shape::Label { bold, .. } = &mut self.shape {
            *bold = true;
        }
        self
    }

    /// Width and height of the unrotated bounding box. Labels report zero.
    pub fn extent(&self) -> DVec2 {
        match self.shape {
            Shape::Circle { radius } => DVec2::splat(radius * 2.0),
            Shape::Sprite { width, height } => DVec2::new(width, height),
            Shape::Label { .. } => DVec2::ZERO,
        }
    }

    /// Top-left corner of the unrotated bounding box (CSS `left`/`top`).
    pub fn top_left(&self) -> DVec2 {
        self.center - self.extent() * 0.5
    }
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Option<Srgb>,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: None,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Nodes with the given role, in draw order.
    pub fn with_role<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| n.role == role)
    }
}
