//! Mirrors a [`Scene`] into absolutely positioned `<div>`s inside a container.
//!
//! Node `i` of the scene always maps to child `i`, so a frame only touches
//! styles. Children are added or removed when the node count changes. A node
//! with [`parts`](Node::parts) gets one empty `<div>` per part, classed by
//! the part role, for the page stylesheet to draw.

use folio_core::{Node, Scene, Shape};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, HtmlElement};

pub(crate) fn px(v: f64) -> String {
    format!("{v}px")
}

pub(crate) fn rotate(radians: f64) -> String {
    format!("rotate({radians}rad)")
}

fn as_html(element: web_sys::Element, what: &str) -> Result<HtmlElement, JsValue> {
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("{what} is not an HTML element")))
}

pub struct DomView {
    document: Document,
    container: HtmlElement,
    children: Vec<HtmlElement>,
}

impl DomView {
    /// Looks up the container; a missing id is an error.
    pub fn attach(document: Document, container_id: &str) -> Result<Self, JsValue> {
        let element = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {container_id:?}")))?;
        let container = as_html(element, container_id)?;
        Ok(Self {
            document,
            container,
            children: Vec::new(),
        })
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    pub fn render(&mut self, scene: &Scene) -> Result<(), JsValue> {
        while self.children.len() > scene.nodes.len() {
            if let Some(child) = self.children.pop() {
                child.remove();
            }
        }
        while self.children.len() < scene.nodes.len() {
            let child = as_html(self.document.create_element("div")?, "div")?;
            child.style().set_property("position", "absolute")?;
            self.container.append_child(&child)?;
            self.children.push(child);
        }

        let style = self.container.style();
        style.set_property("width", &px(scene.width))?;
        style.set_property("height", &px(scene.height))?;
        if let Some(background) = scene.background {
            style.set_property("background-color", &background.to_hex())?;
        }

        for (child, node) in self.children.iter().zip(&scene.nodes) {
            place(&self.document, child, node)?;
        }
        Ok(())
    }

    /// Removes every child this view created.
    pub fn clear(&mut self) {
        for child in self.children.drain(..) {
            child.remove();
        }
    }
}

fn set_size(style: &CssStyleDeclaration, node: &Node) -> Result<(), JsValue> {
    let size = node.extent();
    style.set_property("width", &px(size.x))?;
    style.set_property("height", &px(size.y))
}

pub(crate) fn font_weight(bold: bool) -> &'static str {
    if bold {
        "bold"
    } else {
        "normal"
    }
}

/// Whether `child`'s element children already carry `parts`, in order.
fn has_parts(child: &HtmlElement, parts: &[String]) -> bool {
    let existing = child.children();
    existing.length() as usize == parts.len()
        && parts.iter().enumerate().all(|(i, part)| {
            existing
                .item(i as u32)
                .is_some_and(|el| el.class_name() == *part)
        })
}

/// Rebuilds the part children only when the list changes.
fn sync_parts(document: &Document, child: &HtmlElement, parts: &[String]) -> Result<(), JsValue> {
    if has_parts(child, parts) {
        return Ok(());
    }
    if child.has_child_nodes() {
        child.set_text_content(None);
    }
    for part in parts {
        let el = document.create_element("div")?;
        el.set_class_name(part);
        child.append_child(&el)?;
    }
    Ok(())
}

fn place(document: &Document, child: &HtmlElement, node: &Node) -> Result<(), JsValue> {
    if child.class_name() != node.role {
        child.set_class_name(&node.role);
    }
    if !matches!(node.shape, Shape::Label { .. }) {
        sync_parts(document, child, &node.parts)?;
    }
    let style = child.style();
    let corner = node.top_left();
    style.set_property("left", &px(corner.x))?;
    style.set_property("top", &px(corner.y))?;

    let color_property = match &node.shape {
        Shape::Circle { .. } => {
            set_size(&style, node)?;
            style.set_property("border-radius", "50%")?;
            "background-color"
        }
        Shape::Sprite { .. } => {
            set_size(&style, node)?;
            style.set_property("transform", &rotate(node.rotation))?;
            "background-color"
        }
        Shape::Label {
            text,
            font_size,
            bold,
        } => {
            if child.text_content().as_deref() != Some(text.as_str()) {
                child.set_text_content(Some(text));
            }
            style.set_property("font-size", &px(*font_size))?;
            style.set_property("font-weight", font_weight(*bold))?;
            style.set_property("white-space", "nowrap")?;
            style.set_property("transform", "translate(-50%, -50%)")?;
            "color"
        }
    };
    if let Some(fill) = node.fill {
        style.set_property(color_property, &fill.to_css())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_lengths_and_rotation() {
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(px(-30.0), "-30px");
        assert_eq!(rotate(0.25), "rotate(0.25rad)");
    }

    #[test]
    fn font_weight_follows_flag() {
        assert_eq!(font_weight(true), "bold");
        assert_eq!(font_weight(false), "normal");
    }
}
