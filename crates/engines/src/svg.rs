//! SVG serialization of a [`Scene`], and the small markup helpers shared with
//! the bar chart.
//!
//! Nodes without a fill keep their role as the `class` attribute so a page
//! stylesheet can style the snapshot the same way it styles the live DOM.

use folio_core::{Node, Scene, Shape};
use std::fmt::Write;

/// Escapes text for use in element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a coordinate without trailing noise (`12` rather than `12.000`).
pub fn num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

pub(crate) fn open_svg(out: &mut String, width: f64, height: f64) {
    let (w, h) = (num(width), num(height));
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
}

fn paint(node: &Node) -> String {
    match node.fill {
        Some(fill) => format!(r#"fill="{}""#, escape(&fill.to_css())),
        None => format!(r#"class="{}""#, escape(&node.role)),
    }
}

fn write_node(out: &mut String, node: &Node) {
    let (cx, cy) = (num(node.center.x), num(node.center.y));
    let paint = paint(node);
    match &node.shape {
        Shape::Circle { radius } => {
            let _ = write!(out, r#"<circle cx="{cx}" cy="{cy}" r="{}" {paint}/>"#, num(*radius));
        }
        Shape::Sprite { width, height } => {
            let corner = node.top_left();
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" transform="rotate({} {cx} {cy})" {paint}/>"#,
                num(corner.x),
                num(corner.y),
                num(*width),
                num(*height),
                num(node.rotation.to_degrees()),
            );
        }
        Shape::Label {
            text,
            font_size,
            bold,
        } => {
            let weight = if *bold { r#" font-weight="bold""# } else { "" };
            let _ = write!(
                out,
                r#"<text x="{cx}" y="{cy}" font-size="{}"{weight} text-anchor="middle" dominant-baseline="middle" {paint}>{}</text>"#,
                num(*font_size),
                escape(text),
            );
        }
    }
}

/// Serializes the scene as a standalone SVG document.
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    open_svg(&mut out, scene.width, scene.height);
    if let Some(bg) = scene.background {
        let _ = write!(
            out,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            bg.to_hex()
        );
    }
    for node in &scene.nodes {
        write_node(&mut out, node);
    }
    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Srgb;
    use glam::DVec2;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn num_trims_integers_and_rounds_noise() {
        assert_eq!(num(40.0), "40");
        assert_eq!(num(-50.0), "-50");
        assert_eq!(num(12.3456), "12.346");
        assert_eq!(num(0.1 + 0.2), "0.3");
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape(r#"a<b & "c">"#), "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    #[test]
    fn empty_scene_is_just_the_root() {
        let svg = scene_to_svg(&Scene::new(100.0, 50.0));
        assert_eq!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50"></svg>"#
        );
    }

    #[test]
    fn unfilled_nodes_keep_their_role_as_class() {
        let mut scene = Scene::new(200.0, 200.0);
        scene.push(Node::circle("gravity-well", DVec2::new(50.0, 60.0), 40.0));
        let svg = scene_to_svg(&scene);
        assert!(svg.contains(r#"<circle cx="50" cy="60" r="40" class="gravity-well"/>"#), "{svg}");
    }

    #[test]
    fn sprite_rotates_about_its_center() {
        let mut scene = Scene::new(200.0, 200.0);
        scene.push(Node::sprite("rocket", DVec2::new(100.0, 100.0), 60.0, 20.0, FRAC_PI_2));
        let svg = scene_to_svg(&scene);
        assert!(
            svg.contains(r#"<rect x="70" y="90" width="60" height="20" transform="rotate(90 100 100)" class="rocket"/>"#),
            "{svg}"
        );
    }

    #[test]
    fn background_and_fill_are_emitted() {
        let mut scene = Scene::new(10.0, 10.0);
        scene.background = Some(Srgb::from_hex("#667eea").unwrap());
        scene.push(
            Node::label("title", DVec2::new(5.0, 5.0), "<hi>", 12.0)
                .with_fill(Srgb::from_hex("#ffffff").unwrap()),
        );
        let svg = scene_to_svg(&scene);
        assert!(svg.contains(r##"fill="#667eea""##));
        assert!(svg.contains(r##"fill="#ffffff">&lt;hi&gt;</text>"##), "{svg}");
        assert!(!svg.contains("font-weight"));
    }

    #[test]
    fn bold_label_sets_font_weight() {
        let mut scene = Scene::new(10.0, 10.0);
        scene.push(Node::label("title", DVec2::new(5.0, 5.0), "hi", 16.0).bold());
        let svg = scene_to_svg(&scene);
        assert!(
            svg.contains(r#"<text x="5" y="5" font-size="16" font-weight="bold" text-anchor="middle""#),
            "{svg}"
        );
    }
}
