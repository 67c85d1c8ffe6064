//! CPU rasterizing of a [`Scene`] into an RGBA8 buffer.
//!
//! Always available (no feature gate) so the PNG snapshot and any other
//! pixel consumer share one conversion. Labels are not rasterized.

use folio_core::{Color, EngineError, Node, Scene, Shape, Srgb};
use glam::DVec2;

/// Background used when the scene leaves it to the host.
const DEFAULT_BACKGROUND: Srgb = Srgb {
    r: 0.043,
    g: 0.051,
    b: 0.090,
};

/// Fill for host-styled nodes, standing in for the page's CSS.
fn role_color(role: &str) -> [f64; 4] {
    match role {
        "gravity-well" => [0.35, 0.38, 0.62, 0.55],
        "black-hole-glow" => [0.45, 0.20, 0.70, 0.25],
        "black-hole-accretion" => [0.95, 0.55, 0.20, 0.60],
        "black-hole" => [0.0, 0.0, 0.0, 1.0],
        "rocket" => [0.90, 0.90, 0.95, 1.0],
        _ => [1.0, 1.0, 1.0, 1.0],
    }
}

/// An RGBA8 image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Raster {
    fn new(width: u32, height: u32, background: Srgb) -> Self {
        let [r, g, b] = background.to_bytes();
        let data = [r, g, b, 255u8]
            .into_iter()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// RGBA at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    fn blend(&mut self, x: u32, y: u32, rgba: [f64; 4]) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let a = rgba[3].clamp(0.0, 1.0);
        for c in 0..3 {
            let dst = self.data[i + c] as f64 / 255.0;
            let out = rgba[c].clamp(0.0, 1.0) * a + dst * (1.0 - a);
            self.data[i + c] = (out * 255.0).round() as u8;
        }
    }
}

fn pixel_dimension(v: f64) -> Result<u32, EngineError> {
    let rounded = v.round();
    if !(rounded >= 1.0 && rounded <= u32::MAX as f64) {
        return Err(EngineError::InvalidDimensions);
    }
    Ok(rounded as u32)
}

/// Draws every non-label node back to front over the scene background.
pub fn scene_to_rgba(scene: &Scene) -> Result<Raster, EngineError> {
    let width = pixel_dimension(scene.width)?;
    let height = pixel_dimension(scene.height)?;
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(EngineError::InvalidDimensions)?;
    let mut raster = Raster::new(width, height, scene.background.unwrap_or(DEFAULT_BACKGROUND));
    for node in &scene.nodes {
        draw_node(&mut raster, node);
    }
    Ok(raster)
}

fn draw_node(raster: &mut Raster, node: &Node) {
    let rgba = node
        .fill
        .map(Color::to_rgba)
        .unwrap_or_else(|| role_color(&node.role));
    let (reach, inside): (f64, Box<dyn Fn(DVec2) -> bool>) = match node.shape {
        Shape::Circle { radius } => (radius, Box::new(move |d: DVec2| d.length_squared() <= radius * radius)),
        Shape::Sprite { width, height } => {
            let unrotate = DVec2::from_angle(-node.rotation);
            let half = DVec2::new(width, height) * 0.5;
            (
                half.length(),
                Box::new(move |d: DVec2| {
                    let local = unrotate.rotate(d);
                    local.x.abs() <= half.x && local.y.abs() <= half.y
                }),
            )
        }
        Shape::Label { .. } => return,
    };
    if !(reach.is_finite() && node.center.is_finite()) {
        return;
    }

    let x0 = (node.center.x - reach).floor().max(0.0);
    let y0 = (node.center.y - reach).floor().max(0.0);
    let x1 = (node.center.x + reach).ceil().min(raster.width as f64 - 1.0);
    let y1 = (node.center.y + reach).ceil().min(raster.height as f64 - 1.0);
    if x0 > x1 || y0 > y1 {
        return;
    }
    for y in y0 as u32..=y1 as u32 {
        for x in x0 as u32..=x1 as u32 {
            let sample = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
            if inside(sample - node.center) {
                raster.blend(x, y, rgba);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Hsla;
    use std::f64::consts::FRAC_PI_2;

    fn blank(w: f64, h: f64) -> Scene {
        let mut s = Scene::new(w, h);
        s.background = Some(Srgb { r: 0.0, g: 0.0, b: 0.0 });
        s
    }

    #[test]
    fn buffer_has_four_bytes_per_pixel_and_opaque_alpha() {
        let r = scene_to_rgba(&blank(16.0, 8.0)).unwrap();
        assert_eq!(r.data.len(), 16 * 8 * 4);
        assert!(r.data.chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn zero_sized_scene_is_rejected() {
        assert!(matches!(
            scene_to_rgba(&blank(0.0, 10.0)),
            Err(EngineError::InvalidDimensions)
        ));
        assert!(scene_to_rgba(&blank(f64::NAN, 10.0)).is_err());
    }

    #[test]
    fn opaque_circle_covers_its_center_only() {
        let mut s = blank(40.0, 40.0);
        s.push(
            Node::circle("dot", DVec2::new(20.0, 20.0), 5.0)
                .with_fill(Srgb { r: 1.0, g: 0.0, b: 0.0 }),
        );
        let r = scene_to_rgba(&s).unwrap();
        assert_eq!(r.pixel(20, 20), Some([255, 0, 0, 255]));
        assert_eq!(r.pixel(2, 2), Some([0, 0, 0, 255]));
        assert_eq!(r.pixel(40, 0), None);
    }

    #[test]
    fn translucent_fill_blends_with_background() {
        let mut s = blank(10.0, 10.0);
        s.push(
            Node::circle("p", DVec2::new(5.0, 5.0), 4.0).with_fill(Hsla {
                h: 0.0,
                s: 0.0,
                l: 100.0,
                a: 0.5,
            }),
        );
        let r = scene_to_rgba(&s).unwrap();
        let px = r.pixel(5, 5).unwrap();
        assert!((126..=129).contains(&px[0]), "{px:?}");
    }

    #[test]
    fn rotated_sprite_covers_vertical_strip() {
        let mut s = blank(60.0, 60.0);
        s.push(
            Node::sprite("bar", DVec2::new(30.0, 30.0), 40.0, 4.0, FRAC_PI_2)
                .with_fill(Srgb { r: 1.0, g: 1.0, b: 1.0 }),
        );
        let r = scene_to_rgba(&s).unwrap();
        assert_eq!(r.pixel(30, 15).unwrap()[0], 255, "should reach up after rotation");
        assert_eq!(r.pixel(15, 30).unwrap()[0], 0, "should not reach sideways");
    }

    #[test]
    fn offscreen_nodes_are_clipped() {
        let mut s = blank(10.0, 10.0);
        s.push(Node::circle("gravity-well", DVec2::new(-100.0, -100.0), 20.0));
        s.push(Node::sprite("rocket", DVec2::new(500.0, 5.0), 60.0, 20.0, 0.0));
        let r = scene_to_rgba(&s).unwrap();
        assert!(r.data.chunks(4).all(|px| px[..3] == [0, 0, 0]));
    }

    #[test]
    fn labels_are_skipped() {
        let mut s = blank(10.0, 10.0);
        s.push(Node::label("title", DVec2::new(5.0, 5.0), "hi", 12.0));
        let r = scene_to_rgba(&s).unwrap();
        assert_eq!(r.pixel(5, 5), Some([0, 0, 0, 255]));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_placement_keeps_buffer_shape(
                cx in -200.0_f64..200.0,
                cy in -200.0_f64..200.0,
                radius in 0.0_f64..150.0,
                rotation in -10.0_f64..10.0,
            ) {
                let mut s = blank(64.0, 48.0);
                s.push(Node::circle("gravity-well", DVec2::new(cx, cy), radius));
                s.push(Node::sprite("rocket", DVec2::new(cy, cx), 60.0, 20.0, rotation));
                let r = scene_to_rgba(&s).unwrap();
                prop_assert_eq!(r.data.len(), 64 * 48 * 4);
                prop_assert!(r.data.chunks(4).all(|px| px[3] == 255));
            }
        }
    }
}
