//! Writing scenes to disk.
//!
//! Feature-gated behind `png` (default on) so the WASM build can depend on
//! this crate without the `image` crate. The conversions themselves live in
//! [`crate::pixel`] and [`crate::svg`].

use folio_core::{EngineError, Scene};
use std::path::Path;

use crate::pixel::scene_to_rgba;
use crate::svg::scene_to_svg;

/// Rasterizes the scene and saves it as a PNG.
pub fn write_png(scene: &Scene, path: &Path) -> Result<(), EngineError> {
    let raster = scene_to_rgba(scene)?;
    let img = image::RgbaImage::from_raw(raster.width, raster.height, raster.data)
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}

pub fn write_svg(scene: &Scene, path: &Path) -> Result<(), EngineError> {
    std::fs::write(path, scene_to_svg(scene)).map_err(|e| EngineError::Io(e.to_string()))
}

/// Picks the writer from the file extension (`.png` or `.svg`).
pub fn write_scene(scene: &Scene, path: &Path) -> Result<(), EngineError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => write_png(scene, path),
        Some(ext) if ext.eq_ignore_ascii_case("svg") => write_svg(scene, path),
        _ => Err(EngineError::Io(format!(
            "unsupported output extension: {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Engine;
    use folio_particles::{ParticleArt, ParticleParams};

    fn scene() -> Scene {
        ParticleArt::new(120.0, 3, ParticleParams::default())
            .unwrap()
            .scene()
    }

    #[test]
    fn png_has_scene_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("art.png");

        write_scene(&scene(), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 120);
        assert_eq!(img.height(), 400);
    }

    #[test]
    fn svg_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("art.SVG");
        let scene = scene();

        write_scene(&scene, &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), scene_to_svg(&scene));
    }

    #[test]
    fn unknown_extension_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_scene(&scene(), &dir.path().join("art.gif")).unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
