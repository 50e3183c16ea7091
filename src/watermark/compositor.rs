use super::Placement;
use image::{imageops, DynamicImage};

/// Layers overlays onto a base image.
pub trait Compositor {
    fn composite(
        &self,
        base: DynamicImage,
        placements: &[Placement<&DynamicImage>],
    ) -> DynamicImage;
}

/// Alpha-blends each placement with [`imageops::overlay`], clipping at the canvas edges.
#[derive(Debug, Default, Copy, Clone)]
pub struct ImageCompositor;

impl Compositor for ImageCompositor {
    fn composite(
        &self,
        base: DynamicImage,
        placements: &[Placement<&DynamicImage>],
    ) -> DynamicImage {
        let mut canvas = base.into_rgba8();
        for placement in placements {
            let overlay = placement.overlay.to_rgba8();
            imageops::overlay(&mut canvas, &overlay, placement.left, placement.top);
        }
        DynamicImage::ImageRgba8(canvas)
    }
}
