// The fog layer: one opacity byte per pixel of the active map image.
// 255 = hidden under fog, 0 = revealed.

use image::{GrayImage, Luma, imageops, imageops::FilterType};

pub const HIDDEN: u8 = u8::MAX;
pub const REVEALED: u8 = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FogLayer {
    mask: GrayImage,
}

impl FogLayer {
    /// A fully hidden mask of the given size.
    pub fn create(width: u32, height: u32) -> Self {
        Self { mask: GrayImage::from_pixel(width, height, Luma([HIDDEN])) }
    }

    pub fn width(&self) -> u32 {
        self.mask.width()
    }

    pub fn height(&self) -> u32 {
        self.mask.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.mask.dimensions()
    }

    /// Opacity at (x,y). Panics when out of bounds, like indexing.
    #[inline]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.mask.get_pixel(x, y)[0]
    }

    /// Raw row-major opacity bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.mask.as_raw()
    }

    pub fn is_fully(&self, value: u8) -> bool {
        self.mask.as_raw().iter().all(|&a| a == value)
    }

    /// Stamp a filled disc at (cx,cy): `reveal` clears the fog, otherwise restores it.
    /// Anything outside the mask is clipped.
    pub fn paint(&mut self, cx: f64, cy: f64, radius: u32, reveal: bool) {
        let value = if reveal { REVEALED } else { HIDDEN };
        let r = f64::from(radius);
        let r2 = r * r;
        let (w, h) = (i64::from(self.width()), i64::from(self.height()));

        // Bounding box of the disc, clipped to the mask
        let x0 = ((cx - r).floor() as i64).max(0);
        let x1 = ((cx + r).ceil() as i64).min(w - 1);
        let y0 = ((cy - r).floor() as i64).max(0);
        let y1 = ((cy + r).ceil() as i64).min(h - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }

        for y in y0..=y1 {
            let dy = y as f64 - cy;
            for x in x0..=x1 {
                let dx = x as f64 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.mask.put_pixel(x as u32, y as u32, Luma([value]));
                }
            }
        }
    }

    /// Resample to a new size, keeping the hidden/revealed pattern in proportion.
    /// Nearest-neighbour, so a uniform mask stays exactly uniform.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.dimensions() == (width, height) {
            return;
        }
        self.mask = imageops::resize(&self.mask, width, height, FilterType::Nearest);
    }

    /// Quarter turn clockwise, matching the base image rotation.
    pub fn rotate90(&mut self) {
        self.mask = imageops::rotate90(&self.mask);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revealed_count(fog: &FogLayer) -> usize {
        fog.as_raw().iter().filter(|&&a| a == REVEALED).count()
    }

    #[test]
    fn created_fully_hidden() {
        let fog = FogLayer::create(20, 10);
        assert_eq!(fog.dimensions(), (20, 10));
        assert!(fog.is_fully(HIDDEN));
    }

    #[test]
    fn reveal_disc_respects_radius() {
        let mut fog = FogLayer::create(100, 100);
        fog.paint(50.0, 50.0, 10, true);
        for y in 0..100u32 {
            for x in 0..100u32 {
                let d2 = (x as i64 - 50).pow(2) + (y as i64 - 50).pow(2);
                let expected = if d2 <= 100 { REVEALED } else { HIDDEN };
                assert_eq!(fog.alpha(x, y), expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn hide_restores_fog() {
        let mut fog = FogLayer::create(40, 40);
        fog.paint(20.0, 20.0, 8, true);
        fog.paint(20.0, 20.0, 8, false);
        assert!(fog.is_fully(HIDDEN));
    }

    #[test]
    fn repeated_reveal_is_idempotent() {
        let mut once = FogLayer::create(64, 48);
        once.paint(30.0, 20.0, 12, true);
        let mut twice = once.clone();
        twice.paint(30.0, 20.0, 12, true);
        assert_eq!(once, twice);
    }

    #[test]
    fn disc_near_edge_is_clipped() {
        let mut fog = FogLayer::create(30, 30);
        fog.paint(0.0, 0.0, 5, true);
        assert_eq!(fog.alpha(0, 0), REVEALED);
        assert_eq!(fog.alpha(29, 29), HIDDEN);
        assert!(revealed_count(&fog) > 0);
    }

    #[test]
    fn disc_fully_outside_changes_nothing() {
        let mut fog = FogLayer::create(30, 30);
        fog.paint(-100.0, 500.0, 10, true);
        assert!(fog.is_fully(HIDDEN));
    }

    #[test]
    fn zero_radius_touches_center_only() {
        let mut fog = FogLayer::create(5, 5);
        fog.paint(2.0, 2.0, 0, true);
        assert_eq!(revealed_count(&fog), 1);
        assert_eq!(fog.alpha(2, 2), REVEALED);
    }

    #[test]
    fn four_rotations_are_identity() {
        let mut fog = FogLayer::create(37, 21);
        fog.paint(5.0, 4.0, 3, true);
        fog.paint(30.0, 18.0, 6, true);
        let original = fog.clone();
        fog.rotate90();
        assert_eq!(fog.dimensions(), (21, 37));
        for _ in 0..3 {
            fog.rotate90();
        }
        assert_eq!(fog, original);
    }

    #[test]
    fn rotate_is_clockwise() {
        let mut fog = FogLayer::create(4, 2);
        fog.paint(0.0, 0.0, 0, true);
        fog.rotate90();
        // top-left goes to top-right
        assert_eq!(fog.alpha(1, 0), REVEALED);
    }

    #[test]
    fn uniform_masks_survive_resizing() {
        let mut hidden = FogLayer::create(200, 100);
        hidden.resize(50, 25);
        hidden.resize(333, 171);
        hidden.rotate90();
        hidden.resize(200, 100);
        assert!(hidden.is_fully(HIDDEN));

        let mut clear = FogLayer::create(200, 100);
        clear.paint(100.0, 50.0, 400, true);
        assert!(clear.is_fully(REVEALED));
        clear.resize(50, 25);
        clear.resize(250, 125);
        assert!(clear.is_fully(REVEALED));
    }

    #[test]
    fn resize_round_trip_keeps_topology() {
        let mut fog = FogLayer::create(200, 100);
        fog.paint(150.0, 50.0, 30, true);
        let before = revealed_count(&fog) as f64;
        fog.resize(100, 50);
        fog.resize(200, 100);
        let after = revealed_count(&fog) as f64;
        assert!((after - before).abs() / before < 0.1, "{before} vs {after}");
        // the disc stays on the right, the left stays fogged
        assert_eq!(fog.alpha(150, 50), REVEALED);
        assert_eq!(fog.alpha(20, 50), HIDDEN);
    }
}
