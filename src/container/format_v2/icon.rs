//! RGB565 icon pixels.

use super::constants::{ICON_BYTES_PER_PIXEL, ICON_HEIGHT, ICON_SIZE, ICON_WIDTH};

/// A packed 16-bit pixel: 5 bits red, 6 bits green, 5 bits blue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// Pack channel values already reduced to 5/6/5 bits; extra bits are masked off
    pub const fn new(r5: u8, g6: u8, b5: u8) -> Self {
        Rgb565((((r5 & 0x1F) as u16) << 11) | (((g6 & 0x3F) as u16) << 5) | ((b5 & 0x1F) as u16))
    }

    /// Quantize a 24-bit colour
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Rgb565::new(r >> 3, g >> 2, b >> 3)
    }

    pub const fn red(self) -> u8 {
        ((self.0 >> 11) & 0x1F) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    /// Expand to 24-bit colour, replicating high bits into the low ones
    pub const fn to_rgb888(self) -> (u8, u8, u8) {
        let (r, g, b) = (self.red(), self.green(), self.blue());
        ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }

    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

/// Iterate over the pixels of an icon section, row-major
pub fn pixels(icon: &[u8]) -> impl Iterator<Item = Rgb565> + '_ {
    icon.chunks_exact(ICON_BYTES_PER_PIXEL)
        .map(|px| Rgb565(u16::from_le_bytes([px[0], px[1]])))
}

/// Pixel at (x, y), if inside a well-formed icon
pub fn pixel_at(icon: &[u8], x: usize, y: usize) -> Option<Rgb565> {
    if icon.len() != ICON_SIZE || x >= ICON_WIDTH || y >= ICON_HEIGHT {
        return None;
    }
    let at = (y * ICON_WIDTH + x) * ICON_BYTES_PER_PIXEL;
    Some(Rgb565(u16::from_le_bytes([icon[at], icon[at + 1]])))
}

/// Serialize pixels into icon section bytes
pub fn to_icon_bytes<I: IntoIterator<Item = Rgb565>>(pixels: I) -> Vec<u8> {
    pixels.into_iter().flat_map(Rgb565::to_le_bytes).collect()
}

/// Placeholder icon: red rises left to right, green top to bottom, blue along the diagonal
pub fn test_pattern() -> Vec<u8> {
    let mut icon = Vec::with_capacity(ICON_SIZE);
    for y in 0..ICON_HEIGHT {
        for x in 0..ICON_WIDTH {
            let r = (x * 31) / ICON_WIDTH;
            let g = (y * 63) / ICON_HEIGHT;
            let b = ((x + y) * 31) / (ICON_WIDTH + ICON_HEIGHT);
            icon.extend_from_slice(&Rgb565::new(r as u8, g as u8, b as u8).to_le_bytes());
        }
    }
    icon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565_packing() {
        let white = Rgb565::new(31, 63, 31);
        assert_eq!(white.0, 0xFFFF);
        assert_eq!(Rgb565::from_rgb888(255, 0, 0).0, 0xF800);
        assert_eq!(Rgb565::from_rgb888(0, 255, 0).0, 0x07E0);
        assert_eq!(Rgb565::from_rgb888(0, 0, 255).0, 0x001F);
        assert_eq!(white.to_rgb888(), (255, 255, 255));
        assert_eq!(Rgb565(0).to_rgb888(), (0, 0, 0));
    }

    #[test]
    fn test_test_pattern_shape() {
        let icon = test_pattern();
        assert_eq!(icon.len(), ICON_SIZE);
        assert_eq!(pixels(&icon).count(), ICON_WIDTH * ICON_HEIGHT);

        assert_eq!(pixel_at(&icon, 0, 0), Some(Rgb565(0)));
        let corner = pixel_at(&icon, ICON_WIDTH - 1, ICON_HEIGHT - 1).unwrap();
        assert_eq!(corner.red(), 30);
        assert_eq!(corner.green(), 62);
        assert_eq!(corner.blue(), 30);
        assert_eq!(pixel_at(&icon, ICON_WIDTH, 0), None);
    }

    #[test]
    fn test_to_icon_bytes_inverts_pixels() {
        let icon = test_pattern();
        assert_eq!(to_icon_bytes(pixels(&icon)), icon);
    }
}
