use serde::{Deserialize, Serialize};

/// Field-magnitude scale chosen so the launch coil's strongest samples land
/// at the clamp: tenths of a millitesla map to ~1.
pub const MAGNITUDE_SCALE: f64 = 1e5;

/// Width of the hue band. 0.7 spans red (strong) through blue (weak)
/// without wrapping back into red.
pub const HUE_RANGE: f64 = 0.7;

const SATURATION: f64 = 1.0;
const LIGHTNESS: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Maps a field magnitude to a hue: zero field sits at the top of the hue
/// band (blue) and anything at or past the clamp threshold at hue 0 (red).
/// Monotonic non-increasing in the magnitude, continuous throughout.
pub fn magnitude_to_hsl(magnitude: f64) -> Hsl {
    Hsl {
        h: (1.0 - (magnitude * MAGNITUDE_SCALE).min(1.0)) * HUE_RANGE,
        s: SATURATION,
        l: LIGHTNESS,
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl Hsl {
    /// Standard hue-sector conversion to 8-bit RGB, matching what the
    /// renderer would get from a three.js `Color.setHSL` call.
    pub fn to_rgb(&self) -> Rgb {
        if self.s == 0.0 {
            let v = (self.l * 255.0).round() as u8;
            return Rgb { r: v, g: v, b: v };
        }
        let q = if self.l < 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let p = 2.0 * self.l - q;
        Rgb {
            r: (hue_to_channel(p, q, self.h + 1.0 / 3.0) * 255.0).round() as u8,
            g: (hue_to_channel(p, q, self.h) * 255.0).round() as u8,
            b: (hue_to_channel(p, q, self.h - 1.0 / 3.0) * 255.0).round() as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_magnitude_maps_to_top_of_hue_band() {
        let hsl = magnitude_to_hsl(0.0);

        assert_eq!(hsl.h, HUE_RANGE);
        assert_eq!(hsl.s, 1.0);
        assert_eq!(hsl.l, 0.5);
    }

    #[test]
    fn clamp_threshold_and_beyond_map_to_zero_hue() {
        assert_eq!(magnitude_to_hsl(1.0 / MAGNITUDE_SCALE).h, 0.0);
        assert_eq!(magnitude_to_hsl(1.0).h, 0.0);
    }

    #[test]
    fn hue_is_monotonic_nonincreasing_in_magnitude() {
        let mut last = f64::INFINITY;
        for i in 0..=100 {
            let magnitude = i as f64 * 2e-7;
            let h = magnitude_to_hsl(magnitude).h;
            assert!(h <= last, "hue increased at magnitude {magnitude}");
            last = h;
        }
    }

    #[test]
    fn hue_is_continuous_at_the_clamp() {
        let just_below = magnitude_to_hsl(1.0 / MAGNITUDE_SCALE - 1e-12).h;

        assert!(just_below < 1e-6);
    }

    #[test]
    fn primary_hues_convert_to_expected_rgb() {
        let red = Hsl { h: 0.0, s: 1.0, l: 0.5 }.to_rgb();
        assert_eq!(red, Rgb { r: 255, g: 0, b: 0 });

        let green = Hsl { h: 1.0 / 3.0, s: 1.0, l: 0.5 }.to_rgb();
        assert_eq!(green, Rgb { r: 0, g: 255, b: 0 });

        let blue = Hsl { h: 2.0 / 3.0, s: 1.0, l: 0.5 }.to_rgb();
        assert_eq!(blue, Rgb { r: 0, g: 0, b: 255 });
    }

    #[test]
    fn zero_saturation_is_grey() {
        let grey = Hsl { h: 0.3, s: 0.0, l: 0.5 }.to_rgb();

        assert_eq!(grey.r, grey.g);
        assert_eq!(grey.g, grey.b);
    }
}
