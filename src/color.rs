use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Categorical palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
///
/// `hue_offset` (degrees) rotates the whole palette so that different chart
/// sections get different colour families.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = hue_offset + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Bar colour of the SME-type distribution chart.
pub const SKY_BLUE: Color32 = Color32::from_rgb(135, 206, 235);

// ---------------------------------------------------------------------------
// Diverging colour scale (heatmap)
// ---------------------------------------------------------------------------

const COOL: (f32, f32, f32) = (0.23, 0.30, 0.75);
const NEUTRAL: (f32, f32, f32) = (0.87, 0.87, 0.87);
const WARM: (f32, f32, f32) = (0.71, 0.02, 0.15);

/// Map a correlation coefficient in [-1, 1] to a blue–white–red scale
/// centered at zero. Non-finite input gets the neutral colour.
pub fn diverging_color(r: f64) -> Color32 {
    if !r.is_finite() {
        return to_color32(NEUTRAL);
    }
    let r = r.clamp(-1.0, 1.0) as f32;
    let (from, t) = if r < 0.0 { (COOL, 1.0 + r) } else { (WARM, 1.0 - r) };
    let a = LinSrgb::new(from.0, from.1, from.2);
    let b = LinSrgb::new(NEUTRAL.0, NEUTRAL.1, NEUTRAL.2);
    let mixed = a.mix(b, t);
    to_color32((mixed.red, mixed.green, mixed.blue))
}

fn to_color32(linear: (f32, f32, f32)) -> Color32 {
    let srgb: Srgb = Srgb::from_linear(LinSrgb::new(linear.0, linear.1, linear.2));
    Color32::from_rgb(
        (srgb.red * 255.0) as u8,
        (srgb.green * 255.0) as u8,
        (srgb.blue * 255.0) as u8,
    )
}

/// Annotation colour that stays readable on a given cell colour.
pub fn annotation_color(cell: Color32) -> Color32 {
    // Perceived luminance, cheap integer approximation.
    let lum = 2 * cell.r() as u32 + 7 * cell.g() as u32 + cell.b() as u32;
    if lum > 5 * 255 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        let palette = generate_palette(5, 0.0);
        assert_eq!(palette.len(), 5);
        for i in 0..palette.len() {
            for j in (i + 1)..palette.len() {
                assert_ne!(palette[i], palette[j]);
            }
        }
        assert!(generate_palette(0, 0.0).is_empty());
    }

    #[test]
    fn diverging_scale_separates_signs() {
        let negative = diverging_color(-1.0);
        let positive = diverging_color(1.0);
        assert!(negative.b() > negative.r());
        assert!(positive.r() > positive.b());
        // NaN falls back to the neutral gray.
        let nan = diverging_color(f64::NAN);
        assert_eq!(nan.r(), nan.g());
        assert_eq!(nan.g(), nan.b());
    }
}
