use rand::Rng;

/// `count` HSL colors spread evenly around the hue wheel, with a little random
/// variation in saturation (70-90%) and lightness (45-55%).
pub fn generate_color_palette<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<String> {
    let mut colors = Vec::with_capacity(count);

    for i in 0..count {
        let hue = (i as f64 * 360.0 / count as f64) % 360.0;
        let saturation = 70.0 + rng.gen::<f64>() * 20.0;
        let lightness = 45.0 + rng.gen::<f64>() * 10.0;

        colors.push(format!("hsl({}, {}%, {}%)", hue, saturation, lightness));
    }

    colors
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn parse_hsl(color: &str) -> (f64, f64, f64) {
        let inner = color.strip_prefix("hsl(").unwrap().strip_suffix(")").unwrap();
        let parts : Vec<f64> = inner.split(", ")
            .map(|p| p.trim_end_matches('%').parse::<f64>().unwrap())
            .collect();
        (parts[0], parts[1], parts[2])
    }

    #[test]
    fn empty_palette() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(generate_color_palette(0, &mut rng).is_empty());
    }

    #[test]
    fn hues_are_evenly_spaced() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors = generate_color_palette(4, &mut rng);

        let hues : Vec<f64> = colors.iter().map(|c| parse_hsl(c).0).collect();
        assert_eq!(hues, vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn saturation_and_lightness_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for color in generate_color_palette(50, &mut rng) {
            let (_, saturation, lightness) = parse_hsl(&color);
            assert!((70.0..90.0).contains(&saturation), "{}", color);
            assert!((45.0..55.0).contains(&lightness), "{}", color);
        }
    }
}
