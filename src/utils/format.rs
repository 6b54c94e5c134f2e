/// Countdown line for the final hour before a prayer
pub fn countdown_label(remaining_minutes: i32) -> String {
    if remaining_minutes == 1 {
        "In 1 minute".to_string()
    } else {
        format!("In {} minutes", remaining_minutes)
    }
}

/// Format a coordinate pair as "31.55°N, 74.34°E"
pub fn coord_label(latitude: f64, longitude: f64) -> String {
    let ns = if latitude >= 0.0 { 'N' } else { 'S' };
    let ew = if longitude >= 0.0 { 'E' } else { 'W' };
    format!("{:.2}°{}, {:.2}°{}", latitude.abs(), ns, longitude.abs(), ew)
}

/// Pad or truncate a label to a fixed display width, unicode-aware
pub fn fit_width(s: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut out = String::new();
    let mut used = 0usize;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    while used < width {
        out.push(' ');
        used += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_label_singular() {
        assert_eq!(countdown_label(1), "In 1 minute");
        assert_eq!(countdown_label(2), "In 2 minutes");
        assert_eq!(countdown_label(59), "In 59 minutes");
    }

    #[test]
    fn test_coord_label_hemispheres() {
        assert_eq!(coord_label(31.5497, 74.3436), "31.55°N, 74.34°E");
        assert_eq!(coord_label(-33.8688, -70.6693), "33.87°S, 70.67°W");
    }

    #[test]
    fn test_fit_width_pads_and_truncates() {
        assert_eq!(fit_width("Fajr", 8), "Fajr    ");
        assert_eq!(fit_width("Casablanca", 6), "Casabl");
    }
}
