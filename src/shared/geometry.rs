//! Reine Geometrie-Funktionen: Catmull-Rom-Glättung und Großkreis-Distanz.
//!
//! Layer-neutral: kann von `core`, `app` und Benchmarks importiert werden ohne
//! Zirkel-Abhängigkeiten zu erzeugen. Koordinaten sind `DVec2` mit
//! x = Längengrad, y = Breitengrad (Grad).

use glam::DVec2;

/// Erdradius in Metern (Haversine).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Standard-Anzahl Stützpunkte pro Catmull-Rom-Segment.
pub const DEFAULT_SAMPLES_PER_SEGMENT: usize = 10;

/// Berechnet einen Punkt auf einem Catmull-Rom-Segment (u ∈ [0, 1]).
///
/// p0, p1, p2, p3: vier aufeinanderfolgende Kontrollpunkte.
/// Die Kurve verläuft von p1 nach p2.
pub fn catmull_rom_point(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, u: f64) -> DVec2 {
    let u2 = u * u;
    let u3 = u2 * u;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * u
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * u3)
}

/// Glättet eine Polyline mit dem Standard-Sampling (10 Punkte pro Segment).
pub fn smooth(points: &[DVec2]) -> Vec<DVec2> {
    smooth_with_samples(points, DEFAULT_SAMPLES_PER_SEGMENT)
}

/// Catmull-Rom-Interpolation durch alle `points`.
///
/// Unter 3 Punkten wird die Eingabe unverändert zurückgegeben. Randnachbarn
/// werden geklemmt (der Randpunkt wird wiederverwendet), es gibt keine
/// gespiegelten Phantom-Punkte. Pro Segment entstehen `samples_per_segment`
/// Punkte mit u ∈ [0, 1), danach folgt exakt der letzte Eingabepunkt.
pub fn smooth_with_samples(points: &[DVec2], samples_per_segment: usize) -> Vec<DVec2> {
    if points.len() < 3 || samples_per_segment == 0 {
        return points.to_vec();
    }

    let n = points.len();
    let last = n - 1;
    let mut result = Vec::with_capacity((n - 1) * samples_per_segment + 1);

    for seg in 0..last {
        let p0 = points[seg.saturating_sub(1)];
        let p1 = points[seg];
        let p2 = points[seg + 1];
        let p3 = points[(seg + 2).min(last)];

        for step in 0..samples_per_segment {
            let u = step as f64 / samples_per_segment as f64;
            result.push(catmull_rom_point(p0, p1, p2, p3, u));
        }
    }

    // Endpunkt immer exakt übernehmen
    result.push(points[last]);
    result
}

/// Haversine-Großkreisdistanz in Metern zwischen zwei (Länge, Breite)-Punkten.
pub fn geo_distance(a: DVec2, b: DVec2) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let h = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Länge einer Polyline in Metern (Summe der Haversine-Distanzen).
pub fn polyline_length_m(points: &[DVec2]) -> f64 {
    points.windows(2).map(|w| geo_distance(w[0], w[1])).sum()
}

/// Mittelpunkt eines Segments in Gradkoordinaten.
pub fn midpoint(a: DVec2, b: DVec2) -> DVec2 {
    (a + b) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn smooth_passes_short_input_through() {
        let empty: Vec<DVec2> = Vec::new();
        assert_eq!(smooth(&empty), empty);

        let one = vec![DVec2::new(1.0, 2.0)];
        assert_eq!(smooth(&one), one);

        let two = vec![DVec2::new(0.0, 0.0), DVec2::new(3.0, 4.0)];
        assert_eq!(smooth(&two), two);
    }

    #[test]
    fn smooth_keeps_exact_endpoints() {
        let points = vec![
            DVec2::new(-74.0061, 40.7128),
            DVec2::new(-73.9901, 40.7301),
            DVec2::new(-73.9712, 40.7209),
            DVec2::new(-73.9655, 40.7411),
        ];
        let result = smooth(&points);

        assert_eq!(result[0], points[0]);
        assert_eq!(*result.last().expect("Punkte erwartet"), points[3]);
    }

    #[test]
    fn smooth_emits_ten_samples_per_segment() {
        let points = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(2.0, 0.0),
        ];
        let result = smooth(&points);

        // (3 - 1) * 10 + 1
        assert_eq!(result.len(), 21);
        // Sample u=0 des zweiten Segments trifft den mittleren Kontrollpunkt
        assert_relative_eq!(result[10].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(result[10].y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn smooth_collinear_input_stays_on_line() {
        let points = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(3.0, 0.0),
        ];
        for p in smooth(&points) {
            assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn geo_distance_one_degree_latitude() {
        let d = geo_distance(DVec2::new(0.0, 0.0), DVec2::new(0.0, 1.0));
        // 2πR / 360
        assert_relative_eq!(d, 111_194.93, epsilon = 1.0);
    }

    #[test]
    fn geo_distance_is_symmetric_and_zero_on_identity() {
        let a = DVec2::new(-74.006, 40.7128);
        let b = DVec2::new(-73.935, 40.730);
        assert_relative_eq!(geo_distance(a, b), geo_distance(b, a), epsilon = 1e-9);
        assert_eq!(geo_distance(a, a), 0.0);
    }

    #[test]
    fn polyline_length_sums_segments() {
        let pts = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(0.0, 2.0),
        ];
        assert_relative_eq!(
            polyline_length_m(&pts),
            2.0 * geo_distance(pts[0], pts[1]),
            epsilon = 1e-6
        );
    }
}
