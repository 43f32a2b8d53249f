//! Landmark geometry helpers.

use crate::landmarks::types::Point3D;

/// Euclidean distance over x, y and z.
pub fn distance3(a: Point3D, b: Point3D) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Euclidean distance in the view plane, ignoring depth.
pub fn distance2(a: Point3D, b: Point3D) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// A finger counts as extended when its tip sits clearly further from the
/// palm than its base knuckle does.
pub fn is_finger_straight(tip: Point3D, mcp: Point3D, palm: Point3D, ratio: f64) -> bool {
    distance2(tip, palm) > distance2(mcp, palm) * ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance3_includes_depth() {
        let a = Point3D::new(0.0, 0.0, 0.0);
        let b = Point3D::new(0.3, 0.4, 1.2);
        assert!((distance3(a, b) - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_distance2_ignores_depth() {
        let a = Point3D::new(0.0, 0.0, 5.0);
        let b = Point3D::new(0.3, 0.4, -5.0);
        assert!((distance2(a, b) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_straightness_ratio() {
        let palm = Point3D::new(0.5, 0.9, 0.0);
        let mcp = Point3D::new(0.5, 0.7, 0.0);

        // Tip 0.4 from palm vs knuckle 0.2: extended
        assert!(is_finger_straight(Point3D::new(0.5, 0.5, 0.0), mcp, palm, 1.2));
        // Tip 0.22 from palm, under 0.24: curled
        assert!(!is_finger_straight(Point3D::new(0.5, 0.68, 0.0), mcp, palm, 1.2));
    }

    #[test]
    fn test_straightness_ignores_depth() {
        let palm = Point3D::new(0.5, 0.9, 0.0);
        let mcp = Point3D::new(0.5, 0.7, 0.0);
        let curled_but_deep = Point3D::new(0.5, 0.75, 3.0);
        assert!(!is_finger_straight(curled_but_deep, mcp, palm, 1.2));
    }
}
