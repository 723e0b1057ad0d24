use serde::{Deserialize, Serialize};

/// A position in a floor's coordinate space (same units as the floor image).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Anything with a 2D position on a floor.
pub trait Positioned {
    fn position(&self) -> Point;
}

impl Positioned for Point {
    fn position(&self) -> Point {
        *self
    }
}

/// Calculate the Euclidean distance between two positions.
pub fn distance(a: &impl Positioned, b: &impl Positioned) -> f64 {
    distance_squared(a, b).sqrt()
}

/// Squared Euclidean distance. Preserves ordering, so callers that only rank
/// candidates can skip the square root.
pub fn distance_squared(a: &impl Positioned, b: &impl Positioned) -> f64 {
    let a = a.position();
    let b = b.position();
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(distance(&a, &b), 5.0);
        assert_eq!(distance_squared(&a, &b), 25.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(-2.5, 7.0);
        let b = Point::new(10.0, -1.25);
        assert_eq!(distance(&a, &b), distance(&b, &a));
    }
}
