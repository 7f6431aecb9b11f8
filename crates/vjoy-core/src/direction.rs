//! Eight-way compass label derived from the drag angle.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;

/// Coarse direction of the handle relative to the anchor.
///
/// Screen coordinates: positive y points down, so an angle of `+π/2`
/// is [`Direction::South`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Handle at rest on the anchor.
    #[default]
    Center,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    North,
    NorthEast,
}

impl Direction {
    /// Sectors clockwise from east, matching `atan2` with y down.
    const SECTORS: [Direction; 8] = [
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
    ];

    /// Label for a drag of `magnitude` at `angle` (radians, atan2 convention).
    ///
    /// Each sector spans 45° centred on its compass point.
    pub fn from_polar(angle: f32, magnitude: f32) -> Self {
        if magnitude <= 0.0 || !angle.is_finite() {
            return Direction::Center;
        }
        let turns = angle.rem_euclid(2.0 * PI) / (PI / 4.0);
        let sector = (turns.round() as usize) % 8;
        Self::SECTORS[sector]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Center => "center",
            Direction::East => "east",
            Direction::SouthEast => "southeast",
            Direction::South => "south",
            Direction::SouthWest => "southwest",
            Direction::West => "west",
            Direction::NorthWest => "northwest",
            Direction::North => "north",
            Direction::NorthEast => "northeast",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn cardinal_points() {
        assert_eq!(Direction::from_polar(0.0, 10.0), Direction::East);
        assert_eq!(Direction::from_polar(FRAC_PI_2, 10.0), Direction::South);
        assert_eq!(Direction::from_polar(-FRAC_PI_2, 10.0), Direction::North);
        assert_eq!(Direction::from_polar(PI, 10.0), Direction::West);
        assert_eq!(Direction::from_polar(-PI, 10.0), Direction::West);
    }

    #[test]
    fn diagonals() {
        assert_eq!(Direction::from_polar(FRAC_PI_4, 1.0), Direction::SouthEast);
        assert_eq!(Direction::from_polar(-FRAC_PI_4, 1.0), Direction::NorthEast);
        assert_eq!(Direction::from_polar(3.0 * FRAC_PI_4, 1.0), Direction::SouthWest);
        assert_eq!(Direction::from_polar(-3.0 * FRAC_PI_4, 1.0), Direction::NorthWest);
    }

    #[test]
    fn sector_boundaries_round_to_nearest_point() {
        // 20° is still east, 25° is southeast.
        assert_eq!(Direction::from_polar(20f32.to_radians(), 1.0), Direction::East);
        assert_eq!(Direction::from_polar(25f32.to_radians(), 1.0), Direction::SouthEast);
        assert_eq!(Direction::from_polar(-20f32.to_radians(), 1.0), Direction::East);
    }

    #[test]
    fn zero_magnitude_is_center() {
        assert_eq!(Direction::from_polar(1.0, 0.0), Direction::Center);
        assert_eq!(Direction::Center.to_string(), "center");
    }
}
