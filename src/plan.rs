//! House plans: chains of wall legs laid out one after another.

use std::ops::Range;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One wall of a course, described by where it heads from the current point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leg {
    /// Keep `z`, run to this `x`.
    ToX(f32),
    /// Keep `x`, run to this `z`.
    ToZ(f32),
    To(Vec2),
}

impl Leg {
    pub fn target(self, at: Vec2) -> Vec2 {
        match self {
            Leg::ToX(x) => Vec2::new(x, at.y),
            Leg::ToZ(z) => Vec2::new(at.x, z),
            Leg::To(p) => p,
        }
    }
}

/// A connected run of walls sharing the same rows.
///
/// Each leg starts where the bricks of the previous one actually ended, which
/// is generally short of the previous leg's target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallCourse {
    pub start: Vec2,
    pub rows: Range<u32>,
    #[serde(default)]
    pub cap_start: bool,
    #[serde(default)]
    pub cap_finish: bool,
    #[serde(default)]
    pub extend_mortar: bool,
    pub legs: Vec<Leg>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePlan {
    pub courses: Vec<WallCourse>,
}

impl HousePlan {
    /// The default house: a U-shaped main building with a doorway left open
    /// in its top two rows, and a lower annex behind it.
    pub fn standard(rows: u32) -> Self {
        use Leg::*;

        let main_legs = [ToZ(8.0), ToX(-8.0), ToZ(-8.0), ToX(14.0), ToZ(8.0)];
        let main = |rows: Range<u32>, last: Leg| WallCourse {
            start: Vec2::new(6.0, -2.0),
            rows,
            cap_start: true,
            cap_finish: false,
            extend_mortar: false,
            legs: main_legs.iter().copied().chain([last]).collect(),
        };

        let upper = rows.saturating_sub(2);
        let lower = WallCourse {
            cap_finish: true,
            extend_mortar: true,
            ..main(0..upper, ToX(10.0))
        };
        let top = main(upper..rows, ToX(0.0));
        let annex = WallCourse {
            start: Vec2::new(22.0, -14.0),
            rows: 0..rows.saturating_sub(5),
            cap_start: false,
            cap_finish: false,
            extend_mortar: false,
            legs: vec![ToZ(14.0), ToX(-14.0), ToZ(-15.0), ToX(22.0)],
        };

        Self {
            courses: vec![lower, top, annex],
        }
    }
}
