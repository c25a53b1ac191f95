//! Wall layout: turning wall segments into brick and mortar placements.
//!
//! A wall never touches vertex data. It only produces one transform per brick,
//! applied by the renderer to the shared brick mesh, and one transform per
//! mortar box.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{
    brick::BrickSize, mesh::Mesh, mesh_object::InstanceSet, plan::HousePlan, primitives,
    transform::Transform,
};

/// How each wall segment is laid out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallShape {
    /// Straight runs along each segment.
    #[default]
    Single,
    /// A closed circular course whose circumference follows the segment
    /// length.
    Circle,
    /// Same as [`WallShape::Single`].
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub size: BrickSize,
    /// Fraction by which mortar is shrunk inside the brick faces.
    pub inset: f32,
    pub shape: WallShape,
    pub mortar_color: Vec3,
}

/// One straight wall between two points on the ground plane.
///
/// Points are world `(x, z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    pub start: Vec2,
    pub end: Vec2,
    /// Square off the start of offset rows with a half brick.
    pub cap_start: bool,
    /// Square off the end of unshifted rows with a half brick.
    pub cap_finish: bool,
    pub start_row: u32,
    /// One past the last row.
    pub row_count: u32,
    /// Grow the mortar by one brick height, for walls that do not start at
    /// the ground.
    pub extend_mortar: bool,
}

impl WallSegment {
    pub fn new(start: Vec2, end: Vec2, rows: std::ops::Range<u32>) -> Self {
        Self {
            start,
            end,
            cap_start: false,
            cap_finish: false,
            start_row: rows.start,
            row_count: rows.end,
            extend_mortar: false,
        }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Heading about +Y that turns the +X axis towards `end`.
    pub fn angle(&self) -> f32 {
        let d = self.end - self.start;
        -d.y.atan2(d.x)
    }

    /// Whole bricks that fit along the segment.
    pub fn bricks_per_row(&self, pitch: f32) -> u32 {
        (self.length() / pitch) as u32
    }
}

/// Brick and mortar placements for a set of walls.
#[derive(Debug, Clone)]
pub struct WallLayout {
    pub params: LayoutParams,
    pub bricks: InstanceSet,
    pub mortar: InstanceSet,
    /// Replaces the mortar boxes when walls are laid out as circles.
    pub mortar_ring: Option<Mesh>,
    /// Tallest row count laid out since the last clear. The mortar ring spans
    /// this many rows.
    ring_rows: u32,
}

impl WallLayout {
    pub fn new(params: LayoutParams) -> Self {
        Self {
            params,
            bricks: InstanceSet::default(),
            mortar: InstanceSet::default(),
            mortar_ring: None,
            ring_rows: 0,
        }
    }

    pub fn clear(&mut self) {
        self.bricks.clear();
        self.mortar.clear();
        self.mortar_ring = None;
        self.ring_rows = 0;
    }

    /// Clears everything, then lays out every course of `plan`, chaining each
    /// wall from where the previous one actually ended.
    pub fn build_house(&mut self, plan: &HousePlan) {
        self.clear();
        self.ring_rows = plan.courses.iter().map(|c| c.rows.end).max().unwrap_or(0);

        for course in &plan.courses {
            let mut at = course.start;
            let last = course.legs.len().saturating_sub(1);
            for (i, leg) in course.legs.iter().enumerate() {
                let segment = WallSegment {
                    start: at,
                    end: leg.target(at),
                    cap_start: course.cap_start && i == 0,
                    cap_finish: course.cap_finish && i == last,
                    start_row: course.rows.start,
                    row_count: course.rows.end,
                    extend_mortar: course.extend_mortar,
                };
                at = self.build_wall(&segment);
            }
        }

        log::debug!(
            "laid out {} bricks and {} mortar boxes",
            self.bricks.len(),
            self.mortar.len(),
        );
    }

    /// Lays out one wall segment and returns where it actually ends.
    ///
    /// Only whole bricks are placed, so the returned point is generally short
    /// of `segment.end`. Walls shorter than a brick are allowed but get no
    /// bricks.
    pub fn build_wall(&mut self, segment: &WallSegment) -> Vec2 {
        let size = self.params.size;
        let length = segment.length();
        if length < size.width {
            log::warn!(
                "wall from {} to {} is shorter than one brick ({length} < {})",
                segment.start,
                segment.end,
                size.width,
            );
        }

        let angle = segment.angle();
        let pitch = size.pitch();
        let bricks_per_row = segment.bricks_per_row(pitch);
        let placement = Mat4::from(Transform::on_ground(segment.start, angle));

        let run = placement.transform_vector3(Vec3::X * (bricks_per_row as f32 * pitch));
        let finish = segment.start + Vec2::new(run.x, run.z);

        match self.params.shape {
            WallShape::Single | WallShape::Square => {
                self.lay_straight(segment, placement, bricks_per_row);
                if bricks_per_row > 0 {
                    self.add_box_mortar(segment, placement, bricks_per_row);
                }
            }
            WallShape::Circle if bricks_per_row > 0 => self.lay_circle(segment, bricks_per_row),
            WallShape::Circle => {}
        }

        finish
    }

    fn lay_straight(&mut self, segment: &WallSegment, placement: Mat4, bricks_per_row: u32) {
        let size = self.params.size;
        let pitch = size.pitch();
        let row_offset = pitch / 2.0;
        let half = size.half_brick();
        let half_scale = Mat4::from_scale(Vec3::new(half, 1.0, 1.0));
        // Moves a half brick flush with the end of the full brick it replaces.
        let cap_shift = 0.5 * (size.width - size.width * half);

        for y in segment.start_row..segment.row_count {
            let offset_row = y % 2 == 1;
            let height = y as f32 * size.course_height() + size.height / 2.0;

            for x in 0..bricks_per_row {
                let local =
                    Mat4::from_translation(Vec3::new(x as f32 * pitch + pitch / 4.0, height, 0.0));

                if offset_row && x == 0 && segment.cap_start {
                    let cap = local * Mat4::from_translation(Vec3::X * -cap_shift) * half_scale;
                    self.bricks.push(placement * cap);
                }

                let local = if offset_row {
                    local * Mat4::from_translation(Vec3::X * row_offset)
                } else {
                    local
                };
                let brick = placement * local;
                self.bricks.push(brick);

                if !offset_row && x + 1 == bricks_per_row && segment.cap_finish {
                    let cap = Mat4::from_translation(Vec3::X * (cap_shift + row_offset));
                    self.bricks.push(brick * cap * half_scale);
                }
            }
        }
    }

    /// Adds one mortar box filling the inside of a straight wall.
    ///
    /// The box is the 2×2×2 mortar mesh moved to sit on its -X, -Y edge and
    /// scaled to the wall, shrunk by the inset so it stays behind the bricks.
    fn add_box_mortar(&mut self, segment: &WallSegment, placement: Mat4, bricks_per_row: u32) {
        let LayoutParams { size, inset, .. } = self.params;
        let bricks = bricks_per_row as f32;
        let rows = segment.row_count as f32;
        let laid_rows = rows - segment.start_row as f32;

        let width = bricks * size.width + (bricks - 1.0) * size.spacing + size.pitch() / 2.0
            - size.depth * inset
            - inset;
        let depth = size.depth - size.depth * inset * 2.0;
        let mut full_height =
            rows * size.height + (rows - 1.0) * size.spacing - size.depth * inset;
        let mut height =
            laid_rows * size.height + (laid_rows - 1.0) * size.spacing - size.depth * inset;

        if segment.extend_mortar {
            height += size.height;
            full_height += size.height;
        }

        let lift = if segment.start_row != 0 { inset } else { 0.0 };

        let to_corner = Mat4::from_translation(Vec3::new(1.0, 1.0, 0.0));
        let scale = Mat4::from_scale(0.5 * Vec3::new(width, height, depth));
        let offset = Mat4::from_translation(Vec3::new(
            -size.half_brick() + inset,
            full_height - height + lift,
            0.0,
        ));

        self.mortar.push(placement * offset * scale * to_corner);
    }

    /// Lays the segment's bricks as rings around the origin instead of along
    /// the segment, and replaces the mortar boxes with one annulus.
    fn lay_circle(&mut self, segment: &WallSegment, bricks_per_row: u32) {
        let size = self.params.size;
        // Tighter joints so the bricks close up around the curve.
        let spacing = size.spacing / 3.0;
        let circumference = bricks_per_row as f32 * (size.width + spacing);
        let radius = circumference / TAU + size.depth / 2.0;
        let da = TAU / bricks_per_row as f32;
        let face_out = Mat4::from_rotation_y(FRAC_PI_2);

        for y in segment.start_row..segment.row_count {
            let stagger = if y % 2 == 1 { da / 2.0 } else { 0.0 };
            let height = y as f32 * (size.height + spacing) + size.height / 2.0;

            for x in 0..bricks_per_row {
                let turn = Mat4::from_rotation_y(da * x as f32 + stagger);
                let out = Mat4::from_translation(Vec3::new(radius, height, 0.0));
                self.bricks.push(turn * out * face_out);
            }
        }

        self.ring_rows = self.ring_rows.max(segment.row_count);
        self.mortar_ring = Some(self.circular_mortar(radius, self.ring_rows, spacing));
    }

    fn circular_mortar(&self, radius: f32, rows: u32, spacing: f32) -> Mesh {
        let LayoutParams {
            size,
            inset,
            mortar_color,
            ..
        } = self.params;
        let rows = rows as f32;
        let outer = radius + size.depth / 2.3;
        let inner = radius - size.depth / 4.0;
        let height = rows * size.height + (rows - 1.0) * spacing - size.depth * inset;

        let mut mesh = primitives::ring(mortar_color, 60, inner, outer);
        mesh.scale(Vec3::new(1.0, height, 1.0));
        mesh.translate(Vec3::new(0.0, height / 2.0, 0.0));
        mesh
    }
}
