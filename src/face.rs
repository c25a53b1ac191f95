//! Cube face tags carried per vertex.
//!
//! Bricks start life as a cube, and the roughening pass needs to know which
//! cube face each vertex sits on. Rather than guessing from normals after the
//! fact, the cube primitive tags every vertex with the faces it lies on and
//! subdivision propagates those tags to new midpoints.

use bitflags::bitflags;
use glam::Vec3;

/// One face of the axis-aligned brick cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// +Z, the visible wall face.
    Front,
    /// -Z
    Back,
    /// +X end of the brick.
    PosEnd,
    /// -X end of the brick.
    NegEnd,
    /// +Y
    Top,
    /// -Y
    Bottom,
}

impl Face {
    /// Faces in tie-break order: front/back, then ends, then top/bottom.
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::PosEnd,
        Face::NegEnd,
        Face::Top,
        Face::Bottom,
    ];

    /// Index of the coordinate axis this face is perpendicular to.
    pub fn axis(self) -> usize {
        match self {
            Face::PosEnd | Face::NegEnd => 0,
            Face::Top | Face::Bottom => 1,
            Face::Front | Face::Back => 2,
        }
    }

    /// `1.0` for faces on the positive side of their axis, `-1.0` otherwise.
    pub fn sign(self) -> f32 {
        match self {
            Face::Front | Face::PosEnd | Face::Top => 1.0,
            Face::Back | Face::NegEnd | Face::Bottom => -1.0,
        }
    }

    pub fn normal(self) -> Vec3 {
        let mut n = Vec3::ZERO;
        n[self.axis()] = self.sign();
        n
    }

    fn flag(self) -> FaceSet {
        match self {
            Face::Front => FaceSet::FRONT,
            Face::Back => FaceSet::BACK,
            Face::PosEnd => FaceSet::POS_END,
            Face::NegEnd => FaceSet::NEG_END,
            Face::Top => FaceSet::TOP,
            Face::Bottom => FaceSet::BOTTOM,
        }
    }
}

bitflags! {
    /// Set of cube faces a vertex lies on.
    ///
    /// Interior face vertices carry one flag, edge vertices two and corners
    /// three. Shapes that are not derived from the cube carry none.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FaceSet: u8 {
        const FRONT = 1 << 0;
        const BACK = 1 << 1;
        const POS_END = 1 << 2;
        const NEG_END = 1 << 3;
        const TOP = 1 << 4;
        const BOTTOM = 1 << 5;
    }
}

impl FaceSet {
    /// Resolves the set to a single face, first match in [`Face::ALL`] order.
    ///
    /// Corner and edge vertices are disambiguated purely by this order.
    pub fn primary(self) -> Option<Face> {
        Face::ALL.into_iter().find(|face| self.contains(face.flag()))
    }

    /// Infers a face set from a vertex normal by thresholding each component
    /// at ±0.5.
    pub fn from_normal(normal: Vec3) -> Self {
        Face::ALL
            .into_iter()
            .filter(|face| normal[face.axis()] * face.sign() > 0.5)
            .fold(FaceSet::empty(), |set, face| set | face.flag())
    }

    /// Faces shared by both endpoints of an edge; this is the tag of the edge's
    /// midpoint.
    pub fn shared_with(self, other: FaceSet) -> FaceSet {
        self & other
    }
}

impl From<Face> for FaceSet {
    fn from(face: Face) -> Self {
        face.flag()
    }
}
