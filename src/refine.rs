//! Topology and shape editing: subdivision, edge rounding and roughening.
//!
//! These operate on cube-derived meshes in place. They leave normals stale, so
//! a normal pass has to follow before the mesh is rendered.

use std::collections::HashMap;
use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

use crate::{
    face::Face,
    mesh::{Mesh, Vertex},
};

/// Undirected edge, smaller index first.
type EdgeKey = (u32, u32);

fn edge_key(a: u32, b: u32) -> EdgeKey {
    if a < b { (a, b) } else { (b, a) }
}

impl Mesh {
    /// Applies `passes` rounds of 4-way triangle splitting.
    ///
    /// Each edge gets exactly one midpoint vertex per pass, shared by both
    /// triangles using it, so closed manifold input stays closed and manifold.
    /// Non-manifold input silently produces a broken result.
    pub fn subdivide(&mut self, passes: u32) {
        for _ in 0..passes {
            self.subdivide_once();
        }
    }

    fn subdivide_once(&mut self) {
        let triangles = std::mem::take(&mut self.indices);
        let mut midpoints: HashMap<EdgeKey, u32> = HashMap::with_capacity(triangles.len() / 2);
        let mut indices = Vec::with_capacity(triangles.len() * 4);

        for t in triangles.chunks_exact(3) {
            let [v0, v1, v2] = [t[0], t[1], t[2]];
            let m01 = self.edge_midpoint(&mut midpoints, v0, v1);
            let m12 = self.edge_midpoint(&mut midpoints, v1, v2);
            let m20 = self.edge_midpoint(&mut midpoints, v2, v0);

            indices.extend_from_slice(&[
                m01, m12, m20, //
                v0, m01, m20, //
                v1, m12, m01, //
                v2, m20, m12,
            ]);
        }

        self.indices = indices;
    }

    /// Returns the midpoint vertex of edge `a`-`b`, creating it the first time
    /// the edge is seen. The new vertex takes `a`'s color and a zero normal.
    fn edge_midpoint(&mut self, midpoints: &mut HashMap<EdgeKey, u32>, a: u32, b: u32) -> u32 {
        if let Some(&mid) = midpoints.get(&edge_key(a, b)) {
            return mid;
        }

        let va = self.vertices[a as usize];
        let vb = self.vertices[b as usize];
        let mid = self.push_vertex(
            Vertex::new((va.pos + vb.pos) * 0.5, va.color, Vec3::ZERO)
                .with_faces(va.faces.shared_with(vb.faces)),
        );
        midpoints.insert(edge_key(a, b), mid);
        mid
    }

    /// Rounds the edges and corners of the 2×2×2 cube with the given radius.
    ///
    /// For each pair of axes, a vertex lying beyond `1 - radius` on both axes
    /// is pulled onto the cylinder of `radius` around the nearby edge. Applying
    /// this for all three axis pairs rounds the corners too. `radius = 0`
    /// leaves the cube unchanged.
    pub fn round_edges(&mut self, radius: f32) {
        if radius <= 0.0 {
            return;
        }

        let anchor = 1.0 - radius;
        for v in &mut self.vertices {
            for (i, j) in [(0, 1), (1, 2), (0, 2)] {
                for (si, sj) in [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0)] {
                    if v.pos[i] * si <= anchor || v.pos[j] * sj <= anchor {
                        continue;
                    }

                    let (ai, aj) = (anchor * si, anchor * sj);
                    let (di, dj) = (v.pos[i] - ai, v.pos[j] - aj);
                    let len = (di * di + dj * dj).sqrt();
                    if len > radius {
                        let ratio = radius / len;
                        v.pos[i] = ai + di * ratio;
                        v.pos[j] = aj + dj * ratio;
                    }
                }
            }
        }
    }

    /// Perturbs the surface of a subdivided brick cube and tints it to match.
    ///
    /// Front and back faces get a ripple along X plus Gaussian noise, ends get
    /// a smaller ripple along Z plus half the noise, and top and bottom get a
    /// tenth of the noise. On the front, back and end faces the color is
    /// brightened by five times the outward displacement.
    ///
    /// The ripple frequency follows `subdivisions` so it lines up with the
    /// vertex grid.
    pub fn roughen(&mut self, factor: f32, subdivisions: u32, rng: &mut impl Rng) {
        let sigma = 0.2 * factor;
        let front_freq = PI * 2.0_f32.powi(subdivisions as i32 - 1);
        let end_freq = PI * 2.0_f32.powi(subdivisions as i32 - 2);
        // The finest grid gets a slightly gentler ripple.
        let front_amp = 0.04 * if subdivisions == 6 { factor * 0.8 } else { factor };
        let end_amp = 0.02 * factor;

        for v in &mut self.vertices {
            let r = gaussian(rng, 0.0, sigma);

            let Some(face) = v.faces.primary() else {
                continue;
            };

            match face {
                Face::Front | Face::Back => {
                    let old = v.pos.z;
                    v.pos.z += (v.pos.x * front_freq).cos() * front_amp + r;
                    v.color += Vec3::ONE * ((v.pos.z - old) * face.sign() * 5.0);
                }
                Face::PosEnd | Face::NegEnd => {
                    let old = v.pos.x;
                    v.pos.x += (v.pos.z * end_freq).cos() * end_amp + r * 0.5;
                    v.color += Vec3::ONE * ((v.pos.x - old) * face.sign() * 5.0);
                }
                Face::Top | Face::Bottom => {
                    v.pos.y += r * 0.1;
                }
            }
        }
    }
}

/// Samples a normal distribution using the Marsaglia polar method.
fn gaussian(rng: &mut impl Rng, mean: f32, std_dev: f32) -> f32 {
    loop {
        let x: f32 = rng.random_range(-1.0..1.0);
        let y: f32 = rng.random_range(-1.0..1.0);
        let s = x * x + y * y;
        if s > 0.0 && s < 1.0 {
            return mean + std_dev * x * (-2.0 * s.ln() / s).sqrt();
        }
    }
}
