//! Mesh data for the orb and the particle field.

use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec3;
use rand::prelude::*;

/// Welded vertex positions and a line-list index buffer, one pair per edge.
#[derive(Clone, Debug, Default)]
pub struct WireMesh {
    pub positions: Vec<[f32; 3]>,
    pub edges: Vec<u32>,
}

impl WireMesh {
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_corners() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

// Merges vertices that land on the same spot from neighbouring faces.
struct Welder {
    positions: Vec<[f32; 3]>,
    lookup: FnvHashMap<[i32; 3], u32>,
}

impl Welder {
    const QUANTUM: f32 = 1.0e4;

    fn insert(&mut self, p: Vec3) -> u32 {
        let key = [
            (p.x * Self::QUANTUM).round() as i32,
            (p.y * Self::QUANTUM).round() as i32,
            (p.z * Self::QUANTUM).round() as i32,
        ];
        if let Some(&index) = self.lookup.get(&key) {
            return index;
        }
        let index = self.positions.len() as u32;
        self.positions.push(p.to_array());
        self.lookup.insert(key, index);
        index
    }
}

/// Icosahedron with each face split into `(detail + 1)^2` triangles and
/// pushed out onto a sphere of `radius`, as unique edges.
pub fn icosphere_wireframe(radius: f32, detail: u32) -> WireMesh {
    let corners = icosahedron_corners();
    let cols = detail as usize + 1;
    let mut welder = Welder {
        positions: Vec::new(),
        lookup: FnvHashMap::default(),
    };
    let mut seen: FnvHashSet<(u32, u32)> = FnvHashSet::default();
    let mut edges = Vec::new();
    let mut add_edge = |a: u32, b: u32| {
        let key = (a.min(b), a.max(b));
        if a != b && seen.insert(key) {
            edges.push(key.0);
            edges.push(key.1);
        }
    };

    for face in ICOSAHEDRON_FACES {
        let (a, b, c) = (corners[face[0]], corners[face[1]], corners[face[2]]);
        // grid[i][j]: row i walks from edge ab toward corner c
        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(cols + 1);
        for i in 0..=cols {
            let s = i as f32 / cols as f32;
            let aj = a.lerp(c, s);
            let bj = b.lerp(c, s);
            let rows = cols - i;
            let row = (0..=rows)
                .map(|j| {
                    let p = if rows == 0 {
                        aj
                    } else {
                        aj.lerp(bj, j as f32 / rows as f32)
                    };
                    welder.insert(p.normalize() * radius)
                })
                .collect();
            grid.push(row);
        }
        for i in 0..cols {
            for j in 0..(2 * (cols - i) - 1) {
                let k = j / 2;
                let tri = if j % 2 == 0 {
                    [grid[i][k + 1], grid[i + 1][k], grid[i][k]]
                } else {
                    [grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]
                };
                add_edge(tri[0], tri[1]);
                add_edge(tri[1], tri[2]);
                add_edge(tri[2], tri[0]);
            }
        }
    }

    WireMesh {
        positions: welder.positions,
        edges,
    }
}

/// `count` points uniformly filling a cube of edge `spread` centred on the
/// origin. Seeded so every load draws the same field.
pub fn particle_field(count: usize, spread: f32, seed: u64) -> Vec<[f32; 3]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            [
                (rng.gen::<f32>() - 0.5) * spread,
                (rng.gen::<f32>() - 0.5) * spread,
                (rng.gen::<f32>() - 0.5) * spread,
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_zero_is_the_icosahedron() {
        let m = icosphere_wireframe(1.0, 0);
        assert_eq!(m.positions.len(), 12);
        assert_eq!(m.edge_count(), 30);
    }

    #[test]
    fn subdivision_counts_follow_closed_form() {
        for detail in [1u32, 2, 5] {
            let n = (detail + 1) as usize;
            let m = icosphere_wireframe(1.0, detail);
            assert_eq!(m.positions.len(), 10 * n * n + 2, "detail {detail}");
            assert_eq!(m.edge_count(), 30 * n * n, "detail {detail}");
        }
    }

    #[test]
    fn every_vertex_sits_on_the_sphere() {
        let m = icosphere_wireframe(0.8, 3);
        for p in &m.positions {
            let r = Vec3::from_array(*p).length();
            assert!((r - 0.8).abs() < 1e-5);
        }
        assert!(m.edges.iter().all(|&i| (i as usize) < m.positions.len()));
    }

    #[test]
    fn particle_field_is_bounded_and_deterministic() {
        let a = particle_field(500, 15.0, 7);
        let b = particle_field(500, 15.0, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 500);
        assert!(a.iter().flatten().all(|v| v.abs() <= 7.5));
    }
}
