use std::collections::HashMap;

use rand::{Rng as _, SeedableRng as _, rngs::StdRng};

use crate::config::settings::LayoutSettings;
use crate::foundation::core::{Point, Vec2};
use crate::graph::frame::TopologyFrame;

const MIN_DISTANCE: f64 = 0.01;

/// Node id -> position in `[-1, 1]²`, computed once and reused for every frame of a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutPositions {
    by_id: HashMap<String, Point>,
}

impl LayoutPositions {
    /// Position of `id`, or `None` when the node was not in the reference frame.
    pub fn get(&self, id: &str) -> Option<Point> {
        self.by_id.get(id).copied()
    }

    /// Number of positioned nodes.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether no node is positioned.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Iterate `(id, position)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.by_id.iter().map(|(id, p)| (id.as_str(), *p))
    }
}

impl FromIterator<(String, Point)> for LayoutPositions {
    fn from_iter<I: IntoIterator<Item = (String, Point)>>(iter: I) -> Self {
        Self {
            by_id: iter.into_iter().collect(),
        }
    }
}

/// Fruchterman-Reingold force-directed layout.
///
/// Edges attract with `d² / k`, every pair repels with `k² / d`, and each step moves a node by at
/// most the current temperature, which cools linearly to zero. Initial placement is drawn from a
/// seeded RNG, so the result depends only on the frame and `settings`. The result is centred on
/// the origin and scaled so the largest coordinate magnitude is 1.
#[tracing::instrument(skip(frame), fields(nodes = frame.node_count(), edges = frame.edge_count()))]
pub fn spring_layout(frame: &TopologyFrame, settings: &LayoutSettings) -> LayoutPositions {
    let n = frame.node_count();
    let ids: Vec<&str> = frame.nodes().map(|node| node.id.as_str()).collect();
    if n == 0 {
        return LayoutPositions::default();
    }
    if n == 1 {
        return LayoutPositions {
            by_id: HashMap::from([(ids[0].to_owned(), Point::ORIGIN)]),
        };
    }

    // Symmetric attraction weights; parallel edges add up, self loops carry no force.
    let mut adjacency = vec![0.0f64; n * n];
    for (a, b) in frame.edge_positions() {
        if a == b {
            continue;
        }
        adjacency[a * n + b] += 1.0;
        adjacency[b * n + a] += 1.0;
    }

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut pos: Vec<Vec2> = (0..n)
        .map(|_| Vec2::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect();

    let k = settings.k.unwrap_or_else(|| 1.0 / (n as f64).sqrt());
    let (min, max) = bounds(&pos);
    let mut temperature = (max.x - min.x).max(max.y - min.y) * 0.1;
    let cooling = temperature / (f64::from(settings.iterations) + 1.0);

    let mut displacement = vec![Vec2::ZERO; n];
    for _ in 0..settings.iterations {
        for (i, disp) in displacement.iter_mut().enumerate() {
            *disp = Vec2::ZERO;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let delta = pos[i] - pos[j];
                let distance = delta.hypot().max(MIN_DISTANCE);
                let attraction = adjacency[i * n + j] * distance / k;
                let repulsion = k * k / (distance * distance);
                *disp += delta * (repulsion - attraction);
            }
        }
        for (p, disp) in pos.iter_mut().zip(&displacement) {
            let length = disp.hypot().max(MIN_DISTANCE);
            *p += *disp * (temperature / length);
        }
        temperature -= cooling;
    }

    rescale(&mut pos);

    let by_id = ids
        .into_iter()
        .zip(pos)
        .map(|(id, p)| (id.to_owned(), p.to_point()))
        .collect();
    tracing::debug!(k, "spring layout done");
    LayoutPositions { by_id }
}

fn bounds(pos: &[Vec2]) -> (Vec2, Vec2) {
    let mut min = Vec2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in pos {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

fn rescale(pos: &mut [Vec2]) {
    let mean = pos.iter().fold(Vec2::ZERO, |acc, p| acc + *p) / pos.len() as f64;
    let mut lim = 0.0f64;
    for p in pos.iter_mut() {
        *p -= mean;
        lim = lim.max(p.x.abs()).max(p.y.abs());
    }
    if lim > 0.0 {
        for p in pos.iter_mut() {
            *p = *p / lim;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/spring.rs"]
mod tests;
