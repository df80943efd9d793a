//! World field generation
//!
//! Attractors sit on cell centers of a coarse grid so they can never overlap.
//! Obstacles are scattered uniformly and start at rest.

use glam::Vec2;
use rand::Rng;

use super::state::{Attractor, Hsla, Obstacle};
use crate::consts::*;

/// Cell centers of a square grid with cell size min(w, h) / 4
pub fn candidate_positions(bounds: Vec2) -> Vec<Vec2> {
    let cell = bounds.min_element() / FIELD_GRID_DIVISIONS;
    if cell.is_nan() || cell <= 0.0 {
        return Vec::new();
    }

    let mut points = Vec::new();
    let mut x = cell / 2.0;
    while x < bounds.x {
        let mut y = cell / 2.0;
        while y < bounds.y {
            points.push(Vec2::new(x, y));
            y += cell;
        }
        x += cell;
    }
    points
}

/// Pick 2-4 distinct grid cells and put an attractor on each.
pub fn generate_attractors<R: Rng>(rng: &mut R, bounds: Vec2) -> Vec<Attractor> {
    let mut pool = candidate_positions(bounds);
    let count = rng.random_range(MIN_ATTRACTORS..=MAX_ATTRACTORS);

    let mut attractors = Vec::with_capacity(count);
    for _ in 0..count {
        if pool.is_empty() {
            break;
        }
        let index = rng.random_range(0..pool.len());
        let pos = pool.swap_remove(index);

        attractors.push(Attractor {
            pos,
            radius: ATTRACTOR_RADIUS,
            mass: ATTRACTOR_MASS,
            color: Hsla {
                hue: rng.random_range(0.0..360.0),
                saturation: 0.5,
                lightness: 0.5,
                alpha: 1.0,
            },
            glow_color: Hsla {
                hue: rng.random_range(0.0..360.0),
                saturation: 1.0,
                lightness: 0.8,
                alpha: 0.7,
            },
        });
    }

    log::debug!(
        "Field: {} attractors from {} grid cells",
        attractors.len(),
        attractors.len() + pool.len()
    );
    attractors
}

/// Scatter the obstacle set uniformly over the play area.
pub fn generate_obstacles<R: Rng>(rng: &mut R, bounds: Vec2) -> Vec<Obstacle> {
    (0..OBSTACLE_COUNT)
        .map(|_| {
            Obstacle::new(Vec2::new(
                rng.random::<f32>() * bounds.x,
                rng.random::<f32>() * bounds.y,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_candidate_grid() {
        // 800x400 -> cell 100 -> 8 columns x 4 rows
        let points = candidate_positions(Vec2::new(800.0, 400.0));
        assert_eq!(points.len(), 32);
        assert_eq!(points[0], Vec2::new(50.0, 50.0));
        assert!(points.iter().all(|p| p.x < 800.0 && p.y < 400.0));
    }

    #[test]
    fn test_degenerate_bounds_yield_no_candidates() {
        assert!(candidate_positions(Vec2::new(0.0, 600.0)).is_empty());
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(generate_attractors(&mut rng, Vec2::ZERO).is_empty());
    }

    #[test]
    fn test_attractors_distinct_and_counted() {
        for seed in 0..200 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let bounds = Vec2::new(1280.0, 720.0);
            let attractors = generate_attractors(&mut rng, bounds);
            assert!((MIN_ATTRACTORS..=MAX_ATTRACTORS).contains(&attractors.len()));

            let cell = bounds.min_element() / FIELD_GRID_DIVISIONS;
            for (i, a) in attractors.iter().enumerate() {
                assert_eq!(a.mass, ATTRACTOR_MASS);
                assert_eq!(a.radius, ATTRACTOR_RADIUS);
                assert!((0.0..360.0).contains(&a.color.hue));
                assert!((0.0..360.0).contains(&a.glow_color.hue));
                for b in &attractors[i + 1..] {
                    assert!(a.pos.distance(b.pos) >= cell - 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_square_area_has_sixteen_cells() {
        let bounds = Vec2::new(100.0, 100.0);
        let points = candidate_positions(bounds);
        assert_eq!(points.len(), 16);
        assert_eq!(points[15], Vec2::new(87.5, 87.5));
    }

    #[test]
    fn test_obstacles_start_at_rest_inside_bounds() {
        let mut rng = Pcg32::seed_from_u64(3);
        let bounds = Vec2::new(640.0, 480.0);
        let obstacles = generate_obstacles(&mut rng, bounds);
        assert_eq!(obstacles.len(), OBSTACLE_COUNT);
        for o in &obstacles {
            assert_eq!(o.vel, Vec2::ZERO);
            assert_eq!(o.radius, OBSTACLE_RADIUS);
            assert!(o.pos.x >= 0.0 && o.pos.x < bounds.x);
            assert!(o.pos.y >= 0.0 && o.pos.y < bounds.y);
        }
    }
}
