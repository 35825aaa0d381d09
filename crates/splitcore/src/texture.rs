use glam::Vec3;
use noise::{NoiseFn, Perlin};
use std::f32::consts::PI;

const OCEAN_DEEP: [f32; 3] = [0.02, 0.09, 0.25];
const OCEAN_SHALLOW: [f32; 3] = [0.05, 0.22, 0.45];
const LAND_LOW: [f32; 3] = [0.13, 0.35, 0.12];
const LAND_HIGH: [f32; 3] = [0.45, 0.38, 0.22];
const ICE: [f32; 3] = [0.92, 0.94, 0.97];

const LAND_THRESHOLD: f64 = 0.08;

fn fbm(perlin: &Perlin, dir: Vec3, octaves: u32, frequency: f64) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut freq = frequency;
    let mut max = 0.0;
    for _ in 0..octaves {
        total += perlin.get([
            dir.x as f64 * freq,
            dir.y as f64 * freq,
            dir.z as f64 * freq,
        ]) * amplitude;
        max += amplitude;
        amplitude *= 0.5;
        freq *= 2.0;
    }
    total / max
}

fn mix(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Sphere direction sampled by the given pixel center. The mesh maps
/// V = 1 - theta/pi with the north pole at V = 1, and samplers put V = 1
/// on the last row, so row 0 is the southern edge.
fn pixel_direction(x: usize, y: usize, width: usize, height: usize) -> Vec3 {
    // +0.5 samples pixel centers so the poles don't collapse to a point
    let theta = PI * (1.0 - (y as f32 + 0.5) / height as f32);
    let phi = 2.0 * PI * (x as f32 + 0.5) / width as f32;
    Vec3::new(
        theta.sin() * phi.cos(),
        theta.cos(),
        theta.sin() * phi.sin(),
    )
}

/// Procedural equirectangular earth texture: Perlin continents over ocean
/// with ice toward the poles. Deterministic for a given seed; returns a
/// tightly-packed RGBA8 buffer of `width * height` pixels, row 0 at the
/// southern edge.
pub fn generate_earth_texture(width: usize, height: usize, seed: u32) -> Vec<u8> {
    let perlin = Perlin::new(seed);
    let mut pixels = Vec::with_capacity(width * height * 4);

    for y in 0..height {
        for x in 0..width {
            let dir = pixel_direction(x, y, width, height);

            let elevation = fbm(&perlin, dir, 5, 1.8);
            let detail = fbm(&perlin, dir, 3, 6.0);

            let mut color = if elevation > LAND_THRESHOLD {
                let h = ((elevation - LAND_THRESHOLD) / 0.4).min(1.0) as f32;
                mix(LAND_LOW, LAND_HIGH, h + detail as f32 * 0.3)
            } else {
                let depth = ((LAND_THRESHOLD - elevation) / 0.5).min(1.0) as f32;
                mix(OCEAN_SHALLOW, OCEAN_DEEP, depth)
            };

            // Ice caps fade in above roughly 70 degrees of latitude.
            let polar = dir.y.abs();
            if polar > 0.88 {
                let t = ((polar - 0.88) / 0.08 + detail as f32 * 0.4).clamp(0.0, 1.0);
                color = mix(color, ICE, t);
            }

            pixels.push((color[0].clamp(0.0, 1.0) * 255.0) as u8);
            pixels.push((color[1].clamp(0.0, 1.0) * 255.0) as u8);
            pixels.push((color[2].clamp(0.0, 1.0) * 255.0) as u8);
            pixels.push(255);
        }
    }

    pixels
}
