use crate::mesh_data::MeshData;
use std::f32::consts::{PI, TAU};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("invalid geometry parameters: {0}")]
    InvalidParameters(String),
}

/// Which half of the sphere a hemisphere or core shell covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Bottom,
    Top,
}

fn validate(radius: f32, lat_segments: usize, lon_segments: usize) -> Result<(), GeometryError> {
    if !(radius > 0.0) {
        return Err(GeometryError::InvalidParameters(format!(
            "radius must be positive, got {radius}"
        )));
    }
    if lat_segments == 0 {
        return Err(GeometryError::InvalidParameters(
            "lat_segments must be at least 1".into(),
        ));
    }
    if lon_segments < 3 {
        return Err(GeometryError::InvalidParameters(format!(
            "lon_segments must be at least 3, got {lon_segments}"
        )));
    }
    Ok(())
}

/// Build a lat/lon band of the sphere between two colatitudes.
///
/// V coordinates stay on the global sphere mapping (v = 1 - theta/pi), so
/// a band covering [0, pi/2] lands in v [0.5, 1] and the band below it in
/// v [0, 0.5]. A single equirectangular texture therefore maps continuously
/// across the equator seam when both halves are rendered together.
fn build_band(
    radius: f32,
    lat_segments: usize,
    lon_segments: usize,
    theta_start: f32,
    theta_end: f32,
) -> MeshData {
    let mut mesh = MeshData::default();

    for i in 0..=lat_segments {
        let frac = i as f32 / lat_segments as f32;
        let theta = theta_start + (theta_end - theta_start) * frac;
        let (sin_t, cos_t) = theta.sin_cos();

        for j in 0..=lon_segments {
            let phi = TAU * j as f32 / lon_segments as f32;
            let (sin_p, cos_p) = phi.sin_cos();

            let nx = sin_t * cos_p;
            let ny = cos_t;
            let nz = sin_t * sin_p;

            mesh.positions.push([radius * nx, radius * ny, radius * nz]);
            mesh.normals.push([nx, ny, nz]);
            mesh.uvs
                .push([j as f32 / lon_segments as f32, 1.0 - theta / PI]);
        }
    }

    // counter-clockwise seen from outside the sphere
    let stride = (lon_segments + 1) as u32;
    for i in 0..lat_segments as u32 {
        for j in 0..lon_segments as u32 {
            let a = i * stride + j;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, a + 1, b, b, a + 1, b + 1]);
        }
    }

    mesh
}

/// Flat disc in the y = 0 plane closing a hemisphere's open rim.
///
/// `facing_up` selects the cap normal: the bottom shell is closed from
/// above (+Y), the top shell from below (-Y). Winding matches the normal.
fn build_cap(radius: f32, lon_segments: usize, facing_up: bool) -> MeshData {
    let mut mesh = MeshData::default();
    let ny = if facing_up { 1.0 } else { -1.0 };

    mesh.positions.push([0.0, 0.0, 0.0]);
    mesh.normals.push([0.0, ny, 0.0]);
    mesh.uvs.push([0.5, 0.5]);

    for j in 0..=lon_segments {
        let phi = TAU * j as f32 / lon_segments as f32;
        let (sin_p, cos_p) = phi.sin_cos();
        mesh.positions.push([radius * cos_p, 0.0, radius * sin_p]);
        mesh.normals.push([0.0, ny, 0.0]);
        mesh.uvs.push([0.5 + 0.5 * cos_p, 0.5 + 0.5 * sin_p]);
    }

    for j in 1..=lon_segments as u32 {
        if facing_up {
            mesh.indices.extend_from_slice(&[0, j + 1, j]);
        } else {
            mesh.indices.extend_from_slice(&[0, j, j + 1]);
        }
    }

    mesh
}

/// Full sphere with equirectangular UVs. Built once at startup.
pub fn build_sphere(
    radius: f32,
    lat_segments: usize,
    lon_segments: usize,
) -> Result<MeshData, GeometryError> {
    validate(radius, lat_segments, lon_segments)?;
    if lat_segments < 2 {
        return Err(GeometryError::InvalidParameters(
            "a full sphere needs at least 2 lat_segments".into(),
        ));
    }
    Ok(build_band(radius, lat_segments, lon_segments, 0.0, PI))
}

/// Open hemisphere covering the given half, with V compressed into the
/// half's own range so the seam at v = 0.5 lines up across halves.
pub fn build_hemisphere(
    radius: f32,
    lat_segments: usize,
    lon_segments: usize,
    half: Half,
) -> Result<MeshData, GeometryError> {
    validate(radius, lat_segments, lon_segments)?;
    let (start, end) = match half {
        Half::Top => (0.0, PI / 2.0),
        Half::Bottom => (PI / 2.0, PI),
    };
    Ok(build_band(radius, lat_segments, lon_segments, start, end))
}

/// Capped hemispherical shell for the exposed molten interior: a hemisphere
/// at the core radius merged with a flat equator disc, the disc's indices
/// offset by the shell's vertex count so the pair forms one mesh.
pub fn build_core_shell(
    radius: f32,
    lat_segments: usize,
    lon_segments: usize,
    half: Half,
) -> Result<MeshData, GeometryError> {
    let mut shell = build_hemisphere(radius, lat_segments, lon_segments, half)?;
    let facing_up = matches!(half, Half::Bottom);
    shell.merge(build_cap(radius, lon_segments, facing_up));
    Ok(shell)
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f32 = 2.0;
    const LAT: usize = 8;
    const LON: usize = 16;

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(matches!(
            build_sphere(0.0, LAT, LON),
            Err(GeometryError::InvalidParameters(_))
        ));
        assert!(matches!(
            build_hemisphere(R, 0, LON, Half::Top),
            Err(GeometryError::InvalidParameters(_))
        ));
        assert!(matches!(
            build_core_shell(R, LAT, 2, Half::Bottom),
            Err(GeometryError::InvalidParameters(_))
        ));
    }

    #[test]
    fn build_is_deterministic() {
        let a = build_core_shell(1.85, LAT, LON, Half::Top).unwrap();
        let b = build_core_shell(1.85, LAT, LON, Half::Top).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hemisphere_v_ranges_partition_without_gap_or_overlap() {
        let top = build_hemisphere(R, LAT, LON, Half::Top).unwrap();
        let bottom = build_hemisphere(R, LAT, LON, Half::Bottom).unwrap();

        for uv in &top.uvs {
            assert!(uv[1] >= 0.5 - 1e-6 && uv[1] <= 1.0 + 1e-6);
        }
        for uv in &bottom.uvs {
            assert!(uv[1] >= -1e-6 && uv[1] <= 0.5 + 1e-6);
        }

        // The last vertex row of the top half and the first row of the
        // bottom half both sit on the equator: same position, same UV,
        // for every longitude column.
        let stride = LON + 1;
        let top_rim = top.vertex_count() - stride;
        for j in 0..stride {
            let t = top_rim + j;
            let b = j;
            assert_eq!(top.uvs[t][0], bottom.uvs[b][0]);
            assert!((top.uvs[t][1] - 0.5).abs() < 1e-6);
            assert!((bottom.uvs[b][1] - 0.5).abs() < 1e-6);
            for axis in 0..3 {
                assert!((top.positions[t][axis] - bottom.positions[b][axis]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn band_triangles_face_outward() {
        // A back-face-culling renderer keeps counter-clockwise front faces,
        // so every non-degenerate triangle's normal must point away from
        // the sphere center.
        for mesh in [
            build_sphere(R, LAT, LON).unwrap(),
            build_hemisphere(R, LAT, LON, Half::Top).unwrap(),
            build_hemisphere(R, LAT, LON, Half::Bottom).unwrap(),
        ] {
            let mut checked = 0;
            for tri in mesh.indices.chunks_exact(3) {
                let p0 = glam::Vec3::from_array(mesh.positions[tri[0] as usize]);
                let p1 = glam::Vec3::from_array(mesh.positions[tri[1] as usize]);
                let p2 = glam::Vec3::from_array(mesh.positions[tri[2] as usize]);
                let normal = (p1 - p0).cross(p2 - p0);
                if normal.length_squared() < 1e-10 {
                    // zero-area triangles at the pole rows
                    continue;
                }
                let centroid = (p0 + p1 + p2) / 3.0;
                assert!(
                    normal.dot(centroid) > 0.0,
                    "inward-facing triangle {tri:?}"
                );
                checked += 1;
            }
            assert!(checked > 0);
        }
    }

    #[test]
    fn hemisphere_vertices_lie_on_their_half() {
        let top = build_hemisphere(R, LAT, LON, Half::Top).unwrap();
        let bottom = build_hemisphere(R, LAT, LON, Half::Bottom).unwrap();
        assert!(top.positions.iter().all(|p| p[1] >= -1e-5));
        assert!(bottom.positions.iter().all(|p| p[1] <= 1e-5));

        for p in &top.positions {
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((len - R).abs() < 1e-4);
        }
    }

    #[test]
    fn core_shell_cap_indices_start_past_shell_vertices() {
        let open = build_hemisphere(1.85, LAT, LON, Half::Top).unwrap();
        let capped = build_core_shell(1.85, LAT, LON, Half::Top).unwrap();

        let shell_verts = open.vertex_count() as u32;
        let cap_indices = &capped.indices[open.indices.len()..];
        assert!(!cap_indices.is_empty());
        assert!(cap_indices.iter().all(|&i| i >= shell_verts));
        assert!(
            cap_indices
                .iter()
                .all(|&i| (i as usize) < capped.vertex_count())
        );
    }

    #[test]
    fn core_shell_cap_sits_on_equator_plane() {
        let open = build_hemisphere(1.85, LAT, LON, Half::Bottom).unwrap();
        let capped = build_core_shell(1.85, LAT, LON, Half::Bottom).unwrap();
        for p in &capped.positions[open.vertex_count()..] {
            assert_eq!(p[1], 0.0);
        }
    }
}
