use glam::Vec3;

/// Static reference data for a pinned point of interest on the globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f32,
    pub longitude: f32,
    pub description: &'static str,
}

pub const LOCATIONS: &[Location] = &[
    Location {
        name: "Reykjavik",
        latitude: 64.1,
        longitude: -21.9,
        description: "Mid-Atlantic ridge town, sitting right on a rift between two plates.",
    },
    Location {
        name: "Quito",
        latitude: -0.2,
        longitude: -78.5,
        description: "Highest capital on the equator, ringed by Andean volcanoes.",
    },
    Location {
        name: "Kyoto",
        latitude: 35.0,
        longitude: 135.8,
        description: "Old imperial capital on the Pacific ring of fire.",
    },
    Location {
        name: "Wellington",
        latitude: -41.3,
        longitude: 174.8,
        description: "Southern harbor city straddling an active fault line.",
    },
];

/// Project latitude/longitude (degrees) onto a sphere of the given radius.
///
/// Matches the equirectangular texture orientation used by the geometry
/// builders: colatitude from the north pole, longitude offset by 180
/// degrees, x negated.
pub fn lat_lon_to_vec3(latitude: f32, longitude: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - latitude).to_radians();
    let theta = (longitude + 180.0).to_radians();
    Vec3::new(
        -(radius * phi.sin() * theta.cos()),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}
