//! Point cloud export in the PLY format.

use ply_rs::{
    ply::{
        Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
        ScalarType,
    },
    writer::Writer,
};
use std::io::{self, Write};
use stereo_core::nalgebra::Point3;
use stereo_core::StereoModel;

/// Optical centers are drawn in magenta.
pub const CAMERA_COLOR: [u8; 3] = [255, 0, 255];

/// The optical centers of both cameras of a rectified rig in the frame of the left camera.
pub fn optical_centers(model: &impl StereoModel) -> [Point3<f64>; 2] {
    [Point3::origin(), Point3::new(model.baseline(), 0.0, 0.0)]
}

fn vertex_element() -> ElementDef {
    let mut element = ElementDef::new("vertex".to_string());
    let scalars = [
        ("x", ScalarType::Double),
        ("y", ScalarType::Double),
        ("z", ScalarType::Double),
        ("red", ScalarType::UChar),
        ("green", ScalarType::UChar),
        ("blue", ScalarType::UChar),
    ];
    for (name, ty) in scalars {
        element
            .properties
            .add(PropertyDef::new(name.to_string(), PropertyType::Scalar(ty)));
    }
    element
}

fn vertex(point: Point3<f64>, [red, green, blue]: [u8; 3]) -> DefaultElement {
    let mut vertex = DefaultElement::new();
    for (name, value) in [("x", point.x), ("y", point.y), ("z", point.z)] {
        vertex.insert(name.to_string(), Property::Double(value));
    }
    for (name, value) in [("red", red), ("green", green), ("blue", blue)] {
        vertex.insert(name.to_string(), Property::UChar(value));
    }
    vertex
}

/// Writes the points and the camera optical centers as an ASCII PLY point cloud.
///
/// Cameras come first in the vertex list and are colored with [`CAMERA_COLOR`]. If `invert_y` is set,
/// every vertex is mirrored along Y so that up is positive in viewers.
pub fn export_ply(
    mut writer: impl Write,
    points: &[(Point3<f64>, [u8; 3])],
    cameras: &[Point3<f64>],
    invert_y: bool,
) -> io::Result<()> {
    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::Ascii;
    ply.header
        .comments
        .push("Exported from stereo-reconstruction".to_string());
    ply.header.elements.add(vertex_element());

    let orient = |mut point: Point3<f64>| {
        if invert_y {
            point.y = -point.y;
        }
        point
    };
    let vertices = cameras
        .iter()
        .map(|&center| (center, CAMERA_COLOR))
        .chain(points.iter().copied())
        .map(|(point, color)| vertex(orient(point), color))
        .collect();
    ply.payload.insert("vertex".to_string(), vertices);

    Writer::new().write_ply(&mut writer, &mut ply)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stereo_pinhole::CalibrationParameters;

    fn body(ply: &str) -> Vec<Vec<f64>> {
        ply.lines()
            .skip_while(|line| *line != "end_header")
            .skip(1)
            .map(|line| {
                line.split_whitespace()
                    .map(|word| word.parse().unwrap())
                    .collect()
            })
            .collect()
    }

    fn write(points: &[(Point3<f64>, [u8; 3])], cameras: &[Point3<f64>], invert_y: bool) -> String {
        let mut buffer = vec![];
        export_ply(&mut buffer, points, cameras, invert_y).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn invert_y_flips_vertices() {
        let points = [(Point3::new(1.0, 2.0, 3.0), [0, 0, 255])];
        assert_eq!(
            body(&write(&points, &[], false)),
            vec![vec![1.0, 2.0, 3.0, 0.0, 0.0, 255.0]]
        );
        assert_eq!(
            body(&write(&points, &[], true)),
            vec![vec![1.0, -2.0, 3.0, 0.0, 0.0, 255.0]]
        );
    }

    #[test]
    fn cameras_come_first() {
        let centers = optical_centers(&CalibrationParameters::reference());
        assert_eq!(centers[1], Point3::new(94.926, 0.0, 0.0));

        let ply = write(&[(Point3::new(0.5, 0.5, 9.0), [1, 2, 3])], &centers, true);
        assert!(ply.contains("format ascii 1.0"));
        assert!(ply.contains("element vertex 3"));
        let body = body(&ply);
        assert_eq!(body[0][3..], [255.0, 0.0, 255.0]);
        assert_eq!(body[1][0], 94.926);
        assert_eq!(body[2], vec![0.5, -0.5, 9.0, 1.0, 2.0, 3.0]);
    }
}
