use glam::{DMat4, DVec3, Vec3};

/// Added to norms before dividing so degenerate vectors collapse to zero.
const NORM_EPS: f64 = 1e-6;

/// Computes the euclidean norm of a vector.
///
/// Example:
///
/// ```
/// use cvkit_3d::geometry::norm;
///
/// assert_eq!(norm(&[3.0, 4.0]), 5.0);
/// ```
pub fn norm(values: &[f64]) -> f64 {
    values.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Computes the euclidean norm of every point in a set.
pub fn norm_rows(points: &[[f64; 3]]) -> Vec<f64> {
    points.iter().map(|p| norm(p)).collect()
}

fn normalize_eps(v: DVec3) -> DVec3 {
    v / (v.length() + NORM_EPS)
}

/// Computes the pose (rotation and translation) of a camera placed at
/// `location` and looking at `target`.
///
/// The camera axes are the columns of the rotation block:
///
/// * Z points from `location` to `target`.
/// * X is parallel to the world XY plane (`world_z x cam_z`).
/// * Y is `cam_z x cam_x`, so it points to the positive z half-space.
///
/// The translation column holds `location` and the last row is `[0, 0, 0, 1]`.
/// When the camera looks straight along the world Z axis the X axis is
/// undefined and collapses to zero.
///
/// Example:
///
/// ```
/// use glam::DVec3;
/// use cvkit_3d::geometry::look_at;
///
/// let pose = look_at(DVec3::new(0.0, -5.0, 0.0), DVec3::ZERO);
/// assert!((pose.z_axis.y - 1.0).abs() < 1e-6);
/// assert_eq!(pose.w_axis.truncate(), DVec3::new(0.0, -5.0, 0.0));
/// ```
pub fn look_at(location: DVec3, target: DVec3) -> DMat4 {
    let cam_z = normalize_eps(target - location);
    let cam_x = normalize_eps(DVec3::Z.cross(cam_z));
    let cam_y = normalize_eps(cam_z.cross(cam_x));

    DMat4::from_cols(
        cam_x.extend(0.0),
        cam_y.extend(0.0),
        cam_z.extend(0.0),
        location.extend(1.0),
    )
}

/// Distributes `num_samples` points on the unit sphere.
///
/// Generalized spiral from Saff & Kuijlaars, "Distributing many points on a
/// sphere", The Mathematical Intelligencer 19(1), 1997. Points go from the
/// north pole towards the south pole.
pub fn sample_sphere(num_samples: usize) -> Vec<Vec3> {
    if num_samples == 0 {
        return Vec::new();
    }

    let n = num_samples as f64;
    let s = 3.6 / n.sqrt();
    let dz = 2.0 / n;
    let mut angle = 0.0f64;
    let mut z = 1.0 - dz / 2.0;

    let mut points = Vec::with_capacity(num_samples);
    for _ in 0..num_samples {
        let r = (1.0 - z * z).sqrt();
        points.push(Vec3::new(
            (angle.cos() * r) as f32,
            (angle.sin() * r) as f32,
            z as f32,
        ));
        angle += s / r;
        z -= dz;
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm() {
        assert_eq!(norm(&[]), 0.0);
        assert_relative_eq!(norm(&[1.0, 2.0, 2.0]), 3.0);
        assert_eq!(norm_rows(&[[3.0, 4.0, 0.0], [0.0, 0.0, -2.0]]), vec![5.0, 2.0]);
    }

    #[test]
    fn test_look_at_axes() {
        let location = DVec3::new(1.0, 2.0, 3.0);
        let target = DVec3::new(-2.0, 0.5, 0.0);
        let pose = look_at(location, target);

        let x = pose.x_axis.truncate();
        let y = pose.y_axis.truncate();
        let z = pose.z_axis.truncate();

        // orthonormal frame
        assert_relative_eq!(x.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(y.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(z.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(x.dot(y), 0.0, epsilon = 1e-9);
        assert_relative_eq!(x.dot(z), 0.0, epsilon = 1e-9);

        // x lies in the world XY plane and y points up
        assert_relative_eq!(x.z, 0.0, epsilon = 1e-12);
        assert!(y.z > 0.0);

        // z points to the target
        let dir = (target - location).normalize();
        assert_relative_eq!(z.dot(dir), 1.0, epsilon = 1e-5);

        assert_eq!(pose.w_axis, location.extend(1.0));
        assert_eq!(pose.row(3), glam::DVec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_look_at_straight_down() {
        let pose = look_at(DVec3::new(0.0, 0.0, 2.0), DVec3::ZERO);
        assert_eq!(pose.x_axis.truncate(), DVec3::ZERO);
        assert_relative_eq!(pose.z_axis.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_sample_sphere() {
        assert!(sample_sphere(0).is_empty());

        let points = sample_sphere(100);
        assert_eq!(points.len(), 100);
        for p in points.iter() {
            assert_relative_eq!(p.length(), 1.0, epsilon = 1e-5);
        }
        assert_relative_eq!(points[0].z, 0.99);
        assert_relative_eq!(points[99].z, -0.99, epsilon = 1e-5);
        assert!(points.windows(2).all(|w| w[0].z > w[1].z));
    }
}
