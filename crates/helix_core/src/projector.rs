use nalgebra::{Matrix4, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// Render-surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// A projected point in CSS pixel coordinates, origin at the top-left.
///
/// `behind` is set when the point sits at or behind the camera plane; its
/// pixel coordinates are then mirrored/off-screen and callers should clip
/// or ignore them rather than place a tooltip there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPos {
    pub left: f64,
    pub top: f64,
    pub behind: bool,
}

/// Projects a world-space point to pixel coordinates.
///
/// `view_projection` is the camera's combined view-projection transform,
/// passed explicitly by the rendering collaborator each call; the core
/// holds no camera state. The homogeneous result is divided through to NDC
/// and mapped so NDC (-1, -1) lands at the bottom-left of the viewport.
pub fn project_to_screen(
    point: &Vector3<f64>,
    view_projection: &Matrix4<f64>,
    viewport: &Viewport,
) -> ScreenPos {
    let clip: Vector4<f64> = view_projection * Vector4::new(point.x, point.y, point.z, 1.0);
    let inv_w = if clip.w != 0.0 { 1.0 / clip.w } else { 0.0 };
    let ndc_x = clip.x * inv_w;
    let ndc_y = clip.y * inv_w;
    ScreenPos {
        left: (ndc_x + 1.0) / 2.0 * viewport.width,
        top: (1.0 - (ndc_y + 1.0) / 2.0) * viewport.height,
        behind: clip.w <= 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn identity_transform_centers_the_origin() {
        let pos = project_to_screen(&Vector3::zeros(), &Matrix4::identity(), &VIEWPORT);

        assert_eq!(pos.left, 400.0);
        assert_eq!(pos.top, 300.0);
        assert!(!pos.behind);
    }

    #[test]
    fn ndc_corners_map_to_viewport_corners() {
        let top_right = project_to_screen(
            &Vector3::new(1.0, 1.0, 0.0),
            &Matrix4::identity(),
            &VIEWPORT,
        );
        assert_eq!(top_right.left, 800.0);
        assert_eq!(top_right.top, 0.0);

        let bottom_left = project_to_screen(
            &Vector3::new(-1.0, -1.0, 0.0),
            &Matrix4::identity(),
            &VIEWPORT,
        );
        assert_eq!(bottom_left.left, 0.0);
        assert_eq!(bottom_left.top, 600.0);
    }

    fn camera_at_z(eye_z: f64) -> Matrix4<f64> {
        let projection = Matrix4::new_perspective(4.0 / 3.0, 45f64.to_radians(), 0.01, 100.0);
        let view = Matrix4::look_at_rh(
            &Point3::new(0.0, 0.0, eye_z),
            &Point3::origin(),
            &Vector3::y(),
        );
        projection * view
    }

    #[test]
    fn point_on_the_view_axis_projects_to_center() {
        let vp = camera_at_z(2.0);

        let pos = project_to_screen(&Vector3::zeros(), &vp, &VIEWPORT);

        assert!((pos.left - 400.0).abs() < 1e-9);
        assert!((pos.top - 300.0).abs() < 1e-9);
        assert!(!pos.behind);
    }

    #[test]
    fn point_above_axis_lands_in_upper_half() {
        let vp = camera_at_z(2.0);

        let pos = project_to_screen(&Vector3::new(0.0, 0.5, 0.0), &vp, &VIEWPORT);

        assert!(pos.top < 300.0, "expected upper half, got top {}", pos.top);
        assert!((pos.left - 400.0).abs() < 1e-9);
    }

    #[test]
    fn point_behind_the_camera_is_flagged() {
        let vp = camera_at_z(2.0);

        let pos = project_to_screen(&Vector3::new(0.0, 0.0, 5.0), &vp, &VIEWPORT);

        assert!(pos.behind);
    }
}
