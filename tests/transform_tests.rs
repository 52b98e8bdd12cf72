use sprite_pick::transform::{model_matrix, ndc_to_pixel, Mat4};
use sprite_pick::utils::{Position, Size};

const EPS: f32 = 1e-5;

fn assert_close(actual: f32, expected: f32, what: &str) {
    assert!(
        (actual - expected).abs() < EPS,
        "{what}: expected {expected}, got {actual}"
    );
}

fn proj_view() -> Mat4 {
    let proj = Mat4::orthographic(0.0, 200.0, 0.0, 200.0, 1.0, -1.0);
    let view = Mat4::look_at([0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
    proj * view
}

#[test]
fn world_center_maps_to_ndc_origin() {
    let ndc = proj_view().transform_point([100.0, 100.0, 0.0]);
    assert_close(ndc[0], 0.0, "ndc x");
    assert_close(ndc[1], 0.0, "ndc y");
}

#[test]
fn world_origin_maps_to_bottom_left() {
    let ndc = proj_view().transform_point([0.0, 0.0, 0.0]);
    assert_close(ndc[0], -1.0, "ndc x");
    assert_close(ndc[1], -1.0, "ndc y");
}

#[test]
fn ndc_depth_stays_in_clip_range() {
    let ndc = proj_view().transform_point([100.0, 100.0, 0.0]);
    assert!(
        (0.0..=1.0).contains(&ndc[2]),
        "depth {} outside wgpu clip range",
        ndc[2]
    );
}

#[test]
fn look_at_from_positive_z_pushes_points_back() {
    let view = Mat4::look_at([0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
    let p = view.transform_point([0.0, 0.0, 0.0]);
    assert_close(p[0], 0.0, "view x");
    assert_close(p[1], 0.0, "view y");
    assert_close(p[2], -1.0, "view z");
}

#[test]
fn rotation_z_rotates_counterclockwise() {
    let rot = Mat4::rotation_z(30f32.to_radians());
    let p = rot.transform_point([1.0, 0.0, 0.0]);
    assert_close(p[0], 30f32.to_radians().cos(), "rotated x");
    assert_close(p[1], 30f32.to_radians().sin(), "rotated y");
}

#[test]
fn model_matrix_places_quad_corners() {
    let model = model_matrix(
        Position { x: 100.0, y: 100.0 },
        Size {
            width: 114.0,
            height: 38.0,
        },
        0.0,
    );
    let top_right = model.transform_point([0.5, 0.5, 0.0]);
    assert_close(top_right[0], 157.0, "top right x");
    assert_close(top_right[1], 119.0, "top right y");
    let bottom_left = model.transform_point([-0.5, -0.5, 0.0]);
    assert_close(bottom_left[0], 43.0, "bottom left x");
    assert_close(bottom_left[1], 81.0, "bottom left y");
}

#[test]
fn button_center_lands_on_window_center_pixel() {
    let mvp = proj_view()
        * model_matrix(
            Position { x: 100.0, y: 100.0 },
            Size {
                width: 114.0,
                height: 38.0,
            },
            30.0,
        );
    // The quad center is rotation-invariant.
    let ndc = mvp.transform_point([0.0, 0.0, 0.0]);
    let pixel = ndc_to_pixel([ndc[0], ndc[1]], 350.0, 350.0);
    assert_close(pixel.x, 175.0, "pixel x");
    assert_close(pixel.y, 175.0, "pixel y");
}

#[test]
fn ndc_to_pixel_flips_y() {
    let top_left = ndc_to_pixel([-1.0, 1.0], 350.0, 350.0);
    assert_close(top_left.x, 0.0, "top left x");
    assert_close(top_left.y, 0.0, "top left y");
    let bottom_right = ndc_to_pixel([1.0, -1.0], 350.0, 350.0);
    assert_close(bottom_right.x, 350.0, "bottom right x");
    assert_close(bottom_right.y, 350.0, "bottom right y");
}
