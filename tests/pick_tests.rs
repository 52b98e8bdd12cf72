use sprite_pick::picking::{matches_pick_color, PICK_COLOR, PICK_COLOR_BYTES};

#[test]
fn sentinel_matches_exactly() {
    assert!(matches_pick_color([255, 0, 0, 255]));
}

#[test]
fn near_miss_does_not_match() {
    assert!(!matches_pick_color([254, 0, 0, 255]));
    assert!(!matches_pick_color([255, 1, 0, 255]));
    assert!(!matches_pick_color([255, 0, 1, 255]));
    assert!(!matches_pick_color([0, 0, 0, 255]), "clear color is a miss");
}

#[test]
fn alpha_is_ignored() {
    assert!(matches_pick_color([255, 0, 0, 0]));
}

#[test]
fn shader_color_and_readback_bytes_agree() {
    for (f, b) in PICK_COLOR.iter().zip(PICK_COLOR_BYTES) {
        assert_eq!((f * 255.0).round() as u8, b);
    }
}
