use sprite_pick::atlas::{AtlasManifest, QUAD_POSITIONS};

const SAMPLE: &str = r#"{
  "frames": {
    "button-normal.png": { "frame": { "x": 0, "y": 0, "w": 114, "h": 38 } },
    "button-active.png": { "frame": { "x": 0, "y": 38, "w": 114, "h": 38 } }
  },
  "meta": {
    "image": "button.png",
    "size": { "w": 128, "h": 128 },
    "scale": "1"
  }
}"#;

#[test]
fn parses_meta_and_frames() {
    let manifest = AtlasManifest::from_json(SAMPLE).unwrap();
    assert_eq!(manifest.meta.size.w, 128.0);
    assert_eq!(manifest.meta.size.h, 128.0);
    let normal = manifest.frame("button-normal.png").unwrap();
    assert_eq!(normal.w, 114.0);
    assert_eq!(normal.h, 38.0);
    let active = manifest.frame("button-active.png").unwrap();
    assert_eq!(active.y, 38.0);
}

#[test]
fn missing_frame_is_an_error() {
    let manifest = AtlasManifest::from_json(SAMPLE).unwrap();
    assert!(manifest.frame("button-hover.png").is_err());
}

#[test]
fn malformed_manifest_is_an_error() {
    assert!(AtlasManifest::from_json("{ not json").is_err());
}

#[test]
fn frame_uvs_follow_strip_order() {
    let manifest = AtlasManifest::from_json(SAMPLE).unwrap();
    let uvs = manifest.frame_uvs("button-normal.png").unwrap();
    // bottom-left, bottom-right, top-left, top-right
    assert_eq!(uvs[0], [0.0, 38.0 / 128.0]);
    assert_eq!(uvs[1], [114.0 / 128.0, 38.0 / 128.0]);
    assert_eq!(uvs[2], [0.0, 0.0]);
    assert_eq!(uvs[3], [114.0 / 128.0, 0.0]);
}

#[test]
fn frame_uvs_stay_normalized() {
    let manifest = AtlasManifest::from_json(SAMPLE).unwrap();
    for name in ["button-normal.png", "button-active.png"] {
        for uv in manifest.frame_uvs(name).unwrap() {
            assert!((0.0..=1.0).contains(&uv[0]), "u out of range for {name}");
            assert!((0.0..=1.0).contains(&uv[1]), "v out of range for {name}");
        }
    }
}

#[test]
fn button_vertices_hold_both_frames_over_one_quad() {
    let manifest = AtlasManifest::from_json(SAMPLE).unwrap();
    let vertices = manifest
        .button_vertices("button-normal.png", "button-active.png")
        .unwrap();
    assert_eq!(vertices.len(), 8);

    // Both quads share the unit-quad positions.
    for i in 0..4 {
        assert_eq!(vertices[i].position, QUAD_POSITIONS[i]);
        assert_eq!(vertices[i + 4].position, QUAD_POSITIONS[i]);
    }

    // The second quad samples lower in the sheet than the first.
    let normal_v_top = vertices[2].tex_coords[1];
    let active_v_top = vertices[6].tex_coords[1];
    assert!(active_v_top > normal_v_top);
}

#[test]
fn shipped_manifest_loads() {
    let manifest = AtlasManifest::load("assets/textures/button.json").unwrap();
    assert!(manifest
        .button_vertices("button-normal.png", "button-active.png")
        .is_ok());
}
