use super::*;

const ROW: &str = r#"{
  "root": {
    "style": {
      "flex_direction": "row",
      "width": 300,
      "height": 50,
      "padding": { "all": 5 },
      "justify_content": "space-between"
    },
    "children": [
      { "style": { "width": 40, "margin": { "start": 2 } } },
      { "measure": { "width": 60, "height": 20 } },
      { "style": { "flex": 1, "max_width": 30 } }
    ]
  }
}"#;

#[test]
fn parses_and_builds_through_setters() {
    let scene = Scene::from_json_str(ROW).unwrap();
    scene.validate().unwrap();

    let mut tree = LayoutTree::new();
    let root = scene.build(&mut tree).unwrap();
    assert_eq!(tree.len(), 4);
    assert!(tree.is_dirty(root).unwrap());

    let style = tree.style(root).unwrap();
    assert_eq!(style.flex_direction, FlexDirection::Row);
    assert_eq!(style.justify_content, Justify::SpaceBetween);
    assert_eq!(style.padding.get(Edge::Right), 5.0);

    let measured = tree.child_at(root, 1).unwrap();
    assert!(tree.has_measure(measured).unwrap());
    let first = tree.child_at(root, 0).unwrap();
    assert_eq!(tree.style(first).unwrap().margin.get(Edge::Start), 2.0);
}

#[test]
fn built_scene_lays_out() {
    let scene = Scene::from_json_str(ROW).unwrap();
    let mut tree = LayoutTree::new();
    let root = scene.build(&mut tree).unwrap();
    tree.calculate_layout(root).unwrap();

    let widths: Vec<f32> = tree
        .children(root)
        .unwrap()
        .iter()
        .map(|&c| tree.layout(c).unwrap().width)
        .collect();
    assert_eq!(widths, [40.0, 60.0, 30.0]);
}

#[test]
fn unknown_fields_and_bad_enums_are_rejected() {
    let err = Scene::from_json_str(r#"{"root": {"style": {"colour": "red"}}}"#).unwrap_err();
    assert!(matches!(err, LayoutError::Scene(_)));
    assert!(!err.is_precondition());

    let err =
        Scene::from_json_str(r#"{"root": {"style": {"flex_direction": "diagonal"}}}"#).unwrap_err();
    assert!(err.to_string().starts_with("scene error:"));
}

#[test]
fn validate_rejects_negative_sizes_and_unmeasurable_nodes() {
    let scene = Scene::from_json_str(
        r#"{"root": {"children": [{"style": {"width": -4}}]}}"#,
    )
    .unwrap();
    let msg = scene.validate().unwrap_err().to_string();
    assert!(msg.contains("root.children[0]"), "{msg}");
    assert!(msg.contains("width"), "{msg}");

    let scene = Scene::from_json_str(r#"{"root": {"content_sized": true}}"#).unwrap();
    assert!(scene.validate().is_err());

    let scene = Scene::from_json_str(
        r#"{"root": {"content_sized": true, "style": {"width": 1, "height": 1}}}"#,
    )
    .unwrap();
    scene.validate().unwrap();
}

#[test]
fn spacing_entries_follow_slot_order() {
    let spec = SpacingSpec {
        all: Some(1.0),
        left: Some(2.0),
        end: Some(3.0),
        ..SpacingSpec::default()
    };
    let entries: Vec<_> = spec.entries().collect();
    assert_eq!(
        entries,
        [(Edge::Left, 2.0), (Edge::End, 3.0), (Edge::All, 1.0)]
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Scene::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, LayoutError::Other(_)));
    assert!(!err.is_precondition());
    assert!(err.to_string().contains("here.json"), "{err}");
    let io = match &err {
        LayoutError::Other(inner) => inner.root_cause().downcast_ref::<std::io::Error>(),
        _ => None,
    };
    assert_eq!(io.map(std::io::Error::kind), Some(std::io::ErrorKind::NotFound));
}

#[test]
fn file_with_bad_json_is_a_scene_error() {
    let dir = std::path::PathBuf::from("target").join("scene_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("truncated.json");
    std::fs::write(&path, r#"{"root": {"#).unwrap();
    let err = Scene::from_path(&path).unwrap_err();
    assert!(matches!(err, LayoutError::Scene(_)));
}
