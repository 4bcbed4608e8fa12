use super::*;

#[test]
fn capture_mirrors_the_tree() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.set_width(root, 50.0).unwrap();
    let a = tree.new_node();
    tree.set_height(a, 10.0).unwrap();
    tree.append_child(root, a).unwrap();
    let b = tree.new_node();
    tree.set_height(b, 5.0).unwrap();
    tree.append_child(root, b).unwrap();
    tree.calculate_layout(root).unwrap();

    let dump = LayoutDump::capture(&tree, root).unwrap();
    assert_eq!(dump.node_count(), 3);
    assert_eq!((dump.width, dump.height), (50.0, 15.0));
    assert_eq!(dump.direction, Direction::Ltr);
    assert_eq!(dump.children[1].y, 10.0);
    assert_eq!(dump.children[1].width, 50.0);
}

#[test]
fn leaves_serialize_without_children() {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.calculate_layout(root).unwrap();

    let json = serde_json::to_string(&LayoutDump::capture(&tree, root).unwrap()).unwrap();
    assert_eq!(
        json,
        r#"{"x":0.0,"y":0.0,"width":0.0,"height":0.0,"direction":"ltr","line":0}"#
    );
    let back: LayoutDump = serde_json::from_str(&json).unwrap();
    assert!(back.children.is_empty());
}
