use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LayoutError::child_already_parented("x")
            .to_string()
            .contains("child already has a parent:")
    );
    assert!(
        LayoutError::unseen_layout("x")
            .to_string()
            .contains("unseen layout:")
    );
    assert!(
        LayoutError::no_pending_layout("x")
            .to_string()
            .contains("no pending layout:")
    );
    assert!(
        LayoutError::missing_measure("x")
            .to_string()
            .contains("missing measure:")
    );
    assert!(LayoutError::scene("x").to_string().contains("scene error:"));
}

#[test]
fn precondition_classification() {
    assert!(LayoutError::cycle("x").is_precondition());
    assert!(LayoutError::invalid_measurement("x").is_precondition());
    assert!(!LayoutError::scene("x").is_precondition());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LayoutError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_precondition());
}
