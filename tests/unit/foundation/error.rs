use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PathVizError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PathVizError::parse("x").to_string().contains("parse error:"));
    assert!(PathVizError::render("x").to_string().contains("render error:"));
    assert!(PathVizError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn io_names_the_path() {
    let err = PathVizError::io("out/a.gif", std::io::Error::other("disk full"));
    let msg = err.to_string();
    assert!(msg.contains("out/a.gif"));
    assert!(msg.contains("disk full"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PathVizError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_io_and_other_are_fatal() {
    assert!(PathVizError::io("x", std::io::Error::other("e")).is_fatal());
    assert!(PathVizError::Other(anyhow::anyhow!("e")).is_fatal());
    assert!(!PathVizError::validation("e").is_fatal());
    assert!(!PathVizError::parse("e").is_fatal());
    assert!(!PathVizError::render("e").is_fatal());
    assert!(!PathVizError::encode("e").is_fatal());
}
