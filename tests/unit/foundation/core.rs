use super::*;

#[test]
fn default_canvas_center_is_300_300() {
    assert_eq!(Canvas::default().center(), PathPoint::new(300, 300));
}

#[test]
fn odd_canvas_center_rounds_down() {
    let c = Canvas::new(7, 5).unwrap();
    assert_eq!(c.center(), PathPoint::new(3, 2));
}

#[test]
fn zero_sized_canvas_is_rejected() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
}

#[test]
fn offset_saturates_instead_of_wrapping() {
    let p = PathPoint::new(i32::MAX - 1, 0).offset(10, -3);
    assert_eq!(p, PathPoint::new(i32::MAX, -3));
}

#[test]
fn to_point_is_exact() {
    assert_eq!(PathPoint::new(-4, 9).to_point(), Point::new(-4.0, 9.0));
}
