use super::*;

#[test]
fn style_bits_combine() {
    let bi = FontStyle::BOLD | FontStyle::ITALIC;
    assert!(bi.is_bold());
    assert!(bi.is_italic());
    assert!(!FontStyle::PLAIN.is_bold());
    assert!(!FontStyle::BOLD.is_italic());
}

#[test]
fn descriptor_defaults_follow_field_conventions() {
    let d = FontDescriptor::default();
    assert_eq!(d.name, "sans-serif");
    assert_eq!(d.style, FontStyle::PLAIN);
    assert_eq!(d.size, 20.0);
    assert_eq!((d.left, d.right, d.top, d.bottom), (0, 0, 0, 0));
}

#[test]
fn with_size_copies_everything_else() {
    let base = FontDescriptor::new("Courier", FontStyle::BOLD, 24.0).with_padding(1, 2, 3, 4);
    let smaller = base.with_size(12.0);
    assert_eq!(smaller.size, 12.0);
    assert_eq!(base.size, 24.0);
    assert_eq!(smaller.with_size(24.0), base);
}

#[test]
fn descriptor_equality_uses_size_bits() {
    use std::collections::HashSet;

    let a = FontDescriptor::new("x", FontStyle::PLAIN, 10.0);
    let b = FontDescriptor::new("x", FontStyle::PLAIN, 10.0);
    let c = FontDescriptor::new("x", FontStyle::PLAIN, 10.5);
    let set: HashSet<_> = [a.clone(), b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
    assert!(set.contains(&a));
}

#[test]
fn descriptor_deserializes_with_defaults() {
    let d: FontDescriptor = serde_json::from_str(r#"{"name":"Mono","style":3}"#).unwrap();
    assert_eq!(d.name, "Mono");
    assert!(d.style.is_bold() && d.style.is_italic());
    assert_eq!(d.size, 20.0);
}

#[test]
fn line_height_rounds_up() {
    let m = LineMetrics {
        ascent: 8.2,
        descent: 2.1,
        leading: 0.0,
    };
    assert_eq!(m.height_px(), 11);
}

#[test]
fn outline_face_rejects_non_font_bytes() {
    assert!(OutlineFace::from_bytes(b"definitely not a font".to_vec(), 0).is_err());
}
