use super::*;

#[test]
fn defaults_match_plain_black_on_white() {
    let r = ConfigurationRequest::default();
    assert_eq!(r.background_color, "white");
    assert_eq!(r.foreground_color, "black");
    assert!(r.transparent_color.is_none());
    assert_eq!(r.image_format, OutputFormat::Png);
    assert_eq!(r.appearance, FieldAppearance::FULL);
    assert!(r.hinting);
    assert_eq!(r.session_font, FontDescriptor::default());
}

#[test]
fn empty_json_is_the_default_request() {
    let r: ConfigurationRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(r, ConfigurationRequest::default());
}

#[test]
fn partial_appearance_disables_missing_flags() {
    let r: ConfigurationRequest =
        serde_json::from_str(r#"{"appearance":{"session":true,"date":true}}"#).unwrap();
    assert!(r.appearance.has_session() && r.appearance.has_date());
    assert!(!r.appearance.has_signature());
    assert!(!r.appearance.has_trace());
    assert!(!r.appearance.has_border());
}

#[test]
fn output_format_names_and_aliases() {
    let f: OutputFormat = serde_json::from_str(r#""JPG""#).unwrap();
    assert_eq!(f, OutputFormat::Jpeg);
    assert_eq!(f.extension(), "jpg");
    assert!(!f.supports_alpha());
    assert_eq!(serde_json::to_string(&OutputFormat::Tiff).unwrap(), r#""tiff""#);
    assert_eq!(OutputFormat::Png.image_format(), image::ImageFormat::Png);
    assert!(serde_json::from_str::<OutputFormat>(r#""webp""#).is_err());
}

#[test]
fn equal_requests_hash_equal() {
    use std::collections::HashSet;

    let a = ConfigurationRequest {
        width: Some(400),
        ..ConfigurationRequest::default()
    };
    let b = a.clone();
    let c = ConfigurationRequest {
        width: Some(401),
        ..a.clone()
    };
    let set: HashSet<_> = [a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn request_round_trips_through_json() {
    let r = ConfigurationRequest {
        transparent_color: Some("white".into()),
        session_label: "Session: ".into(),
        height: Some(200),
        ..ConfigurationRequest::default()
    };
    let json = serde_json::to_string(&r).unwrap();
    let back: ConfigurationRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, r);
}
