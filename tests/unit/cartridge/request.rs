use super::*;
use crate::foundation::color::Color;

fn png_bytes() -> Vec<u8> {
    let bmp = Bitmap::from_pixel(2, 3, Color::rgb(9, 8, 7).to_pixel());
    let mut out = std::io::Cursor::new(Vec::new());
    bmp.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn text_payload_splits_lines() {
    let mut p = SignaturePayload::Text("John Doe\r\nCEO\nACME".into());
    assert_eq!(
        p.resolve().unwrap(),
        SignatureContent::Lines(vec!["John Doe".into(), "CEO".into(), "ACME".into()])
    );
}

#[test]
fn bytes_and_stream_payloads_decode() {
    let mut bytes = SignaturePayload::Bytes(png_bytes());
    let SignatureContent::Image(img) = bytes.resolve().unwrap() else {
        panic!("expected image");
    };
    assert_eq!(img.dimensions(), (2, 3));

    let mut stream = SignaturePayload::Stream(Box::new(std::io::Cursor::new(png_bytes())));
    assert!(matches!(stream.resolve().unwrap(), SignatureContent::Image(_)));
}

#[test]
fn undecodable_bytes_are_content_error() {
    let err = SignaturePayload::Bytes(vec![1, 2, 3]).resolve().unwrap_err();
    assert!(matches!(err, CartridgeError::Content(_)), "{err}");
}

#[test]
fn unreadable_file_is_content_error() {
    let err = SignaturePayload::File("/definitely/not/here.png".into())
        .resolve()
        .unwrap_err();
    assert!(matches!(err, CartridgeError::Content(_)), "{err}");
    assert!(err.to_string().contains("here.png"));
}

#[test]
fn request_json_defaults() {
    let req: CartridgeRequest =
        serde_json::from_str(r#"{"session":"ABC123","signature":{"text":"J. Doe"}}"#).unwrap();
    assert_eq!(req.session, "ABC123");
    assert!(matches!(req.signature, Some(SignaturePayload::Text(_))));
    assert!(req.trace.is_empty());
    assert_eq!(req.configuration, ConfigurationRequest::default());
}

#[test]
fn builder_sets_fields() {
    let req = CartridgeRequest::new("S1")
        .with_trace(["a", "b"])
        .with_date("2024-01-01")
        .with_signature(SignaturePayload::Text("x".into()));
    assert_eq!(req.trace, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(req.date, "2024-01-01");
    assert_eq!(format!("{:?}", req.signature.unwrap()), "Text(\"x\")");
}

#[test]
fn resource_derives_content_type() {
    let r = ImageResource::new("ABC123.png", vec![1, 2]);
    assert_eq!(r.content_type(), "image/png");
    assert_eq!(r.filename(), "ABC123.png");
    assert_eq!(r.len(), 2);
    assert_eq!(r.into_bytes(), vec![1, 2]);
}
