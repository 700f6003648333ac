use super::*;
use crate::{
    cartridge::request::SignaturePayload,
    config::request::{ConfigurationRequest, FieldAppearance},
    foundation::color::Color,
    testing::{block_fonts, solid},
};

fn assembler() -> CartridgeAssembler {
    CartridgeAssembler::new(block_fonts())
}

fn scenario() -> CartridgeRequest {
    CartridgeRequest::new("ABC123")
        .with_signature(SignaturePayload::Text("/s/ John Doe".into()))
        .with_trace(["step1", "step2"])
        .with_date("2024-01-01")
}

fn only(appearance: FieldAppearance) -> ConfigurationRequest {
    ConfigurationRequest {
        appearance,
        ..ConfigurationRequest::default()
    }
}

fn png(bmp: &Bitmap) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    bmp.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn is_dark(px: image::Rgba<u8>) -> bool {
    px.0[0] < 128 && px.0[1] < 128 && px.0[2] < 128 && px.0[3] > 0
}

#[test]
fn fields_stack_to_the_requested_height() {
    let mut req = scenario();
    let c = assembler().compose(&mut req, Some(400), Some(200)).unwrap();

    assert_eq!(
        c.layout,
        FieldLayout {
            session: 20,
            signature: 120,
            trace: 40,
            date: 20,
        }
    );
    assert_eq!(c.bitmap.dimensions(), (400, 200));
    assert_eq!(c.layout.total(), c.bitmap.height());
}

#[test]
fn fields_are_drawn_in_fixed_order() {
    let mut req = scenario();
    req.configuration = only(FieldAppearance {
        border: false,
        ..FieldAppearance::FULL
    });
    let c = assembler().compose(&mut req, Some(400), Some(200)).unwrap();
    let bmp = &c.bitmap;

    // first glyph of the session line, then of each trace line, then of the date
    assert!(is_dark(*bmp.get_pixel(5, 10)));
    assert!(is_dark(*bmp.get_pixel(5, 150)));
    assert!(is_dark(*bmp.get_pixel(5, 170)));
    assert!(is_dark(*bmp.get_pixel(5, 190)));
    assert_eq!(bmp.get_pixel(9, 150).0, [255, 255, 255, 255]);
    assert_eq!(bmp.get_pixel(10, 80).0, [255, 255, 255, 255]);

    // signature text is centred in the 400x120 region below the session line
    let sig_row: Vec<u32> = (0..400)
        .filter(|&x| is_dark(*bmp.get_pixel(x, 20 + 60)))
        .collect();
    let (first, last) = (sig_row[0], sig_row[sig_row.len() - 1]);
    assert!(first > 100 && last < 300, "{first}..{last}");
}

#[test]
fn border_is_drawn_over_the_fields() {
    let mut req = scenario();
    let c = assembler().compose(&mut req, Some(400), Some(200)).unwrap();
    assert!(is_dark(*c.bitmap.get_pixel(10, 80)));
    assert!(is_dark(*c.bitmap.get_pixel(200, 133)));
}

#[test]
fn build_names_and_encodes_the_resource() {
    let resp = assembler()
        .build_sized(scenario(), Some(400), Some(200))
        .unwrap();
    assert_eq!(resp.resource.filename(), "ABC123.png");
    assert_eq!(resp.content_type, "image/png");
    assert!(!resp.resource.is_empty());
    assert_eq!(resp.request.session, "ABC123");

    let decoded = image::load_from_memory(resp.resource.bytes()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (400, 200));
}

#[test]
fn configured_size_and_format_are_used() {
    let mut req = scenario();
    req.configuration.width = Some(300);
    req.configuration.height = Some(150);
    req.configuration.image_format = crate::OutputFormat::Jpeg;
    let resp = assembler().build(req).unwrap();
    assert_eq!(resp.resource.filename(), "ABC123.jpg");
    assert_eq!(resp.content_type, "image/jpeg");
    let decoded = image::load_from_memory(resp.resource.bytes()).unwrap();
    assert_eq!(decoded.width(), 300);
}

#[test]
fn missing_size_is_configuration_error() {
    let err = assembler().build(scenario()).unwrap_err();
    assert!(matches!(err, CartridgeError::Configuration(_)), "{err}");
}

#[test]
fn enabled_signature_without_payload_is_content_error() {
    let mut req = scenario();
    req.signature = None;
    let err = assembler().compose(&mut req, Some(400), Some(200)).unwrap_err();
    assert!(matches!(err, CartridgeError::Content(_)), "{err}");
}

#[test]
fn disabled_fields_take_no_space() {
    let mut req = scenario();
    req.signature = None;
    req.configuration = only(FieldAppearance {
        session: true,
        date: true,
        ..FieldAppearance::NONE
    });
    let c = assembler().compose(&mut req, Some(400), Some(200)).unwrap();
    assert_eq!(c.layout.signature, 0);
    assert_eq!(c.layout.trace, 0);
    assert_eq!(c.bitmap.height(), 40);
}

#[test]
fn nothing_enabled_is_configuration_error() {
    let mut req = scenario();
    req.configuration = only(FieldAppearance::NONE);
    assert!(matches!(
        assembler().compose(&mut req, Some(400), Some(200)),
        Err(CartridgeError::Configuration(_))
    ));
}

#[test]
fn exhausted_height_leaves_an_empty_signature() {
    let mut req = scenario();
    let c = assembler().compose(&mut req, Some(400), Some(60)).unwrap();
    assert_eq!(c.layout.signature, 0);
    assert_eq!(c.layout.total(), c.bitmap.height());
}

#[test]
fn small_signature_image_is_cropped_and_centred() {
    let mut img = solid(40, 40, Color::WHITE);
    for y in 10..30 {
        for x in 10..30 {
            img.put_pixel(x, y, Color::rgb(255, 0, 0).to_pixel());
        }
    }
    let mut req = CartridgeRequest::new("IMG")
        .with_signature(SignaturePayload::Bytes(png(&img)))
        .with_configuration(only(FieldAppearance {
            signature: true,
            ..FieldAppearance::NONE
        }));
    let c = assembler().compose(&mut req, Some(100), Some(50)).unwrap();

    assert_eq!(c.bitmap.dimensions(), (100, 50));
    // 20x20 square centred at (40, 15)
    assert_eq!(c.bitmap.get_pixel(40, 15).0, [255, 0, 0, 255]);
    assert_eq!(c.bitmap.get_pixel(59, 34).0, [255, 0, 0, 255]);
    assert_eq!(c.bitmap.get_pixel(39, 15).0, [255, 255, 255, 255]);
    assert_eq!(c.bitmap.get_pixel(60, 34).0, [255, 255, 255, 255]);
}

#[test]
fn large_signature_image_is_scaled_down() {
    let img = solid(300, 100, Color::rgb(255, 0, 0));
    let mut req = CartridgeRequest::new("IMG")
        .with_signature(SignaturePayload::Bytes(png(&img)))
        .with_configuration(only(FieldAppearance {
            signature: true,
            ..FieldAppearance::NONE
        }));
    let c = assembler().compose(&mut req, Some(100), Some(50)).unwrap();

    // scaled to 100x33 and centred vertically
    assert_eq!(c.bitmap.get_pixel(50, 25).0, [255, 0, 0, 255]);
    assert_eq!(c.bitmap.get_pixel(50, 2).0, [255, 255, 255, 255]);
    assert_eq!(c.bitmap.get_pixel(50, 47).0, [255, 255, 255, 255]);
}

#[test]
fn blank_signature_image_is_content_error() {
    let mut req = CartridgeRequest::new("IMG")
        .with_signature(SignaturePayload::Bytes(png(&solid(10, 10, Color::WHITE))))
        .with_configuration(only(FieldAppearance {
            signature: true,
            ..FieldAppearance::NONE
        }));
    let err = assembler().compose(&mut req, Some(100), Some(50)).unwrap_err();
    assert!(matches!(err, CartridgeError::Content(_)), "{err}");
}

#[test]
fn transparency_key_is_applied_last() {
    let mut req = scenario();
    req.configuration.transparent_color = Some("white".into());
    let c = assembler().compose(&mut req, Some(400), Some(200)).unwrap();
    assert_eq!(c.bitmap.get_pixel(399, 199).0[3], 0);
    assert_eq!(c.bitmap.get_pixel(200, 60).0[3], 0);
    assert!(is_dark(*c.bitmap.get_pixel(5, 150)));
}

#[test]
fn configuration_is_resolved_once() {
    let a = assembler();
    a.build_sized(scenario(), Some(400), Some(200)).unwrap();
    a.build_sized(scenario(), Some(300), Some(200)).unwrap();
    assert_eq!(a.configurations().len(), 1);
    assert_eq!(a.fonts().face_count(), 1);
}

#[test]
fn oversized_padding_is_configuration_error() {
    let mut req = scenario();
    req.configuration.trace_font = req
        .configuration
        .trace_font
        .clone()
        .with_padding(0, 0, u32::MAX - 5, 10);
    let err = assembler()
        .build_sized(req, Some(400), Some(200))
        .unwrap_err();
    assert!(matches!(err, CartridgeError::Configuration(_)), "{err}");
}

#[test]
fn layout_total_detects_overflow() {
    let layout = FieldLayout {
        session: u32::MAX,
        signature: 1,
        trace: 0,
        date: 0,
    };
    assert_eq!(layout.checked_total(), None);
    assert_eq!(layout.total(), u32::MAX);
    assert_eq!(FieldLayout::default().checked_total(), Some(0));
}

#[test]
fn canvas_wider_than_one_tile_is_rendered() {
    let mut req = scenario();
    let c = assembler().compose(&mut req, Some(70_000), Some(50)).unwrap();
    assert_eq!(c.bitmap.width(), 70_000);
    assert_eq!(c.layout.total(), c.bitmap.height());
    // the bottom rule of the border reaches the far right
    let far = (0..c.bitmap.height()).any(|y| c.bitmap.get_pixel(69_990, y).0[2] < 128);
    assert!(far);
}
