use super::*;
use crate::{
    testing::block_fonts,
    text::font::FontStyle,
};

fn colors() -> FieldColors {
    FieldColors {
        background: Color::WHITE,
        transparent: None,
        foreground: Color::BLACK,
    }
}

fn block(size: f32) -> FontDescriptor {
    FontDescriptor::new("Block", FontStyle::PLAIN, size)
}

#[test]
fn unconstrained_fit_keeps_base_size() {
    let fonts = block_fonts();
    let solver = TextFitSolver::new(&fonts);
    let d = solver
        .fit(&["ABCDEFGHI"], &block(20.0), colors(), None, None)
        .unwrap();
    assert_eq!(d.descriptor.size, 20.0);
    assert_eq!(d.font.size(), 20.0);
    // nine chars plus the trailing space at 10 px each
    assert_eq!(d.width, 100);
    assert_eq!(d.height, 20);
    assert_eq!(fonts.variant_count(), 1);
}

#[test]
fn width_bound_shrinks_in_whole_points() {
    let fonts = block_fonts();
    let d = TextFitSolver::new(&fonts)
        .fit(&["ABCDEFGHI"], &block(20.0), colors(), Some(60), None)
        .unwrap();
    assert_eq!(d.descriptor.size, 12.0);
    assert_eq!(d.width, 60);
}

#[test]
fn height_bound_counts_padding_per_line() {
    let fonts = block_fonts();
    let desc = block(20.0).with_padding(0, 0, 2, 2);
    let d = TextFitSolver::new(&fonts)
        .fit(&["a", "b", "c"], &desc, colors(), None, Some(45))
        .unwrap();
    assert_eq!(d.descriptor.size, 11.0);
    assert_eq!(d.height, 45);
    assert_eq!((d.descriptor.top, d.descriptor.bottom), (2, 2));
}

#[test]
fn horizontal_padding_is_added_to_width() {
    let fonts = block_fonts();
    let desc = block(10.0).with_padding(3, 4, 0, 0);
    let d = TextFitSolver::new(&fonts)
        .fit(&["abc"], &desc, colors(), None, None)
        .unwrap();
    assert_eq!(d.width, 20 + 7);
}

#[test]
fn impossible_box_stops_at_minimum_size() {
    let fonts = block_fonts();
    let d = TextFitSolver::new(&fonts)
        .fit(&["ABCDEFGHI"], &block(20.0), colors(), Some(1), Some(1))
        .unwrap();
    assert_eq!(d.descriptor.size, MIN_FONT_SIZE);
    assert!(d.width > 1);
}

#[test]
fn fitted_size_grows_with_the_box() {
    let fonts = block_fonts();
    let solver = TextFitSolver::new(&fonts);
    let mut last = 0.0;
    for max_w in (10..=220).step_by(7) {
        let d = solver
            .fit(&["Signed by", "someone"], &block(24.0), colors(), Some(max_w), Some(80))
            .unwrap();
        assert!(d.descriptor.size >= last, "{max_w}: {} < {last}", d.descriptor.size);
        assert!(d.descriptor.size <= 24.0 && d.descriptor.size >= MIN_FONT_SIZE);
        if d.descriptor.size > MIN_FONT_SIZE {
            assert!(d.width <= max_w && d.height <= 80);
        }
        last = d.descriptor.size;
    }
}

#[test]
fn empty_block_is_one_padded_line_high() {
    let fonts = block_fonts();
    let desc = block(10.0).with_padding(5, 5, 1, 2);
    let d = TextFitSolver::new(&fonts)
        .fit::<&str>(&[], &desc, colors(), Some(100), Some(100))
        .unwrap();
    assert_eq!(d.width, 0);
    assert_eq!(d.height, 13);
}

#[test]
fn invalid_base_size_is_configuration_error() {
    let fonts = block_fonts();
    let err = TextFitSolver::new(&fonts)
        .fit(&["x"], &block(0.0), colors(), None, None)
        .unwrap_err();
    assert!(matches!(err, CartridgeError::Configuration(_)));
}

#[test]
fn background_transparency_check() {
    let mut c = colors();
    assert!(!c.background_is_transparent());
    c.transparent = Some(Color::WHITE);
    assert!(c.background_is_transparent());
}

#[test]
fn oversized_vertical_padding_is_configuration_error() {
    let fonts = block_fonts();
    let desc = block(20.0).with_padding(0, 0, u32::MAX - 5, 10);
    let err = TextFitSolver::new(&fonts)
        .fit(&["ABC123"], &desc, colors(), Some(400), Some(200))
        .unwrap_err();
    assert!(matches!(err, CartridgeError::Configuration(_)), "{err}");
}

#[test]
fn oversized_horizontal_padding_is_configuration_error() {
    let fonts = block_fonts();
    let desc = block(20.0).with_padding(u32::MAX, 1, 0, 0);
    assert!(matches!(
        TextFitSolver::new(&fonts).fit(&["a"], &desc, colors(), None, None),
        Err(CartridgeError::Configuration(_))
    ));
}

#[test]
fn line_count_overflow_is_configuration_error() {
    let fonts = block_fonts();
    let font = fonts.font("Block", FontStyle::PLAIN, 10.0).unwrap();
    let desc = block(10.0).with_padding(0, 0, u32::MAX / 2, 0);
    assert!(measure(&["a"], &font, &desc).is_ok());
    assert!(matches!(
        measure(&["a", "b"], &font, &desc),
        Err(CartridgeError::Configuration(_))
    ));
}
