use approx::assert_relative_eq;
use cricket_charts::VizError;
use cricket_charts::charts::{ChartLayout, bind_over_skyline};
use cricket_charts::core::{BandScale, LinearScale, QuantileScale, Viewport};
use cricket_charts::interaction::SelectionState;
use cricket_charts::render::{
    CirclePrimitive, Color, LinePrimitive, NullRenderer, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

#[test]
fn layouts_scale_design_units_by_height() {
    let over = ChartLayout::over_chart();
    assert_relative_eq!(over.units(450.0), 280.0);
    assert_relative_eq!(over.width_px(), 720.0 * 280.0 / 450.0);

    let partnership = ChartLayout::partnership_chart();
    assert_relative_eq!(partnership.units(350.0), 280.0);
    assert_relative_eq!(partnership.width_px(), 560.0 * 0.8);

    let tall = ChartLayout::over_chart().with_height(450.0);
    assert_relative_eq!(tall.units(12.0), 12.0);
    assert_eq!(tall.viewport(), Viewport::new(720.0, 450.0));
    assert_eq!(ChartLayout::default(), over);
}

#[test]
fn layout_json_fills_missing_fields_with_defaults() {
    let layout = ChartLayout::from_json_str(r#"{ "height_px": 360.0, "dimmed_opacity": 0.35 }"#)
        .expect("partial layout");

    assert_relative_eq!(layout.height_px, 360.0);
    assert_relative_eq!(layout.dimmed_opacity, 0.35);
    assert_relative_eq!(layout.design_height, 450.0);
    assert_eq!(layout.over_count, 50);
    assert_relative_eq!(layout.faded_opacity, 0.1);

    let json = layout.to_json_pretty().expect("serialize");
    let restored = ChartLayout::from_json_str(&json).expect("restore");
    assert_eq!(restored, layout);
}

#[test]
fn invalid_layouts_are_rejected() {
    for json in [
        r#"{ "height_px": 0.0 }"#,
        r#"{ "over_count": 0 }"#,
        r#"{ "dimmed_opacity": 1.5 }"#,
        r#"{ "faded_opacity": -0.1 }"#,
        r#"{ "height_px": "tall" }"#,
    ] {
        let error = ChartLayout::from_json_str(json).expect_err(json);
        assert!(matches!(error, VizError::InvalidData(_)), "{json}");
    }

    let layout = ChartLayout::over_chart().with_faded_opacity(2.0);
    let error = bind_over_skyline(&[], &SelectionState::new(), &layout).expect_err("bad layout");
    assert!(matches!(error, VizError::InvalidData(_)));
}

#[test]
fn band_scale_supports_reversed_ranges_and_padding() {
    let forward = BandScale::new(4, (0.0, 100.0)).expect("forward");
    assert_relative_eq!(forward.bandwidth(), 25.0);
    assert_eq!(forward.band(0), Some(0.0));
    assert_eq!(forward.band(3), Some(75.0));
    assert_eq!(forward.band(4), None);
    assert_eq!(forward.center(1), Some(37.5));

    let reversed = BandScale::new(4, (100.0, 0.0)).expect("reversed");
    assert_eq!(reversed.band(0), Some(75.0));
    assert_eq!(reversed.band(3), Some(0.0));

    let padded = BandScale::with_padding(2, (0.0, 95.0), 0.1).expect("padded");
    assert_relative_eq!(padded.step(), 50.0);
    assert_relative_eq!(padded.bandwidth(), 45.0);

    assert!(BandScale::new(0, (0.0, 1.0)).is_err());
    assert!(BandScale::with_padding(2, (0.0, 1.0), 1.0).is_err());
}

#[test]
fn linear_scale_maps_and_inverts() {
    let scale = LinearScale::new((0.0, 200.0), (400.0, 0.0)).expect("scale");
    assert_relative_eq!(scale.map(50.0), 300.0);
    assert_relative_eq!(scale.invert(300.0), 50.0);
    assert_eq!(scale.domain(), (0.0, 200.0));

    assert!(LinearScale::new((1.0, 1.0), (0.0, 1.0)).is_err());
    assert!(LinearScale::new((0.0, f64::NAN), (0.0, 1.0)).is_err());
}

#[test]
fn quantile_scale_bins_are_ordered() {
    let scale = QuantileScale::new(&[0.0, 70.0], 7).expect("scale");
    assert_eq!(scale.bins(), 7);
    assert_eq!(scale.bin(0.0), 0);
    assert_eq!(scale.bin(35.0), 3);
    assert_eq!(scale.bin(70.0), 6);
    assert_eq!(scale.bin(500.0), 6);

    assert!(QuantileScale::new(&[], 7).is_err());
    assert!(QuantileScale::new(&[1.0], 0).is_err());
}

#[test]
fn colors_parse_and_format_hex() {
    let color = Color::from_hex("#43A2CA").expect("hex");
    assert_eq!(color, Color::rgb8(0x43, 0xA2, 0xCA));
    assert_eq!(color.to_hex(), "#43A2CA");
    assert_eq!(Color::from_hex("0868ac").expect("bare hex").to_hex(), "#0868AC");

    assert!(Color::from_hex("#12345").is_err());
    assert!(Color::from_hex("#GGGGGG").is_err());
}

#[test]
fn frame_validation_rejects_bad_primitives() {
    let viewport = Viewport::new(100.0, 100.0);
    let black = Color::rgb8(0, 0, 0);

    let frame = RenderFrame::new(viewport)
        .with_rect(RectPrimitive::new(0.0, 0.0, 10.0, 10.0, black))
        .with_line(LinePrimitive::new(0.0, 0.0, 10.0, 10.0, 1.0, black))
        .with_circle(CirclePrimitive::new(5.0, 5.0, 2.0, black))
        .with_text(TextPrimitive::new("5", 1.0, 1.0, 12.0, black, TextHAlign::Left));
    frame.validate().expect("valid frame");
    assert_eq!(frame.primitive_count(), 4);
    assert!(!frame.is_empty());

    let negative = RenderFrame::new(viewport)
        .with_rect(RectPrimitive::new(0.0, 0.0, -1.0, 10.0, black));
    assert!(negative.validate().is_err());

    let faded = RenderFrame::new(viewport)
        .with_circle(CirclePrimitive::new(5.0, 5.0, 2.0, black).with_opacity(1.2));
    assert!(faded.validate().is_err());

    let blank = RenderFrame::new(viewport)
        .with_text(TextPrimitive::new("", 1.0, 1.0, 12.0, black, TextHAlign::Left));
    assert!(blank.validate().is_err());

    let mut renderer = NullRenderer::default();
    assert!(renderer.render(&RenderFrame::new(Viewport::new(0.0, 10.0))).is_err());
    assert_eq!(renderer.frames_rendered, 0);
    assert_eq!(renderer.last_viewport, None);

    renderer.render(&frame).expect("render valid frame");
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_viewport, Some(viewport));
    assert_eq!(renderer.last_circle_count, 1);
}

#[cfg(not(feature = "telemetry"))]
#[test]
fn tracing_setup_is_a_no_op_without_the_telemetry_feature() {
    assert!(!cricket_charts::telemetry::init_default_tracing());
    assert!(!cricket_charts::telemetry::init_tracing_with_filter("cricket_charts=debug"));
}
