use approx::assert_relative_eq;
use fog_of_war::fog::{HIDDEN, REVEALED};
use fog_of_war::{
    Config, FrameInput, HeldKeys, ImagePyramid, InputEvent, PointerButton, ScrollDirection, SourceImage,
    Viewport, ZoomLevel,
};
use image::{Rgba, RgbaImage};

fn gradient(w: u32, h: u32) -> SourceImage {
    SourceImage::from_rgba(RgbaImage::from_fn(w, h, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    }))
}

fn viewport(config: Config, w: u32, h: u32) -> Viewport {
    let pyramid = ImagePyramid::build(gradient(w, h), &config.zoom_levels());
    let size = config.window_size(w, h);
    Viewport::new(config, pyramid, size).unwrap()
}

#[test]
fn reveal_stroke_on_fresh_map() {
    let config = Config { brush_radius: 10, ..Config::default() };
    let mut vp = viewport(config, 200, 100);
    assert!(vp.fog().is_fully(HIDDEN));

    let input = FrameInput {
        events: vec![InputEvent::ButtonDown(PointerButton::Reveal)],
        held: HeldKeys::none(),
        pointer: Some((50.0, 50.0)), // pan is zero, so this is image space too
    };
    vp.update(&input);

    for y in 0..100u32 {
        for x in 0..200u32 {
            let dist = ((f64::from(x) - 50.0).powi(2) + (f64::from(y) - 50.0).powi(2)).sqrt();
            let expected = if dist <= 10.0 { REVEALED } else { HIDDEN };
            assert_eq!(vp.fog().alpha(x, y), expected, "pixel ({x},{y}) at distance {dist}");
        }
    }
}

#[test]
fn one_zoom_step_in() {
    let mut vp = viewport(Config::default(), 200, 100);
    assert_eq!(vp.zoom(), ZoomLevel(100));

    vp.update(&FrameInput::with_events([InputEvent::Scroll {
        direction: ScrollDirection::Up,
        modifier: false,
    }]));

    assert_eq!(vp.zoom(), ZoomLevel(125));
    assert_eq!(vp.active_image().dimensions(), (250, 125));
    assert_eq!(vp.fog().dimensions(), vp.active_image().dimensions());
}

#[test]
fn zoom_round_trip_keeps_revealed_area() {
    let mut vp = viewport(Config { brush_radius: 20, ..Config::default() }, 200, 100);
    vp.update(&FrameInput {
        events: vec![InputEvent::ButtonDown(PointerButton::Reveal)],
        held: HeldKeys::none(),
        pointer: Some((100.0, 50.0)),
    });
    vp.update(&FrameInput::with_events([InputEvent::ButtonUp(PointerButton::Reveal)]));

    let down = InputEvent::Scroll { direction: ScrollDirection::Down, modifier: false };
    let up = InputEvent::Scroll { direction: ScrollDirection::Up, modifier: false };
    vp.update(&FrameInput::with_events([down, down]));
    assert_eq!(vp.zoom(), ZoomLevel(50));
    assert_eq!(vp.fog().dimensions(), (100, 50));
    vp.update(&FrameInput::with_events([up, up]));
    assert_eq!(vp.fog().dimensions(), (200, 100));

    assert_eq!(vp.fog().alpha(100, 50), REVEALED);
    assert_eq!(vp.fog().alpha(5, 5), HIDDEN);
    assert_eq!(vp.fog().alpha(195, 95), HIDDEN);
}

#[test]
fn legend_toggle_twice_leaves_composite_unchanged() {
    let mut vp = viewport(Config::default(), 200, 100);
    let initial_flag = vp.state().legend_visible;
    let before = vp.frame(&FrameInput::idle()).clone();

    vp.update(&FrameInput::with_events([InputEvent::ToggleLegend]));
    assert_ne!(vp.state().legend_visible, initial_flag);
    let toggled = vp.composite().clone();
    assert_ne!(toggled, before);

    vp.update(&FrameInput::with_events([InputEvent::ToggleLegend]));
    assert_eq!(vp.state().legend_visible, initial_flag);
    assert_eq!(vp.composite(), &before);
}

#[test]
fn legend_only_touches_its_corner() {
    let config = Config { legend_visible: false, ..Config::default() };
    let mut vp = viewport(config, 600, 400);
    let plain = vp.composite().clone();
    vp.handle_event(InputEvent::ToggleLegend);
    let with_legend = vp.composite().clone();
    // legend sits at the top-left; the bottom-right corner is untouched
    assert_eq!(plain.get(599, 399), with_legend.get(599, 399));
    assert_ne!(plain, with_legend);
}

#[test]
fn held_pan_left_moves_by_speed_over_framerate() {
    let config = Config { movement_speed: 500.0, framerate: 60, ..Config::default() };
    let mut vp = viewport(config, 200, 100);
    let frames: u32 = 45;
    let held = FrameInput {
        held: HeldKeys { left: true, ..HeldKeys::none() },
        ..FrameInput::idle()
    };
    for _ in 0..frames {
        vp.frame(&held);
    }
    assert_relative_eq!(vp.state().pan_x, -(f64::from(frames) * 500.0 / 60.0), epsilon = 1e-9);
    assert_relative_eq!(vp.state().pan_y, 0.0);
}

#[test]
fn diagonal_pan_sums_components() {
    let mut vp = viewport(Config::default(), 50, 50);
    let step = vp.config().pan_per_frame();
    vp.update(&FrameInput {
        held: HeldKeys { right: true, down: true, ..HeldKeys::none() },
        ..FrameInput::idle()
    });
    assert_relative_eq!(vp.state().pan_x, step);
    assert_relative_eq!(vp.state().pan_y, step);

    // opposite directions cancel
    vp.update(&FrameInput {
        held: HeldKeys { left: true, right: true, ..HeldKeys::none() },
        ..FrameInput::idle()
    });
    assert_relative_eq!(vp.state().pan_x, step);
}

#[test]
fn pan_is_not_clamped_to_the_image() {
    let mut vp = viewport(Config { legend_visible: false, ..Config::default() }, 20, 20);
    let held = FrameInput { held: HeldKeys { left: true, ..HeldKeys::none() }, ..FrameInput::idle() };
    for _ in 0..600 {
        vp.update(&held);
    }
    assert!(vp.state().pan_x < -4000.0);
    let bg = vp.config().background_color;
    assert!(vp.composite().pixels.iter().all(|&p| p == bg));
}

#[test]
fn rotate_then_zoom_keeps_layers_in_lockstep() {
    let mut vp = viewport(Config::default(), 200, 100);
    let rotate = FrameInput::with_events([InputEvent::Rotate]);
    let zoom_out = FrameInput::with_events([InputEvent::Scroll {
        direction: ScrollDirection::Down,
        modifier: false,
    }]);

    vp.update(&rotate);
    assert_eq!(vp.active_image().dimensions(), (100, 200));
    vp.update(&zoom_out);
    assert_eq!(vp.active_image().dimensions(), (75, 150));
    assert_eq!(vp.fog().dimensions(), (75, 150));
    vp.update(&rotate);
    assert_eq!(vp.active_image().dimensions(), (150, 75));
    assert_eq!(vp.fog().dimensions(), (150, 75));
    assert!(vp.fog().is_fully(HIDDEN));
}

#[test]
fn pyramid_levels_match_rounded_scale() {
    let config = Config::default();
    let (w, h) = (333u32, 127u32);
    let pyramid = ImagePyramid::build(gradient(w, h), &config.zoom_levels());
    assert_eq!(pyramid.len(), config.zoom_levels().len());
    for zoom in config.zoom_levels() {
        let (lw, lh) = pyramid.get(zoom).unwrap().dimensions();
        assert_eq!(lw, (f64::from(w) * zoom.scale()).round() as u32);
        assert_eq!(lh, (f64::from(h) * zoom.scale()).round() as u32);
    }
}
