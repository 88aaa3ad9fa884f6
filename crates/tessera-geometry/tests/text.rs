//! Text drawing through the render context with the monospace font engine.

use std::cell::RefCell;
use std::rc::Rc;
use tessera_core::math::{Aabb, centroid};
use tessera_geometry::{
    Color, ColorGrad, Config, FontId, LayoutOptions, RenderContext, SdfTextOptions, ShapeRange, ShapeType,
    TextOptions, Vec2, Vertex,
};
use tessera_test_utils::{DrawPath, MockBackend, MonospaceFace, MonospaceFontLoader};
use tessera_text::{FontDescriptor, FontSource};

const PIXEL_SIZE: u32 = 16;

fn load(ctx: &mut RenderContext, backend: &mut MockBackend, sdf: bool) -> FontId {
    ctx.load_font(
        &mut MonospaceFontLoader::new(),
        backend,
        &FontSource::memory(vec![1u8, 2, 3]),
        &FontDescriptor::new(PIXEL_SIZE).with_sdf(sdf),
    )
    .unwrap()
}

fn setup(config: Config) -> (RenderContext, MockBackend) {
    let mut ctx = RenderContext::new(config);
    let mut backend = MockBackend::new();
    load(&mut ctx, &mut backend, false);
    backend.clear_calls();
    (ctx, backend)
}

fn vertices(ctx: &RenderContext, range: &ShapeRange) -> Vec<Vertex> {
    ctx.buffers().get(range.buffer).unwrap().vertices()[range.start as usize..range.end as usize].to_vec()
}

fn bounds(vertices: &[Vertex]) -> Aabb {
    Aabb::from_points(vertices.iter().map(Vertex::position)).unwrap()
}

#[test]
fn test_measured_size_matches_drawn_quads() {
    let (mut ctx, _) = setup(Config::default());
    let options = TextOptions::new(Color::WHITE);

    for text in ["Hello, world", "two\nlines", "A", "x y z"] {
        let range = ctx
            .draw_text(text, Vec2::new(30.0, 40.0), &options, 0.0, 0)
            .unwrap();
        let drawn = bounds(&vertices(&ctx, &range)).size();
        let measured = ctx.calculate_text_size(text, &options).unwrap();
        assert!((drawn - measured).length() < 1e-3, "{:?}: {} vs {}", text, drawn, measured);
    }
}

#[test]
fn test_scaled_text_measures_the_same() {
    let (mut ctx, _) = setup(Config::default());
    let options = TextOptions::new(Color::WHITE).with_layout(LayoutOptions::default().with_scale(2.5).with_spacing(3.0));
    let range = ctx.draw_text("scaled", Vec2::ZERO, &options, 0.0, 0).unwrap();
    let drawn = bounds(&vertices(&ctx, &range)).size();
    let measured = ctx.calculate_text_size("scaled", &options).unwrap();
    assert!((drawn - measured).length() < 1e-3);
    assert!((measured.y - MonospaceFace::glyph_height(PIXEL_SIZE) as f32 * 2.5).abs() < 1e-3);
}

#[test]
fn test_one_quad_per_visible_glyph() {
    let (mut ctx, mut backend) = setup(Config::default());
    let range = ctx
        .draw_text("a b", Vec2::ZERO, &TextOptions::new(Color::WHITE), 0.0, 0)
        .unwrap();
    assert_eq!(range.vertex_count(), 8);
    assert_eq!(range.index_end - range.index_start, 12);

    let stats = ctx.flush_buffers(&mut backend);
    assert_eq!(stats.text_calls, 1);
    assert_eq!(backend.count_path(DrawPath::SimpleText), 1);
    let submitted = backend.submitted();
    assert_eq!(submitted[0].shape_type(), ShapeType::Text);
    assert_eq!(submitted[0].key().texture.map(|t| t.id()), Some(1));
}

#[test]
fn test_horizontal_gradient_runs_across_glyphs() {
    let (mut ctx, _) = setup(Config::default());
    let options = TextOptions::new(ColorGrad::horizontal(Color::RED, Color::BLUE));
    let range = ctx.draw_text("abc", Vec2::ZERO, &options, 0.0, 0).unwrap();
    let vertices = vertices(&ctx, &range);

    assert!(vertices[..4].iter().all(|v| v.color() == Color::RED));
    assert!(vertices[4..8].iter().all(|v| (v.col[0] - 0.5).abs() < 1e-5));
    assert!(vertices[8..].iter().all(|v| v.col[2] > 0.999));
}

#[test]
fn test_drop_shadow_is_drawn_first() {
    let (mut ctx, _) = setup(Config::default());
    let offset = Vec2::new(2.0, 3.0);
    let options = TextOptions::new(Color::WHITE).with_drop_shadow(offset, Color::BLACK);
    let range = ctx.draw_text("ab", Vec2::ZERO, &options, 0.0, 0).unwrap();
    let vertices = vertices(&ctx, &range);

    assert_eq!(vertices.len(), 16);
    let (shadow, main) = vertices.split_at(8);
    assert!(shadow.iter().all(|v| v.color() == Color::BLACK));
    assert!(main.iter().all(|v| v.color() == Color::WHITE));
    for (s, m) in shadow.iter().zip(main) {
        assert_eq!(s.position() - m.position(), offset);
        assert_eq!(s.uv(), m.uv());
    }
}

#[test]
fn test_rotation_keeps_the_text_center() {
    let (mut ctx, _) = setup(Config::default());
    let options = TextOptions::new(Color::WHITE);
    let straight = ctx.draw_text("rotate", Vec2::ZERO, &options, 0.0, 0).unwrap();
    let turned = ctx.draw_text("rotate", Vec2::ZERO, &options, 90.0, 0).unwrap();

    let center = |range: &ShapeRange| {
        let points: Vec<Vec2> = vertices(&ctx, range).iter().map(Vertex::position).collect();
        centroid(&points)
    };
    assert!((center(&straight) - center(&turned)).length() < 1e-3);

    let size = bounds(&vertices(&ctx, &straight)).size();
    let turned_size = bounds(&vertices(&ctx, &turned)).size();
    assert!((size.x - turned_size.y).abs() < 1e-3);
}

#[test]
fn test_sdf_text_uses_its_own_phase() {
    let mut ctx = RenderContext::new(Config::default());
    let mut backend = MockBackend::new();
    load(&mut ctx, &mut backend, false);
    let sdf_font = load(&mut ctx, &mut backend, true);

    let sdf = SdfTextOptions {
        thickness: 0.6,
        softness: 0.1,
        ..Default::default()
    };
    let options = TextOptions::new(Color::WHITE).with_font(sdf_font).with_sdf(sdf);
    let range = ctx.draw_text_sdf("sdf", Vec2::ZERO, &options, 0.0, 0).unwrap();
    let key = *ctx.buffers().get(range.buffer).unwrap().key();
    assert_eq!(key.shape_type, ShapeType::SdfText);
    assert_eq!(key.texture.map(|t| t.id()), Some(2));
    assert_eq!(key.sdf.map(|p| (p.thickness, p.softness)), Some((0.6, 0.1)));

    // a different threshold cannot share the buffer
    let other = TextOptions::new(Color::WHITE)
        .with_font(sdf_font)
        .with_sdf(SdfTextOptions::default());
    let second = ctx.draw_text_sdf("sdf", Vec2::ZERO, &other, 0.0, 0).unwrap();
    assert_ne!(range.buffer, second.buffer);

    backend.clear_calls();
    ctx.flush_buffers(&mut backend);
    assert_eq!(backend.count_path(DrawPath::SdfText), 2);
}

#[test]
fn test_usage_errors_are_reported() {
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = errors.clone();
    let (mut ctx, _) = setup(Config::default().with_error_callback(move |msg| sink.borrow_mut().push(msg.to_string())));

    // the default font is not a distance field font
    assert!(ctx.draw_text_sdf("x", Vec2::ZERO, &TextOptions::default(), 0.0, 0).is_none());
    let missing = TextOptions::default().with_font(FontId(9));
    assert!(ctx.draw_text("x", Vec2::ZERO, &missing, 0.0, 0).is_none());
    let narrow = TextOptions::default().with_layout(LayoutOptions::default().with_word_wrap(false).with_wrap_width(1.0));
    assert!(ctx.draw_text("wide", Vec2::ZERO, &narrow, 0.0, 0).is_none());

    let errors = errors.borrow();
    assert_eq!(errors.len(), 3);
    assert!(errors[0].contains("SDF"));
    assert!(errors[1].contains("Unknown font id 9"));
    assert!(errors[2].contains("Wrap width"));
}

#[test]
fn test_fonts_are_selected_by_id() {
    let mut ctx = RenderContext::new(Config::default());
    let mut backend = MockBackend::new();
    let first = load(&mut ctx, &mut backend, false);
    let second = load(&mut ctx, &mut backend, false);
    assert_eq!((first, second), (FontId(0), FontId(1)));
    assert_eq!(backend.count_texture_creates(), 2);

    let default = ctx.draw_text("a", Vec2::ZERO, &TextOptions::default(), 0.0, 0).unwrap();
    let chosen = ctx
        .draw_text("a", Vec2::ZERO, &TextOptions::default().with_font(second), 0.0, 0)
        .unwrap();
    assert_eq!(ctx.buffers().get(default.buffer).unwrap().key().texture.map(|t| t.id()), Some(1));
    assert_eq!(ctx.buffers().get(chosen.buffer).unwrap().key().texture.map(|t| t.id()), Some(2));
}

#[test]
fn test_empty_text_draws_nothing() {
    let (mut ctx, mut backend) = setup(Config::default());
    let range = ctx.draw_text("", Vec2::ZERO, &TextOptions::default(), 0.0, 0).unwrap();
    assert_eq!(range.vertex_count(), 0);
    assert_eq!(ctx.flush_buffers(&mut backend).draw_calls, 0);
}

#[test]
fn test_cached_text_reuses_geometry() {
    let (mut ctx, _) = setup(Config::default().with_text_caching(true, 2));
    let options = TextOptions::new(ColorGrad::vertical(Color::RED, Color::GREEN));

    let first = ctx.draw_text("cached", Vec2::new(5.0, 20.0), &options, 15.0, 0).unwrap();
    let second = ctx.draw_text("cached", Vec2::new(5.0, 20.0), &options, 15.0, 0).unwrap();
    assert_eq!(ctx.text_cache().misses, 1);
    assert_eq!(ctx.text_cache().hits, 1);
    assert_eq!(first.buffer, second.buffer);
    assert_eq!(vertices(&ctx, &first), vertices(&ctx, &second));

    let buffer = ctx.buffers().get(first.buffer).unwrap();
    let offset = second.start - first.start;
    let first_indices = &buffer.indices()[first.index_start..first.index_end];
    let second_indices = &buffer.indices()[second.index_start..second.index_end];
    assert!(first_indices.iter().zip(second_indices).all(|(a, b)| a + offset == *b));

    // a different position is a different draw
    ctx.draw_text("cached", Vec2::new(6.0, 20.0), &options, 15.0, 0);
    assert_eq!(ctx.text_cache().misses, 2);
}

#[test]
fn test_cache_entries_expire() {
    let (mut ctx, _) = setup(Config::default().with_text_caching(true, 2));
    let options = TextOptions::default();
    ctx.draw_text("kept", Vec2::ZERO, &options, 0.0, 0);
    ctx.draw_text("dropped", Vec2::ZERO, &options, 0.0, 0);
    assert_eq!(ctx.text_cache().len(), 2);

    for _ in 0..3 {
        ctx.reset_frame();
        ctx.draw_text("kept", Vec2::ZERO, &options, 0.0, 0);
    }
    assert_eq!(ctx.text_cache().len(), 1);
    assert_eq!(ctx.text_cache().hits, 3);
}

#[test]
fn test_caching_disabled_by_default() {
    let (mut ctx, _) = setup(Config::default());
    ctx.draw_text("plain", Vec2::ZERO, &TextOptions::default(), 0.0, 0);
    ctx.draw_text("plain", Vec2::ZERO, &TextOptions::default(), 0.0, 0);
    assert!(ctx.text_cache().is_empty());
    assert_eq!(ctx.text_cache().hits + ctx.text_cache().misses, 0);
}
