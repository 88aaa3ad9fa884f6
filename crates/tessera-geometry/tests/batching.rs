//! Buffer batching, flush ordering and frame lifecycle.

use std::cell::RefCell;
use std::rc::Rc;
use tessera_geometry::{
    Color, ColorGrad, Config, OutlineDrawDirection, OutlineOptions, RenderContext, ShapeType, StyleOptions,
    TextureHandle, UserData, Vec2,
};
use tessera_test_utils::{BackendCall, DrawPath, MockBackend};

fn square(ctx: &mut RenderContext, style: &StyleOptions, draw_order: i32) {
    ctx.draw_rect(Vec2::ZERO, Vec2::new(10.0, 10.0), style, 0.0, draw_order)
        .unwrap();
}

fn draw_orders(backend: &MockBackend) -> Vec<(i32, ShapeType)> {
    backend
        .draws()
        .into_iter()
        .filter_map(|call| match call {
            BackendCall::Draw {
                draw_order,
                shape_type,
                ..
            } => Some((draw_order, shape_type)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_lower_draw_order_flushes_first() {
    let mut ctx = RenderContext::new(Config::default());
    let style = StyleOptions::filled(Color::WHITE);
    square(&mut ctx, &style, 5);
    square(&mut ctx, &style, 1);
    square(&mut ctx, &style, -3);

    let mut backend = MockBackend::new();
    ctx.flush_buffers(&mut backend);
    let orders: Vec<i32> = draw_orders(&backend).into_iter().map(|(order, _)| order).collect();
    assert_eq!(orders, vec![-3, 1, 5]);
    assert_eq!(ctx.buffers().draw_orders(), &[-3, 1, 5]);
}

#[test]
fn test_phases_flush_in_order_within_a_draw_order() {
    let mut ctx = RenderContext::new(Config::default());
    let decorated = StyleOptions::filled(Color::WHITE)
        .with_outline(OutlineOptions::new(2.0, Color::BLACK))
        .with_aa(true);
    square(&mut ctx, &decorated, 2);
    square(&mut ctx, &StyleOptions::filled(Color::RED), 1);

    let mut backend = MockBackend::new();
    ctx.flush_buffers(&mut backend);
    assert_eq!(
        draw_orders(&backend),
        vec![
            (1, ShapeType::Shape),
            (2, ShapeType::Shape),
            (2, ShapeType::Outline),
            (2, ShapeType::AA),
        ]
    );
}

#[test]
fn test_equal_keys_share_a_draw_call() {
    let mut ctx = RenderContext::new(Config::default());
    let style = StyleOptions::filled(Color::WHITE);
    square(&mut ctx, &style, 0);
    square(&mut ctx, &StyleOptions::filled(Color::RED), 0);

    let mut backend = MockBackend::new();
    let stats = ctx.flush_buffers(&mut backend);
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.vertex_count, 8);
    assert_eq!(stats.index_count, 12);

    let submitted = backend.submitted();
    assert_eq!(submitted[0].indices()[6..], [4, 5, 6, 4, 6, 7]);
}

#[test]
fn test_state_changes_split_buffers() {
    let mut ctx = RenderContext::new(Config::default());
    let base = StyleOptions::filled(Color::WHITE);
    square(&mut ctx, &base, 0);
    square(&mut ctx, &base.clone().with_unique_id(7), 0);
    square(&mut ctx, &base.clone().with_user_data(UserData(3)), 0);
    square(&mut ctx, &base.clone().with_texture(TextureHandle::new(1)), 0);
    square(&mut ctx, &base.clone().with_texture_uv(Vec2::splat(2.0), Vec2::ZERO), 0);

    let mut backend = MockBackend::new();
    assert_eq!(ctx.flush_buffers(&mut backend).draw_calls, 5);
}

#[test]
fn test_backend_routing() {
    let mut ctx = RenderContext::new(Config::default());
    square(&mut ctx, &StyleOptions::filled(ColorGrad::horizontal(Color::RED, Color::BLUE)), 0);
    square(&mut ctx, &StyleOptions::filled(ColorGrad::radial(Color::RED, Color::BLUE, 1.0)), 0);
    square(&mut ctx, &StyleOptions::filled(Color::WHITE).with_texture(TextureHandle::new(9)), 0);

    let mut backend = MockBackend::new();
    let stats = ctx.flush_buffers(&mut backend);
    assert_eq!(backend.count_path(DrawPath::Default), 1);
    assert_eq!(backend.count_path(DrawPath::Gradient), 1);
    assert_eq!(backend.count_path(DrawPath::Textured), 1);
    assert_eq!((stats.gradient_calls, stats.textured_calls, stats.text_calls), (1, 1, 0));

    let gradient = backend.submitted()[1].key().gradient.unwrap();
    assert_eq!((gradient.start, gradient.end, gradient.corner), (Color::RED, Color::BLUE, false));
}

#[test]
fn test_empty_frame_flushes_nothing() {
    let mut ctx = RenderContext::new(Config::default());
    let mut backend = MockBackend::new();
    assert_eq!(ctx.flush_buffers(&mut backend).draw_calls, 0);

    square(&mut ctx, &StyleOptions::filled(Color::WHITE), 0);
    ctx.flush_buffers(&mut backend);
    assert_eq!(backend.count_draws(), 1);

    ctx.reset_frame();
    backend.clear_calls();
    let stats = ctx.flush_buffers(&mut backend);
    assert_eq!(stats.draw_calls, 0);
    assert_eq!(backend.call_count(), 0);
    // the buffer survives the reset with its capacity
    assert_eq!(ctx.buffers().buffers().len(), 1);
}

#[test]
fn test_buffers_purged_after_gc_interval() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let config = Config::default()
        .with_gc_collect_interval(2)
        .with_log_callback(move |msg| sink.borrow_mut().push(msg.to_string()));
    let mut ctx = RenderContext::new(config);

    for frame in 1..=3 {
        square(&mut ctx, &StyleOptions::filled(Color::WHITE), 0);
        ctx.reset_frame();
        let expected = if frame < 3 { 1 } else { 0 };
        assert_eq!(ctx.buffers().buffers().len(), expected, "frame {}", frame);
    }
    assert_eq!(log.borrow().len(), 1);
    assert!(log.borrow()[0].contains("Purged"));
    assert!(ctx.buffers().draw_orders().is_empty());
}

#[test]
fn test_zero_interval_purges_every_frame() {
    let mut ctx = RenderContext::new(Config::default().with_gc_collect_interval(0));
    let range = ctx
        .draw_rect(Vec2::ZERO, Vec2::ONE, &StyleOptions::filled(Color::WHITE), 0.0, 0)
        .unwrap();
    assert!(ctx.buffers().get(range.buffer).is_some());
    ctx.reset_frame();
    assert!(ctx.buffers().buffers().is_empty());
    // ranges from before a purge no longer resolve
    assert!(ctx.buffers().get(range.buffer).is_none());
}

#[test]
fn test_rejected_draws_leave_no_buffers() {
    let mut ctx = RenderContext::new(Config::default());
    let style = StyleOptions::filled(Color::WHITE);
    assert!(ctx.draw_ngon(Vec2::ZERO, 4.0, 1, &style, 0.0, 3).is_none());
    assert!(ctx.draw_convex(&[Vec2::ZERO], &style, 0.0, 4).is_none());
    assert!(ctx.draw_circle(Vec2::ZERO, 4.0, &style, 12, 0.0, 30.0, 390.0, 5).is_none());

    assert!(ctx.buffers().buffers().is_empty());
    assert!(ctx.buffers().draw_orders().is_empty());
    let mut backend = MockBackend::new();
    assert_eq!(ctx.flush_buffers(&mut backend).draw_calls, 0);
    assert_eq!(backend.call_count(), 0);
}

#[test]
fn test_aa_fringe_fades_out() {
    let mut ctx = RenderContext::new(Config::default().with_global_aa_multiplier(2.0));
    square(&mut ctx, &StyleOptions::filled(Color::RED).with_aa(true), 0);

    let aa: Vec<_> = ctx.buffers().buffers_of(ShapeType::AA).collect();
    assert_eq!(aa.len(), 1);
    let vertices = aa[0].vertices();
    assert_eq!(vertices.len(), 8);
    assert!(vertices[..4].iter().all(|v| v.color() == Color::RED));
    assert!(vertices[4..].iter().all(|v| v.col == [1.0, 0.0, 0.0, 0.0]));
    assert!((vertices[4].position() - Vec2::new(-2.0, -2.0)).length() < 1e-3);
}

#[test]
fn test_outline_with_aa_wraps_the_outline() {
    let mut ctx = RenderContext::new(Config::default());
    let style = StyleOptions::filled(Color::WHITE)
        .with_outline(OutlineOptions::new(3.0, Color::BLUE).with_texture(TextureHandle::new(4)))
        .with_aa(true);
    square(&mut ctx, &style, 0);

    let outline = ctx.buffers().buffers_of(ShapeType::Outline).next().unwrap();
    assert_eq!(outline.key().texture, Some(TextureHandle::new(4)));
    assert!(outline.vertices().iter().all(|v| v.color() == Color::BLUE));
    assert!((outline.vertices()[4].position() - Vec2::new(-3.0, -3.0)).length() < 1e-3);

    // one fringe around the outline's outer edge, none around the shape itself
    let aa: Vec<_> = ctx.buffers().buffers_of(ShapeType::AA).collect();
    assert_eq!(aa.len(), 1);
    assert_eq!(aa[0].key().texture, None);
    assert_eq!(aa[0].vertices().len(), 8);
    assert!((aa[0].vertices()[0].position() - Vec2::new(-3.0, -3.0)).length() < 1e-3);
    assert!(aa[0].vertices()[..4].iter().all(|v| v.color() == Color::BLUE));
}

#[test]
fn test_aa_fringes_use_the_default_pass() {
    let mut ctx = RenderContext::new(Config::default());
    let textured = StyleOptions::filled(Color::WHITE)
        .with_texture(TextureHandle::new(5))
        .with_aa(true);
    let radial = StyleOptions::filled(ColorGrad::radial(Color::RED, Color::BLUE, 1.0)).with_aa(true);
    square(&mut ctx, &textured, 0);
    square(&mut ctx, &radial, 0);

    let mut backend = MockBackend::new();
    ctx.flush_buffers(&mut backend);
    assert_eq!(backend.count_path(DrawPath::Textured), 1);
    assert_eq!(backend.count_path(DrawPath::Gradient), 1);
    // both fringes share one untextured AA buffer
    assert_eq!(backend.count_path(DrawPath::Default), 1);
    assert_eq!(ctx.buffers().buffers_of(ShapeType::AA).count(), 1);
}

#[test]
fn test_outline_direction_on_stroked_shapes() {
    let stroked = StyleOptions::stroked(Color::WHITE, 4.0);
    let cases = [
        (OutlineDrawDirection::Outwards, 8),
        (OutlineDrawDirection::Inwards, 8),
        (OutlineDrawDirection::Both, 16),
    ];
    for (direction, expected) in cases {
        let mut ctx = RenderContext::new(Config::default());
        let style = stroked
            .clone()
            .with_outline(OutlineOptions::new(1.0, Color::BLACK).with_direction(direction));
        ctx.draw_rect(Vec2::ZERO, Vec2::new(20.0, 20.0), &style, 0.0, 0);

        let outline = ctx.buffers().buffers_of(ShapeType::Outline).next().unwrap();
        assert_eq!(outline.vertices().len(), expected, "{:?}", direction);
        if direction == OutlineDrawDirection::Inwards {
            // inner ring of the stroke is the rect itself, pushed one pixel in
            assert!((outline.vertices()[4].position() - Vec2::new(1.0, 1.0)).length() < 1e-3);
        }
    }
}

#[test]
fn test_stroked_aa_surrounds_both_edges() {
    let mut ctx = RenderContext::new(Config::default());
    let style = StyleOptions::stroked(Color::WHITE, 4.0).with_aa(true);
    ctx.draw_circle(Vec2::ZERO, 20.0, &style, 12, 0.0, 0.0, 360.0, 0);

    let aa = ctx.buffers().buffers_of(ShapeType::AA).next().unwrap();
    assert_eq!(aa.vertices().len(), 2 * 2 * 12);
}

#[test]
fn test_outline_keeps_draw_order_and_clip() {
    let mut ctx = RenderContext::new(Config::default());
    ctx.set_clip_rect(tessera_geometry::ClipRect::new(1, 2, 30, 40));
    let style = StyleOptions::filled(Color::WHITE).with_outline(OutlineOptions::new(1.0, Color::BLACK));
    square(&mut ctx, &style, 6);

    let outline = ctx.buffers().buffers_of(ShapeType::Outline).next().unwrap();
    assert_eq!(outline.key().draw_order, 6);
    assert_eq!(outline.key().clip_rect, tessera_geometry::ClipRect::new(1, 2, 30, 40));
}
