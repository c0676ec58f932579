//! Descriptor trees rendered into SVG markup

use mandala_core::{
    attrs, circle, clip_path, group, line, mirror, polygon, reg_poly, rgba, ring, text, Axis,
    CompileOptions, Vec2,
};
use mandala_svg::{def, render, surface, surface_with};

#[test]
fn ring_renders_six_translated_circles() {
    let mut canvas = surface(&attrs! {});
    render(
        &mut canvas,
        &ring(&circle(attrs! { r: 2, fill: rgba(0.0, 0.0, 255.0, 1.0) }), 10.0, 6, Vec2::ZERO),
    )
    .unwrap();

    let svg = canvas.to_svg_string();
    assert_eq!(svg.matches("<circle").count(), 6);
    assert!(svg.contains(r#"<circle r="2" fill="rgba(0,0,255,1)" transform="translate(10,0)"/>"#));
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg"><g>"#));
    assert!(svg.ends_with("</g></svg>"));
}

#[test]
fn text_content_is_escaped() {
    let mut canvas = surface(&attrs! {});
    render(&mut canvas, &text("a < b", attrs! { x: 1, textAnchor: "middle" })).unwrap();
    assert!(canvas
        .to_svg_string()
        .contains(r#"<text x="1" text-anchor="middle">a &lt; b</text>"#));
}

#[test]
fn clip_paths_go_into_defs() {
    let mut canvas = surface(&attrs! {});
    def(
        &mut canvas,
        &clip_path(circle(attrs! { r: 40 }), attrs! { id: "round" }),
    )
    .unwrap();
    render(&mut canvas, &line(attrs! { start: [0.0, 0.0], end: [9.0, 9.0], clipPath: "url(#round)" }))
        .unwrap();

    assert_eq!(
        canvas.to_svg_string(),
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg">"#,
            r#"<defs><clipPath id="round"><circle r="40"/></clipPath></defs>"#,
            r#"<line clip-path="url(#round)" x1="0" y1="0" x2="9" y2="9"/>"#,
            "</svg>"
        )
    );
}

#[test]
fn mirrored_polygons_flip_on_one_axis() {
    let mut canvas = surface(&attrs! {});
    let triangle = polygon(attrs! {
        points: vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 3.0)],
    });
    render(&mut canvas, &mirror(&triangle, Axis::X)).unwrap();

    let svg = canvas.to_svg_string();
    assert!(svg.contains(r#"<polygon points="0,0 4,0 0,3"/>"#));
    assert!(svg.contains(r#"<polygon points="0,0 4,0 0,3" transform="scale(-1,1)"/>"#));
}

#[test]
fn origin_becomes_inline_style() {
    let mut canvas = surface(&attrs! {});
    render(
        &mut canvas,
        &group(reg_poly(attrs! { sides: 4 }), attrs! { rotate: 45, origin: "center" }),
    )
    .unwrap();
    assert!(canvas.to_svg_string().contains(
        r#"<g transform="rotate(45)" style="transform-box: fill-box; transform-origin: center">"#
    ));
}

#[test]
fn extra_attributes_reach_the_markup() {
    let options = CompileOptions {
        extra_attributes: vec!["data-id".into()],
        ..CompileOptions::default()
    };
    let mut canvas = surface_with(&attrs! {}, options);
    render(&mut canvas, &circle(attrs! { r: 1, dataId: "dot" })).unwrap();
    assert!(canvas.to_svg_string().contains(r#"<circle r="1" data-id="dot"/>"#));
}
