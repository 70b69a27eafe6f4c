use super::*;

const CANVAS: Canvas = Canvas {
    width: 64,
    height: 32,
};

#[test]
fn svg_escapes_text_and_marks_bold() {
    let mut layer = LabelLayer::default();
    layer.push(Point::new(10.0, 20.0), "a<b>&\"c\"", true, Rgba8::BLACK);
    layer.push(Point::new(30.0, 5.0), "plain", false, Rgba8::GREY);

    let svg = layer.to_svg(CANVAS, "sans-serif", 10.0);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="64" height="32""#));
    assert!(svg.contains("a&lt;b&gt;&amp;&quot;c&quot;"));
    assert!(svg.contains(r#"font-weight="bold""#));
    assert!(svg.contains(r#"fill="rgb(128,128,128)""#));
    assert!(svg.contains(r#"y="23.50""#));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn rasterize_covers_canvas() {
    let mut layer = LabelLayer::default();
    assert!(layer.is_empty());
    layer.push(Point::new(32.0, 16.0), "n0", false, Rgba8::BLACK);

    let bytes = layer
        .rasterize(CANVAS, &LabelFonts::empty(), "sans-serif", 12.0)
        .unwrap();
    assert_eq!(bytes.len(), 64 * 32 * 4);
}

#[test]
fn unreadable_font_dir_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("no-such-fonts");
    assert!(LabelFonts::system(Some(&missing)).is_err());
}

#[test]
fn font_dir_without_fonts_still_loads() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("readme.txt"), "not a font").unwrap();
    assert!(LabelFonts::system(Some(root.path())).is_ok());
}
