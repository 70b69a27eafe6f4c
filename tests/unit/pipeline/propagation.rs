use super::*;
use crate::encode::sink::InMemorySink;
use crate::graph::dot::decode_dot_str;
use crate::input::resolve::{PROPAGATION_REFERENCE, hop_file_name};
use crate::render::frame::FrameRGBA;

const START: &str = r#"digraph {
    0 [ label = "a" ]
    1 [ label = "b" ]
    2 [ label = "c" ]
    3 [ label = "d" ]
    0 -> 1 [ label = "1" ]
    1 -> 2 [ label = "1" ]
    2 -> 3 [ label = "1" ]
}
"#;

fn small_settings() -> RenderSettings {
    RenderSettings {
        figure_width_in: 2.0,
        figure_height_in: 2.0,
        dpi: 50,
        margin_px: 10.0,
        node_radius_px: 4.0,
        ..RenderSettings::default()
    }
}

fn inputs(dir: &Path, hops: usize) -> PropagationInputs {
    let start = dir.join(PROPAGATION_REFERENCE);
    std::fs::write(&start, START).unwrap();
    let hops = (0..hops)
        .map(|i| {
            let p = dir.join(hop_file_name(i));
            std::fs::write(&p, format!("digraph {{\n    {i} -> {}\n}}\n", i + 1)).unwrap();
            p
        })
        .collect();
    PropagationInputs { start, hops }
}

#[test]
fn start_frame_then_one_frame_per_hop() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = inputs(dir.path(), 3);
    let mut sink = InMemorySink::new();
    let stats =
        render_propagation_sequence(&inputs, &small_settings(), &LabelFonts::empty(), &mut sink)
            .unwrap();

    assert!(sink.is_complete());
    assert_eq!(sink.names(), vec!["000", "hop-000", "hop-001", "hop-002"]);
    assert_eq!(stats.frames_written, 4);
    assert_eq!(stats.edges_skipped, 0);
}

#[test]
fn no_hops_gives_only_the_start_frame() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = inputs(dir.path(), 0);
    let mut sink = InMemorySink::new();
    render_propagation_sequence(&inputs, &small_settings(), &LabelFonts::empty(), &mut sink)
        .unwrap();
    assert_eq!(sink.names(), vec!["000"]);
}

#[test]
fn history_makes_later_hops_differ() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = inputs(dir.path(), 2);
    let mut sink = InMemorySink::new();
    render_propagation_sequence(&inputs, &small_settings(), &LabelFonts::empty(), &mut sink)
        .unwrap();
    let frames = sink.frames();
    assert_ne!(frames[0].1, frames[1].1);
    assert_ne!(frames[1].1, frames[2].1);
}

#[test]
fn undecodable_hop_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = inputs(dir.path(), 2);
    std::fs::write(&inputs.hops[1], "digraph {").unwrap();
    let mut sink = InMemorySink::new();
    let err =
        render_propagation_sequence(&inputs, &small_settings(), &LabelFonts::empty(), &mut sink)
            .unwrap_err();
    assert!(matches!(err, TopoError::Decode(_)));
    assert_eq!(sink.names(), vec!["000", "hop-000"]);
}

fn layering_settings() -> RenderSettings {
    RenderSettings {
        edge_width_px: 6.0,
        faint_opacity: 0.5,
        crop_padding_px: 10_000,
        ..small_settings()
    }
}

fn pixel(frame: &FrameRGBA, (x, y): (u32, u32)) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn current_hop_is_opaque_red_over_faint_history() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = inputs(dir.path(), 2);
    let settings = layering_settings();
    let mut sink = InMemorySink::new();
    render_propagation_sequence(&inputs, &settings, &LabelFonts::empty(), &mut sink).unwrap();

    let start = decode_dot_str(START).unwrap();
    let positions = spring_layout(&start, &settings.layout);
    let fonts = LabelFonts::empty();
    let canvas = FrameCanvas::new(&settings, &positions, &fonts).unwrap();
    let midpoint = |a: &str, b: &str| {
        let pa = canvas.to_pixels(positions.get(a).unwrap());
        let pb = canvas.to_pixels(positions.get(b).unwrap());
        (
            ((pa.x + pb.x) / 2.0).floor() as u32,
            ((pa.y + pb.y) / 2.0).floor() as u32,
        )
    };

    let (name, last) = &sink.frames()[2];
    assert_eq!(name, "hop-001");

    // hop-001 is `1 -> 2`.
    assert_eq!(pixel(last, midpoint("1", "2")), [255, 0, 0, 255]);

    // hop-000 is `0 -> 1`: faint red over the faint start edge.
    let earlier = pixel(last, midpoint("0", "1"));
    assert_ne!(earlier, [255, 0, 0, 255]);
    assert_eq!(earlier[3], 255);
    assert!(earlier[0] > earlier[1].saturating_add(60), "{earlier:?}");
    assert_eq!(earlier[1], earlier[2]);
}
