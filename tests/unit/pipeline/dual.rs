use super::*;
use crate::encode::sink::InMemorySink;
use crate::graph::dot::decode_dot_str;
use crate::input::resolve::{connections_file_name, neighbours_file_name};
use crate::render::frame::FrameRGBA;

const TRIANGLE: &str = r#"digraph {
    0 [ label = "a" ]
    1 [ label = "b" ]
    2 [ label = "c" ]
    0 -> 1 [ label = "1" ]
    1 -> 2 [ label = "2" ]
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

fn write_family(dir: &Path, name: fn(usize) -> String, count: usize, body: &str) -> Vec<std::path::PathBuf> {
    (0..count)
        .map(|i| {
            let p = dir.join(name(i));
            std::fs::write(&p, body).unwrap();
            p
        })
        .collect()
}

#[test]
fn both_families_give_one_frame_per_timestep() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = DualInputs {
        neighbours: write_family(dir.path(), neighbours_file_name, 3, TRIANGLE),
        connections: write_family(dir.path(), connections_file_name, 3, TRIANGLE),
    };
    let mut sink = InMemorySink::new();
    let stats =
        render_dual_sequence(&inputs, &small_settings(), &LabelFonts::empty(), &mut sink).unwrap();

    assert!(sink.is_complete());
    assert_eq!(sink.names(), vec!["000", "001", "002"]);
    assert_eq!(stats.frames_written, 3);
    assert_eq!(stats.nodes_skipped, 0);
}

#[test]
fn single_family_renders_alone() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = DualInputs {
        neighbours: Vec::new(),
        connections: write_family(dir.path(), connections_file_name, 2, TRIANGLE),
    };
    let mut sink = InMemorySink::new();
    render_dual_sequence(&inputs, &small_settings(), &LabelFonts::empty(), &mut sink).unwrap();
    assert_eq!(sink.names(), vec!["000", "001"]);
}

#[test]
fn mismatched_families_fail_before_begin() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = DualInputs {
        neighbours: write_family(dir.path(), neighbours_file_name, 2, TRIANGLE),
        connections: write_family(dir.path(), connections_file_name, 3, TRIANGLE),
    };
    let mut sink = InMemorySink::new();
    let err = render_dual_sequence(&inputs, &small_settings(), &LabelFonts::empty(), &mut sink)
        .unwrap_err();
    assert!(matches!(
        err,
        TopoError::CountMismatch {
            neighbours: 2,
            connections: 3
        }
    ));
    assert!(sink.names().is_empty());
    assert!(!sink.is_complete());
}

#[test]
fn nodes_missing_from_reference_are_counted() {
    let dir = tempfile::tempdir().unwrap();
    let mut neighbours = write_family(dir.path(), neighbours_file_name, 1, TRIANGLE);
    let late = dir.path().join(neighbours_file_name(1));
    std::fs::write(&late, "digraph {\n    0 -> 9\n}\n").unwrap();
    neighbours.push(late);

    let inputs = DualInputs {
        neighbours,
        connections: Vec::new(),
    };
    let mut sink = InMemorySink::new();
    let stats =
        render_dual_sequence(&inputs, &small_settings(), &LabelFonts::empty(), &mut sink).unwrap();
    assert_eq!(stats.frames_written, 2);
    assert_eq!(stats.nodes_skipped, 1);
    assert_eq!(stats.edges_skipped, 1);
}

#[test]
fn run_dual_writes_pngs_and_is_repeatable() {
    let src = tempfile::tempdir().unwrap();
    write_family(src.path(), neighbours_file_name, 2, TRIANGLE);
    let out = tempfile::tempdir().unwrap();
    let out_dir = out.path().join("frames");
    let selection = PlotSelection {
        connections: false,
        neighbours: true,
    };

    let fonts = LabelFonts::empty();
    run_dual(src.path(), &out_dir, selection, &small_settings(), &fonts).unwrap();
    let first = std::fs::read(out_dir.join("001.png")).unwrap();
    run_dual(src.path(), &out_dir, selection, &small_settings(), &fonts).unwrap();
    let second = std::fs::read(out_dir.join("001.png")).unwrap();

    assert_eq!(first, second);
    let mut names: Vec<_> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["000.png", "001.png"]);
}

fn layering_settings() -> RenderSettings {
    RenderSettings {
        edge_width_px: 6.0,
        background_edge_width_px: 10.0,
        faint_opacity: 0.5,
        crop_padding_px: 10_000,
        ..small_settings()
    }
}

/// Pixel under the midpoint of the `a`–`b` edge, with the layout of `reference`.
fn edge_midpoint(settings: &RenderSettings, reference: &str, a: &str, b: &str) -> (u32, u32) {
    let frame = decode_dot_str(reference).unwrap();
    let positions = spring_layout(&frame, &settings.layout);
    let fonts = LabelFonts::empty();
    let canvas = FrameCanvas::new(settings, &positions, &fonts).unwrap();
    let pa = canvas.to_pixels(positions.get(a).unwrap());
    let pb = canvas.to_pixels(positions.get(b).unwrap());
    (
        ((pa.x + pb.x) / 2.0).floor() as u32,
        ((pa.y + pb.y) / 2.0).floor() as u32,
    )
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
fn neighbour_edges_are_drawn_over_connection_edges() {
    const TWO: &str = "digraph {\n    0 [ label = \"a\" ]\n    1 [ label = \"b\" ]\n    0 -> 1\n}\n";
    let dir = tempfile::tempdir().unwrap();
    let inputs = DualInputs {
        neighbours: write_family(dir.path(), neighbours_file_name, 1, TWO),
        connections: write_family(dir.path(), connections_file_name, 1, TWO),
    };
    let settings = layering_settings();
    let mut sink = InMemorySink::new();
    render_dual_sequence(&inputs, &settings, &LabelFonts::empty(), &mut sink).unwrap();

    let frame = &sink.frames()[0].1;
    assert_eq!(frame.width, 100);
    let mid = edge_midpoint(&settings, TWO, "0", "1");
    assert_eq!(pixel(frame, mid), [0, 0, 0, 255]);
}

#[test]
fn lone_connections_are_drawn_in_full() {
    const TWO: &str = "digraph {\n    0 -> 1\n}\n";
    let dir = tempfile::tempdir().unwrap();
    let inputs = DualInputs {
        neighbours: Vec::new(),
        connections: write_family(dir.path(), connections_file_name, 1, TWO),
    };
    let settings = layering_settings();
    let mut sink = InMemorySink::new();
    render_dual_sequence(&inputs, &settings, &LabelFonts::empty(), &mut sink).unwrap();

    let mid = edge_midpoint(&settings, TWO, "0", "1");
    assert_eq!(pixel(&sink.frames()[0].1, mid), [0, 0, 0, 255]);
}
