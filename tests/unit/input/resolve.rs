use super::*;

fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), "digraph {}\n").unwrap();
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn no_selection_fails_before_io() {
    let missing = Path::new("/definitely/not/a/real/dir");
    let err = resolve_dual(
        missing,
        PlotSelection {
            connections: false,
            neighbours: false,
        },
    )
    .unwrap_err();
    assert!(matches!(err, TopoError::NoGraphTypeSelected));
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn sorts_each_family_and_ignores_others() {
    let dir = tempfile::tempdir().unwrap();
    for n in [2, 0, 1] {
        touch(dir.path(), &neighbours_file_name(n));
        touch(dir.path(), &connections_file_name(n));
    }
    touch(dir.path(), "neighbours-notes.txt");
    touch(dir.path(), "hop-000.dot");
    std::fs::create_dir(dir.path().join("neighbours-dir.dot")).unwrap();

    let inputs = resolve_dual(
        dir.path(),
        PlotSelection {
            connections: true,
            neighbours: true,
        },
    )
    .unwrap();
    assert_eq!(
        names(&inputs.neighbours),
        vec!["neighbours-000.dot", "neighbours-001.dot", "neighbours-002.dot"]
    );
    assert_eq!(
        names(&inputs.connections),
        vec![
            "connections-000.dot",
            "connections-001.dot",
            "connections-002.dot"
        ]
    );
    assert_eq!(inputs.len(), 3);
    assert_eq!(
        inputs.reference().unwrap().file_name().unwrap(),
        "neighbours-000.dot"
    );
}

#[test]
fn reference_falls_back_to_connections() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &connections_file_name(0));
    touch(dir.path(), &neighbours_file_name(0));

    let inputs = resolve_dual(
        dir.path(),
        PlotSelection {
            connections: true,
            neighbours: false,
        },
    )
    .unwrap();
    assert!(inputs.neighbours.is_empty());
    assert_eq!(
        inputs.reference().unwrap().file_name().unwrap(),
        "connections-000.dot"
    );
}

#[test]
fn missing_family_reports_no_input_files() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &neighbours_file_name(0));

    let err = resolve_dual(
        dir.path(),
        PlotSelection {
            connections: true,
            neighbours: true,
        },
    )
    .unwrap_err();
    match &err {
        TopoError::NoInputFiles { pattern, .. } => assert_eq!(pattern, CONNECTIONS_PATTERN),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn count_mismatch_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), &neighbours_file_name(0));
    touch(dir.path(), &neighbours_file_name(1));
    touch(dir.path(), &connections_file_name(0));

    let err = resolve_dual(
        dir.path(),
        PlotSelection {
            connections: true,
            neighbours: true,
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        TopoError::CountMismatch {
            neighbours: 2,
            connections: 1
        }
    ));
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn propagation_requires_reference_first() {
    let dir = tempfile::tempdir().unwrap();
    let err = resolve_propagation(dir.path()).unwrap_err();
    assert!(matches!(err, TopoError::MissingReference(_)));
    assert_eq!(err.exit_code(), 3);

    touch(dir.path(), PROPAGATION_REFERENCE);
    let err = resolve_propagation(dir.path()).unwrap_err();
    assert_eq!(err.exit_code(), 2);

    touch(dir.path(), &hop_file_name(1));
    touch(dir.path(), &hop_file_name(0));
    let inputs = resolve_propagation(dir.path()).unwrap();
    assert_eq!(inputs.start, dir.path().join(PROPAGATION_REFERENCE));
    assert_eq!(names(&inputs.hops), vec!["hop-000.dot", "hop-001.dot"]);
}

#[test]
fn unreadable_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = list_matching(&dir.path().join("missing"), HOP_PATTERN).unwrap_err();
    assert!(matches!(err, TopoError::Other(_)));
}
