use squarekit_camtools::{CamToolError, DocumentAssembler};
use squarekit_settings::Config;
use std::fs;
use tempfile::tempdir;

const PRELUDE: &str = "; params\nG21\nG90\nM82\nM104 S210\nG28\n";

fn e_value(line: &str) -> f64 {
    let start = line.find(" E").expect("line has an E word") + 2;
    line[start..]
        .split_whitespace()
        .next()
        .unwrap()
        .parse()
        .unwrap()
}

fn z_value(line: &str) -> f64 {
    line.trim_start_matches("G0 Z").parse().unwrap()
}

fn config_in(dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.output.prelude_path = dir.join("params.gcode");
    config.output.output_path = dir.join("square.gcode");
    config
}

#[test]
fn test_default_print_layout() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    fs::write(&config.output.prelude_path, PRELUDE).unwrap();

    let assembler = DocumentAssembler::new(config.clone()).unwrap();
    let stats = assembler.assemble_files().unwrap();
    assert_eq!(stats.layers, 25);

    let text = fs::read_to_string(&config.output.output_path).unwrap();
    assert!(text.starts_with(PRELUDE));

    let body: Vec<&str> = text[PRELUDE.len()..].lines().collect();

    // Purge: approach, blank, 16 legs, reset, blank
    assert_eq!(body[0], "G0 X10 Y10 Z0.2 F3000");
    assert_eq!(body[1], "");
    let purge = &body[2..18];
    assert!(purge.iter().all(|l| l.starts_with("G1 ") && l.ends_with(" F1200")));
    let purge_e: Vec<f64> = purge.iter().map(|l| e_value(l)).collect();
    assert!(purge_e.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(body[18], "G92 E0.0");
    assert_eq!(body[19], "");
    assert_eq!(body.iter().filter(|l| l.starts_with("G92")).count(), 1);

    // Approach onto the first corner
    assert_eq!(body[20], "G0 X82 Y82 Z0.2 F3000;");
    assert_eq!(body[21], "");

    // 25 layers of 4 moves, a Z step and a blank line
    let layers = &body[22..22 + 25 * 6];
    let mut wall_e = Vec::new();
    let mut heights = Vec::new();
    for layer in layers.chunks(6) {
        assert!(layer[0].starts_with("G1 X118 Y82 E"));
        assert!(layer[1].starts_with("G1 X118 Y118 E"));
        assert!(layer[2].starts_with("G1 X82 Y118 E"));
        assert!(layer[3].starts_with("G1 X82 Y82 E"));
        wall_e.extend(layer[..4].iter().map(|l| e_value(l)));
        assert!(layer[4].starts_with("G0 Z"));
        heights.push(z_value(layer[4]));
        assert_eq!(layer[5], "");
    }
    assert_eq!(wall_e.len(), 100);
    assert!(wall_e.windows(2).all(|w| w[1] > w[0]));
    assert!(wall_e[0] < purge_e[15]);
    assert!(heights.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(heights[0], 0.4);
    assert_eq!(heights[24], 5.2);

    // Parking
    let tail = &body[22 + 25 * 6..];
    assert_eq!(tail, ["G0 X-33 Y-10 Z20", "G0 Z0", ""]);
}

#[test]
fn test_output_is_deterministic() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    fs::write(&config.output.prelude_path, PRELUDE).unwrap();
    let assembler = DocumentAssembler::new(config.clone()).unwrap();

    assembler.assemble_files().unwrap();
    let first = fs::read(&config.output.output_path).unwrap();
    assembler.assemble_files().unwrap();
    let second = fs::read(&config.output.output_path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_missing_prelude_creates_no_output() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    let assembler = DocumentAssembler::new(config.clone()).unwrap();

    let err = assembler.assemble_files().unwrap_err();
    assert!(matches!(err, CamToolError::PreludeUnreadable { .. }));
    assert!(!config.output.output_path.exists());
}

#[test]
fn test_unwritable_output() {
    let dir = tempdir().unwrap();
    let mut config = config_in(dir.path());
    fs::write(&config.output.prelude_path, PRELUDE).unwrap();
    config.output.output_path = dir.path().join("missing").join("square.gcode");

    let err = DocumentAssembler::new(config)
        .unwrap()
        .assemble_files()
        .unwrap_err();
    assert!(matches!(err, CamToolError::OutputUnwritable { .. }));
    assert!(err.is_open_failure());
}

#[test]
fn test_existing_output_is_truncated() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path());
    fs::write(&config.output.prelude_path, "").unwrap();
    fs::write(&config.output.output_path, "x".repeat(100_000)).unwrap();

    DocumentAssembler::new(config.clone())
        .unwrap()
        .assemble_files()
        .unwrap();

    let text = fs::read_to_string(&config.output.output_path).unwrap();
    assert!(text.starts_with("G0 X10 Y10 Z0.2 F3000\n"));
    assert!(!text.contains('x'));
}
