use squarekit_camtools::{
    ExtrusionCalculator, Instruction, PurgeGenerator, SquareLayerGenerator, SquareParameters,
};
use squarekit_core::{NumberFormat, Point};
use squarekit_settings::{Config, LayerCountMode};

#[test]
fn test_delta_e_scales_with_distance() {
    let calc = ExtrusionCalculator::new(0.4, 0.2, 1.75);
    let a = Point::new(100.0, 100.0);
    let one = calc.delta_e(a, Point::new(110.0, 100.0));
    let two = calc.delta_e(a, Point::new(120.0, 100.0));
    assert!((two - 2.0 * one).abs() < 1e-12);
    assert_eq!(calc.delta_e(a, a), 0.0);
}

#[test]
fn test_purge_text_shape() {
    let text = PurgeGenerator::from_config(&Config::default()).generate(NumberFormat::Compat);
    let g1 = text.lines().filter(|l| l.starts_with("G1")).count();
    assert_eq!(g1, 16);
    assert!(text.ends_with("G92 E0.0\n"));
}

#[test]
fn test_fractional_height_drops_last_layer() {
    let mut config = Config::default();
    config.shape.height = 1.1;
    let gen = SquareLayerGenerator::from_config(&config);
    assert_eq!(gen.params().layer_count, 5);
    let text = gen.generate(NumberFormat::Compat);
    assert_eq!(text.lines().filter(|l| l.starts_with("G0 Z")).count(), 5);
    assert_eq!(text.lines().filter(|l| l.starts_with("G1")).count(), 20);

    config.shape.layer_count_mode = LayerCountMode::Round;
    config.shape.height = 1.15;
    let gen = SquareLayerGenerator::from_config(&config);
    assert_eq!(gen.params().layer_count, 6);
}

#[test]
fn test_custom_square() {
    let params = SquareParameters {
        center: Point::new(50.0, 60.0),
        side_length: 10.0,
        layer_thickness: 0.3,
        layer_count: 2,
        flow_multiplier: 1.0,
        rapid_feed: 6000,
        extrude_feed: 1800,
    };
    let calc = ExtrusionCalculator::new(0.4, 0.3, 1.75);
    let gen = SquareLayerGenerator::new(params, calc);

    assert_eq!(
        gen.approach().render(NumberFormat::Compat),
        "G0 X45 Y55 Z0.3 F6000;"
    );
    let instructions: Vec<Instruction> = gen.layers().collect();
    assert_eq!(instructions.len(), 12);
    assert_eq!(
        instructions[0],
        Instruction::Extrude {
            to: Point::new(55.0, 55.0),
            e: calc.delta_e(Point::new(45.0, 55.0), Point::new(55.0, 55.0)),
            feed: 1800,
        }
    );
    assert_eq!(instructions[4], Instruction::RapidZ { z: 0.6 });
}
