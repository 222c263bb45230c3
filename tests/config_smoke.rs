use tilestep_engine::{EngineError, Vec2, WorldCore};

#[test]
fn config_json_drives_the_world() {
    let json = r#"{
        "gravity": -0.02,
        "max_speed": 0.5,
        "frame_rate": 30.0,
        "defaults": { "elasticity": 0.25 }
    }"#;
    let mut world = WorldCore::from_config_json(8, 8, json).expect("config should parse");

    assert_eq!(world.params().gravity, -0.02);
    assert_eq!(world.params().defaults.elasticity, 0.25);
    // unspecified fields keep their defaults
    assert_eq!(world.params().defaults.mass, 1.0);

    let id = world.spawn(Vec2::new(4.0, 4.0), Vec2::ONE);
    assert_eq!(world.entity(id).map(|e| e.elasticity), Some(0.25));

    for _ in 0..30 {
        world.step();
    }
    assert!((world.time() - 1.0).abs() < 1e-9);

    let reloaded = WorldCore::from_config_json(8, 8, &world.params_json()).expect("round trip");
    assert_eq!(reloaded.params(), world.params());
}

#[test]
fn bad_config_is_rejected() {
    match WorldCore::from_config_json(8, 8, r#"{ "frame_rate": 0 }"#) {
        Err(EngineError::Config(_)) => {}
        other => panic!("expected config error, got {:?}", other.map(|_| ())),
    }
    assert!(WorldCore::from_config_json(8, 8, "not json").is_err());
}
