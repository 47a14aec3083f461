use trajectory_engine::atmosphere::air_density;
use trajectory_engine::constants::{GRAVITY_MPS2, GROUND_TOLERANCE_M};
use trajectory_engine::drag_integrator::drag_factor;
use trajectory_engine::{
    launch_angles_for_distance, solve_no_drag, solve_with_drag, solve_with_drag_sampled,
    Cannonball, CustomProjectile, DragIntegrator, ImpactAngleModel, LaunchParameters,
    Projectile, SimulationConfig,
};

#[test]
fn test_vacuum_range_matches_textbook_formula() {
    for &(v, angle) in &[(10.0, 45.0), (20.0, 30.0), (35.0, 60.0), (5.0, 10.0)] {
        let t = solve_no_drag(v, angle, 0.0, 50).unwrap();
        let expected = v * v * (2.0 * f64::to_radians(angle)).sin() / GRAVITY_MPS2;
        assert!((t.distance() - expected).abs() < 1e-4, "v={v} angle={angle}");
    }
}

#[test]
fn test_vacuum_range_is_symmetric_about_45_degrees() {
    for offset in [5.0, 15.0, 30.0] {
        let low = solve_no_drag(15.0, 45.0 - offset, 0.0, 10).unwrap();
        let high = solve_no_drag(15.0, 45.0 + offset, 0.0, 10).unwrap();
        assert!((low.distance() - high.distance()).abs() < 2e-4);
        assert!(low.air_time() < high.air_time());
    }
}

#[test]
fn test_range_grows_with_height_and_velocity() {
    let mut previous = 0.0;
    for h in [0.0, 1.0, 5.0, 20.0, 100.0] {
        let d = solve_no_drag(10.0, 30.0, h, 10).unwrap().distance();
        assert!(d > previous);
        previous = d;
    }

    let mut previous = 0.0;
    for v in [5.0, 10.0, 20.0, 40.0] {
        let d = solve_no_drag(v, 45.0, 0.0, 10).unwrap().distance();
        assert!(d > previous);
        previous = d;
    }

    let mut previous = 0.0;
    for v in [5.0, 10.0, 20.0, 40.0] {
        let d = solve_with_drag(&Cannonball, v, 30.0, 2.0).unwrap().distance();
        assert!(d > previous);
        previous = d;
    }
}

#[test]
fn test_paths_start_at_launch_point_and_end_on_ground() {
    let vacuum = solve_no_drag(12.0, 50.0, 3.0, 40).unwrap();
    assert_eq!(vacuum.first_point().x, 0.0);
    assert_eq!(vacuum.first_point().y, 3.0);
    assert!(vacuum.final_point().y.abs() < GROUND_TOLERANCE_M);
    assert!((vacuum.final_point().x - vacuum.distance()).abs() < 1e-4);

    let dragged = solve_with_drag(&Cannonball, 12.0, 50.0, 3.0).unwrap();
    assert_eq!(dragged.first_point().y, 3.0);
    assert!(dragged.final_point().y <= 0.0);
    assert!(dragged.points()[dragged.len() - 2].y > 0.0);
}

#[test]
fn test_drag_shortens_range_for_every_angle() {
    for angle in [10.0, 30.0, 45.0, 60.0, 80.0] {
        let vacuum = solve_no_drag(25.0, angle, 0.0, 10).unwrap();
        let dragged = solve_with_drag(&Cannonball, 25.0, angle, 0.0).unwrap();
        assert!(dragged.distance() < vacuum.distance(), "angle {angle}");
        let vacuum_apex = (25.0 * f64::to_radians(angle).sin()).powi(2) / (2.0 * GRAVITY_MPS2);
        assert!(dragged.max_height() < vacuum_apex, "angle {angle}");
    }
}

#[test]
fn test_cannonball_from_ten_meters() {
    let dragged = solve_with_drag(&Cannonball, 10.0, 45.0, 10.0).unwrap();
    assert!((dragged.air_time() - 2.321).abs() < 1e-3);
    assert!((dragged.distance() - 16.1357).abs() < 1e-3);
    assert_eq!(dragged.len(), 2322);

    let vacuum = solve_no_drag(10.0, 45.0, 10.0, 50).unwrap();
    assert!(dragged.distance() < vacuum.distance());
}

#[test]
fn test_terminal_velocity_angle_is_steeper_than_vacuum_with_drag() {
    let mut integrator = DragIntegrator::new();
    integrator.set_impact_angle_model(ImpactAngleModel::TerminalVelocity);
    let dragged = integrator.solve(&Cannonball, 10.0, 45.0, 10.0).unwrap();
    let vacuum = solve_no_drag(10.0, 45.0, 10.0, 10).unwrap();
    assert!(dragged.impact_angle_degrees() > vacuum.impact_angle_degrees());
}

#[test]
fn test_heavier_body_of_same_size_flies_further() {
    let light = CustomProjectile::sphere(0.5, 0.3).unwrap();
    let heavy = CustomProjectile::sphere(50.0, 0.3).unwrap();
    let light_range = solve_with_drag(&light, 30.0, 40.0, 0.0).unwrap().distance();
    let heavy_range = solve_with_drag(&heavy, 30.0, 40.0, 0.0).unwrap().distance();
    assert!(heavy_range > light_range);
}

#[test]
fn test_sampled_drag_path_has_requested_density() {
    let sampled = solve_with_drag_sampled(&Cannonball, 10.0, 45.0, 10.0, 200).unwrap();
    assert!(sampled.len() >= 195 && sampled.len() <= 205);

    let times: Vec<f64> = sampled.timed_points().map(|(t, _)| t).collect();
    assert_eq!(times[0], 0.0);
    assert!(times.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_launch_angles_land_on_target() {
    let angles = launch_angles_for_distance(15.0, 22.0, 2.0).unwrap().unwrap();
    for angle in [angles.low_degrees, angles.high_degrees] {
        let t = solve_no_drag(15.0, angle, 2.0, 20).unwrap();
        assert!((t.distance() - 22.0).abs() < 1e-3, "angle {angle}");
    }
}

#[test]
fn test_launch_parameters_drive_both_solvers() {
    let launch = LaunchParameters::new(10.0, 45.0, 10.0, 50);
    let vacuum = launch.solve_no_drag().unwrap();
    let dragged = launch.solve_with_drag(&Cannonball).unwrap();
    assert_eq!(vacuum.len(), 51);
    assert!(dragged.len() >= 45 && dragged.len() <= 52);
    assert!(dragged.distance() < vacuum.distance());
}

#[test]
fn test_trait_objects_are_accepted() {
    let bodies: Vec<Box<dyn Projectile + Sync>> = vec![
        Box::new(Cannonball),
        Box::new(CustomProjectile::new(1.0, 0.1, 0.3).unwrap()),
    ];
    for body in &bodies {
        let t = solve_with_drag(body.as_ref(), 20.0, 35.0, 0.0).unwrap();
        assert!(t.distance() > 0.0);
    }
}

#[test]
fn test_thinner_air_reduces_drag() {
    assert!(air_density(3000.0) < air_density(0.0));
    let sea_level = drag_factor(&Cannonball, 0.0);
    assert!((sea_level - 0.00169765).abs() < 1e-7);
    assert!(drag_factor(&Cannonball, 3000.0) < sea_level);
}

#[test]
fn test_config_file_round_trip() {
    let json = r#"{
        "launch": {"velocity": 10.0, "angle_degrees": 45.0, "initial_height": 10.0},
        "projectile": {"kind": "custom", "mass": 3.0, "diameter": 0.3, "drag_coefficient": 0.47}
    }"#;
    let path = std::env::temp_dir().join(format!("trajectory_props_{}.json", std::process::id()));
    std::fs::write(&path, json).unwrap();
    let config = SimulationConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let from_config = config.run().unwrap();
    let direct = solve_with_drag(&Cannonball, 10.0, 45.0, 10.0).unwrap();
    assert_eq!(from_config.distance(), direct.distance());
    assert_eq!(from_config.air_time(), direct.air_time());
}
