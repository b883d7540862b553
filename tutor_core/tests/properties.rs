//! Formula invariants over the whole slider ranges

use proptest::prelude::*;

use tutor_core::evaluator::{MohrCircle, PointLoadBeam};
use tutor_core::tutoring::check_numeric_match;
use tutor_core::{evaluate, LabTopic, Quantity, SliderInputs, TutorError};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #[test]
    fn direct_stress_is_force_over_area(force in 1.0f64..100.0, area in 100.0f64..2000.0) {
        let inputs = SliderInputs::Axial { force_kn: force, area_mm2: area };
        let derived = evaluate(LabTopic::DirectStress, &inputs).unwrap();
        let stress = derived.get(Quantity::Stress).unwrap();
        prop_assert!(close(stress, force * 1000.0 / area));
    }

    #[test]
    fn non_positive_area_is_a_domain_error(force in -100.0f64..100.0, area in -2000.0f64..=0.0) {
        let inputs = SliderInputs::Axial { force_kn: force, area_mm2: area };
        for topic in [LabTopic::DirectStress, LabTopic::MaterialProperties, LabTopic::Torsion] {
            let err = evaluate(topic, &inputs).unwrap_err();
            prop_assert!(matches!(err, TutorError::Domain { .. }), "{:?}", err);
        }
    }

    #[test]
    fn beam_reactions_balance_the_load(force in 1.0f64..100.0, raw in 0.0f64..1000.0) {
        let inputs = SliderInputs::PointLoadBeam { force_kn: force, load_position: raw, area_mm2: 817.0 };
        let derived = evaluate(LabTopic::ShearAndMoment, &inputs).unwrap();
        let r1 = derived.get(Quantity::ReactionLeft).unwrap();
        let r2 = derived.get(Quantity::ReactionRight).unwrap();
        prop_assert!(close(r1 + r2, force));

        let position = derived.get(Quantity::LoadPosition).unwrap();
        prop_assert!((0.05..=0.95).contains(&position));
    }

    #[test]
    fn moment_under_load_is_r1_times_position(force in 1.0f64..100.0, position in 0.05f64..=0.95) {
        let beam = PointLoadBeam { force_kn: force, position };
        let expected = beam.reaction_left_kn() * position;
        prop_assert!(close(beam.moment_at(position), expected));
        prop_assert!(close(beam.max_moment_knm(), expected));
        // Moment vanishes at both supports
        prop_assert!(beam.moment_at(0.0).abs() < 1e-9);
        prop_assert!(beam.moment_at(1.0).abs() < 1e-9);
    }

    #[test]
    fn shear_steps_down_by_the_load(force in 1.0f64..100.0, position in 0.05f64..=0.95) {
        let beam = PointLoadBeam { force_kn: force, position };
        let before = beam.shear_at(position - 1e-6);
        let after = beam.shear_at(position + 1e-6);
        prop_assert!(close(before - after, force));
    }

    #[test]
    fn shear_integrates_to_moment(force in 1.0f64..100.0, position in 0.05f64..=0.95, x in 0.0f64..=1.0) {
        let beam = PointLoadBeam { force_kn: force, position };
        let steps = 2000;
        let dx = x / steps as f64;
        let integral: f64 = (0..steps).map(|i| beam.shear_at((i as f64 + 0.5) * dx) * dx).sum();
        // One step of width dx may straddle the jump
        prop_assert!((integral - beam.moment_at(x)).abs() <= force * dx + 1e-9);
    }

    #[test]
    fn mohr_invariants(sx in -200.0f64..200.0, sy in -200.0f64..200.0, txy in -100.0f64..100.0) {
        let circle = MohrCircle::from_components(sx, sy, txy);
        prop_assert!(circle.radius_mpa >= 0.0);
        prop_assert!(circle.sigma_1_mpa >= circle.sigma_2_mpa);
        prop_assert!(close(circle.sigma_1_mpa - circle.sigma_2_mpa, 2.0 * circle.radius_mpa));
        prop_assert!(close(circle.sigma_1_mpa + circle.sigma_2_mpa, sx + sy));
        prop_assert_eq!(circle.theta_s_deg, circle.theta_p_deg - 45.0);

        for (sigma, tau) in [circle.x_face_point(), circle.y_face_point()] {
            let distance = ((sigma - circle.center_mpa).powi(2) + tau.powi(2)).sqrt();
            prop_assert!(close(distance, circle.radius_mpa));
        }
    }

    #[test]
    fn principal_element_carries_principal_stresses(
        sx in -200.0f64..200.0,
        sy in -200.0f64..200.0,
        txy in -100.0f64..100.0,
    ) {
        let circle = MohrCircle::from_components(sx, sy, txy);
        let element = circle.principal_element();
        prop_assert!((element.tau_mpa).abs() < 1e-9 * (1.0 + circle.radius_mpa));
        prop_assert!((element.sigma_x_mpa - circle.sigma_1_mpa).abs() < 1e-9 * (1.0 + circle.radius_mpa + circle.center_mpa.abs()));
    }

    #[test]
    fn from_pairs_stays_in_slider_range(force in -1.0e6f64..1.0e6, area in -1.0e6f64..1.0e6) {
        let inputs = SliderInputs::from_pairs(LabTopic::Torsion, &[("P", force), ("A", area)]).unwrap();
        for (spec, value) in inputs.pairs() {
            prop_assert!(value >= spec.min && value <= spec.max, "{} = {}", spec.key, value);
        }
        // Clamped inputs always evaluate
        prop_assert!(evaluate(LabTopic::Torsion, &inputs).is_ok());
    }

    #[test]
    fn exact_answer_always_matches(target in -1.0e4f64..1.0e4) {
        let answer = format!("my answer is {}", target);
        prop_assert!(check_numeric_match(&answer, target, 0.05));
    }

    #[test]
    fn evaluate_is_idempotent(topic_index in 0usize..7, force in 1.0f64..100.0, raw in 0.0f64..1000.0) {
        let topic = LabTopic::ALL[topic_index];
        let inputs = SliderInputs::from_pairs(topic, &[]).unwrap();
        let inputs = match inputs {
            SliderInputs::PointLoadBeam { area_mm2, .. } => {
                SliderInputs::PointLoadBeam { force_kn: force, load_position: raw, area_mm2 }
            }
            other => other,
        };
        let first = evaluate(topic, &inputs).unwrap();
        let second = evaluate(topic, &inputs).unwrap();
        prop_assert_eq!(first, second);
        prop_assert!(first.fits(topic));
    }
}
