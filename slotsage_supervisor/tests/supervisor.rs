use slotsage_core::Observation;
use slotsage_supervisor::{
    BasicObservationBuilder, CountSanitizer, EstimateReport, FieldReading, ObservationBuilder,
    ProfileRegistry, RegistryError,
};

const PROFILE_JSON: &str = r#"{
    "setting_count": 6,
    "event_types": [
        {
            "id": "bonus",
            "label": "Bonus triggers",
            "rates": [300.0, 280.0, 260.0, 240.0, 220.0, 200.0],
            "weight_policy": "slow_converge"
        },
        {
            "id": "cherry",
            "label": "Small-prize hits",
            "rates": [40.0, 38.0, 36.0, 34.0, 32.0, 30.0]
        },
        {
            "id": "rainbow_flash",
            "label": "Rainbow flash",
            "rates": [0, 0, 0, 0, 0, 0],
            "discrimination": false
        }
    ],
    "weight_policies": {
        "slow_converge": [
            { "trials": 1000, "multiplier": 0.3 },
            { "trials": 8000, "multiplier": 1.0 }
        ]
    },
    "forced_overrides": [
        { "trigger": "rainbow_flash", "setting": 6 }
    ],
    "denial_ladder": []
}"#;

#[test]
fn json_profile_loads_and_estimates() {
    let mut registry = ProfileRegistry::new();
    registry
        .insert_json("mach-777", PROFILE_JSON)
        .expect("profile should load");

    let obs = Observation::new(3000)
        .with_count("bonus", 12)
        .with_count("cherry", 90);
    let result = registry.estimate("mach-777", &obs).expect("machine known");
    assert_eq!(result.len(), 6);
    let total: f64 = result.iter().map(|e| e.percent).sum();
    assert!((total - 100.0).abs() < 1e-6);
}

#[test]
fn forced_override_survives_the_json_round_trip() {
    let mut registry = ProfileRegistry::new();
    registry.insert_json("mach-777", PROFILE_JSON).unwrap();

    let obs = Observation::new(3000).with_count("rainbow_flash", 1);
    let result = registry.estimate("mach-777", &obs).unwrap();
    assert_eq!(result[5].setting, 6);
    assert_eq!(result[5].percent, 100.0);
}

#[test]
fn invalid_profile_is_rejected_at_insertion() {
    let bad = r#"{
        "setting_count": 2,
        "event_types": [
            { "id": "a", "rates": [100.0, 50.0], "conflicts_with": ["ghost"] }
        ]
    }"#;
    let mut registry = ProfileRegistry::new();
    let err = registry.insert_json("mach-1", bad).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidProfile(_)));
    assert!(registry.get("mach-1").is_none());
}

#[test]
fn malformed_json_is_a_parse_error() {
    let mut registry = ProfileRegistry::new();
    let err = registry.insert_json("mach-1", "{ not json").unwrap_err();
    assert!(matches!(err, RegistryError::Parse(_)));
}

#[test]
fn unknown_machine_is_an_error() {
    let registry = ProfileRegistry::new();
    let err = registry.estimate("nope", &Observation::new(100)).unwrap_err();
    assert!(matches!(err, RegistryError::UnknownMachine(_)));
}

#[test]
fn machine_ids_are_sorted() {
    let mut registry = ProfileRegistry::new();
    registry.insert_json("zeta", PROFILE_JSON).unwrap();
    registry.insert_json("alpha", PROFILE_JSON).unwrap();
    assert_eq!(registry.machine_ids(), vec!["alpha", "zeta"]);
}

#[test]
fn report_round_trips_through_json() {
    let mut registry = ProfileRegistry::new();
    registry.insert_json("mach-777", PROFILE_JSON).unwrap();

    let obs = Observation::new(3000)
        .with_count("bonus", 12)
        .with_count("cherry", 90);
    let report = registry.report("mach-777", &obs).unwrap();
    assert_eq!(report.machine_id, "mach-777");
    assert_eq!(report.total_trials, 3000);
    assert_eq!(report.estimates.len(), 6);

    let json = serde_json::to_string(&report).expect("serialize");
    let back: EstimateReport = serde_json::from_str(&json).expect("deserialize");
    let total: f64 = back.estimates.iter().map(|e| e.percent).sum();
    assert!((total - 100.0).abs() < 1e-6);
}

#[test]
fn sanitizer_coerces_garbage_to_zero() {
    let s = CountSanitizer::default();
    assert_eq!(s.coerce(None), 0);
    assert_eq!(s.coerce(Some(f64::NAN)), 0);
    assert_eq!(s.coerce(Some(f64::INFINITY)), 0);
    assert_eq!(s.coerce(Some(-3.0)), 0);
    assert_eq!(s.coerce(Some(0.0)), 0);
    assert_eq!(s.coerce(Some(12.9)), 12);
    assert_eq!(s.coerce(Some(2e12)), 1_000_000);
}

#[test]
fn builder_assembles_an_observation() {
    let builder = BasicObservationBuilder::default();
    let readings = [
        FieldReading::new("bonus", 12.0),
        FieldReading::blank("cherry"),
        FieldReading::new("bonus", 14.0), // later reading wins
    ];
    let obs = builder.build(Some(3000.0), &readings);
    assert_eq!(obs.total_trials, 3000);
    assert_eq!(obs.count("bonus"), 14);
    assert_eq!(obs.count("cherry"), 0);
    assert_eq!(obs.count("never_entered"), 0);
}
