//! Integration test: config load, form parsing, feature alignment, model backends,
//! session pipeline and ledger.

use std::io::Write;
use std::path::Path;
use wear_monitor::{
    config::{ModelConfig, ModelKind, MonitorConfig},
    features::{FeatureBuilder, FeatureSchema, FeatureVector},
    health::ToolCondition,
    model::{load_model, predict_wear, rank_importances, Coefficient, LinearWearModel, WearModel},
    reading::{CaseId, MaterialId, RawReading, SensorReading},
    report::{ReportRecord, SessionLedger},
    session::DiagnosisSession,
    DerivedMetrics, MonitorError, WearEstimate,
};

const COLUMNS: [&str; 14] = [
    "run",
    "DOC",
    "feed",
    "smcAC",
    "smcDC",
    "vib_table",
    "vib_spindle",
    "AE_table",
    "AE_spindle",
    "case_1",
    "case_2",
    "case_3",
    "material_1",
    "material_2",
];

fn schema() -> FeatureSchema {
    FeatureSchema::new(COLUMNS.iter().map(|c| c.to_string()).collect()).unwrap()
}

fn reading() -> SensorReading {
    RawReading::default().parse().unwrap()
}

/// Returns a fixed raw value regardless of input.
struct FixedModel {
    schema: FeatureSchema,
    raw: f64,
}

impl WearModel for FixedModel {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, _features: &FeatureVector) -> wear_monitor::Result<f64> {
        Ok(self.raw)
    }
}

struct FailingModel {
    schema: FeatureSchema,
}

impl WearModel for FailingModel {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, _features: &FeatureVector) -> wear_monitor::Result<f64> {
        Err(MonitorError::Prediction("runtime unavailable".into()))
    }
}

#[test]
fn config_load_default() {
    let c = MonitorConfig::load(Path::new("nonexistent.json")).unwrap();
    assert_eq!(c.wear.failure_threshold, 0.7);
    assert_eq!(c.wear.avg_wear_rate, 0.02);
    assert_eq!(c.projection.horizon, 10);
    assert_eq!(c.report.display_limit, 10);
    assert_eq!(c.model.kind, ModelKind::Onnx);
    assert!(c.validate().is_ok());
}

#[test]
fn config_load_partial_file_keeps_defaults() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, r#"{{ "wear": {{ "failure_threshold": 0.8 }}, "log": {{ "json": false }} }}"#).unwrap();
    let c = MonitorConfig::load(f.path()).unwrap();
    assert_eq!(c.wear.failure_threshold, 0.8);
    assert_eq!(c.wear.avg_wear_rate, 0.02);
    assert!(!c.log.json);
    assert_eq!(c.log.level, "info");
}

#[test]
fn config_load_malformed_file_is_an_error() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, r#"{{ "wear": {{ "failure_threshold": "0.8" }} }}"#).unwrap();
    assert!(matches!(MonitorConfig::load(f.path()), Err(MonitorError::Config(_))));

    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, "{{ not json").unwrap();
    assert!(matches!(MonitorConfig::load(f.path()), Err(MonitorError::Config(_))));
}

#[test]
fn config_validate_rejects_bad_bands() {
    let mut c = MonitorConfig::default();
    c.condition.replace_soon_below = 0.9;
    assert!(matches!(c.validate(), Err(MonitorError::Config(_))));

    let mut c = MonitorConfig::default();
    c.projection.horizon = 0;
    assert!(c.validate().is_err());

    let mut c = MonitorConfig::default();
    c.wear.avg_wear_rate = 0.0;
    assert!(c.validate().is_err());
}

#[test]
fn raw_reading_defaults_parse() {
    let r = reading();
    assert_eq!(r.case, CaseId::One);
    assert_eq!(r.material, MaterialId::One);
    assert_eq!(r.run, 1);
    assert_eq!(r.doc, 1.5);
    assert_eq!(r.feed, 0.5);
    assert!((r.load_factor() - 1.55).abs() < 1e-12);
}

#[test]
fn raw_reading_rejects_bad_fields() {
    let raw = RawReading {
        feed: "fast".into(),
        ..RawReading::default()
    };
    match raw.parse() {
        Err(MonitorError::Validation { field, .. }) => assert_eq!(field, "feed"),
        other => panic!("expected validation error, got {other:?}"),
    }

    let raw = RawReading {
        run: "0".into(),
        ..RawReading::default()
    };
    assert!(matches!(raw.parse(), Err(MonitorError::Validation { field: "run", .. })));

    let raw = RawReading {
        case: 4,
        ..RawReading::default()
    };
    assert!(matches!(raw.parse(), Err(MonitorError::Validation { field: "case", .. })));

    let raw = RawReading {
        ae_spindle: "NaN".into(),
        ..RawReading::default()
    };
    assert!(raw.parse().is_err());
}

#[test]
fn raw_reading_json_requires_every_known_field() {
    // misspelled keys must not fall back to the form placeholders
    assert!(serde_json::from_str::<RawReading>(r#"{"DOC":"9.9"}"#).is_err());
    assert!(serde_json::from_str::<RawReading>(r#"{"DOC":"9.9","Feed":"3.0"}"#).is_err());

    let mut full = serde_json::to_value(RawReading::default()).unwrap();
    full["doc"] = "2.0".into();
    let parsed: RawReading = serde_json::from_value(full.clone()).unwrap();
    assert_eq!(parsed.parse().unwrap().doc, 2.0);

    full.as_object_mut().unwrap().remove("feed");
    assert!(serde_json::from_value::<RawReading>(full.clone()).is_err());

    full["feed"] = "0.5".into();
    full["coolant"] = "on".into();
    assert!(serde_json::from_value::<RawReading>(full).is_err());
}

#[test]
fn raw_reading_trims_whitespace() {
    let raw = RawReading {
        doc: " 2.25 ".into(),
        ..RawReading::default()
    };
    assert_eq!(raw.parse().unwrap().doc, 2.25);
}

#[test]
fn features_align_to_schema() {
    let mut r = reading();
    r.case = CaseId::Two;
    r.material = MaterialId::Two;
    let fv = FeatureBuilder::new(schema()).build(&r).unwrap();

    assert_eq!(fv.columns, COLUMNS.iter().map(|c| c.to_string()).collect::<Vec<_>>());
    assert_eq!(fv.get("DOC"), Some(1.5));
    assert_eq!(fv.get("case_1"), Some(0.0));
    assert_eq!(fv.get("case_2"), Some(1.0));
    assert_eq!(fv.get("case_3"), Some(0.0));
    assert_eq!(fv.get("material_2"), Some(1.0));
    // plain "case"/"material" columns are not in this schema and are dropped
    assert_eq!(fv.get("case"), None);
}

#[test]
fn features_zero_fill_unknown_columns() {
    let s = FeatureSchema::new(vec!["feed".into(), "coolant_temp".into(), "case".into()]).unwrap();
    let fv = FeatureBuilder::new(s).build(&reading()).unwrap();
    assert_eq!(fv.values, vec![0.5, 0.0, 1.0]);
}

#[test]
fn features_reject_unalignable_schema() {
    let s = FeatureSchema::new(vec!["spindle_rpm".into(), "torque".into()]).unwrap();
    let err = FeatureBuilder::new(s).build(&reading()).unwrap_err();
    assert!(matches!(err, MonitorError::SchemaMismatch(_)));

    assert!(FeatureSchema::new(vec![]).is_err());
    assert!(FeatureSchema::new(vec!["DOC".into(), "DOC".into()]).is_err());
}

#[test]
fn features_keep_large_run_numbers_exact() {
    let mut r = reading();
    r.run = 16_777_217;
    let fv = FeatureBuilder::new(schema()).build(&r).unwrap();
    assert_eq!(fv.get("run"), Some(16_777_217.0));
}

#[test]
fn prediction_is_clamped_to_zero() {
    let model = FixedModel {
        schema: schema(),
        raw: -0.25,
    };
    let fv = FeatureBuilder::new(schema()).build(&reading()).unwrap();
    assert_eq!(predict_wear(&model, &fv).unwrap().value(), 0.0);
}

#[test]
fn non_finite_prediction_is_an_error() {
    let model = FixedModel {
        schema: schema(),
        raw: f64::NAN,
    };
    let fv = FeatureBuilder::new(schema()).build(&reading()).unwrap();
    assert!(matches!(predict_wear(&model, &fv), Err(MonitorError::Prediction(_))));
}

#[test]
fn linear_model_from_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(
        f,
        r#"{{ "intercept": 0.1, "coefficients": [
            {{ "feature": "DOC", "weight": 0.2 }},
            {{ "feature": "feed", "weight": -0.1 }},
            {{ "feature": "case_1", "weight": 0.1 }}
        ] }}"#
    )
    .unwrap();
    let model = load_model(&ModelConfig {
        kind: ModelKind::Linear,
        path: f.path().to_path_buf(),
        metadata_path: None,
    })
    .unwrap();

    let fv = FeatureBuilder::new(model.schema().clone()).build(&reading()).unwrap();
    // 0.1 + 0.2*1.5 - 0.1*0.5 + 0.1*1
    let raw = model.predict(&fv).unwrap();
    assert!((raw - 0.45).abs() < 1e-6);

    let ranked = rank_importances(model.as_ref()).unwrap();
    assert_eq!(ranked[0].feature, "DOC");
    assert!((ranked[0].importance - 0.5).abs() < 1e-6);
    let total: f32 = ranked.iter().map(|r| r.importance).sum();
    assert!((total - 1.0).abs() < 1e-6);
}

#[test]
fn linear_model_rejects_foreign_row() {
    let model = LinearWearModel::new(
        0.0,
        vec![Coefficient {
            feature: "DOC".into(),
            weight: 1.0,
        }],
    )
    .unwrap();
    let fv = FeatureBuilder::new(schema()).build(&reading()).unwrap();
    assert!(matches!(model.predict(&fv), Err(MonitorError::SchemaMismatch(_))));
}

#[test]
fn missing_model_file_fails_load() {
    let err = load_model(&ModelConfig::default()).err().unwrap();
    assert!(matches!(err, MonitorError::ModelLoad { .. }));

    let err = load_model(&ModelConfig {
        kind: ModelKind::Linear,
        path: "nonexistent.json".into(),
        metadata_path: None,
    })
    .err()
    .unwrap();
    assert!(matches!(err, MonitorError::ModelLoad { .. }));
}

#[test]
fn importances_absent_degrades_to_none() {
    let model = FixedModel {
        schema: schema(),
        raw: 0.3,
    };
    assert!(rank_importances(&model).is_none());
}

#[test]
fn session_runs_full_pipeline() {
    let model = FixedModel {
        schema: schema(),
        raw: 0.5,
    };
    let mut session = DiagnosisSession::new(&model, MonitorConfig::default());
    let d = session.diagnose_raw(&RawReading::default()).unwrap();

    assert_eq!(d.wear.value(), 0.5);
    assert_eq!(d.metrics.remaining_cycles, 10);
    assert_eq!(d.condition, ToolCondition::ReplaceSoon);
    assert_eq!(d.projection.len(), 10);
    assert!(d.importances.is_none());

    let reports = session.recent_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, d.record_id);
    assert_eq!(reports[0].predicted_wear, 0.5);
    assert_eq!(reports[0].remaining_life_percent, 28.6);
    assert_eq!(reports[0].health_score, 29.0);
}

#[test]
fn failed_requests_leave_ledger_untouched() {
    let model = FailingModel { schema: schema() };
    let mut session = DiagnosisSession::new(&model, MonitorConfig::default());
    assert!(matches!(
        session.diagnose_raw(&RawReading::default()),
        Err(MonitorError::Prediction(_))
    ));

    let bad = RawReading {
        doc: "abc".into(),
        ..RawReading::default()
    };
    assert!(matches!(session.diagnose_raw(&bad), Err(MonitorError::Validation { .. })));
    assert!(session.ledger().is_empty());
}

#[test]
fn bad_input_lines_fail_only_their_request() {
    let model = FixedModel {
        schema: schema(),
        raw: 0.3,
    };
    let mut session = DiagnosisSession::new(&model, MonitorConfig::default());
    let good = serde_json::to_vec(&RawReading::default()).unwrap();

    assert!(session.submit_line(&good).unwrap().is_ok());
    assert!(matches!(
        session.submit_line(b"\xff\xfe"),
        Some(Err(MonitorError::Validation { field: "submission", .. }))
    ));
    assert!(matches!(
        session.submit_line(br#"{"run":"2"}"#),
        Some(Err(MonitorError::Validation { .. }))
    ));
    assert!(session.submit_line(b"  \r").is_none());

    let mut second = good.clone();
    second.push(b'\r');
    assert!(session.submit_line(&second).unwrap().is_ok());
    assert_eq!(session.ledger().len(), 2);
}

#[test]
fn recent_reports_capped_at_display_limit() {
    let model = FixedModel {
        schema: schema(),
        raw: 0.2,
    };
    let mut session = DiagnosisSession::new(&model, MonitorConfig::default());
    for run in 1..=12u32 {
        let mut r = reading();
        r.run = run;
        session.diagnose(&r).unwrap();
    }
    let recent = session.recent_reports();
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].reading.run, 12);
    assert_eq!(recent[9].reading.run, 3);
    assert_eq!(session.ledger().len(), 12);
}

#[test]
fn sessions_do_not_share_ledgers() {
    let model = FixedModel {
        schema: schema(),
        raw: 0.1,
    };
    let mut a = DiagnosisSession::new(&model, MonitorConfig::default());
    let b = DiagnosisSession::new(&model, MonitorConfig::default());
    a.diagnose(&reading()).unwrap();
    assert_eq!(a.ledger().len(), 1);
    assert!(b.ledger().is_empty());
}

#[test]
fn ledger_is_newest_first() {
    let metrics = DerivedMetrics::compute(WearEstimate::from_raw(0.1).unwrap(), 0.7, 0.02);
    let wear = WearEstimate::from_raw(0.1).unwrap();
    let r1 = ReportRecord::new(reading(), wear, &metrics);
    let mut second = reading();
    second.run = 2;
    let r2 = ReportRecord::new(second, wear, &metrics);

    let mut ledger = SessionLedger::new();
    ledger.append(r1.clone());
    ledger.append(r2.clone());

    assert_eq!(ledger.recent(2), vec![&r2, &r1]);
    assert_eq!(ledger.recent(1), vec![&r2]);
    assert_eq!(ledger.recent(5).len(), 2);

    // duplicates are kept
    ledger.append(r1.clone());
    assert_eq!(ledger.len(), 3);
}

#[test]
fn report_record_serializes_flat() {
    let wear = WearEstimate::from_raw(0.12345).unwrap();
    let metrics = DerivedMetrics::compute(wear, 0.7, 0.02);
    let record = ReportRecord::new(reading(), wear, &metrics);
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["case"], 1);
    assert_eq!(json["material"], 1);
    assert_eq!(json["predicted_wear"], 0.123);
    let back: ReportRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}
