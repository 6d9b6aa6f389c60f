use std::{fs, path::PathBuf};

use essaymark::{
    Document, Grader,
    model::{
        ModelArtifact, ModelError, ModelScorer, ScoreSource,
        train::{SampleFormat, TrainConfig, TrainingSample, load_samples, train},
    },
};
use uuid::Uuid;

fn temp_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("essaymark-model-{}", Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp root");
    root
}

fn samples() -> Vec<TrainingSample> {
    (0..20)
        .map(|i| TrainingSample {
            essay: "The river bends slowly past the old mill. ".repeat(i + 1),
            score: 40.0 + 2.0 * i as f64,
        })
        .collect()
}

fn small_config() -> TrainConfig {
    TrainConfig::builder().trees(20).max_depth(3).build()
}

#[test]
fn training_holds_out_every_fifth_sample() {
    let (_, report) = train(&Grader::default(), &samples(), &small_config()).expect("train");

    assert_eq!(report.trained_on, 16);
    assert_eq!(report.validated_on, 4);
    let mae = report.validation_mae.expect("validation ran");
    assert!(mae.is_finite() && mae >= 0.0);
}

#[test]
fn artifact_round_trips_through_disk() {
    let root = temp_root();
    let path = root.join("nested").join("essay_scorer.json");
    let grader = Grader::default();

    let (artifact, _) = train(&grader, &samples(), &small_config()).expect("train");
    artifact.save(&path).expect("save");

    let loaded = ModelArtifact::load(&path)
        .expect("load")
        .expect("artifact exists");
    let features = grader.features(&Document::new("The river bends slowly past the old mill."));
    assert!((artifact.predict(&features) - loaded.predict(&features)).abs() < 1e-4);

    let trained = Grader::builder()
        .model(ModelScorer::from_path(&path))
        .build();
    assert!(trained.model().is_trained());
    let result = trained.grade("The river bends slowly past the old mill.");
    assert_eq!(result.extended.model.source, ScoreSource::Trained);
    assert!((0.0..=100.0).contains(&result.extended.model.score));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn schema_mismatch_falls_back_to_formula() {
    let root = temp_root();
    let path = root.join("essay_scorer.json");

    let (artifact, _) = train(&Grader::default(), &samples(), &small_config()).expect("train");
    let mut json = serde_json::to_value(&artifact).expect("serialize");
    json["schema"]["features"][0] = "character_count".into();
    fs::write(&path, json.to_string()).expect("write");

    assert!(matches!(
        ModelArtifact::load(&path),
        Err(ModelError::SchemaMismatch { .. })
    ));

    let grader = Grader::builder()
        .model(ModelScorer::from_path(&path))
        .build();
    assert!(!grader.model().is_trained());
    assert_eq!(
        grader.grade("Short text here.").extended.model.source,
        ScoreSource::Heuristic
    );

    let _ = fs::remove_dir_all(root);
}

#[test]
fn corrupt_artifact_is_a_parse_error() {
    let root = temp_root();
    let path = root.join("essay_scorer.json");
    fs::write(&path, "{ not json").expect("write");

    assert!(matches!(ModelArtifact::load(&path), Err(ModelError::Parse(_))));
    assert!(!ModelScorer::from_path(&path).is_trained());

    let _ = fs::remove_dir_all(root);
}

#[test]
fn empty_training_set_is_rejected() {
    let grader = Grader::default();
    assert!(matches!(
        train(&grader, &[], &TrainConfig::default()),
        Err(ModelError::EmptyTrainingSet)
    ));

    let only_holdout = TrainConfig::builder().holdout_every(1).build();
    assert!(matches!(
        train(&grader, &samples(), &only_holdout),
        Err(ModelError::EmptyTrainingSet)
    ));
}

#[test]
fn samples_load_from_json() {
    let root = temp_root();
    let path = root.join("graded.json");
    fs::write(
        &path,
        r#"[
            {"essay": "A short but complete essay.", "score": 80},
            {"essay": "   ", "score": 10},
            {"essay": "Another one entirely.", "score": 55.5}
        ]"#,
    )
    .expect("write");

    let loaded = load_samples(&path).expect("load");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].score, 80.0);
    assert_eq!(loaded[1].essay, "Another one entirely.");

    assert!(load_samples(&root.join("missing.json")).is_err());

    let _ = fs::remove_dir_all(root);
}

#[test]
fn samples_load_from_csv() {
    let root = temp_root();
    let path = root.join("train_data.csv");
    fs::write(
        &path,
        "id,essay,score\n\
         1,\"First line.\nSecond line, with a comma.\",72\n\
         2,\"She said \"\"hello\"\" twice.\",64.5\n\
         3,\"  \",10\n",
    )
    .expect("write");

    assert_eq!(SampleFormat::from_path(&path), SampleFormat::Csv);
    let loaded = load_samples(&path).expect("load");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].essay, "First line.\nSecond line, with a comma.");
    assert_eq!(loaded[0].score, 72.0);
    assert_eq!(loaded[1].essay, "She said \"hello\" twice.");
    assert_eq!(loaded[1].score, 64.5);

    fs::write(&path, "essay,score\n\"Fine text.\",not-a-number\n").expect("write");
    assert!(load_samples(&path).is_err());

    let _ = fs::remove_dir_all(root);
}
