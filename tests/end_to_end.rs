use std::io::Write;
use std::path::PathBuf;

use salary_predict::app::load_model;
use salary_predict::app::pipeline::Predictor;
use salary_predict::config::AppConfig;
use salary_predict::domain::{CategoricalAttribute, Label};
use salary_predict::encoding::{CategoryRegistry, FeatureEncoder};
use salary_predict::io::read_batch;
use salary_predict::models::forest::{RandomForest, Tree, TreeNode};
use salary_predict::models::{ArtifactFile, Classifier, LayoutCheck, ModelArtifact, ModelSpec};
use salary_predict::report::OutcomeKind;

fn demo_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/RandomForest.json")
}

fn config_for(path: PathBuf) -> AppConfig {
    AppConfig {
        model_path: path,
        log_file: None,
        log_filter: "info".to_string(),
    }
}

#[test]
fn demo_artifact_matches_census_layout() {
    let encoder = FeatureEncoder::new(CategoryRegistry::census());
    let model = load_model(&config_for(demo_path()), &encoder).unwrap();
    assert_eq!(model.input_width(), encoder.width());
}

#[test]
fn demo_artifact_predicts_both_brackets() {
    let encoder = FeatureEncoder::new(CategoryRegistry::census());
    let model = load_model(&config_for(demo_path()), &encoder).unwrap();
    let predictor = Predictor::new(&encoder, &model);

    let baseline = encoder.registry().default_record();
    let run = predictor.run(&baseline);
    assert_eq!(run.outcome, Ok(Label::BelowThreshold));
    assert_eq!(
        run.render().text,
        "The predicted salary for the provided details is: <=50K"
    );

    let mut rich = baseline.clone();
    rich.capital_gain = 15_000.0;
    let rendered = predictor.run(&rich).render();
    assert_eq!(rendered.kind, OutcomeKind::Success);
    assert_eq!(
        rendered.text,
        "The predicted salary for the provided details is: >50K"
    );
}

#[test]
fn registry_mismatch_surfaces_as_inference_error() {
    // A registry missing one country shifts the layout by one column.
    let census = CategoryRegistry::census();
    let mut sets: [Vec<&'static str>; 8] = Default::default();
    for (i, attr) in CategoricalAttribute::ALL.into_iter().enumerate() {
        sets[i] = census.values(attr).to_vec();
    }
    sets[7].pop();
    let encoder = FeatureEncoder::new(CategoryRegistry::from_sets(sets));

    let model = ModelArtifact::load(&demo_path()).unwrap();
    let predictor = Predictor::new(&encoder, &model);
    let rendered = predictor.run(&encoder.registry().default_record()).render();
    assert_eq!(rendered.kind, OutcomeKind::Error);
    assert!(rendered.text.contains("104 columns"));
    assert!(rendered.text.contains("105"));

    // The same predictor keeps working for the next submission.
    let again = predictor.run(&encoder.registry().default_record());
    assert!(again.outcome.is_err());
}

#[test]
fn recorded_feature_names_are_checked_against_encoder() {
    let encoder = FeatureEncoder::new(CategoryRegistry::census());
    let mut names = encoder.column_names();
    let artifact = ArtifactFile {
        format_version: 1,
        trained_with: Some("scikit-learn 1.3.2".to_string()),
        feature_names: Some(names.clone()),
        model: ModelSpec::RandomForest(RandomForest {
            n_features: names.len(),
            classes: vec![0, 1],
            trees: vec![Tree {
                nodes: vec![TreeNode::Leaf { value: vec![1.0, 3.0] }],
            }],
        }),
    };

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&artifact).unwrap().as_bytes())
        .unwrap();
    let model = load_model(&config_for(file.path().to_path_buf()), &encoder).unwrap();
    assert_eq!(model.check_layout(&encoder.column_names()), LayoutCheck::Matches);

    names.swap(6, 7);
    assert_eq!(
        model.check_layout(&names),
        LayoutCheck::Mismatch {
            first_difference: 6,
            expected: 105,
            recorded: 105
        }
    );

    let predictor = Predictor::new(&encoder, &model);
    assert_eq!(
        predictor.run(&encoder.registry().default_record()).outcome,
        Ok(Label::AboveThreshold)
    );
}

#[test]
fn batch_rows_flow_through_pipeline() {
    let encoder = FeatureEncoder::new(CategoryRegistry::census());
    let model = ModelArtifact::load(&demo_path()).unwrap();
    let predictor = Predictor::new(&encoder, &model);

    let csv = "age,workclass,fnlwgt,education,education-num,marital-status,occupation,relationship,race,sex,capital-gain,capital-loss,hours-per-week,native-country\n\
               30,Private,50000,Bachelors,10,Married-civ-spouse,Tech-support,Wife,White,Female,0,0,40,United-States\n\
               45,?,50000,Bachelors,13,Married-civ-spouse,?,Husband,White,Male,15000,0,50,?\n";
    let batch = read_batch(csv.as_bytes(), encoder.registry()).unwrap();
    assert_eq!(batch.unknown_values, 3);

    let labels: Vec<Label> = batch
        .records
        .iter()
        .map(|(_, r)| predictor.run(r).outcome.unwrap())
        .collect();
    assert_eq!(labels, vec![Label::BelowThreshold, Label::AboveThreshold]);
}
