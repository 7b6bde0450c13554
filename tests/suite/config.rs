//! Config files feed the builder's tunables.

use std::io::Write;

use kanagi_config::{ConfigError, load_settings_from};
use kanagi_engine::{CorePlanBuilder, InMemorySessionStore};
use kanagi_types::{LoopOutcome, SettingsError};

use crate::common::{khs_pack, turn};

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn threshold_from_file_controls_loop() {
    let file = config_file("[loop]\nthreshold = 4\n");
    let settings = load_settings_from(file.path()).unwrap();
    let mut b = CorePlanBuilder::new(InMemorySessionStore::new(), &settings);
    let outcomes: Vec<_> = (0..4).map(|_| b.build(turn("x", "cfg")).loop_outcome).collect();
    assert!(outcomes[..3].iter().all(|o| *o == LoopOutcome::Normal));
    assert_eq!(outcomes[3], LoopOutcome::CenterReorganizing);
}

#[test]
fn fallback_limit_from_file_caps_laws() {
    let file = config_file("[evidence]\nfallback_law_limit = 1\n");
    let settings = load_settings_from(file.path()).unwrap();
    let mut b = CorePlanBuilder::new(InMemorySessionStore::new(), &settings);
    let plan = b.build(
        turn("躰 用 正中", "cfg").with_evidence(khs_pack("躰と用と正中", Vec::new())),
    );
    assert_eq!(plan.evidence.laws.len(), 1);
}

#[test]
fn custom_fire_lexicon_changes_scoring() {
    let file = config_file("[lexicon]\nfire = [\"flame\"]\n");
    let settings = load_settings_from(file.path()).unwrap();
    let mut b = CorePlanBuilder::new(InMemorySessionStore::new(), &settings);
    let plan = b.build(turn("flame flame", "cfg"));
    assert!((plan.scores.hi_score.value() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn invalid_threshold_is_reported_with_path() {
    let file = config_file("[loop]\nthreshold = 0\n");
    let err = load_settings_from(file.path()).unwrap_err();
    assert_eq!(err.path(), file.path());
    assert!(matches!(
        err,
        ConfigError::Invalid {
            source: SettingsError::LoopThresholdTooLow { .. },
            ..
        }
    ));
}
