//! Integration tests for the command implementations.

use std::fs;
use std::path::{Path, PathBuf};

use svl_cli::commands::{
    column_order, load_config, load_layout, load_list, read_rows, run_append, run_defrag,
    run_init,
};
use svl_document::SvlConfig;
use tempfile::{TempDir, tempdir};

const LAYOUT: &str = r#"[
    { "name": "o_fog", "kind": "boolean", "defaultValue": "False", "values": ["False", "True"] },
    { "name": "o_quality", "kind": "enumeration", "defaultValue": "Low", "values": ["Low", "Medium", "High"] },
    { "name": "o_lights", "kind": "integerRange", "defaultValue": "0", "minIndex": 0, "values": ["0", "1", "2", "3"] }
]"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(system_options: &str) -> Self {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Forward.shader"), "{}").unwrap();
        fs::write(dir.path().join("Forward.systemoptions"), system_options).unwrap();
        fs::write(dir.path().join("layout.json"), LAYOUT).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn init(&self) -> PathBuf {
        run_init(
            &self.path("Forward.shader"),
            &self.path("layout.json"),
            None,
            SvlConfig::default(),
        )
        .unwrap();
        self.path("Forward.shadervariantlist")
    }

    fn rows(&self, csv: &str) -> PathBuf {
        let path = self.path("rows.csv");
        fs::write(&path, csv).unwrap();
        path
    }
}

fn ids(path: &Path) -> Vec<u32> {
    load_list(path)
        .unwrap()
        .variants
        .iter()
        .map(|variant| variant.stable_id.get())
        .collect()
}

#[test]
fn test_init_writes_next_to_the_shader() {
    let fixture = Fixture::new(r#"{ "o_fog": "", "o_quality": "", "o_lights": "2" }"#);
    let summary = run_init(
        &fixture.path("Forward.shader"),
        &fixture.path("layout.json"),
        None,
        SvlConfig::default(),
    )
    .unwrap();

    assert_eq!(summary.variants_before, 0);
    assert_eq!(summary.variants_after, 6);
    assert_eq!(summary.added(), 6);
    assert_eq!(summary.history_entries, 0);
    assert_eq!(ids(&fixture.path("Forward.shadervariantlist")), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_init_respects_the_expansion_limit() {
    let fixture = Fixture::new(r#"{ "o_fog": "", "o_quality": "", "o_lights": "" }"#);
    let config = SvlConfig::default().with_max_variants(10);
    let result = run_init(
        &fixture.path("Forward.shader"),
        &fixture.path("layout.json"),
        None,
        config,
    );
    assert!(result.is_err());
    assert!(!fixture.path("Forward.shadervariantlist").exists());
}

#[test]
fn test_append_from_csv() {
    let fixture = Fixture::new(r#"{ "o_fog": "" }"#);
    let list = fixture.init();
    let rows = fixture.rows("o_quality, o_fog, o_unknown\nHigh, True, x\n, False, y\n");

    let summary = run_append(&list, &fixture.path("layout.json"), &rows, false, SvlConfig::default())
        .unwrap();

    assert_eq!(summary.variants_before, 2);
    assert_eq!(summary.variants_after, 4);
    assert_eq!(summary.history_entries, 1);
    assert_eq!(summary.events, 3);
    assert!(summary.notes.iter().any(|note| note.contains("o_unknown")));

    let loaded = load_list(&list).unwrap();
    let appended = &loaded.variants[2];
    assert_eq!(appended.stable_id.get(), 3);
    assert_eq!(appended.options.get("o_quality"), Some("High"));
    assert!(!appended.options.contains("o_unknown"));
    assert!(!loaded.variants[3].options.contains("o_quality"));
}

#[test]
fn test_append_with_defrag_is_one_step() {
    let fixture = Fixture::new(r#"{ "o_fog": "" }"#);
    let list = fixture.init();
    let rows = fixture.rows("o_fog,o_quality\nTrue,High\nTrue,High\n");

    let summary = run_append(&list, &fixture.path("layout.json"), &rows, true, SvlConfig::default())
        .unwrap();

    assert_eq!(summary.variants_after, 3);
    assert_eq!(summary.history_entries, 1);
    assert_eq!(ids(&list), vec![1, 2, 3]);
}

#[test]
fn test_ragged_csv_is_rejected_before_touching_the_list() {
    let fixture = Fixture::new(r#"{ "o_fog": "" }"#);
    let list = fixture.init();
    let before = fs::read_to_string(&list).unwrap();
    let rows = fixture.rows("o_fog,o_quality\nTrue\n");

    let result = run_append(&list, &fixture.path("layout.json"), &rows, false, SvlConfig::default());
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&list).unwrap(), before);
}

#[test]
fn test_defrag_dedupes_and_renumbers() {
    let fixture = Fixture::new("{}");
    let list = fixture.path("Forward.shadervariantlist");
    fs::write(
        &list,
        r#"{
            "shaderFilePath": "Forward.shader",
            "variants": [
                { "stableId": 3, "options": { "o_fog": "True" } },
                { "stableId": 1, "options": { "o_fog": "True" } },
                { "stableId": 2, "options": { "o_fog": "False" } }
            ]
        }"#,
    )
    .unwrap();

    let summary = run_defrag(&list, SvlConfig::default()).unwrap();
    assert_eq!(summary.removed(), 1);
    assert_eq!(ids(&list), vec![1, 2]);

    let again = run_defrag(&list, SvlConfig::default()).unwrap();
    assert_eq!(again.removed(), 0);
    assert_eq!(again.events, 1);
}

#[test]
fn test_read_rows_flattens_records() {
    let fixture = Fixture::new("{}");
    let rows = fixture.rows("a,b\n1,2\n3,\n");
    let (headers, matrix) = read_rows(&rows).unwrap();
    assert_eq!(headers, vec!["a", "b"]);
    assert_eq!(matrix, vec!["1", "2", "3", ""]);
}

#[test]
fn test_column_order_follows_layout() {
    let fixture = Fixture::new(r#"{ "o_lights": "", "o_extra": "1" }"#);
    let list = load_list(&fixture.init()).unwrap();
    let layout = load_layout(&fixture.path("layout.json")).unwrap();

    assert_eq!(
        column_order(&list, Some(&layout)),
        vec!["o_fog", "o_quality", "o_lights", "o_extra"]
    );
    assert_eq!(column_order(&list, None), vec!["o_extra", "o_lights"]);
}

#[test]
fn test_config_file() {
    let fixture = Fixture::new("{}");
    let path = fixture.path("svl.toml");
    fs::write(&path, "[expansion]\nmax_variants = 8\n").unwrap();

    assert_eq!(load_config(Some(path.as_path())).unwrap().expansion.max_variants, 8);
    assert_eq!(load_config(None).unwrap(), SvlConfig::default());
    assert!(load_config(Some(fixture.path("missing.toml").as_path())).is_err());
}
