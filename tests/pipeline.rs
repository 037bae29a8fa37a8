//! End-to-end runs over on-disk inputs: a directory of relation files, a
//! corpus text file and a target word list.

use std::fs;
use std::path::Path;

use depsim::error::DepSimError;
use depsim::report::Ranking;
use depsim::{Config, JsonTypes, Pipeline};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand::rngs::StdRng;

const CORPUS: &str = "The Bush family did its best to shield the service and reception from public view.
George Bush ate a red apple. John ate a pear and bought a car.
The red car and the green apple were good.
";

const RELATIONS: [&str; 18] = [
    "det(family-3, The-1)",
    "nn(family-3, Bush-2)",
    "nsubj(did-4, family-3)",
    "root(ROOT-0, did-4)",
    "poss(best-6, its-5)",
    "dobj(did-4, best-6)",
    "dobj(shield-8, service-10)",
    "dobj(shield-8, reception-12)",
    "conj_and(service-10, reception-12)",
    "amod(view-15, public-14)",
    "nn(Bush-2, George-1)",
    "nsubj(ate-3, Bush-2)",
    "amod(apple-6, red-5)",
    "dobj(ate-3, apple-6)",
    "nsubj(ate-2, John-1)",
    "dobj(ate-2, pear-4)",
    "dobj(bought-6, car-8)",
    "amod(car-3, red-2)",
];

fn write_relations(dir: &Path, names: &[String], lines: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    let per_file = lines.len().div_ceil(names.len());
    for (name, chunk) in names.iter().zip(lines.chunks(per_file)) {
        fs::write(dir.join(name), chunk.join("\n") + "\n").unwrap();
    }
}

fn params(root: &Path, relations_dir: &Path, output_dir: Option<&Path>) -> JsonTypes {
    fs::write(root.join("op_file"), CORPUS).unwrap();
    fs::write(root.join("targets.txt"), "Apple\ncar\n\ncleopatra\n").unwrap();

    let json = serde_json::json!({
        "relations_dir": relations_dir.to_str().unwrap(),
        "corpus_file": root.join("op_file").to_str().unwrap(),
        "targets_file": root.join("targets.txt").to_str().unwrap(),
        "output_dir": output_dir.map(|p| p.to_str().unwrap()),
        "num_similar": 5,
        "num_threads": 2
    });
    let config_path = root.join("args.json");
    fs::write(&config_path, json.to_string()).unwrap();
    Config::new(&config_path).unwrap().get_params()
}

#[test]
fn end_to_end_run_reports_every_target() {
    let root = tempfile::tempdir().unwrap();
    let relations_dir = root.path().join("split");
    let names: Vec<String> = (0..3).map(|i| format!("split_{}.parse", i)).collect();
    write_relations(&relations_dir, &names, &RELATIONS);
    // not a relation file, must be ignored
    fs::write(relations_dir.join("split_0"), "nn(cleopatra-1, caesar-2)\n").unwrap();

    let output_dir = root.path().join("Output");
    let params = params(root.path(), &relations_dir, Some(&output_dir));
    let reports = Pipeline::run(&params).unwrap();

    let targets: Vec<&str> = reports.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, vec!["apple", "car", "cleopatra"]);

    let apple = &reports[0];
    assert_eq!(apple.frequency, Some(2));
    let neighbours = apple.neighbours().unwrap();
    assert_eq!(neighbours.len(), 5);
    assert_eq!(neighbours[0].word, "apple");
    assert_eq!(neighbours[0].score, 1.0);
    assert!(neighbours.windows(2).all(|w| w[0].score >= w[1].score));

    let cleopatra = &reports[2];
    assert_eq!(cleopatra.frequency, None);
    assert_eq!(cleopatra.ranking, Ranking::NoDistributionalData);

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output_dir.join("similar_words.json")).unwrap()).unwrap();
    assert_eq!(saved.as_array().unwrap().len(), 3);
    assert_eq!(saved[2]["ranking"]["status"], "no_distributional_data");
}

#[test]
fn ranking_does_not_depend_on_relation_file_order() {
    let root = tempfile::tempdir().unwrap();

    let first_dir = root.path().join("first");
    let names: Vec<String> = (0..4).map(|i| format!("split_{}.parse", i)).collect();
    write_relations(&first_dir, &names, &RELATIONS);

    let mut shuffled = RELATIONS.to_vec();
    shuffled.shuffle(&mut StdRng::seed_from_u64(7));
    let second_dir = root.path().join("second");
    let names: Vec<String> = (0..6).map(|i| format!("part_{}.parse", 5 - i)).collect();
    write_relations(&second_dir, &names, &shuffled);

    let mut first_params = params(root.path(), &first_dir, None);
    first_params.num_similar = 100;
    let mut second_params = params(root.path(), &second_dir, None);
    second_params.num_similar = 100;
    second_params.num_threads = 3;

    let first = Pipeline::run(&first_params).unwrap();
    let second = Pipeline::run(&second_params).unwrap();

    assert_eq!(first, second);
    for (a, b) in first.iter().zip(&second) {
        if let (Some(xs), Some(ys)) = (a.neighbours(), b.neighbours()) {
            for (x, y) in xs.iter().zip(ys) {
                assert_eq!(x.score.to_bits(), y.score.to_bits());
            }
        }
    }
}

#[test]
fn small_vocabulary_returns_all_candidates() {
    let root = tempfile::tempdir().unwrap();
    let relations_dir = root.path().join("split");
    write_relations(&relations_dir, &["a.parse".to_string()], &["nn(apple-1, red-2)", "amod(car-1, red-2)"]);

    let mut params = params(root.path(), &relations_dir, None);
    params.num_similar = 50;
    let reports = Pipeline::run(&params).unwrap();

    // apple, red and car carry relation data
    assert_eq!(reports[0].neighbours().unwrap().len(), 3);
    assert_eq!(reports[1].neighbours().unwrap().len(), 3);
}

#[test]
fn missing_corpus_is_fatal() {
    let root = tempfile::tempdir().unwrap();
    let relations_dir = root.path().join("split");
    write_relations(&relations_dir, &["a.parse".to_string()], &RELATIONS);

    let params = params(root.path(), &relations_dir, None);
    fs::remove_file(root.path().join("op_file")).unwrap();

    match Pipeline::run(&params) {
        Err(DepSimError::Io { path, .. }) => assert!(path.ends_with("op_file")),
        other => panic!("expected an io error, got {:?}", other),
    }
}

#[test]
fn unreadable_relation_file_is_fatal() {
    let root = tempfile::tempdir().unwrap();
    let relations_dir = root.path().join("split");
    write_relations(&relations_dir, &["a.parse".to_string()], &RELATIONS);
    // gzip header, then a deflate block of reserved type
    let corrupt = [0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff];
    fs::write(relations_dir.join("b.parse.gz"), corrupt).unwrap();

    let params = params(root.path(), &relations_dir, None);

    match Pipeline::run(&params) {
        Err(DepSimError::Io { path, .. }) => assert!(path.ends_with("b.parse.gz")),
        other => panic!("expected an io error, got {:?}", other),
    }
}
