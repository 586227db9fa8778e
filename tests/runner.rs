use bfs_3sat::Error;
use bfs_3sat::runner::{RunOptions, result_path_for, run_batch, run_single, solve_file};
use bfs_3sat::sat::csv::write_file;
use bfs_3sat::sat::generator::{GeneratorConfig, generate};
use bfs_3sat::sat::solver::{SearchConfig, SearchOutcome};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn batch_writes_one_result_per_csv_file() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), "a.csv", "1,2,3\n");
    write(input.path(), "b.csv", "1,1,1\n-1,-1,-1\n");
    write(input.path(), "notes.txt", "1,2,3\n");
    write(input.path(), "upper.CSV", "1,2,3\n");

    let mut seen = Vec::new();
    let reports = run_batch(input.path(), output.path(), &RunOptions::default(), |r| {
        seen.push(r.input.clone());
    })
    .unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(seen, vec![input.path().join("a.csv"), input.path().join("b.csv")]);

    assert_eq!(
        read(&output.path().join("a_result.txt")),
        "Solution found. Expanded nodes: 9\nAssignment: 0 0 1\n\n"
    );
    assert_eq!(read(&output.path().join("b_result.txt")), "No solution found.\n");
    assert!(!output.path().join("notes_result.txt").exists());
    assert!(!output.path().join("upper_result.txt").exists());
}

#[test]
fn batch_files_do_not_share_state() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), "1.csv", "1,2,3\n");
    write(input.path(), "2.csv", "1,2,3\n");

    let reports = run_batch(input.path(), output.path(), &RunOptions::default(), |_| {}).unwrap();

    assert_eq!(reports[0].stats, reports[1].stats);
    assert_eq!(reports[0].outcome, reports[1].outcome);
}

#[test]
fn batch_skips_files_whose_result_cannot_be_written() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), "a.csv", "1,2,3\n");
    write(input.path(), "b.csv", "-1,2,3\n");
    let missing = output.path().join("does-not-exist");

    let reports = run_batch(input.path(), &missing, &RunOptions::default(), |_| {}).unwrap();

    assert!(reports.is_empty());
    assert!(!result_path_for(&input.path().join("a.csv"), &missing).exists());
}

#[test]
fn batch_on_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let err = run_batch(
        &dir.path().join("nope"),
        dir.path(),
        &RunOptions::default(),
        |_| {},
    )
    .unwrap_err();

    assert!(matches!(err, Error::NotADirectory(_)));
}

#[test]
fn batch_with_budget_reports_exceeded() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), "a.csv", "1,2,3\n");

    let options = RunOptions {
        verify: true,
        search: SearchConfig::with_max_nodes(4),
    };
    let reports = run_batch(input.path(), output.path(), &options, |_| {}).unwrap();

    assert_eq!(reports[0].outcome, SearchOutcome::BudgetExceeded);
    assert_eq!(
        read(&output.path().join("a_result.txt")),
        "Search budget exceeded. Expanded nodes: 4\n"
    );
}

#[test]
fn single_writes_result_file() {
    let dir = tempdir().unwrap();
    write(dir.path(), "in.csv", "1,2,3\n-1,-2,-3\n");
    let result = dir.path().join("result.txt");

    let report = run_single(&dir.path().join("in.csv"), &result, &RunOptions::default()).unwrap();

    assert!(report.outcome.is_sat());
    assert_eq!(
        read(&result),
        "Solution found. Expanded nodes: 9\nAssignment: 0 0 1\n"
    );
}

#[test]
fn single_unsat_result_file() {
    let dir = tempdir().unwrap();
    write(dir.path(), "in.csv", "1,1,1\n-1,-1,-1\n1,1,1\n");
    let result = dir.path().join("result.txt");

    let report = run_single(&dir.path().join("in.csv"), &result, &RunOptions::default()).unwrap();

    assert_eq!(report.outcome, SearchOutcome::Unsatisfiable);
    assert_eq!(report.stats.expanded, 3);
    assert_eq!(read(&result), "No solution found.\n");
}

#[test]
fn single_missing_input_is_fatal_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let result = dir.path().join("result.txt");

    let err = run_single(&dir.path().join("missing.csv"), &result, &RunOptions::default())
        .unwrap_err();

    assert!(matches!(err, Error::Input { .. }));
    assert!(!result.exists());
}

#[test]
fn single_unwritable_output_is_fatal() {
    let dir = tempdir().unwrap();
    write(dir.path(), "in.csv", "1,2,3\n");
    let result = dir.path().join("missing-dir").join("result.txt");

    let err = run_single(&dir.path().join("in.csv"), &result, &RunOptions::default()).unwrap_err();

    assert!(matches!(err, Error::Output { .. }));
}

#[test]
fn malformed_lines_are_skipped() {
    let dir = tempdir().unwrap();
    write(dir.path(), "in.csv", "1, 2\n+1,-2,3\nnot,a,clause\n");

    let report = solve_file(&dir.path().join("in.csv"), &RunOptions::default()).unwrap();

    assert_eq!(report.cnf.len(), 1);
    assert_eq!(report.skipped_lines, 2);
    assert_eq!(
        report.cnf.clauses[0]
            .iter()
            .map(|lit| lit.to_i32())
            .collect::<Vec<_>>(),
        vec![1, -2, 3]
    );
}

#[test]
fn file_without_clauses_is_trivially_satisfiable() {
    let dir = tempdir().unwrap();
    write(dir.path(), "in.csv", "1,2\n\n");
    let result = dir.path().join("result.txt");

    let report = run_single(&dir.path().join("in.csv"), &result, &RunOptions::default()).unwrap();

    assert_eq!(report.stats.expanded, 1);
    assert_eq!(read(&result), "Solution found. Expanded nodes: 1\nAssignment:\n");
}

#[test]
fn generated_instances_solve_and_verify() {
    let dir = tempdir().unwrap();

    for seed in 0..5 {
        let cnf = generate(&GeneratorConfig::new(8, 30).with_seed(seed)).unwrap();
        let path = dir.path().join(format!("3SAT_Dim=8_{seed}.csv"));
        write_file(&cnf, &path).unwrap();

        let report = solve_file(&path, &RunOptions::default()).unwrap();

        assert_eq!(report.cnf, cnf);
        if let Some(model) = report.outcome.solution() {
            assert!(cnf.verify(model));
        } else {
            assert_eq!(report.outcome, SearchOutcome::Unsatisfiable);
        }
    }
}
