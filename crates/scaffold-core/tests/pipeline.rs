//! End-to-end tests against local git fixtures
//!
//! Each test builds a real repository with `git2`, clones it through the
//! pipeline from a plain filesystem path, and checks the workspace is gone
//! afterwards. Deploys go through a stub `wt` script that records its
//! arguments.

use scaffold_core::repo::fetch_commit;
use scaffold_core::{
    DeployTool, Outcome, Pipeline, RepoLocation, SampleSource, ScaffoldError, ScaffoldRequest,
    Workspace,
};
use std::fs;
use std::path::{Path, PathBuf};

const HELLO_JS: &str = r#"/**
* Responds with a greeting.
*
* @param {string} GREETING=hi - greeting word
*/
module.exports = function (ctx, cb) {
    cb(null, ctx.data.GREETING);
};
"#;

const BARE_JS: &str = "module.exports = function (ctx, cb) { cb(null, 'ok'); };\n";

/// Build a sample repository with a `master` branch and one commit.
fn init_sample_repo(root: &Path) {
    let mut opts = git2::RepositoryInitOptions::new();
    opts.initial_head("master");
    let repo = git2::Repository::init_opts(root, &opts).unwrap();

    let samples = root.join("sample-webtasks");
    fs::create_dir_all(&samples).unwrap();
    fs::write(samples.join("hello.js"), HELLO_JS).unwrap();
    fs::write(samples.join("bare.js"), BARE_JS).unwrap();
    fs::write(samples.join("notes.txt"), "not a webtask\n").unwrap();

    let mut index = repo.index().unwrap();
    for file in ["hello.js", "bare.js", "notes.txt"] {
        index
            .add_path(&Path::new("sample-webtasks").join(file))
            .unwrap();
    }
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let sig = git2::Signature::now("tester", "tester@example.com").unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "add samples", &tree, &[])
        .unwrap();
}

fn origin_location(root: &Path) -> RepoLocation {
    RepoLocation::main(root.display().to_string())
}

fn sample_source(root: &Path) -> SampleSource {
    SampleSource {
        repo_url: root.display().to_string(),
        sample_dir: "sample-webtasks/".to_string(),
    }
}

fn sample_request(identifier: &str) -> ScaffoldRequest {
    ScaffoldRequest {
        identifier: Some(identifier.to_string()),
        profile: "default".to_string(),
        ..Default::default()
    }
}

/// Stub `wt` that records its arguments and prints a deploy URL plus noise.
#[cfg(unix)]
fn deploy_stub(dir: &Path) -> DeployTool {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("wt");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > {}\necho \"https://example.com/foo\"\necho \"extra line\"\n",
            dir.join("args.txt").display()
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    DeployTool::at(script)
}

#[cfg(unix)]
fn recorded_args(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("args.txt"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[cfg(unix)]
fn test_pipeline(scratch: &Path) -> (Pipeline, PathBuf, PathBuf) {
    let origin = scratch.join("origin");
    init_sample_repo(&origin);
    let out = scratch.join("out");
    fs::create_dir(&out).unwrap();
    let workspace_root = scratch.join("ws");

    let pipeline = Pipeline::new(deploy_stub(scratch))
        .samples(sample_source(&origin))
        .workspace_at(&workspace_root)
        .output_in(&out);
    (pipeline, out, workspace_root)
}

#[tokio::test]
async fn test_fetch_and_navigate() {
    let scratch = tempfile::tempdir().unwrap();
    let origin = scratch.path().join("origin");
    init_sample_repo(&origin);

    let workspace = Workspace::at(scratch.path().join("ws"));
    let snapshot = fetch_commit(&origin_location(&origin), &workspace)
        .await
        .unwrap();

    let entry = snapshot.entry("sample-webtasks/hello.js").unwrap();
    let content = snapshot.read(&entry).unwrap();
    assert_eq!(String::from_utf8_lossy(&content), HELLO_JS);

    let missing = snapshot.entry("sample-webtasks/absent.js");
    assert!(matches!(missing, Err(ScaffoldError::EntryNotFound(_))));
}

#[tokio::test]
async fn test_listing_descriptors_in_tree_order() {
    let scratch = tempfile::tempdir().unwrap();
    let origin = scratch.path().join("origin");
    init_sample_repo(&origin);

    let workspace = Workspace::at(scratch.path().join("ws"));
    let snapshot = fetch_commit(&origin_location(&origin), &workspace)
        .await
        .unwrap();

    let scaffolds = snapshot.list_scaffolds("sample-webtasks/").unwrap();
    let listed: Vec<(&str, &str)> = scaffolds
        .iter()
        .map(|s| (s.name.as_str(), s.description.as_str()))
        .collect();
    // Git orders tree entries by name; notes.txt is filtered out.
    assert_eq!(
        listed,
        vec![
            ("bare", "no description."),
            ("hello", "Responds with a greeting."),
        ]
    );
}

#[tokio::test]
async fn test_occupied_workspace_is_a_conflict() {
    let scratch = tempfile::tempdir().unwrap();
    let origin = scratch.path().join("origin");
    init_sample_repo(&origin);

    let root = scratch.path().join("ws");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("leftover"), b"junk").unwrap();

    let workspace = Workspace::at(&root);
    let result = fetch_commit(&origin_location(&origin), &workspace).await;
    assert!(matches!(result, Err(ScaffoldError::WorkspaceConflict(_))));
}

#[cfg(unix)]
#[tokio::test]
async fn test_pipeline_deploys_a_sample() {
    let scratch = tempfile::tempdir().unwrap();
    let (pipeline, out, workspace_root) = test_pipeline(scratch.path());

    let outcome = pipeline.run(&sample_request("hello")).await.unwrap();
    let Outcome::Deployed { filename, url } = outcome else {
        panic!("expected a deploy outcome");
    };

    assert_eq!(filename, "hello.js");
    assert_eq!(url, "https://example.com/foo");
    assert_eq!(fs::read_to_string(out.join("hello.js")).unwrap(), HELLO_JS);
    assert!(!workspace_root.exists(), "workspace must be released");

    assert_eq!(
        recorded_args(scratch.path()),
        vec![
            "create", "hello.js", "-n", "hello", "-p", "default", "--param", "GREETING=hi",
        ]
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_pipeline_honors_explicit_name_and_overrides() {
    let scratch = tempfile::tempdir().unwrap();
    let (pipeline, out, _) = test_pipeline(scratch.path());

    let mut request = sample_request("hello");
    request.name = Some("greeter".to_string());
    request
        .params
        .insert("GREETING".to_string(), "hello there".to_string());
    request
        .secrets
        .insert("TOKEN".to_string(), "s3cret".to_string());

    let outcome = pipeline.run(&request).await.unwrap();
    let Outcome::Deployed { filename, .. } = outcome else {
        panic!("expected a deploy outcome");
    };

    assert_eq!(filename, "greeter.js");
    assert!(out.join("greeter.js").exists());
    assert_eq!(
        recorded_args(scratch.path()),
        vec![
            "create",
            "greeter.js",
            "-n",
            "greeter",
            "-p",
            "default",
            "--param",
            "GREETING=hello there",
            "--secret",
            "TOKEN=s3cret",
        ]
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_missing_sample_falls_back_to_listing() {
    let scratch = tempfile::tempdir().unwrap();
    let (pipeline, _, workspace_root) = test_pipeline(scratch.path());

    let outcome = pipeline.run(&sample_request("nope")).await.unwrap();
    let Outcome::Listed(scaffolds) = outcome else {
        panic!("expected a listing fallback");
    };

    let names: Vec<&str> = scaffolds.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["bare", "hello"]);
    assert!(!workspace_root.exists(), "workspace must be released");
}

#[cfg(unix)]
#[tokio::test]
async fn test_missing_entry_in_explicit_repo_propagates() {
    let scratch = tempfile::tempdir().unwrap();
    let origin = scratch.path().join("origin");
    init_sample_repo(&origin);
    let workspace_root = scratch.path().join("ws");

    let pipeline = Pipeline::new(deploy_stub(scratch.path()))
        .samples(sample_source(&origin))
        .workspace_at(&workspace_root);

    let mut request = sample_request("missing/task");
    request.repo = Some(origin.display().to_string());

    let result = pipeline.run(&request).await;
    assert!(matches!(result, Err(ScaffoldError::EntryNotFound(_))));
    assert!(!workspace_root.exists(), "workspace must be released");
}

#[cfg(unix)]
#[tokio::test]
async fn test_leftover_workspace_is_cleaned_and_retried() {
    let scratch = tempfile::tempdir().unwrap();
    let (pipeline, _, workspace_root) = test_pipeline(scratch.path());

    fs::create_dir(&workspace_root).unwrap();
    fs::write(workspace_root.join("leftover"), b"junk").unwrap();

    let outcome = pipeline.run(&ScaffoldRequest::default()).await.unwrap();
    let Outcome::Listed(scaffolds) = outcome else {
        panic!("expected a listing");
    };
    assert_eq!(scaffolds.len(), 2);
    assert!(!workspace_root.exists(), "workspace must be released");
}

#[tokio::test]
async fn test_clone_failure_releases_workspace() {
    let scratch = tempfile::tempdir().unwrap();
    let workspace_root = scratch.path().join("ws");

    let pipeline = Pipeline::new(DeployTool::at("wt-never-invoked"))
        .samples(SampleSource {
            repo_url: scratch.path().join("no-such-origin").display().to_string(),
            sample_dir: "sample-webtasks/".to_string(),
        })
        .workspace_at(&workspace_root);

    let result = pipeline.run(&ScaffoldRequest::default()).await;
    assert!(matches!(result, Err(ScaffoldError::Git(_))));
    assert!(!workspace_root.exists(), "workspace must be released");
}
