use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::{TempDir, tempdir};

use archup_cli::{Args, Command, run};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Collects all .yaml files from a directory
fn collect_yaml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yaml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Writes a configuration that points the styling include at the local
/// fixture, so no test touches the network.
fn write_config(dir: &Path) -> String {
    let styling = fixtures().join("styling.puml");
    let config = dir.join("config.toml");
    fs::write(
        &config,
        format!(
            "[render]\nstyling_include = {:?}\n",
            styling.to_string_lossy()
        ),
    )
    .expect("Failed to write config");
    config.to_string_lossy().to_string()
}

fn render_args(config: &str, input: &Path, output: &Path) -> Args {
    Args {
        config: Some(config.to_string()),
        log_level: "off".to_string(),
        command: Command::Render {
            input: input.to_string_lossy().to_string(),
            output: Some(output.to_string_lossy().to_string()),
        },
    }
}

fn temp_dir() -> TempDir {
    tempdir().expect("Failed to create temp directory")
}

#[test]
fn e2e_smoke_test_valid_examples() {
    let temp_dir = temp_dir();
    let config = write_config(temp_dir.path());

    let valid_examples = collect_yaml_files(fixtures().join("valid"));
    assert!(
        !valid_examples.is_empty(),
        "No valid examples found in tests/fixtures/valid"
    );

    let mut failed_examples = Vec::new();

    for example_path in &valid_examples {
        let output_path = temp_dir.path().join(format!(
            "{}.md",
            example_path.file_stem().unwrap().to_string_lossy()
        ));

        match run(&render_args(&config, example_path, &output_path)) {
            Ok(()) => {
                let markdown = fs::read_to_string(&output_path).expect("output written");
                assert!(markdown.starts_with("<!-- THIS FILE IS GENERATED -->\n"));
            }
            Err(e) => failed_examples.push((example_path.clone(), e)),
        }
    }

    if !failed_examples.is_empty() {
        eprintln!("\nValid examples that failed:");
        for (path, err) in &failed_examples {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!(
            "{} valid example(s) failed unexpectedly",
            failed_examples.len()
        );
    }
}

#[test]
fn e2e_smoke_test_error_examples() {
    let temp_dir = temp_dir();
    let config = write_config(temp_dir.path());

    let error_examples = collect_yaml_files(fixtures().join("errors"));
    assert!(
        !error_examples.is_empty(),
        "No error examples found in tests/fixtures/errors"
    );

    let mut unexpected_successes = Vec::new();

    for example_path in &error_examples {
        let output_path = temp_dir.path().join(format!(
            "{}.md",
            example_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&render_args(&config, example_path, &output_path)).is_ok() {
            unexpected_successes.push(example_path.clone());
        }
        assert!(
            !output_path.exists(),
            "no output may be written for {}",
            example_path.display()
        );
    }

    if !unexpected_successes.is_empty() {
        eprintln!("\nError examples that succeeded unexpectedly:");
        for path in &unexpected_successes {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error example(s) succeeded unexpectedly",
            unexpected_successes.len()
        );
    }
}

#[test]
fn e2e_render_inlines_nested_styling() {
    let temp_dir = temp_dir();
    let config = write_config(temp_dir.path());
    let output = temp_dir.path().join("shop.md");

    run(&render_args(
        &config,
        &fixtures().join("valid").join("shop.yaml"),
        &output,
    ))
    .expect("render succeeds");
    let markdown = fs::read_to_string(&output).expect("output written");

    // Overview: both #sales entities internal, their neighbors external.
    assert!(markdown.contains("### Sales\n"));
    assert!(markdown.contains("Entity(order, \"Order\\n<size:10>(aka Purchase)\""));
    assert!(markdown.contains("Entity(orderLine, "));
    assert!(markdown.contains("Entity_Ext(customer, "));
    assert!(markdown.contains("Entity_Ext(product, "));
    assert!(markdown.contains("Rel_L(order, \"placed by\", customer, \"\")"));
    assert!(markdown.contains("Rel_D(order, \"contains\", orderLine, \"quantity\")"));
    assert!(markdown.contains("Rel_D(orderLine, \"refers to\", product, \"\")"));

    // Nested include spliced in, markers stripped.
    assert!(markdown.contains("skinparam class {\n  BackgroundColor White\n"));
    assert!(markdown.contains("hide empty members\n"));
    assert!(!markdown.contains("!include"));

    // Details: every entity except the blacklisted one.
    assert!(markdown.contains("### Concept: Order <small>(aka \"_Purchase_\")</small>\n"));
    assert!(markdown.contains("### Concept: Customer\n"));
    assert!(markdown.contains("### Concept: Product\n"));
    assert!(!markdown.contains("### Concept: Order line"));
    assert!(markdown.contains("| status | enum(open, shipped, closed) | Lifecycle state |\n"));
    assert!(markdown.contains("* \"_#1001_\"\n"));
}

#[test]
fn e2e_build_project() {
    let temp_dir = temp_dir();
    let config = write_config(temp_dir.path());

    let project_dir = temp_dir.path().join("project");
    fs::create_dir_all(project_dir.join("docs")).expect("create project dirs");
    fs::copy(
        fixtures().join("valid").join("minimal.yaml"),
        project_dir.join("model.yaml"),
    )
    .expect("copy model");
    let project_file = project_dir.join("archup.conf");
    fs::write(
        &project_file,
        "name: Minimal\ndatamodel:\n  filename: model.yaml\n  markdown: docs/model.md\n",
    )
    .expect("write project file");

    let args = Args {
        config: Some(config),
        log_level: "off".to_string(),
        command: Command::Build {
            project: project_file.to_string_lossy().to_string(),
        },
    };
    run(&args).expect("build succeeds");

    let markdown = fs::read_to_string(project_dir.join("docs").join("model.md"))
        .expect("markdown written next to the project file");
    assert!(markdown.contains("### Everything\n"));
    assert!(markdown.contains("Entity(thing, \"Thing\", \"\", $example=\"\") {\n}\n"));
}

#[test]
fn e2e_validate() {
    let temp_dir = temp_dir();
    let config = write_config(temp_dir.path());

    let validate = |input: PathBuf| Args {
        config: Some(config.clone()),
        log_level: "off".to_string(),
        command: Command::Validate {
            input: input.to_string_lossy().to_string(),
        },
    };

    assert!(run(&validate(fixtures().join("valid").join("warnings.yaml"))).is_ok());
    assert!(run(&validate(fixtures().join("errors").join("empty_name.yaml"))).is_err());
}

#[test]
fn e2e_missing_config_file_fails() {
    let temp_dir = temp_dir();
    let args = render_args(
        &temp_dir.path().join("nope.toml").to_string_lossy(),
        &fixtures().join("valid").join("minimal.yaml"),
        &temp_dir.path().join("out.md"),
    );

    assert!(run(&args).is_err());
}
