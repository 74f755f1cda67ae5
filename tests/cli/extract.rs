use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

const SIMPLE_SOURCE: &str = "var test = 1;\ntestMinErr('test1', 'This is a {0}', test);\n";

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_extract_dry_run_writes_registry_only() -> Result<()> {
    let test = CliTest::with_file("src/app.js", SIMPLE_SOURCE)?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_snapshot!(test.read_file("errors.json")?, @r#"{"test":{"test1":"This is a {0}"}}"#);
    assert_eq!(test.read_file("src/app.js")?, SIMPLE_SOURCE);

    let out = stdout(&output);
    assert!(out.contains("Extracted 1 message in 1 namespace from 1 source file into errors.json"));
    assert!(out.contains("Would rewrite 1 file:"));
    assert!(out.contains("--apply"));

    Ok(())
}

#[test]
fn test_extract_apply_rewrites_sources() -> Result<()> {
    let test = CliTest::with_file("src/app.js", SIMPLE_SOURCE)?;

    let output = test.extract_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("src/app.js")?,
        "var test = 1;\ntestMinErr('test1', test);\n"
    );
    assert!(stdout(&output).contains("Rewrote 1 file."));

    Ok(())
}

#[test]
fn test_extract_collects_namespaces_across_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "lib/a.js",
        "fooMinErr('one', 'This is the first {0}', a);\nfooMinErr('two', 'The second {0}', b);\n",
    )?;
    test.write_file(
        "lib/b.js",
        "barMinErr('one', 'Another first {0}', c);\nminErr()('nons', 'Global message');\n",
    )?;

    let output = test.extract_command().arg("lib").arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_snapshot!(
        test.read_file("errors.json")?,
        @r#"{"foo":{"one":"This is the first {0}","two":"The second {0}"},"bar":{"one":"Another first {0}"},"nons":"Global message"}"#
    );
    assert_eq!(
        test.read_file("lib/b.js")?,
        "barMinErr('one', c);\nminErr()('nons');\n"
    );

    Ok(())
}

#[test]
fn test_extract_concatenated_template() -> Result<()> {
    let test = CliTest::with_file(
        "app.js",
        "testMinErr('test', 'This is' + ' a very long ' + 'string.');\n",
    )?;

    let output = test.extract_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_snapshot!(test.read_file("errors.json")?, @r#"{"test":{"test":"This is a very long string."}}"#);
    assert_eq!(test.read_file("app.js")?, "testMinErr('test');\n");

    Ok(())
}

#[test]
fn test_extract_registry_to_stdout() -> Result<()> {
    let test = CliTest::with_file("app.js", SIMPLE_SOURCE)?;

    let output = test.extract_command().args(["--errors", "-"]).output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "{\"test\":{\"test1\":\"This is a {0}\"}}\n");
    assert!(stderr(&output).contains("into stdout"));
    assert!(!test.root().join("errors.json").exists());

    Ok(())
}

#[test]
fn test_extract_variable_template_fails() -> Result<()> {
    let source = "var s = 'x';\ntestMinErr('test', s);\n";
    let test = CliTest::with_file("app.js", source)?;

    let output = test.extract_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("unsupported-string-expression"));
    assert!(out.contains("--> ./app.js:2:20"));
    assert!(out.contains("found expression: Ident"));
    assert!(out.contains("1 problem (1 error, 0 warnings)"));
    assert_eq!(test.read_file("errors.json")?, "{}");
    assert_eq!(test.read_file("app.js")?, source);

    Ok(())
}

#[test]
fn test_extract_variable_code_fails() -> Result<()> {
    let test = CliTest::with_file("app.js", "testMinErr(code, 'Message');\n")?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("unsupported-string-expression"));

    Ok(())
}

#[test]
fn test_extract_non_factory_throw_warns() -> Result<()> {
    let source = "throw new Error(testMinErr('test', 'Nested {0}', a));\n";
    let test = CliTest::with_file("app.js", source)?;

    let output = test.extract_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("warning: Throw expression is not a minErr instance"));
    assert!(out.contains("non-factory-throw"));
    assert_eq!(test.read_file("errors.json")?, "{}");
    assert_eq!(test.read_file("app.js")?, source);

    Ok(())
}

#[test]
fn test_extract_replaces_definition_with_bundled_factory() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/minErr.js",
        "function minErr(module) {\n  return function () { return new Error('stub'); };\n}\n",
    )?;
    test.write_file("src/app.js", "ngMinErr('areq', 'Argument {0} is required', name);\n")?;

    let output = test
        .extract_command()
        .args(["src", "--url", "http://errors.angularjs.org/1.0.0/", "--apply"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let definition = test.read_file("src/minErr.js")?;
    assert!(definition.starts_with("function minErr(module) {"));
    assert!(definition.contains("'http://errors.angularjs.org/1.0.0/'"));
    assert!(definition.contains("'/'"));
    assert!(!definition.contains("stub"));
    assert!(!definition.contains("MINERR_URL"));
    assert_eq!(test.read_file("src/app.js")?, "ngMinErr('areq', name);\n");
    assert!(stdout(&output).contains("replaced the factory definition"));

    Ok(())
}

#[test]
fn test_extract_custom_definition_with_colon_separator() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app.js", "function minErr(module) { return 0; }\n")?;
    test.write_file(
        "defs/minErr.js",
        "function minErr(module) { return 'MINERR_URL' + module + 'MINERR_SEPARATOR'; }\n",
    )?;

    let output = test
        .extract_command()
        .args([
            "app.js",
            "--url",
            "http://docs/",
            "--separate-with-colon",
            "--definition",
            "defs/minErr.js",
            "--apply",
        ])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("app.js")?,
        "function minErr(module) { return 'http://docs/' + module + ':'; }\n"
    );

    Ok(())
}

#[test]
fn test_extract_without_url_keeps_definition() -> Result<()> {
    let source = "function minErr(module) { return 0; }\n";
    let test = CliTest::with_file("app.js", source)?;

    let output = test.extract_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("app.js")?, source);

    Ok(())
}

#[test]
fn test_extract_multiple_definitions_warns() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("a.js", "function minErr(module) { return 1; }\n")?;
    test.write_file("b.js", "function minErr(module) { return 2; }\n")?;

    let output = test
        .extract_command()
        .args(["--url", "http://docs/", "--apply"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("multiple-definitions"));
    assert!(out.contains("--> ./b.js:1:1"));
    assert!(out.contains("first definition at ./a.js:1:1"));
    assert!(test.read_file("a.js")?.contains("'http://docs/'"));
    assert_eq!(test.read_file("b.js")?, "function minErr(module) { return 2; }\n");

    Ok(())
}

#[test]
fn test_extract_invalid_definition_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app.js", SIMPLE_SOURCE)?;
    test.write_file("bad.js", "var minErr = 1;\n")?;

    let output = test
        .extract_command()
        .args(["app.js", "--url", "http://docs/", "--definition", "bad.js", "--apply"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("must start with a function declaration"));
    assert_eq!(test.read_file("app.js")?, SIMPLE_SOURCE);
    assert!(!test.root().join("errors.json").exists());

    Ok(())
}

#[test]
fn test_extract_empty_factory_flag_is_fatal() -> Result<()> {
    let source = "format('key', 'value', x);\n";
    let test = CliTest::with_file("app.js", source)?;

    let output = test
        .extract_command()
        .args(["--factory", "", "--apply"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid factory name"));
    assert_eq!(test.read_file("app.js")?, source);
    assert!(!test.root().join("errors.json").exists());

    Ok(())
}

#[test]
fn test_extract_unresolved_instances_rewrite_nothing() -> Result<()> {
    let source = "testMinErr('test', message);\n";
    let test = CliTest::with_file("app.js", source)?;

    let output = test.extract_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("Rewrote"));
    assert_eq!(test.read_file("app.js")?, source);

    Ok(())
}

#[test]
fn test_extract_out_dir_leaves_sources_untouched() -> Result<()> {
    let test = CliTest::with_file("src/app.js", SIMPLE_SOURCE)?;

    let output = test
        .extract_command()
        .args(["src", "--out-dir", "build"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("src/app.js")?, SIMPLE_SOURCE);
    assert_eq!(
        test.read_file("build/src/app.js")?,
        "var test = 1;\ntestMinErr('test1', test);\n"
    );

    Ok(())
}

#[test]
fn test_extract_parse_error_is_reported() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("broken.js", "function (\n")?;
    test.write_file("good.js", SIMPLE_SOURCE)?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("parse-error"));
    assert!(out.contains("--> ./broken.js"));
    assert_snapshot!(test.read_file("errors.json")?, @r#"{"test":{"test1":"This is a {0}"}}"#);

    Ok(())
}

#[test]
fn test_extract_skips_node_modules() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("node_modules/dep/index.js", "depMinErr('x', 'Dependency');\n")?;
    test.write_file("app.js", SIMPLE_SOURCE)?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_snapshot!(test.read_file("errors.json")?, @r#"{"test":{"test1":"This is a {0}"}}"#);

    Ok(())
}

#[test]
fn test_extract_uses_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".minerrrc.json",
        r#"{ "factoryName": "fail", "errors": "build/errors.json" }"#,
    )?;
    test.write_file(
        "app.js",
        "httpFail('timeout', 'Timed out after {0}ms', ms);\ntestMinErr('a', 'Ignored');\n",
    )?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_snapshot!(
        test.read_file("build/errors.json")?,
        @r#"{"http":{"timeout":"Timed out after {0}ms"}}"#
    );

    Ok(())
}

#[test]
fn test_extract_flags_override_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".minerrrc.json", r#"{ "factoryName": "fail" }"#)?;
    test.write_file("app.js", SIMPLE_SOURCE)?;

    let output = test
        .extract_command()
        .args(["--factory", "minErr", "--errors", "out.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_snapshot!(test.read_file("out.json")?, @r#"{"test":{"test1":"This is a {0}"}}"#);

    Ok(())
}

#[test]
fn test_extract_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".minerrrc.json", r#"{ "separator": "-" }"#)?;
    test.write_file("app.js", SIMPLE_SOURCE)?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to parse config file"));

    Ok(())
}

#[test]
fn test_extract_missing_path_is_fatal() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract_command().arg("nope").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Path does not exist: nope"));

    Ok(())
}
