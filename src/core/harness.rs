//! Command lines for git, the Gradle wrapper and adb.

use crate::domain::model::CommandSpec;
use std::path::Path;

/// Resolves a relative program path such as `./gradlew` against `base`.
/// Bare names like `git` are left for PATH lookup.
pub fn resolve_program(program: &str, base: &Path) -> String {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        base.join(path).display().to_string()
    } else {
        program.to_string()
    }
}

pub fn git_clone(git: &str, repo: &str, target: &Path, project_dir: &Path) -> CommandSpec {
    CommandSpec::new(git)
        .arg("clone")
        .arg(repo)
        .arg(target.display().to_string())
        .current_dir(project_dir)
}

/// `clean build` followed by `build -x test`.
pub fn gradle_build_steps(gradle: &str, project_dir: &Path) -> Vec<CommandSpec> {
    let program = resolve_program(gradle, project_dir);
    vec![
        CommandSpec::new(program.clone())
            .args(["clean", "build"])
            .current_dir(project_dir),
        CommandSpec::new(program)
            .args(["build", "-x", "test"])
            .current_dir(project_dir),
    ]
}

/// Folds an argument file into one line for the `--args` value.
pub fn normalize_extra_args(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn harness_arguments(apks_dir: &Path, output_dir: &Path, extra: &str) -> String {
    let mut value = format!(
        "--Exploration-apksDir={} --Output-outputDir={}",
        apks_dir.display(),
        output_dir.display()
    );
    let extra = normalize_extra_args(extra);
    if !extra.is_empty() {
        value.push(' ');
        value.push_str(&extra);
    }
    value
}

pub fn gradle_run(
    gradle: &str,
    project_dir: &Path,
    apks_dir: &Path,
    output_dir: &Path,
    extra: &str,
) -> CommandSpec {
    CommandSpec::new(resolve_program(gradle, project_dir))
        .arg("run")
        .arg(format!(
            "--args={}",
            harness_arguments(apks_dir, output_dir, extra)
        ))
        .current_dir(project_dir)
}

pub fn adb_connect(adb: &str, device: &str) -> CommandSpec {
    CommandSpec::new(adb).arg("connect").arg(device)
}

pub fn adb_disconnect(adb: &str, device: &str) -> CommandSpec {
    CommandSpec::new(adb).arg("disconnect").arg(device)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_program() {
        let base = Path::new("/work/droidmate");
        assert_eq!(resolve_program("./gradlew", base), "/work/droidmate/./gradlew");
        assert_eq!(resolve_program("git", base), "git");
        assert_eq!(resolve_program("/usr/bin/adb", base), "/usr/bin/adb");
    }

    #[test]
    fn test_build_steps() {
        let steps = gradle_build_steps("gradle", Path::new("/p"));
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].args, vec!["clean", "build"]);
        assert_eq!(steps[1].args, vec!["build", "-x", "test"]);
        assert_eq!(steps[1].current_dir.as_deref(), Some(Path::new("/p")));
    }

    #[test]
    fn test_run_without_extra_args() {
        let cmd = gradle_run(
            "gradle",
            Path::new("/p"),
            Path::new("/r/set/tmp"),
            Path::new("/r/out"),
            "",
        );
        assert_eq!(cmd.program, "gradle");
        assert_eq!(
            cmd.args,
            vec![
                "run".to_string(),
                "--args=--Exploration-apksDir=/r/set/tmp --Output-outputDir=/r/out".to_string()
            ]
        );
    }

    #[test]
    fn test_run_with_multiline_extra_args() {
        let value = harness_arguments(
            Path::new("/tmp"),
            Path::new("/out"),
            "--Selectors-actionLimit=50\n  --Selectors-randomSeed=1 \n\n",
        );
        assert_eq!(
            value,
            "--Exploration-apksDir=/tmp --Output-outputDir=/out --Selectors-actionLimit=50 --Selectors-randomSeed=1"
        );
    }

    #[test]
    fn test_adb_commands() {
        assert_eq!(
            adb_connect("adb", "10.0.0.5:5555").to_string(),
            "adb connect 10.0.0.5:5555"
        );
        assert_eq!(
            adb_disconnect("adb", "10.0.0.5:5555").to_string(),
            "adb disconnect 10.0.0.5:5555"
        );
    }
}
