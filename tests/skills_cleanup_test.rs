use anyhow::Result;
use std::fs;
use tempfile::tempdir;

use profile_cleaner::app::skills::run_skills_cleanup;
use profile_cleaner::normalize::skill::SkillNormalizer;

#[test]
fn writes_sorted_unique_skills() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("skills_data.csv");
    let output = temp_dir.path().join("unique_skills.csv");
    fs::write(
        &input,
        "id,skills\n1,• Python\n2,Café\n3,CAFE\n4,123\n5,C++\n6,Go\n7,python\n",
    )?;

    let report = run_skills_cleanup(&input, &output, &SkillNormalizer::new())?;

    assert_eq!(report.total_rows, 7);
    assert_eq!(report.unique_skills, 3);
    assert_eq!(report.output_file, output.display().to_string());

    let written = fs::read_to_string(&output)?;
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "skills");
    // Ascending by display form, bullets stripped, first spelling kept
    assert_eq!(&lines[1..], &["Café", "Go", "Python"]);
    Ok(())
}

#[test]
fn missing_skills_column_leaves_no_output() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("input.csv");
    let output = temp_dir.path().join("out.csv");
    fs::write(&input, "name,level\nrust,high\n")?;

    let result = run_skills_cleanup(&input, &output, &SkillNormalizer::new());

    let error = result.unwrap_err();
    assert!(error.to_string().contains("skills"));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn short_rows_read_as_empty_skills() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("input.csv");
    let output = temp_dir.path().join("out.csv");
    fs::write(&input, "id,skills\n1,Rust\n2\n3,Go\n")?;

    let report = run_skills_cleanup(&input, &output, &SkillNormalizer::new())?;

    assert_eq!(report.total_rows, 3);
    assert_eq!(report.unique_skills, 2);

    let written = fs::read_to_string(&output)?;
    assert_eq!(written.lines().skip(1).collect::<Vec<_>>(), vec!["Go", "Rust"]);
    Ok(())
}

#[test]
fn header_only_input_produces_header_only_output() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("input.csv");
    let output = temp_dir.path().join("out.csv");
    fs::write(&input, "skills\n")?;

    let report = run_skills_cleanup(&input, &output, &SkillNormalizer::new())?;

    assert_eq!(report.total_rows, 0);
    assert_eq!(report.unique_skills, 0);
    assert_eq!(fs::read_to_string(&output)?.lines().collect::<Vec<_>>(), vec!["skills"]);
    Ok(())
}
