//! Subcommand implementations.

use anyhow::{Context as _, bail};
use pbx_proj::{PbxProj, TargetKind};
use pbx_util::{Filesystem, HostFilesystem};

use crate::cli::{InspectArgs, RenameArgs, ResaveArgs};

const APPLICATION_PRODUCT_TYPE: &str = "com.apple.product-type.application";

pub fn inspect(args: &InspectArgs) -> anyhow::Result<()> {
    let fs = HostFilesystem::new();
    let proj = PbxProj::open(&fs, &args.project_dir)
        .with_context(|| format!("opening {}", args.project_dir.display()))?;

    println!("{} (archive {}, object {})", proj.name(), proj.archive_version(), proj.object_version());
    println!("source root: {}", proj.source_root().display());

    let targets = proj.targets();
    println!("targets ({}):", targets.len());
    for target in &targets {
        println!("\t{}", target.name());
        println!("\t\tProduct Name = {}", target.product_name());
        if let Some(product_type) = target.product_type() {
            println!("\t\tProduct Type = {product_type}");
        }
        println!("\t\tBuild Phases = {}", target.build_phases().len());
    }

    println!("file references ({}):", proj.file_references().len());
    for file in proj.file_references() {
        println!("\t{}", file.path());
    }

    Ok(())
}

pub fn resave(args: &ResaveArgs) -> anyhow::Result<()> {
    let fs = HostFilesystem::new();
    let proj = PbxProj::open(&fs, &args.project_dir)
        .with_context(|| format!("opening {}", args.project_dir.display()))?;
    let bytes = proj.save().context("serializing project")?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| proj.data_file().to_path_buf());
    fs.write(&output, &bytes)
        .with_context(|| format!("writing {}", output.display()))?;
    tracing::info!(path = %output.display(), bytes = bytes.len(), "project written");
    Ok(())
}

pub fn rename(args: &RenameArgs) -> anyhow::Result<()> {
    let fs = HostFilesystem::new();
    let mut proj = PbxProj::open(&fs, &args.project_dir)
        .with_context(|| format!("opening {}", args.project_dir.display()))?;

    // The first native target building an application is the one the
    // rename applies to.
    let mut target_uuid = None;
    for target in proj.targets() {
        println!("\t{}", target.name());
        println!("\t\tProduct Name = {}", target.product_name());
        if matches!(target.kind(), TargetKind::Native { .. })
            && target.product_type() == Some(APPLICATION_PRODUCT_TYPE)
        {
            target_uuid = Some(target.uuid().to_owned());
            break;
        }
    }

    let Some(target_uuid) = target_uuid else {
        bail!("no application target found");
    };

    if let Some(target) = proj.target_mut(&target_uuid) {
        let old_name = target.name().to_owned();
        target.set_name(args.name.clone());
        target.set_product_name(args.name.clone());
        tracing::info!(from = old_name, to = args.name, "target renamed");
    }

    if args.dry_run {
        println!("dry run; {} not written", proj.data_file().display());
        return Ok(());
    }

    let bytes = proj.save().context("serializing project")?;
    let data_file = proj.data_file().to_path_buf();
    fs.write(&data_file, &bytes)
        .with_context(|| format!("writing {}", data_file.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::{InspectArgs, RenameArgs};

    const MINIMAL: &str = "// !$*UTF8*$!\n{\n\tarchiveVersion = 1;\n\tclasses = {\n\t};\n\tobjectVersion = 46;\n\tobjects = {\n\t\t0000000000000000000000A0 = {\n\t\t\tisa = PBXProject;\n\t\t\tprojectDirPath = \"\";\n\t\t\tprojectRoot = \"\";\n\t\t\ttargets = (\n\t\t\t\t0000000000000000000000F0,\n\t\t\t);\n\t\t};\n\t\t0000000000000000000000F0 = {\n\t\t\tisa = PBXNativeTarget;\n\t\t\tname = HelloWorld;\n\t\t\tproductName = HelloWorld;\n\t\t\tproductType = \"com.apple.product-type.application\";\n\t\t};\n\t};\n\trootObject = 0000000000000000000000A0;\n}\n";

    fn seed_project(dir: &tempfile::TempDir) -> PathBuf {
        let project_dir = dir.path().join("App.xcodeproj");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::write(project_dir.join("project.pbxproj"), MINIMAL).unwrap();
        project_dir
    }

    #[test]
    fn rename_rewrites_the_application_target() {
        let dir = tempfile::tempdir().unwrap();
        let project_dir = seed_project(&dir);

        rename(&RenameArgs {
            project_dir: project_dir.clone(),
            name: "Renamed".to_owned(),
            dry_run: false,
        })
        .unwrap();

        let fs = HostFilesystem::new();
        let proj = PbxProj::open(&fs, &project_dir).unwrap();
        assert_eq!(proj.targets()[0].name(), "Renamed");
        assert_eq!(proj.targets()[0].product_name(), "Renamed");
    }

    #[test]
    fn rename_dry_run_leaves_the_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let project_dir = seed_project(&dir);
        let before = std::fs::read(project_dir.join("project.pbxproj")).unwrap();

        rename(&RenameArgs {
            project_dir: project_dir.clone(),
            name: "Renamed".to_owned(),
            dry_run: true,
        })
        .unwrap();

        let after = std::fs::read(project_dir.join("project.pbxproj")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn inspect_handles_a_valid_project() {
        let dir = tempfile::tempdir().unwrap();
        let project_dir = seed_project(&dir);
        inspect(&InspectArgs { project_dir }).unwrap();
    }

    #[test]
    fn inspect_reports_open_failures() {
        let err = inspect(&InspectArgs {
            project_dir: PathBuf::from("/nonexistent/App.xcodeproj"),
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("not readable"));
    }
}
