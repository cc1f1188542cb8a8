//! End-to-end tests: open a project from an in-memory filesystem, query
//! it, and write it back byte-for-byte.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use pbx_proj::{Object, PbxProj, ProjError};
use pbx_setting::SettingValue;
use pbx_util::MemoryFilesystem;

const PROJECT_DIR: &str = "/work/HelloWorld.xcodeproj";

/// A complete small application project, formatted exactly the way the
/// writer emits it, so `save` must reproduce the input byte-for-byte.
const HELLO_WORLD: &str = "// !$*UTF8*$!\n{\n\tarchiveVersion = 1;\n\tclasses = {\n\t};\n\tobjectVersion = 46;\n\tobjects = {\n\n/* Begin PBXBuildFile section */\n\t\t0000000000000000000000D0 /* main.m in Sources */ = {isa = PBXBuildFile; fileRef = 0000000000000000000000C0 /* main.m */; };\n/* End PBXBuildFile section */\n\n/* Begin PBXFileReference section */\n\t\t0000000000000000000000C0 /* main.m */ = {isa = PBXFileReference; lastKnownFileType = sourcefile.c.objc; path = main.m; sourceTree = \"<group>\"; };\n\t\t0000000000000000000000C1 /* HelloWorld.app */ = {isa = PBXFileReference; explicitFileType = wrapper.application; includeInIndex = 0; path = HelloWorld.app; sourceTree = BUILT_PRODUCTS_DIR; };\n/* End PBXFileReference section */\n\n/* Begin PBXFrameworksBuildPhase section */\n\t\t0000000000000000000000E1 /* Frameworks */ = {\n\t\t\tisa = PBXFrameworksBuildPhase;\n\t\t\tbuildActionMask = 2147483647;\n\t\t\tfiles = (\n\t\t\t);\n\t\t\trunOnlyForDeploymentPostprocessing = 0;\n\t\t};\n/* End PBXFrameworksBuildPhase section */\n\n/* Begin PBXGroup section */\n\t\t0000000000000000000000B0 = {\n\t\t\tisa = PBXGroup;\n\t\t\tchildren = (\n\t\t\t\t0000000000000000000000C0 /* main.m */,\n\t\t\t\t0000000000000000000000B1 /* Products */,\n\t\t\t);\n\t\t\tsourceTree = \"<group>\";\n\t\t};\n\t\t0000000000000000000000B1 /* Products */ = {\n\t\t\tisa = PBXGroup;\n\t\t\tchildren = (\n\t\t\t\t0000000000000000000000C1 /* HelloWorld.app */,\n\t\t\t);\n\t\t\tname = Products;\n\t\t\tsourceTree = \"<group>\";\n\t\t};\n/* End PBXGroup section */\n\n/* Begin PBXNativeTarget section */\n\t\t0000000000000000000000F0 /* HelloWorld */ = {\n\t\t\tisa = PBXNativeTarget;\n\t\t\tbuildConfigurationList = 0000000000000000000000F2 /* Build configuration list for PBXNativeTarget \"HelloWorld\" */;\n\t\t\tbuildPhases = (\n\t\t\t\t0000000000000000000000E0 /* Sources */,\n\t\t\t\t0000000000000000000000E1 /* Frameworks */,\n\t\t\t);\n\t\t\tbuildRules = (\n\t\t\t);\n\t\t\tdependencies = (\n\t\t\t);\n\t\t\tname = HelloWorld;\n\t\t\tproductName = HelloWorld;\n\t\t\tproductReference = 0000000000000000000000C1 /* HelloWorld.app */;\n\t\t\tproductType = \"com.apple.product-type.application\";\n\t\t};\n/* End PBXNativeTarget section */\n\n/* Begin PBXProject section */\n\t\t0000000000000000000000A0 /* Project object */ = {\n\t\t\tisa = PBXProject;\n\t\t\tattributes = {\n\t\t\t\tLastUpgradeCheck = 0630;\n\t\t\t};\n\t\t\tbuildConfigurationList = 0000000000000000000000F1 /* Build configuration list for PBXProject \"HelloWorld\" */;\n\t\t\tcompatibilityVersion = \"Xcode 3.2\";\n\t\t\tdevelopmentRegion = English;\n\t\t\thasScannedForEncodings = 0;\n\t\t\tknownRegions = (\n\t\t\t\ten,\n\t\t\t);\n\t\t\tmainGroup = 0000000000000000000000B0;\n\t\t\tproductRefGroup = 0000000000000000000000B1 /* Products */;\n\t\t\tprojectDirPath = \"\";\n\t\t\tprojectRoot = \"\";\n\t\t\ttargets = (\n\t\t\t\t0000000000000000000000F0 /* HelloWorld */,\n\t\t\t);\n\t\t};\n/* End PBXProject section */\n\n/* Begin PBXSourcesBuildPhase section */\n\t\t0000000000000000000000E0 /* Sources */ = {\n\t\t\tisa = PBXSourcesBuildPhase;\n\t\t\tbuildActionMask = 2147483647;\n\t\t\tfiles = (\n\t\t\t\t0000000000000000000000D0 /* main.m in Sources */,\n\t\t\t);\n\t\t\trunOnlyForDeploymentPostprocessing = 0;\n\t\t};\n/* End PBXSourcesBuildPhase section */\n\n/* Begin XCBuildConfiguration section */\n\t\t0000000000000000000000F3 /* Debug */ = {\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbuildSettings = {\n\t\t\t\tGCC_OPTIMIZATION_LEVEL = 0;\n\t\t\t};\n\t\t\tname = Debug;\n\t\t};\n\t\t0000000000000000000000F4 /* Release */ = {\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbuildSettings = {\n\t\t\t};\n\t\t\tname = Release;\n\t\t};\n\t\t0000000000000000000000F5 /* Debug */ = {\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbuildSettings = {\n\t\t\t\tPRODUCT_NAME = \"$(TARGET_NAME)\";\n\t\t\t};\n\t\t\tname = Debug;\n\t\t};\n\t\t0000000000000000000000F6 /* Release */ = {\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbuildSettings = {\n\t\t\t\tPRODUCT_NAME = \"$(TARGET_NAME)\";\n\t\t\t};\n\t\t\tname = Release;\n\t\t};\n/* End XCBuildConfiguration section */\n\n/* Begin XCConfigurationList section */\n\t\t0000000000000000000000F1 /* Build configuration list for PBXProject \"HelloWorld\" */ = {\n\t\t\tisa = XCConfigurationList;\n\t\t\tbuildConfigurations = (\n\t\t\t\t0000000000000000000000F3 /* Debug */,\n\t\t\t\t0000000000000000000000F4 /* Release */,\n\t\t\t);\n\t\t\tdefaultConfigurationIsVisible = 0;\n\t\t\tdefaultConfigurationName = Release;\n\t\t};\n\t\t0000000000000000000000F2 /* Build configuration list for PBXNativeTarget \"HelloWorld\" */ = {\n\t\t\tisa = XCConfigurationList;\n\t\t\tbuildConfigurations = (\n\t\t\t\t0000000000000000000000F5 /* Debug */,\n\t\t\t\t0000000000000000000000F6 /* Release */,\n\t\t\t);\n\t\t\tdefaultConfigurationIsVisible = 0;\n\t\t\tdefaultConfigurationName = Release;\n\t\t};\n/* End XCConfigurationList section */\n\t};\n\trootObject = 0000000000000000000000A0 /* Project object */;\n}\n";

fn filesystem_with(contents: &str) -> MemoryFilesystem {
    let fs = MemoryFilesystem::new();
    fs.insert(
        PathBuf::from(PROJECT_DIR).join("project.pbxproj"),
        contents.as_bytes().to_vec(),
    );
    fs
}

fn open_hello_world() -> PbxProj {
    let fs = filesystem_with(HELLO_WORLD);
    PbxProj::open(&fs, Path::new(PROJECT_DIR)).expect("project opens")
}

#[test]
fn open_resolves_the_typed_graph() {
    let proj = open_hello_world();

    assert_eq!(proj.archive_version(), 1);
    assert_eq!(proj.object_version(), 46);
    assert_eq!(proj.name(), "HelloWorld");

    let root = proj.root_object().expect("root project");
    assert_eq!(root.uuid(), "0000000000000000000000A0");

    let targets = proj.targets();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].name(), "HelloWorld");
    assert_eq!(
        targets[0].product_type(),
        Some("com.apple.product-type.application")
    );
    assert_eq!(targets[0].build_phases().len(), 2);

    let files = proj.file_references();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].path(), "main.m");
    assert_eq!(files[1].path(), "HelloWorld.app");
}

#[test]
fn save_reproduces_the_input_byte_for_byte() {
    let proj = open_hello_world();
    let bytes = proj.save().expect("save");
    assert_eq!(String::from_utf8(bytes).expect("utf8"), HELLO_WORLD);
}

#[test]
fn save_is_deterministic() {
    let proj = open_hello_world();
    assert_eq!(proj.save().expect("save"), proj.save().expect("save"));
}

#[test]
fn reopened_document_is_structurally_equal() {
    let proj = open_hello_world();
    let bytes = proj.save().expect("save");

    let fs = filesystem_with(std::str::from_utf8(&bytes).expect("utf8"));
    let reopened = PbxProj::open(&fs, Path::new(PROJECT_DIR)).expect("reopen");

    let uuids: HashSet<&str> = proj.objects().map(Object::uuid).collect();
    let reopened_uuids: HashSet<&str> = reopened.objects().map(Object::uuid).collect();
    assert_eq!(uuids, reopened_uuids);

    for object in proj.objects() {
        let other = reopened.object(object.uuid()).expect("object survives");
        assert_eq!(object, other, "object {} changed", object.uuid());
    }

    assert_eq!(reopened.save().expect("save"), bytes);
}

#[test]
fn uuids_are_unique_within_a_document() {
    let proj = open_hello_world();
    let mut seen = HashSet::new();
    for object in proj.objects() {
        assert!(seen.insert(object.uuid().to_owned()));
        assert_eq!(object.uuid().len(), 24);
    }
    assert_eq!(seen.len(), 15);
}

#[test]
fn build_file_annotation_names_file_and_phase() {
    let proj = open_hello_world();
    let build_file = proj
        .object("0000000000000000000000D0")
        .expect("build file");
    assert_eq!(build_file.annotation(&proj), "main.m in Sources");
    assert_eq!(
        build_file.parent_uuid(),
        Some("0000000000000000000000E0")
    );
}

#[test]
fn single_line_entry_rendering() {
    let proj = open_hello_world();
    let output = String::from_utf8(proj.save().expect("save")).expect("utf8");
    let line = output
        .lines()
        .find(|line| line.contains("PBXBuildFile; fileRef"))
        .expect("build file entry");
    insta::assert_snapshot!(
        line.trim_start(),
        @"0000000000000000000000D0 /* main.m in Sources */ = {isa = PBXBuildFile; fileRef = 0000000000000000000000C0 /* main.m */; };"
    );
}

#[test]
fn settings_level_carries_derived_values() {
    let proj = open_hello_world();
    let settings = proj.settings();
    assert_eq!(
        settings.get("PROJECT"),
        Some(&SettingValue::String("HelloWorld".to_owned()))
    );
    assert_eq!(
        settings.get("SRCROOT"),
        Some(&SettingValue::String("/work".to_owned()))
    );
    assert_eq!(
        settings.get("PROJECT_FILE_PATH"),
        Some(&SettingValue::String(PROJECT_DIR.to_owned()))
    );
    assert_eq!(
        settings.get("DEVELOPMENT_LANGUAGE"),
        Some(&SettingValue::String("English".to_owned()))
    );
}

#[test]
fn source_root_appends_project_dir_path() {
    let source = HELLO_WORLD.replace(
        "projectDirPath = \"\";",
        "projectDirPath = Sources;",
    );
    let fs = filesystem_with(&source);
    let proj = PbxProj::open(&fs, Path::new(PROJECT_DIR)).expect("opens");
    assert_eq!(proj.source_root(), PathBuf::from("/work/Sources"));
}

/// The minimal document: one project holding one file reference through
/// its main group.
const MINIMAL: &str = "// !$*UTF8*$!\n{\n\tarchiveVersion = 1;\n\tclasses = {\n\t};\n\tobjectVersion = 46;\n\tobjects = {\n\t\tAAAAAAAAAAAAAAAAAAAAAAAA = {\n\t\t\tisa = PBXProject;\n\t\t\tmainGroup = GGGGGGGGGGGGGGGGGGGGGGGG;\n\t\t\tprojectDirPath = \"\";\n\t\t\tprojectRoot = \"\";\n\t\t\ttargets = (\n\t\t\t);\n\t\t};\n\t\tBBBBBBBBBBBBBBBBBBBBBBBB = {\n\t\t\tisa = PBXFileReference;\n\t\t\tpath = Foo.m;\n\t\t\tsourceTree = \"<group>\";\n\t\t};\n\t\tGGGGGGGGGGGGGGGGGGGGGGGG = {\n\t\t\tisa = PBXGroup;\n\t\t\tchildren = (\n\t\t\t\tBBBBBBBBBBBBBBBBBBBBBBBB,\n\t\t\t);\n\t\t\tsourceTree = \"<group>\";\n\t\t};\n\t};\n\trootObject = AAAAAAAAAAAAAAAAAAAAAAAA;\n}\n";

#[test]
fn minimal_document_sections_order_alphabetically() {
    let fs = filesystem_with(MINIMAL);
    let proj = PbxProj::open(&fs, Path::new(PROJECT_DIR)).expect("opens");

    assert_eq!(
        proj.root_object().map(|root| root.uuid()),
        Some("AAAAAAAAAAAAAAAAAAAAAAAA")
    );
    let files = proj.file_references();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path(), "Foo.m");

    let output = String::from_utf8(proj.save().expect("save")).expect("utf8");
    let file_section = output
        .find("/* Begin PBXFileReference section */")
        .expect("file reference section");
    let group_section = output
        .find("/* Begin PBXGroup section */")
        .expect("group section");
    let project_section = output
        .find("/* Begin PBXProject section */")
        .expect("project section");
    assert!(file_section < group_section);
    assert!(group_section < project_section);
    assert!(output.contains("rootObject = AAAAAAAAAAAAAAAAAAAAAAAA /* Project object */;\n"));
    assert!(
        output.contains("BBBBBBBBBBBBBBBBBBBBBBBB /* Foo.m */ = {isa = PBXFileReference; path = Foo.m; sourceTree = \"<group>\"; };")
    );
}

/// A proxy chain that loops back through the project: the dependency's
/// proxy names the project as its container while the project is still
/// being constructed. Resolution must settle instead of recursing.
const CYCLIC: &str = "// !$*UTF8*$!\n{\n\tarchiveVersion = 1;\n\tclasses = {\n\t};\n\tobjectVersion = 46;\n\tobjects = {\n\t\t0000000000000000000000A0 = {\n\t\t\tisa = PBXProject;\n\t\t\tprojectDirPath = \"\";\n\t\t\tprojectRoot = \"\";\n\t\t\ttargets = (\n\t\t\t\t0000000000000000000000F0,\n\t\t\t);\n\t\t};\n\t\t0000000000000000000000F0 = {\n\t\t\tisa = PBXNativeTarget;\n\t\t\tbuildPhases = (\n\t\t\t);\n\t\t\tbuildRules = (\n\t\t\t);\n\t\t\tdependencies = (\n\t\t\t\t0000000000000000000000D1,\n\t\t\t);\n\t\t\tname = App;\n\t\t\tproductName = App;\n\t\t\tproductType = \"com.apple.product-type.application\";\n\t\t};\n\t\t0000000000000000000000D1 = {\n\t\t\tisa = PBXTargetDependency;\n\t\t\ttarget = 0000000000000000000000F0;\n\t\t\ttargetProxy = 0000000000000000000000C5;\n\t\t};\n\t\t0000000000000000000000C5 = {\n\t\t\tisa = PBXContainerItemProxy;\n\t\t\tcontainerPortal = 0000000000000000000000A0;\n\t\t\tproxyType = 1;\n\t\t\tremoteGlobalIDString = 0000000000000000000000F0;\n\t\t\tremoteInfo = App;\n\t\t};\n\t};\n\trootObject = 0000000000000000000000A0;\n}\n";

#[test]
fn cyclic_references_resolve_and_terminate() {
    let fs = filesystem_with(CYCLIC);
    let proj = PbxProj::open(&fs, Path::new(PROJECT_DIR)).expect("cycle resolves");

    let proxy = match proj.object("0000000000000000000000C5") {
        Some(Object::ContainerItemProxy(proxy)) => proxy,
        other => panic!("expected proxy, got {other:?}"),
    };
    assert_eq!(
        proxy.container_portal().map(|portal| portal.uuid()),
        Some("0000000000000000000000A0")
    );
    assert_eq!(proxy.remote_info(), "App");

    let dependency = match proj.object("0000000000000000000000D1") {
        Some(Object::TargetDependency(dependency)) => dependency,
        other => panic!("expected dependency, got {other:?}"),
    };
    assert_eq!(
        dependency.target().map(|target| target.uuid()),
        Some("0000000000000000000000F0")
    );
}

#[test]
fn missing_archive_version_fails_open() {
    let source = HELLO_WORLD.replace("\tarchiveVersion = 1;\n", "");
    let fs = filesystem_with(&source);
    let err = PbxProj::open(&fs, Path::new(PROJECT_DIR)).unwrap_err();
    assert!(matches!(
        err,
        ProjError::MissingKey {
            key: "archiveVersion"
        }
    ));
}

#[test]
fn missing_root_object_fails_open() {
    let source = HELLO_WORLD.replace(
        "\trootObject = 0000000000000000000000A0 /* Project object */;\n",
        "",
    );
    let fs = filesystem_with(&source);
    let err = PbxProj::open(&fs, Path::new(PROJECT_DIR)).unwrap_err();
    assert!(matches!(err, ProjError::MissingKey { key: "rootObject" }));
}

#[test]
fn dangling_build_file_reference_fails_open() {
    let source = HELLO_WORLD.replace(
        "fileRef = 0000000000000000000000C0 /* main.m */;",
        "fileRef = DEADDEADDEADDEADDEADDEAD;",
    );
    let fs = filesystem_with(&source);
    let err = PbxProj::open(&fs, Path::new(PROJECT_DIR)).unwrap_err();
    assert!(matches!(
        err,
        ProjError::UnresolvedReference { key: "fileRef", .. }
    ));
}

#[test]
fn unreadable_project_fails_open() {
    let fs = MemoryFilesystem::new();
    let err = PbxProj::open(&fs, Path::new(PROJECT_DIR)).unwrap_err();
    assert!(matches!(err, ProjError::Unreadable { .. }));
}

#[test]
fn empty_path_fails_open() {
    let fs = MemoryFilesystem::new();
    let err = PbxProj::open(&fs, Path::new("")).unwrap_err();
    assert!(matches!(err, ProjError::EmptyPath));
}

#[test]
fn non_dictionary_root_fails_open() {
    let fs = filesystem_with("// !$*UTF8*$!\n(\n)\n");
    let err = PbxProj::open(&fs, Path::new(PROJECT_DIR)).unwrap_err();
    assert!(matches!(err, ProjError::NotADictionary));
}

#[test]
fn binary_plist_is_rejected() {
    let fs = MemoryFilesystem::new();
    fs.insert(
        PathBuf::from(PROJECT_DIR).join("project.pbxproj"),
        b"bplist00binarybytes".to_vec(),
    );
    let err = PbxProj::open(&fs, Path::new(PROJECT_DIR)).unwrap_err();
    assert!(matches!(err, ProjError::Plist(_)));
}

#[test]
fn rename_survives_a_save_cycle() {
    let mut proj = open_hello_world();
    let target_uuid = proj.targets()[0].uuid().to_owned();
    {
        let target = proj.target_mut(&target_uuid).expect("target");
        target.set_name("RenamedApp");
        target.set_product_name("RenamedApp");
    }
    let bytes = proj.save().expect("save");
    let output = String::from_utf8(bytes.clone()).expect("utf8");
    assert!(output.contains("name = RenamedApp;"));
    assert!(output.contains("/* RenamedApp */"));

    let fs = filesystem_with(&output);
    let reopened = PbxProj::open(&fs, Path::new(PROJECT_DIR)).expect("reopen");
    assert_eq!(reopened.targets()[0].name(), "RenamedApp");
    assert_eq!(reopened.save().expect("save"), bytes);
}
