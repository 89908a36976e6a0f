use rstest::rstest;
use singlefile_rs::{BundleConfig, Bundler, OutputMode, RunOutput, SingleFileError};
use std::fs;
use std::path::{Path, PathBuf};

fn write(root: &Path, rel: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn map_only(inputs: Vec<PathBuf>, root: &Path) -> serde_json::Value {
    let config = BundleConfig::new(inputs, root, OutputMode::MapOnly);
    let map = Bundler::new(config).build_import_map().unwrap();
    serde_json::from_str(&map.to_json()).unwrap()
}

fn decoded_entry(map: &serde_json::Value, specifier: &str) -> String {
    let uri = map["imports"][specifier].as_str().unwrap();
    let (_, payload) = uri.split_once(',').unwrap();
    urlencoding::decode(payload).unwrap().into_owned()
}

#[test]
fn test_parent_relative_import_flattened() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("proj");
    let b = write(&root, "a/b.js", "import x from \"../c.js\";\nx();\n");
    let c = write(&root, "c.js", "export default () => {};\n");

    let map = map_only(vec![b, c], &root);
    assert_eq!(
        decoded_entry(&map, "a/b.js"),
        "import x from \"c.js\";\nx();\n"
    );
}

#[rstest]
#[case("a/b/c.js", "../../d.js")]
#[case("a/b/c.js", "./e.js")]
#[case("a/b/c.js", "../f/g.js")]
#[case("a/b/c.js", "../../a/./b/e.js")]
#[case("top.js", "./a/b/e.js")]
fn test_flattening_preserves_resolution(#[case] importer: &str, #[case] import_path: &str) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let importer_path = write(root, importer, format!("import m from \"{import_path}\";"));

    // Where the filesystem would have resolved the import
    let target = importer_path.parent().unwrap().join(import_path);
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(&target, "export default 1;").unwrap();
    let expected = target
        .canonicalize()
        .unwrap()
        .strip_prefix(root.canonicalize().unwrap())
        .unwrap()
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    let map = map_only(vec![importer_path], root);
    assert_eq!(
        decoded_entry(&map, importer),
        format!("import m from \"{expected}\";")
    );
}

#[test]
fn test_absolute_url_imports_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let src = "import { render } from \"https://cdn.example.com/lib.js\";\nimport a from 'http://x.org/a.js';\n";
    let main = write(dir.path(), "js/main.js", src);

    let map = map_only(vec![main], dir.path());
    assert_eq!(decoded_entry(&map, "js/main.js"), src);
}

#[test]
fn test_bundle_host_document() {
    let dir = tempfile::tempdir().unwrap();
    let html_src = "<html><head><title>t</title></head><body/></html>";
    let html = write(dir.path(), "index.html", html_src);
    let x = write(dir.path(), "x.js", "console.log(1);");

    let mode = OutputMode::from_flags(false, Some(html), None).unwrap();
    let config = BundleConfig::new(vec![x], dir.path(), mode);
    let output = Bundler::new(config).run().unwrap();

    let out_path = dir.path().join("index.onefile.html");
    assert_eq!(output, RunOutput::Bundle(out_path.clone()));

    let bundled = fs::read_to_string(out_path).unwrap();
    let tag_start = bundled.find("<script type=\"importmap\">").unwrap();
    let head_close = bundled.find("</head>").unwrap();
    assert_eq!(&bundled[..tag_start], "<html><head><title>t</title>");
    assert_eq!(&bundled[head_close..], "</head><body/></html>");
    assert!(bundled[tag_start..head_close].ends_with("</script>\n"));
    let entry = "\"x.js\": \"data:application/javascript;charset=utf-8,console.log%281%29%3B\"";
    assert!(bundled.contains(entry));
}

#[test]
fn test_wasm_entry_is_raw_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = [0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00, 0xc3, 0x28];
    let wasm = write(dir.path(), "cpu.wasm", bytes);

    let map = map_only(vec![wasm], dir.path());
    assert_eq!(
        map["imports"]["cpu.wasm"],
        "data:application/wasm,%00asm%01%00%00%00%C3%28"
    );
}

#[test]
fn test_missing_head_close_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let html = write(dir.path(), "index.html", "<html><body></body></html>");
    let x = write(dir.path(), "x.js", "");
    let out = dir.path().join("out.html");

    let mode = OutputMode::from_flags(false, Some(html), Some(out.clone())).unwrap();
    let err = Bundler::new(BundleConfig::new(vec![x], dir.path(), mode))
        .run()
        .unwrap_err();

    assert!(matches!(err, SingleFileError::MalformedHostDocument { .. }));
    assert!(!out.exists());
}

#[test]
fn test_existing_output_untouched_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let html = write(dir.path(), "index.html", "<html></html>");
    let x = write(dir.path(), "x.js", "");
    let out = write(dir.path(), "out.html", "previous");

    let mode = OutputMode::from_flags(false, Some(html), Some(out.clone())).unwrap();
    assert!(Bundler::new(BundleConfig::new(vec![x], dir.path(), mode))
        .run()
        .is_err());
    assert_eq!(fs::read_to_string(out).unwrap(), "previous");
}

#[test]
fn test_input_outside_root_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    fs::create_dir_all(&root).unwrap();
    let x = write(dir.path(), "elsewhere/x.js", "");

    let err = Bundler::new(BundleConfig::new(vec![x], &root, OutputMode::MapOnly))
        .run()
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_duplicate_specifier_keeps_one_entry() {
    let dir = tempfile::tempdir().unwrap();
    let plain = write(dir.path(), "a.txt", "content");
    let dotted = dir.path().join(".").join("a.txt");

    let map = map_only(vec![plain, dotted], dir.path());
    assert_eq!(map["imports"].as_object().unwrap().len(), 1);
    assert_eq!(decoded_entry(&map, "a.txt"), "content");
}
