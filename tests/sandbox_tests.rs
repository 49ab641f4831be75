use form_builder::codegen::generator::{generate, Language};
use form_builder::sandbox::packager::{
    build_manifest, build_package, decode_parameters, encode_parameters, SandboxOptions, DEFINE_ENDPOINT,
};
use serde_json::json;

use crate::common::builders::sample_forest;

mod common;

// ============================================================================
// Manifest
// ============================================================================

#[test]
fn javascript_manifest_files() {
    let generated = generate(&sample_forest(), "Contact Us", Language::JavaScript);
    let manifest = build_manifest(&generated, &SandboxOptions::default());

    assert_eq!(
        manifest.paths().collect::<Vec<_>>(),
        vec![
            "package.json",
            "public/index.html",
            "src/App.js",
            "src/ContactUs.jsx",
            "src/index.js",
        ]
    );
    assert_eq!(
        manifest.file("src/ContactUs.jsx").and_then(|f| f.as_text()),
        Some(generated.source.as_str())
    );
    let app = manifest.file("src/App.js").and_then(|f| f.as_text()).expect("app file");
    assert!(app.contains("import ContactUs from './ContactUs';"));
    assert!(app.contains("<ContactUs />"));
}

#[test]
fn typescript_manifest_adds_tsconfig() {
    let generated = generate(&sample_forest(), "Contact Us", Language::TypeScript);
    let manifest = build_manifest(&generated, &SandboxOptions::default());

    assert!(manifest.file("tsconfig.json").is_some());
    assert!(manifest.file("src/ContactUs.tsx").is_some());
    assert!(manifest.file("src/index.tsx").is_some());

    let json = manifest.to_json();
    assert_eq!(json["files"]["tsconfig.json"]["content"]["compilerOptions"]["jsx"], "react-jsx");
    assert_eq!(json["files"]["package.json"]["content"]["dependencies"]["typescript"], "^4.9.5");
}

#[test]
fn package_json_uses_configured_versions() {
    let generated = generate(&sample_forest(), "Contact Us", Language::JavaScript);
    let options = SandboxOptions {
        react_version: "^18.3.1".to_string(),
        mui_version: "^5.16.0".to_string(),
        ..SandboxOptions::default()
    };
    let json = build_manifest(&generated, &options).to_json();
    let package = &json["files"]["package.json"]["content"];

    assert_eq!(package["name"], "contact-us");
    assert_eq!(package["dependencies"]["react"], "^18.3.1");
    assert_eq!(package["dependencies"]["@mui/material"], "^5.16.0");
    assert!(package["dependencies"].get("typescript").is_none());
}

// ============================================================================
// Transport encoding
// ============================================================================

#[test]
fn parameters_round_trip() {
    let manifest = json!({ "files": { "a.txt": { "content": "héllo \"world\" ✓" } } });
    let encoded = encode_parameters(&manifest);

    assert!(encoded.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    assert_eq!(decode_parameters(&encoded).expect("decode"), manifest);
}

#[test]
fn package_url_carries_encoded_manifest() {
    let generated = generate(&sample_forest(), "Contact", Language::TypeScript);
    let package = build_package(&generated, &SandboxOptions::default());

    assert!(package.url().starts_with(&format!("{}?parameters=", DEFINE_ENDPOINT)));
    assert_eq!(decode_parameters(&package.parameters).expect("decode"), package.manifest.to_json());
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_parameters("!!!not-lz!!!").is_err());
}
