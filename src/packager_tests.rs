//! End-to-end packaging scenarios over a real component directory on disk.
//!
//! These mirror the behavior component authors rely on: the compiled data
//! provider is saved under the publish path, the hash key matches the bytes
//! on disk, and invalid JavaScript is reported at its original position.

#[cfg(test)]
mod tests {
    use crate::{
        hash, package, BundlerOptions, ComponentManifest, ManifestFiles, PackagingError,
        PackagingRequest, StatsLevel,
    };
    use regex::Regex;
    use std::path::Path;
    use tempfile::TempDir;

    const VALID_PROVIDER: &str =
        "module.exports.data=function(context,cb){return cb(null, {name:'John'}); };";

    const INVALID_PROVIDER: &str =
        "var data=require('request');\nmodule.exports.data=function(context,cb){\nreturn cb(null,data; };";

    struct Fixture {
        _dir: TempDir,
        component_path: std::path::PathBuf,
        publish_path: std::path::PathBuf,
    }

    fn component_with(script_name: &str, content: &str) -> Fixture {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = tempfile::tempdir().unwrap();
        let component_path = dir.path().join("component");
        let publish_path = component_path.join("_package");
        std::fs::create_dir_all(&publish_path).unwrap();

        let script_path = component_path.join(script_name);
        if let Some(parent) = script_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&script_path, content).unwrap();

        Fixture {
            _dir: dir,
            component_path,
            publish_path,
        }
    }

    fn request_for(fixture: &Fixture, data: &str) -> PackagingRequest {
        PackagingRequest {
            component_path: fixture.component_path.clone(),
            publish_path: fixture.publish_path.clone(),
            manifest: ComponentManifest {
                files: ManifestFiles {
                    data: data.to_string(),
                },
            },
            bundler: BundlerOptions {
                stats: StatsLevel::None,
                ..BundlerOptions::default()
            },
        }
    }

    fn publish_dir_entries(publish_path: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(publish_path)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_saves_compiled_data_provider() {
        let fixture = component_with("server.js", VALID_PROVIDER);

        let result = package(request_for(&fixture, "server.js")).await.unwrap();

        assert_eq!(result.artifact_type, "node.js");
        assert_eq!(result.src, "server.js");

        let compiled =
            std::fs::read_to_string(fixture.publish_path.join(&result.src)).unwrap();
        assert_eq!(result.hash_key, hash::from_string(&compiled));
        assert!(compiled.contains("module.exports.data"));
    }

    #[tokio::test]
    async fn test_invalid_javascript_reports_position() {
        let fixture = component_with("server.js", INVALID_PROVIDER);

        let err = package(request_for(&fixture, "server.js"))
            .await
            .unwrap_err();

        let pattern = Regex::new(r"Unexpected token.*\(3:19\)").unwrap();
        assert!(
            pattern.is_match(&err.to_string()),
            "unexpected message: {err}"
        );
        match err {
            PackagingError::Syntax { file, diagnostic } => {
                assert_eq!(file, "server.js");
                assert_eq!((diagnostic.line, diagnostic.column), (3, 19));
            }
            other => panic!("expected Syntax, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_packaging_twice_yields_identical_hash() {
        let fixture = component_with("server.js", VALID_PROVIDER);

        let first = package(request_for(&fixture, "server.js")).await.unwrap();
        let second = package(request_for(&fixture, "server.js")).await.unwrap();

        assert_eq!(first.hash_key, second.hash_key);
    }

    #[tokio::test]
    async fn test_missing_script_leaves_publish_path_unchanged() {
        let fixture = component_with("other.js", VALID_PROVIDER);

        let err = package(request_for(&fixture, "server.js"))
            .await
            .unwrap_err();

        match err {
            PackagingError::ScriptNotFound { script } => assert_eq!(script, "server.js"),
            other => panic!("expected ScriptNotFound, got {other:?}"),
        }
        assert!(publish_dir_entries(&fixture.publish_path).is_empty());
    }

    #[tokio::test]
    async fn test_no_artifact_written_on_syntax_error() {
        let fixture = component_with("server.js", INVALID_PROVIDER);

        package(request_for(&fixture, "server.js"))
            .await
            .unwrap_err();

        assert!(publish_dir_entries(&fixture.publish_path).is_empty());
    }

    #[tokio::test]
    async fn test_src_is_basename_of_nested_script() {
        let fixture = component_with("src/server.js", VALID_PROVIDER);

        let result = package(request_for(&fixture, "src/server.js"))
            .await
            .unwrap();

        assert_eq!(result.src, "server.js");
        assert_eq!(
            publish_dir_entries(&fixture.publish_path),
            vec!["server.js".to_string()]
        );
    }

    #[tokio::test]
    async fn test_module_syntax_is_rejected() {
        let fixture = component_with(
            "server.js",
            "const {first, last} = {first: \"John\", last: \"Doe\"};\nexport const data = (context,cb) => cb(null, context, first, last)",
        );

        let err = package(request_for(&fixture, "server.js"))
            .await
            .unwrap_err();

        match err {
            PackagingError::Syntax { diagnostic, .. } => assert_eq!(diagnostic.line, 2),
            other => panic!("expected Syntax, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_repackaging_replaces_existing_artifact() {
        let fixture = component_with("server.js", VALID_PROVIDER);
        std::fs::write(fixture.publish_path.join("server.js"), "stale artifact").unwrap();

        let result = package(request_for(&fixture, "server.js")).await.unwrap();

        let compiled =
            std::fs::read_to_string(fixture.publish_path.join("server.js")).unwrap();
        assert_ne!(compiled, "stale artifact");
        assert_eq!(result.hash_key, hash::from_string(&compiled));
    }

    #[tokio::test]
    async fn test_unminified_output_honors_hash_contract() {
        let fixture = component_with("server.js", VALID_PROVIDER);
        let mut request = request_for(&fixture, "server.js");
        request.bundler.minify = false;

        let result = package(request).await.unwrap();

        let compiled =
            std::fs::read_to_string(fixture.publish_path.join(&result.src)).unwrap();
        assert_eq!(result.hash_key, hash::from_string(&compiled));
    }
}
