// Configuration unit tests

use pixelstore::config::*;
use pixelstore::error::ImageError;
use pixelstore::pipeline::TransformEngine;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_full_config_round_trip() {
    let yaml = r#"
storage:
  backend: memory
  root: "/unused"
codec:
  jpeg_quality: 60
  gif_speed: 20
transform:
  max_width: 1024
  max_height: 768
logging:
  level: "pixelstore=debug,info"
  format: pretty
"#;
    let config = Config::from_yaml_with_env(yaml).unwrap();
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(
        config.codec,
        CodecConfig {
            jpeg_quality: 60,
            gif_speed: 20
        }
    );
    assert_eq!(
        config.transform,
        TransformConfig {
            max_width: 1024,
            max_height: 768
        }
    );
    assert_eq!(config.logging.level, "pixelstore=debug,info");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert!(config.validate().is_ok());

    // Serializing and reloading yields the same settings
    let dumped = serde_yaml::to_string(&config).unwrap();
    let reloaded = Config::from_yaml_with_env(&dumped).unwrap();
    assert_eq!(reloaded.codec, config.codec);
    assert_eq!(reloaded.transform, config.transform);
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.storage.backend, StorageBackend::Filesystem);
    assert_eq!(config.storage.root, "./uploads");
    assert_eq!(config.codec.jpeg_quality, 75);
    assert_eq!(config.codec.gif_speed, 10);
    assert_eq!(config.transform.max_width, 4096);
    assert_eq!(config.transform.max_height, 4096);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file_with_env_substitution() {
    std::env::set_var("PIXELSTORE_UNIT_QUALITY", "42");
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "codec:\n  jpeg_quality: ${{PIXELSTORE_UNIT_QUALITY}}").unwrap();
    file.flush().unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.codec.jpeg_quality, 42);
}

#[test]
fn test_missing_file() {
    let err = Config::from_file("/definitely/not/here/pixelstore.yaml").unwrap_err();
    assert!(err.contains("Failed to read config file"));
}

#[test]
fn test_out_of_range_quality_fails_parse_or_validation() {
    // 300 does not fit in a u8
    assert!(Config::from_yaml_with_env("codec:\n  jpeg_quality: 300\n").is_err());

    let config = Config::from_yaml_with_env("codec:\n  gif_speed: 0\n").unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_engine_from_memory_config() {
    let config = Config::from_yaml_with_env("storage:\n  backend: memory\n").unwrap();
    let engine = TransformEngine::from_config(&config).unwrap();
    assert!(engine.registry().supports("jpg"));
    assert!(format!("{:?}", engine).contains("max_width: 4096"));
    assert!(matches!(
        engine.fetch("anything", None),
        Err(ImageError::NotFound { .. })
    ));
}
