use poster_layout::*;

#[test]
fn test_default_options() {
    let options = PosterOptions::default();
    assert_eq!(
        options.sizing,
        SizingSpec::FitToBox {
            max_width: 594.0,
            max_height: 841.0
        }
    );
    assert_eq!(options.paper, PaperSize::A4);
    assert_eq!(options.border, Border::uniform(20.0));
    assert_eq!(options.strategy, Strategy::Simple);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_border_too_large() {
    let options = PosterOptions {
        border: Border::new(150.0, 20.0, 150.0, 20.0),
        ..Default::default()
    };
    match options.validate() {
        Err(PosterError::InvalidDimension(msg)) => {
            assert!(msg.contains("printable height"));
        }
        other => panic!("Expected InvalidDimension error, got {:?}", other),
    }
}

#[test]
fn test_validation_bad_sizing() {
    let mut options = PosterOptions::default();

    options.sizing = SizingSpec::MaxSheetCount(0);
    assert!(matches!(options.validate(), Err(PosterError::NoSolutionFound(_))));

    options.sizing = SizingSpec::AreaMultiplier(-2.0);
    assert!(matches!(options.validate(), Err(PosterError::InvalidDimension(_))));

    options.sizing = SizingSpec::MaxSheetCount(1);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_custom_paper() {
    let options = PosterOptions {
        paper: PaperSize::Custom {
            width_mm: 0.0,
            height_mm: 100.0,
        },
        ..Default::default()
    };
    assert!(matches!(options.validate(), Err(PosterError::InvalidDimension(_))));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = PosterOptions {
        sizing: SizingSpec::MaxSheetCount(12),
        paper: PaperSize::Custom {
            width_mm: 200.0,
            height_mm: 300.0,
        },
        border: Border::new(5.0, 10.0, 15.0, 20.0),
        strategy: Strategy::Complex,
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    // Save
    options.save(path).await.unwrap();

    // Load
    let loaded = PosterOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poster.json");
    tokio::fs::write(&path, r#"{ "strategy": "complex" }"#).await.unwrap();

    let loaded = PosterOptions::load(&path).await.unwrap();
    assert_eq!(loaded.strategy, Strategy::Complex);
    assert_eq!(loaded.paper, PaperSize::A4);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    match PosterOptions::load(&path).await {
        Err(PosterError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = PosterOptions::load(dir.path().join("absent.json")).await;
    assert!(matches!(result, Err(PosterError::Io(_))));
}
