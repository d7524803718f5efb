//! The `prism classify` command.

use std::path::PathBuf;

use clap::Args;
use prism_core::{Classifier, Config, PipelineError};

/// Arguments for the `classify` command.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Image file to classify
    #[arg(required = true)]
    pub input: PathBuf,

    /// ONNX model file (overrides config)
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Synset label file (overrides config)
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the classify command.
pub fn execute(args: ClassifyArgs, mut config: Config) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!(
            "Input file does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            args.input
        );
    }

    // CLI flags override config values
    if let Some(model) = args.model {
        config.model.path = model;
    }
    if let Some(catalog) = args.catalog {
        config.catalog.path = catalog;
    }

    let classifier = Classifier::load(&config.model.path, &config.catalog.path)?;

    let bytes = std::fs::read(&args.input)?;
    let response = classifier
        .classify_to_response(&bytes)
        .map_err(|e| annotate(e, &args.input))?;

    if response.predictions.is_empty() {
        tracing::warn!("No class scored above zero for {:?}", args.input);
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            tracing::info!("Predictions written to {:?}", path);
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Attach the input path and a usage hint to a pipeline error.
fn annotate(error: PipelineError, input: &std::path::Path) -> anyhow::Error {
    let hint = if error.is_client_error() {
        "\n\n  Hint: The file does not look like a decodable image."
    } else {
        ""
    };
    anyhow::anyhow!("{error} (while classifying {input:?}){hint}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_rejected() {
        let args = ClassifyArgs {
            input: PathBuf::from("/nonexistent/image.jpg"),
            model: None,
            catalog: None,
            output: None,
            pretty: false,
        };
        let err = execute(args, Config::default()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_malformed_catalog_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("image.jpg");
        std::fs::write(&input, b"placeholder").unwrap();
        let catalog = dir.path().join("synset.txt");
        std::fs::write(&catalog, "bad\n").unwrap();

        let args = ClassifyArgs {
            input,
            model: Some(dir.path().join("model.onnx")),
            catalog: Some(catalog),
            output: None,
            pretty: false,
        };
        let err = execute(args, Config::default()).unwrap_err();
        assert!(err.to_string().contains("Malformed catalog line"));
    }

    #[test]
    fn test_missing_model_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("image.jpg");
        std::fs::write(&input, b"placeholder").unwrap();
        let catalog = dir.path().join("synset.txt");
        std::fs::write(&catalog, "n00000001 tench, Tinca tinca\n").unwrap();

        let args = ClassifyArgs {
            input,
            model: Some(dir.path().join("missing.onnx")),
            catalog: Some(catalog),
            output: None,
            pretty: false,
        };
        let err = execute(args, Config::default()).unwrap_err();
        assert!(err.to_string().contains("ONNX"));
    }

    #[test]
    fn test_annotate_marks_client_errors() {
        let err = annotate(
            PipelineError::Decode {
                message: "bad bytes".into(),
            },
            std::path::Path::new("x.jpg"),
        );
        assert!(err.to_string().contains("Hint"));

        let err = annotate(
            PipelineError::Inference {
                message: "backend".into(),
            },
            std::path::Path::new("x.jpg"),
        );
        assert!(!err.to_string().contains("Hint"));
    }
}
