pub mod config;
pub mod decode;
pub mod extract;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;

pub use config::{ConfigError, OcrConfig};
pub use decode::{decode_base64_image, DecodeError};
pub use extract::TextExtractor;
pub use pipeline::{PipelineError, SortPipeline, TracingObserver};
pub use preprocess::{encode_png, to_grayscale, PreprocessError};
pub use recognizer::{backend_from_config, MockRecognizer, OcrBackend, OcrError, ScriptedRecognizer};
