pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod info;
pub mod model;
pub mod probe;
pub mod server;
pub mod sink;
pub mod transform;
pub mod utils;
pub mod validation;

pub use batch::{
    batch_process, collect_image_files, is_image_file, output_name, run_batch, NullProgress,
    ProgressObserver,
};
pub use error::{BatchError, Result};
pub use model::{BatchResult, Dimensions, ItemResult, SourceImage};
pub use probe::{probe_dimensions, DimensionCache};
pub use sink::{archive_file_name, BufferSink, Delivery, DirectorySink, OutputSink, ZipSink};
pub use transform::{
    scaled_dimensions, source_format, transform_image, TargetFormat, TransformMode, TransformSpec,
};
pub use validation::validate_upload_batch;
