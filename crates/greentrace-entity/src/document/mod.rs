//! Document domain entities.

pub mod extracted;
pub mod file_type;
pub mod model;
pub mod processing;
pub mod source;
pub mod status;
pub mod verification;

pub use extracted::{Confidence, EmissionScope, ExtractedData, ExtractedDataPatch};
pub use file_type::FileType;
pub use model::{Document, FileDescriptor};
pub use processing::ProcessingInfo;
pub use source::{SourceInfo, SourcePatch};
pub use status::{DocumentStatus, UploadMethod, VerificationStatus};
pub use verification::Verification;
