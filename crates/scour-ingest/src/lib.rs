pub mod error;
pub mod reader;
pub mod writer;

pub use error::{IngestError, Result};
pub use reader::{read_frame, read_frame_from};
pub use writer::{write_frame, write_frame_to};
