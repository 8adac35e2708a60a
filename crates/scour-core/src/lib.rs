pub mod apply;
pub mod data_utils;
pub mod dedupe;
pub mod discretize;
pub mod error;
pub mod frame;
pub mod purge;
pub mod shuffle;

pub use apply::apply_domain;
pub use data_utils::{format_numeric, parse_f64};
pub use dedupe::deduplicate;
pub use discretize::equal_width_template;
pub use error::{FrameError, TransformError};
pub use frame::Frame;
pub use purge::purge;
pub use shuffle::shuffle;
