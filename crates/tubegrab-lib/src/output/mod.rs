mod template;

pub use template::{OutputTemplate, build_output_template};
