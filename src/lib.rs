pub mod annotation;
pub mod app;
pub mod class_colors;
pub mod errors;
pub mod logging;
pub mod record;
pub mod settings;
pub mod ui;
pub mod viewer;

pub use annotation::{Annotation, ObjectClass};
pub use viewer::{AnnotatedViewer, ViewerInput};
