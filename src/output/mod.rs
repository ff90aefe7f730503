mod formatter;

pub use formatter::ModelFormatter;
