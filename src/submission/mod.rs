pub mod dispatcher;
pub mod fields;
pub mod form;
pub mod honeypot;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
