//! Parser module for certification report XML

pub mod attributes;
pub mod report_file;
pub mod xml;

pub use attributes::read_document_attributes;
pub use report_file::ReportFileParser;
pub use xml::{read_report, XmlParser};
