//! Reporter module for output formatting

pub mod console;
pub mod html;
pub mod json;
pub mod script;
pub mod stylesheet;

pub use console::ConsoleReporter;
pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use script::ScriptReporter;
pub use stylesheet::StylesheetReporter;
