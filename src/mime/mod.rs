/// Charset backends turning encoded-word bytes into text
pub mod charset;
