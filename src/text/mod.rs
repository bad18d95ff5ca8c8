pub mod ascii;
pub mod encoding;
pub mod whitespace;
pub mod words;
