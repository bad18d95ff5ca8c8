// Control characters
pub const HT: u8 = 0x09; // horizontal tab
pub const LF: u8 = 0x0A; // line feed
pub const CR: u8 = 0x0D; // carriage return
pub const DEL: u8 = 0x7F;

// Printable
pub const SP: u8 = 0x20; // space
pub const EXCLAMATION: u8 = 0x21; // !
pub const NUM: u8 = 0x23; // #
pub const DOLLAR: u8 = 0x24; // $
pub const PERCENT: u8 = 0x25; // %
pub const AMPERSAND: u8 = 0x26; // &
pub const SQUOTE: u8 = 0x27; // '
pub const LEFT_PAR: u8 = 0x28; // (
pub const RIGHT_PAR: u8 = 0x29; // )
pub const ASTERISK: u8 = 0x2A; // *
pub const PLUS: u8 = 0x2B; // +
pub const MINUS: u8 = 0x2D; // -
pub const PERIOD: u8 = 0x2E; // .
pub const COL: u8 = 0x3A; // :
pub const EQ: u8 = 0x3D; // =
pub const QUESTION: u8 = 0x3F; // ?
pub const CARRET: u8 = 0x5E; // ^
pub const UNDERSCORE: u8 = 0x5F; // _
pub const GRAVE: u8 = 0x60; // `
pub const LEFT_CURLY: u8 = 0x7B; // {
pub const PIPE: u8 = 0x7C; // |
pub const RIGHT_CURLY: u8 = 0x7D; // }
pub const TILDE: u8 = 0x7E; // ~

// Groups
// Folding white space
pub const WS: &[u8] = &[HT, SP];
// Linear white space, the set used to split tokens
pub const LWSP: &[u8] = &[HT, LF, CR, SP];
