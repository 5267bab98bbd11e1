//! The fixed Morse code table and its derived lookups

use std::collections::HashMap;
use std::sync::OnceLock;

/// Every supported character with its canonical dot/dash string.
///
/// Letters are stored uppercase; lookups expect already-uppercased input.
pub static CODE_TABLE: [(char, &str); 44] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('!', "-.-.--"),
    ('/', "-..-."),
    ('@', ".--.-."),
    ('-', "-....-"),
    (':', "---..."),
];

/// Forward and reverse lookups over [`CODE_TABLE`].
///
/// Built once on first use and shared for the life of the process.
pub struct CodeTable {
    forward: HashMap<char, &'static str>,
    reverse: HashMap<&'static str, char>,
}

impl CodeTable {
    /// The process-wide table
    pub fn global() -> &'static CodeTable {
        static TABLE: OnceLock<CodeTable> = OnceLock::new();
        TABLE.get_or_init(Self::build)
    }

    fn build() -> Self {
        let forward: HashMap<char, &'static str> = CODE_TABLE.iter().copied().collect();
        let reverse: HashMap<&'static str, char> =
            CODE_TABLE.iter().map(|&(ch, code)| (code, ch)).collect();
        debug_assert_eq!(reverse.len(), CODE_TABLE.len(), "code table must be a bijection");
        Self { forward, reverse }
    }

    /// Symbol string for an (uppercase) character
    pub fn symbol(&self, ch: char) -> Option<&'static str> {
        self.forward.get(&ch).copied()
    }

    /// Character for a symbol string
    pub fn character(&self, symbol: &str) -> Option<char> {
        self.reverse.get(symbol).copied()
    }
}
